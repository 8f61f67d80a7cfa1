//! Ordering for transaction listings, parsed from `field[,direction]`.

use std::str::FromStr;

use super::error::TransactionError;

/// Column a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Transaction date.
    Date,
    /// Amount.
    Amount,
    /// Description text.
    Description,
    /// Creation timestamp.
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// A parsed sort instruction. Defaults to `date,desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSort {
    /// Column to order by.
    pub field: SortField,
    /// Direction.
    pub direction: SortDirection,
}

impl Default for TransactionSort {
    fn default() -> Self {
        Self {
            field: SortField::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for TransactionSort {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TransactionError::InvalidSort(s.to_string());
        let mut parts = s.split(',').map(str::trim);

        let field = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("date") => SortField::Date,
            Some("amount") => SortField::Amount,
            Some("description") => SortField::Description,
            Some("created_at" | "createdat") => SortField::CreatedAt,
            _ => return Err(invalid()),
        };

        // Ascending when no direction is given.
        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(_) => return Err(invalid()),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self { field, direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_date_desc() {
        let sort = TransactionSort::default();
        assert_eq!(sort.field, SortField::Date);
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_parse_field_and_direction() {
        let sort: TransactionSort = "amount,DESC".parse().unwrap();
        assert_eq!(sort.field, SortField::Amount);
        assert_eq!(sort.direction, SortDirection::Desc);

        let sort: TransactionSort = "createdAt,asc".parse().unwrap();
        assert_eq!(sort.field, SortField::CreatedAt);
    }

    #[test]
    fn test_parse_without_direction_is_ascending() {
        let sort: TransactionSort = "description".parse().unwrap();
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("notes,asc".parse::<TransactionSort>().is_err());
        assert!("date,sideways".parse::<TransactionSort>().is_err());
        assert!("date,asc,extra".parse::<TransactionSort>().is_err());
    }
}
