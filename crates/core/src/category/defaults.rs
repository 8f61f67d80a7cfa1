//! Categories every new account starts with.

use crate::transaction::TransactionType;

/// Color used when a category is created without one.
pub const DEFAULT_COLOR: &str = "#808080";

/// Icon used when a category is created without one.
pub const DEFAULT_ICON: &str = "default";

/// A category seeded at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCategory {
    /// Display name.
    pub name: &'static str,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// `#RRGGBB` color.
    pub color: &'static str,
    /// Icon identifier.
    pub icon: &'static str,
}

const fn expense(name: &'static str, color: &'static str, icon: &'static str) -> DefaultCategory {
    DefaultCategory {
        name,
        transaction_type: TransactionType::Expense,
        color,
        icon,
    }
}

const fn income(name: &'static str, color: &'static str, icon: &'static str) -> DefaultCategory {
    DefaultCategory {
        name,
        transaction_type: TransactionType::Income,
        color,
        icon,
    }
}

/// Seeded for every registered user. Names are unique so they satisfy the
/// per-user name constraint.
pub const DEFAULT_CATEGORIES: [DefaultCategory; 11] = [
    expense("Alimentação", "#FF5733", "utensils"),
    expense("Transporte", "#3498DB", "car"),
    expense("Moradia", "#2ECC71", "home"),
    expense("Saúde", "#E74C3C", "heartbeat"),
    expense("Educação", "#9B59B6", "graduation-cap"),
    expense("Lazer", "#F39C12", "gamepad"),
    expense("Outros", "#95A5A6", "ellipsis"),
    income("Salário", "#27AE60", "dollar-sign"),
    income("Freelance", "#16A085", "briefcase"),
    income("Investimentos", "#2980B9", "chart-line"),
    income("Outras Receitas", "#7F8C8D", "plus-circle"),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::category::is_hex_color;

    #[test]
    fn test_default_names_are_unique() {
        let names: HashSet<_> = DEFAULT_CATEGORIES.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn test_default_split_by_type() {
        let expenses = DEFAULT_CATEGORIES
            .iter()
            .filter(|c| c.transaction_type == TransactionType::Expense)
            .count();
        assert_eq!(expenses, 7);
        assert_eq!(DEFAULT_CATEGORIES.len() - expenses, 4);
    }

    #[test]
    fn test_default_colors_are_valid() {
        assert!(is_hex_color(DEFAULT_COLOR));
        for category in DEFAULT_CATEGORIES {
            assert!(is_hex_color(category.color), "{}", category.name);
        }
    }
}
