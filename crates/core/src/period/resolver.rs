//! Resolves budget periods into concrete date windows.

use chrono::{Datelike, Days, NaiveDate};

use super::types::{BudgetPeriod, PeriodWindow, YearMonth};

/// Maps a period kind and reference date to an inclusive window.
pub struct PeriodResolver;

impl PeriodResolver {
    /// Resolves `period` around `reference`.
    ///
    /// - WEEKLY: Monday..Sunday containing `reference`
    /// - MONTHLY: first..last day of the month
    /// - YEARLY: Jan 1..Dec 31
    #[must_use]
    pub fn resolve(period: BudgetPeriod, reference: NaiveDate) -> PeriodWindow {
        match period {
            BudgetPeriod::Weekly => Self::week_of(reference),
            BudgetPeriod::Monthly => YearMonth::from_date(reference).window(),
            BudgetPeriod::Yearly => Self::year_of(reference),
        }
    }

    fn week_of(reference: NaiveDate) -> PeriodWindow {
        let from_monday = u64::from(reference.weekday().num_days_from_monday());
        let start = reference
            .checked_sub_days(Days::new(from_monday))
            .unwrap_or(NaiveDate::MIN);
        let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        PeriodWindow::new(start, end)
    }

    fn year_of(reference: NaiveDate) -> PeriodWindow {
        let start = reference.with_ordinal(1).unwrap_or(reference);
        let end = NaiveDate::from_ymd_opt(reference.year(), 12, 31).unwrap_or(reference);
        PeriodWindow::new(start, end)
    }
}
