//! Tests for report generation.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use fintrack_shared::types::{CategoryId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::aggregation::CategoryTotal;
use crate::aggregation::memory::InMemoryStore;
use crate::period::YearMonth;
use crate::transaction::TransactionType;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn total(name: &str, amount: Decimal, count: u64) -> CategoryTotal {
    CategoryTotal {
        category_id: CategoryId::new(),
        category_name: name.to_string(),
        category_color: "#808080".to_string(),
        total: amount,
        count,
    }
}

struct Fixture {
    user: UserId,
    food: CategoryId,
    rent: CategoryId,
    salary: CategoryId,
    store: InMemoryStore,
}

impl Fixture {
    fn new() -> Self {
        Self {
            user: UserId::new(),
            food: CategoryId::new(),
            rent: CategoryId::new(),
            salary: CategoryId::new(),
            store: InMemoryStore::new(),
        }
    }

    fn record(&mut self, category: CategoryId, kind: TransactionType, amount: Decimal, on: NaiveDate) {
        let name = if category == self.food {
            "Alimentação"
        } else if category == self.rent {
            "Moradia"
        } else {
            "Salário"
        };
        self.store.add_transaction(
            self.user,
            category,
            name,
            kind,
            amount,
            on,
            Utc.from_utc_datetime(&on.and_hms_opt(12, 0, 0).unwrap()),
        );
    }

    fn generator(self) -> ReportGenerator {
        ReportGenerator::new(Arc::new(self.store))
    }
}

#[test]
fn test_percentage_change_edge_cases() {
    assert_eq!(ReportGenerator::percentage_change(Decimal::ZERO, Decimal::ZERO), dec!(0));
    assert_eq!(ReportGenerator::percentage_change(Decimal::ZERO, dec!(50)), dec!(100));
    assert_eq!(ReportGenerator::percentage_change(Decimal::ZERO, dec!(-50)), dec!(100));
}

#[test]
fn test_percentage_change_values() {
    assert_eq!(ReportGenerator::percentage_change(dec!(100), dec!(150)), dec!(50.0));
    assert_eq!(ReportGenerator::percentage_change(dec!(200), dec!(150)), dec!(-25.0));
    assert_eq!(ReportGenerator::percentage_change(dec!(3), dec!(4)), dec!(33.3));
    assert_eq!(ReportGenerator::percentage_change(dec!(100), dec!(100)), dec!(0.0));
}

#[test]
fn test_negative_change_midpoint_rounds_up() {
    // -0.1225 ratio, -12.25% before display rounding
    assert_eq!(ReportGenerator::percentage_change(dec!(400), dec!(351)), dec!(-12.2));
    assert_eq!(ReportGenerator::percentage_change(dec!(400), dec!(449)), dec!(12.3));
}

#[test]
fn test_with_percentages_sorts_and_shares() {
    let summary = ReportGenerator::with_percentages(vec![
        total("Lazer", dec!(100), 1),
        total("Moradia", dec!(300), 1),
        total("Alimentação", dec!(600), 4),
    ]);

    let names: Vec<_> = summary.iter().map(|s| s.category_name.as_str()).collect();
    assert_eq!(names, ["Alimentação", "Moradia", "Lazer"]);
    assert_eq!(summary[0].percentage, dec!(60.0));
    assert_eq!(summary[0].transaction_count, 4);
    assert_eq!(summary[1].percentage, dec!(30.0));
    assert_eq!(summary[2].percentage, dec!(10.0));
}

#[test]
fn test_with_percentages_zero_total() {
    let summary = ReportGenerator::with_percentages(vec![total("Lazer", Decimal::ZERO, 0)]);
    assert_eq!(summary[0].percentage, Decimal::ZERO);
    assert!(ReportGenerator::with_percentages(Vec::new()).is_empty());
}

#[test]
fn test_clamp_months() {
    assert_eq!(ReportGenerator::clamp_months(None), 12);
    assert_eq!(ReportGenerator::clamp_months(Some(0)), 1);
    assert_eq!(ReportGenerator::clamp_months(Some(-5)), 1);
    assert_eq!(ReportGenerator::clamp_months(Some(6)), 6);
    assert_eq!(ReportGenerator::clamp_months(Some(100)), 24);
}

#[tokio::test]
async fn test_month_summary() {
    let mut fx = Fixture::new();
    let (food, salary, user) = (fx.food, fx.salary, fx.user);
    fx.record(salary, TransactionType::Income, dec!(5000), date(2024, 2, 5));
    fx.record(food, TransactionType::Expense, dec!(1000), date(2024, 2, 20));
    fx.record(salary, TransactionType::Income, dec!(5500), date(2024, 3, 5));
    fx.record(food, TransactionType::Expense, dec!(1500), date(2024, 3, 10));

    let summary = fx.generator().month_summary(user, date(2024, 3, 15)).await.unwrap();
    assert_eq!(summary.current_month.month.to_string(), "2024-03");
    assert_eq!(summary.current_month.balance, dec!(4000));
    assert_eq!(summary.previous_month.month.to_string(), "2024-02");
    assert_eq!(summary.previous_month.balance, dec!(4000));
    assert_eq!(summary.comparison.income_change, dec!(10.0));
    assert_eq!(summary.comparison.expense_change, dec!(50.0));
    assert_eq!(summary.comparison.balance_change, dec!(0.0));
}

#[tokio::test]
async fn test_category_summary_for_requested_month() {
    let mut fx = Fixture::new();
    let (food, rent, salary, user) = (fx.food, fx.rent, fx.salary, fx.user);
    fx.record(food, TransactionType::Expense, dec!(100), date(2024, 1, 3));
    fx.record(food, TransactionType::Expense, dec!(150), date(2024, 1, 25));
    fx.record(rent, TransactionType::Expense, dec!(750), date(2024, 1, 1));
    fx.record(rent, TransactionType::Expense, dec!(750), date(2024, 2, 1));
    fx.record(salary, TransactionType::Income, dec!(4000), date(2024, 1, 5));

    let summary = fx
        .generator()
        .category_summary(user, Some("2024-01"), date(2024, 3, 15))
        .await
        .unwrap();

    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].category_name, "Moradia");
    assert_eq!(summary[0].total, dec!(750));
    assert_eq!(summary[0].percentage, dec!(75.0));
    assert_eq!(summary[1].category_name, "Alimentação");
    assert_eq!(summary[1].transaction_count, 2);
    assert_eq!(summary[1].percentage, dec!(25.0));
}

#[tokio::test]
async fn test_category_summary_defaults_to_current_month() {
    let mut fx = Fixture::new();
    let (food, user) = (fx.food, fx.user);
    fx.record(food, TransactionType::Expense, dec!(40), date(2024, 3, 2));
    fx.record(food, TransactionType::Expense, dec!(60), date(2024, 2, 2));

    let summary = fx
        .generator()
        .category_summary(user, None, date(2024, 3, 15))
        .await
        .unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].total, dec!(40));
    assert_eq!(summary[0].percentage, dec!(100.0));
}

#[tokio::test]
async fn test_category_summary_rejects_bad_month() {
    let result = Fixture::new()
        .generator()
        .category_summary(UserId::new(), Some("03/2024"), date(2024, 3, 15))
        .await;
    assert!(matches!(result, Err(ReportError::InvalidMonth(m)) if m == "03/2024"));
}

#[tokio::test]
async fn test_monthly_evolution_is_chronological() {
    let mut fx = Fixture::new();
    let (food, salary, user) = (fx.food, fx.salary, fx.user);
    fx.record(salary, TransactionType::Income, dec!(3000), date(2023, 12, 5));
    fx.record(food, TransactionType::Expense, dec!(200), date(2024, 2, 5));

    let series = fx
        .generator()
        .monthly_evolution(user, Some(4), date(2024, 2, 29))
        .await
        .unwrap();

    let labels: Vec<_> = series.iter().map(|m| m.month.to_string()).collect();
    assert_eq!(labels, ["2023-11", "2023-12", "2024-01", "2024-02"]);
    assert_eq!(series[1].income, dec!(3000));
    assert_eq!(series[1].balance, dec!(3000));
    assert_eq!(series[3].expense, dec!(200));
    assert_eq!(series[3].balance, dec!(-200));
}

#[tokio::test]
async fn test_overview() {
    let mut fx = Fixture::new();
    let (food, rent, salary, user) = (fx.food, fx.rent, fx.salary, fx.user);
    fx.record(salary, TransactionType::Income, dec!(5000), date(2024, 1, 5));
    fx.record(rent, TransactionType::Expense, dec!(1200), date(2024, 3, 1));
    for day in 2..=8 {
        fx.record(food, TransactionType::Expense, dec!(10), date(2024, 3, day));
    }

    let overview = fx.generator().overview(user, date(2024, 3, 15)).await.unwrap();

    assert_eq!(overview.current_month.expense, dec!(1270));
    assert_eq!(overview.current_month.income, Decimal::ZERO);
    assert_eq!(overview.top_categories.len(), 2);
    assert_eq!(overview.top_categories[0].category_name, "Moradia");
    assert_eq!(overview.recent_transactions.len(), 5);
    assert_eq!(overview.recent_transactions[0].date, date(2024, 3, 8));
    assert_eq!(overview.recent_transactions[4].date, date(2024, 3, 4));
    assert_eq!(overview.all_time.income, dec!(5000));
    assert_eq!(overview.all_time.expense, dec!(1270));
    assert_eq!(overview.all_time.balance, dec!(3730));
}

#[tokio::test]
async fn test_recent_transactions_tie_break_on_created_at() {
    let mut store = InMemoryStore::new();
    let user = UserId::new();
    let category = CategoryId::new();
    let day = date(2024, 3, 10);
    let earlier = store.add_transaction(
        user,
        category,
        "Lazer",
        TransactionType::Expense,
        dec!(5),
        day,
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap(),
    );
    let later = store.add_transaction(
        user,
        category,
        "Lazer",
        TransactionType::Expense,
        dec!(5),
        day,
        Utc.with_ymd_and_hms(2024, 3, 10, 20, 0, 0).unwrap(),
    );

    let overview = ReportGenerator::new(Arc::new(store))
        .overview(user, date(2024, 3, 15))
        .await
        .unwrap();
    let ids: Vec<_> = overview.recent_transactions.iter().map(|t| t.id).collect();
    assert_eq!(ids, [later, earlier]);
}

#[tokio::test]
async fn test_transaction_summary() {
    let mut fx = Fixture::new();
    let (food, salary, user) = (fx.food, fx.salary, fx.user);
    fx.record(salary, TransactionType::Income, dec!(2500.50), date(2024, 3, 1));
    fx.record(food, TransactionType::Expense, dec!(120.25), date(2024, 3, 31));
    fx.record(food, TransactionType::Expense, dec!(99), date(2024, 4, 1));
    let generator = fx.generator();

    let summary = generator
        .transaction_summary(user, None, Some(date(2024, 12, 31)), date(2024, 3, 15))
        .await
        .unwrap();
    assert_eq!(summary.start_date, date(2024, 3, 1));
    assert_eq!(summary.end_date, date(2024, 3, 31));
    assert_eq!(summary.total_income, dec!(2500.50));
    assert_eq!(summary.total_expense, dec!(120.25));
    assert_eq!(summary.balance, dec!(2380.25));
    assert_eq!(summary.transaction_count, 2);

    let summary = generator
        .transaction_summary(user, Some(date(2024, 1, 1)), Some(date(2024, 12, 31)), date(2024, 3, 15))
        .await
        .unwrap();
    assert_eq!(summary.transaction_count, 3);
}

#[tokio::test]
async fn test_transaction_summary_rejects_inverted_range() {
    let result = Fixture::new()
        .generator()
        .transaction_summary(
            UserId::new(),
            Some(date(2024, 3, 31)),
            Some(date(2024, 3, 1)),
            date(2024, 3, 15),
        )
        .await;
    assert!(matches!(result, Err(ReportError::InvalidDateRange { .. })));
}

#[test]
fn test_month_summary_serializes_percentages_as_numbers() {
    let month = YearMonth::new(2024, 3).unwrap();
    let summary = MonthSummary {
        current_month: MonthTotals::new(month, dec!(10.00), dec!(5.00)),
        previous_month: MonthTotals::new(month.previous(), dec!(0), dec!(0)),
        comparison: MonthComparison {
            income_change: dec!(100),
            expense_change: dec!(100),
            balance_change: dec!(12.5),
        },
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["current_month"]["month"], "2024-03");
    assert_eq!(json["current_month"]["balance"], "5.00");
    assert_eq!(json["comparison"]["balance_change"], serde_json::json!(12.5));
}

proptest! {
    #[test]
    fn test_category_percentages_sum_to_hundred(
        amounts in prop::collection::vec(1i64..10_000_000, 1..15),
    ) {
        let totals = amounts
            .iter()
            .enumerate()
            .map(|(i, a)| total(&format!("c{i}"), Decimal::new(*a, 2), 1))
            .collect();
        let summary = ReportGenerator::with_percentages(totals);
        let sum: Decimal = summary.iter().map(|s| s.percentage).sum();
        // each entry is off by at most 0.005 (ratio) + 0.05 (display)
        let tolerance = Decimal::new(6, 2) * Decimal::from(summary.len());
        prop_assert!((sum - dec!(100)).abs() <= tolerance, "sum was {}", sum);
        prop_assert!(summary.windows(2).all(|w| w[0].total >= w[1].total));
    }

    #[test]
    fn test_clamp_months_range(months in proptest::option::of(-100i64..100)) {
        let count = ReportGenerator::clamp_months(months);
        prop_assert!((1..=24).contains(&count));
    }
}

#[tokio::test]
async fn test_evolution_length_matches_clamp() {
    let generator = Fixture::new().generator();
    for requested in [None, Some(-3), Some(1), Some(7), Some(24), Some(30)] {
        let series = generator
            .monthly_evolution(UserId::new(), requested, date(2024, 1, 15))
            .await
            .unwrap();
        assert_eq!(series.len() as u32, ReportGenerator::clamp_months(requested));
        assert!(series.windows(2).all(|w| w[0].month < w[1].month));
        assert_eq!(series.last().unwrap().month.to_string(), "2024-01");
    }
}
