//! In-memory store for unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fintrack_shared::types::{CategoryId, TransactionId, UserId};
use rust_decimal::Decimal;

use super::{AggregationError, AggregationStore, BudgetRecord, CategoryTotal, TransactionRecord};
use crate::transaction::TransactionType;

#[derive(Debug, Default)]
pub(crate) struct InMemoryStore {
    transactions: Vec<(UserId, TransactionRecord)>,
    budgets: Vec<(UserId, BudgetRecord)>,
    pub(crate) fail: bool,
}

impl InMemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_budget(&mut self, user_id: UserId, budget: BudgetRecord) {
        self.budgets.push((user_id, budget));
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn add_transaction(
        &mut self,
        user_id: UserId,
        category_id: CategoryId,
        category_name: &str,
        transaction_type: TransactionType,
        amount: Decimal,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> TransactionId {
        let id = TransactionId::new();
        self.transactions.push((
            user_id,
            TransactionRecord {
                id,
                description: format!("{category_name} on {date}"),
                amount,
                transaction_type,
                category_id,
                category_name: category_name.to_string(),
                category_color: "#808080".to_string(),
                date,
                created_at,
            },
        ));
        id
    }

    fn check(&self) -> Result<(), AggregationError> {
        if self.fail {
            Err(AggregationError::Backend("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn matching(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &TransactionRecord> {
        self.transactions
            .iter()
            .filter(move |(owner, t)| *owner == user_id && start <= t.date && t.date <= end)
            .map(|(_, t)| t)
    }
}

#[async_trait]
impl AggregationStore for InMemoryStore {
    async fn sum_amount(
        &self,
        user_id: UserId,
        transaction_type: TransactionType,
        category_id: Option<CategoryId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Decimal, AggregationError> {
        self.check()?;
        Ok(self
            .matching(user_id, start, end)
            .filter(|t| t.transaction_type == transaction_type)
            .filter(|t| category_id.is_none_or(|c| c == t.category_id))
            .map(|t| t.amount)
            .sum())
    }

    async fn count_transactions(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u64, AggregationError> {
        self.check()?;
        Ok(self.matching(user_id, start, end).count() as u64)
    }

    async fn list_budgets(&self, user_id: UserId) -> Result<Vec<BudgetRecord>, AggregationError> {
        self.check()?;
        Ok(self
            .budgets
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, b)| b.clone())
            .collect())
    }

    async fn sum_by_category(
        &self,
        user_id: UserId,
        transaction_type: TransactionType,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CategoryTotal>, AggregationError> {
        self.check()?;
        let mut groups: HashMap<CategoryId, CategoryTotal> = HashMap::new();
        for t in self
            .matching(user_id, start, end)
            .filter(|t| t.transaction_type == transaction_type)
        {
            let entry = groups.entry(t.category_id).or_insert_with(|| CategoryTotal {
                category_id: t.category_id,
                category_name: t.category_name.clone(),
                category_color: t.category_color.clone(),
                total: Decimal::ZERO,
                count: 0,
            });
            entry.total += t.amount;
            entry.count += 1;
        }
        Ok(groups.into_values().collect())
    }

    async fn sum_all_time(
        &self,
        user_id: UserId,
        transaction_type: TransactionType,
    ) -> Result<Decimal, AggregationError> {
        self.check()?;
        Ok(self
            .transactions
            .iter()
            .filter(|(owner, t)| *owner == user_id && t.transaction_type == transaction_type)
            .map(|(_, t)| t.amount)
            .sum())
    }

    async fn recent_transactions(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<TransactionRecord>, AggregationError> {
        self.check()?;
        let mut records: Vec<TransactionRecord> = self
            .transactions
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, t)| t.clone())
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(records)
    }
}
