//! Postgres enum types and their domain counterparts.

use fintrack_core::auth::UserRole as DomainUserRole;
use fintrack_core::period::BudgetPeriod as DomainBudgetPeriod;
use fintrack_core::transaction::TransactionType as DomainTransactionType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `user_role` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    /// Regular user.
    #[sea_orm(string_value = "USER")]
    User,
    /// Administrator.
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

/// `transaction_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
pub enum TransactionType {
    /// Money in.
    #[sea_orm(string_value = "INCOME")]
    Income,
    /// Money out.
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

/// `budget_period` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "budget_period")]
pub enum BudgetPeriod {
    /// Monday to Sunday.
    #[sea_orm(string_value = "WEEKLY")]
    Weekly,
    /// Calendar month.
    #[sea_orm(string_value = "MONTHLY")]
    Monthly,
    /// Calendar year.
    #[sea_orm(string_value = "YEARLY")]
    Yearly,
}

impl From<DomainUserRole> for UserRole {
    fn from(role: DomainUserRole) -> Self {
        match role {
            DomainUserRole::User => Self::User,
            DomainUserRole::Admin => Self::Admin,
        }
    }
}

impl From<UserRole> for DomainUserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::User => Self::User,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl From<DomainTransactionType> for TransactionType {
    fn from(kind: DomainTransactionType) -> Self {
        match kind {
            DomainTransactionType::Income => Self::Income,
            DomainTransactionType::Expense => Self::Expense,
        }
    }
}

impl From<TransactionType> for DomainTransactionType {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
        }
    }
}

impl From<DomainBudgetPeriod> for BudgetPeriod {
    fn from(period: DomainBudgetPeriod) -> Self {
        match period {
            DomainBudgetPeriod::Weekly => Self::Weekly,
            DomainBudgetPeriod::Monthly => Self::Monthly,
            DomainBudgetPeriod::Yearly => Self::Yearly,
        }
    }
}

impl From<BudgetPeriod> for DomainBudgetPeriod {
    fn from(period: BudgetPeriod) -> Self {
        match period {
            BudgetPeriod::Weekly => Self::Weekly,
            BudgetPeriod::Monthly => Self::Monthly,
            BudgetPeriod::Yearly => Self::Yearly,
        }
    }
}
