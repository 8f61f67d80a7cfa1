//! Database seeder for FinTrack development and testing.
//!
//! Creates a demo user with the default categories, three months of sample
//! transactions and a couple of monthly budgets.
//!
//! Usage: cargo run --bin seeder

use std::collections::HashMap;

use anyhow::{Context, anyhow};
use chrono::{Datelike, Months, NaiveDate, Utc};
use fintrack_core::auth::{UserRole, hash_password};
use fintrack_db::{
    BudgetRepository, CategoryRepository, TransactionRepository, UserRepository,
    entities::sea_orm_active_enums::{BudgetPeriod, TransactionType},
    repositories::{BudgetInput, TransactionInput},
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::info;
use uuid::Uuid;

const DEMO_EMAIL: &str = "demo@fintrack.dev";
const DEMO_PASSWORD: &str = "demo123";

/// (category, description, amount in cents, day of month)
const MONTHLY_ENTRIES: &[(&str, &str, i64, u32)] = &[
    ("Salário", "Salário mensal", 650_000, 5),
    ("Freelance", "Projeto freelance", 120_000, 18),
    ("Moradia", "Aluguel", 180_000, 10),
    ("Alimentação", "Supermercado", 62_340, 8),
    ("Alimentação", "Restaurante", 15_890, 21),
    ("Transporte", "Combustível", 28_000, 12),
    ("Saúde", "Farmácia", 8_750, 15),
    ("Lazer", "Cinema", 6_400, 24),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seeder=info,fintrack_db=info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = fintrack_db::connect(&database_url).await?;
    info!("Connected to database");

    let users = UserRepository::new(db.clone());
    if users.email_exists(DEMO_EMAIL).await? {
        info!(email = DEMO_EMAIL, "Demo user already exists, skipping");
        return Ok(());
    }

    let hash = hash_password(DEMO_PASSWORD)?;
    let user = users
        .register("Demo User", DEMO_EMAIL, &hash, UserRole::User.into())
        .await?;
    info!(user_id = %user.id, email = DEMO_EMAIL, "Created demo user");

    let categories = category_ids(&db, user.id).await?;
    let today = Utc::now().date_naive();

    let count = seed_transactions(&db, user.id, &categories, today).await?;
    info!(count, "Seeded transactions");

    let budgets = seed_budgets(&db, user.id, &categories, today).await?;
    info!(count = budgets, "Seeded budgets");

    info!("Seeding complete");
    Ok(())
}

async fn category_ids(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> anyhow::Result<HashMap<String, (Uuid, TransactionType)>> {
    Ok(CategoryRepository::new(db.clone())
        .list(user_id, None)
        .await?
        .into_iter()
        .map(|c| (c.name, (c.id, c.transaction_type)))
        .collect())
}

fn lookup(
    categories: &HashMap<String, (Uuid, TransactionType)>,
    name: &str,
) -> anyhow::Result<(Uuid, TransactionType)> {
    categories
        .get(name)
        .copied()
        .ok_or_else(|| anyhow!("default category '{name}' is missing"))
}

async fn seed_transactions(
    db: &DatabaseConnection,
    user_id: Uuid,
    categories: &HashMap<String, (Uuid, TransactionType)>,
    today: NaiveDate,
) -> anyhow::Result<usize> {
    let repo = TransactionRepository::new(db.clone());
    let this_month = today.with_day(1).unwrap_or(today);
    let mut count = 0;

    for back in (0..3).rev() {
        let month = this_month - Months::new(back);
        for &(category, description, cents, day) in MONTHLY_ENTRIES {
            let Some(date) = month.with_day(day).filter(|d| *d <= today) else {
                continue;
            };
            let (category_id, transaction_type) = lookup(categories, category)?;
            repo.create(
                user_id,
                TransactionInput {
                    description: description.to_string(),
                    amount: Decimal::new(cents, 2),
                    transaction_type,
                    category_id,
                    date,
                    notes: None,
                    recurring: transaction_type == TransactionType::Income
                        || category == "Moradia",
                },
            )
            .await?;
            count += 1;
        }
    }

    Ok(count)
}

async fn seed_budgets(
    db: &DatabaseConnection,
    user_id: Uuid,
    categories: &HashMap<String, (Uuid, TransactionType)>,
    today: NaiveDate,
) -> anyhow::Result<usize> {
    let repo = BudgetRepository::new(db.clone());
    let start = today.with_day(1).unwrap_or(today) - Months::new(2);
    let limits = [("Alimentação", 80_000), ("Transporte", 25_000), ("Lazer", 20_000)];

    for (category, cents) in limits {
        let (category_id, _) = lookup(categories, category)?;
        repo.create(
            user_id,
            BudgetInput {
                category_id,
                amount: Decimal::new(cents, 2),
                period: BudgetPeriod::Monthly,
                start_date: start,
                end_date: None,
            },
        )
        .await?;
    }

    Ok(limits.len())
}
