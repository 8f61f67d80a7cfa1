//! Integration tests for categories and transactions.

mod common;

use chrono::NaiveDate;
use fintrack_core::transaction::{SortDirection, SortField, TransactionSort};
use fintrack_db::entities::sea_orm_active_enums::TransactionType;
use fintrack_db::repositories::{
    CategoryError, CategoryInput, TransactionError, TransactionFilter, TransactionInput,
};
use fintrack_db::{CategoryRepository, TransactionRepository};
use fintrack_shared::types::PageRequest;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn category_id(db: &sea_orm::DatabaseConnection, user_id: Uuid, name: &str) -> Uuid {
    CategoryRepository::new(db.clone())
        .list(user_id, None)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == name)
        .map(|c| c.id)
        .expect("default category should exist")
}

fn expense(category_id: Uuid, description: &str, amount: rust_decimal::Decimal, on: NaiveDate) -> TransactionInput {
    TransactionInput {
        description: description.to_string(),
        amount,
        transaction_type: TransactionType::Expense,
        category_id,
        date: on,
        notes: None,
        recurring: false,
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_create_rejects_type_mismatch() {
    let db = common::setup().await;
    let user = common::register_user(&db).await;
    let salary = category_id(&db, user.id, "Salário").await;

    let result = TransactionRepository::new(db.clone())
        .create(user.id, expense(salary, "Groceries", dec!(10.00), date(2024, 3, 1)))
        .await;
    assert!(matches!(result, Err(TransactionError::Rule(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_create_rejects_foreign_category() {
    let db = common::setup().await;
    let owner = common::register_user(&db).await;
    let other = common::register_user(&db).await;
    let food = category_id(&db, owner.id, "Alimentação").await;

    let result = TransactionRepository::new(db.clone())
        .create(other.id, expense(food, "Groceries", dec!(10.00), date(2024, 3, 1)))
        .await;
    assert!(matches!(result, Err(TransactionError::CategoryNotFound(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_list_filters_search_and_paginates() {
    let db = common::setup().await;
    let user = common::register_user(&db).await;
    let food = category_id(&db, user.id, "Alimentação").await;
    let repo = TransactionRepository::new(db.clone());

    for (i, description) in ["Market 100%", "Bakery", "Supermarket", "Market stall"]
        .into_iter()
        .enumerate()
    {
        let day = u32::try_from(i).unwrap() + 1;
        repo.create(user.id, expense(food, description, dec!(5.00), date(2024, 3, day)))
            .await
            .unwrap();
    }

    let filter = TransactionFilter {
        search: Some("MARKET".to_string()),
        ..TransactionFilter::default()
    };
    let (rows, total) = repo
        .list(user.id, &filter, PageRequest::new(Some(0), Some(2)), TransactionSort::default())
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].transaction.description, "Market stall");

    let literal = TransactionFilter {
        search: Some("100%".to_string()),
        ..TransactionFilter::default()
    };
    let (rows, total) = repo
        .list(user.id, &literal, PageRequest::default(), TransactionSort::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].transaction.description, "Market 100%");

    let by_description = TransactionSort {
        field: SortField::Description,
        direction: SortDirection::Asc,
    };
    let (rows, _) = repo
        .list(user.id, &TransactionFilter::default(), PageRequest::default(), by_description)
        .await
        .unwrap();
    assert_eq!(rows[0].transaction.description, "Bakery");
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_delete_category_in_use_is_refused() {
    let db = common::setup().await;
    let user = common::register_user(&db).await;
    let food = category_id(&db, user.id, "Alimentação").await;
    let transactions = TransactionRepository::new(db.clone());
    let categories = CategoryRepository::new(db.clone());

    let created = transactions
        .create(user.id, expense(food, "Lunch", dec!(12.50), date(2024, 3, 4)))
        .await
        .unwrap();
    assert!(matches!(
        categories.delete(user.id, food).await,
        Err(CategoryError::InUse)
    ));

    transactions.delete(user.id, created.transaction.id).await.unwrap();
    categories.delete(user.id, food).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_type_change_is_refused_while_transactions_exist() {
    let db = common::setup().await;
    let user = common::register_user(&db).await;
    let food = category_id(&db, user.id, "Alimentação").await;
    let transactions = TransactionRepository::new(db.clone());
    let categories = CategoryRepository::new(db.clone());

    let created = transactions
        .create(user.id, expense(food, "Lunch", dec!(12.50), date(2024, 3, 4)))
        .await
        .unwrap();

    let as_income = CategoryInput {
        name: "Alimentação".to_string(),
        transaction_type: TransactionType::Income,
        color: None,
        icon: None,
    };
    assert!(matches!(
        categories.update(user.id, food, as_income.clone()).await,
        Err(CategoryError::TypeChangeInUse)
    ));

    let renamed = categories
        .update(
            user.id,
            food,
            CategoryInput {
                name: "Comida".to_string(),
                transaction_type: TransactionType::Expense,
                color: None,
                icon: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Comida");

    transactions.delete(user.id, created.transaction.id).await.unwrap();
    let switched = categories.update(user.id, food, as_income).await.unwrap();
    assert_eq!(switched.transaction_type, TransactionType::Income);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_concurrent_category_creates_leave_one_winner() {
    let db = common::setup().await;
    let user = common::register_user(&db).await;
    let repo = CategoryRepository::new(db.clone());
    let pets = || CategoryInput {
        name: "Pets".to_string(),
        transaction_type: TransactionType::Expense,
        color: None,
        icon: None,
    };

    let (first, second) = tokio::join!(repo.create(user.id, pets()), repo.create(user.id, pets()));

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(CategoryError::DuplicateName(name)) if name == "Pets"))
    );
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_duplicate_category_name_conflicts() {
    let db = common::setup().await;
    let user = common::register_user(&db).await;

    let result = CategoryRepository::new(db.clone())
        .create(
            user.id,
            CategoryInput {
                name: "Lazer".to_string(),
                transaction_type: TransactionType::Expense,
                color: None,
                icon: None,
            },
        )
        .await;
    assert!(matches!(result, Err(CategoryError::DuplicateName(_))));
}
