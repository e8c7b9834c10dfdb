// ABOUTME: Integration tests for ledger persistence
// ABOUTME: Covers named types, accounts, transactions, and reference protection

mod common;

use common::{create_test_database, create_test_property};
use quarters_server::models::{
    CreateAccountRequest, CreateNamedTypeRequest, CreateTransactionRequest,
    UpdateNamedTypeRequest, UpdateTransactionRequest,
};

#[tokio::test]
async fn test_account_type_crud() {
    let db = create_test_database().await.expect("test database");

    let operating = db
        .create_account_type(&CreateNamedTypeRequest {
            name: "Operating".to_string(),
        })
        .await
        .expect("create");

    let renamed = db
        .update_account_type(
            operating.id,
            &UpdateNamedTypeRequest {
                name: Some("Operating Funds".to_string()),
            },
        )
        .await
        .expect("update")
        .expect("exists");
    assert_eq!(renamed.name, "Operating Funds");

    assert_eq!(db.list_account_types().await.expect("list").len(), 1);
    assert!(db.delete_account_type(operating.id).await.expect("delete"));
    assert!(db.list_account_types().await.expect("list").is_empty());
}

#[tokio::test]
async fn test_duplicate_type_name_is_rejected() {
    let db = create_test_database().await.expect("test database");

    db.create_account_type(&CreateNamedTypeRequest {
        name: "Escrow".to_string(),
    })
    .await
    .expect("create");

    let duplicate = db
        .create_account_type(&CreateNamedTypeRequest {
            name: "Escrow".to_string(),
        })
        .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_account_type_in_use_cannot_be_deleted() {
    let db = create_test_database().await.expect("test database");

    let account_type = db
        .create_account_type(&CreateNamedTypeRequest {
            name: "Operating".to_string(),
        })
        .await
        .expect("create type");

    db.create_account(&CreateAccountRequest {
        account_type_id: account_type.id,
        name: "Ops".to_string(),
    })
    .await
    .expect("create account");

    assert!(db.delete_account_type(account_type.id).await.is_err());
}

#[tokio::test]
async fn test_transaction_lifecycle() {
    let db = create_test_database().await.expect("test database");
    let (property, _) = create_test_property(&db).await.expect("fixture");

    let account_type = db
        .create_account_type(&CreateNamedTypeRequest {
            name: "Operating".to_string(),
        })
        .await
        .expect("create type");
    let account = db
        .create_account(&CreateAccountRequest {
            account_type_id: account_type.id,
            name: "Ops".to_string(),
        })
        .await
        .expect("create account");
    let rent_type = db
        .create_transaction_type(&CreateNamedTypeRequest {
            name: "Rent".to_string(),
        })
        .await
        .expect("create type");

    let transaction = db
        .create_transaction(&CreateTransactionRequest {
            account_id: account.id,
            property_id: property.id,
            transaction_type_id: Some(rent_type.id),
            amount: 1450.0,
            memo: Some("July rent".to_string()),
            transaction_date: chrono::NaiveDate::from_ymd_opt(2025, 7, 1).expect("date"),
        })
        .await
        .expect("create transaction");

    assert_eq!(transaction.transaction_type_id, Some(rent_type.id));
    assert_eq!(transaction.memo.as_deref(), Some("July rent"));

    let updated = db
        .update_transaction(
            transaction.id,
            &UpdateTransactionRequest {
                amount: Some(1500.0),
                ..UpdateTransactionRequest::default()
            },
        )
        .await
        .expect("update")
        .expect("exists");
    assert!((updated.amount - 1500.0).abs() < f64::EPSILON);
    assert_eq!(updated.memo.as_deref(), Some("July rent"));

    assert!(db.delete_transaction(transaction.id).await.expect("delete"));
    assert!(db
        .get_transaction(transaction.id)
        .await
        .expect("query")
        .is_none());
}

#[tokio::test]
async fn test_transaction_requires_existing_references() {
    let db = create_test_database().await.expect("test database");
    let (property, _) = create_test_property(&db).await.expect("fixture");

    let orphan = db
        .create_transaction(&CreateTransactionRequest {
            account_id: uuid::Uuid::new_v4(),
            property_id: property.id,
            transaction_type_id: None,
            amount: 10.0,
            memo: None,
            transaction_date: chrono::NaiveDate::from_ymd_opt(2025, 7, 1).expect("date"),
        })
        .await;

    assert!(orphan.is_err());
}
