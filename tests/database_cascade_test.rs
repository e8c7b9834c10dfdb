// ABOUTME: Integration tests for cascade delete completeness
// ABOUTME: Property and unit deletes must leave no orphaned dependents

mod common;

use common::{create_test_database, create_test_property, create_test_tenant, create_test_unit};
use quarters_server::models::{
    CreateAccountRequest, CreateAssociationRequest, CreateBoardMemberRequest,
    CreateNamedTypeRequest, CreateOwnerRequest, CreatePaymentRequest, CreatePhotoRequest,
    CreatePortfolioRequest, CreateTicketRequest, CreateTransactionRequest,
};

#[tokio::test]
async fn test_property_delete_cascades_through_full_subtree() {
    let db = create_test_database().await.expect("test database");
    let (property, address) = create_test_property(&db).await.expect("fixture");
    let unit = create_test_unit(&db, &address).await.expect("unit");
    let tenant = create_test_tenant(&db, &unit).await.expect("tenant");

    let payment = db
        .create_payment(&CreatePaymentRequest {
            tenant_id: tenant.id,
            amount: 1200.0,
            payment_date: chrono::NaiveDate::from_ymd_opt(2025, 7, 1).expect("date"),
            status: "settled".to_string(),
        })
        .await
        .expect("payment");

    let owner = db
        .create_owner(&CreateOwnerRequest {
            property_id: property.id,
            first_name: "Owen".to_string(),
            last_name: "Dale".to_string(),
            email: "owen@example.com".to_string(),
            phone: None,
        })
        .await
        .expect("owner");

    let association = db
        .create_association(&CreateAssociationRequest {
            property_id: property.id,
            name: "Test HOA".to_string(),
            contact_email: "hoa@example.com".to_string(),
            phone: None,
            monthly_fee: 50.0,
        })
        .await
        .expect("association");

    let member = db
        .create_board_member(&CreateBoardMemberRequest {
            association_id: association.id,
            name: "Board Person".to_string(),
            role: "president".to_string(),
            email: None,
            phone: None,
        })
        .await
        .expect("board member");

    let photo = db
        .create_photo(&CreatePhotoRequest {
            property_id: Some(property.id),
            unit_id: None,
            url: "https://photos.example.com/p.jpg".to_string(),
            name: "P".to_string(),
            is_primary: false,
        })
        .await
        .expect("photo");

    let ticket = db
        .create_ticket(&CreateTicketRequest {
            unit_id: unit.id,
            title: "Broken latch".to_string(),
            description: None,
        })
        .await
        .expect("ticket");

    let account_type = db
        .create_account_type(&CreateNamedTypeRequest {
            name: "Operating".to_string(),
        })
        .await
        .expect("account type");
    let account = db
        .create_account(&CreateAccountRequest {
            account_type_id: account_type.id,
            name: "Ops".to_string(),
        })
        .await
        .expect("account");
    let transaction = db
        .create_transaction(&CreateTransactionRequest {
            account_id: account.id,
            property_id: property.id,
            transaction_type_id: None,
            amount: 100.0,
            memo: None,
            transaction_date: chrono::NaiveDate::from_ymd_opt(2025, 7, 1).expect("date"),
        })
        .await
        .expect("transaction");

    let portfolio = db
        .create_portfolio(&CreatePortfolioRequest {
            name: "Holdings".to_string(),
            customer_email: None,
            property_ids: Some(vec![property.id]),
        })
        .await
        .expect("portfolio");

    assert!(db.delete_property(property.id).await.expect("delete"));

    // The entire dependent subtree is gone
    assert!(db.get_address(address.id).await.expect("query").is_none());
    assert!(db.get_unit(unit.id).await.expect("query").is_none());
    assert!(db.get_tenant(tenant.id).await.expect("query").is_none());
    assert!(db.get_payment(payment.id).await.expect("query").is_none());
    assert!(db.get_owner(owner.id).await.expect("query").is_none());
    assert!(db
        .get_association(association.id)
        .await
        .expect("query")
        .is_none());
    assert!(db
        .get_board_member(member.id)
        .await
        .expect("query")
        .is_none());
    assert!(db.get_photo(photo.id).await.expect("query").is_none());
    assert!(db.get_ticket(ticket.id).await.expect("query").is_none());
    assert!(db
        .get_transaction(transaction.id)
        .await
        .expect("query")
        .is_none());

    // Unrelated records survive, and the portfolio merely loses the member
    assert!(db.get_account(account.id).await.expect("query").is_some());
    let portfolio_detail = db
        .get_portfolio_detail(portfolio.id)
        .await
        .expect("query")
        .expect("portfolio survives");
    assert!(portfolio_detail.properties.is_empty());
}

#[tokio::test]
async fn test_unit_delete_cascades_to_tenants_and_attachments() {
    let db = create_test_database().await.expect("test database");
    let (_, address) = create_test_property(&db).await.expect("fixture");
    let unit = create_test_unit(&db, &address).await.expect("unit");
    let tenant = create_test_tenant(&db, &unit).await.expect("tenant");

    let payment = db
        .create_payment(&CreatePaymentRequest {
            tenant_id: tenant.id,
            amount: 1200.0,
            payment_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"),
            status: "settled".to_string(),
        })
        .await
        .expect("payment");

    let photo = db
        .create_photo(&CreatePhotoRequest {
            property_id: None,
            unit_id: Some(unit.id),
            url: "https://photos.example.com/u.jpg".to_string(),
            name: "U".to_string(),
            is_primary: false,
        })
        .await
        .expect("photo");

    let ticket = db
        .create_ticket(&CreateTicketRequest {
            unit_id: unit.id,
            title: "Drafty window".to_string(),
            description: None,
        })
        .await
        .expect("ticket");

    assert!(db.delete_unit(unit.id).await.expect("delete"));

    assert!(db.get_tenant(tenant.id).await.expect("query").is_none());
    assert!(db.get_payment(payment.id).await.expect("query").is_none());
    assert!(db.get_photo(photo.id).await.expect("query").is_none());
    assert!(db.get_ticket(ticket.id).await.expect("query").is_none());

    // The parent address is untouched
    assert!(db.get_address(address.id).await.expect("query").is_some());
}

#[tokio::test]
async fn test_tenant_delete_cascades_to_payments() {
    let db = create_test_database().await.expect("test database");
    let (_, address) = create_test_property(&db).await.expect("fixture");
    let unit = create_test_unit(&db, &address).await.expect("unit");
    let tenant = create_test_tenant(&db, &unit).await.expect("tenant");

    let payment = db
        .create_payment(&CreatePaymentRequest {
            tenant_id: tenant.id,
            amount: 900.0,
            payment_date: chrono::NaiveDate::from_ymd_opt(2025, 5, 1).expect("date"),
            status: "pending".to_string(),
        })
        .await
        .expect("payment");

    assert!(db.delete_tenant(tenant.id).await.expect("delete"));
    assert!(db.get_payment(payment.id).await.expect("query").is_none());
    assert!(db.get_unit(unit.id).await.expect("query").is_some());
}
