// ABOUTME: Integration tests for property persistence
// ABOUTME: Covers CRUD, partial updates, and the eager-loaded detail shape

mod common;

use common::{create_test_database, create_test_property};
use quarters_server::models::{
    AddressPayload, CreateOwnerRequest, CreatePropertyRequest, PhotoPayload,
    UpdatePropertyRequest,
};

#[tokio::test]
async fn test_create_and_get_property() {
    let db = create_test_database().await.expect("test database");

    let property = db
        .create_property(&CreatePropertyRequest {
            name: "Harborview".to_string(),
            property_type: "commercial".to_string(),
            status: "active".to_string(),
            value: 2_000_000.0,
            addresses: None,
            photos: None,
        })
        .await
        .expect("create property");

    let fetched = db
        .get_property(property.id)
        .await
        .expect("get property")
        .expect("property exists");

    assert_eq!(fetched.id, property.id);
    assert_eq!(fetched.name, "Harborview");
    assert_eq!(fetched.property_type, "commercial");
    assert_eq!(fetched.status, "active");
    assert!((fetched.value - 2_000_000.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_get_missing_property_returns_none() {
    let db = create_test_database().await.expect("test database");

    let missing = db
        .get_property(uuid::Uuid::new_v4())
        .await
        .expect("query succeeds");

    assert!(missing.is_none());
}

#[tokio::test]
async fn test_partial_update_keeps_unset_fields() {
    let db = create_test_database().await.expect("test database");
    let (property, _) = create_test_property(&db).await.expect("fixture");

    let updated = db
        .update_property(
            property.id,
            &UpdatePropertyRequest {
                status: Some("sold".to_string()),
                ..UpdatePropertyRequest::default()
            },
        )
        .await
        .expect("update property")
        .expect("property exists");

    assert_eq!(updated.status, "sold");
    assert_eq!(updated.name, property.name);
    assert!((updated.value - property.value).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_update_missing_property_returns_none() {
    let db = create_test_database().await.expect("test database");

    let result = db
        .update_property(
            uuid::Uuid::new_v4(),
            &UpdatePropertyRequest {
                name: Some("Ghost".to_string()),
                ..UpdatePropertyRequest::default()
            },
        )
        .await
        .expect("query succeeds");

    assert!(result.is_none());
}

#[tokio::test]
async fn test_detail_includes_declared_relations() {
    let db = create_test_database().await.expect("test database");

    let property = db
        .create_property(&CreatePropertyRequest {
            name: "Maple Court".to_string(),
            property_type: "multi_family".to_string(),
            status: "active".to_string(),
            value: 1_000_000.0,
            addresses: Some(vec![
                AddressPayload {
                    id: None,
                    street: "412 Maple Ave".to_string(),
                    city: "Springfield".to_string(),
                    state: "IL".to_string(),
                    postal_code: "62704".to_string(),
                },
                AddressPayload {
                    id: None,
                    street: "414 Maple Ave".to_string(),
                    city: "Springfield".to_string(),
                    state: "IL".to_string(),
                    postal_code: "62704".to_string(),
                },
            ]),
            photos: Some(vec![PhotoPayload {
                id: None,
                url: "https://photos.example.com/front.jpg".to_string(),
                name: "Front".to_string(),
            }]),
        })
        .await
        .expect("create property");

    db.create_owner(&CreateOwnerRequest {
        property_id: property.id,
        first_name: "Ellis".to_string(),
        last_name: "Navarro".to_string(),
        email: "ellis@example.com".to_string(),
        phone: None,
    })
    .await
    .expect("create owner");

    let detail = db
        .get_property_detail(property.id)
        .await
        .expect("get detail")
        .expect("property exists");

    assert_eq!(detail.addresses.len(), 2);
    assert_eq!(detail.owners.len(), 1);
    assert_eq!(detail.photos.len(), 1);

    // First submitted address is primary and sorted first
    assert!(detail.addresses[0].is_primary);
    assert_eq!(detail.addresses[0].street, "412 Maple Ave");
    assert!(!detail.addresses[1].is_primary);
    assert!(detail.photos[0].is_primary);
}

#[tokio::test]
async fn test_file_backed_database_is_created_on_first_boot() {
    common::init_test_logging();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("quarters.db");
    let url = format!("sqlite:{}", path.display());

    let db = quarters_server::database::Database::new(&url)
        .await
        .expect("file-backed database");
    db.ping().await.expect("ping");
    assert!(path.exists());

    // Reopening runs migrations again without error
    drop(db);
    let reopened = quarters_server::database::Database::new(&url)
        .await
        .expect("reopen");
    reopened.ping().await.expect("ping");
}

#[tokio::test]
async fn test_delete_property() {
    let db = create_test_database().await.expect("test database");
    let (property, _) = create_test_property(&db).await.expect("fixture");

    assert!(db.delete_property(property.id).await.expect("delete"));
    assert!(db
        .get_property(property.id)
        .await
        .expect("query succeeds")
        .is_none());

    // Second delete reports missing
    assert!(!db.delete_property(property.id).await.expect("delete"));
}
