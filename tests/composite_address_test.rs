// ABOUTME: Integration tests for the composite address/photo update protocol
// ABOUTME: Verifies diff-by-id semantics and the first-in-list primary rule

mod common;

use common::{create_test_database, create_test_unit};
use quarters_server::models::{
    AddressPayload, CreatePropertyRequest, PhotoPayload, UpdateAddressRequest,
    UpdatePropertyRequest,
};

#[tokio::test]
async fn test_composite_update_applies_diff_and_primary_rule() {
    let db = create_test_database().await.expect("test database");

    // Start with two addresses: A (primary) and C
    let property = db
        .create_property(&CreatePropertyRequest {
            name: "Diff House".to_string(),
            property_type: "multi_family".to_string(),
            status: "active".to_string(),
            value: 750_000.0,
            addresses: Some(vec![
                AddressPayload {
                    id: None,
                    street: "A Street".to_string(),
                    city: "Testville".to_string(),
                    state: "TS".to_string(),
                    postal_code: "00001".to_string(),
                },
                AddressPayload {
                    id: None,
                    street: "C Street".to_string(),
                    city: "Testville".to_string(),
                    state: "TS".to_string(),
                    postal_code: "00003".to_string(),
                },
            ]),
            photos: None,
        })
        .await
        .expect("create property");

    let addresses = db
        .list_addresses(property.id)
        .await
        .expect("list addresses")
        .expect("property exists");
    let a = addresses
        .iter()
        .find(|addr| addr.street == "A Street")
        .expect("address A")
        .clone();
    let c = addresses
        .iter()
        .find(|addr| addr.street == "C Street")
        .expect("address C")
        .clone();
    assert!(a.is_primary);

    // Flip primary to C so the protocol has prior flag state to override
    db.update_address(
        c.id,
        &UpdateAddressRequest {
            is_primary: Some(true),
            ..UpdateAddressRequest::default()
        },
    )
    .await
    .expect("update address");

    // Submit [A (existing), B (new)]: A updated, B inserted, C deleted,
    // A primary again by position
    db.update_property(
        property.id,
        &UpdatePropertyRequest {
            addresses: Some(vec![
                AddressPayload {
                    id: Some(a.id),
                    street: "A Street Renamed".to_string(),
                    city: "Testville".to_string(),
                    state: "TS".to_string(),
                    postal_code: "00001".to_string(),
                },
                AddressPayload {
                    id: None,
                    street: "B Street".to_string(),
                    city: "Testville".to_string(),
                    state: "TS".to_string(),
                    postal_code: "00002".to_string(),
                },
            ]),
            ..UpdatePropertyRequest::default()
        },
    )
    .await
    .expect("composite update")
    .expect("property exists");

    let after = db
        .list_addresses(property.id)
        .await
        .expect("list addresses")
        .expect("property exists");

    assert_eq!(after.len(), 2);

    let a_after = after
        .iter()
        .find(|addr| addr.id == a.id)
        .expect("A survives with same id");
    assert_eq!(a_after.street, "A Street Renamed");
    assert!(a_after.is_primary, "first-in-list rule overrides prior flag");

    let b_after = after
        .iter()
        .find(|addr| addr.street == "B Street")
        .expect("B inserted");
    assert!(!b_after.is_primary);

    assert!(
        !after.iter().any(|addr| addr.id == c.id),
        "absent address C deleted"
    );
}

#[tokio::test]
async fn test_composite_delete_cascades_into_unit_subtree() {
    let db = create_test_database().await.expect("test database");
    let (property, address) = common::create_test_property(&db).await.expect("fixture");
    let unit = create_test_unit(&db, &address).await.expect("unit");
    let tenant = common::create_test_tenant(&db, &unit).await.expect("tenant");

    // Replace the address list with a brand-new address; the old one and
    // its subtree must go
    db.update_property(
        property.id,
        &UpdatePropertyRequest {
            addresses: Some(vec![AddressPayload {
                id: None,
                street: "New Only St".to_string(),
                city: "Testville".to_string(),
                state: "TS".to_string(),
                postal_code: "00009".to_string(),
            }]),
            ..UpdatePropertyRequest::default()
        },
    )
    .await
    .expect("composite update")
    .expect("property exists");

    assert!(db.get_address(address.id).await.expect("query").is_none());
    assert!(db.get_unit(unit.id).await.expect("query").is_none());
    assert!(db.get_tenant(tenant.id).await.expect("query").is_none());
}

#[tokio::test]
async fn test_omitted_children_keys_leave_children_untouched() {
    let db = create_test_database().await.expect("test database");
    let (property, address) = common::create_test_property(&db).await.expect("fixture");

    db.update_property(
        property.id,
        &UpdatePropertyRequest {
            name: Some("Renamed Only".to_string()),
            ..UpdatePropertyRequest::default()
        },
    )
    .await
    .expect("update")
    .expect("property exists");

    let addresses = db
        .list_addresses(property.id)
        .await
        .expect("list addresses")
        .expect("property exists");
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].id, address.id);
}

#[tokio::test]
async fn test_empty_child_list_deletes_all_children() {
    let db = create_test_database().await.expect("test database");
    let (property, _) = common::create_test_property(&db).await.expect("fixture");

    db.update_property(
        property.id,
        &UpdatePropertyRequest {
            addresses: Some(vec![]),
            ..UpdatePropertyRequest::default()
        },
    )
    .await
    .expect("update")
    .expect("property exists");

    let addresses = db
        .list_addresses(property.id)
        .await
        .expect("list addresses")
        .expect("property exists");
    assert!(addresses.is_empty());
}

#[tokio::test]
async fn test_photo_sync_follows_same_rules() {
    let db = create_test_database().await.expect("test database");

    let property = db
        .create_property(&CreatePropertyRequest {
            name: "Photo House".to_string(),
            property_type: "single_family".to_string(),
            status: "active".to_string(),
            value: 300_000.0,
            addresses: None,
            photos: Some(vec![PhotoPayload {
                id: None,
                url: "https://photos.example.com/one.jpg".to_string(),
                name: "One".to_string(),
            }]),
        })
        .await
        .expect("create property");

    let detail = db
        .get_property_detail(property.id)
        .await
        .expect("detail")
        .expect("property exists");
    let original = detail.photos[0].clone();

    db.update_property(
        property.id,
        &UpdatePropertyRequest {
            photos: Some(vec![
                PhotoPayload {
                    id: None,
                    url: "https://photos.example.com/two.jpg".to_string(),
                    name: "Two".to_string(),
                },
                PhotoPayload {
                    id: Some(original.id),
                    url: original.url.clone(),
                    name: "One Renamed".to_string(),
                },
            ]),
            ..UpdatePropertyRequest::default()
        },
    )
    .await
    .expect("update")
    .expect("property exists");

    let after = db
        .get_property_detail(property.id)
        .await
        .expect("detail")
        .expect("property exists");

    assert_eq!(after.photos.len(), 2);
    let primary = after.photos.iter().find(|photo| photo.is_primary).expect("primary");
    assert_eq!(primary.name, "Two", "first submitted photo is primary");
    let renamed = after
        .photos
        .iter()
        .find(|photo| photo.id == original.id)
        .expect("original survives");
    assert_eq!(renamed.name, "One Renamed");
}
