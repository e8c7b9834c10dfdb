// ABOUTME: Route-level integration tests driving the axum router end to end
// ABOUTME: Covers POST-then-GET equality, canonical status codes, and JSON error bodies

mod common;

use common::{body_json, build_test_app, empty_request, json_request};
use http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_post_then_get_round_trips_submitted_fields() {
    let (app, _db) = build_test_app().await.expect("test app");

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/properties",
            json!({
                "name": "Harborview",
                "property_type": "commercial",
                "status": "active",
                "value": 2000000.0,
                "addresses": [
                    {"street": "9 Pier Rd", "city": "Harbor", "state": "ME", "postal_code": "04101"}
                ]
            }),
        ))
        .await
        .expect("request");

    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await.expect("json body");
    let id = created["id"].as_str().expect("id present");

    let fetched = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/properties/{id}")))
        .await
        .expect("request");

    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched = body_json(fetched).await.expect("json body");

    assert_eq!(fetched["name"], "Harborview");
    assert_eq!(fetched["property_type"], "commercial");
    assert_eq!(fetched["status"], "active");
    assert_eq!(fetched["value"], 2000000.0);
    assert_eq!(fetched["addresses"][0]["street"], "9 Pier Rd");
    assert_eq!(fetched["addresses"][0]["is_primary"], true);
}

#[tokio::test]
async fn test_get_missing_id_returns_404_json_error() {
    let (app, _db) = build_test_app().await.expect("test app");

    for uri in [
        format!("/api/properties/{}", uuid::Uuid::new_v4()),
        format!("/api/units/{}", uuid::Uuid::new_v4()),
        format!("/api/tenants/{}", uuid::Uuid::new_v4()),
        format!("/api/subscriptions/{}", uuid::Uuid::new_v4()),
    ] {
        let response = app
            .clone()
            .oneshot(empty_request("GET", &uri))
            .await
            .expect("request");

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let body = body_json(response).await.expect("json body");
        assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND", "{uri}");
        assert!(body["error"]["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_delete_returns_204_and_put_missing_returns_404() {
    let (app, db) = build_test_app().await.expect("test app");
    let (property, _) = common::create_test_property(&db).await.expect("fixture");

    let deleted = app
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/properties/{}", property.id),
        ))
        .await
        .expect("request");
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let updated = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/properties/{}", property.id),
            json!({"name": "Ghost"}),
        ))
        .await
        .expect("request");
    assert_eq!(updated.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_foreign_key_returns_400() {
    let (app, _db) = build_test_app().await.expect("test app");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/units",
            json!({
                "address_id": uuid::Uuid::new_v4(),
                "unit_number": "9Z",
                "rent": 1000.0,
                "status": "vacant"
            }),
        ))
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await.expect("json body");
    assert_eq!(body["error"]["code"], "INVALID_REFERENCE");
}

#[tokio::test]
async fn test_empty_required_field_returns_400() {
    let (app, _db) = build_test_app().await.expect("test app");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/properties",
            json!({
                "name": "  ",
                "property_type": "commercial",
                "status": "active",
                "value": 1.0
            }),
        ))
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await.expect("json body");
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_duplicate_portfolio_attach_returns_409() {
    let (app, db) = build_test_app().await.expect("test app");
    let (property, _) = common::create_test_property(&db).await.expect("fixture");

    let portfolio = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/portfolios",
            json!({"name": "Holdings"}),
        ))
        .await
        .expect("request");
    assert_eq!(portfolio.status(), StatusCode::CREATED);
    let portfolio = body_json(portfolio).await.expect("json body");
    let portfolio_id = portfolio["id"].as_str().expect("id present");

    let attach = || {
        json_request(
            "POST",
            &format!("/api/portfolios/{portfolio_id}/properties"),
            json!({"property_id": property.id}),
        )
    };

    let first = app.clone().oneshot(attach()).await.expect("request");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.clone().oneshot(attach()).await.expect("request");
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await.expect("json body");
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    // Detach then re-attach succeeds
    let detach = app
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/portfolios/{portfolio_id}/properties/{}", property.id),
        ))
        .await
        .expect("request");
    assert_eq!(detach.status(), StatusCode::NO_CONTENT);

    let third = app.clone().oneshot(attach()).await.expect("request");
    assert_eq!(third.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_subscription_cancel_transition() {
    let (app, _db) = build_test_app().await.expect("test app");

    let plan = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/subscription/plans",
            json!({"name": "Starter", "price": 19.0, "billing_interval": "monthly"}),
        ))
        .await
        .expect("request");
    assert_eq!(plan.status(), StatusCode::CREATED);
    let plan = body_json(plan).await.expect("json body");

    let subscription = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/subscriptions",
            json!({"plan_id": plan["id"], "customer_email": "sub@example.com"}),
        ))
        .await
        .expect("request");
    assert_eq!(subscription.status(), StatusCode::CREATED);
    let subscription = body_json(subscription).await.expect("json body");
    assert_eq!(subscription["status"], "active");
    assert!(subscription["cancelled_at"].is_null());
    let subscription_id = subscription["id"].as_str().expect("id present");

    let cancelled = app
        .clone()
        .oneshot(empty_request(
            "POST",
            &format!("/api/subscriptions/{subscription_id}/cancel"),
        ))
        .await
        .expect("request");
    assert_eq!(cancelled.status(), StatusCode::OK);
    let cancelled = body_json(cancelled).await.expect("json body");
    assert_eq!(cancelled["status"], "cancelled");
    assert!(cancelled["cancelled_at"].is_string());

    // Cancel is idempotent and keeps the original timestamp
    let again = app
        .clone()
        .oneshot(empty_request(
            "POST",
            &format!("/api/subscriptions/{subscription_id}/cancel"),
        ))
        .await
        .expect("request");
    assert_eq!(again.status(), StatusCode::OK);
    let again = body_json(again).await.expect("json body");
    assert_eq!(again["cancelled_at"], cancelled["cancelled_at"]);
}

#[tokio::test]
async fn test_photo_requires_exactly_one_parent() {
    let (app, db) = build_test_app().await.expect("test app");
    let (property, _) = common::create_test_property(&db).await.expect("fixture");

    let neither = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/photos",
            json!({"url": "https://photos.example.com/x.jpg", "name": "X"}),
        ))
        .await
        .expect("request");
    assert_eq!(neither.status(), StatusCode::BAD_REQUEST);

    let ok = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/photos",
            json!({
                "property_id": property.id,
                "url": "https://photos.example.com/x.jpg",
                "name": "X"
            }),
        ))
        .await
        .expect("request");
    assert_eq!(ok.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _db) = build_test_app().await.expect("test app");

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/health"))
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await.expect("json body");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_nested_address_sub_resource_routes() {
    let (app, db) = build_test_app().await.expect("test app");
    let (property, address) = common::create_test_property(&db).await.expect("fixture");

    let listed = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/api/properties/{}/addresses", property.id),
        ))
        .await
        .expect("request");
    assert_eq!(listed.status(), StatusCode::OK);
    let listed = body_json(listed).await.expect("json body");
    assert_eq!(listed.as_array().expect("array").len(), 1);

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/properties/{}/addresses", property.id),
            json!({
                "street": "2 Annex Rd",
                "city": "Testville",
                "state": "TS",
                "postal_code": "00002",
                "is_primary": true
            }),
        ))
        .await
        .expect("request");
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await.expect("json body");
    assert_eq!(created["is_primary"], true);

    // The explicit primary demoted the original
    let original = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/api/properties/addresses/{}", address.id),
        ))
        .await
        .expect("request");
    assert_eq!(original.status(), StatusCode::OK);
    let original = body_json(original).await.expect("json body");
    assert_eq!(original["is_primary"], false);
}
