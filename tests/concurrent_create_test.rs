// ABOUTME: Integration test for concurrent creates through the shared pool
// ABOUTME: N concurrent POSTs must yield N distinct rows with unique ids

mod common;

use common::{body_json, build_test_app, empty_request, json_request};
use http::StatusCode;
use serde_json::json;
use std::collections::HashSet;
use tokio::task::JoinSet;
use tower::ServiceExt;

const CONCURRENT_CREATES: usize = 10;

#[tokio::test]
async fn test_concurrent_posts_create_distinct_rows() {
    let (app, _db) = build_test_app().await.expect("test app");

    let mut tasks = JoinSet::new();
    for index in 0..CONCURRENT_CREATES {
        let app = app.clone();
        tasks.spawn(async move {
            let response = app
                .oneshot(json_request(
                    "POST",
                    "/api/properties",
                    json!({
                        "name": format!("Concurrent {index}"),
                        "property_type": "single_family",
                        "status": "active",
                        "value": 100000.0
                    }),
                ))
                .await
                .expect("request");

            assert_eq!(response.status(), StatusCode::CREATED);
            let body = body_json(response).await.expect("json body");
            body["id"].as_str().expect("id present").to_owned()
        });
    }

    let mut ids = HashSet::new();
    while let Some(result) = tasks.join_next().await {
        ids.insert(result.expect("task completed"));
    }

    assert_eq!(ids.len(), CONCURRENT_CREATES, "every create got its own id");

    let listed = app
        .clone()
        .oneshot(empty_request("GET", "/api/properties"))
        .await
        .expect("request");
    assert_eq!(listed.status(), StatusCode::OK);
    let listed = body_json(listed).await.expect("json body");
    assert_eq!(
        listed.as_array().expect("array").len(),
        CONCURRENT_CREATES,
        "all rows visible after the burst"
    );
}
