// ABOUTME: Integration tests for idempotent boot seeding
// ABOUTME: Re-running the seed on a populated database must change nothing

mod common;

use common::create_test_database;

async fn table_counts(db: &quarters_server::database::Database) -> Vec<(&'static str, i64)> {
    let tables = [
        "properties",
        "property_addresses",
        "units",
        "tenants",
        "owners",
        "associations",
        "board_members",
        "account_types",
        "accounts",
        "transaction_types",
        "transactions",
        "payments",
        "photos",
        "maintenance_tickets",
        "subscription_plans",
        "subscriptions",
        "portfolios",
        "portfolio_properties",
    ];

    let mut counts = Vec::with_capacity(tables.len());
    for table in tables {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db.pool())
            .await
            .expect("count query");
        counts.push((table, count));
    }
    counts
}

#[tokio::test]
async fn test_seed_populates_empty_database() {
    let db = create_test_database().await.expect("test database");

    let seeded = db.seed_sample_data().await.expect("seed");
    assert!(seeded);

    for (table, count) in table_counts(&db).await {
        assert!(count > 0, "{table} should be seeded");
    }
}

#[tokio::test]
async fn test_seed_is_a_no_op_on_populated_database() {
    let db = create_test_database().await.expect("test database");

    assert!(db.seed_sample_data().await.expect("first seed"));
    let before = table_counts(&db).await;

    assert!(!db.seed_sample_data().await.expect("second seed"));
    let after = table_counts(&db).await;

    assert_eq!(before, after);
}

#[tokio::test]
async fn test_seed_skips_databases_with_existing_properties() {
    let db = create_test_database().await.expect("test database");
    common::create_test_property(&db).await.expect("fixture");

    assert!(!db.seed_sample_data().await.expect("seed"));

    let plans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscription_plans")
        .fetch_one(db.pool())
        .await
        .expect("count query");
    assert_eq!(plans, 0, "seed must not run partially");
}
