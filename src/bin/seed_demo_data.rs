// ABOUTME: Demo data seeder generating a randomized property graph for manual testing
// ABOUTME: Reproducible via a fixed RNG seed; --reset clears existing rows first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

//! Demo data seeder for the Quarters server.
//!
//! Populates the database with a randomized but reproducible set of
//! properties, addresses, units, tenants, and payments for manual testing
//! of the REST surface.
//!
//! Usage:
//! ```bash
//! # Seed five properties into the configured database
//! cargo run --bin seed-demo-data
//!
//! # Seed a specific database with more properties
//! cargo run --bin seed-demo-data -- --database-url sqlite:./demo.db --properties 20
//!
//! # Clear existing data first
//! cargo run --bin seed-demo-data -- --reset
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use quarters_server::config::environment::ServerConfig;
use quarters_server::database::Database;
use quarters_server::models::{
    AddressPayload, CreatePaymentRequest, CreatePropertyRequest, CreateTenantRequest,
    CreateUnitRequest,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Fixed RNG seed so repeated runs produce the same graph
const RNG_SEED: u64 = 42;

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Quarters demo data seeder",
    long_about = "Populate the database with randomized demo data for manual testing"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Number of properties to generate
    #[arg(long, default_value = "5")]
    properties: u32,

    /// Delete existing rows before seeding
    #[arg(long)]
    reset: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

const STREETS: &[&str] = &[
    "Maple Ave",
    "Oak St",
    "Cedar Ln",
    "Birch Rd",
    "Willow Way",
    "Elm St",
    "Juniper Ct",
];

const CITIES: &[(&str, &str, &str)] = &[
    ("Springfield", "IL", "62704"),
    ("Riverton", "WY", "82501"),
    ("Franklin", "TN", "37064"),
    ("Ashland", "OR", "97520"),
];

const FIRST_NAMES: &[&str] = &[
    "Dana", "Ellis", "Priya", "Marcus", "Ingrid", "Tomas", "Aiko", "Rosa",
];

const LAST_NAMES: &[&str] = &[
    "Whitfield", "Navarro", "Raman", "Okafor", "Lindqvist", "Baptiste", "Sato", "Delgado",
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .init();

    let database_url = match &args.database_url {
        Some(url) => url.clone(),
        None => ServerConfig::from_env()?
            .database
            .url
            .to_connection_string(),
    };

    info!("Seeding demo data into {database_url}");

    let database = Database::new(&database_url).await?;

    if args.reset {
        reset_database(&database).await?;
        info!("Existing data cleared");
    }

    let mut rng = StdRng::seed_from_u64(RNG_SEED);
    let mut unit_total = 0u32;
    let mut tenant_total = 0u32;

    for index in 0..args.properties {
        let (city, state, postal_code) = CITIES[rng.gen_range(0..CITIES.len())];
        let street_name = STREETS[rng.gen_range(0..STREETS.len())];
        let street = format!("{} {street_name}", rng.gen_range(100..999));

        let property = database
            .create_property(&CreatePropertyRequest {
                name: format!("Demo Property {}", index + 1),
                property_type: if rng.gen_bool(0.6) {
                    "multi_family".to_string()
                } else {
                    "single_family".to_string()
                },
                status: "active".to_string(),
                value: f64::from(rng.gen_range(180..2_400)) * 1_000.0,
                addresses: Some(vec![AddressPayload {
                    id: None,
                    street,
                    city: city.to_string(),
                    state: state.to_string(),
                    postal_code: postal_code.to_string(),
                }]),
                photos: None,
            })
            .await?;

        let address = database
            .list_addresses(property.id)
            .await?
            .and_then(|addresses| addresses.into_iter().next())
            .ok_or_else(|| anyhow::anyhow!("demo property has no address"))?;

        let unit_count = rng.gen_range(1..=4);
        for unit_index in 0..unit_count {
            let rent = f64::from(rng.gen_range(900..2_600));
            let occupied = rng.gen_bool(0.7);

            let unit = database
                .create_unit(&CreateUnitRequest {
                    address_id: address.id,
                    unit_number: format!("{}{}", unit_index + 1, ['A', 'B', 'C', 'D'][unit_index]),
                    rent,
                    status: if occupied { "occupied" } else { "vacant" }.to_string(),
                })
                .await?;
            unit_total += 1;

            if !occupied {
                continue;
            }

            let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
            let tenant = database
                .create_tenant(&CreateTenantRequest {
                    unit_id: unit.id,
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: format!(
                        "{}.{}@example.com",
                        first.to_lowercase(),
                        last.to_lowercase()
                    ),
                    phone: None,
                    lease_start: NaiveDate::from_ymd_opt(2025, 1 + rng.gen_range(0..6), 1),
                    lease_end: None,
                    rent,
                })
                .await?;
            tenant_total += 1;

            for month in 5..=7 {
                if let Some(payment_date) = NaiveDate::from_ymd_opt(2025, month, 1) {
                    database
                        .create_payment(&CreatePaymentRequest {
                            tenant_id: tenant.id,
                            amount: rent,
                            payment_date,
                            status: "settled".to_string(),
                        })
                        .await?;
                }
            }
        }
    }

    info!(
        properties = args.properties,
        units = unit_total,
        tenants = tenant_total,
        "Demo data seeded"
    );

    Ok(())
}

/// Delete all rows, children before parents
async fn reset_database(database: &Database) -> Result<()> {
    let tables = [
        "payments",
        "maintenance_tickets",
        "photos",
        "tenants",
        "units",
        "portfolio_properties",
        "portfolios",
        "subscriptions",
        "subscription_plans",
        "transactions",
        "accounts",
        "account_types",
        "transaction_types",
        "board_members",
        "associations",
        "owners",
        "property_addresses",
        "properties",
    ];

    for table in tables {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(database.pool())
            .await?;
    }

    Ok(())
}
