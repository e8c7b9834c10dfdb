// ABOUTME: Main server binary: config load, logging init, database boot, seed, serve
// ABOUTME: Startup failures (unreachable database, bad config) terminate the process
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Quarters Server Binary
//!
//! Starts the property management REST API: loads environment
//! configuration, initializes logging and the database, seeds sample data
//! when the database is empty, and serves HTTP.

use anyhow::Result;
use clap::Parser;
use quarters_server::{
    config::environment::ServerConfig,
    database::Database,
    logging,
    server::{HttpServer, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "quarters-server")]
#[command(about = "Quarters - Property management REST API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Skip sample data seeding
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle container environments where clap may not work properly
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using default configuration");
            Args {
                http_port: None,
                database_url: None,
                no_seed: false,
            }
        }
    };

    let mut config = ServerConfig::from_env()?;

    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = &args.database_url {
        config.database.url =
            quarters_server::config::environment::DatabaseUrl::parse_url(database_url)?;
    }
    if args.no_seed {
        config.seed_on_boot = false;
    }

    logging::init_from_env()?;

    info!("Starting Quarters property management API");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized: {}", config.database.url);

    if config.seed_on_boot {
        let seeded = database.seed_sample_data().await?;
        if seeded {
            info!("Sample data seeded");
        }
    }

    let resources = Arc::new(ServerResources::new(database, Arc::new(config.clone())));

    if resources.payments.is_some() {
        info!("Payments provider client configured");
    }

    display_available_endpoints(&config);

    let server = HttpServer::new(resources);
    if let Err(e) = server.run().await {
        error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.host;
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("Health:");
    info!("   Health Check:      GET  http://{host}:{port}/health");
    info!("Properties:");
    info!("   List/Create:       GET/POST http://{host}:{port}/api/properties");
    info!("   Get/Update/Delete: GET/PUT/DELETE http://{host}:{port}/api/properties/{{id}}");
    info!("   Addresses:         GET/POST http://{host}:{port}/api/properties/{{id}}/addresses");
    info!("   Address by id:     GET/PUT/DELETE http://{host}:{port}/api/properties/addresses/{{id}}");
    info!("Occupancy:");
    info!("   Units:             http://{host}:{port}/api/units");
    info!("   Tenants:           http://{host}:{port}/api/tenants");
    info!("   Maintenance:       http://{host}:{port}/api/maintenance");
    info!("Community:");
    info!("   Owners:            http://{host}:{port}/api/owners");
    info!("   Associations:      http://{host}:{port}/api/associations");
    info!("   Board Members:     http://{host}:{port}/api/board-members");
    info!("Ledger:");
    info!("   Account Types:     http://{host}:{port}/api/account-types");
    info!("   Accounts:          http://{host}:{port}/api/accounts");
    info!("   Transaction Types: http://{host}:{port}/api/transaction-types");
    info!("   Transactions:      http://{host}:{port}/api/transactions");
    info!("   Payments:          http://{host}:{port}/api/payments");
    info!("Media:");
    info!("   Photos:            http://{host}:{port}/api/photos");
    info!("Billing:");
    info!("   Plans:             http://{host}:{port}/api/subscription/plans");
    info!("   Subscriptions:     http://{host}:{port}/api/subscriptions");
    info!("Grouping:");
    info!("   Portfolios:        http://{host}:{port}/api/portfolios");
    info!("=== End of Endpoint List ===");
}
