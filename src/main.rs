//! Menu Digital - order backend entry point
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────────┐    ┌──────────────┐
//! │  Config  │───▶│ Gateway  │───▶│ OrderService │───▶│  PostgreSQL  │
//! │  (YAML)  │    │  (axum)  │    │              │    │  or memory   │
//! └──────────┘    └──────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! Usage: `menu_digital [--env <name>] [--port <port>]`

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use menu_digital::config::AppConfig;
use menu_digital::db::Database;
use menu_digital::gateway;
use menu_digital::orders::{
    InMemoryOrderRepository, OrderRepository, OrderService, PgOrderRepository,
};
use menu_digital::AppState;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = menu_digital::logging::init_logging(&app_config);

    tracing::info!("Starting Menu Digital in {} mode", env);

    let (repo, pg_db) = match app_config.postgres_url.as_deref() {
        Some(url) => {
            let db = Database::connect(url, &app_config.database)
                .await
                .context("Failed to connect to PostgreSQL")?;
            db.init_schema()
                .await
                .context("Failed to initialize order schema")?;
            let db = Arc::new(db);
            let repo: Arc<dyn OrderRepository> =
                Arc::new(PgOrderRepository::new(db.pool().clone()));
            (repo, Some(db))
        }
        None => {
            tracing::warn!("No postgres_url configured, orders are kept in memory only");
            let repo: Arc<dyn OrderRepository> = Arc::new(InMemoryOrderRepository::new());
            (repo, None)
        }
    };

    let orders = Arc::new(OrderService::new(repo));
    tracing::info!("Order storage: {}", orders.backend());
    let state = Arc::new(AppState::new(orders, pg_db));

    let addr = app_config.bind_addr(get_port_override());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    gateway::run_server(listener, state)
        .await
        .context("Server error")?;
    Ok(())
}
