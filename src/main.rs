//! radiomap - location-aware radio station directory
//!
//! Single HTTP service: map home page, free-text and viewport station
//! search, station listing, and per-user favourites behind a conventional
//! username/password login.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use radiomap::config::{self, Args};
use radiomap::{build_router, db, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting radiomap v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let data_folder = config::resolve_data_folder(args.data_folder.as_ref());
    let db_path = config::database_path(&data_folder);
    info!("Database path: {}", db_path.display());

    let pool = db::init_database(&db_path).await?;

    // Only the map page needs the provider key; the other routes keep working
    let map_api_key = std::env::var("MAP_API_KEY").ok().filter(|k| !k.is_empty());
    if map_api_key.is_none() {
        warn!("MAP_API_KEY not set; / will fail until it is provided");
    }

    let state = AppState::new(pool, map_api_key);
    let app = build_router(state);

    let addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("radiomap listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
