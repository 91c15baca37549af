//! Report Engine HTTP server.
//!
//! Loads a school dataset, seeds the in-memory store and serves the report
//! endpoints. Configured through `REPORT_ENGINE_DATA_DIR` and
//! `REPORT_ENGINE_ADDR`; log levels through `RUST_LOG`.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use report_engine::api::{create_router, AppState};
use report_engine::config::DataLoader;
use report_engine::store::InMemoryStore;

const DEFAULT_DATA_DIR: &str = "./data/sample";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir =
        std::env::var("REPORT_ENGINE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let addr = std::env::var("REPORT_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let loader = DataLoader::load(&data_dir)?;
    let school = loader.school().clone();
    info!(
        path = %data_dir,
        school = %school.name,
        academic_year = %school.academic_year,
        term = %school.term,
        "Loaded school dataset"
    );

    let store = Arc::new(InMemoryStore::new(loader.into_data()));
    let router = create_router(AppState::new(store, school));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "Report engine listening");
    axum::serve(listener, router).await?;

    Ok(())
}
