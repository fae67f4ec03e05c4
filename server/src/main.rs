//! crudstore HTTP server
//!
//! Serves the in-memory resource store over HTTP:
//!   crudstore-server --port 8080 --allowed-origin https://example.com
//!
//! State lives only in memory and is gone when the process exits.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crudstore_server::config::Args;
use crudstore_server::{build_router, AppState};
use crudstore_storage::ResourceStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .compact()
        .init();

    info!("crudstore server starting...");

    let store = match args.load_schema().context("failed to load schema")? {
        Some(schema) => {
            info!(schema = %schema.name, rules = schema.fields.len(), "validating writes against schema");
            ResourceStore::with_validator(Arc::new(schema))
        }
        None => ResourceStore::new(),
    };

    let origins = args.origins().context("invalid CORS configuration")?;
    if origins.is_empty() {
        info!("CORS disabled");
    } else {
        info!(origins = ?args.allowed_origins, "CORS enabled");
    }

    let state = AppState::new(Arc::new(store), args.request_timeout());
    let app = build_router(state, origins);

    let addr = args.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        %addr,
        request_timeout_ms = args.request_timeout_ms,
        "HTTP API listening"
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            joined.context("server task panicked")?.context("HTTP server failed")?;
            return Ok(());
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for shutdown signal")?;
        }
    }

    info!("Shutting down, draining in-flight requests...");
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(args.shutdown_timeout(), server).await {
        Ok(joined) => {
            joined.context("server task panicked")?.context("HTTP server failed")?;
            info!("Server shutdown gracefully");
        }
        Err(_) => warn!(
            timeout_secs = args.shutdown_timeout_secs,
            "graceful shutdown timed out, dropping remaining connections"
        ),
    }

    Ok(())
}
