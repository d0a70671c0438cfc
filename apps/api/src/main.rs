mod config;
mod errors;
mod lottery;
mod resume;
mod routes;
mod state;
mod unlock;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Kiosk API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Lottery quick pick: {} of 1..={} ({})",
        config.lottery.pick_count, config.lottery.max_number, config.lottery.draw_name
    );
    info!(
        "Unlock payee: {} ({} {:.2}), reference check is format-only",
        config.payee.address, config.payee.currency, config.payee.unlock_price
    );

    let state = AppState::new(config.clone());
    info!(
        "Idle page instances expire after {}s (swept every {}s)",
        config.sessions.idle_secs, config.sessions.sweep_secs
    );
    state
        .sessions
        .clone()
        .start_idle_sweep(config.sessions.idle(), config.sessions.sweep_every());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the pages are served from a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
