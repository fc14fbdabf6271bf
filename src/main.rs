//! pulse-gateway publisher entry point.
//!
//! Binds the fixed port and serves the `/events` push channel until the
//! process exits; exit terminates all subscriptions immediately.

use tracing_subscriber::EnvFilter;

use pulse_gateway::app_state::AppState;
use pulse_gateway::config::PulseConfig;
use pulse_gateway::publisher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PulseConfig::fixed();
    let state = AppState::new(config);
    let app = publisher::router(state.clone());

    let listener = tokio::net::TcpListener::bind(state.config.listen_addr).await?;
    tracing::info!(addr = %state.config.listen_addr, "SSE publisher listening");

    axum::serve(listener, app).await?;

    Ok(())
}
