//! Liveness endpoint for external uptime monitors.
//!
//! Shares no state with the chat flow.

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

/// Body returned on `GET /`
pub const ALIVE_PAYLOAD: &str = "I am alive!";

async fn alive() -> &'static str {
    ALIVE_PAYLOAD
}

pub fn create_router() -> Router {
    Router::new().route("/", get(alive))
}

/// Bind the liveness port on all interfaces
pub async fn bind(port: u16) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port = port, "Liveness endpoint listening");
    Ok(listener)
}

/// Serve the liveness endpoint until the listener fails
pub async fn serve(listener: TcpListener) -> std::io::Result<()> {
    axum::serve(listener, create_router()).await
}
