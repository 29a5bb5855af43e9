//! HTTP proxy server
//!
//! Wraps the direct oracle so the credential never leaves the server.

pub mod routes;

use crate::config::Config;
use crate::oracle::Oracle;
use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Debug, Clone, Default)]
pub struct ProxyState {
    /// `None` when the server has no credential; requests then get a 500.
    pub oracle: Option<Arc<dyn Oracle>>,
}

impl ProxyState {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self {
            oracle: Some(oracle),
        }
    }

    /// State for a server started without a credential
    pub fn unconfigured() -> Self {
        Self::default()
    }
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let origin = match allowed_origin {
        "*" => AllowOrigin::any(),
        other => match HeaderValue::from_str(other) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                warn!("⚠️ Invalid allowed origin {:?}, allowing any: {}", other, e);
                AllowOrigin::any()
            }
        },
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the proxy router
pub fn router(state: ProxyState, config: &Config) -> Router {
    Router::new()
        .merge(routes::verify_routes())
        .with_state(Arc::new(state))
        .layer(cors_layer(&config.allowed_origin))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl-C
pub async fn run(state: ProxyState, config: &Config) -> Result<()> {
    let app = router(state, config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("🔌 Proxy listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🔌 Proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
