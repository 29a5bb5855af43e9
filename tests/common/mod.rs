pub mod mock_oracle;

use axum::Router;
use std::net::SocketAddr;

/// Serve `app` on an ephemeral local port, returning its address
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server died");
    });

    addr
}

pub const SAMPLE_ADDRESS1: &str = "456 Oak Avenue, Springfield, IL 62704";
pub const SAMPLE_ADDRESS2: &str = "456 Oak Ave, Springfield, Illinois 62704";
