use std::sync::Arc;

use careerhq_api::agents::AgentStore;
use careerhq_api::api::{router, AppState};
use careerhq_api::config::Config;
use careerhq_api::infrastructure::channels::backend_connection;
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    // Client-side mirror of the backend, kept apart from the store we serve
    let mirror = Arc::new(AgentStore::new());
    let connection = backend_connection(&config, mirror.clone());
    let mut changes = mirror.subscribe();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) => tracing::debug!(?change, "Backend state changed"),
                Err(RecvError::Lagged(skipped)) => tracing::debug!(skipped, "Backend change log lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let addr = config.bind_address();
    let app = router(AppState::new(config));

    // Start server
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    // The default backend URL is this server, so only connect once it can accept
    connection.connect();

    axum::serve(listener, app)
        .await
        .expect("Server failed");

    connection.close();
}
