use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use recipe_proxy::config::AppConfig;
use recipe_proxy::routes;
use recipe_proxy::services::catalog::SpoonacularClient;
use recipe_proxy::AppState;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment; API_KEY is mandatory
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!(config = ?config, "Initializing recipe-proxy server");

    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    routes::metrics::describe_metrics();

    tracing::info!(base_url = %config.api_base_url, "Initializing recipe catalog client");
    let catalog =
        SpoonacularClient::from_config(&config).expect("Failed to initialize recipe catalog client");

    let state = AppState::new(catalog);
    let app = routes::app(state, Some(Arc::new(prometheus_handle)));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
