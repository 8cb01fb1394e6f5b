pub mod health;
pub mod metrics;
pub mod recipes;

use axum::response::Html;
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Build the full HTTP application. The `/metrics` route is only mounted when
/// a Prometheus handle is supplied.
pub fn app(state: AppState, prometheus: Option<Arc<PrometheusHandle>>) -> Router {
    let mut router = Router::new()
        // Static UI (embedded at compile time)
        .route("/", get(|| async { Html(include_str!("../../static/index.html")) }))
        .route("/health", get(health::health_check))
        .route("/recipes", get(recipes::list_recipes))
        .route("/recipe/{id}", get(recipes::get_recipe))
        .with_state(state);

    if let Some(handle) = prometheus {
        router = router.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(handle),
        );
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
