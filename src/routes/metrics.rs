use axum::extract::State;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Prometheus metrics scrape endpoint.
/// Returns metrics in Prometheus text exposition format.
pub async fn prometheus_metrics(State(handle): State<Arc<PrometheusHandle>>) -> impl IntoResponse {
    handle.render()
}

/// Register descriptions for the metrics recorded around upstream calls.
pub fn describe_metrics() {
    metrics::describe_counter!(
        "upstream_requests_total",
        "Outbound recipe API calls, by operation and outcome"
    );
    metrics::describe_histogram!(
        "upstream_request_seconds",
        "Latency of outbound recipe API calls"
    );
}
