// GET handlers: dashboard, health, version

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};

use super::AppState;
use super::page::{PageData, render_page};
use crate::models::{HealthReport, SystemMetrics};
use crate::version::{NAME, VERSION};

/// GET / — recomputes everything on each request; always 200, failed reads show defaults.
pub(super) async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let gateway = state.process_repo.gateway_status().await;
    let feishu = state.log_repo.connection_status().await;
    let messages = state.log_repo.message_count().await;
    let metrics = match state.sysinfo_repo.system_metrics(&state.started).await {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(error = %e, "system metrics unavailable");
            SystemMetrics::unavailable(state.started.elapsed())
        }
    };
    // Only an unset (or non-UTF-8) variable falls back; an empty value is shown as-is.
    let model_name =
        std::env::var(&state.config.page.model_env).unwrap_or_else(|_| "N/A".into());

    let data = PageData {
        gateway,
        feishu,
        messages,
        metrics,
        model_name,
        started_at: state.started.started_at(),
        generated_at: chrono::Local::now(),
    };
    Html(render_page(&state.config.page, &data))
}

/// GET /health — 200 while the gateway runs, 503 otherwise.
pub(super) async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let gateway = state.process_repo.gateway_status().await;
    let feishu = state.log_repo.connection_status().await;
    let report = HealthReport::new(gateway, feishu, state.started.elapsed().as_secs_f64());
    let code = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, axum::Json(report))
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}
