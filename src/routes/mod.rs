// HTTP routes: dashboard page, health, version

mod http;
mod page;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::log_repo::LogRepo;
use crate::models::StartTime;
use crate::process_repo::ProcessRepo;
use crate::sysinfo_repo::SysinfoRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) process_repo: Arc<ProcessRepo>,
    pub(crate) log_repo: Arc<LogRepo>,
    pub(crate) sysinfo_repo: Arc<SysinfoRepo>,
    pub(crate) started: StartTime,
    pub(crate) config: AppConfig,
}

pub fn app(
    process_repo: Arc<ProcessRepo>,
    log_repo: Arc<LogRepo>,
    sysinfo_repo: Arc<SysinfoRepo>,
    started: StartTime,
    config: AppConfig,
) -> Router {
    let state = AppState {
        process_repo,
        log_repo,
        sysinfo_repo,
        started,
        config,
    };
    Router::new()
        .route("/", get(http::index_handler)) // GET /
        .route("/health", get(http::health_handler)) // GET /health
        .route("/version", get(http::version_handler)) // GET /version
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
