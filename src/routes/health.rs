use crate::{state::AppState, waitlist::Waitlist};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;
use utoipa::ToSchema;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create a router to serve health checks.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(is_alive))
        .route("/health/info", get(build_info))
        .route("/health/status", get(status))
}

/// Simple `is_alive` endpoint that will always return a 200 OK.
/// Used to indicate when the webserver is up and running.
#[tracing::instrument]
#[utoipa::path(
    get,
    path = "/health",
    responses((status = OK, description = "Check if service is alive"))
)]
pub async fn is_alive() -> StatusCode {
    tracing::debug!("Service is alive");
    StatusCode::OK
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct Status {
    waitlist_readable: bool,
}

/// Status endpoint to report whether the waitlist storage can be read.
#[tracing::instrument(skip(waitlist))]
#[utoipa::path(
    get,
    path = "/health/status",
    responses(
        (status = OK, description = "Current status of the waitlist storage", body = Status)
    )
)]
pub async fn status(State(waitlist): State<Arc<Waitlist>>) -> Json<Status> {
    let waitlist_readable = waitlist
        .entries()
        .await
        .map_err(|e| {
            tracing::error!("{:?}", e);
            e
        })
        .is_ok();

    let status = Status { waitlist_readable };
    tracing::info!("Status: {:?}", status);
    Json(status)
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct BuildInfo {
    version: String,
}

/// Endpoint to get current information about the server's version.
#[tracing::instrument]
#[utoipa::path(
    get,
    path = "/health/info",
    responses(
        (status = OK, description = "Build info for this service", body = BuildInfo)
    )
)]
pub async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        version: VERSION.to_string(),
    })
}
