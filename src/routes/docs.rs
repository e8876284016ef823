use crate::{routes::*, state::AppState};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use http::{
    header::{self, ACCEPT},
    HeaderMap,
};
use utoipa::OpenApi;

/// Documentation for the service. Can be converted into JSON or YAML.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::is_alive,
        health::status,
        health::build_info,
        waitlist::join_waitlist,
        crate::metrics::metrics_endpoint,
    ),
    components(schemas(
        health::Status,
        health::BuildInfo,
        waitlist::JoinRequest,
        waitlist::JoinResponse,
        waitlist::ErrorResponse,
    ))
)]
struct ApiDoc;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/docs/openapi", get(serve_openapi_docs))
        .route("/docs/openapi.json", get(serve_openapi_docs_as_json))
        .route("/docs/openapi.yaml", get(serve_openapi_docs_as_yaml))
}

/// Serve OpenApi docs based on the `Accept` header.
#[tracing::instrument(skip(headers))]
pub async fn serve_openapi_docs(headers: HeaderMap) -> Response {
    match headers.get(ACCEPT).and_then(|x| x.to_str().ok()) {
        Some("application/yaml") => serve_openapi_docs_as_yaml().await,
        _ => serve_openapi_docs_as_json().await,
    }
}

/// Endpoint to serve OpenApi docs as JSON.
#[tracing::instrument]
pub async fn serve_openapi_docs_as_json() -> Response {
    match ApiDoc::openapi().to_json() {
        Ok(docs) => ([(header::CONTENT_TYPE, "application/json")], docs).into_response(),
        Err(e) => docs_error(e),
    }
}

/// Endpoint to serve OpenApi docs as YAML.
#[tracing::instrument]
pub async fn serve_openapi_docs_as_yaml() -> Response {
    match ApiDoc::openapi().to_yaml() {
        Ok(docs) => ([(header::CONTENT_TYPE, "application/yaml")], docs).into_response(),
        Err(e) => docs_error(e),
    }
}

fn docs_error(e: impl std::fmt::Display) -> Response {
    tracing::error!("Failed to serialize OpenApi docs: {e}");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
