use crate::{
    domain::WaitlistEmail,
    metrics::{AppMetrics, SubmissionOutcome},
    state::AppState,
    waitlist::{JoinError, Waitlist},
};
use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, serde::Deserialize, ToSchema)]
pub struct JoinRequest {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct JoinResponse {
    message: String,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    error: String,
}

/// Create a router to serve the waitlist API.
pub fn create_router() -> Router<AppState> {
    Router::new().route("/api/waitlist", post(join_waitlist))
}

/// Add an email to the waitlist.
#[tracing::instrument(
    name = "Waitlist submission",
    skip(waitlist, metrics, body),
    fields(email = tracing::field::Empty)
)]
#[utoipa::path(
    post,
    path = "/api/waitlist",
    request_body = JoinRequest,
    responses(
        (status = OK, description = "Email was added to the waitlist", body = JoinResponse),
        (status = BAD_REQUEST, description = "Email is missing or already on the waitlist", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Request body is not valid JSON or waitlist storage failed", body = ErrorResponse),
    )
)]
pub async fn join_waitlist(
    State(waitlist): State<Arc<Waitlist>>,
    State(metrics): State<Arc<AppMetrics>>,
    body: Bytes,
) -> Result<Json<JoinResponse>, WaitlistError> {
    let result = add_to_waitlist(&waitlist, &body).await;
    metrics.record_submission(match &result {
        Ok(_) => SubmissionOutcome::Added,
        Err(WaitlistError::MissingEmail) => SubmissionOutcome::MissingEmail,
        Err(WaitlistError::DuplicateEmail) => SubmissionOutcome::Duplicate,
        Err(WaitlistError::UnexpectedError(_)) => SubmissionOutcome::Error,
    });

    result
}

/// The body is parsed as JSON whatever its `Content-Type`.
async fn add_to_waitlist(
    waitlist: &Waitlist,
    body: &[u8],
) -> Result<Json<JoinResponse>, WaitlistError> {
    let request: JoinRequest = serde_json::from_slice(body)
        .context("Failed to parse waitlist request body")
        .map_err(WaitlistError::UnexpectedError)?;
    let email = WaitlistEmail::parse(request.email.unwrap_or_default())
        .map_err(|_| WaitlistError::MissingEmail)?;
    tracing::Span::current().record("email", &tracing::field::display(&email));

    waitlist.join(email).await.map_err(|e| match e {
        JoinError::Duplicate(_) => WaitlistError::DuplicateEmail,
        JoinError::Store(_) => WaitlistError::UnexpectedError(e.into()),
    })?;

    Ok(Json(JoinResponse {
        message: "Successfully added to waitlist".to_string(),
    }))
}

/// Represent the different ways a waitlist submission can fail.
#[derive(thiserror::Error)]
pub enum WaitlistError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Email already exists in waitlist")]
    DuplicateEmail,
    #[error("Internal server error")]
    UnexpectedError(#[source] anyhow::Error),
}

impl IntoResponse for WaitlistError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingEmail | Self::DuplicateEmail => StatusCode::BAD_REQUEST,
            Self::UnexpectedError(_) => {
                tracing::error!(
                    error.cause_chain = ?self,
                    "Error processing waitlist submission"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
