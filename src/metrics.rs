use crate::state::AppState;
use anyhow::Context;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use http::StatusCode;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Outcome label of a waitlist submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Added,
    MissingEmail,
    Duplicate,
    Error,
}

impl SubmissionOutcome {
    fn label(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::MissingEmail => "missing_email",
            Self::Duplicate => "duplicate",
            Self::Error => "error",
        }
    }
}

/// Prometheus registry with the metrics reported by the application.
#[derive(Debug)]
pub struct AppMetrics {
    registry: Registry,
    waitlist_submissions: IntCounterVec,
}

impl AppMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let waitlist_submissions = IntCounterVec::new(
            Opts::new(
                "waitlist_submissions_total",
                "Number of waitlist submissions by outcome",
            ),
            &["outcome"],
        )
        .context("Failed to create `waitlist_submissions_total` counter")?;
        registry
            .register(Box::new(waitlist_submissions.clone()))
            .context("Failed to register `waitlist_submissions_total` metric")?;

        Ok(Self {
            registry,
            waitlist_submissions,
        })
    }

    pub fn record_submission(&self, outcome: SubmissionOutcome) {
        self.waitlist_submissions
            .with_label_values(&[outcome.label()])
            .inc();
    }

    fn encode(&self) -> Result<String, MetricsError> {
        let mut buffer = vec![];
        let encoder = TextEncoder::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")
            .map_err(MetricsError::UnexpectedError)?;

        String::from_utf8(buffer)
            .context("Failed to convert metrics to a valid string")
            .map_err(MetricsError::UnexpectedError)
    }
}

pub fn create_router() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_endpoint))
}

/// Expose all metrics in the Prometheus text format.
#[tracing::instrument(skip(metrics))]
#[utoipa::path(
    get,
    path = "/metrics",
    responses((status = OK, description = "Prometheus metrics", body = String))
)]
pub async fn metrics_endpoint(
    State(metrics): State<Arc<AppMetrics>>,
) -> Result<String, MetricsError> {
    metrics.encode()
}

#[derive(thiserror::Error)]
pub enum MetricsError {
    #[error("Unexpected error when generating metrics")]
    UnexpectedError(#[source] anyhow::Error),
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> Response {
        tracing::error!(error.cause_chain = ?self, "Failed to serve metrics");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
