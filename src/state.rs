use crate::{metrics::AppMetrics, waitlist::Waitlist};
use axum::extract::FromRef;
use derive_getters::Getters;
use duplicate::duplicate_item;
use std::sync::Arc;

#[derive(Debug, Clone, Getters)]
pub struct AppState {
    waitlist: Arc<Waitlist>,
    metrics: Arc<AppMetrics>,
}

impl AppState {
    pub fn create(waitlist: Waitlist, metrics: AppMetrics) -> Self {
        Self {
            waitlist: Arc::new(waitlist),
            metrics: Arc::new(metrics),
        }
    }
}

#[duplicate_item(
    service_type    field;
    [ Waitlist ]    [ waitlist ];
    [ AppMetrics ]  [ metrics ];
)]
impl FromRef<AppState> for Arc<service_type> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.field.clone()
    }
}
