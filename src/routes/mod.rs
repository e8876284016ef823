use crate::state::AppState;
use axum::Router;

pub mod docs;
pub mod health;
pub mod home;
pub mod waitlist;

pub fn build_router(app_state: &AppState) -> Router {
    Router::new()
        .merge(home::create_router())
        .merge(health::create_router())
        .merge(waitlist::create_router())
        .merge(crate::metrics::create_router())
        .merge(docs::create_router())
        .with_state(app_state.clone())
}
