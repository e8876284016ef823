use crate::state::AppState;
use askama::Template;
use axum::{response::IntoResponse, routing::get, Router};

pub fn create_router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

/// Render the landing page with the waitlist form.
#[tracing::instrument]
pub async fn home() -> impl IntoResponse {
    HomeTemplate::default().into_response()
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    title: &'static str,
    description: &'static str,
    waitlist_endpoint: &'static str,
}

impl Default for HomeTemplate {
    fn default() -> Self {
        Self {
            title: "Dream DAO - Empowering Women in STEM",
            description: "Join Dream DAO, a community-driven initiative empowering women in STEM \
                through decentralized governance and education.",
            waitlist_endpoint: "/api/waitlist",
        }
    }
}
