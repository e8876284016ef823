pub mod configuration;
pub mod domain;
mod error;
mod metrics;
mod routes;
mod state;
pub mod telemetry;
pub mod waitlist;

use anyhow::Context;
use axum::{routing::IntoMakeService, Router, Server};
use configuration::Settings;
use hyper::server::conn::AddrIncoming;
use metrics::AppMetrics;
use state::AppState;
use std::net::TcpListener;
use waitlist::{FileWaitlistStore, Waitlist};

/// The waitlist server, bound to a port but not yet running.
pub struct App {
    port: u16,
    server: Server<AddrIncoming, IntoMakeService<Router>>,
}

impl App {
    /// Bind the listener and wire the waitlist to its file storage.
    pub fn build(configuration: Settings) -> anyhow::Result<Self> {
        let address = configuration.application.address();
        let listener =
            TcpListener::bind(&address).with_context(|| format!("Failed to bind {address}"))?;
        let store = FileWaitlistStore::new(&configuration.waitlist);
        tracing::info!("Waitlist is stored at {}", store.path().display());

        Self::from_listener(listener, Waitlist::new(store))
    }

    /// Prepare this app to serve on the given [`TcpListener`] with any waitlist.
    pub fn from_listener(listener: TcpListener, waitlist: Waitlist) -> anyhow::Result<Self> {
        let port = listener.local_addr()?.port();
        let metrics = AppMetrics::new()?;
        let app_state = AppState::create(waitlist, metrics);
        let router = Self::build_router(&app_state);

        let server = Server::from_tcp(listener)
            .context("Failed to create server from listener")?
            .serve(router.into_make_service());
        tracing::info!("Server running at {}", server.local_addr());

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), hyper::Error> {
        self.server.await
    }

    /// Builder the router for the application.
    fn build_router(app_state: &AppState) -> Router {
        use tower::ServiceBuilder;
        use tower_http::{
            request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
            trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
        };
        use tracing::Level;

        routes::build_router(app_state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(
                            DefaultMakeSpan::new()
                                .level(Level::INFO)
                                .include_headers(true),
                        )
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }
}
