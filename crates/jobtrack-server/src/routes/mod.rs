//! Route definitions for the HTTP API.

pub mod auth;
pub mod jobs;
pub mod notifications;
pub mod root;

use axum::Router;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the complete router with all routes.
///
/// REST routes sit behind a blanket CORS layer (any origin); the WebSocket
/// notification route gets its own layer restricted to the configured
/// frontend origin with GET/POST only. The layers are attached per
/// sub-router so the permissive policy never leaks onto the channel.
pub fn build_router(state: AppState) -> Router {
    let rest = Router::new()
        .merge(root::routes())
        .merge(auth::routes())
        .merge(jobs::routes())
        .layer(rest_cors_layer());

    let channel = notifications::routes().layer(channel_cors_layer(&state.config().frontend_origin));

    Router::new().merge(rest).merge(channel).with_state(state)
}

/// Blanket CORS for the REST surface: any origin, any method, any headers.
fn rest_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Restricted CORS for the notification channel: one origin, GET/POST.
fn channel_cors_layer(frontend_origin: &str) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(
            frontend_origin
                .parse::<http::HeaderValue>()
                .expect("Invalid CORS origin"),
        )
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
