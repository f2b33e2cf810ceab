use axum::Router;
use axum::middleware::map_response;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod channel;
pub mod discussion;
pub mod error;
mod handler;
pub mod group;
pub mod integration;
pub mod markup;
pub mod message;
pub mod session;
pub mod state;
pub mod store;
pub mod user;

#[cfg(test)]
pub(crate) mod fake;

pub type Result<T> = std::result::Result<T, error::Error>;

pub fn app(s: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .merge(discussion::pages(s.clone()))
        .merge(discussion::api(s))
        .layer(map_response(markup::wrap_in_base))
        .layer(TraceLayer::new_for_http())
}
