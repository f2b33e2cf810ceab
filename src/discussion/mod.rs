use std::fmt::Display;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::{channel, group, integration, message, store};

mod handler;
pub mod markup;
pub mod model;
pub mod registry;
pub mod repository;
pub mod service;
pub mod view;

pub type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn repository::DiscussionRepository + Send + Sync>;
/// Discussions keyed by the group they belong to.
pub type Store = store::Store<group::Id, model::Discussion>;

pub fn pages<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/c/{slug}/discussion", get(handler::pages::discussion))
        .with_state(s)
}

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/c/{slug}/discussion/reload", post(handler::api::reload))
        .route(
            "/c/{slug}/discussion/channels",
            post(handler::api::create_channel),
        )
        .route(
            "/c/{slug}/discussion/channels/{id}",
            post(handler::api::select_channel),
        )
        .route(
            "/c/{slug}/discussion/transcript",
            get(handler::api::transcript),
        )
        .route(
            "/c/{slug}/discussion/messages",
            post(handler::api::send_message),
        )
        .with_state(s)
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not signed in")]
    Unauthenticated,
    #[error("discussion not found for group: {0}")]
    NotFound(group::Id),

    #[error(transparent)]
    _Group(#[from] group::Error),
    #[error(transparent)]
    _Channel(#[from] channel::Error),
    #[error(transparent)]
    _Message(#[from] message::Error),
    #[error(transparent)]
    _Integration(#[from] integration::Error),
}
