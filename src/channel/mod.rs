use std::fmt::Display;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::integration;

pub mod model;
pub mod repository;
pub mod selector;
pub mod service;

pub type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn repository::ChannelRepository + Send + Sync>;

#[derive(Clone, Debug, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    Text,
    #[serde(other)]
    Unknown,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not signed in")]
    Unauthenticated,
    #[error("only the group owner can create channels")]
    NotOwner,
    #[error("missing channel name")]
    MissingName,
    #[error("channel list is not loaded yet")]
    DiscussionNotLoaded,

    #[error(transparent)]
    _Integration(#[from] integration::Error),
}
