use std::fmt::Display;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::integration;
use crate::store;

pub mod composer;
pub mod markup;
pub mod model;
pub mod poller;
pub mod repository;
pub mod service;

pub type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn repository::MessageRepository + Send + Sync>;
/// Newest-first message lists keyed by channel.
pub type Store = store::Store<crate::channel::Id, Vec<model::Message>>;

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
        write!(f, "{}", self.0)
    }
}

/// Message text that is not blank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Content(String);

impl Content {
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        Ok(Self(text.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not signed in")]
    Unauthenticated,
    #[error("message text is empty")]
    EmptyContent,
    #[error("channel not found: {0}")]
    ChannelNotFound(crate::channel::Id),
    #[error("no channel selected")]
    NoChannelSelected,
    #[error("previous message is still being sent")]
    SendInProgress,

    #[error(transparent)]
    _Integration(#[from] integration::Error),
}
