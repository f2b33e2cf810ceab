use std::fmt::Display;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::integration;

pub mod model;
pub mod repository;
pub mod service;

pub type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn repository::GroupRepository + Send + Sync>;
pub type Service = Arc<dyn service::GroupService + Send + Sync>;

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

/// URL key of a group, e.g. `cs-club` in `/c/cs-club/discussion`.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Slug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("group not found: {0}")]
    NotFound(Slug),
    #[error("not a member of group: {0}")]
    NotMember(Slug),

    #[error(transparent)]
    _Integration(#[from] integration::Error),
}
