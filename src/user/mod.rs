use std::fmt::Display;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::integration;

pub mod model;
pub mod repository;

pub type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn repository::UserRepository + Send + Sync>;

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

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not signed in")]
    Unauthenticated,
    #[error("signed-in user not found")]
    NotFound,

    #[error(transparent)]
    _Integration(#[from] integration::Error),
}
