use serde::Deserialize;

use super::Id;

/// Denormalized user as the backend attaches it to messages and `me`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub avatar: Option<String>,
}

impl User {
    /// First letter of the name, shown when there is no avatar.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}
