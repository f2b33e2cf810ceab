use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::Id;
use crate::store::QueryState;
use crate::user::model::User;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Id,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub sender: User,
}

/// What the active channel pane shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
    pub state: QueryState<Vec<Message>>,
    /// Last refresh failure while older messages are still shown.
    pub error: Option<String>,
    /// Increases only when the message list changes.
    pub revision: u64,
}

impl Transcript {
    /// Messages oldest first; the backend lists them newest first.
    pub fn chronological(&self) -> impl Iterator<Item = &Message> {
        self.state.data().into_iter().flat_map(|m| m.iter().rev())
    }

    pub fn is_empty(&self) -> bool {
        self.state.data().is_none_or(|m| m.is_empty())
    }
}
