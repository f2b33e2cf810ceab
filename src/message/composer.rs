use std::fmt::Display;

use super::Content;
use crate::store::MutationState;

/// Input box of the active channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Composer {
    input: String,
    state: MutationState,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub const fn state(&self) -> &MutationState {
        &self.state
    }

    /// Ignored while a send is in flight.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if self.state.is_pending() {
            return;
        }
        self.input = text.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_pending() && !self.input.trim().is_empty()
    }

    /// Moves to `Pending` and hands out the text to send, or `None` when
    /// submitting is not allowed.
    pub fn begin(&mut self) -> Option<Content> {
        if !self.can_submit() {
            return None;
        }
        let content = Content::parse(&self.input).ok()?;
        self.state = MutationState::Pending;
        Some(content)
    }

    pub fn succeed(&mut self) {
        self.input.clear();
        self.state = MutationState::Success;
    }

    /// Keeps the input so the user can retry.
    pub fn fail(&mut self, e: impl Display) {
        self.state = MutationState::Error(e.to_string());
    }
}
