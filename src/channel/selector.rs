use super::Id;
use super::model::Channel;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    NoChannelsLoaded,
    NoChannelSelected,
    ChannelSelected(Id),
}

/// Tracks the active channel of a discussion.
///
/// The first channel is picked automatically the first time a non-empty list
/// arrives while nothing is selected. After that only [`Selector::select`]
/// moves the selection; a refreshed list never clears or replaces it, even
/// when the selected channel is no longer part of it.
#[derive(Clone, Debug, Default)]
pub struct Selector {
    selection: Selection,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<&Id> {
        match &self.selection {
            Selection::ChannelSelected(id) => Some(id),
            Selection::NoChannelsLoaded | Selection::NoChannelSelected => None,
        }
    }

    /// Returns `true` when the selection changed.
    pub fn on_channels_loaded(&mut self, channels: &[Channel]) -> bool {
        match (&self.selection, channels.first()) {
            (Selection::ChannelSelected(_), _) => false,
            (Selection::NoChannelsLoaded | Selection::NoChannelSelected, Some(first)) => {
                self.selection = Selection::ChannelSelected(first.id.clone());
                true
            }
            (Selection::NoChannelsLoaded, None) => {
                self.selection = Selection::NoChannelSelected;
                false
            }
            (Selection::NoChannelSelected, None) => false,
        }
    }

    /// Returns `true` when the selection changed.
    pub fn select(&mut self, id: Id) -> bool {
        if self.selected() == Some(&id) {
            return false;
        }
        self.selection = Selection::ChannelSelected(id);
        true
    }
}
