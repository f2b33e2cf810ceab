use serde::Deserialize;

use super::Id;
use crate::channel;
use crate::channel::model::Channel;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Discussion {
    pub id: Id,
    /// In creation order.
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl Discussion {
    pub fn channel(&self, id: &channel::Id) -> Option<&Channel> {
        self.channels.iter().find(|c| &c.id == id)
    }
}
