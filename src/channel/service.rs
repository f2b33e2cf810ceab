use log::{debug, error};

use super::{Kind, Repository};
use crate::channel;
use crate::discussion;
use crate::session::Session;

#[derive(Clone)]
pub struct ChannelService {
    repo: Repository,
}

impl ChannelService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }
}

impl ChannelService {
    /// Creates a text channel. Blank names and missing credentials fail
    /// without reaching the backend.
    pub async fn create(
        &self,
        session: &Session,
        discussion_id: &discussion::Id,
        name: &str,
    ) -> super::Result<()> {
        if !session.is_authenticated() {
            return Err(channel::Error::Unauthenticated);
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(channel::Error::MissingName);
        }

        debug!("creating channel {name} in discussion {discussion_id}");
        self.repo
            .create(session, discussion_id, name, &Kind::Text)
            .await
            .inspect_err(|e| error!("could not create channel {name}: {e}"))
    }
}
