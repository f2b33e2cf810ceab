use log::{debug, error};

use super::model::Transcript;
use super::{Content, Repository, Store};
use crate::channel;
use crate::message;
use crate::session::Session;
use crate::store::QueryState;

const FIRST_PAGE: usize = 0;

#[derive(Clone)]
pub struct MessageService {
    repo: Repository,
    store: Store,
    limit: usize,
}

impl MessageService {
    pub fn new(repo: Repository, store: Store, limit: usize) -> Self {
        Self { repo, store, limit }
    }
}

impl MessageService {
    /// Replaces the cached list of `channel_id` with the latest page.
    pub async fn refetch(&self, session: &Session, channel_id: &channel::Id) -> bool {
        debug!("fetching messages of channel {channel_id}");

        self.store
            .fetch(channel_id, async {
                if !session.is_authenticated() {
                    return Err(message::Error::Unauthenticated.to_string());
                }
                self.repo
                    .find_by_channel(session, channel_id, self.limit, FIRST_PAGE)
                    .await
                    .map_err(|e| e.to_string())
            })
            .await
    }

    /// Sends `content` and refreshes the channel right away so the sender
    /// does not wait for the next poll.
    pub async fn send(
        &self,
        session: &Session,
        channel_id: &channel::Id,
        content: &Content,
    ) -> super::Result<()> {
        if !session.is_authenticated() {
            return Err(message::Error::Unauthenticated);
        }

        self.repo
            .send(session, channel_id, content)
            .await
            .inspect_err(|e| error!("could not send message to {channel_id}: {e}"))?;

        self.refetch(session, channel_id).await;
        Ok(())
    }

    pub fn transcript(&self, channel_id: &channel::Id) -> Transcript {
        match self.store.snapshot(channel_id) {
            Some(s) => Transcript {
                state: s.state,
                error: s.error,
                revision: s.revision,
            },
            None => Transcript {
                state: QueryState::Loading,
                error: None,
                revision: 0,
            },
        }
    }
}
