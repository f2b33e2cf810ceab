use log::debug;

use super::model::Discussion;
use super::{Repository, Store};
use crate::discussion;
use crate::group;
use crate::session::Session;
use crate::store::QueryState;

/// Loads the channel list of a group's discussion through the shared store.
#[derive(Clone)]
pub struct DiscussionService {
    repo: Repository,
    store: Store,
}

impl DiscussionService {
    pub fn new(repo: Repository, store: Store) -> Self {
        Self { repo, store }
    }
}

impl DiscussionService {
    /// Returns the cached discussion, fetching it only the first time.
    pub async fn load(&self, session: &Session, group_id: &group::Id) -> QueryState<Discussion> {
        if self.store.is_cached(group_id) {
            return self.store.state(group_id);
        }
        self.refetch(session, group_id).await
    }

    pub async fn refetch(&self, session: &Session, group_id: &group::Id) -> QueryState<Discussion> {
        debug!("fetching discussion of group {group_id}");

        self.store
            .fetch(group_id, async {
                if !session.is_authenticated() {
                    return Err(discussion::Error::Unauthenticated.to_string());
                }
                self.repo
                    .find_by_group(session, group_id)
                    .await
                    .map_err(|e| e.to_string())
            })
            .await;

        self.store.state(group_id)
    }

    pub fn state(&self, group_id: &group::Id) -> QueryState<Discussion> {
        self.store.state(group_id)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use crate::channel;
    use crate::fake::{Call, FakeBackend};
    use crate::session::Token;
    use crate::store::Consistency;

    fn service(backend: &FakeBackend) -> DiscussionService {
        DiscussionService::new(
            Arc::new(backend.clone()),
            Store::new(Consistency::default()),
        )
    }

    #[tokio::test]
    async fn should_load_discussion_once_per_group() {
        let backend = FakeBackend::new();
        backend.add_discussion("g1", "d1", &[("c1", "general")]);
        let service = service(&backend);
        let session = Session::new(Token::new("t"));
        let group_id = group::Id::from("g1");

        let first = service.load(&session, &group_id).await;
        let second = service.load(&session, &group_id).await;

        assert_eq!(first, second);
        let discussion = first.data().unwrap();
        assert_eq!(discussion.id, discussion::Id::from("d1"));
        assert_eq!(discussion.channels[0].id, channel::Id::from("c1"));
        assert_eq!(
            backend.calls(),
            vec![Call::FindDiscussion {
                group_id: "g1".into()
            }]
        );
    }

    #[tokio::test]
    async fn should_refetch_on_demand() {
        let backend = FakeBackend::new();
        backend.add_discussion("g1", "d1", &[("c1", "general")]);
        let service = service(&backend);
        let session = Session::new(Token::new("t"));
        let group_id = group::Id::from("g1");

        service.load(&session, &group_id).await;
        backend.add_channel("d1", "c2", "random");
        let state = service.refetch(&session, &group_id).await;

        assert_eq!(state.data().unwrap().channels.len(), 2);
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn should_resolve_to_error_when_backend_fails() {
        let backend = FakeBackend::new();
        backend.fail_reads(true);
        let service = service(&backend);

        let state = service
            .load(&Session::new(Token::new("t")), &group::Id::from("g1"))
            .await;

        assert!(matches!(state, QueryState::Error(_)));
    }

    #[tokio::test]
    async fn should_not_issue_request_without_token() {
        let backend = FakeBackend::new();
        backend.add_discussion("g1", "d1", &[("c1", "general")]);
        let service = service(&backend);

        let state = service
            .load(&Session::anonymous(), &group::Id::from("g1"))
            .await;

        assert_eq!(state, QueryState::Error("not signed in".into()));
        assert!(backend.calls().is_empty());
    }
}
