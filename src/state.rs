use std::sync::Arc;

use axum::extract::FromRef;
use log::info;

use crate::channel::repository::GqlChannelRepository;
use crate::channel::service::ChannelService;
use crate::discussion::registry::Views;
use crate::discussion::repository::GqlDiscussionRepository;
use crate::discussion::service::DiscussionService;
use crate::discussion::view::Services;
use crate::group::repository::GqlGroupRepository;
use crate::group::service::GroupServiceImpl;
use crate::integration::{self, gql};
use crate::message::repository::GqlMessageRepository;
use crate::message::service::MessageService;
use crate::session::Session;
use crate::user::repository::GqlUserRepository;
use crate::{discussion, message, user};

#[derive(Clone)]
pub struct AppState {
    pub views: Views,
}

impl AppState {
    /// Wires the GraphQL repositories and resolves who the configured
    /// backend token belongs to.
    pub async fn init(config: &integration::Config) -> Self {
        let gql = gql::Client::new(integration::init_http_client(), &config.gql);

        let user_repo: user::Repository = Arc::new(GqlUserRepository::new(gql.clone()));
        let session = Session::resolve(config.token.clone(), &user_repo).await;
        if let Some(viewer) = session.viewer() {
            info!("signed in as {} ({})", viewer.name, viewer.id);
        }

        let poll = config.poll;
        let services = Services {
            discussions: DiscussionService::new(
                Arc::new(GqlDiscussionRepository::new(gql.clone())),
                discussion::Store::new(poll.consistency),
            ),
            channels: ChannelService::new(Arc::new(GqlChannelRepository::new(gql.clone()))),
            messages: MessageService::new(
                Arc::new(GqlMessageRepository::new(gql.clone())),
                message::Store::new(poll.consistency),
                poll.limit,
            ),
        };
        let groups = Arc::new(GroupServiceImpl::new(Arc::new(GqlGroupRepository::new(gql))));

        Self {
            views: Views::new(groups, services, session, poll),
        }
    }
}

impl FromRef<AppState> for Views {
    fn from_ref(s: &AppState) -> Self {
        s.views.clone()
    }
}
