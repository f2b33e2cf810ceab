use serde::de::IgnoredAny;
use serde_json::json;

use super::Kind;
use crate::channel;
use crate::discussion;
use crate::integration::gql;
use crate::session::Session;

const CREATE_CHANNEL: &str = r#"
mutation CreateChannel($input: CreateChannelInput!) {
  createChannel(input: $input) { id }
}"#;

#[async_trait::async_trait]
pub trait ChannelRepository {
    async fn create(
        &self,
        session: &Session,
        discussion_id: &discussion::Id,
        name: &str,
        kind: &Kind,
    ) -> super::Result<()>;
}

#[derive(Clone)]
pub struct GqlChannelRepository {
    gql: gql::Client,
}

impl GqlChannelRepository {
    pub fn new(gql: gql::Client) -> Self {
        Self { gql }
    }
}

#[async_trait::async_trait]
impl ChannelRepository for GqlChannelRepository {
    async fn create(
        &self,
        session: &Session,
        discussion_id: &discussion::Id,
        name: &str,
        kind: &Kind,
    ) -> super::Result<()> {
        let token = session.token().ok_or(channel::Error::Unauthenticated)?;

        let _: IgnoredAny = self
            .gql
            .request(
                Some(token),
                CREATE_CHANNEL,
                json!({
                    "input": {
                        "discussionId": discussion_id,
                        "name": name,
                        "type": kind,
                    }
                }),
            )
            .await?;

        Ok(())
    }
}
