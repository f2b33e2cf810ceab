use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::json;

use super::Content;
use super::model::Message;
use crate::channel;
use crate::integration::gql;
use crate::message;
use crate::session::Session;

const GET_CHANNEL_MESSAGES: &str = r#"
query GetChannelMessages($channelId: ID!, $limit: Int!, $offset: Int!) {
  channel(id: $channelId) {
    id
    messages(limit: $limit, offset: $offset) {
      id
      content
      createdAt
      sender { id name avatar }
    }
  }
}"#;

const SEND_MESSAGE: &str = r#"
mutation SendMessage($input: SendMessageInput!) {
  sendMessage(input: $input) { id }
}"#;

#[async_trait::async_trait]
pub trait MessageRepository {
    /// Newest first.
    async fn find_by_channel(
        &self,
        session: &Session,
        channel_id: &channel::Id,
        limit: usize,
        offset: usize,
    ) -> super::Result<Vec<Message>>;

    async fn send(
        &self,
        session: &Session,
        channel_id: &channel::Id,
        content: &Content,
    ) -> super::Result<()>;
}

#[derive(Clone)]
pub struct GqlMessageRepository {
    gql: gql::Client,
}

impl GqlMessageRepository {
    pub fn new(gql: gql::Client) -> Self {
        Self { gql }
    }
}

#[derive(Deserialize)]
struct ChannelData {
    channel: Option<ChannelMessages>,
}

#[derive(Deserialize)]
struct ChannelMessages {
    #[serde(default)]
    messages: Vec<Message>,
}

#[async_trait::async_trait]
impl MessageRepository for GqlMessageRepository {
    async fn find_by_channel(
        &self,
        session: &Session,
        channel_id: &channel::Id,
        limit: usize,
        offset: usize,
    ) -> super::Result<Vec<Message>> {
        let data: ChannelData = self
            .gql
            .request(
                session.token(),
                GET_CHANNEL_MESSAGES,
                json!({
                    "channelId": channel_id,
                    "limit": limit,
                    "offset": offset,
                }),
            )
            .await?;

        data.channel
            .map(|c| c.messages)
            .ok_or_else(|| message::Error::ChannelNotFound(channel_id.clone()))
    }

    async fn send(
        &self,
        session: &Session,
        channel_id: &channel::Id,
        content: &Content,
    ) -> super::Result<()> {
        let token = session.token().ok_or(message::Error::Unauthenticated)?;

        let _: IgnoredAny = self
            .gql
            .request(
                Some(token),
                SEND_MESSAGE,
                json!({
                    "input": {
                        "channelId": channel_id,
                        "content": content,
                    }
                }),
            )
            .await?;

        Ok(())
    }
}
