use serde::Deserialize;
use serde_json::json;

use super::model::Discussion;
use crate::discussion;
use crate::group;
use crate::integration::gql;
use crate::session::Session;

const GET_DISCUSSION: &str = r#"
query GetDiscussion($groupId: ID!) {
  discussion(groupId: $groupId) {
    id
    channels { id name type }
  }
}"#;

#[async_trait::async_trait]
pub trait DiscussionRepository {
    async fn find_by_group(
        &self,
        session: &Session,
        group_id: &group::Id,
    ) -> super::Result<Discussion>;
}

#[derive(Clone)]
pub struct GqlDiscussionRepository {
    gql: gql::Client,
}

impl GqlDiscussionRepository {
    pub fn new(gql: gql::Client) -> Self {
        Self { gql }
    }
}

#[derive(Deserialize)]
struct DiscussionData {
    discussion: Option<Discussion>,
}

#[async_trait::async_trait]
impl DiscussionRepository for GqlDiscussionRepository {
    async fn find_by_group(
        &self,
        session: &Session,
        group_id: &group::Id,
    ) -> super::Result<Discussion> {
        let data: DiscussionData = self
            .gql
            .request(
                session.token(),
                GET_DISCUSSION,
                json!({ "groupId": group_id }),
            )
            .await?;

        data.discussion
            .ok_or_else(|| discussion::Error::NotFound(group_id.clone()))
    }
}
