use serde::Deserialize;
use serde_json::json;

use super::Slug;
use super::model::Group;
use crate::integration::gql;
use crate::session::Session;

const GET_GROUP_BY_SLUG: &str = r#"
query GetGroupBySlug($slug: String!) {
  group(slug: $slug) {
    id
    name
    slug
    isMember
    owner { id }
  }
}"#;

#[async_trait::async_trait]
pub trait GroupRepository {
    async fn find_by_slug(&self, session: &Session, slug: &Slug) -> super::Result<Option<Group>>;
}

#[derive(Clone)]
pub struct GqlGroupRepository {
    gql: gql::Client,
}

impl GqlGroupRepository {
    pub fn new(gql: gql::Client) -> Self {
        Self { gql }
    }
}

#[derive(Deserialize)]
struct GroupData {
    group: Option<Group>,
}

#[async_trait::async_trait]
impl GroupRepository for GqlGroupRepository {
    async fn find_by_slug(&self, session: &Session, slug: &Slug) -> super::Result<Option<Group>> {
        let data: GroupData = self
            .gql
            .request(session.token(), GET_GROUP_BY_SLUG, json!({ "slug": slug }))
            .await?;

        Ok(data.group)
    }
}
