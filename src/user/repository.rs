use serde::Deserialize;
use serde_json::json;

use super::model::User;
use crate::integration::gql;
use crate::session::Session;
use crate::user;

const ME: &str = "query Me { me { id name avatar } }";

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_viewer(&self, session: &Session) -> super::Result<User>;
}

#[derive(Clone)]
pub struct GqlUserRepository {
    gql: gql::Client,
}

impl GqlUserRepository {
    pub fn new(gql: gql::Client) -> Self {
        Self { gql }
    }
}

#[derive(Deserialize)]
struct MeData {
    me: Option<User>,
}

#[async_trait::async_trait]
impl UserRepository for GqlUserRepository {
    async fn find_viewer(&self, session: &Session) -> super::Result<User> {
        let token = session.token().ok_or(user::Error::Unauthenticated)?;

        let data: MeData = self.gql.request(Some(token), ME, json!({})).await?;

        data.me.ok_or(user::Error::NotFound)
    }
}
