use log::debug;

use super::model::Access;
use super::{Repository, Slug};
use crate::group;
use crate::session::Session;

#[async_trait::async_trait]
pub trait GroupService {
    /// Resolves a group the viewer is a member of.
    async fn find_accessible(&self, session: &Session, slug: &Slug) -> super::Result<Access>;
}

#[derive(Clone)]
pub struct GroupServiceImpl {
    repo: Repository,
}

impl GroupServiceImpl {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }
}

#[async_trait::async_trait]
impl GroupService for GroupServiceImpl {
    async fn find_accessible(&self, session: &Session, slug: &Slug) -> super::Result<Access> {
        let group = self
            .repo
            .find_by_slug(session, slug)
            .await?
            .ok_or_else(|| group::Error::NotFound(slug.clone()))?;

        if !group.is_member {
            return Err(group::Error::NotMember(slug.clone()));
        }

        let is_owner = session.owns(&group);
        debug!("opening group {} (owner: {is_owner})", group.slug);

        Ok(Access { group, is_owner })
    }
}
