use serde::Deserialize;

use super::{Id, Slug};
use crate::user;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Id,
    pub name: String,
    pub slug: Slug,
    /// Whether the requesting viewer belongs to the group.
    pub is_member: bool,
    pub owner: Owner,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Owner {
    pub id: user::Id,
}

/// A group the viewer may open, with the viewer's standing in it.
#[derive(Clone, Debug)]
pub struct Access {
    pub group: Group,
    pub is_owner: bool,
}
