use serde::Deserialize;

use super::{Id, Kind};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Channel {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Kind,
}
