//! In-memory backend shared by unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::channel::model::Channel;
use crate::channel::repository::ChannelRepository;
use crate::discussion::model::Discussion;
use crate::discussion::repository::DiscussionRepository;
use crate::group::model::{Group, Owner};
use crate::group::repository::GroupRepository;
use crate::message::model::Message;
use crate::message::repository::MessageRepository;
use crate::message::Content;
use crate::session::Session;
use crate::user::model::User;
use crate::user::repository::UserRepository;
use crate::{channel, discussion, group, integration, message, user};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    FindViewer,
    FindGroup {
        slug: String,
    },
    FindDiscussion {
        group_id: String,
    },
    FindMessages {
        channel_id: String,
        limit: usize,
        offset: usize,
    },
    SendMessage {
        channel_id: String,
        content: String,
    },
    CreateChannel {
        discussion_id: String,
        name: String,
        kind: channel::Kind,
    },
}

#[derive(Default)]
struct Inner {
    viewer: Option<User>,
    groups: Vec<Group>,
    discussions: HashMap<group::Id, Discussion>,
    /// Oldest first.
    messages: HashMap<channel::Id, Vec<Message>>,
    calls: Vec<Call>,
    fail_reads: bool,
    fail_sends: bool,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Mutex<Inner>>,
}

pub fn user(id: &str) -> User {
    User {
        id: user::Id::from(id),
        name: id.to_owned(),
        avatar: None,
    }
}

pub fn group(id: &str, slug: &str, owner: &str, is_member: bool) -> Group {
    Group {
        id: group::Id::from(id),
        name: slug.to_uppercase(),
        slug: group::Slug::from(slug),
        is_member,
        owner: Owner {
            id: user::Id::from(owner),
        },
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub fn set_viewer(&self, viewer: User) {
        self.lock().viewer = Some(viewer);
    }

    pub fn add_group(&self, group: Group) {
        self.lock().groups.push(group);
    }

    pub fn add_discussion(&self, group_id: &str, discussion_id: &str, channels: &[(&str, &str)]) {
        let discussion = Discussion {
            id: discussion::Id::from(discussion_id),
            channels: channels
                .iter()
                .map(|(id, name)| Channel {
                    id: channel::Id::from(*id),
                    name: (*name).to_owned(),
                    kind: channel::Kind::Text,
                })
                .collect(),
        };
        self.lock()
            .discussions
            .insert(group::Id::from(group_id), discussion);
    }

    pub fn add_channel(&self, discussion_id: &str, id: &str, name: &str) {
        let mut inner = self.lock();
        if let Some(d) = inner
            .discussions
            .values_mut()
            .find(|d| d.id == discussion::Id::from(discussion_id))
        {
            d.channels.push(Channel {
                id: channel::Id::from(id),
                name: name.to_owned(),
                kind: channel::Kind::Text,
            });
        }
    }

    pub fn add_message(&self, channel_id: &str, sender: &str, content: &str) {
        let mut inner = self.lock();
        inner.next_id += 1;
        let n = inner.next_id;
        inner
            .messages
            .entry(channel::Id::from(channel_id))
            .or_default()
            .push(Message {
                id: message::Id::from(format!("m{n}").as_str()),
                content: content.to_owned(),
                created_at: epoch() + Duration::seconds(n as i64),
                sender: user(sender),
            });
    }

    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn fail_sends(&self, fail: bool) {
        self.lock().fail_sends = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| f(c)).count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn record(&self, call: Call) -> bool {
        let mut inner = self.lock();
        inner.calls.push(call);
        inner.fail_reads
    }
}

fn unavailable() -> integration::Error {
    integration::Error::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)
}

#[async_trait::async_trait]
impl UserRepository for FakeBackend {
    async fn find_viewer(&self, _session: &Session) -> user::Result<User> {
        if self.record(Call::FindViewer) {
            return Err(unavailable().into());
        }
        self.lock().viewer.clone().ok_or(user::Error::NotFound)
    }
}

#[async_trait::async_trait]
impl GroupRepository for FakeBackend {
    async fn find_by_slug(&self, _session: &Session, slug: &group::Slug) -> group::Result<Option<Group>> {
        if self.record(Call::FindGroup {
            slug: slug.to_string(),
        }) {
            return Err(unavailable().into());
        }
        Ok(self.lock().groups.iter().find(|g| &g.slug == slug).cloned())
    }
}

#[async_trait::async_trait]
impl DiscussionRepository for FakeBackend {
    async fn find_by_group(&self, _session: &Session, group_id: &group::Id) -> discussion::Result<Discussion> {
        if self.record(Call::FindDiscussion {
            group_id: group_id.to_string(),
        }) {
            return Err(unavailable().into());
        }
        self.lock()
            .discussions
            .get(group_id)
            .cloned()
            .ok_or_else(|| discussion::Error::NotFound(group_id.clone()))
    }
}

#[async_trait::async_trait]
impl ChannelRepository for FakeBackend {
    async fn create(
        &self,
        _session: &Session,
        discussion_id: &discussion::Id,
        name: &str,
        kind: &channel::Kind,
    ) -> channel::Result<()> {
        self.record(Call::CreateChannel {
            discussion_id: discussion_id.to_string(),
            name: name.to_owned(),
            kind: kind.clone(),
        });
        if self.lock().fail_sends {
            return Err(unavailable().into());
        }
        let id = {
            let mut inner = self.lock();
            inner.next_id += 1;
            format!("c{}", inner.next_id)
        };
        self.add_channel(&discussion_id.to_string(), &id, name);
        Ok(())
    }
}

#[async_trait::async_trait]
impl MessageRepository for FakeBackend {
    async fn find_by_channel(
        &self,
        _session: &Session,
        channel_id: &channel::Id,
        limit: usize,
        offset: usize,
    ) -> message::Result<Vec<Message>> {
        if self.record(Call::FindMessages {
            channel_id: channel_id.to_string(),
            limit,
            offset,
        }) {
            return Err(unavailable().into());
        }
        let inner = self.lock();
        let messages = inner
            .messages
            .get(channel_id)
            .map(|m| m.iter().rev().skip(offset).take(limit).cloned().collect())
            .unwrap_or_default();
        Ok(messages)
    }

    async fn send(
        &self,
        _session: &Session,
        channel_id: &channel::Id,
        content: &Content,
    ) -> message::Result<()> {
        self.record(Call::SendMessage {
            channel_id: channel_id.to_string(),
            content: content.as_str().to_owned(),
        });
        if self.lock().fail_sends {
            return Err(unavailable().into());
        }
        let sender = self
            .lock()
            .viewer
            .as_ref()
            .map(|v| v.id.to_string())
            .unwrap_or_else(|| "me".into());
        self.add_message(&channel_id.to_string(), &sender, content.as_str());
        Ok(())
    }
}
