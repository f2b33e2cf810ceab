use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::watch;

use super::model::Discussion;
use super::service::DiscussionService;
use crate::channel::selector::{Selection, Selector};
use crate::channel::service::ChannelService;
use crate::group::model::{Access, Group};
use crate::message::composer::Composer;
use crate::message::model::Transcript;
use crate::integration::poll;
use crate::message::poller::{Activity, Poller};
use crate::message::service::MessageService;
use crate::session::Session;
use crate::store::{MutationState, QueryState};
use crate::{channel, discussion, message, user};

/// Services a view reads and writes through.
#[derive(Clone)]
pub struct Services {
    pub discussions: DiscussionService,
    pub channels: ChannelService,
    pub messages: MessageService,
}

/// Everything the discussion page renders, taken at one point in time.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub group: Group,
    pub is_owner: bool,
    pub viewer: Option<user::Id>,
    pub discussion: QueryState<Discussion>,
    pub selection: Selection,
    /// `None` while no channel is selected.
    pub transcript: Option<Transcript>,
    pub composer: Composer,
    pub creation: MutationState,
    /// How often the transcript is checked for changes.
    pub refresh: Duration,
}

/// One open discussion: channel list, active channel, its transcript and
/// the input box, kept fresh by a background poller.
pub struct DiscussionView {
    access: Access,
    session: Session,
    services: Services,
    selector: Mutex<Selector>,
    selected: watch::Sender<Option<channel::Id>>,
    composer: Mutex<Composer>,
    creation: Mutex<MutationState>,
    interval: Duration,
    activity: Activity,
    _poller: Poller,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DiscussionView {
    /// Must be called inside a tokio runtime; the poller starts right away
    /// and stays idle until a channel is selected.
    pub fn open(access: Access, session: Session, services: Services, poll: poll::Config) -> Self {
        let (selected, rx) = watch::channel(None);
        let activity = Activity::new(poll.idle_after);
        let poller = Poller::spawn(
            services.messages.clone(),
            session.clone(),
            rx,
            poll.interval,
            activity.clone(),
        );

        Self {
            access,
            session,
            services,
            selector: Mutex::new(Selector::new()),
            selected,
            composer: Mutex::new(Composer::new()),
            creation: Mutex::new(MutationState::Idle),
            interval: poll.interval,
            activity,
            _poller: poller,
        }
    }

    pub const fn group(&self) -> &Group {
        &self.access.group
    }

    pub const fn is_owner(&self) -> bool {
        self.access.is_owner
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Marks the view as watched, keeping its poller going.
    pub fn touch(&self) {
        self.activity.touch();
    }

    pub fn is_idle(&self) -> bool {
        self.activity.is_idle()
    }
}

impl DiscussionView {
    /// Loads the channel list unless it is already cached.
    pub async fn load(&self) -> QueryState<Discussion> {
        let state = self
            .services
            .discussions
            .load(&self.session, &self.access.group.id)
            .await;
        self.on_discussion(&state);
        state
    }

    pub async fn reload(&self) -> QueryState<Discussion> {
        let state = self
            .services
            .discussions
            .refetch(&self.session, &self.access.group.id)
            .await;
        self.on_discussion(&state);
        state
    }

    fn on_discussion(&self, state: &QueryState<Discussion>) {
        let Some(discussion) = state.data() else {
            return;
        };

        let mut selector = lock(&self.selector);
        if selector.on_channels_loaded(&discussion.channels) {
            debug!("auto-selected {:?}", selector.selection());
            self.selected.send_replace(selector.selected().cloned());
        }
    }

    pub fn discussion(&self) -> QueryState<Discussion> {
        self.services.discussions.state(&self.access.group.id)
    }

    pub fn selection(&self) -> Selection {
        lock(&self.selector).selection().clone()
    }

    pub fn selected(&self) -> Option<channel::Id> {
        lock(&self.selector).selected().cloned()
    }

    /// Returns `true` when the active channel changed.
    pub fn select(&self, id: channel::Id) -> bool {
        let mut selector = lock(&self.selector);
        if !selector.select(id) {
            return false;
        }
        self.selected.send_replace(selector.selected().cloned());
        true
    }

    pub fn transcript(&self) -> Option<Transcript> {
        self.selected()
            .map(|id| self.services.messages.transcript(&id))
    }

    pub fn composer(&self) -> Composer {
        lock(&self.composer).clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        lock(&self.composer).set_input(text);
    }

    /// Sends the composer input to the active channel.
    ///
    /// Returns `Ok(false)` without a request when the input is blank, and
    /// `SendInProgress` while an earlier send has not finished.
    pub async fn submit(&self) -> message::Result<bool> {
        let channel_id = self.selected().ok_or(message::Error::NoChannelSelected)?;

        let content = {
            let mut composer = lock(&self.composer);
            if composer.state().is_pending() {
                return Err(message::Error::SendInProgress);
            }
            composer.begin()
        };
        let Some(content) = content else {
            return Ok(false);
        };

        match self
            .services
            .messages
            .send(&self.session, &channel_id, &content)
            .await
        {
            Ok(()) => {
                lock(&self.composer).succeed();
                Ok(true)
            }
            Err(e) => {
                lock(&self.composer).fail(&e);
                Err(e)
            }
        }
    }

    pub fn creation(&self) -> MutationState {
        lock(&self.creation).clone()
    }

    /// Creates a text channel and refreshes the channel list. The new
    /// channel is not selected.
    ///
    /// A blank or cancelled name is a no-op that returns `Ok(false)`.
    pub async fn create_channel(&self, name: &str) -> discussion::Result<bool> {
        if !self.access.is_owner {
            return Err(channel::Error::NotOwner.into());
        }
        if name.trim().is_empty() {
            return Ok(false);
        }

        let discussion_id = self
            .discussion()
            .data()
            .map(|d| d.id.clone())
            .ok_or(channel::Error::DiscussionNotLoaded)?;

        {
            let mut creation = lock(&self.creation);
            if creation.is_pending() {
                return Ok(false);
            }
            *creation = MutationState::Pending;
        }

        match self
            .services
            .channels
            .create(&self.session, &discussion_id, name)
            .await
        {
            Ok(()) => {
                *lock(&self.creation) = MutationState::Success;
                self.reload().await;
                Ok(true)
            }
            Err(e) => {
                warn!("channel {name} not created in {}: {e}", self.access.group.slug);
                *lock(&self.creation) = MutationState::Error(e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            group: self.access.group.clone(),
            is_owner: self.access.is_owner,
            viewer: self.session.viewer().map(|v| v.id.clone()),
            discussion: self.discussion(),
            selection: self.selection(),
            transcript: self.transcript(),
            composer: self.composer(),
            creation: self.creation(),
            refresh: self.interval,
        }
    }
}
