use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::debug;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::service::MessageService;
use crate::channel;
use crate::session::Session;

/// When a client last looked at the view.
#[derive(Clone, Debug)]
pub struct Activity {
    last_seen: Arc<Mutex<Instant>>,
    idle_after: Duration,
}

impl Activity {
    pub fn new(idle_after: Duration) -> Self {
        Self {
            last_seen: Arc::new(Mutex::new(Instant::now())),
            idle_after,
        }
    }

    pub fn touch(&self) {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    pub fn is_idle(&self) -> bool {
        let last_seen = *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner);
        last_seen.elapsed() >= self.idle_after
    }
}

/// Background refresh of the selected channel's messages.
///
/// Fetches as soon as a channel is selected and then once per interval.
/// Sleeps while nothing is selected and skips ticks while no client has
/// touched the view for a while. A fetch in flight when the selection
/// moves is allowed to finish; it only writes to its own channel's entry.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn spawn(
        service: MessageService,
        session: Session,
        selection: watch::Receiver<Option<channel::Id>>,
        interval: Duration,
        activity: Activity,
    ) -> Self {
        let handle = tokio::spawn(run(service, session, selection, interval, activity));
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(
    service: MessageService,
    session: Session,
    mut selection: watch::Receiver<Option<channel::Id>>,
    period: Duration,
    activity: Activity,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let selected = selection.borrow_and_update().clone();

        let Some(channel_id) = selected else {
            if selection.changed().await.is_err() {
                break;
            }
            continue;
        };

        debug!("polling channel {channel_id} every {period:?}");
        ticker.reset_immediately();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !activity.is_idle() {
                        service.refetch(&session, &channel_id).await;
                    }
                }
                changed = selection.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }

    debug!("poller stopped");
}
