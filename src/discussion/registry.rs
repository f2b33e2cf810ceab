use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;

use super::view::{DiscussionView, Services};
use crate::group::{self, Slug};
use crate::integration::poll;
use crate::session::Session;

/// Discussion views opened by this server, one per group. A view nobody
/// asked for during `idle_after` is closed and reopened on the next request.
#[derive(Clone)]
pub struct Views {
    groups: group::Service,
    services: Services,
    session: Session,
    poll: poll::Config,
    open: Arc<Mutex<HashMap<Slug, Arc<DiscussionView>>>>,
}

impl Views {
    pub fn new(
        groups: group::Service,
        services: Services,
        session: Session,
        poll: poll::Config,
    ) -> Self {
        Self {
            groups,
            services,
            session,
            poll,
            open: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the view of `slug`, opening it and loading its channel list
    /// the first time.
    pub async fn open(&self, slug: &Slug) -> super::Result<Arc<DiscussionView>> {
        self.close_idle();
        if let Some(view) = self.find(slug) {
            return Ok(view);
        }

        let access = self.groups.find_accessible(&self.session, slug).await?;
        let view = Arc::new(DiscussionView::open(
            access,
            self.session.clone(),
            self.services.clone(),
            self.poll,
        ));
        view.load().await;

        info!("opened discussion of {slug}");
        let view = self
            .lock()
            .entry(slug.clone())
            .or_insert(view)
            .clone();
        Ok(view)
    }

    pub fn find(&self, slug: &Slug) -> Option<Arc<DiscussionView>> {
        let view = self.lock().get(slug).cloned()?;
        view.touch();
        Some(view)
    }

    fn close_idle(&self) {
        self.lock().retain(|slug, view| {
            let idle = view.is_idle();
            if idle {
                info!("closing idle discussion of {slug}");
            }
            !idle
        });
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Slug, Arc<DiscussionView>>> {
        self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
