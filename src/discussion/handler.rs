use axum::http::StatusCode;

use crate::{channel, discussion, group, message};

impl From<&discussion::Error> for StatusCode {
    fn from(e: &discussion::Error) -> Self {
        match e {
            discussion::Error::Unauthenticated => Self::UNAUTHORIZED,
            discussion::Error::NotFound(_) => Self::NOT_FOUND,
            discussion::Error::_Group(e) => e.into(),
            discussion::Error::_Channel(e) => e.into(),
            discussion::Error::_Message(e) => e.into(),
            discussion::Error::_Integration(_) => Self::BAD_GATEWAY,
        }
    }
}

impl From<&group::Error> for StatusCode {
    fn from(e: &group::Error) -> Self {
        match e {
            group::Error::NotFound(_) => Self::NOT_FOUND,
            group::Error::NotMember(_) => Self::FORBIDDEN,
            group::Error::_Integration(_) => Self::BAD_GATEWAY,
        }
    }
}

impl From<&channel::Error> for StatusCode {
    fn from(e: &channel::Error) -> Self {
        match e {
            channel::Error::Unauthenticated => Self::UNAUTHORIZED,
            channel::Error::NotOwner => Self::FORBIDDEN,
            channel::Error::MissingName | channel::Error::DiscussionNotLoaded => Self::BAD_REQUEST,
            channel::Error::_Integration(_) => Self::BAD_GATEWAY,
        }
    }
}

impl From<&message::Error> for StatusCode {
    fn from(e: &message::Error) -> Self {
        match e {
            message::Error::Unauthenticated => Self::UNAUTHORIZED,
            message::Error::ChannelNotFound(_) => Self::NOT_FOUND,
            message::Error::EmptyContent | message::Error::NoChannelSelected => Self::BAD_REQUEST,
            message::Error::SendInProgress => Self::CONFLICT,
            message::Error::_Integration(_) => Self::BAD_GATEWAY,
        }
    }
}

pub(super) mod pages {
    use axum::extract::{Path, State};

    use crate::discussion::markup::DiscussionPage;
    use crate::discussion::registry::Views;
    use crate::group::Slug;
    use crate::markup::Wrappable;

    pub async fn discussion(
        Path(slug): Path<Slug>,
        views: State<Views>,
    ) -> crate::Result<Wrappable> {
        let view = views.open(&slug).await?;
        let snapshot = view.snapshot();

        Ok(Wrappable::new(DiscussionPage(&snapshot)))
    }
}

pub(super) mod api {
    use axum::Form;
    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum_extra::extract::Query;
    use log::{debug, warn};
    use maud::{Markup, html};
    use serde::Deserialize;

    use crate::channel::selector::Selection;
    use crate::discussion::markup::{ChannelPane, Discussion};
    use crate::discussion::registry::Views;
    use crate::group::Slug;
    use crate::message::markup::TranscriptPane;
    use crate::{channel, discussion, message};

    const HX_PROMPT: &str = "HX-Prompt";

    pub async fn reload(
        Path(slug): Path<Slug>,
        views: State<Views>,
    ) -> crate::Result<Markup> {
        let view = views.open(&slug).await?;
        view.reload().await;

        Ok(html! { (Discussion(&view.snapshot())) })
    }

    pub async fn select_channel(
        Path((slug, id)): Path<(Slug, channel::Id)>,
        views: State<Views>,
    ) -> crate::Result<Markup> {
        let view = views.open(&slug).await?;
        if view.select(id) {
            debug!("{slug}: switched to {:?}", view.selection());
        }

        Ok(html! { (Discussion(&view.snapshot())) })
    }

    /// Name comes from the browser prompt; a cancelled prompt sends no header.
    pub async fn create_channel(
        Path(slug): Path<Slug>,
        views: State<Views>,
        headers: HeaderMap,
    ) -> crate::Result<Markup> {
        let name = headers
            .get(HX_PROMPT)
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default();

        let view = views.open(&slug).await?;
        match view.create_channel(name).await {
            Ok(_) => {}
            Err(e @ discussion::Error::_Channel(channel::Error::NotOwner)) => return Err(e.into()),
            // shown by the sidebar
            Err(e) => warn!("{slug}: {e}"),
        }

        Ok(html! { (Discussion(&view.snapshot())) })
    }

    #[derive(Deserialize)]
    pub struct TranscriptParams {
        channel: Option<channel::Id>,
        revision: Option<u64>,
    }

    /// `204` when the browser already shows the latest revision of the
    /// active channel.
    pub async fn transcript(
        Path(slug): Path<Slug>,
        views: State<Views>,
        Query(params): Query<TranscriptParams>,
    ) -> crate::Result<Response> {
        let view = views.open(&slug).await?;
        let snapshot = view.snapshot();

        let (Selection::ChannelSelected(channel_id), Some(transcript)) =
            (&snapshot.selection, &snapshot.transcript)
        else {
            return Ok(StatusCode::NO_CONTENT.into_response());
        };

        let unchanged = params.channel.as_ref() == Some(channel_id)
            && params.revision == Some(transcript.revision);
        if unchanged {
            return Ok(StatusCode::NO_CONTENT.into_response());
        }

        // switched elsewhere: replace the whole pane, not just the transcript
        if params.channel.as_ref() != Some(channel_id) {
            return Ok(([("HX-Retarget", message::markup::CHANNEL_PANE_TARGET)], html! {
                (ChannelPane(&snapshot))
            })
                .into_response());
        }

        Ok(html! {
            (TranscriptPane::new(
                &snapshot.group.slug,
                channel_id,
                transcript,
                snapshot.viewer.as_ref(),
                snapshot.refresh,
            ))
        }
        .into_response())
    }

    #[derive(Deserialize)]
    pub struct SendParams {
        #[serde(default)]
        text: String,
    }

    #[axum::debug_handler]
    pub async fn send_message(
        Path(slug): Path<Slug>,
        views: State<Views>,
        Form(params): Form<SendParams>,
    ) -> crate::Result<Markup> {
        let view = views.open(&slug).await?;

        view.set_input(params.text);
        match view.submit().await {
            Ok(_) => {}
            Err(e @ (message::Error::NoChannelSelected | message::Error::SendInProgress)) => {
                return Err(e.into());
            }
            // kept in the composer for retry
            Err(e) => warn!("{slug}: {e}"),
        }

        Ok(html! { (ChannelPane(&view.snapshot())) })
    }
}
