use std::time::Duration;

use maud::{Markup, Render, html};

use super::composer::Composer;
use super::model::{Message, Transcript};
use crate::group::Slug;
use crate::markup::href;
use crate::store::QueryState;
use crate::{channel, user};

pub const CHANNEL_PANE_ID: &str = "channel-pane";
pub const CHANNEL_PANE_TARGET: &str = "#channel-pane";
const TRANSCRIPT_ID: &str = "transcript";

/// Transcript of the active channel. Polls for a newer revision and is
/// swapped only when the message list changed.
pub struct TranscriptPane<'a> {
    slug: &'a Slug,
    channel_id: &'a channel::Id,
    transcript: &'a Transcript,
    viewer: Option<&'a user::Id>,
    refresh: Duration,
}

impl<'a> TranscriptPane<'a> {
    pub const fn new(
        slug: &'a Slug,
        channel_id: &'a channel::Id,
        transcript: &'a Transcript,
        viewer: Option<&'a user::Id>,
        refresh: Duration,
    ) -> Self {
        Self {
            slug,
            channel_id,
            transcript,
            viewer,
            refresh,
        }
    }

    fn url(&self) -> String {
        let revision = self.transcript.revision.to_string();
        href(
            &["c", self.slug.as_str(), "discussion", "transcript"],
            &[
                ("channel", self.channel_id.as_str()),
                ("revision", revision.as_str()),
            ],
        )
    }
}

impl Render for TranscriptPane<'_> {
    fn render(&self) -> Markup {
        let trigger = format!("every {}ms", self.refresh.as_millis());

        html! {
            div #(TRANSCRIPT_ID) ."flex-1 overflow-y-auto p-4 space-y-2"
                hx-get=(self.url())
                hx-trigger=(trigger)
                hx-swap="outerHTML"
            {
                @match &self.transcript.state {
                    QueryState::Loading => {
                        p ."text-gray-500" { "Loading messages..." }
                    },
                    QueryState::Error(e) => {
                        p ."text-red-600" { "Could not load messages: " (e) }
                    },
                    QueryState::Data(_) if self.transcript.is_empty() => {
                        p ."text-gray-500 text-center" { "No messages yet. Say hello!" }
                        (RefreshNote(self.transcript.error.as_deref()))
                    },
                    QueryState::Data(_) => {
                        @for msg in self.transcript.chronological() {
                            (MessageItem {
                                msg,
                                own: self.viewer == Some(&msg.sender.id),
                            })
                        }
                        (RefreshNote(self.transcript.error.as_deref()))
                        // re-rendered only when the list or the note changed
                        div #transcript-end _="init call me.scrollIntoView()" {}
                    },
                }
            }
        }
    }
}

/// Shown under cached messages when the latest poll failed.
struct RefreshNote<'a>(Option<&'a str>);

impl Render for RefreshNote<'_> {
    fn render(&self) -> Markup {
        html! {
            @if let Some(e) = self.0 {
                p .refresh-error ."text-xs text-amber-600 text-center" {
                    "Could not refresh messages: " (e) ". Retrying..."
                }
            }
        }
    }
}

struct MessageItem<'a> {
    msg: &'a Message,
    own: bool,
}

impl Render for MessageItem<'_> {
    fn render(&self) -> Markup {
        let msg = self.msg;

        html! {
            div .message-item
                id={"m-" (msg.id.to_string())}
                ."flex items-start gap-2"
                ."flex-row-reverse"[self.own]
            {
                (Avatar(&msg.sender))

                div .message-bubble
                    ."rounded-lg p-2 max-w-xs"
                    ."bg-blue-600 text-white"[self.own]
                    ."bg-gray-200 text-gray-800"[!self.own]
                {
                    p ."text-xs font-semibold" { (msg.sender.name) }
                    p .message-text ."whitespace-pre-wrap" { (msg.content) }
                    span .message-timestamp ."text-xs opacity-70" {
                        (msg.created_at.format("%H:%M").to_string())
                    }
                }
            }
        }
    }
}

struct Avatar<'a>(&'a user::model::User);

impl Render for Avatar<'_> {
    fn render(&self) -> Markup {
        html! {
            @if let Some(src) = &self.0.avatar {
                img ."w-8 h-8 rounded-full" src=(src) alt=(self.0.name) {}
            } @else {
                div ."w-8 h-8 rounded-full bg-gray-400 text-white flex items-center justify-center" {
                    (self.0.initial())
                }
            }
        }
    }
}

pub struct ComposerForm<'a> {
    slug: &'a Slug,
    composer: &'a Composer,
}

impl<'a> ComposerForm<'a> {
    pub const fn new(slug: &'a Slug, composer: &'a Composer) -> Self {
        Self { slug, composer }
    }
}

impl Render for ComposerForm<'_> {
    fn render(&self) -> Markup {
        let pending = self.composer.state().is_pending();

        html! {
            form #composer
                ."border-t border-gray-200 p-2"
                hx-post=(href(&["c", self.slug.as_str(), "discussion", "messages"], &[]))
                hx-target=(CHANNEL_PANE_TARGET)
                hx-swap="outerHTML"
                hx-disabled-elt="find input[type='submit']"
            {
                @if let Some(e) = self.composer.state().error() {
                    p ."text-red-600 text-sm mb-1" { "Could not send: " (e) ". Press Send to retry." }
                }

                div ."flex" {
                    input ."border border-gray-300 rounded-l-md p-2 flex-1"
                        type="text"
                        name="text"
                        value=(self.composer.input())
                        placeholder="Type your message..."
                        autocomplete="off"
                        required
                        pattern=r".*\S.*"
                        disabled[pending] {}

                    input ."bg-blue-600 text-white px-4 rounded-r-md cursor-pointer"
                        type="submit"
                        value="Send"
                        disabled[pending] {}
                }
            }
        }
    }
}
