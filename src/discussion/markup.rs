use maud::{Markup, Render, html};

use super::view::Snapshot;
use crate::channel::model::Channel;
use crate::channel::selector::Selection;
use crate::group::Slug;
use crate::markup::href;
use crate::message::markup::{CHANNEL_PANE_ID, ComposerForm, TranscriptPane};
use crate::store::QueryState;

const DISCUSSION_ID: &str = "discussion";
pub const DISCUSSION_TARGET: &str = "#discussion";

/// Full page body: group header above the discussion.
pub struct DiscussionPage<'a>(pub &'a Snapshot);

impl Render for DiscussionPage<'_> {
    fn render(&self) -> Markup {
        html! {
            div ."flex flex-col h-full" {
                header ."flex justify-between items-center px-4 py-3 border-b border-gray-200" {
                    h2 ."text-2xl" { (self.0.group.name) }
                    span ."text-sm text-gray-500" { "Discussion" }
                }

                (Discussion(self.0))
            }
        }
    }
}

/// Channel sidebar next to the active channel. Every discussion action
/// swaps this element as a whole.
pub struct Discussion<'a>(pub &'a Snapshot);

impl Render for Discussion<'_> {
    fn render(&self) -> Markup {
        let s = self.0;
        let slug = &s.group.slug;

        html! {
            div #(DISCUSSION_ID) ."flex flex-1 min-h-0" {
                @match &s.discussion {
                    QueryState::Loading => {
                        p ."m-auto text-gray-500" { "Loading channels..." }
                    },
                    QueryState::Error(e) => {
                        div ."m-auto text-center" {
                            p ."text-red-600 mb-2" { "Could not load channels: " (e) }
                            (ReloadButton(slug))
                        }
                    },
                    QueryState::Data(d) => {
                        aside ."w-48 border-r border-gray-200 p-2 flex flex-col" {
                            (ChannelList {
                                slug,
                                channels: &d.channels,
                                selection: &s.selection,
                            })

                            @if s.is_owner {
                                (CreateChannelButton(slug))

                                @if let Some(e) = s.creation.error() {
                                    p ."text-red-600 text-sm mt-1" { "Could not create channel: " (e) }
                                }
                            }
                        }

                        (ChannelPane(s))
                    },
                }
            }
        }
    }
}

struct ReloadButton<'a>(&'a Slug);

impl Render for ReloadButton<'_> {
    fn render(&self) -> Markup {
        html! {
            button ."px-4 py-2 rounded bg-blue-500 hover:bg-blue-400 text-white cursor-pointer"
                hx-post=(href(&["c", self.0.as_str(), "discussion", "reload"], &[]))
                hx-target=(DISCUSSION_TARGET)
                hx-swap="outerHTML"
            { "Retry" }
        }
    }
}

struct ChannelList<'a> {
    slug: &'a Slug,
    channels: &'a [Channel],
    selection: &'a Selection,
}

impl Render for ChannelList<'_> {
    fn render(&self) -> Markup {
        html! {
            nav #channel-list ."flex flex-col space-y-1 flex-1 overflow-y-auto" {
                @for c in self.channels {
                    @let active = matches!(self.selection, Selection::ChannelSelected(id) if id == &c.id);
                    button ."text-left px-2 py-1 rounded hover:bg-gray-200 cursor-pointer"
                        .bg-gray-100[active]
                        .font-semibold[active]
                        hx-post=(href(&["c", self.slug.as_str(), "discussion", "channels", c.id.as_str()], &[]))
                        hx-target=(DISCUSSION_TARGET)
                        hx-swap="outerHTML"
                        aria-current=[active.then_some("true")]
                    {
                        "# " (c.name)
                    }
                }
            }
        }
    }
}

struct CreateChannelButton<'a>(&'a Slug);

impl Render for CreateChannelButton<'_> {
    fn render(&self) -> Markup {
        html! {
            button #create-channel
                ."mt-2 px-2 py-1 rounded text-white font-bold bg-blue-500 hover:bg-blue-400 cursor-pointer"
                hx-post=(href(&["c", self.0.as_str(), "discussion", "channels"], &[]))
                hx-prompt="Channel name"
                hx-target=(DISCUSSION_TARGET)
                hx-swap="outerHTML"
            { "+ New channel" }
        }
    }
}

/// Transcript and input box of the active channel.
pub struct ChannelPane<'a>(pub &'a Snapshot);

impl Render for ChannelPane<'_> {
    fn render(&self) -> Markup {
        let s = self.0;

        html! {
            section #(CHANNEL_PANE_ID) ."flex flex-col flex-1 min-w-0" {
                @match (&s.selection, &s.transcript) {
                    (Selection::ChannelSelected(id), Some(t)) => {
                        @if let Some(c) = s.discussion.data().and_then(|d| d.channel(id)) {
                            h3 ."px-4 py-2 font-semibold border-b border-gray-200" { "# " (c.name) }
                        }
                        (TranscriptPane::new(&s.group.slug, id, t, s.viewer.as_ref(), s.refresh))
                        (ComposerForm::new(&s.group.slug, &s.composer))
                    },
                    (Selection::NoChannelSelected, _) => {
                        p ."m-auto text-gray-500" {
                            @if s.is_owner { "No channels yet. Create the first one." }
                            @else { "No channels yet." }
                        }
                    },
                    _ => {
                        p ."m-auto text-gray-500" { "Select a channel" }
                    },
                }
            }
        }
    }
}
