use std::convert::Infallible;

use axum::{
    body::Body,
    response::{IntoResponse, IntoResponseParts, Response, ResponseParts},
};
use maud::{DOCTYPE, Markup, Render, html};
use reqwest::header::CONTENT_LENGTH;
use url::{Position, Url};

const TITLE: &str = "Wikinitt Community";
const ORIGIN: &str = "http://localhost/";

/// Root-relative link with every path segment and query value
/// percent-encoded.
pub fn href(segments: &[&str], query: &[(&str, &str)]) -> String {
    let mut url = Url::parse(ORIGIN).expect("origin should be a valid url");
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    url[Position::BeforePath..].to_owned()
}

struct Head<'a>(&'a str);

impl Render for Head<'_> {
    fn render(&self) -> Markup {
        html! {
            head {
                meta charset="utf-8" {}
                title { (self.0) }
                script src="https://unpkg.com/htmx.org@2.0.4" {}
                script src="https://unpkg.com/hyperscript.org@0.9.13" {}

                script src="https://unpkg.com/@tailwindcss/browser@4" {}
            }
        }
    }
}

struct Screen<'a>(&'a Markup);

impl Render for Screen<'_> {
    fn render(&self) -> Markup {
        html! {
            #screen
                ."max-w-4xl h-4/5 w-full"
                ."bg-white rounded-2xl"
                ."overflow-hidden"
            {
                (self.0)
            }
        }
    }
}

fn base(w: &Wrappable) -> Markup {
    html! {
        (DOCTYPE)
        html {
            (Head(TITLE))

            body ."h-screen bg-gray-900 flex items-center justify-center" {
                (Screen(&w.content))
            }
        }
    }
}

/// Page content that [`wrap_in_base`] places into the full document.
/// Fragments returned to htmx are left as they are.
#[derive(Clone)]
pub struct Wrappable {
    content: Markup,
}

impl Wrappable {
    pub fn new(content: impl Render) -> Self {
        Self {
            content: content.render(),
        }
    }
}

impl IntoResponseParts for Wrappable {
    type Error = Infallible;

    fn into_response_parts(
        self,
        mut res: ResponseParts,
    ) -> core::result::Result<ResponseParts, Self::Error> {
        res.extensions_mut().insert(self);
        Ok(res)
    }
}

impl IntoResponse for Wrappable {
    fn into_response(self) -> axum::response::Response {
        (self, ()).into_response()
    }
}

pub async fn wrap_in_base(mut resp: Response) -> impl IntoResponse {
    if let Some(w) = resp.extensions_mut().remove::<Wrappable>() {
        resp.headers_mut().remove(CONTENT_LENGTH);
        *resp.body_mut() = Body::new(base(&w).into_string());
        return resp;
    }

    resp
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_build_plain_href() {
        assert_eq!(
            href(
                &["c", "cs-club", "discussion", "transcript"],
                &[("channel", "c1"), ("revision", "4")]
            ),
            "/c/cs-club/discussion/transcript?channel=c1&revision=4"
        );
        assert_eq!(href(&["c", "cs-club", "discussion"], &[]), "/c/cs-club/discussion");
    }

    #[test]
    fn should_escape_reserved_characters_in_href() {
        assert_eq!(
            href(&["c", "a b#?/", "discussion"], &[("channel", "x&y#z?")]),
            "/c/a%20b%23%3F%2F/discussion?channel=x%26y%23z%3F"
        );
    }

    #[test]
    fn should_render_head() {
        let expected = concat!(
            "<head>",
            r#"<meta charset="utf-8"></meta>"#,
            "<title>Wikinitt Community</title>",
            r#"<script src="https://unpkg.com/htmx.org@2.0.4"></script>"#,
            r#"<script src="https://unpkg.com/hyperscript.org@0.9.13"></script>"#,
            r#"<script src="https://unpkg.com/@tailwindcss/browser@4"></script>"#,
            "</head>"
        );

        let actual = Head(TITLE).render().into_string();

        assert_eq!(actual, expected);
    }

    #[test]
    fn should_render_base() {
        let expected = concat!(
            "<!DOCTYPE html>",
            "<html>",
            "<head>",
            r#"<meta charset="utf-8"></meta>"#,
            "<title>Wikinitt Community</title>",
            r#"<script src="https://unpkg.com/htmx.org@2.0.4"></script>"#,
            r#"<script src="https://unpkg.com/hyperscript.org@0.9.13"></script>"#,
            r#"<script src="https://unpkg.com/@tailwindcss/browser@4"></script>"#,
            "</head>",
            r#"<body class="h-screen bg-gray-900 flex items-center justify-center">"#,
            r#"<div class="max-w-4xl h-4/5 w-full bg-white rounded-2xl overflow-hidden" id="screen">"#,
            r#"<p>CS Club</p>"#,
            "</div>",
            "</body>",
            "</html>"
        );

        let actual = base(&Wrappable::new(html! { p { "CS Club" } }))
            .render()
            .into_string();

        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn should_leave_fragments_unwrapped() {
        let resp = html! { p { "fragment" } }.into_response();

        let resp = wrap_in_base(resp).await.into_response();

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"<p>fragment</p>");
    }
}
