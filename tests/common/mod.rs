//! Throwaway GraphQL backend for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

#[derive(Clone, Debug)]
pub struct Recorded {
    pub operation: String,
    pub authorization: Option<String>,
    pub variables: Value,
}

#[derive(Clone, Debug)]
pub enum Canned {
    Status(StatusCode),
    Errors(String),
    NoData,
}

struct Fixture {
    viewer: String,
    channels: Vec<(String, String)>,
    /// (channel id, message), oldest first
    messages: Vec<(String, Value)>,
    requests: Vec<Recorded>,
    canned: Option<Canned>,
}

#[derive(Clone)]
pub struct StandIn {
    url: Url,
    fixture: Arc<Mutex<Fixture>>,
}

impl StandIn {
    /// Serves one group, `cs-club`, owned by `owner` with a `general`
    /// channel, plus `secret` which the viewer is not a member of.
    pub async fn start(viewer: &str) -> Self {
        let fixture = Arc::new(Mutex::new(Fixture {
            viewer: viewer.to_owned(),
            channels: vec![("c1".into(), "general".into())],
            messages: vec![],
            requests: vec![],
            canned: None,
        }));

        let app = Router::new()
            .route("/query", post(query))
            .with_state(fixture.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        Self {
            url: Url::parse(&format!("http://{addr}/query")).unwrap(),
            fixture,
        }
    }

    pub fn url(&self) -> Url {
        self.url.clone()
    }

    pub fn add_message(&self, channel_id: &str, sender: &str, content: &str) {
        let mut f = self.fixture.lock().unwrap();
        let n = f.messages.len() as i64 + 1;
        let message = json!({
            "id": format!("m{n}"),
            "content": content,
            "createdAt": (Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap() + Duration::minutes(n)).to_rfc3339(),
            "sender": { "id": sender, "name": sender, "avatar": null },
        });
        f.messages.push((channel_id.to_owned(), message));
    }

    pub fn respond_with(&self, canned: Canned) {
        self.fixture.lock().unwrap().canned = Some(canned);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.fixture.lock().unwrap().requests.clone()
    }

    pub fn requests_of(&self, operation: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.operation == operation)
            .collect()
    }
}

fn operation(document: &str) -> String {
    ["GetGroupBySlug", "GetDiscussion", "GetChannelMessages", "SendMessage", "CreateChannel", "Me"]
        .into_iter()
        .find(|op| document.contains(op))
        .unwrap_or("unknown")
        .to_owned()
}

async fn query(
    State(fixture): State<Arc<Mutex<Fixture>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut f = fixture.lock().unwrap();

    let operation = operation(body["query"].as_str().unwrap_or_default());
    let variables = body["variables"].clone();
    f.requests.push(Recorded {
        operation: operation.clone(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::to_owned),
        variables: variables.clone(),
    });

    match f.canned.clone() {
        Some(Canned::Status(status)) => return status.into_response(),
        Some(Canned::Errors(message)) => {
            return Json(json!({ "data": null, "errors": [{ "message": message }] })).into_response();
        }
        Some(Canned::NoData) => return Json(json!({})).into_response(),
        None => {}
    }

    let data = match operation.as_str() {
        "Me" => json!({ "me": { "id": f.viewer, "name": f.viewer, "avatar": null } }),
        "GetGroupBySlug" => match variables["slug"].as_str() {
            Some("cs-club") => json!({ "group": {
                "id": "g1", "name": "CS Club", "slug": "cs-club",
                "isMember": true, "owner": { "id": "owner" },
            }}),
            Some("secret") => json!({ "group": {
                "id": "g2", "name": "Secret", "slug": "secret",
                "isMember": false, "owner": { "id": "owner" },
            }}),
            _ => json!({ "group": null }),
        },
        "GetDiscussion" => {
            let channels: Vec<Value> = f
                .channels
                .iter()
                .map(|(id, name)| json!({ "id": id, "name": name, "type": "TEXT" }))
                .collect();
            json!({ "discussion": { "id": "d1", "channels": channels } })
        }
        "GetChannelMessages" => {
            let channel_id = variables["channelId"].as_str().unwrap_or_default();
            let limit = variables["limit"].as_u64().unwrap_or(50) as usize;
            let messages: Vec<Value> = f
                .messages
                .iter()
                .rev()
                .filter(|(c, _)| c == channel_id)
                .map(|(_, m)| m.clone())
                .take(limit)
                .collect();
            json!({ "channel": { "id": channel_id, "messages": messages } })
        }
        "SendMessage" => {
            let input = &variables["input"];
            let channel_id = input["channelId"].as_str().unwrap_or_default().to_owned();
            let n = f.messages.len() + 1;
            let message = json!({
                "id": format!("m{n}"),
                "content": input["content"],
                "createdAt": Utc::now().to_rfc3339(),
                "sender": { "id": f.viewer, "name": f.viewer, "avatar": null },
            });
            f.messages.push((channel_id, message));
            json!({ "sendMessage": { "id": format!("m{n}") } })
        }
        "CreateChannel" => {
            let id = format!("c{}", f.channels.len() + 1);
            let name = variables["input"]["name"].as_str().unwrap_or_default().to_owned();
            f.channels.push((id.clone(), name));
            json!({ "createChannel": { "id": id } })
        }
        _ => return (StatusCode::BAD_REQUEST, "unknown operation").into_response(),
    };

    Json(json!({ "data": data })).into_response()
}
