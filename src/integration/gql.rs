//! Minimal GraphQL-over-HTTP client for the community backend.

use std::env;

use log::debug;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::integration;
use crate::session::Token;

const DEFAULT_ENDPOINT: &str = "http://localhost:8080/query";

#[derive(Clone, Debug)]
pub struct Config {
    url: Url,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint should be a valid url"),
        }
    }
}

impl Config {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn env() -> super::Result<Self> {
        let url = env::var("GRAPHQL_API_URL")?;
        Ok(Self {
            url: Url::parse(&url)?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[derive(Serialize)]
struct Request<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct Response<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<ResponseError>,
}

#[derive(Deserialize)]
struct ResponseError {
    message: String,
}

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    url: Url,
}

impl Client {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            url: config.url.clone(),
        }
    }

    /// Posts `document` with `variables`, attaching the bearer token when present.
    pub async fn request<V, D>(
        &self,
        token: Option<&Token>,
        document: &str,
        variables: V,
    ) -> super::Result<D>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        debug!("graphql request: {}", operation_name(document));

        let mut req = self.http.post(self.url.clone()).json(&Request {
            query: document,
            variables,
        });
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, token.bearer());
        }

        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(integration::Error::Status(status));
        }

        let body = res.json::<Response<D>>().await?;
        if !body.errors.is_empty() {
            return Err(integration::Error::Graphql(
                body.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        body.data.ok_or(integration::Error::MissingData)
    }
}

fn operation_name(document: &str) -> &str {
    let mut words = document.split_whitespace();
    match words.next() {
        Some("query" | "mutation") => words
            .next()
            .and_then(|name| name.split(['(', '{']).next())
            .filter(|name| !name.is_empty())
            .unwrap_or("anonymous"),
        _ => "anonymous",
    }
}
