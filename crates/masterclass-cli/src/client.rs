//! HTTP client for the content API.
//!
//! [`ContentClient`] implements [`ContentSource`] against a remote server, so
//! the landing and admin views run unchanged in the terminal.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use masterclass_core::document::ContentDocument;
use masterclass_core::error::ContentError;
use masterclass_core::source::ContentSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ContentClient {
    http: reqwest::Client,
    url: String,
    token: Option<String>,
}

/// Error body the server sends with non-success statuses.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ContentClient {
    pub fn new(addr: &str, prefix: &str, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            url: content_url(addr, prefix),
            token,
        })
    }

    /// Full URL of the content document endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

#[async_trait]
impl ContentSource for ContentClient {
    async fn fetch_document(&self) -> Result<ContentDocument, ContentError> {
        let resp = self
            .authorize(self.http.get(&self.url))
            .send()
            .await
            .map_err(transport)?;
        let resp = check_status(resp).await?;
        resp.json::<ContentDocument>()
            .await
            .map_err(|e| ContentError::Decode {
                reason: e.to_string(),
            })
    }

    async fn save_document(&self, document: &ContentDocument) -> Result<(), ContentError> {
        let resp = self
            .authorize(self.http.post(&self.url))
            .json(document)
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).await?;
        Ok(())
    }
}

fn transport(e: reqwest::Error) -> ContentError {
    ContentError::Transport {
        reason: e.to_string(),
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ContentError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);
    Err(ContentError::Status {
        status: status.as_u16(),
        message,
    })
}

fn content_url(addr: &str, prefix: &str) -> String {
    let addr = addr.trim_end_matches('/');
    let prefix = prefix.trim().trim_matches('/');
    if prefix.is_empty() {
        format!("{addr}/masterclass-data")
    } else {
        format!("{addr}/{prefix}/masterclass-data")
    }
}
