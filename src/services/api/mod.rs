//! REST client for the Strapi backend.
//!
//! Strapi wraps every payload in a `{ "data": … }` envelope, both on
//! responses and on mutation request bodies. The traits in the submodules
//! are the seams the scheduling core depends on; [`StrapiClient`] is the
//! production implementation.

pub mod channels;
pub mod schedule;

pub use channels::ChannelApi;
pub use schedule::{CreateScheduledPost, ScheduleApi};

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
}

/// Strapi collection response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    pub data: Vec<T>,
}

/// Strapi single-entity response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemEnvelope<T> {
    pub data: T,
}

/// Strapi mutation request body envelope.
#[derive(Debug, Serialize)]
pub(crate) struct BodyEnvelope<T> {
    pub data: T,
}

/// HTTP client bound to one Strapi instance.
pub struct StrapiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl StrapiClient {
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(self.endpoint(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.post(self.endpoint(path)))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.put(self.endpoint(path)))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.delete(self.endpoint(path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Check the HTTP status and deserialize the body.
    pub(crate) async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}
