//! HTTP client for communicating with rsvp-server

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use rsvp_core::{NewRsvp, Rsvp};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for rsvp-server
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

// Response types matching server API

#[derive(Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: Option<String>,
    pub rsvp: Rsvp,
}

#[derive(Deserialize)]
pub struct DietaryOption {
    pub value: String,
    pub label: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub address: String,
    pub map_link: String,
    pub menu: Vec<String>,
    pub dietary_options: Vec<DietaryOption>,
}

#[derive(Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET /api/rsvp
    pub async fn list_rsvps(&self) -> Result<Vec<Rsvp>> {
        let resp = self
            .http
            .get(format!("{}/api/rsvp", self.base_url))
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.base_url))?;

        Ok(check(resp).await?.json().await?)
    }

    /// POST /api/rsvp
    pub async fn submit_rsvp(&self, rsvp: &NewRsvp) -> Result<CreatedResponse> {
        let resp = self
            .http
            .post(format!("{}/api/rsvp", self.base_url))
            .json(rsvp)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.base_url))?;

        Ok(check(resp).await?.json().await?)
    }

    /// GET /api/event
    pub async fn event(&self) -> Result<EventInfo> {
        let resp = self
            .http
            .get(format!("{}/api/event", self.base_url))
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.base_url))?;

        Ok(check(resp).await?.json().await?)
    }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    match resp.json::<ErrorResponse>().await {
        Ok(err) => anyhow::bail!("{}", err.message),
        Err(_) => anyhow::bail!("Server returned {}", status),
    }
}
