//! Hosted document collection backend (Firestore REST API v1).
//!
//! Each RSVP is its own document; Firestore assigns the id. Listing runs a
//! structured query ordered by `submittedAt` descending. No document is ever
//! shared between writers, so concurrent submissions cannot lose updates.

mod value;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::FirestoreConfig;
use crate::error::{RsvpError, RsvpResult};
use crate::rsvp::Rsvp;
use crate::store::RsvpStore;

use self::value::Document;

pub struct FirestoreStore {
    http: reqwest::Client,
    config: FirestoreConfig,
}

/// One row of a `runQuery` response. Rows without a document only carry a
/// read time (an empty collection yields exactly one of those).
#[derive(Deserialize)]
struct QueryRow {
    #[serde(default)]
    document: Option<Document>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> RsvpResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(FirestoreStore { http, config })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id,
            self.config.database
        )
    }

    fn post(&self, url: String) -> reqwest::RequestBuilder {
        let mut request = self.http.post(url);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key)]);
        }
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> RsvpResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) if !body.error.status.is_empty() => {
                format!("{} {}", body.error.status, body.error.message)
            }
            Ok(body) => body.error.message,
            Err(_) => text,
        };

        Err(RsvpError::Storage(format!(
            "Firestore returned {}: {}",
            status.as_u16(),
            detail.trim()
        )))
    }
}

#[async_trait]
impl RsvpStore for FirestoreStore {
    async fn list_all(&self) -> RsvpResult<Vec<Rsvp>> {
        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.config.collection }],
                "orderBy": [{
                    "field": { "fieldPath": "submittedAt" },
                    "direction": "DESCENDING"
                }]
            }
        });

        let url = format!("{}:runQuery", self.documents_url());
        let rows: Vec<QueryRow> = self
            .send(self.post(url).json(&query))
            .await?
            .json()
            .await?;

        rows.iter()
            .filter_map(|row| row.document.as_ref())
            .map(value::decode)
            .collect()
    }

    async fn append(&self, rsvp: Rsvp) -> RsvpResult<Rsvp> {
        let url = format!("{}/{}", self.documents_url(), self.config.collection);
        let created: Document = self
            .send(self.post(url).json(&value::encode(&rsvp)))
            .await?
            .json()
            .await?;

        let stored = value::decode(&created)?;
        tracing::debug!(id = ?stored.id, "created Firestore document");
        Ok(stored)
    }

    fn backend_name(&self) -> &'static str {
        "firestore"
    }
}
