//! # fn-push Cloud Storage Uploads (`common::storage::gcs`)
//!
//! File: cli/src/common/storage/gcs.rs
//!
//! `GcsStore` performs a single-request media upload through the Cloud Storage
//! JSON API:
//!
//! ```text
//! POST {endpoint}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={key}
//! Authorization: Bearer {token}
//! ```
//!
//! The OAuth access token is supplied by the caller, typically from
//! `gcloud auth print-access-token` or a workload identity.
//!
use super::{ObjectStore, ZIP_CONTENT_TYPE};
use crate::core::error::{FnPushError, Result};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

/// Public Cloud Storage endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// Cloud Storage uploader.
pub struct GcsStore {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl GcsStore {
    pub fn new(access_token: &str) -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT, access_token)
    }

    /// Uploads to a different endpoint, e.g. a local emulator.
    pub fn with_endpoint(endpoint: &str, access_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fn-push/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for Cloud Storage")?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// Media upload URL for `bucket`, without the query string.
    pub fn upload_url(&self, bucket: &str) -> String {
        format!("{}/upload/storage/v1/b/{}/o", self.endpoint, bucket)
    }
}

#[async_trait]
impl ObjectStore for GcsStore {
    fn describe(&self, bucket: &str) -> String {
        format!("gs://{}", bucket)
    }

    async fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()> {
        let upload_error = |message: String| FnPushError::Upload {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message,
        };

        let url = self.upload_url(bucket);
        debug!("POST {} name={} ({} bytes)", url, key, data.len());
        let response = self
            .client
            .post(&url)
            .query(&[("uploadType", "media"), ("name", key)])
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, ZIP_CONTENT_TYPE)
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| upload_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upload_error(format!("HTTP {}: {}", status, body.trim())).into());
        }
        Ok(())
    }
}
