//! # fn-push Object Store Uploads (`common::storage`)
//!
//! File: cli/src/common/storage/mod.rs
//!
//! ## Overview
//!
//! Uploads finished archives to remote object stores. The packaging code never
//! sees this module; it hands over a byte buffer and a key and is done.
//!
//! ## Architecture
//!
//! - `ObjectStore`: a single `put_object` operation, object-safe via `async_trait`.
//! - **`s3`**: `S3Store`, one AWS SDK client bound to one region.
//! - **`gcs`**: `GcsStore`, a Cloud Storage JSON API media upload over `reqwest`.
//!
//! Uploads are not retried here. A failed upload is returned as
//! `FnPushError::Upload` and the command decides what to do with it.
//!
use crate::core::error::Result;
use async_trait::async_trait;
use tracing::info;

pub mod gcs;
pub mod s3;

/// Content type sent with every archive upload.
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Minimal "store an object" interface.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Short description used in log lines, e.g. `s3://bucket (eu-west-2)`.
    fn describe(&self, bucket: &str) -> String;

    /// Stores `data` under `key` in `bucket`, replacing any existing object.
    async fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()>;
}

/// Uploads every `(key, bytes)` pair to `bucket` through `store`, in order.
///
/// Stops at the first failure.
pub async fn upload_all(
    store: &dyn ObjectStore,
    bucket: &str,
    objects: &[(String, Vec<u8>)],
) -> Result<()> {
    for (key, data) in objects {
        store.put_object(bucket, key, data).await?;
        info!(
            "Uploaded {} ({} bytes) to {}",
            key,
            data.len(),
            store.describe(bucket)
        );
        println!("Successfully uploaded {} to {}", key, store.describe(bucket));
    }
    Ok(())
}
