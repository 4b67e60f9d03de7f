//! # fn-push S3 Uploads (`common::storage::s3`)
//!
//! File: cli/src/common/storage/s3.rs
//!
//! `S3Store` wraps an `aws_sdk_s3::Client` bound to a single region.
//! Credentials come from the default AWS provider chain (environment, shared
//! profile, SSO, instance metadata).
//!
use super::{ObjectStore, ZIP_CONTENT_TYPE};
use crate::core::error::{FnPushError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tracing::debug;

/// S3 uploader for one region.
pub struct S3Store {
    client: S3Client,
    region: String,
}

impl S3Store {
    /// Creates a client for `region` using the default credential chain.
    pub async fn new(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        debug!("Created S3 client for region {}", region);
        Self::from_client(S3Client::new(&sdk_config), region)
    }

    /// Wraps an existing client.
    pub fn from_client(client: S3Client, region: &str) -> Self {
        Self {
            client,
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn describe(&self, bucket: &str) -> String {
        format!("{} in {}", bucket, self.region)
    }

    async fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()> {
        debug!("PutObject s3://{}/{} ({} bytes)", bucket, key, data.len());
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(ZIP_CONTENT_TYPE)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|err| FnPushError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&err).to_string(),
            })?;
        Ok(())
    }
}
