use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::debug;

use super::ObjectStore;
use crate::error::BrowseError;
use crate::providers::{ProviderConfig, create_s3_client};
use crate::vfs::ObjectEntry;

/// Wrapper around AWS S3 client
pub struct S3Client {
    client: Client,
}

impl S3Client {
    /// Create a new S3 client from a provider configuration
    pub async fn new(config: ProviderConfig) -> Result<Self> {
        let client = create_s3_client(config).await?;
        Ok(S3Client { client })
    }

    /// Wrap an already configured SDK client
    pub fn from_client(client: Client) -> Self {
        S3Client { client }
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> Result<Vec<ObjectEntry>, BrowseError> {
        let mut entries = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut req = self.client.list_objects_v2().bucket(bucket);

            if !prefix.is_empty() {
                req = req.prefix(prefix);
            }

            if let Some(token) = continuation.take() {
                req = req.continuation_token(token);
            }

            let resp = req
                .send()
                .await
                .map_err(|e| BrowseError::unavailable(DisplayErrorContext(&e)))?;

            entries.extend(resp.contents().iter().map(|obj| ObjectEntry {
                key: obj.key().unwrap_or("").to_string(),
                size: obj.size().unwrap_or(0).max(0) as u64,
                last_modified: obj.last_modified().and_then(|d| {
                    d.fmt(aws_sdk_s3::primitives::DateTimeFormat::DateTime).ok()
                }),
            }));

            match resp.next_continuation_token() {
                Some(token) if resp.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        debug!(bucket, prefix, count = entries.len(), "listed objects");
        Ok(entries)
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), BrowseError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| BrowseError::unavailable(DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, BrowseError> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| BrowseError::unavailable(DisplayErrorContext(&e)))?;

        let bytes = resp
            .body
            .collect()
            .await
            .map_err(|e| BrowseError::unavailable(format!("failed to read object body: {e}")))?
            .into_bytes();

        Ok(bytes)
    }
}
