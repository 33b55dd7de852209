//! AWS S3 object store.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tracing::{debug, info};

use crate::error::{EtlError, Result};
use crate::traits::store::ObjectStore;

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the default AWS credential/region chain.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        info!(bucket = %bucket, "Initializing S3 client");
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(S3Client::new(&config), bucket)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .map_err(EtlError::storage)?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|obj| obj.key().map(str::to_string)),
            );

            if response.is_truncated().unwrap_or(false) {
                continuation_token = response.next_continuation_token().map(str::to_string);
                if continuation_token.is_none() {
                    break;
                }
            } else {
                break;
            }
        }

        keys.sort();
        debug!(prefix, count = keys.len(), "Listed S3 objects");
        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let missing = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    EtlError::NotFound {
                        key: key.to_string(),
                    }
                } else {
                    EtlError::storage(e)
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(EtlError::storage)?
            .into_bytes();

        debug!(
            "Downloaded {} bytes from s3://{}/{}",
            bytes.len(),
            self.bucket,
            key
        );
        Ok(bytes.to_vec())
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> Result<()> {
        let len = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(EtlError::storage)?;

        debug!("Uploaded {} bytes to s3://{}/{}", len, self.bucket, key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(EtlError::storage)?;
        Ok(())
    }
}
