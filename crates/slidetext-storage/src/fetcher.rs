//! S3/MinIO document fetching.

use crate::{FetchError, FetchResult};
use aws_sdk_s3::{
    config::{Credentials, Region},
    Client,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// S3/MinIO configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// S3 bucket name
    pub bucket: String,

    /// AWS region (e.g., "us-west-2") or "us-east-1" for `MinIO`
    pub region: String,

    /// S3 endpoint (custom for `MinIO`, empty for AWS S3)
    pub endpoint: Option<String>,

    /// AWS access key ID
    pub access_key_id: String,

    /// AWS secret access key
    pub secret_access_key: String,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: std::env::var("S3_BUCKET_NAME").unwrap_or_default(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-west-2".to_string()),
            endpoint: std::env::var("S3_ENDPOINT").ok(),
            access_key_id: std::env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
        }
    }
}

/// Fetching presentation documents from object storage.
#[async_trait::async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Retrieve a document as bytes.
    async fn fetch(&self, key: &str) -> FetchResult<Vec<u8>>;
}

/// S3/MinIO-backed document fetcher.
pub struct S3DocumentFetcher {
    client: Client,
    bucket: String,
}

impl S3DocumentFetcher {
    /// Create a new S3 document fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::S3Error`] when the configuration names no
    /// bucket.
    pub fn new(config: S3Config) -> FetchResult<Self> {
        if config.bucket.is_empty() {
            return Err(FetchError::S3Error(
                "No S3 bucket configured (set S3_BUCKET_NAME)".to_string(),
            ));
        }

        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "slidetext-storage",
        );

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .behavior_version_latest();

        // Set custom endpoint for MinIO
        if let Some(endpoint) = config.endpoint {
            s3_config_builder = s3_config_builder
                .endpoint_url(endpoint)
                .force_path_style(true); // Required for MinIO
        }

        let client = Client::from_conf(s3_config_builder.build());

        Ok(Self {
            client,
            bucket: config.bucket,
        })
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for S3DocumentFetcher {
    async fn fetch(&self, key: &str) -> FetchResult<Vec<u8>> {
        debug!("Fetching s3://{}/{key}", self.bucket);

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.to_string().contains("NoSuchKey") {
                    FetchError::NotFound(key.to_string())
                } else {
                    FetchError::S3Error(e.to_string())
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| FetchError::S3Error(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
