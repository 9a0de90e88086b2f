//! Object store adapter implementation over the S3 SDK.

use std::time::Duration;

use aws_sdk_s3::Client;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use promo_shared::StorageConfig;

use super::error::StorageError;

/// Bucket holding all promo images.
pub const BUCKET: &str = "promo-images";

/// Validity window for presigned download URLs.
const PRESIGN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Attempt ceiling for the startup bucket check.
const BUCKET_INIT_ATTEMPTS: u32 = 30;

/// Pause between startup bucket check attempts.
const BUCKET_INIT_DELAY: Duration = Duration::from_secs(2);

/// Object store adapter for promo images.
///
/// The client connection is independent per call and may be shared
/// read-only across concurrent requests.
pub struct ImageStore {
    client: Client,
    internal_endpoint: String,
    external_endpoint: String,
}

impl ImageStore {
    /// Build the adapter from configuration. Never touches the network.
    ///
    /// SDK-internal retries are disabled: per-request storage operations are
    /// never retried, only the one-time startup bucket check is.
    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "promo-static",
        );

        // MinIO requires path-style addressing.
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(&config.internal_endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .retry_config(RetryConfig::disabled())
            .build();

        Self {
            client: Client::from_conf(s3_config),
            internal_endpoint: config.internal_endpoint.clone(),
            external_endpoint: config.external_endpoint.clone(),
        }
    }

    /// Ensure the bucket exists, creating it if absent, with the default
    /// retry budget (30 attempts, 2 seconds apart).
    ///
    /// The object store may start after this service in a multi-container
    /// deployment; the bounded retry absorbs that ordering race. The caller
    /// must treat an error as fatal and refuse to start.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BucketUnavailable`] once the budget is spent.
    pub async fn ensure_bucket(&self) -> Result<(), StorageError> {
        self.ensure_bucket_with(BUCKET_INIT_ATTEMPTS, BUCKET_INIT_DELAY)
            .await
    }

    /// [`Self::ensure_bucket`] with an explicit retry budget, so tests can
    /// exhaust it without waiting out the real one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BucketUnavailable`] once the budget is spent.
    pub async fn ensure_bucket_with(
        &self,
        attempts: u32,
        delay: Duration,
    ) -> Result<(), StorageError> {
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match self.check_or_create_bucket().await {
                Ok(created) => {
                    if created {
                        info!(bucket = BUCKET, "bucket created");
                    } else {
                        info!(bucket = BUCKET, "bucket already exists");
                    }
                    return Ok(());
                }
                Err(err) => {
                    warn!(
                        attempt,
                        max_attempts = attempts,
                        error = %err,
                        "object store not ready"
                    );
                    last_error = err.to_string();
                    if attempt < attempts {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(StorageError::BucketUnavailable {
            attempts,
            message: last_error,
        })
    }

    /// One bucket check-or-create round. Returns whether the bucket was
    /// created by this call.
    async fn check_or_create_bucket(&self) -> Result<bool, StorageError> {
        match self.client.head_bucket().bucket(BUCKET).send().await {
            Ok(_) => Ok(false),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(HeadBucketError::is_not_found) =>
            {
                self.client
                    .create_bucket()
                    .bucket(BUCKET)
                    .send()
                    .await
                    .map_err(|e| operation_error("create bucket", &e))?;
                Ok(true)
            }
            Err(err) => Err(operation_error("check bucket", &err)),
        }
    }

    /// Store image bytes under a fresh identifier and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying write fails. No identifier is
    /// issued in that case.
    pub async fn store(&self, bytes: Bytes, content_type: &str) -> Result<String, StorageError> {
        let image_id = Uuid::new_v4().to_string();
        let key = object_key(&image_id, content_type);

        self.client
            .put_object()
            .bucket(BUCKET)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| operation_error("put object", &e))?;

        Ok(image_id)
    }

    /// Presigned download URL for a stored image, valid for 24 hours, with
    /// the internal endpoint rewritten to the externally reachable one.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub async fn presigned_url(
        &self,
        image_id: &str,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let key = object_key(image_id, content_type);

        let presign_config = PresigningConfig::expires_in(PRESIGN_TTL)
            .map_err(|e| StorageError::operation(format!("presign config: {e}")))?;

        let presigned = self
            .client
            .get_object()
            .bucket(BUCKET)
            .key(&key)
            .presigned(presign_config)
            .await
            .map_err(|e| operation_error("presign object", &e))?;

        Ok(rewrite_endpoint(
            presigned.uri(),
            &self.internal_endpoint,
            &self.external_endpoint,
        ))
    }

    /// Fetch the full content of a stored image.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the object is missing, or an
    /// operation error for any other read failure.
    pub async fn fetch_bytes(
        &self,
        image_id: &str,
        content_type: &str,
    ) -> Result<Vec<u8>, StorageError> {
        let key = object_key(image_id, content_type);

        let output = self
            .client
            .get_object()
            .bucket(BUCKET)
            .key(&key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    StorageError::not_found(&key)
                } else {
                    operation_error("get object", &err)
                }
            })?;

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::operation(format!("read object body: {e}")))?;

        Ok(data.into_bytes().to_vec())
    }
}

/// Storage key for an image: `{image_id}.{extension}`.
///
/// Both the write and read sides derive the key through this function from
/// the content type recorded at upload time, so the keys always match.
#[must_use]
pub fn object_key(image_id: &str, content_type: &str) -> String {
    format!("{image_id}.{}", extension_for(content_type))
}

/// File extension for an image content type. Unknown types fall back to jpg.
fn extension_for(content_type: &str) -> &'static str {
    match content_type.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

/// Rewrite a presigned URL's internal endpoint to the external one.
///
/// Only a leading prefix match is replaced, so the swap can touch nothing
/// but the scheme and authority; the signed path and query survive intact.
/// URLs that do not start with the internal endpoint pass through unchanged.
fn rewrite_endpoint(url: &str, internal: &str, external: &str) -> String {
    match url.strip_prefix(internal) {
        Some(rest) => format!("{external}{rest}"),
        None => url.to_string(),
    }
}

/// Format an SDK error with its full source chain.
fn operation_error<E>(operation: &str, err: &E) -> StorageError
where
    E: std::error::Error,
{
    StorageError::operation(format!("{operation}: {}", DisplayErrorContext(err)))
}
