//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from cs-core.

use std::path::Path;

use async_trait::async_trait;

use cs_core::{Error, FileEntry, ListPage, ObjectStore, Result};

use crate::provider::Provider;

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client for the given provider and credentials.
    ///
    /// Credentials are passed through opaquely from the CLI layer; no
    /// ambient credential chain is consulted.
    pub async fn new(
        provider: &Provider,
        region: Option<&str>,
        username: &str,
        api_key: &str,
    ) -> Result<Self> {
        let region = region.unwrap_or(provider.default_region()).to_string();

        let credentials = aws_credential_types::Credentials::new(
            username,
            api_key,
            None, // session token
            None, // expiry
            "csync-static-credentials",
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(region.clone()));

        if let Some(endpoint) = provider.endpoint(&region) {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(provider.force_path_style())
            .build();

        tracing::debug!(%provider, %region, "S3 client configured");

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

/// Map an SDK error string to the cs-core error taxonomy
fn classify(err: impl std::fmt::Display, what: &str) -> Error {
    let err_str = err.to_string();
    if err_str.contains("NotFound")
        || err_str.contains("NoSuchKey")
        || err_str.contains("NoSuchBucket")
    {
        Error::NotFound(what.to_string())
    } else if err_str.contains("AccessDenied")
        || err_str.contains("InvalidAccessKeyId")
        || err_str.contains("SignatureDoesNotMatch")
        || err_str.contains("Forbidden")
    {
        Error::Auth(err_str)
    } else {
        Error::Network(err_str)
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn container_exists(&self, container: &str) -> Result<bool> {
        match self.inner.head_bucket().bucket(container).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let err_str = e.to_string();
                if err_str.contains("NotFound") || err_str.contains("NoSuchBucket") {
                    Ok(false)
                } else {
                    Err(classify(e, container))
                }
            }
        }
    }

    async fn list_page(&self, container: &str, token: Option<String>) -> Result<ListPage> {
        let response = self
            .inner
            .list_objects_v2()
            .bucket(container)
            .set_continuation_token(token)
            .send()
            .await
            .map_err(|e| classify(e, container))?;

        let entries = response
            .contents()
            .iter()
            .filter_map(|object| {
                let key = object.key()?.to_string();
                let size = object.size().unwrap_or(0);
                let modified = object
                    .last_modified()
                    .and_then(|t| jiff::Timestamp::from_second(t.secs()).ok());
                Some(FileEntry::new(key, size, modified))
            })
            .collect();

        let next_token = if response.is_truncated().unwrap_or(false) {
            response.next_continuation_token().map(|s| s.to_string())
        } else {
            None
        };

        Ok(ListPage {
            entries,
            next_token,
        })
    }

    async fn put_object(&self, container: &str, key: &str, source: &Path) -> Result<()> {
        let body = aws_sdk_s3::primitives::ByteStream::from_path(source)
            .await
            .map_err(|e| Error::General(format!("Failed to read {}: {e}", source.display())))?;

        let content_type = mime_guess::from_path(source)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        self.inner
            .put_object()
            .bucket(container)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| classify(e, key))?;

        Ok(())
    }

    async fn get_object(&self, container: &str, key: &str, dest: &Path) -> Result<()> {
        let response = self
            .inner
            .get_object()
            .bucket(container)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(e, key))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
            .into_bytes();

        tokio::fs::write(dest, data).await?;

        Ok(())
    }

    async fn delete_object(&self, container: &str, key: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(container)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(e, key))?;

        Ok(())
    }
}
