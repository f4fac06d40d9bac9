//! S3 Object Store
//!
//! ObjectStoreのAWS S3実装

use anyhow::Result;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use log::debug;
use std::path::Path;

use super::error::StorageError;
use crate::adapter::config::S3Settings;
use crate::domain::repositories::object_store::ObjectStore;

/// S3 client wrapper implementing ObjectStore
///
/// パブリッシャーごとに一度だけ作成される
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from ambient credentials (environment, profile, instance role).
    ///
    /// `settings` may override the region and point the client at an
    /// S3-compatible endpoint.
    pub async fn from_env(settings: &S3Settings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &settings.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }
        builder = builder.force_path_style(settings.force_path_style);

        Self::new(Client::from_conf(builder.build()))
    }

    async fn put_file(&self, local_path: &Path, bucket: &str, key: &str) -> Result<(), StorageError> {
        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| StorageError::ReadFile {
                path: local_path.display().to_string(),
                source: e,
            })?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await?;

        debug!("Uploaded {} to s3://{}/{}", local_path.display(), bucket, key);
        Ok(())
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload_file(&self, local_path: &Path, bucket: &str, key: &str) -> Result<()> {
        Ok(self.put_file(local_path, bucket, key).await?)
    }
}
