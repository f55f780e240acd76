//! Local filesystem storage for attachments
//!
//! Writes uploads under a configured directory and returns public URLs
//! under the configured base. Suitable for single-node deployments; an
//! object-store implementation can replace it behind the same trait.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use talent_core::{DomainError, FileStorage, SnowflakeGenerator};
use tracing::debug;

/// File storage backed by the local filesystem
pub struct LocalFileStorage {
    upload_dir: PathBuf,
    base_url: String,
    id_generator: Arc<SnowflakeGenerator>,
}

impl LocalFileStorage {
    pub fn new(
        upload_dir: impl Into<PathBuf>,
        base_url: impl Into<String>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            base_url: base_url.into(),
            id_generator,
        }
    }

    /// Strip path separators and control characters from an uploaded
    /// filename. Stored names are prefixed with a fresh id, so
    /// collisions between sanitized names are harmless.
    fn sanitize(filename: &str) -> String {
        filename
            .chars()
            .map(|c| match c {
                '/' | '\\' | '\0'..='\x1f' => '_',
                other => other,
            })
            .collect()
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, DomainError> {
        let stored_name = format!(
            "{}_{}",
            self.id_generator.generate(),
            Self::sanitize(filename)
        );

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| DomainError::StorageError(format!("create upload dir: {e}")))?;

        let path = self.upload_dir.join(&stored_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::StorageError(format!("write {stored_name}: {e}")))?;

        debug!(
            file = %stored_name,
            content_type = %content_type,
            size = bytes.len(),
            "attachment stored"
        );

        Ok(format!("{}/{}", self.base_url, stored_name))
    }
}
