mod s3;

pub use s3::S3ObjectStore;

use async_trait::async_trait;
use std::path::Path;

/// Bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "vault";

/// Bucket/key addressed remote file store shared with the transcription
/// service.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError>;

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("cannot read {path}: {message}")]
    ReadLocal { path: String, message: String },
    #[error("upload of s3://{bucket}/{key} failed: {message}")]
    UploadFailed {
        bucket: String,
        key: String,
        message: String,
    },
    #[error("download of s3://{bucket}/{key} failed: {message}")]
    DownloadFailed {
        bucket: String,
        key: String,
        message: String,
    },
    #[error("delete of s3://{bucket}/{key} failed: {message}")]
    DeleteFailed {
        bucket: String,
        key: String,
        message: String,
    },
}

/// `s3://bucket/key` URI the transcription service reads media from.
pub fn object_uri(bucket: &str, key: &str) -> String {
    format!("s3://{bucket}/{key}")
}
