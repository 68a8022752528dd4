//! Error types for each step of a transcription run.

use std::path::PathBuf;
use thiserror::Error;

use crate::media::TranscodeError;
use crate::service::ServiceError;
use crate::storage::StorageError;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// A failed step. Every variant ends the run; nothing is retried.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("file {0} does not exist")]
    InputNotFound(PathBuf),

    #[error("error converting video to audio: {0}")]
    Transcode(#[source] TranscodeError),

    #[error("error uploading to object storage: {0}")]
    Upload(#[source] StorageError),

    #[error("error starting transcription job: {0}")]
    StartJob(#[source] ServiceError),

    #[error("error checking job status: {0}")]
    Poll(#[source] ServiceError),

    #[error("transcription job failed: {}", .0.as_deref().unwrap_or("no reason given"))]
    JobFailed(Option<String>),

    #[error("error downloading transcript: {0}")]
    Download(#[source] StorageError),

    #[error("error saving transcript json to {path}: {source}")]
    SaveJson {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing transcript: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("no transcripts found in the file")]
    NoTranscripts,

    #[error("error writing transcript file {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
