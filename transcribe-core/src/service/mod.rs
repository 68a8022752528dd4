mod aws;

pub use aws::AwsTranscribeService;

use async_trait::async_trait;

use crate::media::MediaFormat;

/// Language requested when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Managed speech-to-text service that runs named, asynchronous jobs.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    async fn start_job(&self, request: &JobRequest) -> Result<(), ServiceError>;

    async fn job_state(&self, job_name: &str) -> Result<JobState, ServiceError>;

    async fn delete_job(&self, job_name: &str) -> Result<(), ServiceError>;
}

/// Everything needed to submit one transcription job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub job_name: String,
    /// `s3://bucket/key` of the uploaded audio.
    pub media_uri: String,
    pub media_format: Option<MediaFormat>,
    pub language_code: String,
    /// Bucket and key the service writes its JSON result to.
    pub output_bucket: String,
    pub output_key: String,
}

/// Observable state of a submitted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    /// Queued or running.
    InProgress,
    Completed,
    Failed { reason: Option<String> },
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("api request failed: {0}")]
    Api(String),
    #[error("no job named {0} in response")]
    MissingJob(String),
}
