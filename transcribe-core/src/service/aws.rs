use async_trait::async_trait;
use aws_sdk_transcribe::error::DisplayErrorContext;
use aws_sdk_transcribe::types::{LanguageCode, Media, TranscriptionJobStatus};
use tracing::{debug, info};

use super::{JobRequest, JobState, ServiceError, TranscriptionService};
use crate::media::MediaFormat;

/// Amazon Transcribe batch jobs.
pub struct AwsTranscribeService {
    client: aws_sdk_transcribe::Client,
}

impl AwsTranscribeService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_transcribe::Client::new(config),
        }
    }
}

fn sdk_media_format(format: MediaFormat) -> aws_sdk_transcribe::types::MediaFormat {
    use aws_sdk_transcribe::types::MediaFormat as Sdk;
    match format {
        MediaFormat::Mp3 => Sdk::Mp3,
        MediaFormat::Mp4 => Sdk::Mp4,
        MediaFormat::M4a => Sdk::M4A,
        MediaFormat::Wav => Sdk::Wav,
        MediaFormat::Flac => Sdk::Flac,
        MediaFormat::Ogg => Sdk::Ogg,
        MediaFormat::Amr => Sdk::Amr,
        MediaFormat::Webm => Sdk::Webm,
    }
}

#[async_trait]
impl TranscriptionService for AwsTranscribeService {
    async fn start_job(&self, request: &JobRequest) -> Result<(), ServiceError> {
        info!(
            job_name = %request.job_name,
            media_uri = %request.media_uri,
            language = %request.language_code,
            "Starting transcription job"
        );

        self.client
            .start_transcription_job()
            .transcription_job_name(&request.job_name)
            .media(Media::builder().media_file_uri(&request.media_uri).build())
            .set_media_format(request.media_format.map(sdk_media_format))
            .language_code(LanguageCode::from(request.language_code.as_str()))
            .output_bucket_name(&request.output_bucket)
            .output_key(&request.output_key)
            .send()
            .await
            .map_err(|e| ServiceError::Api(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    async fn job_state(&self, job_name: &str) -> Result<JobState, ServiceError> {
        let resp = self
            .client
            .get_transcription_job()
            .transcription_job_name(job_name)
            .send()
            .await
            .map_err(|e| ServiceError::Api(DisplayErrorContext(&e).to_string()))?;

        let job = resp
            .transcription_job()
            .ok_or_else(|| ServiceError::MissingJob(job_name.to_string()))?;

        let state = match job.transcription_job_status() {
            Some(TranscriptionJobStatus::Completed) => JobState::Completed,
            Some(TranscriptionJobStatus::Failed) => JobState::Failed {
                reason: job.failure_reason().map(str::to_string),
            },
            _ => JobState::InProgress,
        };
        debug!(job_name, ?state, "Polled transcription job");
        Ok(state)
    }

    async fn delete_job(&self, job_name: &str) -> Result<(), ServiceError> {
        self.client
            .delete_transcription_job()
            .transcription_job_name(job_name)
            .send()
            .await
            .map_err(|e| ServiceError::Api(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
