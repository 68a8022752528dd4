use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::media::{needs_transcode, MediaFormat, Transcoder};
use crate::paths::{format_timestamp, object_key, OutputPaths};
use crate::progress::ProgressLine;
use crate::service::{JobRequest, JobState, TranscriptionService, DEFAULT_LANGUAGE};
use crate::storage::{object_uri, ObjectStore, DEFAULT_BUCKET};
use crate::transcript::TranscriptDocument;

/// Tunables for a single run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub bucket: String,
    pub language_code: String,
    /// Sleep between job status checks.
    pub poll_interval: Duration,
    /// Remove remote artifacts after a successful run.
    pub cleanup: bool,
    /// Draw the progress bar on stdout while polling.
    pub show_progress: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            language_code: DEFAULT_LANGUAGE.to_string(),
            poll_interval: Duration::from_secs(1),
            cleanup: false,
            show_progress: true,
        }
    }
}

/// Files produced by a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub job_name: String,
    pub transcript_path: PathBuf,
    pub json_path: PathBuf,
    /// Set only when the input was converted.
    pub audio_path: Option<PathBuf>,
}

/// Media file -> audio -> object store -> transcription job -> text file.
pub struct Pipeline {
    transcoder: Arc<dyn Transcoder>,
    store: Arc<dyn ObjectStore>,
    service: Arc<dyn TranscriptionService>,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(
        transcoder: Arc<dyn Transcoder>,
        store: Arc<dyn ObjectStore>,
        service: Arc<dyn TranscriptionService>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            transcoder,
            store,
            service,
            options,
        }
    }

    /// Run once, naming outputs after the current local time.
    pub async fn run(&self, input: &Path) -> Result<RunReport> {
        let timestamp = format_timestamp(&chrono::Local::now());
        self.run_with_timestamp(input, &timestamp).await
    }

    pub async fn run_with_timestamp(&self, input: &Path, timestamp: &str) -> Result<RunReport> {
        if !input.exists() {
            return Err(PipelineError::InputNotFound(input.to_path_buf()));
        }

        let paths = OutputPaths::new(input, timestamp);
        let bucket = self.options.bucket.as_str();

        let audio_path = if needs_transcode(input) {
            info!(input = %input.display(), "Converting to audio");
            self.transcoder
                .extract_audio(input, &paths.audio)
                .await
                .map_err(PipelineError::Transcode)?;
            Some(paths.audio.clone())
        } else {
            None
        };
        let upload_path = audio_path.as_deref().unwrap_or(input);

        let audio_key = object_key(upload_path);
        info!(path = %upload_path.display(), bucket, key = %audio_key, "Uploading");
        self.store
            .put_file(bucket, &audio_key, upload_path)
            .await
            .map_err(PipelineError::Upload)?;

        let request = JobRequest {
            job_name: paths.job_name(),
            media_uri: object_uri(bucket, &audio_key),
            media_format: MediaFormat::from_path(upload_path),
            language_code: self.options.language_code.clone(),
            output_bucket: bucket.to_string(),
            output_key: paths.json_key(),
        };
        self.service
            .start_job(&request)
            .await
            .map_err(PipelineError::StartJob)?;

        self.wait_for_job(&request.job_name).await?;

        info!(key = %request.output_key, "Processing transcript");
        let json = self
            .store
            .get_object(bucket, &request.output_key)
            .await
            .map_err(PipelineError::Download)?;

        // Nothing is written locally until the document yields a transcript.
        let document = TranscriptDocument::from_slice(&json).map_err(PipelineError::Parse)?;
        let text = document
            .first_transcript()
            .ok_or(PipelineError::NoTranscripts)?;

        tokio::fs::write(&paths.json, &json)
            .await
            .map_err(|source| PipelineError::SaveJson {
                path: paths.json.clone(),
                source,
            })?;

        if let Err(source) = tokio::fs::write(&paths.transcript, text).await {
            let _ = tokio::fs::remove_file(&paths.json).await;
            return Err(PipelineError::WriteOutput {
                path: paths.transcript.clone(),
                source,
            });
        }

        if self.options.cleanup {
            self.cleanup(&request.job_name, &[audio_key.as_str(), request.output_key.as_str()])
                .await;
        }

        info!(path = %paths.transcript.display(), "Transcript saved");
        Ok(RunReport {
            job_name: request.job_name,
            transcript_path: paths.transcript,
            json_path: paths.json,
            audio_path,
        })
    }

    /// Poll until the job reaches a terminal state. No timeout.
    async fn wait_for_job(&self, job_name: &str) -> Result<()> {
        info!(job_name, "Waiting for transcription to complete");
        let progress = ProgressLine::new("Transcribing...", self.options.show_progress);
        let started = Instant::now();

        loop {
            let state = self.service.job_state(job_name).await.map_err(|e| {
                progress.finish();
                PipelineError::Poll(e)
            })?;

            progress.update(started.elapsed());

            match state {
                JobState::Completed => {
                    progress.finish();
                    info!(job_name, "Transcription completed");
                    return Ok(());
                }
                JobState::Failed { reason } => {
                    progress.finish();
                    return Err(PipelineError::JobFailed(reason));
                }
                JobState::InProgress => tokio::time::sleep(self.options.poll_interval).await,
            }
        }
    }

    /// Best effort; failures only warn.
    async fn cleanup(&self, job_name: &str, keys: &[&str]) {
        let bucket = self.options.bucket.as_str();
        for key in keys {
            if let Err(e) = self.store.delete_object(bucket, key).await {
                warn!(bucket, key, error = %e, "Failed to delete object");
            }
        }
        if let Err(e) = self.service.delete_job(job_name).await {
            warn!(job_name, error = %e, "Failed to delete transcription job");
        }
    }
}
