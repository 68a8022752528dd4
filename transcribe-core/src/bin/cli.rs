use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use transcribe_core::cli::Cli;
use transcribe_core::config::{load_env_file, AwsSettings};
use transcribe_core::media::FfmpegTranscoder;
use transcribe_core::service::AwsTranscribeService;
use transcribe_core::storage::S3ObjectStore;
use transcribe_core::{Pipeline, PipelineOptions};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let (env_file, required) = cli.env_file();
    load_env_file(&env_file, required)?;

    // Fail on a bad path before touching AWS
    if !cli.input.exists() {
        anyhow::bail!("file {} does not exist", cli.input.display());
    }

    let settings = AwsSettings::from_env().context("Failed to load AWS settings")?;
    let sdk_config = settings.sdk_config().await;

    let pipeline = Pipeline::new(
        Arc::new(FfmpegTranscoder::new(&cli.ffmpeg)),
        Arc::new(S3ObjectStore::new(&sdk_config)),
        Arc::new(AwsTranscribeService::new(&sdk_config)),
        PipelineOptions {
            bucket: cli.bucket.clone(),
            language_code: cli.language.clone(),
            poll_interval: cli.poll_interval(),
            cleanup: cli.cleanup,
            show_progress: true,
        },
    );

    let report = pipeline
        .run(&cli.input)
        .await
        .with_context(|| format!("Failed to transcribe {}", cli.input.display()))?;

    info!(job_name = %report.job_name, json = %report.json_path.display(), "Done");
    println!(
        "transcription completed successfully. output saved to {}",
        report.transcript_path.display()
    );
    Ok(())
}
