use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::DEFAULT_ENV_FILE;
use crate::service::DEFAULT_LANGUAGE;
use crate::storage::DEFAULT_BUCKET;

#[derive(Debug, Parser)]
#[command(name = "transcribe")]
#[command(about = "Transcribe a media file to text via S3 and Amazon Transcribe")]
pub struct Cli {
    /// Media file to transcribe. `.mp4` files are converted to MP3 first.
    pub input: PathBuf,

    /// S3 bucket used for the upload and the transcript JSON.
    #[arg(long, env = "TRANSCRIBE_BUCKET", default_value = DEFAULT_BUCKET)]
    pub bucket: String,

    /// Language code of the spoken audio.
    #[arg(long, env = "TRANSCRIBE_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Seconds between job status checks.
    #[arg(long, default_value_t = 1)]
    pub poll_interval_secs: u64,

    /// ffmpeg binary used to extract audio from video.
    #[arg(long, env = "FFMPEG_PATH", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// Settings file holding AWS_REGION, AWS_ACCESS_KEY and AWS_SECRET_ACCESS_KEY.
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Delete the uploaded audio, the transcript JSON and the job when done.
    #[arg(long)]
    pub cleanup: bool,
}

impl Cli {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Settings file to load, and whether it must exist.
    pub fn env_file(&self) -> (PathBuf, bool) {
        match &self.env_file {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_ENV_FILE), false),
        }
    }
}
