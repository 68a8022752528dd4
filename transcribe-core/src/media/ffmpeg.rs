use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

use super::{TranscodeError, Transcoder};

/// Runs the `ffmpeg` binary to drop the video stream and encode MP3.
pub struct FfmpegTranscoder {
    program: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        info!(input = %input.display(), output = %output.display(), "Extracting audio");

        let result = Command::new(&self.program)
            .arg("-i")
            .arg(input)
            .args(["-vn", "-acodec", "libmp3lame"])
            .arg(output)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| TranscodeError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            debug!(%stderr, "ffmpeg stderr");
            return Err(TranscodeError::Failed {
                program: self.program_name(),
                status: result.status,
                detail: last_line(&stderr).to_string(),
            });
        }

        Ok(())
    }
}

/// ffmpeg prints the actual error after its banner and stream listing.
fn last_line(stderr: &str) -> &str {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("no output")
}
