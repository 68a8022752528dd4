mod ffmpeg;

pub use ffmpeg::FfmpegTranscoder;

use async_trait::async_trait;
use std::path::Path;

/// Extracts an audio track from a local media file.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {detail}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        detail: String,
    },
}

/// Only `.mp4` containers are converted before upload; everything else is
/// sent to the service as-is.
pub fn needs_transcode(path: &Path) -> bool {
    extension(path).is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
}

/// Text after the last `.` of the file name. Unlike `Path::extension`, a
/// leading dot counts, so `.mp4` has extension `mp4`.
fn extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let (_, ext) = name.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}

/// Container formats accepted by the transcription service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Mp3,
    Mp4,
    M4a,
    Wav,
    Flac,
    Ogg,
    Amr,
    Webm,
}

impl MediaFormat {
    /// Map a file extension to a format hint. Returns `None` for extensions
    /// the service doesn't list, leaving detection to the service.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "mp4" => Some(Self::Mp4),
            "m4a" => Some(Self::M4a),
            "wav" => Some(Self::Wav),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            "amr" => Some(Self::Amr),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        extension(path).and_then(Self::from_extension)
    }
}
