//! Naming of the local output files and remote identifiers for one run.

use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

/// `YYYYMMDD_HHMMSS`, the suffix shared by every artifact of a run.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Longest job name the transcription service accepts.
pub const MAX_JOB_NAME_LEN: usize = 200;

pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Output locations derived from the input path and run timestamp.
///
/// All three files land in the input's directory as
/// `<stem>_<timestamp>.{mp3,json,txt}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// `<stem>_<timestamp>`, the local file name without extension.
    pub base_name: String,
    pub audio: PathBuf,
    pub json: PathBuf,
    pub transcript: PathBuf,
    stem: String,
    timestamp: String,
}

impl OutputPaths {
    pub fn new(input: &Path, timestamp: &str) -> Self {
        let dir = input.parent().unwrap_or_else(|| Path::new(""));
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base_name = format!("{stem}_{timestamp}");

        Self {
            audio: dir.join(format!("{base_name}.mp3")),
            json: dir.join(format!("{base_name}.json")),
            transcript: dir.join(format!("{base_name}.txt")),
            base_name,
            stem,
            timestamp: timestamp.to_string(),
        }
    }

    /// Job name accepted by the service: `[0-9a-zA-Z._-]`, at most
    /// `MAX_JOB_NAME_LEN` characters. Long stems are cut, the timestamp kept.
    pub fn job_name(&self) -> String {
        let suffix = format!("_{}", sanitize_identifier(&self.timestamp));
        let mut stem = sanitize_identifier(&self.stem);
        stem.truncate(MAX_JOB_NAME_LEN.saturating_sub(suffix.len()));
        stem + &suffix
    }

    /// Object key for the transcript JSON the service writes.
    pub fn json_key(&self) -> String {
        format!("{}.json", self.job_name())
    }
}

/// Object key for an uploaded local file: its file name, sanitized.
pub fn object_key(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    sanitize_identifier(&name)
}

/// Replace every character outside `[0-9a-zA-Z._-]` with `_`.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
