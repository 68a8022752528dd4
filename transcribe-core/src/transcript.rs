use serde::Deserialize;

/// Result document written by the transcription service.
///
/// Only the transcript strings are kept. Items, timings, confidence scores
/// and speaker labels are dropped during deserialization.
///
/// ```json
/// { "jobName": "...", "status": "COMPLETED",
///   "results": { "transcripts": [{ "transcript": "the text..." }], "items": [] } }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptDocument {
    #[serde(default)]
    pub job_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub results: TranscriptResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptResults {
    #[serde(default)]
    pub transcripts: Vec<TranscriptVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptVariant {
    pub transcript: String,
}

impl TranscriptDocument {
    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Text of the first transcript variant, if any.
    pub fn first_transcript(&self) -> Option<&str> {
        self.results
            .transcripts
            .first()
            .map(|variant| variant.transcript.as_str())
    }
}
