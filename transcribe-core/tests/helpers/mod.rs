#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use transcribe_core::media::{TranscodeError, Transcoder};
use transcribe_core::service::{JobRequest, JobState, ServiceError, TranscriptionService};
use transcribe_core::storage::{ObjectStore, StorageError};
use transcribe_core::{Pipeline, PipelineOptions};

pub const TIMESTAMP: &str = "20240102_030405";

/// Ordered log of calls across all fakes.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub struct FakeTranscoder {
    pub log: CallLog,
    pub fail: bool,
}

#[async_trait]
impl Transcoder for FakeTranscoder {
    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        self.log.lock().unwrap().push(format!(
            "transcode {} -> {}",
            file_name(input),
            file_name(output)
        ));
        if self.fail {
            return Err(TranscodeError::Spawn {
                program: "ffmpeg".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        std::fs::write(output, b"mp3 bytes").unwrap();
        Ok(())
    }
}

/// In-memory bucket. `put_file` records the uploaded path.
pub struct FakeStore {
    pub log: CallLog,
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    /// Body returned for any `.json` key the service "writes".
    pub transcript_json: Vec<u8>,
    pub fail_upload: bool,
    pub fail_download: bool,
    pub fail_delete: bool,
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("put {bucket}/{key} from {}", file_name(path)));
        if self.fail_upload {
            return Err(StorageError::UploadFailed {
                bucket: bucket.into(),
                key: key.into(),
                message: "access denied".into(),
            });
        }
        let data = std::fs::read(path).unwrap();
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        self.log.lock().unwrap().push(format!("get {bucket}/{key}"));
        if self.fail_download {
            return Err(StorageError::DownloadFailed {
                bucket: bucket.into(),
                key: key.into(),
                message: "no such key".into(),
            });
        }
        Ok(self.transcript_json.clone())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.log.lock().unwrap().push(format!("delete {bucket}/{key}"));
        if self.fail_delete {
            return Err(StorageError::DeleteFailed {
                bucket: bucket.into(),
                key: key.into(),
                message: "access denied".into(),
            });
        }
        Ok(())
    }
}

/// Replays a scripted sequence of job states; the last one repeats.
pub struct FakeService {
    pub log: CallLog,
    pub states: Mutex<VecDeque<JobState>>,
    pub requests: Mutex<Vec<JobRequest>>,
    pub fail_start: bool,
    pub fail_poll: bool,
    pub fail_delete: bool,
}

#[async_trait]
impl TranscriptionService for FakeService {
    async fn start_job(&self, request: &JobRequest) -> Result<(), ServiceError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("start {}", request.job_name));
        self.requests.lock().unwrap().push(request.clone());
        if self.fail_start {
            return Err(ServiceError::Api("LimitExceededException".into()));
        }
        Ok(())
    }

    async fn job_state(&self, job_name: &str) -> Result<JobState, ServiceError> {
        self.log.lock().unwrap().push(format!("poll {job_name}"));
        if self.fail_poll {
            return Err(ServiceError::Api("ThrottlingException".into()));
        }
        let mut states = self.states.lock().unwrap();
        let state = if states.len() > 1 {
            states.pop_front()
        } else {
            states.front().cloned()
        };
        state.ok_or_else(|| ServiceError::MissingJob(job_name.to_string()))
    }

    async fn delete_job(&self, job_name: &str) -> Result<(), ServiceError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("delete-job {job_name}"));
        if self.fail_delete {
            return Err(ServiceError::Api("AccessDeniedException".into()));
        }
        Ok(())
    }
}

pub struct Harness {
    pub log: CallLog,
    pub store: Arc<FakeStore>,
    pub service: Arc<FakeService>,
    pub pipeline: Pipeline,
}

pub struct HarnessBuilder {
    transcript_json: Vec<u8>,
    states: Vec<JobState>,
    fail_transcode: bool,
    fail_upload: bool,
    fail_download: bool,
    fail_start: bool,
    fail_poll: bool,
    fail_delete: bool,
    cleanup: bool,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            transcript_json: transcript_json(&["hello from the service"]),
            states: vec![JobState::Completed],
            fail_transcode: false,
            fail_upload: false,
            fail_download: false,
            fail_start: false,
            fail_poll: false,
            fail_delete: false,
            cleanup: false,
        }
    }

    pub fn transcript_json(mut self, json: Vec<u8>) -> Self {
        self.transcript_json = json;
        self
    }

    pub fn states(mut self, states: Vec<JobState>) -> Self {
        self.states = states;
        self
    }

    pub fn fail_transcode(mut self) -> Self {
        self.fail_transcode = true;
        self
    }

    pub fn fail_upload(mut self) -> Self {
        self.fail_upload = true;
        self
    }

    pub fn fail_download(mut self) -> Self {
        self.fail_download = true;
        self
    }

    pub fn fail_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn fail_poll(mut self) -> Self {
        self.fail_poll = true;
        self
    }

    /// Every object and job delete fails.
    pub fn fail_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn cleanup(mut self) -> Self {
        self.cleanup = true;
        self
    }

    pub fn build(self) -> Harness {
        let log: CallLog = Arc::default();
        let transcoder = Arc::new(FakeTranscoder {
            log: log.clone(),
            fail: self.fail_transcode,
        });
        let store = Arc::new(FakeStore {
            log: log.clone(),
            objects: Mutex::default(),
            transcript_json: self.transcript_json,
            fail_upload: self.fail_upload,
            fail_download: self.fail_download,
            fail_delete: self.fail_delete,
        });
        let service = Arc::new(FakeService {
            log: log.clone(),
            states: Mutex::new(self.states.into()),
            requests: Mutex::default(),
            fail_start: self.fail_start,
            fail_poll: self.fail_poll,
            fail_delete: self.fail_delete,
        });
        let options = PipelineOptions {
            poll_interval: Duration::from_millis(1),
            cleanup: self.cleanup,
            show_progress: false,
            ..PipelineOptions::default()
        };
        let pipeline = Pipeline::new(transcoder, store.clone(), service.clone(), options);
        Harness {
            log,
            store,
            service,
            pipeline,
        }
    }
}

impl Harness {
    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

pub fn transcript_json(transcripts: &[&str]) -> Vec<u8> {
    let variants: Vec<_> = transcripts
        .iter()
        .map(|t| serde_json::json!({ "transcript": t }))
        .collect();
    serde_json::to_vec(&serde_json::json!({
        "jobName": "job",
        "status": "COMPLETED",
        "results": { "transcripts": variants, "items": [] }
    }))
    .unwrap()
}

/// Create `name` inside `dir` with placeholder media bytes.
pub fn media_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"media bytes").unwrap();
    path
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
