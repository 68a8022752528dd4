//! Transcribe a local media file to plain text.
//!
//! The run is a single linear pass: optionally extract audio with ffmpeg,
//! upload to S3, start an Amazon Transcribe job, poll it, download the
//! result JSON and write its first transcript to a `.txt` file beside the
//! input.

pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod paths;
pub mod pipeline;
pub mod progress;
pub mod service;
pub mod storage;
pub mod transcript;

pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineOptions, RunReport};
