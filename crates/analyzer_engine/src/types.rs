use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type SubmissionId = u64;

/// Phase of the two-step remote sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Uploading,
    Analyzing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Uploading => write!(f, "upload"),
            Stage::Analyzing => write!(f, "analyze"),
        }
    }
}

/// Everything the upload call sends.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub job_description: String,
}

impl fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .field("job_description_len", &self.job_description.len())
            .finish()
    }
}

/// Body of a successful `POST /upload_resume/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    /// Slash-delimited storage reference; the last segment names the artifact.
    pub file_path: String,
}

/// Body of `POST /parse_resume/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub file_name: &'a str,
}

/// Body of a successful `POST /parse_resume/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisReport {
    pub ats_score: f64,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Progress {
        submission_id: SubmissionId,
        stage: Stage,
    },
    SubmissionCompleted {
        submission_id: SubmissionId,
        result: Result<AnalysisReport, SubmitError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} failed: {kind}: {message}")]
pub struct SubmitError {
    pub stage: Stage,
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(stage: Stage, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
    MissingArtifact,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::MissingArtifact => write!(f, "missing artifact identifier"),
        }
    }
}

/// Startup failures: the engine could not be built at all.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid backend url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
