//! Analyzer engine: backend client, two-phase submission pipeline and effect execution.
mod artifact;
mod client;
mod engine;
mod pipeline;
mod types;

pub use artifact::artifact_identifier;
pub use client::{AnalysisBackend, BackendSettings, ReqwestBackend, ANALYZE_PATH, UPLOAD_PATH};
pub use engine::EngineHandle;
pub use pipeline::{run_submission, ChannelProgressSink, ProgressSink};
pub use types::{
    AnalysisReport, AnalyzeRequest, EngineError, EngineEvent, FailureKind, Stage, SubmissionId,
    SubmitError, UploadReceipt, UploadRequest,
};
