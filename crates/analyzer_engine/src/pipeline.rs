use std::sync::mpsc;

use analyzer_logging::{analyzer_debug, analyzer_info};

use crate::{
    artifact_identifier, AnalysisBackend, AnalysisReport, EngineEvent, Stage, SubmissionId,
    SubmitError, UploadRequest,
};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Upload, then analyze the stored artifact.
///
/// The analyze call is only issued once the upload has succeeded and its
/// storage reference yields an artifact name. Nothing is retried, and an
/// artifact uploaded by a submission whose analysis fails is left on the
/// backend.
pub async fn run_submission(
    backend: &dyn AnalysisBackend,
    submission_id: SubmissionId,
    request: &UploadRequest,
    sink: &dyn ProgressSink,
) -> Result<AnalysisReport, SubmitError> {
    sink.emit(EngineEvent::Progress {
        submission_id,
        stage: Stage::Uploading,
    });
    let receipt = backend.upload(request).await?;
    analyzer_debug!("submission {} upload receipt: {:?}", submission_id, receipt);

    let file_name = artifact_identifier(&receipt.file_path)?;
    sink.emit(EngineEvent::Progress {
        submission_id,
        stage: Stage::Analyzing,
    });
    let report = backend.analyze(file_name).await?;
    analyzer_info!(
        "submission {} analyzed {}: score={} suggestions={}",
        submission_id,
        file_name,
        report.ats_score,
        report.suggestions.len()
    );
    Ok(report)
}
