use analyzer_core::{AnalysisResult, Effect, Msg, Stage, SubmissionOutcome};
use analyzer_engine::{BackendSettings, EngineError, EngineEvent, EngineHandle, UploadRequest};
use analyzer_logging::{analyzer_error, analyzer_info};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: &BackendSettings) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit {
                    submission_id,
                    request,
                } => {
                    analyzer_info!(
                        "Submit submission_id={} file={} bytes={} description_len={}",
                        submission_id,
                        request.file.file_name,
                        request.file.len(),
                        request.job_description.len()
                    );
                    self.engine.submit(
                        submission_id,
                        UploadRequest {
                            file_name: request.file.file_name.clone(),
                            bytes: request.file.bytes.to_vec(),
                            job_description: request.job_description,
                        },
                    );
                }
            }
        }
    }

    /// Drains every engine event available right now.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

/// Failure details end here: they are logged and the core only sees `Failed`.
fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress {
            submission_id,
            stage,
        } => Msg::SubmissionProgress {
            submission_id,
            stage: map_stage(stage),
        },
        EngineEvent::SubmissionCompleted {
            submission_id,
            result,
        } => {
            let outcome = match result {
                Ok(report) => {
                    analyzer_info!(
                        "Submission {} succeeded: ats_score={}",
                        submission_id,
                        report.ats_score
                    );
                    SubmissionOutcome::Success(AnalysisResult {
                        ats_score: report.ats_score,
                        suggestions: report.suggestions,
                    })
                }
                Err(err) => {
                    analyzer_error!("Error uploading or analyzing resume: {}", err);
                    SubmissionOutcome::Failed
                }
            };
            Msg::SubmissionDone {
                submission_id,
                outcome,
            }
        }
    }
}

fn map_stage(stage: analyzer_engine::Stage) -> Stage {
    match stage {
        analyzer_engine::Stage::Uploading => Stage::Uploading,
        analyzer_engine::Stage::Analyzing => Stage::Analyzing,
    }
}
