use crate::{AnalysisResult, SelectedFile, Stage, SubmissionId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a resume file.
    FileSelected(SelectedFile),
    /// User edited the job description box.
    JobDescriptionChanged(String),
    /// User clicked "Analyze Resume".
    SubmitClicked,
    /// Engine moved a submission to a new phase.
    SubmissionProgress {
        submission_id: SubmissionId,
        stage: Stage,
    },
    /// Engine finished a submission, successfully or not.
    SubmissionDone {
        submission_id: SubmissionId,
        outcome: SubmissionOutcome,
    },
    /// UI/render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Collapsed result of one submission. Failure details stay on the IO side.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(AnalysisResult),
    Failed,
}
