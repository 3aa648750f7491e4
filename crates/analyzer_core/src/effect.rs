use crate::{SelectedFile, SubmissionId};

/// Inputs captured at submit time and handed to the IO side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub file: SelectedFile,
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the upload-then-analyze pipeline for this submission.
    Submit {
        submission_id: SubmissionId,
        request: SubmissionRequest,
    },
}
