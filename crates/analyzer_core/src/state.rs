use std::fmt;
use std::sync::Arc;

use crate::view_model::{AppViewModel, ResultView};

pub type SubmissionId = u64;

/// The resume picked by the user: original filename plus raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Phase of the in-flight submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Uploading,
    Analyzing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub ats_score: f64,
    /// Backend order; never re-sorted.
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    file: Option<SelectedFile>,
    job_description: String,
    submission: SubmissionState,
    stage: Option<Stage>,
    result: Option<AnalysisResult>,
    last_submission_id: SubmissionId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            submission: self.submission,
            stage: self.stage,
            selected_file: self
                .file
                .as_ref()
                .map(|file| (file.file_name.clone(), file.len())),
            job_description: self.job_description.clone(),
            submit_enabled: self.can_submit(),
            busy: self.submission == SubmissionState::InFlight,
            result: self.result.as_ref().map(ResultView::from_result),
            dirty: self.dirty,
        }
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Id of the most recently accepted submission, 0 before the first one.
    pub fn current_submission_id(&self) -> SubmissionId {
        self.last_submission_id
    }

    /// A file is picked, the description is non-empty and nothing is in flight.
    pub fn can_submit(&self) -> bool {
        self.file.is_some()
            && !self.job_description.is_empty()
            && self.submission != SubmissionState::InFlight
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_file(&mut self, file: SelectedFile) {
        self.file = Some(file);
        self.dirty = true;
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        if self.job_description != text {
            self.job_description = text;
            self.dirty = true;
        }
    }

    /// Moves to InFlight and returns the request to run, or `None` if blocked.
    pub(crate) fn begin_submission(&mut self) -> Option<(SubmissionId, crate::SubmissionRequest)> {
        if !self.can_submit() {
            return None;
        }
        let file = self.file.clone()?;
        self.last_submission_id += 1;
        self.submission = SubmissionState::InFlight;
        self.stage = Some(Stage::Uploading);
        self.result = None;
        self.dirty = true;
        Some((
            self.last_submission_id,
            crate::SubmissionRequest {
                file,
                job_description: self.job_description.clone(),
            },
        ))
    }

    fn is_current(&self, submission_id: SubmissionId) -> bool {
        self.submission == SubmissionState::InFlight && submission_id == self.last_submission_id
    }

    pub(crate) fn apply_progress(&mut self, submission_id: SubmissionId, stage: Stage) {
        if !self.is_current(submission_id) || self.stage == Some(stage) {
            return;
        }
        self.stage = Some(stage);
        self.dirty = true;
    }

    pub(crate) fn apply_done(
        &mut self,
        submission_id: SubmissionId,
        outcome: crate::SubmissionOutcome,
    ) {
        if !self.is_current(submission_id) {
            return;
        }
        match outcome {
            crate::SubmissionOutcome::Success(result) => {
                self.result = Some(result);
                self.submission = SubmissionState::Succeeded;
            }
            crate::SubmissionOutcome::Failed => {
                self.result = None;
                self.submission = SubmissionState::Failed;
            }
        }
        self.stage = None;
        self.dirty = true;
    }
}
