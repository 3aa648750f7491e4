//! Analyzer core: pure form state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, SubmissionRequest};
pub use msg::{Msg, SubmissionOutcome};
pub use state::{AnalysisResult, AppState, SelectedFile, Stage, SubmissionId, SubmissionState};
pub use update::update;
pub use view_model::{AppViewModel, ResultView};
