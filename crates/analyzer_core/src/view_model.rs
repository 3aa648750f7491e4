use crate::{AnalysisResult, Stage, SubmissionState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub submission: SubmissionState,
    pub stage: Option<Stage>,
    /// Name and byte length of the picked file.
    pub selected_file: Option<(String, usize)>,
    pub job_description: String,
    pub submit_enabled: bool,
    /// Busy indicator replaces the submit button.
    pub busy: bool,
    /// Present only while Succeeded.
    pub result: Option<ResultView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub score_label: String,
    pub suggestions: Vec<String>,
}

impl ResultView {
    pub(crate) fn from_result(result: &AnalysisResult) -> Self {
        Self {
            score_label: format!("ATS Score: {}", result.ats_score),
            suggestions: result.suggestions.clone(),
        }
    }
}
