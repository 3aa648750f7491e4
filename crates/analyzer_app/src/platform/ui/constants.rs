pub const WINDOW_TITLE: &str = "Resume Analyzer";
pub const WINDOW_SIZE: [f32; 2] = [560.0, 680.0];

pub const LABEL_UPLOAD: &str = "Upload Resume (PDF):";
pub const BUTTON_CHOOSE_FILE: &str = "Choose File";
pub const LABEL_JOB_DESCRIPTION: &str = "Job Description";
pub const BUTTON_ANALYZE: &str = "Analyze Resume";
pub const HEADING_RESULT: &str = "ATS Analysis Result";
pub const LABEL_SUGGESTIONS: &str = "Suggestions for Improvement:";

pub const JOB_DESCRIPTION_ROWS: usize = 4;
pub const SPINNER_SIZE: f32 = 24.0;
pub const BUSY_REPAINT_MS: u64 = 75;
