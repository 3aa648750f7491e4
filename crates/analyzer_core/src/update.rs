use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(file) => {
            state.set_file(file);
            Vec::new()
        }
        Msg::JobDescriptionChanged(text) => {
            state.set_job_description(text);
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_submission() {
            Some((submission_id, request)) => vec![Effect::Submit {
                submission_id,
                request,
            }],
            None => Vec::new(),
        },
        Msg::SubmissionProgress {
            submission_id,
            stage,
        } => {
            state.apply_progress(submission_id, stage);
            Vec::new()
        }
        Msg::SubmissionDone {
            submission_id,
            outcome,
        } => {
            state.apply_done(submission_id, outcome);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
