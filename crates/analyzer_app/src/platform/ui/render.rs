use analyzer_core::{AppViewModel, ResultView, Stage};
use eframe::egui;

use super::constants::*;

/// User interactions collected while drawing one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ChooseFileClicked,
    JobDescriptionEdited(String),
    AnalyzeClicked,
}

/// Draws the form and, when present, the result block.
///
/// `description` is the text buffer the edit box writes into; it is echoed
/// back as [`UiEvent::JobDescriptionEdited`] whenever it changes.
pub fn render(ui: &mut egui::Ui, view: &AppViewModel, description: &mut String) -> Vec<UiEvent> {
    let mut events = Vec::new();

    ui.vertical_centered(|ui| {
        ui.heading(WINDOW_TITLE);
    });
    ui.add_space(12.0);

    ui.label(LABEL_UPLOAD);
    ui.horizontal(|ui| {
        if ui.button(BUTTON_CHOOSE_FILE).clicked() {
            events.push(UiEvent::ChooseFileClicked);
        }
        if let Some((name, len)) = &view.selected_file {
            ui.label(format!("{name} ({})", format_size(*len)));
        }
    });
    ui.add_space(8.0);

    ui.label(LABEL_JOB_DESCRIPTION);
    let edit = ui.add(
        egui::TextEdit::multiline(description)
            .desired_rows(JOB_DESCRIPTION_ROWS)
            .desired_width(f32::INFINITY)
            .hint_text("Paste the job description here"),
    );
    if edit.changed() {
        events.push(UiEvent::JobDescriptionEdited(description.clone()));
    }
    ui.add_space(8.0);

    ui.vertical_centered(|ui| {
        if view.busy {
            ui.add(egui::Spinner::new().size(SPINNER_SIZE));
            if let Some(stage) = view.stage {
                ui.weak(stage_label(stage));
            }
        } else if ui
            .add_enabled(view.submit_enabled, egui::Button::new(BUTTON_ANALYZE))
            .clicked()
        {
            events.push(UiEvent::AnalyzeClicked);
        }
    });

    if let Some(result) = &view.result {
        ui.add_space(16.0);
        render_result(ui, result);
    }

    events
}

fn render_result(ui: &mut egui::Ui, result: &ResultView) {
    ui.separator();
    ui.label(
        egui::RichText::new(HEADING_RESULT)
            .heading()
            .color(ui.visuals().hyperlink_color),
    );
    ui.label(result.score_label.as_str());
    ui.add_space(8.0);
    ui.label(egui::RichText::new(LABEL_SUGGESTIONS).strong());
    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for suggestion in &result.suggestions {
                ui.label(suggestion.as_str());
            }
        });
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Uploading => "Uploading resume…",
        Stage::Analyzing => "Analyzing resume…",
    }
}

fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KIB {
        format!("{bytes} B")
    } else if bytes_f < KIB * KIB {
        format!("{:.1} KiB", bytes_f / KIB)
    } else {
        format!("{:.1} MiB", bytes_f / (KIB * KIB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MiB");
    }

    #[test]
    fn stage_labels_name_the_phase() {
        assert_eq!(stage_label(Stage::Uploading), "Uploading resume…");
        assert_eq!(stage_label(Stage::Analyzing), "Analyzing resume…");
    }
}
