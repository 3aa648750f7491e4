use std::path::{Path, PathBuf};
use std::time::Duration;

use analyzer_core::{update, AppState, AppViewModel, Msg, SelectedFile};
use analyzer_logging::{analyzer_info, analyzer_warn};
use anyhow::Context as _;
use eframe::egui;

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::ui::constants::{BUSY_REPAINT_MS, WINDOW_SIZE, WINDOW_TITLE};
use super::ui::render::{render, UiEvent};

pub fn run_app() -> anyhow::Result<()> {
    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let loaded = config::load_from_dir(&work_dir);
    let app_config = loaded.as_ref().cloned().unwrap_or_default();
    logging::initialize(app_config.log_destination);
    if let Err(err) = &loaded {
        analyzer_warn!("{}; using default configuration", err);
    }
    analyzer_info!("Starting resume analyzer against {}", app_config.backend_url);

    let runner = EffectRunner::new(&app_config.backend_settings())
        .context("failed to start analysis engine")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(AnalyzerApp::new(runner)))),
    )
    .map_err(|err| anyhow::anyhow!("window error: {err}"))
}

struct AnalyzerApp {
    state: AppState,
    view: AppViewModel,
    /// Backing buffer for the job description edit box.
    description: String,
    runner: EffectRunner,
}

impl AnalyzerApp {
    fn new(runner: EffectRunner) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            description: String::new(),
            runner,
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::ChooseFileClicked => {
                if let Some(path) = rfd::FileDialog::new().pick_file() {
                    if let Some(file) = read_selected_file(&path) {
                        self.dispatch_msg(Msg::FileSelected(file));
                    }
                }
            }
            UiEvent::JobDescriptionEdited(text) => {
                self.dispatch_msg(Msg::JobDescriptionChanged(text));
            }
            UiEvent::AnalyzeClicked => self.dispatch_msg(Msg::SubmitClicked),
        }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for msg in self.runner.poll() {
            self.dispatch_msg(msg);
        }

        let view = self.view.clone();
        let events = egui::CentralPanel::default()
            .show(ctx, |ui| render(ui, &view, &mut self.description))
            .inner;
        for event in events {
            self.handle_ui_event(event);
        }

        // Engine events arrive off the UI thread; keep polling while busy.
        if self.view.busy {
            ctx.request_repaint_after(Duration::from_millis(BUSY_REPAINT_MS));
        }
    }
}

fn read_selected_file(path: &Path) -> Option<SelectedFile> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    match std::fs::read(path) {
        Ok(bytes) => {
            analyzer_info!("Selected {:?} ({} bytes)", path, bytes.len());
            Some(SelectedFile::new(file_name, bytes))
        }
        Err(err) => {
            analyzer_warn!("Failed to read {:?}: {}", path, err);
            None
        }
    }
}
