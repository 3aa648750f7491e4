use std::sync::{mpsc, Arc};
use std::thread;

use analyzer_logging::analyzer_info;

use crate::pipeline::{run_submission, ChannelProgressSink};
use crate::{
    AnalysisBackend, BackendSettings, EngineError, EngineEvent, ReqwestBackend, SubmissionId,
    UploadRequest,
};

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        request: UploadRequest,
    },
}

/// Runs submissions on a background tokio runtime and reports back over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: &BackendSettings) -> Result<Self, EngineError> {
        let backend = ReqwestBackend::new(settings)?;
        analyzer_info!("backend endpoints: {} {}", backend.upload_url(), backend.analyze_url());
        Self::with_backend(Arc::new(backend))
    }

    pub fn with_backend(backend: Arc<dyn AnalysisBackend>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("analyzer-engine-worker")
            .build()?;

        thread::Builder::new()
            .name("analyzer-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let backend = backend.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(backend.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, submission_id: SubmissionId, request: UploadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            submission_id,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    backend: &dyn AnalysisBackend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            submission_id,
            request,
        } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = run_submission(backend, submission_id, &request, &sink).await;
            let _ = event_tx.send(EngineEvent::SubmissionCompleted {
                submission_id,
                result,
            });
        }
    }
}
