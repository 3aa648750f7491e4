use std::sync::{Arc, Mutex};

use analyzer_engine::{
    run_submission, AnalysisBackend, AnalysisReport, BackendSettings, EngineEvent, FailureKind,
    ProgressSink, ReqwestBackend, Stage, SubmitError, UploadReceipt, UploadRequest,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn stages(&self) -> Vec<Stage> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::Progress { stage, .. } => Some(*stage),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn resume_upload() -> UploadRequest {
    UploadRequest {
        file_name: "resume.pdf".to_string(),
        bytes: b"%PDF".to_vec(),
        job_description: "Backend engineer role".to_string(),
    }
}

fn backend_for(server: &MockServer) -> ReqwestBackend {
    ReqwestBackend::new(&BackendSettings {
        base_url: server.uri(),
        ..BackendSettings::default()
    })
    .expect("backend")
}

#[tokio::test]
async fn upload_then_analyze_with_derived_file_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_resume/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "file_path": "/tmp/resume.pdf" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/parse_resume/"))
        .and(body_json(json!({ "file_name": "resume.pdf" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ats_score": 78,
            "suggestions": ["Add keywords"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sink = TestSink::default();
    let report = run_submission(&backend_for(&server), 1, &resume_upload(), &sink)
        .await
        .expect("submission ok");

    assert_eq!(
        report,
        AnalysisReport {
            ats_score: 78.0,
            suggestions: vec!["Add keywords".to_string()],
        }
    );
    assert_eq!(sink.stages(), vec![Stage::Uploading, Stage::Analyzing]);
}

#[tokio::test]
async fn failed_upload_never_issues_analyze() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_resume/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/parse_resume/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sink = TestSink::default();
    let err = run_submission(&backend_for(&server), 3, &resume_upload(), &sink)
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Uploading);
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(sink.stages(), vec![Stage::Uploading]);
}

#[tokio::test]
async fn failed_analyze_is_reported_after_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_resume/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "file_path": "a/b/c/report123.pdf" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/parse_resume/"))
        .and(body_json(json!({ "file_name": "report123.pdf" })))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = run_submission(&backend_for(&server), 4, &resume_upload(), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Analyzing);
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, "boom");
}

#[tokio::test]
async fn storage_reference_without_name_skips_analyze() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_resume/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "file_path": "uploads/" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/parse_resume/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = run_submission(&backend_for(&server), 5, &resume_upload(), &TestSink::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MissingArtifact);
}

/// Records calls so ordering can be checked without a server.
#[derive(Default)]
struct ScriptedBackend {
    calls: Mutex<Vec<String>>,
    fail_upload: bool,
}

#[async_trait::async_trait]
impl AnalysisBackend for ScriptedBackend {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, SubmitError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("upload {}", request.file_name));
        if self.fail_upload {
            return Err(SubmitError {
                stage: Stage::Uploading,
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            });
        }
        Ok(UploadReceipt {
            file_path: format!("store/{}", request.file_name),
        })
    }

    async fn analyze(&self, file_name: &str) -> Result<AnalysisReport, SubmitError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("analyze {file_name}"));
        Ok(AnalysisReport {
            ats_score: 42.5,
            suggestions: vec!["Add metrics".to_string(), "Shorten summary".to_string()],
        })
    }
}

#[tokio::test]
async fn calls_are_sequential_and_suggestion_order_is_kept() {
    let backend = ScriptedBackend::default();
    let report = run_submission(&backend, 9, &resume_upload(), &TestSink::default())
        .await
        .expect("ok");

    assert_eq!(
        *backend.calls.lock().unwrap(),
        vec!["upload resume.pdf".to_string(), "analyze resume.pdf".to_string()]
    );
    assert_eq!(
        report.suggestions,
        vec!["Add metrics".to_string(), "Shorten summary".to_string()]
    );
}

#[tokio::test]
async fn scripted_upload_failure_stops_the_pipeline() {
    let backend = ScriptedBackend {
        fail_upload: true,
        ..ScriptedBackend::default()
    };
    let err = run_submission(&backend, 10, &resume_upload(), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
    assert_eq!(
        *backend.calls.lock().unwrap(),
        vec!["upload resume.pdf".to_string()]
    );
}
