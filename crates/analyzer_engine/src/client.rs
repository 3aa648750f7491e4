use std::time::Duration;

use analyzer_logging::{analyzer_debug, analyzer_warn};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    AnalysisReport, AnalyzeRequest, EngineError, FailureKind, Stage, SubmitError, UploadReceipt,
    UploadRequest,
};

pub const UPLOAD_PATH: &str = "upload_resume/";
pub const ANALYZE_PATH: &str = "parse_resume/";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    /// `None` leaves the transport default in place.
    pub connect_timeout: Option<Duration>,
    /// `None` means no local timeout: a hung backend keeps the submission in flight.
    pub request_timeout: Option<Duration>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

/// The external analysis service, one method per endpoint.
#[async_trait::async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, SubmitError>;

    async fn analyze(&self, file_name: &str) -> Result<AnalysisReport, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    upload_url: Url,
    analyze_url: Url,
}

impl ReqwestBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self, EngineError> {
        let base = parse_base_url(&settings.base_url)?;
        let join = |path: &str| {
            base.join(path).map_err(|source| EngineError::InvalidBaseUrl {
                url: settings.base_url.clone(),
                source,
            })
        };
        let upload_url = join(UPLOAD_PATH)?;
        let analyze_url = join(ANALYZE_PATH)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            upload_url,
            analyze_url,
        })
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }
}

#[async_trait::async_trait]
impl AnalysisBackend for ReqwestBackend {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, SubmitError> {
        let part = Part::bytes(request.bytes.clone()).file_name(request.file_name.clone());
        let form = Form::new()
            .part("file", part)
            .text("job_description", request.job_description.clone());

        let response = self
            .client
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|err| map_reqwest_error(Stage::Uploading, err))?;

        decode_json(Stage::Uploading, response).await
    }

    async fn analyze(&self, file_name: &str) -> Result<AnalysisReport, SubmitError> {
        let response = self
            .client
            .post(self.analyze_url.clone())
            .json(&AnalyzeRequest { file_name })
            .send()
            .await
            .map_err(|err| map_reqwest_error(Stage::Analyzing, err))?;

        decode_json(Stage::Analyzing, response).await
    }
}

/// Endpoint paths are joined relative to the base, so it must end in `/`.
fn parse_base_url(raw: &str) -> Result<Url, EngineError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalized).map_err(|source| EngineError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })
}

async fn decode_json<T: DeserializeOwned>(
    stage: Stage,
    response: reqwest::Response,
) -> Result<T, SubmitError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|err| map_reqwest_error(stage, err))?;

    if !status.is_success() {
        let detail = error_detail(&body);
        analyzer_warn!("{} returned {}: {}", stage, status, detail);
        return Err(SubmitError::new(
            stage,
            FailureKind::HttpStatus(status.as_u16()),
            detail,
        ));
    }

    analyzer_debug!("{} returned {} ({} bytes)", stage, status, body.len());
    serde_json::from_slice(&body)
        .map_err(|err| SubmitError::new(stage, FailureKind::MalformedResponse, err.to_string()))
}

/// FastAPI reports errors as `{"detail": ...}`; fall back to the raw body.
fn error_detail(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        "empty response body".to_string()
    } else {
        text.chars().take(200).collect()
    }
}

fn map_reqwest_error(stage: Stage, err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(stage, FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return SubmitError::new(stage, FailureKind::InvalidUrl, err.to_string());
    }
    SubmitError::new(stage, FailureKind::Network, err.to_string())
}
