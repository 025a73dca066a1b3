use std::time::Duration;

use feedback_logging::{feedback_debug, feedback_warn};
use magnet_core::{DispatchRequest, DispatchResponse, DispatchResult};
use reqwest::header::CONTENT_TYPE;

use crate::{DispatchError, FailureKind};

pub const SEND_TO_QUEUE_PATH: &str = "/send_to_qb";

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Origin of the page server that fronts the download queue.
    pub base_url: String,
    /// `None` keeps the transport default (no limit).
    pub connect_timeout: Option<Duration>,
    /// `None` keeps the transport default (no limit).
    pub request_timeout: Option<Duration>,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait QueueDispatcher: Send + Sync {
    /// Makes exactly one attempt to hand `request` to the download queue.
    async fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchResult, DispatchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestDispatcher {
    pub fn new(settings: DispatchSettings) -> Result<Self, DispatchError> {
        let endpoint = endpoint_url(&settings.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| DispatchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl QueueDispatcher for ReqwestDispatcher {
    async fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchResult, DispatchError> {
        let body = serde_json::to_vec(request)
            .map_err(|err| DispatchError::new(FailureKind::Encoding, err.to_string()))?;
        feedback_debug!(
            "POST {} is_series={} magnet_len={}",
            self.endpoint,
            request.is_series(),
            request.magnet().len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // The backend reports its own failures as JSON with a 4xx status, so
        // the body decides the outcome, not the HTTP status.
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let parsed: DispatchResponse = serde_json::from_slice(&bytes).map_err(|err| {
            feedback_warn!("Unreadable response from {} ({}): {}", self.endpoint, status, err);
            DispatchError::new(
                FailureKind::MalformedResponse {
                    http_status: status.as_u16(),
                },
                err.to_string(),
            )
        })?;

        Ok(parsed.into())
    }
}

fn endpoint_url(base_url: &str) -> Result<reqwest::Url, DispatchError> {
    let joined = format!("{}{}", base_url.trim_end_matches('/'), SEND_TO_QUEUE_PATH);
    reqwest::Url::parse(&joined)
        .map_err(|err| DispatchError::new(FailureKind::InvalidUrl, format!("{joined}: {err}")))
}

fn map_reqwest_error(err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        return DispatchError::new(FailureKind::Timeout, err.to_string());
    }
    DispatchError::new(FailureKind::Network, err.to_string())
}
