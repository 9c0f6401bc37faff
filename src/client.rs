//! HTTP client for the scoring server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::models::{OrsResult, PatientParameters, ResearchSnapshot};

/// Endpoint paths, relative to the configured base URL.
pub const CALCULATE_ORS_PATH: &str = "api/calculate-ors";
pub const RESEARCH_CASES_PATH: &str = "api/research/cases";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("server responded with {0}")]
    Status(StatusCode),

    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid base url: {0}")]
    Url(#[from] url::ParseError),
}

/// Coarse failure category, for callers that show it to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Server,
    Response,
}

impl FailureKind {
    pub fn describe(self) -> &'static str {
        match self {
            FailureKind::Transport => "Could not reach the scoring service",
            FailureKind::Server => "The scoring service returned an error",
            FailureKind::Response => "The scoring service sent an unreadable response",
        }
    }
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Transport(_) | ClientError::Url(_) => FailureKind::Transport,
            ClientError::Status(_) => FailureKind::Server,
            ClientError::Decode(_) => FailureKind::Response,
        }
    }
}

/// The two endpoints the dashboard consumes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoringApi: Send + Sync {
    async fn calculate_ors(&self, params: &PatientParameters) -> Result<OrsResult, ClientError>;

    async fn research_cases(&self) -> Result<ResearchSnapshot, ClientError>;
}

/// reqwest-backed [`ScoringApi`]. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    client: Client,
    base_url: Url,
}

impl HttpScoringClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build().map_err(ClientError::Transport)?,
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint under the base URL, keeping any path prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            // Error bodies are never read.
            return Err(ClientError::Status(status));
        }
        let body = response.bytes().await.map_err(ClientError::Transport)?;
        serde_json::from_slice(&body).map_err(ClientError::Decode)
    }
}

/// Parse the base URL so that relative joins append to its path.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl ScoringApi for HttpScoringClient {
    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn calculate_ors(&self, params: &PatientParameters) -> Result<OrsResult, ClientError> {
        let url = self.endpoint(CALCULATE_ORS_PATH)?;
        debug!(%url, "Submitting parameters");
        let response = self
            .client
            .post(url)
            .json(params)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(response).await
    }

    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn research_cases(&self) -> Result<ResearchSnapshot, ClientError> {
        let url = self.endpoint(RESEARCH_CASES_PATH)?;
        debug!(%url, "Fetching research snapshot");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(response).await
    }
}
