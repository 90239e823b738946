//! REST transport for the professionals endpoints
//!
//! [`ProfessionalApi`] is the only boundary between the form/list logic and
//! the network. The HTTP implementation decides the shape of a failed create
//! request once, here, so callers pattern-match instead of inspecting bodies.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::bulk::{BulkUpsertReport, ProfilePatch};
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::types::{ErrorMap, Professional, ProfessionalDraft, SourceFilter};

/// Successful create response. The body is kept only if it decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAck {
    pub status: u16,
    pub record: Option<Professional>,
}

/// Body of a non-2xx create response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// JSON object of field -> message(s), possibly with no keys
    Structured(ErrorMap),
    /// Anything else with content
    Text(String),
    Empty,
}

impl ResponseBody {
    pub fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Null) => Self::Empty,
            Ok(value @ Value::Object(_)) => match serde_json::from_value::<ErrorMap>(value) {
                Ok(map) => Self::Structured(map),
                Err(_) => Self::Text(text),
            },
            Ok(Value::String(s)) if s.trim().is_empty() => Self::Empty,
            Ok(Value::String(s)) => Self::Text(s),
            _ => Self::Text(text),
        }
    }
}

/// Why a create request failed, decided at the transport boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateFailure {
    /// The server answered with a non-2xx status
    #[error("server responded with status {status}")]
    Response { status: u16, body: ResponseBody },

    /// The request went out but no response came back
    #[error("no response received: {0}")]
    NoResponse(String),

    /// The request could not be built or sent
    #[error("request setup failed: {0}")]
    RequestSetup(String),
}

#[async_trait]
pub trait ProfessionalApi: Send + Sync {
    /// `POST /professionals/` with the draft as JSON
    async fn create(&self, draft: &ProfessionalDraft) -> Result<CreateAck, CreateFailure>;

    /// `GET /professionals/[?source=..]`
    async fn list(&self, filter: SourceFilter) -> Result<Vec<Professional>, ApiError>;

    /// `POST /professionals/bulk` with a list of partial profiles
    async fn bulk_upsert(&self, profiles: &[ProfilePatch]) -> Result<BulkUpsertReport, ApiError>;
}

#[async_trait]
impl<T: ProfessionalApi + ?Sized> ProfessionalApi for Arc<T> {
    async fn create(&self, draft: &ProfessionalDraft) -> Result<CreateAck, CreateFailure> {
        (**self).create(draft).await
    }

    async fn list(&self, filter: SourceFilter) -> Result<Vec<Professional>, ApiError> {
        (**self).list(filter).await
    }

    async fn bulk_upsert(&self, profiles: &[ProfilePatch]) -> Result<BulkUpsertReport, ApiError> {
        (**self).bulk_upsert(profiles).await
    }
}

/// reqwest-backed client for the professionals REST API
#[derive(Debug, Clone)]
pub struct HttpProfessionalApi {
    http: Client,
    config: ClientConfig,
}

impl HttpProfessionalApi {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl ProfessionalApi for HttpProfessionalApi {
    async fn create(&self, draft: &ProfessionalDraft) -> Result<CreateAck, CreateFailure> {
        let url = self
            .config
            .professionals_url()
            .map_err(|e| CreateFailure::RequestSetup(e.to_string()))?;

        let response = self
            .http
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status().as_u16();
        if response.status().is_success() {
            let record = match response.text().await {
                Ok(text) => serde_json::from_str::<Professional>(&text).ok(),
                Err(e) => {
                    debug!("Ignoring unreadable create response body: {}", e);
                    None
                }
            };
            info!(
                status,
                id = ?record.as_ref().map(|r| r.id),
                "Professional created"
            );
            return Ok(CreateAck { status, record });
        }

        let body = match response.text().await {
            Ok(text) => ResponseBody::from_text(text),
            Err(e) => {
                warn!("Failed to read error body for status {}: {}", status, e);
                ResponseBody::Empty
            }
        };
        warn!(status, ?body, "There was an error creating the professional");
        Err(CreateFailure::Response { status, body })
    }

    async fn list(&self, filter: SourceFilter) -> Result<Vec<Professional>, ApiError> {
        let mut url = self.config.professionals_url()?;
        if let Some(source) = filter.query_value() {
            url.query_pairs_mut().append_pair("source", source);
        }
        debug!(%url, "Fetching professionals");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn bulk_upsert(&self, profiles: &[ProfilePatch]) -> Result<BulkUpsertReport, ApiError> {
        let url = self.config.bulk_url()?;
        debug!(%url, count = profiles.len(), "Posting bulk upsert");

        let response = self.http.post(url).json(profiles).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let report: BulkUpsertReport = serde_json::from_str(&text)?;
        info!(
            status = status.as_u16(),
            success_count = report.success_count,
            failure_count = report.failure_count,
            "Bulk upsert finished"
        );
        Ok(report)
    }
}

/// Tag a reqwest error that happened before any response arrived.
///
/// Builder errors (bad URL, unsupported scheme, unserializable body) mean
/// nothing was sent; everything else happened after the request went out.
fn transport_failure(err: reqwest::Error) -> CreateFailure {
    if err.is_builder() {
        warn!("Create request could not be sent: {}", err);
        CreateFailure::RequestSetup(err.to_string())
    } else {
        warn!("No response to create request: {}", err);
        CreateFailure::NoResponse(err.to_string())
    }
}
