// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Converter backed by a remote extraction service.
//!
//! Content is POSTed as JSON: `{"kind", "filename"?, "content"}` where binary
//! content is base64-encoded. The service answers with one record keyed by
//! dataset column names.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;
use tracing::{debug, warn};

use fleetwatch_config::model::ConversionConfig;
use fleetwatch_core::{
    AdapterType, ContentConverter, FleetError, HealthStatus, PluginAdapter, VehicleRecord,
};

#[derive(Debug, Serialize)]
struct ExtractionRequest<'a> {
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<&'a str>,
    content: String,
}

#[derive(Debug, Clone)]
pub struct HttpConverter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpConverter {
    /// Builds a client for `config.endpoint`, attaching the bearer key if set.
    pub fn new(config: &ConversionConfig) -> Result<Self, FleetError> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| FleetError::Config("conversion.endpoint is not set".into()))?;

        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                FleetError::Config(format!("invalid conversion.api_key header value: {e}"))
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FleetError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn extract(&self, request: ExtractionRequest<'_>) -> Result<VehicleRecord, FleetError> {
        let kind = request.kind;
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "extraction service timed out".to_string()
                } else {
                    format!("extraction request failed: {e}")
                };
                FleetError::ConversionFailed {
                    message,
                    source: Some(Box::new(e)),
                }
            })?;

        let status = response.status();
        debug!(status = %status, kind, "extraction response received");

        let body = response.text().await.map_err(|e| FleetError::ConversionFailed {
            message: format!("failed to read extraction response: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            warn!(status = %status, body = %body, "extraction service rejected content");
            return Err(FleetError::conversion(format!(
                "extraction service returned {status}"
            )));
        }

        serde_json::from_str::<VehicleRecord>(&body).map_err(|e| FleetError::ConversionFailed {
            message: format!("malformed extraction response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn encode(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

#[async_trait]
impl PluginAdapter for HttpConverter {
    fn name(&self) -> &str {
        "http"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Converter
    }

    async fn health_check(&self) -> Result<HealthStatus, FleetError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FleetError> {
        Ok(())
    }
}

#[async_trait]
impl ContentConverter for HttpConverter {
    async fn convert_text(&self, text: &str) -> Result<VehicleRecord, FleetError> {
        self.extract(ExtractionRequest {
            kind: "text",
            filename: None,
            content: text.to_string(),
        })
        .await
    }

    async fn convert_document(
        &self,
        data: &[u8],
        filename: &str,
    ) -> Result<VehicleRecord, FleetError> {
        self.extract(ExtractionRequest {
            kind: "document",
            filename: Some(filename),
            content: encode(data),
        })
        .await
    }

    async fn convert_photo(&self, data: &[u8]) -> Result<VehicleRecord, FleetError> {
        self.extract(ExtractionRequest {
            kind: "photo",
            filename: None,
            content: encode(data),
        })
        .await
    }
}
