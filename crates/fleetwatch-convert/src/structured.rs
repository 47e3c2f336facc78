// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in converter for records supplied in a known layout.
//!
//! Text is read as `key: value` or `key = value` pairs, one per line or
//! separated by `;`. Documents may be CSV (header row plus one data row),
//! a JSON object, or plain text in the same pair format. Photos need an
//! extraction service and are rejected.

use async_trait::async_trait;
use tracing::debug;

use fleetwatch_core::{
    AdapterType, ContentConverter, FleetError, HealthStatus, PluginAdapter, VehicleRecord,
};

use crate::fields::{record_from_pairs, resolve_column};

#[derive(Debug, Default, Clone)]
pub struct StructuredConverter;

impl StructuredConverter {
    pub fn new() -> Self {
        Self
    }
}

/// Splits text into `(key, value)` pairs on the first `:` or `=`.
fn parse_pairs(text: &str) -> Vec<(&str, String)> {
    text.split(['\n', ';'])
        .filter_map(|segment| {
            let split = segment.find([':', '='])?;
            let key = segment[..split].trim();
            let value = segment[split + 1..].trim();
            (!key.is_empty()).then(|| (key, value.to_string()))
        })
        .collect()
}

fn parse_csv_document(text: &str) -> Result<VehicleRecord, FleetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let header = reader
        .headers()
        .map_err(|e| FleetError::conversion(format!("unreadable CSV header: {e}")))?
        .clone();
    let row = reader
        .records()
        .next()
        .ok_or_else(|| FleetError::conversion("CSV document has no data row"))?
        .map_err(|e| FleetError::conversion(format!("unreadable CSV row: {e}")))?;

    record_from_pairs(
        header
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key, value.to_string())),
    )
}

fn parse_json_document(text: &str) -> Result<VehicleRecord, FleetError> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)
        .map_err(|e| FleetError::ConversionFailed {
            message: format!("not a JSON object: {e}"),
            source: Some(Box::new(e)),
        })?;

    record_from_pairs(object.iter().filter_map(|(key, value)| {
        let cell = match value {
            serde_json::Value::Null => return None,
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Bool(b) => fleetwatch_core::record::format_bool_like(*b).to_string(),
            other => other.to_string(),
        };
        Some((key.as_str(), cell))
    }))
}

/// True if the first line looks like a header naming at least one column.
fn looks_like_csv(text: &str) -> bool {
    text.lines()
        .next()
        .is_some_and(|first| first.contains(',') && first.split(',').any(|h| resolve_column(h).is_some()))
}

#[async_trait]
impl PluginAdapter for StructuredConverter {
    fn name(&self) -> &str {
        "structured"
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
impl ContentConverter for StructuredConverter {
    async fn convert_text(&self, text: &str) -> Result<VehicleRecord, FleetError> {
        let pairs = parse_pairs(text);
        debug!(pairs = pairs.len(), "parsed text pairs");
        record_from_pairs(pairs)
    }

    async fn convert_document(
        &self,
        data: &[u8],
        filename: &str,
    ) -> Result<VehicleRecord, FleetError> {
        let text = std::str::from_utf8(data)
            .map_err(|_| FleetError::conversion(format!("{filename} is not UTF-8 text")))?;
        let text = text.trim_start_matches('\u{feff}').trim();
        let lower = filename.to_ascii_lowercase();

        if lower.ends_with(".json") || text.starts_with('{') {
            debug!(filename, "reading JSON document");
            parse_json_document(text)
        } else if lower.ends_with(".csv") || looks_like_csv(text) {
            debug!(filename, "reading CSV document");
            parse_csv_document(text)
        } else {
            debug!(filename, "reading text document");
            record_from_pairs(parse_pairs(text))
        }
    }

    async fn convert_photo(&self, _data: &[u8]) -> Result<VehicleRecord, FleetError> {
        Err(FleetError::conversion(
            "photos need an extraction service (set conversion.endpoint)",
        ))
    }
}
