// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock content converter with scripted outcomes.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use fleetwatch_core::{
    AdapterType, ContentConverter, FleetError, HealthStatus, InputMode, PluginAdapter,
    VehicleRecord,
};

/// Returns queued outcomes in order and records which input kinds it saw.
///
/// With an empty queue every call fails.
pub struct MockConverter {
    outcomes: Arc<Mutex<VecDeque<Result<VehicleRecord, String>>>>,
    calls: Arc<Mutex<Vec<InputMode>>>,
}

impl MockConverter {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn push_record(&self, record: VehicleRecord) {
        self.outcomes.lock().await.push_back(Ok(record));
    }

    pub async fn push_failure(&self, reason: impl Into<String>) {
        self.outcomes.lock().await.push_back(Err(reason.into()));
    }

    /// Input kinds converted so far, in call order.
    pub async fn calls(&self) -> Vec<InputMode> {
        self.calls.lock().await.clone()
    }

    async fn next(&self, mode: InputMode) -> Result<VehicleRecord, FleetError> {
        self.calls.lock().await.push(mode);
        match self.outcomes.lock().await.pop_front() {
            Some(Ok(record)) => Ok(record),
            Some(Err(reason)) => Err(FleetError::conversion(reason)),
            None => Err(FleetError::conversion("no scripted outcome")),
        }
    }
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockConverter {
    fn name(&self) -> &str {
        "mock-converter"
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
impl ContentConverter for MockConverter {
    async fn convert_text(&self, _text: &str) -> Result<VehicleRecord, FleetError> {
        self.next(InputMode::Text).await
    }

    async fn convert_document(
        &self,
        _data: &[u8],
        _filename: &str,
    ) -> Result<VehicleRecord, FleetError> {
        self.next(InputMode::Document).await
    }

    async fn convert_photo(&self, _data: &[u8]) -> Result<VehicleRecord, FleetError> {
        self.next(InputMode::Photo).await
    }
}
