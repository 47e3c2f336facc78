// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content conversion trait: raw user content to a candidate record.

use async_trait::async_trait;

use crate::error::FleetError;
use crate::record::VehicleRecord;
use crate::traits::adapter::PluginAdapter;

/// Turns free-form user content into a [`VehicleRecord`].
///
/// Every method reports failure as [`FleetError::ConversionFailed`].
#[async_trait]
pub trait ContentConverter: PluginAdapter {
    /// Converts a text message.
    async fn convert_text(&self, text: &str) -> Result<VehicleRecord, FleetError>;

    /// Converts an uploaded document.
    async fn convert_document(
        &self,
        data: &[u8],
        filename: &str,
    ) -> Result<VehicleRecord, FleetError>;

    /// Converts a photo.
    async fn convert_photo(&self, data: &[u8]) -> Result<VehicleRecord, FleetError>;
}
