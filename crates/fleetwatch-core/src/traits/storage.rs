// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait for the fleet dataset.

use async_trait::async_trait;

use crate::error::FleetError;
use crate::record::VehicleRecord;
use crate::traits::adapter::PluginAdapter;

/// Flat record store addressable by vehicle identifier.
///
/// Implementations must serialize [`append`](Self::append) so that two
/// overlapping appends never lose a row.
#[async_trait]
pub trait RecordStore: PluginAdapter {
    /// Loads the dataset for the first time. Failure here is fatal to the process.
    async fn initialize(&self) -> Result<(), FleetError>;

    /// Returns every record in store order.
    async fn records(&self) -> Result<Vec<VehicleRecord>, FleetError>;

    /// Appends one record and returns the new record count.
    async fn append(&self, record: VehicleRecord) -> Result<usize, FleetError>;

    /// Returns the raw bytes of the backing file, exactly as stored.
    async fn export(&self) -> Result<Vec<u8>, FleetError>;
}
