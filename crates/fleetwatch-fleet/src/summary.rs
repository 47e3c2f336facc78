// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fleet-wide status counts.

use fleetwatch_core::VehicleRecord;

use crate::status::{derive_status, OperationalStatus};

/// Aggregated status counts for the whole fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetSummary {
    pub total: usize,
    /// Vehicles in revenue service.
    pub operational: usize,
    /// Vehicles withdrawn for maintenance (IBL).
    pub maintenance: usize,
    /// Vehicles in neither state. Always the remainder, never assumed zero.
    pub standby: usize,
}

impl FleetSummary {
    /// Renders the three-line status report.
    pub fn render(&self) -> String {
        format!(
            "🚆 Current Fleet Status\n- Revenue: {}\n- Standby: {}\n- IBL: {}",
            self.operational, self.standby, self.maintenance
        )
    }
}

/// Counts vehicles per derived status.
pub fn summarize(records: &[VehicleRecord]) -> FleetSummary {
    let mut operational = 0;
    let mut maintenance = 0;
    for record in records {
        match derive_status(record) {
            OperationalStatus::Operational => operational += 1,
            OperationalStatus::ForMaintenance => maintenance += 1,
        }
    }
    let total = records.len();

    FleetSummary {
        total,
        operational,
        maintenance,
        standby: total.saturating_sub(operational + maintenance),
    }
}
