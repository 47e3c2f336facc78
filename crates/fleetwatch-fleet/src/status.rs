// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operational status derivation.

use fleetwatch_core::VehicleRecord;

/// Operational state of a vehicle, derived per request and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationalStatus {
    /// Available for revenue service.
    Operational,
    /// Withdrawn for maintenance (IBL).
    ForMaintenance,
}

impl std::fmt::Display for OperationalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationalStatus::Operational => write!(f, "Operational"),
            OperationalStatus::ForMaintenance => write!(f, "For Maintenance"),
        }
    }
}

/// Derives a vehicle's status from its open job card count.
///
/// Any open job card withdraws the vehicle. Zero, negative or absent
/// counts are operational.
pub fn derive_status(record: &VehicleRecord) -> OperationalStatus {
    if record.open_job_card_count.is_some_and(|n| n > 0) {
        OperationalStatus::ForMaintenance
    } else {
        OperationalStatus::Operational
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record_with_job_cards(n: i64) -> VehicleRecord {
        let mut record = VehicleRecord::blank("KM01");
        record.open_job_card_count = Some(n);
        record
    }

    #[test]
    fn open_job_cards_mean_maintenance() {
        assert_eq!(
            derive_status(&record_with_job_cards(1)),
            OperationalStatus::ForMaintenance
        );
        assert_eq!(
            derive_status(&record_with_job_cards(0)),
            OperationalStatus::Operational
        );
    }

    #[test]
    fn negative_count_falls_through_to_operational() {
        assert_eq!(
            derive_status(&record_with_job_cards(-3)),
            OperationalStatus::Operational
        );
    }

    #[test]
    fn absent_count_is_operational() {
        assert_eq!(
            derive_status(&VehicleRecord::blank("KM01")),
            OperationalStatus::Operational
        );
    }

    #[test]
    fn display_labels() {
        assert_eq!(OperationalStatus::Operational.to_string(), "Operational");
        assert_eq!(
            OperationalStatus::ForMaintenance.to_string(),
            "For Maintenance"
        );
    }

    proptest! {
        #[test]
        fn maintenance_iff_positive_count(n in any::<i64>()) {
            let record = record_with_job_cards(n);
            let status = derive_status(&record);
            prop_assert_eq!(status == OperationalStatus::ForMaintenance, n > 0);
            prop_assert_eq!(status, derive_status(&record));
        }
    }
}
