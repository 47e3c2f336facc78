// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-vehicle detail reports.

use std::fmt;

use chrono::NaiveDate;
use fleetwatch_core::record::format_bool_like;
use fleetwatch_core::VehicleRecord;

use crate::status::{derive_status, OperationalStatus};

/// Detailed view of one vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub record: VehicleRecord,
    pub status: OperationalStatus,
}

impl TrainReport {
    /// Renders every attribute, one per line, dates calendar-only.
    ///
    /// Absent values show as `N/A`.
    pub fn render(&self) -> String {
        let r = &self.record;
        format!(
            "🚇 Train {}\n\
             Status: {}\n\
             Open Job Cards: {}\n\
             KM Reading: {}\n\
             Rolling Stock Cert: {}\n\
             Signalling Cert: {}\n\
             Telecom Cert: {}\n\
             Branding Hours Required: {}\n\
             Cleaning Slot Available: {}\n\
             Bay Position: {}\n\
             Shunting Distance (m): {}\n\
             Performance Score: {}",
            r.id,
            self.status,
            or_na(r.open_job_card_count),
            or_na(r.mileage_km),
            date_or_na(r.rolling_stock_valid_till),
            date_or_na(r.signalling_valid_till),
            date_or_na(r.telecom_valid_till),
            or_na(r.branding_hours_required),
            or_na(r.cleaning_slot_available.map(format_bool_like)),
            r.bay_position,
            or_na(r.shunting_distance_m),
            or_na(r.performance_score),
        )
    }
}

/// Result of looking up a vehicle by id.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(TrainReport),
    /// Carries the id that was searched for.
    NotFound(String),
}

impl LookupOutcome {
    /// Renders the report, or a message naming the missing id.
    pub fn render(&self) -> String {
        match self {
            LookupOutcome::Found(report) => report.render(),
            LookupOutcome::NotFound(id) => format!("❌ No train found with ID {id}"),
        }
    }
}

/// Finds the first record whose id equals `id` exactly (case-sensitive).
pub fn lookup(records: &[VehicleRecord], id: &str) -> LookupOutcome {
    match records.iter().find(|r| r.id == id) {
        Some(record) => LookupOutcome::Found(TrainReport {
            status: derive_status(record),
            record: record.clone(),
        }),
        None => LookupOutcome::NotFound(id.to_string()),
    }
}

fn date_or_na(date: Option<NaiveDate>) -> String {
    or_na(date.map(|d| d.format("%Y-%m-%d")))
}

fn or_na<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn km07() -> VehicleRecord {
        VehicleRecord {
            id: "KM07".into(),
            open_job_card_count: Some(2),
            rolling_stock_valid_till: NaiveDate::from_ymd_opt(2024, 5, 1),
            signalling_valid_till: None,
            telecom_valid_till: NaiveDate::from_ymd_opt(2024, 6, 15),
            mileage_km: Some(15234.5),
            branding_hours_required: Some(12.0),
            cleaning_slot_available: Some(true),
            bay_position: "B4".into(),
            shunting_distance_m: Some(120.0),
            performance_score: Some(87.5),
        }
    }

    #[test]
    fn found_report_lists_every_attribute() {
        let outcome = lookup(&[km07()], "KM07");
        let text = outcome.render();
        assert_eq!(
            text,
            "🚇 Train KM07\n\
             Status: For Maintenance\n\
             Open Job Cards: 2\n\
             KM Reading: 15234.5\n\
             Rolling Stock Cert: 2024-05-01\n\
             Signalling Cert: N/A\n\
             Telecom Cert: 2024-06-15\n\
             Branding Hours Required: 12\n\
             Cleaning Slot Available: True\n\
             Bay Position: B4\n\
             Shunting Distance (m): 120\n\
             Performance Score: 87.5"
        );
    }

    #[test]
    fn absent_values_render_as_na() {
        let mut record = VehicleRecord::blank("KM02");
        record.open_job_card_count = Some(2);
        record.bay_position = "B1".into();
        let text = lookup(&[record], "KM02").render();
        assert!(text.contains("Status: For Maintenance\n"));
        assert!(text.contains("KM Reading: N/A\n"));
        assert!(text.contains("Cleaning Slot Available: N/A\n"));
        assert!(text.ends_with("Performance Score: N/A"));
    }

    #[test]
    fn match_is_exact_and_case_sensitive() {
        let records = [km07()];
        assert_eq!(
            lookup(&records, "km07"),
            LookupOutcome::NotFound("km07".into())
        );
        assert_eq!(
            lookup(&records, "KM07 "),
            LookupOutcome::NotFound("KM07 ".into())
        );
    }

    #[test]
    fn not_found_names_the_id() {
        assert_eq!(
            lookup(&[], "KM99").render(),
            "❌ No train found with ID KM99"
        );
    }
}
