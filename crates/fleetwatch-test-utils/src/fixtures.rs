// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fleet data for tests.

use chrono::NaiveDate;
use fleetwatch_core::VehicleRecord;

/// Date the sample fleet is evaluated against: 2025-09-30.
pub const SAMPLE_TODAY: (i32, u32, u32) = (2025, 9, 30);

/// Four trains: two in maintenance, and four certificates due within a
/// week of [`SAMPLE_TODAY`] (one already expired).
pub const SAMPLE_FLEET_CSV: &str = "\
Trainset_ID,JobCard_OpenOrders,Fitness_RollingStock_ValidTill,Fitness_Signalling_ValidTill,Fitness_Telecom_ValidTill,Mileage_KM,Branding_Exposure_HoursRequired,Cleaning_Slot_Available,Bay_Position,Shunting_Distance_m,Performance_Score
KM01,0,2025-10-03,2026-03-01,2026-03-01,12000.5,4,True,B1,120,0.92
KM02,2,2026-01-10,2025-10-05,,8400,0,False,IBL-2,60,0.71
KM03,0,2025-09-28 00:00:00,2026-02-01,2025-10-07,15010,6,True,B3,95,0.88
KM04,1,2026-06-01,2026-06-01,2026-06-01,3100,2,False,IBL-1,40,0.64
";

pub fn sample_today() -> NaiveDate {
    let (y, m, d) = SAMPLE_TODAY;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// A complete, valid record with the given id.
pub fn sample_record(id: &str) -> VehicleRecord {
    VehicleRecord {
        id: id.to_string(),
        open_job_card_count: Some(0),
        rolling_stock_valid_till: NaiveDate::from_ymd_opt(2026, 4, 1),
        signalling_valid_till: NaiveDate::from_ymd_opt(2026, 4, 2),
        telecom_valid_till: None,
        mileage_km: Some(500.0),
        branding_hours_required: Some(1.5),
        cleaning_slot_available: Some(true),
        bay_position: "B9".to_string(),
        shunting_distance_m: Some(25.0),
        performance_score: Some(0.8),
    }
}
