// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `fleetwatch check` and `fleetwatch alerts` command implementations.
//!
//! Both read the configured data file once and print to stdout; neither
//! needs a bot token.

use chrono::NaiveDate;
use fleetwatch_config::FleetwatchConfig;
use fleetwatch_core::{FleetError, RecordStore, VehicleRecord};
use fleetwatch_fleet::{find_due_soon, summarize};
use fleetwatch_storage::CsvRecordStore;
use tracing::info;

/// Loads every record from the configured data file.
pub async fn load_records(config: &FleetwatchConfig) -> Result<Vec<VehicleRecord>, FleetError> {
    let store = CsvRecordStore::new(&config.storage);
    store.initialize().await?;
    store.records().await
}

/// Summary text printed by `check`.
pub fn check_report(config: &FleetwatchConfig, records: &[VehicleRecord]) -> String {
    format!(
        "config ok (agent.name={})\ndata file: {} ({} records)\n\n{}",
        config.agent.name,
        config.storage.data_path,
        records.len(),
        summarize(records).render()
    )
}

/// Alert messages printed by `alerts`, in send order.
pub fn alert_messages(
    config: &FleetwatchConfig,
    records: &[VehicleRecord],
    days: Option<u32>,
    today: NaiveDate,
) -> Vec<String> {
    let window_days = days.unwrap_or(config.alerts.window_days);
    find_due_soon(records, window_days, today, config.alerts.chunk_ceiling).messages()
}

pub async fn run_check(config: &FleetwatchConfig) -> Result<(), FleetError> {
    let records = load_records(config).await?;
    info!(records = records.len(), "data file loaded");
    println!("{}", check_report(config, &records));
    Ok(())
}

pub async fn run_alerts(config: &FleetwatchConfig, days: Option<u32>) -> Result<(), FleetError> {
    let records = load_records(config).await?;
    let today = chrono::Local::now().date_naive();
    for message in alert_messages(config, &records, days, today) {
        println!("{message}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetwatch_fleet::alerts::{ALERT_HEADER, NO_ALERTS_MESSAGE};
    use fleetwatch_test_utils::fixtures::{sample_today, SAMPLE_FLEET_CSV};

    fn config_with_data(dir: &tempfile::TempDir) -> FleetwatchConfig {
        let path = dir.path().join("metro_data.csv");
        std::fs::write(&path, SAMPLE_FLEET_CSV).unwrap();
        let mut config = FleetwatchConfig::default();
        config.storage.data_path = path.to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn check_prints_summary() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_data(&dir);
        let records = load_records(&config).await.unwrap();
        let text = check_report(&config, &records);
        assert!(text.contains("(4 records)"));
        assert!(text.ends_with("🚆 Current Fleet Status\n- Revenue: 2\n- Standby: 0\n- IBL: 2"));
    }

    #[tokio::test]
    async fn missing_data_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FleetwatchConfig::default();
        config.storage.data_path = dir.path().join("absent.csv").to_string_lossy().into_owned();
        assert!(matches!(
            load_records(&config).await,
            Err(FleetError::StoreUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn days_override_widens_the_window() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_data(&dir);
        let records = load_records(&config).await.unwrap();

        let week = alert_messages(&config, &records, None, sample_today());
        assert!(week[0].starts_with(ALERT_HEADER));
        assert!(!week.concat().contains("KM04"));

        let year = alert_messages(&config, &records, Some(365), sample_today());
        assert!(year.concat().contains("KM04"));
    }

    #[tokio::test]
    async fn zero_day_window_on_a_future_fleet_has_no_alerts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_data(&dir);
        let records = load_records(&config).await.unwrap();
        let long_ago = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(
            alert_messages(&config, &records, Some(0), long_ago),
            vec![NO_ALERTS_MESSAGE.to_string()]
        );
    }
}
