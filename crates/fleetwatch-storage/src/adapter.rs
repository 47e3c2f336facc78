// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV implementation of the RecordStore trait.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use fleetwatch_config::model::StorageConfig;
use fleetwatch_core::{
    AdapterType, FleetError, HealthStatus, PluginAdapter, RecordStore, VehicleRecord,
};

use crate::table::{detect_terminator, encode_row, parse_table};

/// Record store backed by one CSV file.
///
/// Every read goes to disk so external edits are picked up. Appends hold
/// `write_lock` across the whole read-modify-write cycle, so the id
/// uniqueness check and the write see the same file.
pub struct CsvRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvRecordStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self::at(&config.data_path)
    }

    /// Store over an explicit file path.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, FleetError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| FleetError::StoreUnavailable {
                message: format!("cannot read {}: {e}", self.path.display()),
                source: Some(Box::new(e)),
            })
    }
}

#[async_trait]
impl PluginAdapter for CsvRecordStore {
    fn name(&self) -> &str {
        "csv"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, FleetError> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => Ok(HealthStatus::Healthy),
            Ok(_) => Ok(HealthStatus::Unhealthy(format!(
                "{} is not a regular file",
                self.path.display()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), FleetError> {
        // Wait out an in-flight append.
        let _guard = self.write_lock.lock().await;
        debug!("csv store shut down");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for CsvRecordStore {
    async fn initialize(&self) -> Result<(), FleetError> {
        let bytes = self.read_bytes().await?;
        let table = parse_table(&bytes)?;
        info!(
            path = %self.path.display(),
            records = table.records.len(),
            "fleet dataset loaded"
        );
        Ok(())
    }

    async fn records(&self) -> Result<Vec<VehicleRecord>, FleetError> {
        let bytes = self.read_bytes().await?;
        Ok(parse_table(&bytes)?.records)
    }

    async fn append(&self, record: VehicleRecord) -> Result<usize, FleetError> {
        let _guard = self.write_lock.lock().await;

        let mut bytes = self.read_bytes().await?;
        let table = parse_table(&bytes)?;
        if table.contains_id(&record.id) {
            return Err(FleetError::DuplicateRecord { id: record.id });
        }
        let row = encode_row(&table.header, &record, detect_terminator(&bytes))?;

        if !bytes.is_empty() && !bytes.ends_with(b"\n") {
            bytes.extend_from_slice(if row.ends_with(b"\r\n") { b"\r\n" } else { b"\n" });
        }
        bytes.extend_from_slice(&row);

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || replace_file(&path, &bytes))
            .await
            .map_err(|e| FleetError::Internal(format!("append task failed: {e}")))??;

        let size = table.records.len() + 1;
        debug!(id = %record.id, size, "record appended");
        Ok(size)
    }

    async fn export(&self) -> Result<Vec<u8>, FleetError> {
        self.read_bytes().await
    }
}

/// Writes `contents` to a temp file beside `path`, then renames it over `path`.
fn replace_file(path: &Path, contents: &[u8]) -> Result<(), FleetError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let io_err = |what: &str, e: std::io::Error| FleetError::StoreUnavailable {
        message: format!("{what} {}: {e}", path.display()),
        source: Some(Box::new(e)),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| io_err("cannot stage", e))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| io_err("cannot write", e))?;
    tmp.persist(path)
        .map_err(|e| io_err("cannot replace", e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Trainset_ID,JobCard_OpenOrders,Fitness_RollingStock_ValidTill,Fitness_Signalling_ValidTill,Fitness_Telecom_ValidTill,Mileage_KM,Branding_Exposure_HoursRequired,Cleaning_Slot_Available,Bay_Position,Shunting_Distance_m,Performance_Score
KM01,0,2025-10-01,2025-10-05,2025-12-01,1200,4,True,B1,120,0.92
";

    fn store_with(contents: &str) -> (tempfile::TempDir, CsvRecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metro_data.csv");
        std::fs::write(&path, contents).unwrap();
        let store = CsvRecordStore::at(&path);
        (dir, store)
    }

    #[tokio::test]
    async fn initialize_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvRecordStore::at(dir.path().join("absent.csv"));
        let err = store.initialize().await.unwrap_err();
        assert!(err.is_store_failure());
    }

    #[tokio::test]
    async fn health_reflects_the_file() {
        let (_dir, store) = store_with(SAMPLE);
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
        std::fs::remove_file(store.path()).unwrap();
        assert!(matches!(
            store.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }

    #[tokio::test]
    async fn records_rereads_the_file() {
        let (_dir, store) = store_with(SAMPLE);
        assert_eq!(store.records().await.unwrap().len(), 1);
        let mut more = SAMPLE.to_string();
        more.push_str("KM02,3,,,,10,0,False,B2,5,0.5\n");
        std::fs::write(store.path(), more).unwrap();
        assert_eq!(store.records().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn append_adds_a_line_and_reports_size() {
        let (_dir, store) = store_with(SAMPLE.trim_end());
        let mut record = store.records().await.unwrap().remove(0);
        record.id = "KM30".into();
        assert_eq!(store.append(record).await.unwrap(), 2);

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with(SAMPLE));
        assert!(text.ends_with("KM30,0,2025-10-01,2025-10-05,2025-12-01,1200,4,True,B1,120,0.92\n"));
    }

    #[tokio::test]
    async fn append_rejects_an_existing_id() {
        let (_dir, store) = store_with(SAMPLE);
        let record = store.records().await.unwrap().remove(0);
        let err = store.append(record).await.unwrap_err();
        assert!(matches!(err, FleetError::DuplicateRecord { ref id } if id == "KM01"));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), SAMPLE);
    }

    #[tokio::test]
    async fn export_returns_raw_bytes() {
        let (_dir, store) = store_with(SAMPLE);
        assert_eq!(store.export().await.unwrap(), SAMPLE.as_bytes());
    }
}
