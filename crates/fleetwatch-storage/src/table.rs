// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing and encoding of the raw fleet table.

use csv::{StringRecord, Terminator};
use tracing::warn;

use fleetwatch_core::record::{COL_ID, COLUMNS};
use fleetwatch_core::{FleetError, VehicleRecord};

/// A parsed fleet table: its header and one record per data row.
#[derive(Debug)]
pub struct FleetTable {
    pub header: StringRecord,
    pub records: Vec<VehicleRecord>,
}

impl FleetTable {
    /// True if some row already uses `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }
}

/// Parses the whole CSV file.
///
/// A header missing any known column makes the table unusable. Every data
/// row becomes a record; cells that do not parse are read as absent.
pub fn parse_table(bytes: &[u8]) -> Result<FleetTable, FleetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let header = reader
        .headers()
        .map_err(|e| store_error("unreadable header", e))?
        .clone();

    let missing: Vec<&str> = COLUMNS
        .iter()
        .copied()
        .filter(|col| !header.iter().any(|h| h.trim() == *col))
        .collect();
    if !missing.is_empty() {
        return Err(FleetError::store(format!(
            "header is missing columns: {}",
            missing.join(", ")
        )));
    }

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| store_error("unreadable row", e))?;
        let cell = |column: &str| {
            header
                .iter()
                .position(|h| h.trim() == column)
                .and_then(|i| row.get(i))
        };
        let record = VehicleRecord::from_stored_cells(cell);
        if record.id.is_empty() {
            warn!(row = index + 2, "row has no {COL_ID}");
        }
        records.push(record);
    }

    Ok(FleetTable { header, records })
}

/// Encodes a record as one CSV line laid out in `header` order.
///
/// Header columns the record does not know about get an empty cell. The
/// line terminator follows the existing file.
pub fn encode_row(
    header: &StringRecord,
    record: &VehicleRecord,
    terminator: Terminator,
) -> Result<Vec<u8>, FleetError> {
    let cells = record.to_cells();
    let row: Vec<&str> = header
        .iter()
        .map(|h| {
            cells
                .iter()
                .find(|(col, _)| *col == h.trim())
                .map(|(_, v)| v.as_str())
                .unwrap_or("")
        })
        .collect();

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(terminator)
        .from_writer(Vec::new());
    writer
        .write_record(&row)
        .map_err(|e| store_error("could not encode row", e))?;
    writer
        .into_inner()
        .map_err(|e| FleetError::store(format!("could not encode row: {e}")))
}

/// Line terminator used by an existing file: CRLF if its first line ends so.
pub fn detect_terminator(bytes: &[u8]) -> Terminator {
    match bytes.iter().position(|b| *b == b'\n') {
        Some(i) if i > 0 && bytes[i - 1] == b'\r' => Terminator::CRLF,
        _ => Terminator::Any(b'\n'),
    }
}

fn store_error(what: &str, e: csv::Error) -> FleetError {
    FleetError::StoreUnavailable {
        message: format!("{what}: {e}"),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Trainset_ID,JobCard_OpenOrders,Fitness_RollingStock_ValidTill,Fitness_Signalling_ValidTill,Fitness_Telecom_ValidTill,Mileage_KM,Branding_Exposure_HoursRequired,Cleaning_Slot_Available,Bay_Position,Shunting_Distance_m,Performance_Score";

    #[test]
    fn parses_rows_and_normalizes_dates() {
        let csv = format!(
            "{HEADER}\nKM01,0,2025-10-01 00:00:00,2025/10/02,,1200.5,4,True,B1,120,0.92\n"
        );
        let table = parse_table(csv.as_bytes()).unwrap();
        assert_eq!(table.records.len(), 1);
        let r = &table.records[0];
        assert_eq!(r.id, "KM01");
        assert_eq!(r.rolling_stock_valid_till.unwrap().to_string(), "2025-10-01");
        assert_eq!(r.signalling_valid_till.unwrap().to_string(), "2025-10-02");
        assert!(r.telecom_valid_till.is_none());
    }

    #[test]
    fn keeps_leading_zeros_in_ids() {
        let csv = format!("{HEADER}\n007,1,,,,1,1,False,B2,1,1\n");
        let table = parse_table(csv.as_bytes()).unwrap();
        assert_eq!(table.records[0].id, "007");
    }

    #[test]
    fn missing_column_is_a_store_failure() {
        let err = parse_table(b"Trainset_ID,Mileage_KM\nKM01,3\n").unwrap_err();
        assert!(err.is_store_failure());
        assert!(err.to_string().contains("JobCard_OpenOrders"));
    }

    #[test]
    fn malformed_cells_keep_their_row() {
        let csv = format!(
            "{HEADER}\nKM01,x,,,,1,1,True,B1,1,1\nKM02,2,2025-01-01,,,,1,True,B1,1,1\n"
        );
        let table = parse_table(csv.as_bytes()).unwrap();
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].id, "KM01");
        assert_eq!(table.records[0].open_job_card_count, None);
        assert_eq!(table.records[1].mileage_km, None);
        assert_eq!(table.records[1].open_job_card_count, Some(2));
        assert!(table.contains_id("KM02"));
        assert!(!table.contains_id("km02"));
    }

    #[test]
    fn short_rows_are_kept() {
        let csv = format!("{HEADER}\nKM03,1\n");
        let table = parse_table(csv.as_bytes()).unwrap();
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].open_job_card_count, Some(1));
        assert_eq!(table.records[0].performance_score, None);
    }

    #[test]
    fn encodes_in_header_order_with_blanks_for_extra_columns() {
        let header = StringRecord::from(vec!["Notes", "Trainset_ID", "Mileage_KM"]);
        let csv = format!("{HEADER}\nKM09,2,,,,15.5,3,True,\"B, 4\",1,1\n");
        let record = parse_table(csv.as_bytes()).unwrap().records.remove(0);
        let line = encode_row(&header, &record, Terminator::Any(b'\n')).unwrap();
        assert_eq!(String::from_utf8(line).unwrap(), ",KM09,15.5\n");

        let full = StringRecord::from(COLUMNS.to_vec());
        let line = encode_row(&full, &record, Terminator::CRLF).unwrap();
        let text = String::from_utf8(line).unwrap();
        assert!(text.contains("\"B, 4\""));
        assert!(text.ends_with("\r\n"));
    }

    #[test]
    fn detects_crlf_files() {
        assert!(matches!(detect_terminator(b"a,b\r\n1,2\r\n"), Terminator::CRLF));
        assert!(matches!(detect_terminator(b"a,b\n1,2\n"), Terminator::Any(b'\n')));
    }
}
