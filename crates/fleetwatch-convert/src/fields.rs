// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-name resolution shared by the structured parsers.

use std::collections::HashMap;

use fleetwatch_core::record::{
    COL_BAY, COL_BRANDING, COL_CLEANING, COL_ID, COL_JOB_CARDS, COL_MILEAGE, COL_ROLLING_STOCK,
    COL_SCORE, COL_SHUNTING, COL_SIGNALLING, COL_TELECOM, COLUMNS,
};
use fleetwatch_core::{FleetError, VehicleRecord};

/// Short names users type instead of the full column names.
const ALIASES: &[(&str, &str)] = &[
    ("id", COL_ID),
    ("train", COL_ID),
    ("train id", COL_ID),
    ("trainset", COL_ID),
    ("job cards", COL_JOB_CARDS),
    ("job card", COL_JOB_CARDS),
    ("open orders", COL_JOB_CARDS),
    ("rolling stock", COL_ROLLING_STOCK),
    ("signalling", COL_SIGNALLING),
    ("signaling", COL_SIGNALLING),
    ("telecom", COL_TELECOM),
    ("mileage", COL_MILEAGE),
    ("km", COL_MILEAGE),
    ("branding", COL_BRANDING),
    ("cleaning", COL_CLEANING),
    ("bay", COL_BAY),
    ("shunting", COL_SHUNTING),
    ("score", COL_SCORE),
    ("performance", COL_SCORE),
];

/// Lowercases and collapses `_`, `-` and repeated spaces to single spaces.
fn normalize(key: &str) -> String {
    key.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maps a user-supplied key to its column, if it names one.
pub fn resolve_column(key: &str) -> Option<&'static str> {
    let key = normalize(key);
    COLUMNS
        .iter()
        .copied()
        .find(|col| normalize(col) == key)
        .or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| *alias == key)
                .map(|(_, col)| *col)
        })
}

/// Collects `(key, value)` pairs into cells and builds a record from them.
///
/// Unknown keys are ignored. Later duplicates win.
pub fn record_from_pairs<'a, I>(pairs: I) -> Result<VehicleRecord, FleetError>
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut cells: HashMap<&'static str, String> = HashMap::new();
    for (key, value) in pairs {
        match resolve_column(key) {
            Some(column) => {
                cells.insert(column, value);
            }
            None => tracing::debug!(key, "ignoring unknown field"),
        }
    }

    if cells.is_empty() {
        return Err(FleetError::conversion("no recognizable fields found"));
    }

    VehicleRecord::from_cells(|column| cells.get(column).map(String::as_str)).map_err(|e| {
        FleetError::ConversionFailed {
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    })
}
