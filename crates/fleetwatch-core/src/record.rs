// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fleet data model: one [`VehicleRecord`] per trainset row.
//!
//! Field names on the wire (CSV headers and JSON keys) are the dataset's
//! column names, so the same serde derive drives both the record store and
//! the remote extraction service.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Column name of the vehicle identifier.
pub const COL_ID: &str = "Trainset_ID";
/// Column name of the open maintenance order count.
pub const COL_JOB_CARDS: &str = "JobCard_OpenOrders";
/// Column name of the rolling-stock certificate expiry.
pub const COL_ROLLING_STOCK: &str = "Fitness_RollingStock_ValidTill";
/// Column name of the signalling certificate expiry.
pub const COL_SIGNALLING: &str = "Fitness_Signalling_ValidTill";
/// Column name of the telecom certificate expiry.
pub const COL_TELECOM: &str = "Fitness_Telecom_ValidTill";
/// Column name of the odometer reading.
pub const COL_MILEAGE: &str = "Mileage_KM";
/// Column name of the required branding exposure hours.
pub const COL_BRANDING: &str = "Branding_Exposure_HoursRequired";
/// Column name of the cleaning slot flag.
pub const COL_CLEANING: &str = "Cleaning_Slot_Available";
/// Column name of the stabling bay.
pub const COL_BAY: &str = "Bay_Position";
/// Column name of the shunting distance.
pub const COL_SHUNTING: &str = "Shunting_Distance_m";
/// Column name of the performance score.
pub const COL_SCORE: &str = "Performance_Score";

/// All dataset columns in canonical order.
pub const COLUMNS: [&str; 11] = [
    COL_ID,
    COL_JOB_CARDS,
    COL_ROLLING_STOCK,
    COL_SIGNALLING,
    COL_TELECOM,
    COL_MILEAGE,
    COL_BRANDING,
    COL_CLEANING,
    COL_BAY,
    COL_SHUNTING,
    COL_SCORE,
];

/// One row of fleet data.
///
/// Only the id is required. Every other cell may be blank in a hand-edited
/// spreadsheet and is then absent (`None`); the row itself is always kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(rename = "Trainset_ID", deserialize_with = "de_text")]
    pub id: String,

    /// Outstanding maintenance orders. Negative values are kept as stored.
    #[serde(rename = "JobCard_OpenOrders", default, deserialize_with = "de_opt_count")]
    pub open_job_card_count: Option<i64>,

    #[serde(
        rename = "Fitness_RollingStock_ValidTill",
        default,
        deserialize_with = "de_calendar_date"
    )]
    pub rolling_stock_valid_till: Option<NaiveDate>,

    #[serde(
        rename = "Fitness_Signalling_ValidTill",
        default,
        deserialize_with = "de_calendar_date"
    )]
    pub signalling_valid_till: Option<NaiveDate>,

    #[serde(
        rename = "Fitness_Telecom_ValidTill",
        default,
        deserialize_with = "de_calendar_date"
    )]
    pub telecom_valid_till: Option<NaiveDate>,

    #[serde(rename = "Mileage_KM", default, deserialize_with = "de_opt_number")]
    pub mileage_km: Option<f64>,

    #[serde(
        rename = "Branding_Exposure_HoursRequired",
        default,
        deserialize_with = "de_opt_number"
    )]
    pub branding_hours_required: Option<f64>,

    #[serde(rename = "Cleaning_Slot_Available", default, deserialize_with = "de_opt_bool_like")]
    pub cleaning_slot_available: Option<bool>,

    #[serde(rename = "Bay_Position", default, deserialize_with = "de_opt_text")]
    pub bay_position: String,

    #[serde(rename = "Shunting_Distance_m", default, deserialize_with = "de_opt_number")]
    pub shunting_distance_m: Option<f64>,

    #[serde(rename = "Performance_Score", default, deserialize_with = "de_opt_number")]
    pub performance_score: Option<f64>,
}

/// A cell that could not be read into its column's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column `{column}`: {message}")]
pub struct CellError {
    pub column: &'static str,
    pub message: String,
}

/// How [`VehicleRecord`] cell readers treat a malformed non-blank cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leniency {
    /// Reject it. Used for new records entering the store.
    Strict,
    /// Treat it as absent. Used for rows already in the store.
    Stored,
}

impl VehicleRecord {
    /// Builds a new record from raw text cells looked up by column name.
    ///
    /// The id must be present. Blank cells are absent, as are unparseable
    /// dates; any other malformed cell is an error.
    pub fn from_cells<'a, F>(cell: F) -> Result<Self, CellError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut record = Self::blank(String::new());
        Self::fill(&mut record, cell, Leniency::Strict)?;
        if record.id.is_empty() {
            return Err(CellError {
                column: COL_ID,
                message: "missing value".into(),
            });
        }
        Ok(record)
    }

    /// Reads a row already in the store. Never fails: malformed cells are
    /// absent, so every stored row stays countable and searchable.
    pub fn from_stored_cells<'a, F>(cell: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut record = Self::blank(String::new());
        // Stored leniency never rejects a cell.
        let _ = Self::fill(&mut record, cell, Leniency::Stored);
        record
    }

    /// A record with the given id and every other cell absent.
    pub fn blank(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            open_job_card_count: None,
            rolling_stock_valid_till: None,
            signalling_valid_till: None,
            telecom_valid_till: None,
            mileage_km: None,
            branding_hours_required: None,
            cleaning_slot_available: None,
            bay_position: String::new(),
            shunting_distance_m: None,
            performance_score: None,
        }
    }

    fn fill<'a, F>(record: &mut Self, cell: F, leniency: Leniency) -> Result<(), CellError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let text = |column: &str| cell(column).map(str::trim).unwrap_or_default().to_string();
        let number = |column: &'static str| {
            read_typed(column, &text(column), leniency, "a number", |t: &str| t.parse::<f64>().ok())
        };
        let date = |column: &'static str| cell(column).and_then(parse_calendar_date);

        record.id = text(COL_ID);
        record.open_job_card_count = read_typed(
            COL_JOB_CARDS,
            &text(COL_JOB_CARDS),
            leniency,
            "a whole number",
            parse_count,
        )?;
        record.rolling_stock_valid_till = date(COL_ROLLING_STOCK);
        record.signalling_valid_till = date(COL_SIGNALLING);
        record.telecom_valid_till = date(COL_TELECOM);
        record.mileage_km = number(COL_MILEAGE)?;
        record.branding_hours_required = number(COL_BRANDING)?;
        record.cleaning_slot_available = read_typed(
            COL_CLEANING,
            &text(COL_CLEANING),
            leniency,
            "a boolean",
            parse_bool_like,
        )?;
        record.bay_position = text(COL_BAY);
        record.shunting_distance_m = number(COL_SHUNTING)?;
        record.performance_score = number(COL_SCORE)?;
        Ok(())
    }

    /// Returns the expiry date for one certification domain, if present.
    pub fn valid_till(&self, domain: CertificateDomain) -> Option<NaiveDate> {
        match domain {
            CertificateDomain::RollingStock => self.rolling_stock_valid_till,
            CertificateDomain::Signalling => self.signalling_valid_till,
            CertificateDomain::Telecom => self.telecom_valid_till,
        }
    }

    /// Renders the record as `(column, cell)` pairs in canonical column order.
    ///
    /// Dates are written calendar-only, absent values as an empty cell, and
    /// the cleaning flag as `True`/`False`.
    pub fn to_cells(&self) -> Vec<(&'static str, String)> {
        vec![
            (COL_ID, self.id.clone()),
            (COL_JOB_CARDS, opt_cell(self.open_job_card_count)),
            (COL_ROLLING_STOCK, format_date_cell(self.rolling_stock_valid_till)),
            (COL_SIGNALLING, format_date_cell(self.signalling_valid_till)),
            (COL_TELECOM, format_date_cell(self.telecom_valid_till)),
            (COL_MILEAGE, opt_cell(self.mileage_km)),
            (COL_BRANDING, opt_cell(self.branding_hours_required)),
            (
                COL_CLEANING,
                opt_cell(self.cleaning_slot_available.map(format_bool_like)),
            ),
            (COL_BAY, self.bay_position.clone()),
            (COL_SHUNTING, opt_cell(self.shunting_distance_m)),
            (COL_SCORE, opt_cell(self.performance_score)),
        ]
    }
}

/// A certification domain with its own fitness certificate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum CertificateDomain {
    RollingStock,
    Signalling,
    Telecom,
}

impl CertificateDomain {
    /// Domains in alert order.
    pub const ALL: [CertificateDomain; 3] = [
        CertificateDomain::RollingStock,
        CertificateDomain::Signalling,
        CertificateDomain::Telecom,
    ];

    /// The dataset column holding this domain's expiry date.
    pub fn column(self) -> &'static str {
        match self {
            CertificateDomain::RollingStock => COL_ROLLING_STOCK,
            CertificateDomain::Signalling => COL_SIGNALLING,
            CertificateDomain::Telecom => COL_TELECOM,
        }
    }

    /// Human label: the column name with underscores as spaces, title-cased.
    ///
    /// `Fitness_RollingStock_ValidTill` becomes `Fitness Rollingstock Validtill`.
    pub fn label(self) -> String {
        title_case(&self.column().replace('_', " "))
    }
}

/// Kind of content accepted by the add-data flow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum InputMode {
    Text,
    Document,
    Photo,
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }
    out
}

/// Parses a calendar date from the forms found in fleet spreadsheets.
///
/// Returns `None` for anything unparseable; callers treat that as "absent".
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Parses a boolean-like cell (`true`, `yes`, `1`, ...), case-insensitive.
pub fn parse_bool_like(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "1.0" => Some(true),
        "false" | "no" | "n" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

/// Formats a boolean the way the dataset stores it.
pub fn format_bool_like(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Reads one typed cell. Blank is absent; malformed is absent only for
/// stored rows.
fn read_typed<T>(
    column: &'static str,
    raw: &str,
    leniency: Leniency,
    what: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, CellError> {
    if raw.is_empty() {
        return Ok(None);
    }
    match parse(raw) {
        Some(v) => Ok(Some(v)),
        None if leniency == Leniency::Stored => Ok(None),
        None => Err(CellError {
            column,
            message: format!("`{raw}` is not {what}"),
        }),
    }
}

/// Parses a job card count. Spreadsheet exports often write `3.0`.
fn parse_count(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => match raw.parse::<f64>() {
            Ok(f) if f.fract() == 0.0 && f.is_finite() => Some(f as i64),
            _ => None,
        },
    }
}

fn opt_cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn format_date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Scalar cell that may arrive typed (JSON, inferred CSV) or as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    fn into_text(self) -> String {
        match self {
            Cell::Bool(b) => format_bool_like(b).to_string(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Text(s) => s,
        }
    }
}

fn de_calendar_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Cell> = Option::deserialize(deserializer)?;
    Ok(raw.map(Cell::into_text).as_deref().and_then(parse_calendar_date))
}

/// Reads an optional typed-or-text cell; blank text and `null` are absent.
fn de_opt_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Cell> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(Cell::into_text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty()))
}

fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    de_opt_cell(deserializer)?
        .map(|text| {
            text.parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("`{text}` is not a number")))
        })
        .transpose()
}

fn de_opt_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    de_opt_cell(deserializer)?
        .map(|text| {
            parse_count(&text).ok_or_else(|| {
                serde::de::Error::custom(format!("`{text}` is not a whole number"))
            })
        })
        .transpose()
}

fn de_opt_bool_like<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    de_opt_cell(deserializer)?
        .map(|text| {
            parse_bool_like(&text)
                .ok_or_else(|| serde::de::Error::custom(format!("`{text}` is not a boolean")))
        })
        .transpose()
}

fn de_opt_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_cell(deserializer)?.unwrap_or_default())
}

fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Cell::deserialize(deserializer)?.into_text())
}
