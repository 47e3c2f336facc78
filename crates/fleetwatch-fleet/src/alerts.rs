// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Certificate expiry alerts.
//!
//! Scans the three fitness certificate columns for dates inside a rolling
//! window (already-expired certificates included), renders one line per
//! `(vehicle, domain)` pair, and packs the lines into chunks that stay under
//! a character ceiling so each chunk fits in one transport message.

use chrono::{Days, NaiveDate};
use fleetwatch_core::{CertificateDomain, VehicleRecord};
use tracing::debug;

/// Header that opens every alert chunk.
pub const ALERT_HEADER: &str = "⚠️ Maintenance Due Soon:\n";

/// Message sent instead of chunks when nothing is due.
pub const NO_ALERTS_MESSAGE: &str = "✅ No certificates expiring soon.";

/// Default look-ahead window in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Default chunk ceiling, in characters, below the 4096 transport limit.
pub const DEFAULT_CHUNK_CEILING: usize = 3500;

/// Minimum room for alert text a chunk must have beyond its header.
pub const MIN_LINE_ROOM: usize = 64;

/// One certificate that expires inside the window (or already has).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryAlert {
    pub vehicle_id: String,
    pub domain: CertificateDomain,
    pub valid_till: NaiveDate,
    /// Days from today to expiry; negative when already expired.
    pub days_left: i64,
}

impl ExpiryAlert {
    /// Renders the alert as a single bullet line, without a trailing newline.
    pub fn line(&self) -> String {
        format!(
            "- {}: {} {} days",
            self.vehicle_id,
            self.domain.label(),
            self.days_left
        )
    }
}

/// Outcome of an alert scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertReport {
    /// No certificate falls inside the window.
    NoAlerts,
    /// Alert chunks, each already prefixed with [`ALERT_HEADER`].
    Chunks(Vec<String>),
}

impl AlertReport {
    /// The messages to send, in order.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AlertReport::NoAlerts => vec![NO_ALERTS_MESSAGE.to_string()],
            AlertReport::Chunks(chunks) => chunks.clone(),
        }
    }
}

/// Collects every `(vehicle, domain)` pair whose certificate expires on or
/// before `today + window_days`.
///
/// Grouped by domain in [`CertificateDomain::ALL`] order, then by store order.
/// Absent dates skip that domain only.
pub fn collect_due_soon(
    records: &[VehicleRecord],
    window_days: u32,
    today: NaiveDate,
) -> Vec<ExpiryAlert> {
    let cutoff = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut alerts = Vec::new();
    for domain in CertificateDomain::ALL {
        for record in records {
            let Some(valid_till) = record.valid_till(domain) else {
                continue;
            };
            if valid_till <= cutoff {
                alerts.push(ExpiryAlert {
                    vehicle_id: record.id.clone(),
                    domain,
                    valid_till,
                    days_left: (valid_till - today).num_days(),
                });
            }
        }
    }
    alerts
}

/// Packs lines greedily into header-prefixed chunks of at most `ceiling` characters.
///
/// Each line is followed by a newline. A line too long for an empty chunk is
/// truncated with `…`. Ceilings below `header + MIN_LINE_ROOM` are raised to
/// that minimum.
pub fn chunk_lines(lines: &[String], ceiling: usize) -> Vec<String> {
    let header_len = ALERT_HEADER.chars().count();
    let ceiling = ceiling.max(header_len + MIN_LINE_ROOM);
    // Characters available for one line's text in an otherwise empty chunk.
    let line_room = ceiling - header_len - 1;

    let mut chunks = Vec::new();
    let mut current = String::from(ALERT_HEADER);
    let mut current_len = header_len;

    for line in lines {
        let line = truncate_chars(line, line_room);
        let piece_len = line.chars().count() + 1;

        if current_len + piece_len > ceiling && current_len > header_len {
            chunks.push(std::mem::replace(&mut current, String::from(ALERT_HEADER)));
            current_len = header_len;
        }

        current.push_str(&line);
        current.push('\n');
        current_len += piece_len;
    }

    chunks.push(current);
    chunks
}

/// Finds certificates due inside the window and renders them as chunks.
pub fn find_due_soon(
    records: &[VehicleRecord],
    window_days: u32,
    today: NaiveDate,
    ceiling: usize,
) -> AlertReport {
    let alerts = collect_due_soon(records, window_days, today);
    if alerts.is_empty() {
        debug!(window_days, %today, "no certificates due");
        return AlertReport::NoAlerts;
    }

    let lines: Vec<String> = alerts.iter().map(ExpiryAlert::line).collect();
    let chunks = chunk_lines(&lines, ceiling);
    debug!(
        alerts = lines.len(),
        chunks = chunks.len(),
        window_days,
        "rendered expiry alerts"
    );
    AlertReport::Chunks(chunks)
}

fn truncate_chars(line: &str, max_chars: usize) -> String {
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let mut out: String = line.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
