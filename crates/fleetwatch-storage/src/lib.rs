// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV persistence layer for Fleetwatch.
//!
//! The fleet dataset is a single CSV file. Reads always go back to disk;
//! appends are serialized and land through an atomic rename.

pub mod adapter;
pub mod table;

pub use adapter::CsvRecordStore;
