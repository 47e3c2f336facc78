// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fleet state derivation and reporting.
//!
//! Pure functions over a slice of [`VehicleRecord`](fleetwatch_core::VehicleRecord)s:
//! - [`derive_status`]: job cards to operational status
//! - [`summarize`]: revenue / standby / IBL counts
//! - [`find_due_soon`]: certificate expiry alerts, chunked for transport
//! - [`lookup`]: single-vehicle detail report

pub mod alerts;
pub mod lookup;
pub mod status;
pub mod summary;

pub use alerts::{find_due_soon, AlertReport, ExpiryAlert};
pub use lookup::{lookup, LookupOutcome, TrainReport};
pub use status::{derive_status, OperationalStatus};
pub use summary::{summarize, FleetSummary};
