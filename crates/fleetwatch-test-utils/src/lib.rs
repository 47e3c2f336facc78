// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Fleetwatch integration tests.
//!
//! - [`MockChannel`] - channel with message injection and captured replies
//! - [`MockConverter`] - converter with scripted outcomes
//! - [`TestHarness`] - full agent over a temp CSV file

pub mod fixtures;
pub mod harness;
pub mod mock_channel;
pub mod mock_converter;

pub use fixtures::{sample_record, sample_today, SAMPLE_FLEET_CSV, SAMPLE_TODAY};
pub use harness::TestHarness;
pub use mock_channel::MockChannel;
pub use mock_converter::MockConverter;
