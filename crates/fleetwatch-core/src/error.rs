// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Fleetwatch.

use thiserror::Error;

/// The primary error type used across all Fleetwatch adapter traits and core operations.
#[derive(Debug, Error)]
pub enum FleetError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// The record store could not be read or written.
    ///
    /// Fatal at startup; reported to the user on later reads and appends.
    #[error("record store unavailable: {message}")]
    StoreUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No vehicle with the requested identifier exists in the store.
    #[error("no record with id `{id}`")]
    RecordNotFound { id: String },

    /// An appended record reuses an id already in the store.
    #[error("a record with id `{id}` already exists")]
    DuplicateRecord { id: String },

    /// The supplied secret did not match.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Raw content could not be turned into a vehicle record.
    #[error("conversion failed: {message}")]
    ConversionFailed {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input that matched no action, train id, or pending input mode.
    #[error("unrecognized input: {0}")]
    UnrecognizedInput(String),

    /// Channel adapter errors (connection failure, message format, rate limiting).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FleetError {
    /// Shorthand for a [`FleetError::StoreUnavailable`] without a source.
    pub fn store(message: impl Into<String>) -> Self {
        FleetError::StoreUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a [`FleetError::ConversionFailed`] without a source.
    pub fn conversion(message: impl Into<String>) -> Self {
        FleetError::ConversionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Returns `true` if the error ends the process when raised at startup.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, FleetError::StoreUnavailable { .. })
    }
}
