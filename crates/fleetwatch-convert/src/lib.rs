// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content conversion for the add-data flow.
//!
//! [`StructuredConverter`] parses records typed or uploaded in a known
//! layout. [`HttpConverter`] hands content to a remote extraction service
//! and is selected whenever `conversion.endpoint` is configured.

pub mod fields;
pub mod http;
pub mod structured;

use std::sync::Arc;

use fleetwatch_config::model::ConversionConfig;
use fleetwatch_core::{ContentConverter, FleetError};
use tracing::info;

pub use http::HttpConverter;
pub use structured::StructuredConverter;

/// Builds the converter the configuration asks for.
pub fn build_converter(
    config: &ConversionConfig,
) -> Result<Arc<dyn ContentConverter + Send + Sync>, FleetError> {
    match &config.endpoint {
        Some(endpoint) => {
            info!(endpoint = %endpoint, "using remote extraction service");
            Ok(Arc::new(HttpConverter::new(config)?))
        }
        None => {
            info!("using built-in structured converter");
            Ok(Arc::new(StructuredConverter::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_converter_from_config() {
        let mut config = ConversionConfig::default();
        assert_eq!(build_converter(&config).unwrap().name(), "structured");

        config.endpoint = Some("http://127.0.0.1:9/extract".into());
        assert_eq!(build_converter(&config).unwrap().name(), "http");
    }
}
