// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde attributes cannot express: non-empty paths,
//! a usable alert chunk ceiling, and a well-formed conversion endpoint.

use fleetwatch_fleet::alerts::{ALERT_HEADER, MIN_LINE_ROOM};

use crate::diagnostic::ConfigError;
use crate::model::FleetwatchConfig;

/// Largest chunk ceiling accepted; Telegram rejects longer text messages.
pub const MAX_CHUNK_CEILING: usize = 4096;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Smallest chunk ceiling that still leaves room for a line after the header.
pub fn min_chunk_ceiling() -> usize {
    ALERT_HEADER.chars().count() + MIN_LINE_ROOM
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of stopping at the first.
pub fn validate_config(config: &FleetwatchConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.to_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` must be one of: {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.data_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.data_path must not be empty".to_string(),
        });
    }

    if config.storage.export_filename.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.export_filename must not be empty".to_string(),
        });
    }

    if config.auth.alert_text.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "auth.alert_text must not be empty".to_string(),
        });
    }

    let ceiling = config.alerts.chunk_ceiling;
    let floor = min_chunk_ceiling();
    if ceiling < floor || ceiling > MAX_CHUNK_CEILING {
        errors.push(ConfigError::Validation {
            message: format!(
                "alerts.chunk_ceiling must be between {floor} and {MAX_CHUNK_CEILING}, got {ceiling}"
            ),
        });
    }

    if let Some(endpoint) = &config.conversion.endpoint {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            errors.push(ConfigError::Validation {
                message: format!("conversion.endpoint `{endpoint}` must be an http(s) URL"),
            });
        }
    }

    if config.conversion.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "conversion.timeout_secs must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Extra checks for running the bot: the secrets `check` may leave unset.
pub fn validate_for_serve(config: &FleetwatchConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

    if !present(&config.telegram.bot_token) {
        errors.push(ConfigError::MissingKey {
            key: "telegram.bot_token".to_string(),
        });
    }
    if !present(&config.auth.password) {
        errors.push(ConfigError::MissingKey {
            key: "auth.password".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert!(validate_config(&FleetwatchConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = FleetwatchConfig::default();
        config.storage.data_path = " ".into();
        config.alerts.chunk_ceiling = 10;
        config.agent.log_level = "loud".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn ceiling_bounds_are_inclusive() {
        let mut config = FleetwatchConfig::default();
        config.alerts.chunk_ceiling = min_chunk_ceiling();
        assert!(validate_config(&config).is_ok());
        config.alerts.chunk_ceiling = MAX_CHUNK_CEILING;
        assert!(validate_config(&config).is_ok());
        config.alerts.chunk_ceiling = MAX_CHUNK_CEILING + 1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn endpoint_must_be_http() {
        let mut config = FleetwatchConfig::default();
        config.conversion.endpoint = Some("ftp://x".into());
        assert!(validate_config(&config).is_err());
        config.conversion.endpoint = Some("https://extract.local/v1".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn serve_requires_token_and_password() {
        let mut config = FleetwatchConfig::default();
        assert_eq!(validate_for_serve(&config).unwrap_err().len(), 2);
        config.telegram.bot_token = Some("1:abc".into());
        config.auth.password = Some("".into());
        let errors = validate_for_serve(&config).unwrap_err();
        assert!(matches!(&errors[0], ConfigError::MissingKey { key } if key == "auth.password"));
        config.auth.password = Some("kmrl".into());
        assert!(validate_for_serve(&config).is_ok());
    }
}
