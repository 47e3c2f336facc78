// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Fleetwatch.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Fleetwatch configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FleetwatchConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Shared-secret login and the post-login notification.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Fleet dataset location.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Certificate expiry alert settings.
    #[serde(default)]
    pub alerts: AlertsConfig,

    /// Content-to-record conversion settings.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in logs.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "fleetwatch".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required by `serve`.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Login configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Shared secret a chat must send to unlock the bot. Required by `serve`.
    #[serde(default)]
    pub password: Option<String>,

    /// Delay before the one-shot notification sent after a successful login.
    #[serde(default = "default_alert_delay_secs")]
    pub alert_delay_secs: u64,

    /// Text of the post-login notification.
    #[serde(default = "default_alert_text")]
    pub alert_text: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password: None,
            alert_delay_secs: default_alert_delay_secs(),
            alert_text: default_alert_text(),
        }
    }
}

fn default_alert_delay_secs() -> u64 {
    20
}

fn default_alert_text() -> String {
    "🚨 ALERT: A sensor on a train has failed!".to_string()
}

/// Fleet dataset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the fleet CSV file.
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// File name used when the dataset is exported to a chat.
    #[serde(default = "default_export_filename")]
    pub export_filename: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            export_filename: default_export_filename(),
        }
    }
}

fn default_data_path() -> String {
    "metro_data.csv".to_string()
}

fn default_export_filename() -> String {
    "metro_data.csv".to_string()
}

/// Certificate expiry alert configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AlertsConfig {
    /// Look-ahead window in days.
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Maximum characters per alert message.
    #[serde(default = "default_chunk_ceiling")]
    pub chunk_ceiling: usize,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            chunk_ceiling: default_chunk_ceiling(),
        }
    }
}

fn default_window_days() -> u32 {
    7
}

fn default_chunk_ceiling() -> usize {
    3500
}

/// Content conversion configuration.
///
/// With no `endpoint`, the built-in structured parser is used.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionConfig {
    /// URL of a remote extraction service.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Bearer token sent to the extraction service.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout for the extraction service.
    #[serde(default = "default_conversion_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: default_conversion_timeout_secs(),
        }
    }
}

fn default_conversion_timeout_secs() -> u64 {
    30
}
