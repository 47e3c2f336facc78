// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./fleetwatch.toml` > `~/.config/fleetwatch/fleetwatch.toml` >
//! `/etc/fleetwatch/fleetwatch.toml` with environment variable overrides via `FLEETWATCH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::FleetwatchConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/fleetwatch/fleetwatch.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "fleetwatch.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/fleetwatch/fleetwatch.toml` (system-wide)
/// 3. `~/.config/fleetwatch/fleetwatch.toml` (user XDG config)
/// 4. `./fleetwatch.toml` (local directory)
/// 5. `FLEETWATCH_*` environment variables
pub fn load_config() -> Result<FleetwatchConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<FleetwatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FleetwatchConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FleetwatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FleetwatchConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Returns the user-level config path, if a config directory exists.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("fleetwatch/fleetwatch.toml"))
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(FleetwatchConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `FLEETWATCH_TELEGRAM_BOT_TOKEN` must map to `telegram.bot_token`,
/// not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("FLEETWATCH_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("alerts_", "alerts.", 1)
            .replacen("conversion_", "conversion.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("FLEETWATCH_AUTH_PASSWORD", "kmrl2025");
            jail.set_env("FLEETWATCH_TELEGRAM_BOT_TOKEN", "123:abc");
            jail.set_env("FLEETWATCH_ALERTS_WINDOW_DAYS", "10");
            let config = load_config().map_err(|e| e.to_string())?;
            assert_eq!(config.auth.password.as_deref(), Some("kmrl2025"));
            assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
            assert_eq!(config.alerts.window_days, 10);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_picked_up() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_PATH,
                r#"
[storage]
data_path = "fleet.csv"
"#,
            )?;
            let config = load_config().map_err(|e| e.to_string())?;
            assert_eq!(config.storage.data_path, "fleet.csv");
            Ok(())
        });
    }
}
