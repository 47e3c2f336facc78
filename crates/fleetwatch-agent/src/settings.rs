// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime settings for the conversation handler.

use std::time::Duration;

use chrono::NaiveDate;

use fleetwatch_config::FleetwatchConfig;
use fleetwatch_core::FleetError;

#[derive(Debug, Clone)]
pub struct AgentSettings {
    /// Shared secret that unlocks a chat.
    pub secret: String,
    pub window_days: u32,
    pub chunk_ceiling: usize,
    pub alert_delay: Duration,
    pub alert_text: String,
    pub export_filename: String,
    /// Fixed "today" for alert computation. `None` uses the local date.
    pub as_of: Option<NaiveDate>,
}

impl AgentSettings {
    /// Settings from a loaded configuration. The password must be set.
    pub fn from_config(config: &FleetwatchConfig) -> Result<Self, FleetError> {
        let secret = config
            .auth
            .password
            .clone()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| FleetError::Config("auth.password is not set".into()))?;

        Ok(Self {
            secret,
            window_days: config.alerts.window_days,
            chunk_ceiling: config.alerts.chunk_ceiling,
            alert_delay: Duration::from_secs(config.auth.alert_delay_secs),
            alert_text: config.auth.alert_text.clone(),
            export_filename: config.storage.export_filename.clone(),
            as_of: None,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
