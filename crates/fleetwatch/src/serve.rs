// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `fleetwatch serve` command implementation.
//!
//! Loads the fleet data file, picks a content converter, connects the
//! Telegram channel and runs the agent loop until SIGINT/SIGTERM.

use std::sync::Arc;

use fleetwatch_agent::shutdown;
use fleetwatch_agent::{AgentLoop, AgentSettings, FleetAgent};
use fleetwatch_config::FleetwatchConfig;
use fleetwatch_core::error::FleetError;
use fleetwatch_core::types::HealthStatus;
use fleetwatch_core::{ChannelAdapter, PluginAdapter, RecordStore};
use fleetwatch_storage::CsvRecordStore;
use fleetwatch_telegram::TelegramChannel;
use tracing::{error, info, warn};

/// Runs the `fleetwatch serve` command.
///
/// A data file that cannot be loaded aborts startup.
pub async fn run_serve(config: FleetwatchConfig) -> Result<(), FleetError> {
    info!(agent = %config.agent.name, "starting fleetwatch serve");

    let store = CsvRecordStore::new(&config.storage);
    if let Err(e) = store.initialize().await {
        error!(error = %e, path = %config.storage.data_path, "fleet data could not be loaded");
        return Err(e);
    }
    let store = Arc::new(store);

    let converter = fleetwatch_convert::build_converter(&config.conversion)?;
    let settings = AgentSettings::from_config(&config)?;

    let mut telegram = TelegramChannel::new(config.telegram.clone())?;
    match telegram.health_check().await? {
        HealthStatus::Healthy => {}
        HealthStatus::Degraded(reason) | HealthStatus::Unhealthy(reason) => {
            warn!(reason = %reason, "Telegram health check failed, polling anyway");
        }
    }
    telegram.connect().await?;
    let channel: Arc<dyn ChannelAdapter + Send + Sync> = Arc::new(telegram);

    let agent = FleetAgent::new(
        Arc::clone(&channel),
        store as Arc<dyn RecordStore + Send + Sync>,
        converter,
        settings,
    );

    let cancel = shutdown::install_signal_handler();
    let mut agent_loop = AgentLoop::new(Arc::clone(&channel), agent);
    agent_loop.run(cancel).await?;

    channel.shutdown().await?;
    info!("fleetwatch serve stopped");
    Ok(())
}
