// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation handling for Fleetwatch.
//!
//! The [`AgentLoop`] pulls messages off a channel one at a time and hands
//! each to [`FleetAgent`], which owns the adapters. Session state lives in
//! a [`SessionRegistry`] owned by the loop.

pub mod classifier;
pub mod handler;
pub mod notify;
pub mod session;
pub mod settings;
pub mod shutdown;

use std::sync::Arc;

use fleetwatch_core::{ChannelAdapter, FleetError};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub use classifier::{classify, Action, Intent};
pub use handler::FleetAgent;
pub use notify::NotificationScheduler;
pub use session::{Session, SessionRegistry, SessionState};
pub use settings::AgentSettings;

/// Receive loop feeding a [`FleetAgent`].
pub struct AgentLoop {
    channel: Arc<dyn ChannelAdapter + Send + Sync>,
    agent: FleetAgent,
    sessions: SessionRegistry,
}

impl AgentLoop {
    pub fn new(channel: Arc<dyn ChannelAdapter + Send + Sync>, agent: FleetAgent) -> Self {
        Self {
            channel,
            agent,
            sessions: SessionRegistry::new(),
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Runs until `cancel` fires or the channel closes.
    ///
    /// A failure while handling one message is logged and does not stop
    /// the loop.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), FleetError> {
        info!(channel = self.channel.name(), "agent loop running");

        loop {
            tokio::select! {
                msg = self.channel.receive() => {
                    match msg {
                        Ok(inbound) => {
                            let chat_id = inbound.chat_id;
                            if let Err(e) = self.agent.handle(&mut self.sessions, inbound).await {
                                error!(chat_id = %chat_id, error = %e, "failed to handle inbound message");
                            }
                        }
                        Err(e) => {
                            error!(error = %e, "channel receive error");
                            if e.to_string().contains("closed") {
                                break;
                            }
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping agent loop");
                    break;
                }
            }
        }

        self.agent.shutdown().await?;
        info!(sessions = self.sessions.len(), "agent loop stopped");
        Ok(())
    }
}
