// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for Fleetwatch.
//!
//! Implements [`ChannelAdapter`] for the Telegram Bot API via teloxide:
//! long polling for inbound updates, plain-text replies with reply keyboards,
//! and document uploads for exports.

pub mod handler;
pub mod media;

use async_trait::async_trait;
use fleetwatch_config::model::TelegramConfig;
use fleetwatch_core::error::FleetError;
use fleetwatch_core::traits::{ChannelAdapter, PluginAdapter};
use fleetwatch_core::types::{
    AdapterType, ChannelCapabilities, HealthStatus, InboundMessage, MessageId, OutboundFile,
    OutboundMessage,
};
use teloxide::prelude::*;
use teloxide::types::{InputFile, Recipient};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Telegram's hard limit on characters per text message.
pub const TELEGRAM_MAX_MESSAGE_LENGTH: usize = 4096;

/// Telegram channel adapter implementing [`ChannelAdapter`].
///
/// Any chat may talk to the bot; access control is the agent's password
/// login, not a user allowlist.
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundMessage>>,
    inbound_tx: mpsc::Sender<InboundMessage>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Requires `config.bot_token` to be set and non-empty.
    pub fn new(config: TelegramConfig) -> Result<Self, FleetError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            FleetError::Config("telegram.bot_token is required for Telegram adapter".into())
        })?;

        if token.trim().is_empty() {
            return Err(FleetError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(100);

        Ok(Self {
            bot,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

fn recipient(chat_id: fleetwatch_core::ChatId) -> Recipient {
    Recipient::Id(teloxide::types::ChatId(chat_id.0))
}

#[async_trait]
impl PluginAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, FleetError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), FleetError> {
        debug!("Telegram channel shutting down");
        if let Some(handle) = &self.polling_handle {
            handle.abort();
        }
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for TelegramChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_keyboards: true,
            supports_documents: true,
            supports_photos: true,
            max_message_length: Some(TELEGRAM_MAX_MESSAGE_LENGTH),
        }
    }

    async fn connect(&mut self) -> Result<(), FleetError> {
        if self.polling_handle.is_some() {
            return Ok(());
        }

        let bot = self.bot.clone();
        let tx = self.inbound_tx.clone();

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let handler = Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
                let tx = tx.clone();
                async move {
                    match handler::extract_content(&bot, &msg).await {
                        Ok(Some(content)) => {
                            let inbound = handler::to_inbound_message(&msg, content);
                            if tx.send(inbound).await.is_err() {
                                warn!("inbound channel closed, dropping message");
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!(error = %e, chat_id = msg.chat.id.0, "failed to extract message content");
                        }
                    }
                    respond(())
                }
            });

            Dispatcher::builder(bot, handler)
                .default_handler(|_| async {})
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, FleetError> {
        let request = self.bot.send_message(recipient(msg.chat_id), &msg.content);
        let result = match &msg.keyboard {
            Some(keyboard) => {
                request
                    .reply_markup(handler::to_reply_keyboard(keyboard))
                    .await
            }
            None => request.await,
        }
        .map_err(|e| FleetError::Channel {
            message: format!("failed to send message: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(MessageId(result.id.0.to_string()))
    }

    async fn send_file(&self, file: OutboundFile) -> Result<MessageId, FleetError> {
        let size = file.data.len();
        let document = InputFile::memory(file.data).file_name(file.filename.clone());
        let result = self
            .bot
            .send_document(recipient(file.chat_id), document)
            .await
            .map_err(|e| FleetError::Channel {
                message: format!("failed to upload {}: {e}", file.filename),
                source: Some(Box::new(e)),
            })?;

        debug!(chat_id = %file.chat_id, filename = %file.filename, size, "uploaded document");
        Ok(MessageId(result.id.0.to_string()))
    }

    async fn receive(&self) -> Result<InboundMessage, FleetError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| FleetError::Channel {
            message: "Telegram inbound channel closed".into(),
            source: None,
        })
    }
}
