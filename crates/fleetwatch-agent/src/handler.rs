// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-message conversation handling.
//!
//! [`FleetAgent::handle`] runs one inbound message through the session
//! state machine and answers it on the channel. Recoverable failures
//! become chat replies; only channel errors propagate.

use std::sync::Arc;

use tracing::{debug, info, warn};

use fleetwatch_core::types::{
    InboundMessage, Keyboard, MessageContent, OutboundFile, OutboundMessage,
};
use fleetwatch_core::{
    ChannelAdapter, ChatId, ContentConverter, FleetError, InputMode, RecordStore, VehicleRecord,
};
use fleetwatch_fleet::{find_due_soon, lookup, summarize, LookupOutcome};

use crate::classifier::{action_keyboard, classify, mode_keyboard, Action, Intent};
use crate::notify::NotificationScheduler;
use crate::session::SessionRegistry;
use crate::settings::AgentSettings;

pub const PASSWORD_PROMPT: &str = "🔑 Enter password to access metro bot:";
pub const AUTH_OK: &str = "✅ Authenticated! Use the buttons below:";
pub const AUTH_FAILED: &str = "❌ Wrong password. Try again.";
pub const MENU_PROMPT: &str = "Use the buttons below:";
pub const SEARCH_HINT: &str = "Enter train ID like: KM07";
pub const EXPORT_FAILED: &str = "❌ CSV file not found.";
pub const MODE_PROMPT: &str = "Select input type to add data:";
pub const INGEST_OK: &str = "✅ Data processed and added to CSV successfully!";
pub const INVALID_INPUT: &str = "❌ Invalid input. Please try again.";
pub const UNKNOWN_COMMAND: &str = "🤖 Unknown command";
pub const DATA_UNAVAILABLE: &str = "❌ Error: Bot data could not be loaded.";

/// Prompt shown once an input mode is chosen.
pub fn input_prompt(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Text => "✏️ Send the record as `field: value` lines.",
        InputMode::Document => "📄 Upload the document now.",
        InputMode::Photo => "📸 Send the photo now.",
    }
}

/// Stateless message handler; sessions are passed in per call.
pub struct FleetAgent {
    channel: Arc<dyn ChannelAdapter + Send + Sync>,
    store: Arc<dyn RecordStore + Send + Sync>,
    converter: Arc<dyn ContentConverter + Send + Sync>,
    notifier: NotificationScheduler,
    settings: AgentSettings,
}

impl FleetAgent {
    pub fn new(
        channel: Arc<dyn ChannelAdapter + Send + Sync>,
        store: Arc<dyn RecordStore + Send + Sync>,
        converter: Arc<dyn ContentConverter + Send + Sync>,
        settings: AgentSettings,
    ) -> Self {
        let notifier = NotificationScheduler::new(
            Arc::clone(&channel),
            settings.alert_delay,
            settings.alert_text.clone(),
        );
        Self {
            channel,
            store,
            converter,
            notifier,
            settings,
        }
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    pub fn notifier(&self) -> &NotificationScheduler {
        &self.notifier
    }

    /// Handles one inbound message end to end.
    pub async fn handle(
        &self,
        sessions: &mut SessionRegistry,
        inbound: InboundMessage,
    ) -> Result<(), FleetError> {
        let chat = inbound.chat_id;
        let intent = inbound.content.as_text().map(classify);
        let session = sessions.get_or_create(chat);

        debug!(chat_id = %chat, state = %session.state(), ?intent, "handling message");

        if !session.is_authorized() {
            if matches!(intent, Some(Intent::Start)) {
                return self.reply(chat, PASSWORD_PROMPT).await;
            }
            let attempt = inbound.content.as_text().unwrap_or_default();
            if session.authenticate(attempt, &self.settings.secret) {
                info!(chat_id = %chat, "chat authenticated");
                self.reply_with(chat, AUTH_OK, action_keyboard()).await?;
                self.notifier.schedule(chat);
                return Ok(());
            }
            return self.refuse(chat, FleetError::AuthenticationFailed).await;
        }

        if let Some(mode) = session.take_pending() {
            match &intent {
                Some(i) if i.interrupts_input() => {
                    debug!(chat_id = %chat, %mode, "add-data flow abandoned");
                }
                _ => return self.ingest(chat, mode, inbound.content).await,
            }
        }

        match intent {
            Some(Intent::Start) => self.reply_with(chat, MENU_PROMPT, action_keyboard()).await,
            Some(Intent::Action(action)) => self.run_action(chat, action).await,
            Some(Intent::SelectMode(mode)) => {
                session.select_mode(mode);
                self.reply(chat, input_prompt(mode)).await
            }
            Some(Intent::TrainId(id)) => match self.load_records().await {
                Some(records) => match lookup(&records, &id) {
                    found @ LookupOutcome::Found(_) => self.reply(chat, found.render()).await,
                    LookupOutcome::NotFound(id) => {
                        self.refuse(chat, FleetError::RecordNotFound { id }).await
                    }
                },
                None => self.reply(chat, DATA_UNAVAILABLE).await,
            },
            Some(Intent::FreeText(text)) => {
                self.refuse(chat, FleetError::UnrecognizedInput(text)).await
            }
            None => {
                let kind = inbound.content.kind();
                self.refuse(chat, FleetError::UnrecognizedInput(kind.to_string()))
                    .await
            }
        }
    }

    /// Cancels pending notifications and closes the store.
    pub async fn shutdown(&self) -> Result<(), FleetError> {
        self.notifier.cancel_all();
        self.store.shutdown().await
    }

    async fn run_action(&self, chat: ChatId, action: Action) -> Result<(), FleetError> {
        match action {
            Action::ShowStatus => match self.load_records().await {
                Some(records) => self.reply(chat, summarize(&records).render()).await,
                None => self.reply(chat, DATA_UNAVAILABLE).await,
            },
            Action::MaintenanceAlerts => {
                let Some(records) = self.load_records().await else {
                    return self.reply(chat, DATA_UNAVAILABLE).await;
                };
                let report = find_due_soon(
                    &records,
                    self.settings.window_days,
                    self.settings.today(),
                    self.chunk_ceiling(),
                );
                for message in report.messages() {
                    self.reply(chat, message).await?;
                }
                Ok(())
            }
            Action::SearchTrain => self.reply(chat, SEARCH_HINT).await,
            Action::ExportCsv => match self.store.export().await {
                Ok(data) => {
                    let file = OutboundFile {
                        chat_id: chat,
                        data,
                        filename: self.settings.export_filename.clone(),
                    };
                    self.channel.send_file(file).await.map(|_| ())
                }
                Err(e) => {
                    warn!(chat_id = %chat, error = %e, "export failed");
                    self.reply(chat, EXPORT_FAILED).await
                }
            },
            Action::AddData => self.reply_with(chat, MODE_PROMPT, mode_keyboard()).await,
        }
    }

    async fn ingest(
        &self,
        chat: ChatId,
        mode: InputMode,
        content: MessageContent,
    ) -> Result<(), FleetError> {
        let converted: Result<VehicleRecord, FleetError> = match (mode, &content) {
            (InputMode::Text, MessageContent::Text(text)) => {
                self.converter.convert_text(text).await
            }
            (InputMode::Document, MessageContent::Document { data, filename, .. }) => {
                self.converter.convert_document(data, filename).await
            }
            (InputMode::Photo, MessageContent::Photo { data, .. }) => {
                self.converter.convert_photo(data).await
            }
            _ => {
                debug!(chat_id = %chat, %mode, "content does not match input mode");
                return self.reply(chat, INVALID_INPUT).await;
            }
        };

        let record = match converted {
            Ok(record) => record,
            Err(e) => {
                warn!(chat_id = %chat, %mode, error = %e, "conversion failed");
                return self
                    .reply(chat, format!("❌ Could not extract a record: {}", reason(&e)))
                    .await;
            }
        };

        let id = record.id.clone();
        match self.store.append(record).await {
            Ok(size) => {
                info!(chat_id = %chat, id = %id, size, "record added");
                self.reply(chat, INGEST_OK).await
            }
            Err(e) => {
                warn!(chat_id = %chat, id = %id, error = %e, "append failed");
                self.reply(chat, format!("❌ Could not save the record: {}", reason(&e)))
                    .await
            }
        }
    }

    async fn load_records(&self) -> Option<Vec<VehicleRecord>> {
        match self.store.records().await {
            Ok(records) => Some(records),
            Err(e) => {
                warn!(error = %e, "store read failed");
                None
            }
        }
    }

    /// Configured ceiling, capped by the transport's message limit.
    fn chunk_ceiling(&self) -> usize {
        match self.channel.capabilities().max_message_length {
            Some(limit) => self.settings.chunk_ceiling.min(limit),
            None => self.settings.chunk_ceiling,
        }
    }

    /// Answers a request the agent turned down.
    async fn refuse(&self, chat: ChatId, err: FleetError) -> Result<(), FleetError> {
        debug!(chat_id = %chat, error = %err, "request refused");
        self.reply(chat, user_message(&err)).await
    }

    async fn reply(&self, chat: ChatId, text: impl Into<String>) -> Result<(), FleetError> {
        self.channel
            .send(OutboundMessage::text(chat, text))
            .await
            .map(|_| ())
    }

    async fn reply_with(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<(), FleetError> {
        self.channel
            .send(OutboundMessage::text(chat, text).with_keyboard(keyboard))
            .await
            .map(|_| ())
    }
}

/// Chat reply for an error raised while serving a message.
pub fn user_message(err: &FleetError) -> String {
    match err {
        FleetError::AuthenticationFailed => AUTH_FAILED.to_string(),
        FleetError::RecordNotFound { id } => LookupOutcome::NotFound(id.clone()).render(),
        FleetError::UnrecognizedInput(_) => UNKNOWN_COMMAND.to_string(),
        FleetError::StoreUnavailable { .. } => DATA_UNAVAILABLE.to_string(),
        other => format!("❌ {}", reason(other)),
    }
}

/// User-facing reason for a failure.
fn reason(e: &FleetError) -> String {
    match e {
        FleetError::ConversionFailed { message, .. } | FleetError::StoreUnavailable { message, .. } => {
            message.clone()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusals_map_to_their_replies() {
        assert_eq!(user_message(&FleetError::AuthenticationFailed), AUTH_FAILED);
        assert_eq!(
            user_message(&FleetError::RecordNotFound { id: "KM99".into() }),
            "❌ No train found with ID KM99"
        );
        assert_eq!(
            user_message(&FleetError::UnrecognizedInput("hello".into())),
            UNKNOWN_COMMAND
        );
        assert_eq!(user_message(&FleetError::store("gone")), DATA_UNAVAILABLE);
    }

    #[test]
    fn other_failures_carry_their_reason() {
        assert_eq!(
            user_message(&FleetError::conversion("blurry")),
            "❌ blurry"
        );
        assert_eq!(
            user_message(&FleetError::DuplicateRecord { id: "KM01".into() }),
            "❌ a record with id `KM01` already exists"
        );
    }
}
