// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end conversation tests.
//!
//! `TestHarness` wires a real [`FleetAgent`] to a [`MockChannel`] and a
//! [`CsvRecordStore`] over a temp file, and drives it one message at a time.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use fleetwatch_agent::{AgentSettings, FleetAgent, SessionRegistry, SessionState};
use fleetwatch_core::types::{InboundMessage, MessageContent, OutboundFile, OutboundMessage};
use fleetwatch_core::{ChatId, ContentConverter, FleetError, RecordStore};
use fleetwatch_convert::StructuredConverter;
use fleetwatch_storage::CsvRecordStore;

use crate::fixtures::{sample_today, SAMPLE_FLEET_CSV};
use crate::mock_channel::MockChannel;

/// Secret used by harness agents unless overridden.
pub const TEST_PASSWORD: &str = "kmrl2025";

/// Builder for test environments.
pub struct TestHarnessBuilder {
    csv: Option<String>,
    converter: Option<Arc<dyn ContentConverter + Send + Sync>>,
    channel: Option<MockChannel>,
    today: NaiveDate,
    window_days: u32,
    chunk_ceiling: usize,
    alert_delay: Duration,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            csv: Some(SAMPLE_FLEET_CSV.to_string()),
            converter: None,
            channel: None,
            today: sample_today(),
            window_days: 7,
            chunk_ceiling: 3500,
            alert_delay: Duration::from_secs(20),
        }
    }

    /// Replaces the sample fleet with `csv`.
    pub fn with_csv(mut self, csv: impl Into<String>) -> Self {
        self.csv = Some(csv.into());
        self
    }

    /// Starts with no data file; store reads fail.
    pub fn without_data_file(mut self) -> Self {
        self.csv = None;
        self
    }

    /// Uses `converter` instead of the built-in structured converter.
    pub fn with_converter(mut self, converter: Arc<dyn ContentConverter + Send + Sync>) -> Self {
        self.converter = Some(converter);
        self
    }

    pub fn with_channel(mut self, channel: MockChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    pub fn with_chunk_ceiling(mut self, ceiling: usize) -> Self {
        self.chunk_ceiling = ceiling;
        self
    }

    pub fn with_alert_delay(mut self, delay: Duration) -> Self {
        self.alert_delay = delay;
        self
    }

    pub async fn build(self) -> Result<TestHarness, FleetError> {
        let temp_dir = tempfile::TempDir::new()
            .map_err(|e| FleetError::Internal(format!("temp dir: {e}")))?;
        let data_path = temp_dir.path().join("metro_data.csv");

        let store = Arc::new(CsvRecordStore::at(&data_path));
        if let Some(csv) = &self.csv {
            std::fs::write(&data_path, csv)
                .map_err(|e| FleetError::Internal(format!("write fixture: {e}")))?;
            store.initialize().await?;
        }

        let channel = Arc::new(self.channel.unwrap_or_default());
        let converter = self
            .converter
            .unwrap_or_else(|| Arc::new(StructuredConverter::new()));

        let settings = AgentSettings {
            secret: TEST_PASSWORD.to_string(),
            window_days: self.window_days,
            chunk_ceiling: self.chunk_ceiling,
            alert_delay: self.alert_delay,
            alert_text: "🚨 ALERT: A sensor on a train has failed!".to_string(),
            export_filename: "metro_data.csv".to_string(),
            as_of: Some(self.today),
        };

        let agent = FleetAgent::new(
            Arc::clone(&channel) as _,
            Arc::clone(&store) as _,
            converter,
            settings,
        );

        Ok(TestHarness {
            channel,
            store,
            agent,
            sessions: SessionRegistry::new(),
            data_path,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete agent over mock transport and a temp CSV file.
pub struct TestHarness {
    pub channel: Arc<MockChannel>,
    pub store: Arc<CsvRecordStore>,
    pub agent: FleetAgent,
    pub sessions: SessionRegistry,
    pub data_path: PathBuf,
    /// Kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Handles one message and returns the replies it produced.
    pub async fn send(
        &mut self,
        chat: ChatId,
        content: MessageContent,
    ) -> Result<Vec<OutboundMessage>, FleetError> {
        self.channel.clear_sent().await;
        let inbound = InboundMessage {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat,
            sender_id: format!("user-{chat}"),
            content,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.agent.handle(&mut self.sessions, inbound).await?;
        Ok(self.channel.sent_messages().await)
    }

    /// Sends text and returns the reply texts.
    pub async fn send_text(&mut self, chat: ChatId, text: &str) -> Result<Vec<String>, FleetError> {
        let replies = self.send(chat, MessageContent::Text(text.to_string())).await?;
        Ok(replies.into_iter().map(|m| m.content).collect())
    }

    pub async fn send_document(
        &mut self,
        chat: ChatId,
        data: &[u8],
        filename: &str,
    ) -> Result<Vec<String>, FleetError> {
        let content = MessageContent::Document {
            data: data.to_vec(),
            filename: filename.to_string(),
            mime_type: "application/octet-stream".to_string(),
        };
        let replies = self.send(chat, content).await?;
        Ok(replies.into_iter().map(|m| m.content).collect())
    }

    pub async fn send_photo(&mut self, chat: ChatId, data: &[u8]) -> Result<Vec<String>, FleetError> {
        let content = MessageContent::Photo {
            data: data.to_vec(),
            caption: None,
        };
        let replies = self.send(chat, content).await?;
        Ok(replies.into_iter().map(|m| m.content).collect())
    }

    /// Authenticates `chat` with the harness password.
    pub async fn login(&mut self, chat: ChatId) -> Result<(), FleetError> {
        self.send_text(chat, TEST_PASSWORD).await?;
        Ok(())
    }

    /// Files uploaded by the last message.
    pub async fn files(&self) -> Vec<OutboundFile> {
        self.channel.sent_files().await
    }

    pub fn state(&self, chat: ChatId) -> SessionState {
        self.sessions.state(chat)
    }

    /// Number of records currently readable from the store.
    pub async fn record_count(&self) -> Result<usize, FleetError> {
        Ok(self.store.records().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builder_loads_the_sample_fleet() {
        let harness = TestHarness::builder().build().await.unwrap();
        assert_eq!(harness.record_count().await.unwrap(), 4);
        assert_eq!(harness.state(ChatId(1)), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn login_unlocks_the_chat() {
        let mut harness = TestHarness::builder().build().await.unwrap();
        harness.login(ChatId(1)).await.unwrap();
        assert_eq!(harness.state(ChatId(1)), SessionState::Idle);
    }

    #[tokio::test]
    async fn harnesses_use_separate_files() {
        let h1 = TestHarness::builder().build().await.unwrap();
        let h2 = TestHarness::builder().with_csv(
            SAMPLE_FLEET_CSV.lines().take(2).collect::<Vec<_>>().join("\n"),
        ).build().await.unwrap();
        assert_ne!(h1.data_path, h2.data_path);
        assert_eq!(h2.record_count().await.unwrap(), 1);
    }
}
