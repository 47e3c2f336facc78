// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel adapter for deterministic testing.
//!
//! `MockChannel` implements `ChannelAdapter` with injectable inbound messages
//! and captured outbound messages and files for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use fleetwatch_core::types::{
    ChannelCapabilities, InboundMessage, OutboundFile, OutboundMessage,
};
use fleetwatch_core::{
    AdapterType, ChannelAdapter, FleetError, HealthStatus, MessageId, PluginAdapter,
};

/// A mock chat channel.
///
/// - **inbound**: messages injected via `inject_message()` are returned by `receive()`
/// - **sent**: messages passed to `send()` are captured for `sent_messages()`
/// - **files**: uploads passed to `send_file()` are captured for `sent_files()`
pub struct MockChannel {
    inbound: Arc<Mutex<VecDeque<InboundMessage>>>,
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    files: Arc<Mutex<Vec<OutboundFile>>>,
    notify: Arc<Notify>,
    max_message_length: Option<usize>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            files: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
            max_message_length: None,
        }
    }

    /// Reports a per-message length limit in `capabilities()`.
    pub fn with_max_message_length(mut self, limit: usize) -> Self {
        self.max_message_length = Some(limit);
        self
    }

    /// Queues a message for the next `receive()`.
    pub async fn inject_message(&self, msg: InboundMessage) {
        self.inbound.lock().await.push_back(msg);
        self.notify.notify_one();
    }

    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    /// Text of every sent message, in order.
    pub async fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().await.iter().map(|m| m.content.clone()).collect()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    pub async fn sent_files(&self) -> Vec<OutboundFile> {
        self.files.lock().await.clone()
    }

    /// Clears captured messages and files.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
        self.files.lock().await.clear();
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockChannel {
    fn name(&self) -> &str {
        "mock-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, FleetError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FleetError> {
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for MockChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_keyboards: true,
            supports_documents: true,
            supports_photos: true,
            max_message_length: self.max_message_length,
        }
    }

    async fn connect(&mut self) -> Result<(), FleetError> {
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, FleetError> {
        let mut sent = self.sent.lock().await;
        sent.push(msg);
        Ok(MessageId(format!("mock-msg-{}", sent.len())))
    }

    async fn send_file(&self, file: OutboundFile) -> Result<MessageId, FleetError> {
        let mut files = self.files.lock().await;
        files.push(file);
        Ok(MessageId(format!("mock-file-{}", files.len())))
    }

    async fn receive(&self) -> Result<InboundMessage, FleetError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(msg) = queue.pop_front() {
                    return Ok(msg);
                }
            }
            self.notify.notified().await;
        }
    }
}
