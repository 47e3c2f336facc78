// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of a chat on the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a sent message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Storage,
    Converter,
}

/// Content of an inbound chat message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    /// Plain text.
    Text(String),
    /// A downloaded file attachment.
    Document {
        data: Vec<u8>,
        filename: String,
        mime_type: String,
    },
    /// A downloaded photo (largest available size).
    Photo {
        data: Vec<u8>,
        caption: Option<String>,
    },
}

impl MessageContent {
    /// Returns the text payload, if this is a text message.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }

    /// Short name of the payload kind, for logs and refusals.
    pub fn kind(&self) -> &'static str {
        match self {
            MessageContent::Text(_) => "text",
            MessageContent::Document { .. } => "document",
            MessageContent::Photo { .. } => "photo",
        }
    }
}

/// A message received from a channel adapter.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub chat_id: ChatId,
    pub sender_id: String,
    pub content: MessageContent,
    /// RFC 3339 receive time.
    pub timestamp: String,
}

/// A reply keyboard: rows of selectable labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keyboard {
    pub rows: Vec<Vec<String>>,
}

impl Keyboard {
    /// Builds a keyboard from static label rows.
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|l| (*l).to_string()).collect())
                .collect(),
        }
    }

    /// All labels in row-major order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

/// A text message to be sent via a channel adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub chat_id: ChatId,
    pub content: String,
    /// Optional reply keyboard shown with the message.
    pub keyboard: Option<Keyboard>,
}

impl OutboundMessage {
    /// A plain text message with no keyboard.
    pub fn text(chat_id: ChatId, content: impl Into<String>) -> Self {
        Self {
            chat_id,
            content: content.into(),
            keyboard: None,
        }
    }

    /// Attaches a reply keyboard.
    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// A file to be uploaded to a chat.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundFile {
    pub chat_id: ChatId,
    pub data: Vec<u8>,
    pub filename: String,
}

/// Capabilities reported by a channel adapter.
#[derive(Debug, Clone)]
pub struct ChannelCapabilities {
    pub supports_keyboards: bool,
    pub supports_documents: bool,
    pub supports_photos: bool,
    /// Maximum characters per text message, if the transport has a limit.
    pub max_message_length: Option<usize>,
}
