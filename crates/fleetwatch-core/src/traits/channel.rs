// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for chat transport integrations.

use async_trait::async_trait;

use crate::error::FleetError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChannelCapabilities, InboundMessage, MessageId, OutboundFile, OutboundMessage};

/// Adapter for a bidirectional chat transport.
///
/// Inbound files are downloaded by the adapter before [`receive`](Self::receive)
/// returns them, so consumers only ever see bytes.
#[async_trait]
pub trait ChannelAdapter: PluginAdapter {
    /// Returns the capabilities supported by this channel.
    fn capabilities(&self) -> ChannelCapabilities;

    /// Establishes a connection to the messaging platform.
    async fn connect(&mut self) -> Result<(), FleetError>;

    /// Sends a text message, optionally with a reply keyboard.
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, FleetError>;

    /// Uploads a file to a chat.
    async fn send_file(&self, file: OutboundFile) -> Result<MessageId, FleetError>;

    /// Receives the next inbound message from the channel.
    async fn receive(&self) -> Result<InboundMessage, FleetError>;
}
