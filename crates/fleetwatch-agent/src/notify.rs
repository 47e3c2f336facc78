// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot delayed notifications sent after login.
//!
//! Each scheduled notification is a spawned task that sleeps, sends, and
//! then forgets its chat. At most one notification per chat is pending.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use fleetwatch_core::ChannelAdapter;
use fleetwatch_core::ChatId;
use fleetwatch_core::types::OutboundMessage;

pub struct NotificationScheduler {
    channel: Arc<dyn ChannelAdapter + Send + Sync>,
    delay: Duration,
    text: String,
    pending: Arc<DashMap<ChatId, CancellationToken>>,
}

impl NotificationScheduler {
    pub fn new(
        channel: Arc<dyn ChannelAdapter + Send + Sync>,
        delay: Duration,
        text: impl Into<String>,
    ) -> Self {
        Self {
            channel,
            delay,
            text: text.into(),
            pending: Arc::new(DashMap::new()),
        }
    }

    /// Schedules the notification for `chat`.
    ///
    /// Returns `false` without scheduling if one is already pending.
    pub fn schedule(&self, chat: ChatId) -> bool {
        let token = match self.pending.entry(chat) {
            Entry::Occupied(_) => {
                debug!(chat_id = %chat, "notification already pending");
                return false;
            }
            Entry::Vacant(slot) => slot.insert(CancellationToken::new()).clone(),
        };

        let channel = Arc::clone(&self.channel);
        let pending = Arc::clone(&self.pending);
        let delay = self.delay;
        let text = self.text.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    if let Err(e) = channel.send(OutboundMessage::text(chat, text)).await {
                        warn!(chat_id = %chat, error = %e, "failed to send notification");
                    } else {
                        debug!(chat_id = %chat, "notification sent");
                    }
                }
                _ = token.cancelled() => {
                    debug!(chat_id = %chat, "notification cancelled");
                }
            }
            pending.remove(&chat);
        });

        debug!(chat_id = %chat, delay_secs = delay.as_secs(), "notification scheduled");
        true
    }

    pub fn is_pending(&self, chat: ChatId) -> bool {
        self.pending.contains_key(&chat)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Cancels every pending notification.
    pub fn cancel_all(&self) {
        for entry in self.pending.iter() {
            entry.value().cancel();
        }
    }
}
