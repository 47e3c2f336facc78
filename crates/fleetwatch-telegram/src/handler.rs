// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion between Telegram updates and channel-agnostic messages.

use fleetwatch_core::types::{InboundMessage, Keyboard, MessageContent};
use fleetwatch_core::{ChatId, FleetError};
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup};
use tracing::debug;

use crate::media;

/// Extracts text, photo, or document content from a message.
///
/// Returns `None` for anything else, such as stickers or voice notes.
pub async fn extract_content(
    bot: &Bot,
    msg: &Message,
) -> Result<Option<MessageContent>, FleetError> {
    if let Some(text) = msg.text() {
        return Ok(Some(MessageContent::Text(text.to_string())));
    }

    if let Some(photos) = msg.photo() {
        let content = media::extract_photo_content(bot, photos, msg.caption()).await?;
        return Ok(Some(content));
    }

    if let Some(doc) = msg.document() {
        let content = media::extract_document_content(bot, doc).await?;
        return Ok(Some(content));
    }

    debug!(msg_id = msg.id.0, "ignoring unsupported message type");
    Ok(None)
}

pub fn to_inbound_message(msg: &Message, content: MessageContent) -> InboundMessage {
    let sender_id = msg
        .from
        .as_ref()
        .map(|u| u.id.0.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    InboundMessage {
        id: msg.id.0.to_string(),
        chat_id: ChatId(msg.chat.id.0),
        sender_id,
        content,
        timestamp: msg.date.to_rfc3339(),
    }
}

/// Builds a resizable reply keyboard with the same rows as `keyboard`.
pub fn to_reply_keyboard(keyboard: &Keyboard) -> KeyboardMarkup {
    KeyboardMarkup::new(
        keyboard
            .rows
            .iter()
            .map(|row| row.iter().map(KeyboardButton::new).collect::<Vec<_>>())
            .collect::<Vec<_>>(),
    )
    .resize_keyboard()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_message(chat_id: i64, body: serde_json::Value) -> Message {
        let mut json = serde_json::json!({
            "message_id": 7,
            "date": 1700000000i64,
            "chat": {
                "id": chat_id,
                "type": "private",
                "first_name": "Test",
            },
            "from": {
                "id": 555u64,
                "is_bot": false,
                "first_name": "Test",
            },
        });
        if let (Some(obj), Some(extra)) = (json.as_object_mut(), body.as_object()) {
            obj.extend(extra.clone());
        }
        serde_json::from_value(json).expect("failed to deserialize mock message")
    }

    #[test]
    fn maps_ids_and_chat() {
        let msg = make_message(12345, serde_json::json!({"text": "KM01"}));
        let inbound = to_inbound_message(&msg, MessageContent::Text("KM01".into()));
        assert_eq!(inbound.id, "7");
        assert_eq!(inbound.chat_id, ChatId(12345));
        assert_eq!(inbound.sender_id, "555");
        assert!(inbound.timestamp.starts_with("2023-11-14T"));
    }

    #[test]
    fn group_chats_keep_negative_ids() {
        let json = serde_json::json!({
            "message_id": 1,
            "date": 1700000000i64,
            "chat": {"id": -100123i64, "type": "supergroup", "title": "Depot"},
            "text": "hi",
        });
        let msg: Message = serde_json::from_value(json).unwrap();
        let inbound = to_inbound_message(&msg, MessageContent::Text("hi".into()));
        assert_eq!(inbound.chat_id, ChatId(-100123));
        assert_eq!(inbound.sender_id, "unknown");
    }

    #[tokio::test]
    async fn text_content_needs_no_download() {
        let msg = make_message(1, serde_json::json!({"text": "/start"}));
        let bot = Bot::new("test:token");
        match extract_content(&bot, &msg).await.unwrap() {
            Some(MessageContent::Text(t)) => assert_eq!(t, "/start"),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn reply_keyboard_keeps_rows() {
        let markup = to_reply_keyboard(&Keyboard::from_rows(&[&["a", "b"], &["c"]]));
        assert_eq!(markup.keyboard.len(), 2);
        assert_eq!(markup.keyboard[0][1].text, "b");
    }
}
