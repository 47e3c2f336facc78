// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Downloads Telegram attachments into [`MessageContent`] values.

use fleetwatch_core::types::MessageContent;
use fleetwatch_core::FleetError;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{Document, FileMeta, PhotoSize};
use tracing::debug;

/// Resolves the file path with `getFile`, then downloads the bytes.
pub async fn download_file(bot: &Bot, file_meta: &FileMeta) -> Result<Vec<u8>, FleetError> {
    let file = bot
        .get_file(file_meta.id.clone())
        .await
        .map_err(|e| FleetError::Channel {
            message: format!("failed to get file info: {e}"),
            source: Some(Box::new(e)),
        })?;

    let mut buf = Vec::new();
    bot.download_file(&file.path, &mut buf)
        .await
        .map_err(|e| FleetError::Channel {
            message: format!("failed to download file: {e}"),
            source: Some(Box::new(e)),
        })?;

    debug!(file_id = %file_meta.id, size = buf.len(), "downloaded file from Telegram");
    Ok(buf)
}

/// Downloads the largest size of a photo (the last entry).
pub async fn extract_photo_content(
    bot: &Bot,
    photos: &[PhotoSize],
    caption: Option<&str>,
) -> Result<MessageContent, FleetError> {
    let largest = photos.last().ok_or_else(|| FleetError::Channel {
        message: "photo array is empty".into(),
        source: None,
    })?;

    Ok(MessageContent::Photo {
        data: download_file(bot, &largest.file).await?,
        caption: caption.map(str::to_string),
    })
}

pub async fn extract_document_content(
    bot: &Bot,
    doc: &Document,
) -> Result<MessageContent, FleetError> {
    let data = download_file(bot, &doc.file).await?;

    Ok(MessageContent::Document {
        data,
        filename: doc
            .file_name
            .clone()
            .unwrap_or_else(|| "document".to_string()),
        mime_type: doc
            .mime_type
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string()),
    })
}
