// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Fleetwatch.
//!
//! This crate provides the fleet data model, the error taxonomy, and the
//! adapter traits (channel, record store, content conversion) that the
//! rest of the workspace is written against.

pub mod error;
pub mod record;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FleetError;
pub use record::{CertificateDomain, InputMode, VehicleRecord};
pub use types::{AdapterType, ChatId, HealthStatus, MessageId};

pub use traits::{ChannelAdapter, ContentConverter, PluginAdapter, RecordStore};

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Keyboard, OutboundMessage};

    #[test]
    fn adapter_type_has_three_variants() {
        use std::str::FromStr;

        let variants = [
            AdapterType::Channel,
            AdapterType::Storage,
            AdapterType::Converter,
        ];

        for variant in &variants {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn input_mode_display() {
        assert_eq!(InputMode::Text.to_string(), "Text");
        assert_eq!(InputMode::Document.to_string(), "Document");
        assert_eq!(InputMode::Photo.to_string(), "Photo");
    }

    #[test]
    fn keyboard_labels_are_row_major() {
        let kb = Keyboard::from_rows(&[&["a", "b"], &["c"]]);
        assert_eq!(kb.labels().collect::<Vec<_>>(), vec!["a", "b", "c"]);

        let msg = OutboundMessage::text(ChatId(7), "hi").with_keyboard(kb.clone());
        assert_eq!(msg.keyboard, Some(kb));
        assert_eq!(msg.chat_id, ChatId(7));
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_channel_adapter<T: ChannelAdapter>() {}
        fn _assert_record_store<T: RecordStore>() {}
        fn _assert_content_converter<T: ContentConverter>() {}
    }
}
