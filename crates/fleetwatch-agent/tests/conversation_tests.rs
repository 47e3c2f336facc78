// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation flows driven through the test harness.

use std::sync::Arc;
use std::time::Duration;

use fleetwatch_agent::handler::{
    AUTH_FAILED, AUTH_OK, DATA_UNAVAILABLE, EXPORT_FAILED, INGEST_OK, INVALID_INPUT, MENU_PROMPT,
    MODE_PROMPT, PASSWORD_PROMPT, SEARCH_HINT, UNKNOWN_COMMAND,
};
use fleetwatch_agent::SessionState;
use fleetwatch_core::{ChatId, InputMode};
use fleetwatch_test_utils::harness::TEST_PASSWORD;
use fleetwatch_test_utils::{sample_record, MockChannel, MockConverter, TestHarness, SAMPLE_FLEET_CSV};

const CHAT: ChatId = ChatId(42);

async fn logged_in() -> TestHarness {
    let mut harness = TestHarness::builder().build().await.unwrap();
    harness.login(CHAT).await.unwrap();
    harness
}

#[tokio::test]
async fn start_prompts_for_password() {
    let mut harness = TestHarness::builder().build().await.unwrap();
    assert_eq!(harness.send_text(CHAT, "/start").await.unwrap(), vec![PASSWORD_PROMPT]);
    assert_eq!(harness.state(CHAT), SessionState::Unauthenticated);
}

#[tokio::test]
async fn wrong_password_can_be_retried_forever() {
    let mut harness = TestHarness::builder().build().await.unwrap();
    for attempt in ["nope", "📊 Show Status", "KM01", ""] {
        assert_eq!(harness.send_text(CHAT, attempt).await.unwrap(), vec![AUTH_FAILED]);
    }
    assert_eq!(harness.send_photo(CHAT, b"img").await.unwrap(), vec![AUTH_FAILED]);
    assert_eq!(harness.state(CHAT), SessionState::Unauthenticated);

    assert_eq!(harness.send_text(CHAT, TEST_PASSWORD).await.unwrap(), vec![AUTH_OK]);
    assert_eq!(harness.state(CHAT), SessionState::Idle);
}

#[tokio::test]
async fn login_shows_the_action_keyboard() {
    let mut harness = TestHarness::builder().build().await.unwrap();
    let replies = harness
        .send(CHAT, fleetwatch_core::types::MessageContent::Text(TEST_PASSWORD.into()))
        .await
        .unwrap();
    let keyboard = replies[0].keyboard.as_ref().expect("keyboard attached");
    assert_eq!(
        keyboard.labels().collect::<Vec<_>>(),
        vec![
            "📊 Show Status",
            "⚠️ Maintenance Alerts",
            "🔍 Search Train",
            "📂 Export CSV",
            "➕ Add Data"
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn login_schedules_exactly_one_notification() {
    let mut harness = TestHarness::builder().build().await.unwrap();
    harness.login(CHAT).await.unwrap();
    assert!(harness.agent.notifier().is_pending(CHAT));

    // A second chat logging in gets its own.
    harness.login(ChatId(7)).await.unwrap();
    harness.channel.clear_sent().await;

    tokio::time::sleep(Duration::from_secs(21)).await;
    let sent = harness.channel.sent_messages().await;
    let to_chat: Vec<_> = sent.iter().filter(|m| m.chat_id == CHAT).collect();
    assert_eq!(to_chat.len(), 1);
    assert_eq!(to_chat[0].content, "🚨 ALERT: A sensor on a train has failed!");
    assert_eq!(sent.len(), 2);
}

#[tokio::test]
async fn status_summary() {
    let mut harness = logged_in().await;
    for input in ["📊 Show Status", "/status"] {
        assert_eq!(
            harness.send_text(CHAT, input).await.unwrap(),
            vec!["🚆 Current Fleet Status\n- Revenue: 2\n- Standby: 0\n- IBL: 2"]
        );
    }
}

#[tokio::test]
async fn maintenance_alerts_list_due_certificates() {
    let mut harness = logged_in().await;
    let replies = harness.send_text(CHAT, "⚠️ Maintenance Alerts").await.unwrap();
    assert_eq!(
        replies,
        vec![
            "⚠️ Maintenance Due Soon:\n\
             - KM01: Fitness Rollingstock Validtill 3 days\n\
             - KM03: Fitness Rollingstock Validtill -2 days\n\
             - KM02: Fitness Signalling Validtill 5 days\n\
             - KM03: Fitness Telecom Validtill 7 days\n"
        ]
    );
}

#[tokio::test]
async fn alerts_split_across_messages_under_a_small_ceiling() {
    let mut harness = TestHarness::builder()
        .with_chunk_ceiling(100)
        .build()
        .await
        .unwrap();
    harness.login(CHAT).await.unwrap();
    let replies = harness.send_text(CHAT, "/alerts").await.unwrap();
    assert!(replies.len() > 1);
    for chunk in &replies {
        assert!(chunk.starts_with("⚠️ Maintenance Due Soon:\n"));
        assert!(chunk.chars().count() <= 100);
    }
}

#[tokio::test]
async fn transport_limit_caps_the_ceiling() {
    let mut harness = TestHarness::builder()
        .with_channel(MockChannel::new().with_max_message_length(100))
        .build()
        .await
        .unwrap();
    harness.login(CHAT).await.unwrap();
    let replies = harness.send_text(CHAT, "/alerts").await.unwrap();
    assert!(replies.len() > 1);
}

#[tokio::test]
async fn no_alerts_sentinel() {
    let mut harness = TestHarness::builder().with_window_days(0).build().await.unwrap();
    harness.login(CHAT).await.unwrap();
    // Only the already-expired certificate qualifies with a zero window.
    let replies = harness.send_text(CHAT, "/alerts").await.unwrap();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].contains("KM03: Fitness Rollingstock Validtill -2 days"));

    let mut harness = TestHarness::builder()
        .with_today(chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
        .build()
        .await
        .unwrap();
    harness.login(CHAT).await.unwrap();
    assert_eq!(
        harness.send_text(CHAT, "/alerts").await.unwrap(),
        vec!["✅ No certificates expiring soon."]
    );
}

#[tokio::test]
async fn search_and_lookup() {
    let mut harness = logged_in().await;
    assert_eq!(harness.send_text(CHAT, "🔍 Search Train").await.unwrap(), vec![SEARCH_HINT]);

    let report = harness.send_text(CHAT, "KM02").await.unwrap();
    assert_eq!(
        report,
        vec![
            "🚇 Train KM02\n\
             Status: For Maintenance\n\
             Open Job Cards: 2\n\
             KM Reading: 8400\n\
             Rolling Stock Cert: 2026-01-10\n\
             Signalling Cert: 2025-10-05\n\
             Telecom Cert: N/A\n\
             Branding Hours Required: 0\n\
             Cleaning Slot Available: False\n\
             Bay Position: IBL-2\n\
             Shunting Distance (m): 60\n\
             Performance Score: 0.71"
        ]
    );

    assert_eq!(
        harness.send_text(CHAT, "KM99").await.unwrap(),
        vec!["❌ No train found with ID KM99"]
    );
}

#[tokio::test]
async fn export_uploads_the_raw_file() {
    let mut harness = logged_in().await;
    let replies = harness.send_text(CHAT, "📂 Export CSV").await.unwrap();
    assert!(replies.is_empty());
    let files = harness.files().await;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].filename, "metro_data.csv");
    assert_eq!(files[0].data, SAMPLE_FLEET_CSV.as_bytes());
}

#[tokio::test]
async fn export_reports_a_missing_file() {
    let mut harness = logged_in().await;
    std::fs::remove_file(&harness.data_path).unwrap();
    assert_eq!(harness.send_text(CHAT, "/export").await.unwrap(), vec![EXPORT_FAILED]);
    assert_eq!(harness.send_text(CHAT, "/status").await.unwrap(), vec![DATA_UNAVAILABLE]);
    assert_eq!(harness.send_text(CHAT, "KM01").await.unwrap(), vec![DATA_UNAVAILABLE]);
    assert_eq!(harness.state(CHAT), SessionState::Idle);
}

#[tokio::test]
async fn add_data_by_text_grows_the_store() {
    let mut harness = logged_in().await;

    let replies = harness
        .send(CHAT, fleetwatch_core::types::MessageContent::Text("➕ Add Data".into()))
        .await
        .unwrap();
    assert_eq!(replies[0].content, MODE_PROMPT);
    assert_eq!(replies[0].keyboard.as_ref().unwrap().labels().count(), 3);
    assert_eq!(harness.state(CHAT), SessionState::Idle);

    harness.send_text(CHAT, "✏️ Text").await.unwrap();
    assert_eq!(harness.state(CHAT), SessionState::AwaitingInput(InputMode::Text));

    let replies = harness
        .send_text(
            CHAT,
            "id: KM30\njob cards: 0\nmileage: 10\nbranding: 0\ncleaning: yes\nbay: B5\nshunting: 12\nscore: 0.5",
        )
        .await
        .unwrap();
    assert_eq!(replies, vec![INGEST_OK]);
    assert_eq!(harness.state(CHAT), SessionState::Idle);
    assert_eq!(harness.record_count().await.unwrap(), 5);

    let report = harness.send_text(CHAT, "KM30").await.unwrap();
    assert!(report[0].starts_with("🚇 Train KM30\nStatus: Operational"));
}

#[tokio::test]
async fn conversion_failure_clears_the_pending_mode() {
    let mut harness = logged_in().await;
    harness.send_text(CHAT, "✏️ Text").await.unwrap();
    let replies = harness.send_text(CHAT, "just some words").await.unwrap();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].starts_with("❌ Could not extract a record: "), "{replies:?}");
    assert_eq!(harness.state(CHAT), SessionState::Idle);
    assert_eq!(harness.record_count().await.unwrap(), 4);

    // The next free text is no longer treated as input.
    assert_eq!(harness.send_text(CHAT, "just some words").await.unwrap(), vec![UNKNOWN_COMMAND]);
}

#[tokio::test]
async fn mismatched_content_is_invalid_input() {
    let mut harness = logged_in().await;
    harness.send_text(CHAT, "📄 Document").await.unwrap();
    assert_eq!(harness.send_text(CHAT, "hello").await.unwrap(), vec![INVALID_INPUT]);
    assert_eq!(harness.state(CHAT), SessionState::Idle);

    harness.send_text(CHAT, "📸 Photo").await.unwrap();
    assert_eq!(
        harness.send_document(CHAT, b"a,b", "x.csv").await.unwrap(),
        vec![INVALID_INPUT]
    );
}

#[tokio::test]
async fn photo_and_document_go_through_the_converter() {
    let converter = Arc::new(MockConverter::new());
    converter.push_record(sample_record("KM40")).await;
    converter.push_failure("blurry").await;
    converter.push_record(sample_record("KM41")).await;

    let mut harness = TestHarness::builder()
        .with_converter(Arc::clone(&converter) as _)
        .build()
        .await
        .unwrap();
    harness.login(CHAT).await.unwrap();

    harness.send_text(CHAT, "📸 Photo").await.unwrap();
    assert_eq!(harness.send_photo(CHAT, b"img").await.unwrap(), vec![INGEST_OK]);

    harness.send_text(CHAT, "📸 Photo").await.unwrap();
    assert_eq!(
        harness.send_photo(CHAT, b"img").await.unwrap(),
        vec!["❌ Could not extract a record: blurry"]
    );

    harness.send_text(CHAT, "📄 Document").await.unwrap();
    assert_eq!(
        harness.send_document(CHAT, b"%PDF", "card.pdf").await.unwrap(),
        vec![INGEST_OK]
    );

    assert_eq!(
        converter.calls().await,
        vec![InputMode::Photo, InputMode::Photo, InputMode::Document]
    );
    assert_eq!(harness.record_count().await.unwrap(), 6);
}

#[tokio::test]
async fn store_failure_on_append_is_reported() {
    let converter = Arc::new(MockConverter::new());
    converter.push_record(sample_record("KM50")).await;
    let mut harness = TestHarness::builder()
        .with_converter(Arc::clone(&converter) as _)
        .build()
        .await
        .unwrap();
    harness.login(CHAT).await.unwrap();

    harness.send_text(CHAT, "📸 Photo").await.unwrap();
    std::fs::remove_file(&harness.data_path).unwrap();
    let replies = harness.send_photo(CHAT, b"img").await.unwrap();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].starts_with("❌ Could not save the record: "), "{replies:?}");
}

#[tokio::test]
async fn adding_an_existing_id_is_refused() {
    let converter = Arc::new(MockConverter::new());
    converter.push_record(sample_record("KM02")).await;
    let mut harness = TestHarness::builder()
        .with_converter(Arc::clone(&converter) as _)
        .build()
        .await
        .unwrap();
    harness.login(CHAT).await.unwrap();
    let before = std::fs::read(&harness.data_path).unwrap();

    harness.send_text(CHAT, "📸 Photo").await.unwrap();
    let replies = harness.send_photo(CHAT, b"img").await.unwrap();
    assert_eq!(
        replies,
        vec!["❌ Could not save the record: a record with id `KM02` already exists"]
    );
    assert_eq!(std::fs::read(&harness.data_path).unwrap(), before);
    assert_eq!(harness.record_count().await.unwrap(), 4);
}

#[tokio::test]
async fn action_during_add_data_abandons_the_flow() {
    let mut harness = logged_in().await;
    harness.send_text(CHAT, "✏️ Text").await.unwrap();

    let replies = harness.send_text(CHAT, "/status").await.unwrap();
    assert!(replies[0].starts_with("🚆 Current Fleet Status"));
    assert_eq!(harness.state(CHAT), SessionState::Idle);
    assert_eq!(harness.record_count().await.unwrap(), 4);

    harness.send_text(CHAT, "📄 Document").await.unwrap();
    assert_eq!(harness.send_text(CHAT, "/start").await.unwrap(), vec![MENU_PROMPT]);
    assert_eq!(harness.state(CHAT), SessionState::Idle);
}

#[tokio::test]
async fn unknown_input_when_idle() {
    let mut harness = logged_in().await;
    assert_eq!(harness.send_text(CHAT, "hello").await.unwrap(), vec![UNKNOWN_COMMAND]);
    assert_eq!(harness.send_photo(CHAT, b"img").await.unwrap(), vec![UNKNOWN_COMMAND]);
}

#[tokio::test]
async fn sessions_are_per_chat() {
    let mut harness = logged_in().await;
    assert_eq!(harness.send_text(ChatId(2), "/status").await.unwrap(), vec![AUTH_FAILED]);
    assert_eq!(harness.state(ChatId(2)), SessionState::Unauthenticated);
    assert_eq!(harness.state(CHAT), SessionState::Idle);
}
