// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps raw chat text to a closed set of intents, and builds the keyboards
//! that produce those texts.

use fleetwatch_core::InputMode;
use fleetwatch_core::types::Keyboard;

/// Prefix shared by every vehicle identifier.
pub const TRAIN_ID_PREFIX: &str = "KM";

pub const START_COMMAND: &str = "/start";

/// A menu action available once authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ShowStatus,
    MaintenanceAlerts,
    SearchTrain,
    ExportCsv,
    AddData,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::ShowStatus,
        Action::MaintenanceAlerts,
        Action::SearchTrain,
        Action::ExportCsv,
        Action::AddData,
    ];

    /// Keyboard button text.
    pub fn label(self) -> &'static str {
        match self {
            Action::ShowStatus => "📊 Show Status",
            Action::MaintenanceAlerts => "⚠️ Maintenance Alerts",
            Action::SearchTrain => "🔍 Search Train",
            Action::ExportCsv => "📂 Export CSV",
            Action::AddData => "➕ Add Data",
        }
    }

    /// Slash-command equivalent of the button.
    pub fn command(self) -> &'static str {
        match self {
            Action::ShowStatus => "/status",
            Action::MaintenanceAlerts => "/alerts",
            Action::SearchTrain => "/search",
            Action::ExportCsv => "/export",
            Action::AddData => "/add",
        }
    }
}

/// Keyboard button text for an input mode.
pub fn mode_label(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Text => "✏️ Text",
        InputMode::Document => "📄 Document",
        InputMode::Photo => "📸 Photo",
    }
}

/// What a text message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Action(Action),
    SelectMode(InputMode),
    TrainId(String),
    FreeText(String),
}

impl Intent {
    /// True for intents that end a pending add-data flow.
    pub fn interrupts_input(&self) -> bool {
        matches!(self, Intent::Start | Intent::Action(_))
    }
}

/// Classifies a text message. Matching is on the trimmed text.
pub fn classify(text: &str) -> Intent {
    let text = text.trim();

    if text == START_COMMAND {
        return Intent::Start;
    }
    if let Some(action) = Action::ALL
        .into_iter()
        .find(|a| a.label() == text || a.command() == text)
    {
        return Intent::Action(action);
    }
    if let Some(mode) = [InputMode::Text, InputMode::Document, InputMode::Photo]
        .into_iter()
        .find(|m| mode_label(*m) == text)
    {
        return Intent::SelectMode(mode);
    }
    if text.starts_with(TRAIN_ID_PREFIX) {
        return Intent::TrainId(text.to_string());
    }
    Intent::FreeText(text.to_string())
}

/// The main menu shown after login.
pub fn action_keyboard() -> Keyboard {
    Keyboard::from_rows(&[
        &[Action::ShowStatus.label(), Action::MaintenanceAlerts.label()],
        &[
            Action::SearchTrain.label(),
            Action::ExportCsv.label(),
            Action::AddData.label(),
        ],
    ])
}

/// The add-data input type picker.
pub fn mode_keyboard() -> Keyboard {
    Keyboard::from_rows(&[&[
        mode_label(InputMode::Photo),
        mode_label(InputMode::Document),
        mode_label(InputMode::Text),
    ]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_and_command_maps_to_its_action() {
        for action in Action::ALL {
            assert_eq!(classify(action.label()), Intent::Action(action));
            assert_eq!(classify(action.command()), Intent::Action(action));
            assert_eq!(classify(&format!("  {}\n", action.label())), Intent::Action(action));
        }
    }

    #[test]
    fn labels_do_not_collide() {
        let kb_action = action_keyboard();
        let kb_mode = mode_keyboard();
        let mut all: Vec<&str> = kb_action.labels().chain(kb_mode.labels()).collect();
        all.push(START_COMMAND);
        let before = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(before, all.len());
    }

    #[test]
    fn mode_labels_select_modes() {
        assert_eq!(classify("✏️ Text"), Intent::SelectMode(InputMode::Text));
        assert_eq!(classify("📄 Document"), Intent::SelectMode(InputMode::Document));
        assert_eq!(classify("📸 Photo"), Intent::SelectMode(InputMode::Photo));
    }

    #[test]
    fn train_ids_and_free_text() {
        assert_eq!(classify("KM07"), Intent::TrainId("KM07".into()));
        assert_eq!(classify(" KM-unknown "), Intent::TrainId("KM-unknown".into()));
        assert_eq!(classify("km07"), Intent::FreeText("km07".into()));
        assert_eq!(classify("hello"), Intent::FreeText("hello".into()));
        assert_eq!(classify("/start"), Intent::Start);
    }

    #[test]
    fn keyboards_have_expected_shape() {
        assert_eq!(action_keyboard().rows.len(), 2);
        assert_eq!(action_keyboard().rows[1].len(), 3);
        assert_eq!(mode_keyboard().labels().count(), 3);
    }

    #[test]
    fn only_start_and_actions_interrupt_input() {
        assert!(Intent::Start.interrupts_input());
        assert!(Intent::Action(Action::AddData).interrupts_input());
        assert!(!Intent::SelectMode(InputMode::Text).interrupts_input());
        assert!(!Intent::TrainId("KM01".into()).interrupts_input());
    }
}
