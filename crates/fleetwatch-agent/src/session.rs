// SPDX-FileCopyrightText: 2026 Fleetwatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-chat conversation state.
//!
//! A chat moves Unauthenticated -> Idle, then between Idle and
//! AwaitingInput while adding data. Nothing returns a chat to
//! Unauthenticated short of a restart.

use std::collections::HashMap;

use fleetwatch_core::{ChatId, InputMode};

/// Observable conversation state of one chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Idle,
    AwaitingInput(InputMode),
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Unauthenticated => write!(f, "unauthenticated"),
            SessionState::Idle => write!(f, "idle"),
            SessionState::AwaitingInput(mode) => write!(f, "awaiting {mode}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    authorized: bool,
    pending_input_mode: Option<InputMode>,
}

impl Session {
    pub fn state(&self) -> SessionState {
        match (self.authorized, self.pending_input_mode) {
            (false, _) => SessionState::Unauthenticated,
            (true, None) => SessionState::Idle,
            (true, Some(mode)) => SessionState::AwaitingInput(mode),
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Marks the session authorized if `attempt` (trimmed) equals `secret`.
    pub fn authenticate(&mut self, attempt: &str, secret: &str) -> bool {
        if attempt.trim() == secret {
            self.authorized = true;
        }
        self.authorized
    }

    /// Arms the add-data flow. Ignored unless authorized.
    pub fn select_mode(&mut self, mode: InputMode) -> bool {
        if self.authorized {
            self.pending_input_mode = Some(mode);
        }
        self.authorized
    }

    /// Clears and returns the pending input mode.
    pub fn take_pending(&mut self) -> Option<InputMode> {
        self.pending_input_mode.take()
    }
}

/// All sessions, keyed by chat. Created on first contact.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<ChatId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, chat: ChatId) -> &mut Session {
        self.sessions.entry(chat).or_default()
    }

    pub fn state(&self, chat: ChatId) -> SessionState {
        self.sessions
            .get(&chat)
            .map_or(SessionState::Unauthenticated, Session::state)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
