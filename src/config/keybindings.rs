//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions while the result list has focus.
///
/// While the search input is focused, printable keys edit the text instead;
/// only [`KeyBindings::input_action`] applies there.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Actions reachable while typing in the search input.
    pub fn input_action(key: KeyEvent) -> Option<KeyAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => Some(KeyAction::SubmitSearch),
            (KeyCode::Esc, _) => Some(KeyAction::CancelInput),
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => Some(KeyAction::ToggleSearchType),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(KeyAction::Quit),
            _ => None,
        }
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Search form
        keys.bind(KeyCode::Char('/'), KeyModifiers::NONE, KeyAction::FocusInput);
        keys.bind(KeyCode::Char('i'), KeyModifiers::NONE, KeyAction::FocusInput);
        keys.bind(KeyCode::Char('t'), KeyModifiers::NONE, KeyAction::ToggleSearchType);
        keys.bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::ToggleSearchType);

        // Vim-style selection
        keys.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::SelectNext);
        keys.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::SelectPrev);
        keys.bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::SelectFirst);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::SelectLast);

        // Arrow keys
        keys.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::SelectNext);
        keys.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::SelectPrev);
        keys.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::SelectFirst);
        keys.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::SelectLast);

        // Page navigation
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        keys.bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        keys.bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);

        // Pagination
        keys.bind(KeyCode::Char('m'), KeyModifiers::NONE, KeyAction::LoadMore);
        keys.bind(KeyCode::Char('r'), KeyModifiers::NONE, KeyAction::Refresh);

        // Application controls
        keys.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);
        keys.bind(KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::Help);

        keys
    }
}
