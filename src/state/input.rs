//! Search input handling (pure state transitions).
//!
//! The input keeps its text while inactive so the form can show the query
//! that produced the current results. The cursor is a char index.

/// Text field state for the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputState {
    /// Not focused; `text` is the last submitted (or initial) query.
    Inactive {
        /// Displayed text.
        text: String,
    },
    /// Focused and accepting characters.
    Editing {
        /// Text being typed.
        text: String,
        /// Char index of the cursor, at most the char count of `text`.
        cursor: usize,
    },
}

impl Default for InputState {
    fn default() -> Self {
        InputState::Inactive {
            text: String::new(),
        }
    }
}

impl InputState {
    /// Inactive input showing `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        InputState::Inactive { text: text.into() }
    }

    /// Query text as entered.
    pub fn text(&self) -> &str {
        match self {
            InputState::Inactive { text } | InputState::Editing { text, .. } => text,
        }
    }

    /// True while the input has focus.
    pub fn is_editing(&self) -> bool {
        matches!(self, InputState::Editing { .. })
    }

    /// Cursor position when editing.
    pub fn cursor(&self) -> Option<usize> {
        match self {
            InputState::Editing { cursor, .. } => Some(*cursor),
            InputState::Inactive { .. } => None,
        }
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Start editing with the cursor after the existing text.
///
/// No-op if already editing.
pub fn activate_input(state: InputState) -> InputState {
    match state {
        InputState::Inactive { text } => {
            let cursor = text.chars().count();
            InputState::Editing { text, cursor }
        }
        other => other,
    }
}

/// Insert `ch` at the cursor and advance it.
pub fn handle_char_input(state: InputState, ch: char) -> InputState {
    match state {
        InputState::Editing { mut text, cursor } => {
            text.insert(byte_offset(&text, cursor), ch);
            InputState::Editing {
                text,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor.
pub fn handle_backspace(state: InputState) -> InputState {
    match state {
        InputState::Editing { mut text, cursor } if cursor > 0 => {
            text.remove(byte_offset(&text, cursor - 1));
            InputState::Editing {
                text,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Delete the character under the cursor.
pub fn handle_delete(state: InputState) -> InputState {
    match state {
        InputState::Editing { mut text, cursor } => {
            if cursor < text.chars().count() {
                text.remove(byte_offset(&text, cursor));
            }
            InputState::Editing { text, cursor }
        }
        other => other,
    }
}

/// Clear the whole field (Ctrl+U).
pub fn clear_input(state: InputState) -> InputState {
    match state {
        InputState::Editing { .. } => InputState::Editing {
            text: String::new(),
            cursor: 0,
        },
        other => other,
    }
}

/// Saturates at 0.
pub fn handle_cursor_left(state: InputState) -> InputState {
    match state {
        InputState::Editing { text, cursor } => InputState::Editing {
            text,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Saturates at the text length.
pub fn handle_cursor_right(state: InputState) -> InputState {
    match state {
        InputState::Editing { text, cursor } => {
            let max_cursor = text.chars().count();
            InputState::Editing {
                text,
                cursor: (cursor + 1).min(max_cursor),
            }
        }
        other => other,
    }
}

/// Move the cursor to the start.
pub fn handle_cursor_home(state: InputState) -> InputState {
    match state {
        InputState::Editing { text, .. } => InputState::Editing { text, cursor: 0 },
        other => other,
    }
}

/// Move the cursor past the last char.
pub fn handle_cursor_end(state: InputState) -> InputState {
    match state {
        InputState::Editing { text, .. } => {
            let cursor = text.chars().count();
            InputState::Editing { text, cursor }
        }
        other => other,
    }
}

/// Leave editing, restoring `previous` (the text of the active query).
pub fn cancel_input(state: InputState, previous: &str) -> InputState {
    match state {
        InputState::Editing { .. } => InputState::Inactive {
            text: previous.to_string(),
        },
        other => other,
    }
}

/// Leave editing and hand back the text to submit.
///
/// Returns `None` for the submission when not editing. Validation of the
/// text happens in the store, not here.
pub fn submit_input(state: InputState) -> (InputState, Option<String>) {
    match state {
        InputState::Editing { text, .. } => (
            InputState::Inactive { text: text.clone() },
            Some(text),
        ),
        other => (other, None),
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
