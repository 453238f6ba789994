//! Search form widget: type selector and input box.

use crate::model::SearchType;
use crate::state::InputState;
use crate::view::styles::CardStyles;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const PLACEHOLDER: &str = "Search GitHub...";

/// Search form.
///
/// The first line is the type selector (`Repositories | Users`), below it a
/// bordered text input. While editing, the cursor cell is drawn reversed.
pub struct SearchForm<'a> {
    input: &'a InputState,
    search_type: SearchType,
    focused: bool,
    styles: &'a CardStyles,
}

impl<'a> SearchForm<'a> {
    /// Form showing `input` with `search_type` selected.
    pub fn new(
        input: &'a InputState,
        search_type: SearchType,
        focused: bool,
        styles: &'a CardStyles,
    ) -> Self {
        Self {
            input,
            search_type,
            focused,
            styles,
        }
    }

    fn selector_line(&self) -> Line<'static> {
        let tab = |kind: SearchType| {
            let style = if kind == self.search_type {
                self.styles.active_tab
            } else {
                self.styles.inactive_tab
            };
            Span::styled(format!(" {} ", kind.label()), style)
        };

        Line::from(vec![
            tab(SearchType::Repositories),
            Span::raw(" "),
            tab(SearchType::Users),
            Span::styled("   Tab: switch", self.styles.muted),
        ])
    }

    fn input_line(&self) -> Line<'static> {
        match self.input {
            InputState::Editing { text, cursor } => {
                let before: String = text.chars().take(*cursor).collect();
                let mut after = text.chars().skip(*cursor);
                let cursor_char = after.next().map_or(" ".to_string(), |c| c.to_string());
                let rest: String = after.collect();

                Line::from(vec![
                    Span::raw(before),
                    Span::styled(
                        cursor_char,
                        ratatui::style::Style::default().add_modifier(Modifier::REVERSED),
                    ),
                    Span::raw(rest),
                ])
            }
            InputState::Inactive { text } if text.is_empty() => {
                Line::from(Span::styled(PLACEHOLDER, self.styles.muted))
            }
            InputState::Inactive { text } => Line::from(text.clone()),
        }
    }
}

impl Widget for SearchForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        Paragraph::new(self.selector_line()).render(chunks[0], buf);

        let border_style = if self.focused {
            self.styles.focused_border
        } else {
            self.styles.unfocused_border
        };
        let title = if self.focused {
            " Search (Enter: submit, Esc: cancel) "
        } else {
            " Search (/ to edit) "
        };
        Paragraph::new(self.input_line())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            )
            .render(chunks[1], buf);
    }
}
