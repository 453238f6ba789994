//! Card and chrome styling.
//!
//! All colors go through [`CardStyles`] so `--no-color` and `NO_COLOR` strip
//! them in one place.

use ratatui::style::{Color, Modifier, Style};

/// Secondary text: captions, hints, separators.
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Category headers in the help overlay.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Priority: `--no-color` flag, then `NO_COLOR` (any value), then enabled.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Colors on.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colors off.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Whether styles may use colors.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== CardStyles =====

/// Styles for the search screen.
///
/// With colors disabled, emphasis survives as modifiers only (bold, reversed),
/// so the selection stays visible on monochrome terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyles {
    /// Screen title and result count.
    pub heading: Style,
    /// User login or repository name.
    pub title: Style,
    /// URLs.
    pub link: Style,
    /// Captions and hints.
    pub muted: Style,
    /// Star and fork counts.
    pub stars: Style,
    /// Language badges.
    pub badge: Style,
    /// Error lines and notices.
    pub error: Style,
    /// Selected card.
    pub selected: Style,
    /// Selected search type.
    pub active_tab: Style,
    /// Unselected search type.
    pub inactive_tab: Style,
    /// Input border while editing.
    pub focused_border: Style,
    /// Input border while not editing.
    pub unfocused_border: Style,
}

impl CardStyles {
    /// Styles for the given color setting.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                heading: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                link: Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
                muted: MUTED_TEXT,
                stars: Style::default().fg(Color::Yellow),
                badge: Style::default().fg(Color::Black).bg(Color::Gray),
                error: Style::default().fg(Color::Red),
                selected: Style::default().bg(Color::Rgb(40, 44, 52)),
                active_tab: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                inactive_tab: Style::default().fg(Color::Gray),
                focused_border: Style::default().fg(Color::Cyan),
                unfocused_border: Style::default().fg(Color::DarkGray),
            }
        } else {
            let plain = Style::default();
            Self {
                heading: plain.add_modifier(Modifier::BOLD),
                title: plain.add_modifier(Modifier::BOLD),
                link: plain.add_modifier(Modifier::UNDERLINED),
                muted: plain,
                stars: plain,
                badge: plain.add_modifier(Modifier::REVERSED),
                error: plain.add_modifier(Modifier::BOLD),
                selected: plain.add_modifier(Modifier::REVERSED),
                active_tab: plain.add_modifier(Modifier::REVERSED | Modifier::BOLD),
                inactive_tab: plain,
                focused_border: plain.add_modifier(Modifier::BOLD),
                unfocused_border: plain,
            }
        }
    }
}

impl Default for CardStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
