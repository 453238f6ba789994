//! Result list: heading, user and repository cards, and footer states.

use crate::model::{forks_caption, Item, Repository, User};
use crate::pagination::{FetchStatus, SearchSnapshot};
use crate::state::DetailState;
use crate::view::styles::CardStyles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Group digits in threes: `1234567` → `"1,234,567"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"<total> Repositories found"` once a page exists.
pub fn result_heading(snapshot: &SearchSnapshot) -> Option<String> {
    snapshot.total_count().map(|total| {
        format!(
            "{} {} found",
            format_count(total),
            snapshot.query.search_type().label()
        )
    })
}

/// `"No repositories results found."` for an empty result set.
pub fn no_results_message(snapshot: &SearchSnapshot) -> String {
    format!("No {} results found.", snapshot.query.search_type().as_path())
}

// ===== Cards =====

fn user_card(user: &User, styles: &CardStyles) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(user.login.clone(), styles.title)),
        Line::from(Span::styled(user.html_url.clone(), styles.link)),
    ]
}

fn repository_card(
    repo: &Repository,
    detail: Option<&DetailState>,
    styles: &CardStyles,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(repo.full_name.clone(), styles.title)),
        Line::from(vec![
            Span::styled(format!("★ {}", repo.stargazers_count), styles.stars),
            Span::raw("   "),
            Span::styled(format!("⑂ {}", repo.forks_count), styles.muted),
        ]),
    ];

    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::from(Span::styled(description.to_string(), styles.muted)));
    }

    let Some(detail) = detail else {
        return lines;
    };

    match detail {
        DetailState::Loading { .. } => {
            lines.push(Line::from(Span::styled("loading details...", styles.muted)));
        }
        DetailState::Failed { message, .. } => {
            lines.push(Line::from(Span::styled(message.clone(), styles.error)));
        }
        DetailState::Loaded { details, .. } => {
            if !details.languages.is_empty() {
                let mut badges = Vec::new();
                for language in &details.languages {
                    badges.push(Span::styled(format!(" {language} "), styles.badge));
                    badges.push(Span::raw(" "));
                }
                lines.push(Line::from(badges));
            }
            if repo.forks_count > 0 {
                lines.push(Line::from(Span::styled(
                    forks_caption(repo.forks_count),
                    styles.muted,
                )));
                for fork in &details.forks {
                    lines.push(Line::from(vec![
                        Span::raw(fork.full_name.clone()),
                        Span::styled(format!("  Forked by {}", fork.owner.login), styles.muted),
                    ]));
                }
            }
        }
        DetailState::None => {}
    }

    lines
}

/// Lines for one card. `detail` is only passed for the selected repository.
pub fn card_lines(
    item: &Item,
    detail: Option<&DetailState>,
    styles: &CardStyles,
) -> Vec<Line<'static>> {
    match item {
        Item::User(user) => user_card(user, styles),
        Item::Repository(repo) => repository_card(repo, detail, styles),
    }
}

// ===== ResultList widget =====

/// Result pane widget.
///
/// Renders, in order of precedence: the idle hint, the initial loader, an
/// error without data, the empty-result message, or the card list followed by
/// the loading/error footer.
pub struct ResultList<'a> {
    snapshot: &'a SearchSnapshot,
    selected: usize,
    detail: &'a DetailState,
    styles: &'a CardStyles,
}

impl<'a> ResultList<'a> {
    /// List for `snapshot` with card `selected` highlighted.
    pub fn new(
        snapshot: &'a SearchSnapshot,
        selected: usize,
        detail: &'a DetailState,
        styles: &'a CardStyles,
    ) -> Self {
        Self {
            snapshot,
            selected,
            detail,
            styles,
        }
    }

    fn error_line(&self) -> Option<Line<'static>> {
        self.snapshot.last_error.as_ref().map(|err| {
            Line::from(vec![
                Span::styled(err.to_string(), self.styles.error),
                Span::styled("  (r: retry)", self.styles.muted),
            ])
        })
    }

    fn message(&self, area: Rect, buf: &mut Buffer, line: Line<'static>) {
        Paragraph::new(line).render(area, buf);
    }

    /// Card lines plus the line range each card occupies.
    fn card_list(&self) -> (Vec<Line<'static>>, Vec<(usize, usize)>) {
        let mut lines = Vec::new();
        let mut ranges = Vec::new();

        for (index, item) in self.snapshot.visible_items().enumerate() {
            let is_selected = index == self.selected;
            let detail = match item {
                Item::Repository(repo) if is_selected && self.detail.repo_id() == Some(repo.id) => {
                    Some(self.detail)
                }
                _ => None,
            };

            let start = lines.len();
            let card_style = if is_selected {
                self.styles.selected
            } else {
                Style::default()
            };
            let marker = if is_selected { "▌ " } else { "  " };
            for line in card_lines(item, detail, self.styles) {
                let mut spans = vec![Span::styled(marker, card_style)];
                spans.extend(line.spans);
                lines.push(Line::from(spans).style(card_style));
            }
            ranges.push((start, lines.len()));
            lines.push(Line::default());
        }

        (lines, ranges)
    }
}

/// First line to show so that the selected card is fully visible.
pub fn scroll_offset(ranges: &[(usize, usize)], selected: usize, viewport: usize) -> usize {
    let Some(&(start, end)) = ranges.get(selected) else {
        return 0;
    };
    end.saturating_sub(viewport).min(start)
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        match self.snapshot.status {
            FetchStatus::Idle => {
                return self.message(
                    area,
                    buf,
                    Line::from(Span::styled(
                        "Search for GitHub users and repositories using the search bar",
                        self.styles.muted,
                    )),
                );
            }
            FetchStatus::Loading => {
                return self.message(
                    area,
                    buf,
                    Line::from(Span::styled("Loading...", self.styles.muted)),
                );
            }
            _ => {}
        }

        if self.snapshot.pages.is_empty() {
            if let Some(line) = self.error_line() {
                self.message(area, buf, line);
            }
            return;
        }

        if self.snapshot.merged_len() == 0 {
            let mut lines = vec![Line::from(Span::styled(
                no_results_message(self.snapshot),
                self.styles.muted,
            ))];
            lines.extend(self.error_line());
            Paragraph::new(lines).render(area, buf);
            return;
        }

        let heading = result_heading(self.snapshot).unwrap_or_default();
        Paragraph::new(Line::from(Span::styled(heading, self.styles.heading)))
            .render(Rect { height: 1, ..area }, buf);

        // Footer is pinned below the list so it stays visible while scrolling.
        let mut footer = Vec::new();
        if self.snapshot.is_validating {
            footer.push(Line::from(Span::styled("loading more...", self.styles.muted)));
        }
        footer.extend(self.error_line());
        let body_height = area.height.saturating_sub(1);
        let footer_height = (footer.len() as u16).min(body_height);
        let list_height = body_height - footer_height;

        let (lines, ranges) = self.card_list();
        let offset = scroll_offset(&ranges, self.selected, list_height as usize);
        Paragraph::new(lines)
            .scroll((offset.min(u16::MAX as usize) as u16, 0))
            .render(
                Rect {
                    y: area.y + 1,
                    height: list_height,
                    ..area
                },
                buf,
            );

        if footer_height > 0 {
            Paragraph::new(footer).render(
                Rect {
                    y: area.y + 1 + list_height,
                    height: footer_height,
                    ..area
                },
                buf,
            );
        }
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
