//! Session card widget.
//!
//! Renders one agenda item as a fixed-height card:
//! - Time / category line
//! - Title (bold accent, wrapped over a configurable number of lines)
//! - Speakers with membership pills, or the badge text for
//!   speaker-less slots

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::agenda::SessionItem;

use super::theme::Theme;

/// Configuration for card display
#[derive(Debug, Clone, Copy)]
pub struct CardDisplayConfig {
    /// Show the category next to the time
    pub show_category: bool,
    /// Show speaker lines (up to two)
    pub show_speakers: bool,
    /// Lines reserved for the wrapped title
    pub title_lines: u16,
}

impl Default for CardDisplayConfig {
    fn default() -> Self {
        Self {
            show_category: true,
            show_speakers: true,
            title_lines: 2,
        }
    }
}

impl CardDisplayConfig {
    /// Height of a card in lines.
    pub fn card_height(&self) -> u16 {
        let mut height = 1; // Time line always shown
        height += self.title_lines.max(1);
        if self.show_speakers {
            height += 2;
        }
        height + 1 // bottom padding
    }
}

/// Session card widget
pub struct SessionCard<'a> {
    item: &'a SessionItem,
    theme: &'a Theme,
    selected: bool,
    config: CardDisplayConfig,
}

impl<'a> SessionCard<'a> {
    pub fn new(item: &'a SessionItem, theme: &'a Theme) -> Self {
        Self {
            item,
            theme,
            selected: false,
            config: CardDisplayConfig::default(),
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn config(mut self, config: CardDisplayConfig) -> Self {
        self.config = config;
        self
    }
}

impl Widget for SessionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // disable_hover items never take the selection highlight.
        let highlight = self.selected && !self.item.disable_hover;
        let bg = if highlight {
            self.theme.selection_bg
        } else {
            self.theme.background
        };
        let fg = if highlight {
            self.theme.selection_fg
        } else {
            self.theme.foreground
        };

        // Fill background
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(bg);
                }
            }
        }

        let padding_x = 2u16;
        let inner_width = area.width.saturating_sub(padding_x * 2);
        if inner_width == 0 {
            return;
        }
        let inner_x = area.x + padding_x;
        let max_y = area.y + area.height;
        let mut y = area.y;
        let text_width = inner_width as usize;

        // Line 1: time / category
        let mut spans = vec![Span::styled(
            self.item.time.clone(),
            Style::default().fg(self.theme.dimmed).bg(bg),
        )];
        if self.config.show_category {
            if let Some(ref category) = self.item.category {
                if !category.is_empty() {
                    spans.push(Span::styled(
                        " / ",
                        Style::default().fg(self.theme.dimmed_alt).bg(bg),
                    ));
                    spans.push(Span::styled(
                        category.clone(),
                        Style::default().fg(self.theme.accent).bg(bg),
                    ));
                }
            }
        }
        buf.set_line(inner_x, y, &Line::from(spans), inner_width);
        y += 1;

        // Title, wrapped over the configured number of lines
        let title_style = Style::default()
            .fg(self.theme.accent)
            .bg(bg)
            .add_modifier(Modifier::BOLD);
        for line in wrap_text(
            &self.item.title,
            text_width,
            self.config.title_lines.max(1) as usize,
        ) {
            if y >= max_y {
                return;
            }
            buf.set_string(inner_x, y, &line, title_style);
            y += 1;
        }
        y = (area.y + 1 + self.config.title_lines.max(1)).min(max_y);

        // Speakers (first two), or the badge for speaker-less slots
        if self.config.show_speakers && y < max_y {
            if !self.item.speakers.is_empty() {
                for speaker in self.item.speakers.iter().take(2) {
                    if y >= max_y {
                        break;
                    }
                    let mut spans = vec![Span::styled(
                        speaker.name.to_uppercase(),
                        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
                    )];
                    if speaker.is_tsc_member {
                        spans.push(Span::styled(" ", Style::default().bg(bg)));
                        spans.push(Span::styled(
                            " TSC ",
                            Style::default().fg(self.theme.badge_fg).bg(self.theme.badge_bg),
                        ));
                    }
                    if speaker.is_oai_member {
                        spans.push(Span::styled(" ", Style::default().bg(bg)));
                        spans.push(Span::styled(
                            " OAI ",
                            Style::default().fg(self.theme.badge_fg).bg(self.theme.badge_bg),
                        ));
                    }
                    if let Some(ref company) = speaker.company {
                        spans.push(Span::styled(
                            format!(" · {}", company),
                            Style::default().fg(self.theme.dimmed).bg(bg),
                        ));
                    }
                    buf.set_line(inner_x, y, &Line::from(spans), inner_width);
                    y += 1;
                }
            } else if let Some(ref badge) = self.item.badge {
                let style = Style::default().fg(self.theme.dimmed).bg(bg);
                buf.set_string(inner_x, y, truncate(&badge.to_uppercase(), text_width), style);
            }
        }
    }
}

/// Greedy word wrap into at most `max_lines` lines; the last line is
/// truncated with an ellipsis if the text doesn't fit.
pub fn wrap_text(s: &str, max_width: usize, max_lines: usize) -> Vec<String> {
    if max_width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in s.split_whitespace() {
        let candidate_width = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };

        if candidate_width <= max_width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if lines.len() == max_lines {
                break;
            }
            // A single word longer than the line gets hard-truncated.
            current = truncate(word, max_width);
        }
    }
    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
    }

    // Mark overflow on the last visible line.
    let shown: usize = lines.iter().map(|l| l.split_whitespace().count()).sum();
    let total = s.split_whitespace().count();
    if shown < total {
        if let Some(last) = lines.last_mut() {
            *last = truncate(&format!("{}…", last), max_width);
        }
    }

    lines
}

/// Truncate string to fit within max_width, adding ellipsis if needed
pub fn truncate(s: &str, max_width: usize) -> String {
    let width = s.width();
    if width <= max_width {
        s.to_string()
    } else if max_width <= 1 {
        "…".to_string()
    } else {
        let mut result = String::new();
        let mut current_width = 0;

        for c in s.chars() {
            let char_width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if current_width + char_width + 1 > max_width {
                result.push('…');
                break;
            }
            result.push(c);
            current_width += char_width;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("hi", 2), "hi");
        assert_eq!(truncate("hello", 1), "…");
    }

    #[test]
    fn test_card_height() {
        let config = CardDisplayConfig::default();
        assert_eq!(config.card_height(), 6);

        let config = CardDisplayConfig {
            show_category: true,
            show_speakers: false,
            title_lines: 1,
        };
        assert_eq!(config.card_height(), 3);
    }

    #[test]
    fn test_wrap_text_single_line() {
        assert_eq!(wrap_text("short title", 20, 2), vec!["short title"]);
    }

    #[test]
    fn test_wrap_text_two_lines() {
        let lines = wrap_text("What's new in OpenAPI 3.2", 14, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "What's new in");
        assert_eq!(lines[1], "OpenAPI 3.2");
    }

    #[test]
    fn test_wrap_text_overflow_marked() {
        let lines = wrap_text("one two three four five six seven eight", 10, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with('…'));
    }

    #[test]
    fn test_wrap_text_degenerate() {
        assert!(wrap_text("anything", 0, 2).is_empty());
        assert!(wrap_text("anything", 10, 0).is_empty());
    }
}
