//! Commit step: writes the agenda grid and the detail modal into the
//! frame, and records pointer hit regions for the event loop.
//!
//! Everything here is presentation only. Row grouping, width allocation,
//! and modal navigation live in `grid`, `weights`, and `modal`; this
//! module resolves their output to terminal cells.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, DrawParts};

use super::card::{truncate, wrap_text, SessionCard};
use super::grid::{self, VisualRowKind};
use super::theme::Theme;

/// Lines taken by a section header (leading blank, title, rule).
pub const SECTION_HEADER_HEIGHT: u16 = 3;

/// What a pointer press at some screen position activates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A clickable card (position in the clickable-items index).
    Card(usize),
    ModalBackdrop,
    ModalPanel,
    ModalClose,
    ModalPrev,
    ModalNext,
}

/// Hit regions recorded during the last draw, in paint order.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, target: HitTarget) {
        self.regions.push((area, target));
    }

    /// Resolve a press position. Regions painted later sit on top, so the
    /// lookup runs in reverse paint order: modal controls before the
    /// panel, the panel before the backdrop, the backdrop before cards.
    pub fn resolve(&self, x: u16, y: u16) -> Option<HitTarget> {
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| point_in_rect(x, y, *area))
            .map(|&(_, target)| target)
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

/// Main draw function
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        // Nothing to mount into; bail out rather than panic.
        tracing::warn!("Refusing to render into an empty frame");
        return;
    }

    let mut parts = app.draw_parts();
    parts.hits.clear();

    let bg = Block::default().style(Style::default().bg(parts.theme.background));
    f.render_widget(bg, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(1),    // Agenda grid
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, &parts, chunks[0]);
    draw_grid(f, &mut parts, chunks[1]);
    draw_status_bar(f, &parts, chunks[2]);

    if parts.modal.is_open() {
        draw_modal(f, &mut parts, area);
    }
}

/// Draw the top bar with agenda totals
fn draw_title_bar(f: &mut Frame, parts: &DrawParts, area: Rect) {
    let theme = parts.theme;
    let sessions: usize = parts.agenda.sections.iter().map(|s| s.items.len()).sum();
    let text = format!(
        " {} sessions across {} sections",
        sessions,
        parts.agenda.sections.len()
    );

    let bar = Paragraph::new(text)
        .style(Style::default().fg(theme.dimmed).bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(" agenda ")
                .style(Style::default().bg(theme.background)),
        );
    f.render_widget(bar, area);
}

/// Draw the scrollable section grid
fn draw_grid(f: &mut Frame, parts: &mut DrawParts, area: Rect) {
    let theme = parts.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.background));
    f.render_widget(block, area);

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    *parts.viewport = inner.height;
    let max = grid::max_scroll(parts.rows, inner.height);
    // Pull a stale offset back into range after a resize. Never while the
    // modal holds the scroll lock; the saved offset is restored verbatim
    // on close.
    if !parts.chrome.is_scroll_locked() && parts.chrome.scroll() > max {
        parts.chrome.set_scroll(max, max);
    }

    let card_config = parts.config.card_display_config();
    let mut y = inner.y;

    for row in parts.rows.iter().skip(parts.chrome.scroll()) {
        // Skip rows that don't fully fit below the fold.
        if y + row.height > inner.y + inner.height {
            break;
        }

        match &row.kind {
            VisualRowKind::Header(section) => {
                draw_section_header(f, parts, *section, inner, y);
            }
            VisualRowKind::Cards(cards) => {
                let mut x = inner.x;
                let mut remaining = inner.width;
                let count = cards.blocks.len();
                for (i, slot) in cards.blocks.iter().enumerate() {
                    // The last block absorbs the leftover columns, the
                    // cell-level analogue of the percent calculator's
                    // last-block rule.
                    let width = if i + 1 == count {
                        remaining
                    } else {
                        slot.width.cells(inner.width).min(remaining)
                    };
                    if width == 0 {
                        continue;
                    }
                    let card_area = Rect {
                        x,
                        y,
                        width,
                        height: row.height,
                    };
                    let item = parts.agenda.item(slot.key);
                    let selected = slot.clickable == Some(parts.selected);
                    let card = SessionCard::new(item, theme)
                        .selected(selected)
                        .config(card_config);
                    f.render_widget(card, card_area);

                    if let Some(index) = slot.clickable {
                        parts.hits.push(card_area, HitTarget::Card(index));
                    }
                    x += width;
                    remaining = remaining.saturating_sub(width);
                }
            }
        }
        y += row.height;
    }
}

/// Section header: title on the left, time range on the right, rule below
fn draw_section_header(f: &mut Frame, parts: &DrawParts, section: usize, inner: Rect, y: u16) {
    let theme = parts.theme;
    let sec = &parts.agenda.sections[section];
    let line_area = Rect {
        x: inner.x,
        y: y + 1,
        width: inner.width,
        height: 1,
    };

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {}", sec.title.to_uppercase()),
        Style::default()
            .fg(theme.foreground)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, line_area);

    if !sec.time_range.is_empty() {
        let range = Paragraph::new(Line::from(Span::styled(
            format!("{} ", sec.time_range),
            Style::default().fg(theme.dimmed).bg(theme.background),
        )))
        .alignment(Alignment::Right);
        f.render_widget(range, line_area);
    }

    let rule = Paragraph::new(Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        Style::default().fg(theme.border).bg(theme.background),
    )));
    f.render_widget(
        rule,
        Rect {
            x: inner.x,
            y: y + 2,
            width: inner.width,
            height: 1,
        },
    );
}

/// Draw the status bar
fn draw_status_bar(f: &mut Frame, parts: &DrawParts, area: Rect) {
    let theme = parts.theme;
    let total = parts.agenda.clickable_items().len();

    let status = if parts.modal.is_open() {
        format!(
            " {}/{} | ←→/hl: prev/next | drag: swipe | ↑↓/jk: scroll | Esc: close",
            parts.modal.current_index() + 1,
            parts.modal.items().len()
        )
    } else if total == 0 {
        " no sessions with speakers | wheel: scroll | q: quit".to_string()
    } else {
        format!(
            " {}/{} | ↑↓/jk: select | Tab: next | Enter: details | q: quit",
            parts.selected + 1,
            total
        )
    };

    let status_bar =
        Paragraph::new(status).style(Style::default().fg(theme.dimmed).bg(theme.background));
    f.render_widget(status_bar, area);
}

/// Centered modal panel within the frame
fn modal_panel_area(area: Rect) -> Rect {
    let width = (u32::from(area.width) * 80 / 100).min(96) as u16;
    let height = (u32::from(area.height) * 85 / 100).min(30) as u16;
    let width = width.max(area.width.min(20));
    let height = height.max(area.height.min(8));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Draw the session detail modal over the grid
fn draw_modal(f: &mut Frame, parts: &mut DrawParts, area: Rect) {
    let theme = parts.theme;
    let Some(key) = parts.modal.current_item() else {
        return;
    };
    let item = parts.agenda.item(key);

    // Backdrop dims the whole page; a press on it (and only it) closes.
    f.render_widget(Clear, area);
    let backdrop = Block::default().style(Style::default().bg(theme.backdrop));
    f.render_widget(backdrop, area);
    parts.hits.push(area, HitTarget::ModalBackdrop);

    let panel = modal_panel_area(area);
    f.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.background));
    f.render_widget(block, panel);
    parts.hits.push(panel, HitTarget::ModalPanel);

    // Close control on the top border.
    if panel.width > 8 {
        let close_area = Rect {
            x: panel.x + panel.width - 6,
            y: panel.y,
            width: 5,
            height: 1,
        };
        let close = Paragraph::new(Line::from(Span::styled(
            "[ ✕ ]",
            Style::default().fg(theme.dimmed).bg(theme.background),
        )));
        f.render_widget(close, close_area);
        parts.hits.push(close_area, HitTarget::ModalClose);
    }

    let inner = Rect {
        x: panel.x + 2,
        y: panel.y + 1,
        width: panel.width.saturating_sub(4),
        height: panel.height.saturating_sub(2),
    };
    if inner.width == 0 || inner.height < 6 {
        return;
    }
    let width = inner.width as usize;

    // Fixed header: meta line, wrapped title, time range.
    let mut y = inner.y;
    let mut meta = vec![Span::styled(
        item.time.clone(),
        Style::default().fg(theme.foreground).bg(theme.background),
    )];
    if let Some(ref category) = item.category {
        if !category.is_empty() {
            meta.push(Span::styled(
                " / ",
                Style::default().fg(theme.dimmed_alt).bg(theme.background),
            ));
            meta.push(Span::styled(
                category.clone(),
                Style::default().fg(theme.accent).bg(theme.background),
            ));
        }
    }
    f.render_widget(
        Paragraph::new(Line::from(meta)),
        Rect { x: inner.x, y, width: inner.width, height: 1 },
    );
    y += 1;

    let title_style = Style::default()
        .fg(theme.accent)
        .bg(theme.background)
        .add_modifier(Modifier::BOLD);
    for line in wrap_text(&item.title, width, 2) {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(line, title_style))),
            Rect { x: inner.x, y, width: inner.width, height: 1 },
        );
        y += 1;
    }

    if let Some(range) = parts.modal.time_range(parts.agenda) {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                range,
                Style::default().fg(theme.dimmed).bg(theme.background),
            ))),
            Rect { x: inner.x, y, width: inner.width, height: 1 },
        );
        y += 1;
    }
    y += 1; // spacer

    // Scrollable body: speakers, then the description.
    let footer_height = 3u16;
    let body_bottom = inner.y + inner.height - footer_height;
    let body_area = Rect {
        x: inner.x,
        y,
        width: inner.width,
        height: body_bottom.saturating_sub(y),
    };

    let body_lines = modal_body_lines(item, theme, width);
    let max_scroll = (body_lines.len() as u16).saturating_sub(body_area.height);
    parts.modal.clamp_body_scroll(max_scroll);

    let body = Paragraph::new(body_lines).scroll((parts.modal.body_scroll(), 0));
    f.render_widget(body, body_area);

    draw_modal_footer(f, parts, panel);
}

/// Body content for the open item: speaker details then description.
fn modal_body_lines<'a>(
    item: &'a crate::agenda::SessionItem,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    for speaker in &item.speakers {
        let mut name = vec![Span::styled(
            speaker.name.to_uppercase(),
            Style::default()
                .fg(theme.foreground)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        )];
        if speaker.is_tsc_member {
            name.push(Span::styled(" ", Style::default().bg(theme.background)));
            name.push(Span::styled(
                " TSC ",
                Style::default().fg(theme.badge_fg).bg(theme.badge_bg),
            ));
        }
        if speaker.is_oai_member {
            name.push(Span::styled(" ", Style::default().bg(theme.background)));
            name.push(Span::styled(
                " OAI ",
                Style::default().fg(theme.badge_fg).bg(theme.badge_bg),
            ));
        }
        lines.push(Line::from(name));

        if let Some(byline) = speaker.byline() {
            lines.push(Line::from(Span::styled(
                truncate(&byline.to_uppercase(), width),
                Style::default().fg(theme.dimmed).bg(theme.background),
            )));
        }
        if let Some(ref linkedin) = speaker.linkedin {
            lines.push(Line::from(Span::styled(
                truncate(linkedin, width),
                Style::default().fg(theme.dimmed_alt).bg(theme.background),
            )));
        }
        if let Some(ref slides) = speaker.slides_url {
            lines.push(Line::from(vec![
                Span::styled(
                    "slides: ",
                    Style::default().fg(theme.dimmed_alt).bg(theme.background),
                ),
                Span::styled(
                    truncate(slides, width.saturating_sub(8)),
                    Style::default().fg(theme.accent).bg(theme.background),
                ),
            ]));
        }
        lines.push(Line::default());
    }

    if let Some(ref description) = item.description {
        for line in wrap_text(description, width, usize::MAX) {
            lines.push(Line::from(Span::styled(
                line,
                Style::default().fg(theme.foreground).bg(theme.background),
            )));
        }
    }

    lines
}

/// Prev/next footer; unavailable directions render disabled.
fn draw_modal_footer(f: &mut Frame, parts: &mut DrawParts, panel: Rect) {
    let theme = parts.theme;
    let footer_y = panel.y + panel.height - 3;

    let rule = Paragraph::new(Line::from(Span::styled(
        "─".repeat(panel.width.saturating_sub(2) as usize),
        Style::default().fg(theme.border).bg(theme.background),
    )));
    f.render_widget(
        rule,
        Rect { x: panel.x + 1, y: footer_y, width: panel.width.saturating_sub(2), height: 1 },
    );

    let half = panel.width.saturating_sub(2) / 2;
    let prev_area = Rect { x: panel.x + 1, y: footer_y + 1, width: half, height: 1 };
    let next_area = Rect {
        x: panel.x + 1 + half,
        y: footer_y + 1,
        width: panel.width.saturating_sub(2).saturating_sub(half),
        height: 1,
    };

    let enabled = Style::default().fg(theme.foreground).bg(theme.background);
    let disabled = Style::default().fg(theme.disabled).bg(theme.background);

    let prev_style = if parts.modal.has_prev() { enabled } else { disabled };
    let next_style = if parts.modal.has_next() { enabled } else { disabled };

    f.render_widget(
        Paragraph::new(Line::from(Span::styled("← PREVIOUS", prev_style)))
            .alignment(Alignment::Center),
        prev_area,
    );
    f.render_widget(
        Paragraph::new(Line::from(Span::styled("NEXT →", next_style)))
            .alignment(Alignment::Center),
        next_area,
    );

    parts.hits.push(prev_area, HitTarget::ModalPrev);
    parts.hits.push(next_area, HitTarget::ModalNext);
}
