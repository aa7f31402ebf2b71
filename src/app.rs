use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use crate::agenda::{Agenda, ItemKey};
use crate::config::Config;
use crate::page::{Focus, PageChrome};
use crate::ui::grid::{self, VisualRow};
use crate::ui::{build_rows, HitMap, HitTarget, ItemModal, ModalTarget, Theme};

/// Application state
pub struct App {
    /// The agenda being displayed (read-only after startup)
    agenda: Agenda,
    /// Flattened visual rows of the grid
    rows: Vec<VisualRow>,
    /// Selection within the clickable-items index
    selected: usize,
    /// Detail modal
    modal: ItemModal,
    /// Page scroll/focus state
    chrome: PageChrome,
    /// Configuration
    config: Config,
    /// Resolved theme
    theme: Theme,
    /// Pointer hit regions recorded by the last draw
    hits: HitMap,
    /// Grid viewport height from the last draw
    viewport: u16,
}

/// Disjoint borrows of the app state handed to the commit step.
pub struct DrawParts<'a> {
    pub agenda: &'a Agenda,
    pub rows: &'a [VisualRow],
    pub selected: usize,
    pub config: &'a Config,
    pub theme: &'a Theme,
    pub modal: &'a mut ItemModal,
    pub chrome: &'a mut PageChrome,
    pub hits: &'a mut HitMap,
    pub viewport: &'a mut u16,
}

impl App {
    pub fn new(agenda: Agenda, config: Config) -> Self {
        let theme = config.resolve_theme();
        let rows = build_rows(&agenda, &config);
        Self {
            agenda,
            rows,
            selected: 0,
            modal: ItemModal::new(config.behavior.swipe_threshold),
            chrome: PageChrome::new(),
            config,
            theme,
            hits: HitMap::default(),
            viewport: 0,
        }
    }

    /// Input is routed to the modal while it holds the focus.
    pub fn is_modal_open(&self) -> bool {
        self.chrome.focus() == Focus::Modal
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Borrows for the commit step; the borrows are disjoint so the draw
    /// code can read the layout while recording hit regions.
    pub fn draw_parts(&mut self) -> DrawParts<'_> {
        DrawParts {
            agenda: &self.agenda,
            rows: &self.rows,
            selected: self.selected,
            config: &self.config,
            theme: &self.theme,
            modal: &mut self.modal,
            chrome: &mut self.chrome,
            hits: &mut self.hits,
            viewport: &mut self.viewport,
        }
    }

    fn clickable(&self) -> Vec<ItemKey> {
        self.agenda.clickable_items()
    }

    fn clickable_len(&self) -> usize {
        self.clickable().len()
    }

    /// Move selection to the previous clickable card
    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.ensure_selected_visible();
    }

    /// Move selection to the next clickable card
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.clickable_len() {
            self.selected += 1;
        }
        self.ensure_selected_visible();
    }

    /// Tab navigation (next with wrap)
    pub fn select_next_wrap(&mut self) {
        let total = self.clickable_len();
        if total > 0 {
            self.selected = (self.selected + 1) % total;
        }
        self.ensure_selected_visible();
    }

    /// Shift+Tab navigation (previous with wrap)
    pub fn select_prev_wrap(&mut self) {
        let total = self.clickable_len();
        if total > 0 {
            self.selected = if self.selected == 0 {
                total - 1
            } else {
                self.selected - 1
            };
        }
        self.ensure_selected_visible();
    }

    /// Scroll the grid so the selected card's row is in view.
    fn ensure_selected_visible(&mut self) {
        let Some(row) = grid::row_of_clickable(&self.rows, self.selected) else {
            return;
        };
        let max = grid::max_scroll(&self.rows, self.viewport);
        if row < self.chrome.scroll() {
            self.chrome.set_scroll(row, max);
            return;
        }
        // Walk the offset forward until the row fits in the viewport.
        let mut scroll = self.chrome.scroll();
        loop {
            let visible: u16 = self.rows[scroll..=row].iter().map(|r| r.height).sum();
            if visible <= self.viewport || scroll >= row {
                break;
            }
            scroll += 1;
        }
        self.chrome.set_scroll(scroll, max);
    }

    /// Scroll the grid by whole visual rows
    pub fn scroll_page(&mut self, delta: isize) {
        let max = grid::max_scroll(&self.rows, self.viewport);
        self.chrome.scroll_by(delta, max);
    }

    pub fn scroll_home(&mut self) {
        self.chrome.set_scroll(0, 0);
    }

    pub fn scroll_end(&mut self) {
        let max = grid::max_scroll(&self.rows, self.viewport);
        self.chrome.set_scroll(max, max);
    }

    /// Open the modal on the selected card
    pub fn open_selected(&mut self) {
        self.open_modal_at(self.selected);
    }

    fn open_modal_at(&mut self, index: usize) {
        let items = self.clickable();
        if items.is_empty() {
            tracing::debug!("No clickable sessions to open");
            return;
        }
        self.selected = index.min(items.len() - 1);
        self.modal.open(index, items, &mut self.chrome);
    }

    /// Route a key press to the modal. Returns true when consumed.
    pub fn modal_key(&mut self, code: KeyCode) -> bool {
        let handled = self.modal.handle_key(code, &mut self.chrome);
        self.sync_selection_from_modal();
        handled
    }

    /// Keep the grid selection on the item the modal shows, so closing
    /// leaves the highlight where the user navigated to.
    fn sync_selection_from_modal(&mut self) {
        if self.modal.is_open() {
            self.selected = self.modal.current_index();
        }
    }

    /// Handle a mouse event (press, release, wheel)
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                if self.is_modal_open() {
                    self.modal.scroll_body(-1);
                } else {
                    self.scroll_page(-1);
                }
            }
            MouseEventKind::ScrollDown => {
                if self.is_modal_open() {
                    self.modal.scroll_body(1);
                } else {
                    self.scroll_page(1);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_press(mouse.column, mouse.row);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.is_modal_open() {
                    self.modal.release(mouse.column, mouse.row);
                    self.sync_selection_from_modal();
                }
            }
            _ => {}
        }
    }

    fn handle_press(&mut self, x: u16, y: u16) {
        let target = self.hits.resolve(x, y);

        if self.is_modal_open() {
            let target = match target {
                Some(HitTarget::ModalBackdrop) => ModalTarget::Backdrop,
                Some(HitTarget::ModalPanel) => ModalTarget::Panel,
                Some(HitTarget::ModalClose) => ModalTarget::Close,
                Some(HitTarget::ModalPrev) => ModalTarget::Prev,
                Some(HitTarget::ModalNext) => ModalTarget::Next,
                // The backdrop covers the whole frame, so a press can
                // only miss it when the frame shrank under us.
                Some(HitTarget::Card(_)) | None => return,
            };
            self.modal.press(target, x, y, &mut self.chrome);
            self.sync_selection_from_modal();
            return;
        }

        if let Some(HitTarget::Card(index)) = target {
            self.open_modal_at(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::{Section, SessionItem, Speaker};

    fn test_agenda() -> Agenda {
        let item = |id: &str, clickable: bool| SessionItem {
            id: id.to_string(),
            time: "09:00".to_string(),
            title: format!("Session {}", id),
            speakers: if clickable {
                vec![Speaker {
                    name: "S".to_string(),
                    ..Speaker::default()
                }]
            } else {
                Vec::new()
            },
            ..SessionItem::default()
        };
        Agenda {
            sections: vec![
                Section {
                    items: vec![item("a", false), item("b", true), item("c", true)],
                    ..Section::default()
                },
                Section {
                    items: vec![item("d", true)],
                    ..Section::default()
                },
            ],
        }
    }

    fn test_app() -> App {
        let mut app = App::new(test_agenda(), Config::default());
        app.viewport = 40;
        app
    }

    #[test]
    fn test_selection_clamps() {
        let mut app = test_app();
        app.select_prev();
        assert_eq!(app.selected_index(), 0);
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_index(), 2);
    }

    #[test]
    fn test_selection_wraps_with_tab() {
        let mut app = test_app();
        app.select_next_wrap();
        app.select_next_wrap();
        app.select_next_wrap();
        assert_eq!(app.selected_index(), 0);
        app.select_prev_wrap();
        assert_eq!(app.selected_index(), 2);
    }

    #[test]
    fn test_open_selected_snapshots_clickable_items() {
        let mut app = test_app();
        app.select_next();
        app.open_selected();
        assert!(app.is_modal_open());
        let parts = app.draw_parts();
        assert_eq!(parts.modal.items().len(), 3);
        assert_eq!(parts.modal.current_index(), 1);
    }

    #[test]
    fn test_modal_key_navigation_syncs_selection() {
        let mut app = test_app();
        app.open_selected();
        app.modal_key(KeyCode::Right);
        assert_eq!(app.selected_index(), 1);
        app.modal_key(KeyCode::Esc);
        assert!(!app.is_modal_open());
        // Selection stays where the modal navigation left it.
        assert_eq!(app.selected_index(), 1);
    }

    #[test]
    fn test_wheel_ignored_by_grid_while_modal_open() {
        let mut app = test_app();
        app.open_selected();
        let before = {
            let parts = app.draw_parts();
            parts.chrome.scroll()
        };
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        let parts = app.draw_parts();
        assert_eq!(parts.chrome.scroll(), before);
        assert_eq!(parts.modal.body_scroll(), 1);
    }
}
