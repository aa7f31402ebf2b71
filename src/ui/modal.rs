//! Session detail modal.
//!
//! A single modal navigates a flat, ordered snapshot of the clickable
//! items (taken at open time). It owns all interaction while open: prev /
//! next traversal with clamping at the ends, Esc / close-control / exact
//! backdrop-press dismissal, and horizontal drag gestures. Opening locks
//! the page scroll through [`PageChrome`]; closing releases the lock and
//! restores the pre-open offset on every exit path.

use crossterm::event::KeyCode;

use crate::agenda::{Agenda, ItemKey};
use crate::page::PageChrome;

/// Minimum horizontal travel (in cells) for a drag to count as a swipe.
pub const SWIPE_THRESHOLD: u16 = 50;

/// Direction of a recognized horizontal drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDir {
    /// Contents dragged leftwards; advance to the next item.
    Left,
    /// Contents dragged rightwards; go back to the previous item.
    Right,
}

/// Recognizes horizontal drag gestures from press/release coordinates.
///
/// A drag counts when its horizontal travel exceeds the threshold and
/// dominates the vertical travel; anything else is treated as scrolling
/// and ignored.
#[derive(Debug)]
pub struct SwipeTracker {
    threshold: i32,
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold: i32::from(threshold),
            start: None,
        }
    }

    pub fn begin(&mut self, x: u16, y: u16) {
        self.start = Some((x, y));
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Finish the gesture and classify it. Returns `None` for
    /// sub-threshold or vertical-dominant drags.
    pub fn finish(&mut self, x: u16, y: u16) -> Option<SwipeDir> {
        let (start_x, start_y) = self.start.take()?;
        let diff_x = i32::from(start_x) - i32::from(x);
        let diff_y = i32::from(start_y) - i32::from(y);

        if diff_x.abs() > self.threshold && diff_x.abs() > diff_y.abs() {
            if diff_x > 0 {
                Some(SwipeDir::Left)
            } else {
                Some(SwipeDir::Right)
            }
        } else {
            None
        }
    }
}

/// Pointer target within the open modal, resolved from hit regions by the
/// event loop. `Backdrop` is only the dimmed area itself; presses on the
/// panel or its contents resolve to the other variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    Backdrop,
    Panel,
    Close,
    Prev,
    Next,
}

/// Modal state machine: `Closed` or `Open` over an item snapshot.
#[derive(Debug)]
pub struct ItemModal {
    open: bool,
    current: usize,
    items: Vec<ItemKey>,
    body_scroll: u16,
    swipe: SwipeTracker,
}

impl ItemModal {
    pub fn new(swipe_threshold: u16) -> Self {
        Self {
            open: false,
            current: 0,
            items: Vec::new(),
            body_scroll: 0,
            swipe: SwipeTracker::new(swipe_threshold),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_item(&self) -> Option<ItemKey> {
        if self.open {
            self.items.get(self.current).copied()
        } else {
            None
        }
    }

    pub fn items(&self) -> &[ItemKey] {
        &self.items
    }

    pub fn has_prev(&self) -> bool {
        self.open && self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.open && self.current + 1 < self.items.len()
    }

    /// Open the modal at `index` into `items`. The index is clamped into
    /// range and the displayed item derived from the snapshot, so caller
    /// mistakes cannot desynchronize the two. Opening while already open
    /// replaces the snapshot and index in place; the scroll offset saved
    /// by the first open is what close restores.
    pub fn open(&mut self, index: usize, items: Vec<ItemKey>, chrome: &mut PageChrome) {
        if items.is_empty() {
            tracing::warn!("Ignoring modal open with empty item list");
            return;
        }
        self.current = index.min(items.len() - 1);
        self.items = items;
        self.body_scroll = 0;
        self.swipe.cancel();
        self.open = true;

        chrome.lock_scroll();
        chrome.focus_modal();
    }

    /// Close the modal, releasing the scroll lock (restoring the pre-open
    /// offset) and returning focus to the grid.
    pub fn close(&mut self, chrome: &mut PageChrome) {
        if !self.open {
            return;
        }
        self.open = false;
        self.items.clear();
        self.current = 0;
        self.body_scroll = 0;
        self.swipe.cancel();

        chrome.unlock_scroll();
        chrome.focus_grid();
    }

    /// Step to the previous item; no-op at the start of the list.
    pub fn prev(&mut self) {
        if self.has_prev() {
            self.current -= 1;
            self.body_scroll = 0;
        }
    }

    /// Step to the next item; no-op at the end of the list.
    pub fn next(&mut self) {
        if self.has_next() {
            self.current += 1;
            self.body_scroll = 0;
        }
    }

    /// Handle a key press while open. Returns true when consumed.
    pub fn handle_key(&mut self, code: KeyCode, chrome: &mut PageChrome) -> bool {
        if !self.open {
            return false;
        }
        match code {
            KeyCode::Esc => {
                self.close(chrome);
                true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.prev();
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.next();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_body(-1);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_body(1);
                true
            }
            _ => false,
        }
    }

    /// Handle a pointer press on a resolved modal target.
    pub fn press(&mut self, target: ModalTarget, x: u16, y: u16, chrome: &mut PageChrome) {
        if !self.open {
            return;
        }
        match target {
            // Only the backdrop itself closes; presses on the panel and
            // its descendants arrive as the other targets.
            ModalTarget::Backdrop => self.close(chrome),
            ModalTarget::Close => self.close(chrome),
            ModalTarget::Prev => {
                self.prev();
                self.swipe.begin(x, y);
            }
            ModalTarget::Next => {
                self.next();
                self.swipe.begin(x, y);
            }
            ModalTarget::Panel => self.swipe.begin(x, y),
        }
    }

    /// Handle a pointer release; completes a drag gesture if one is in
    /// flight.
    pub fn release(&mut self, x: u16, y: u16) {
        if !self.open {
            self.swipe.cancel();
            return;
        }
        match self.swipe.finish(x, y) {
            Some(SwipeDir::Left) => self.next(),
            Some(SwipeDir::Right) => self.prev(),
            None => {}
        }
    }

    /// Scroll the description body; item changes reset this to 0.
    pub fn scroll_body(&mut self, delta: i16) {
        self.body_scroll = self.body_scroll.saturating_add_signed(delta);
    }

    pub fn body_scroll(&self) -> u16 {
        self.body_scroll
    }

    /// Pull an out-of-range body scroll back to the rendered maximum.
    /// Called by the commit step, which is the only place that knows the
    /// content height.
    pub fn clamp_body_scroll(&mut self, max: u16) {
        self.body_scroll = self.body_scroll.min(max);
    }

    /// Display time range of the current item: its start time joined with
    /// the next clickable item's start time when there is one.
    pub fn time_range(&self, agenda: &Agenda) -> Option<String> {
        let key = self.current_item()?;
        let time = &agenda.item(key).time;
        if self.has_next() {
            let next = &agenda.item(self.items[self.current + 1]).time;
            Some(format!("{} — {}", time, next))
        } else {
            Some(time.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: usize) -> Vec<ItemKey> {
        (0..n).map(|item| ItemKey { section: 0, item }).collect()
    }

    fn open_modal(n: usize, at: usize) -> (ItemModal, PageChrome) {
        let mut modal = ItemModal::new(SWIPE_THRESHOLD);
        let mut chrome = PageChrome::new();
        modal.open(at, keys(n), &mut chrome);
        (modal, chrome)
    }

    #[test]
    fn test_next_clamps_at_end() {
        let (mut modal, _chrome) = open_modal(5, 2);
        modal.next();
        modal.next();
        assert_eq!(modal.current_index(), 4);
        modal.next();
        assert_eq!(modal.current_index(), 4);
        assert!(!modal.has_next());
        assert!(modal.is_open());
    }

    #[test]
    fn test_prev_clamps_at_start() {
        let (mut modal, _chrome) = open_modal(5, 2);
        modal.prev();
        modal.prev();
        modal.prev();
        assert_eq!(modal.current_index(), 0);
        modal.prev();
        assert_eq!(modal.current_index(), 0);
        assert!(!modal.has_prev());
    }

    #[test]
    fn test_open_clamps_index() {
        let (modal, _chrome) = open_modal(3, 99);
        assert_eq!(modal.current_index(), 2);
        assert_eq!(modal.current_item(), Some(ItemKey { section: 0, item: 2 }));
    }

    #[test]
    fn test_open_with_empty_list_stays_closed() {
        let mut modal = ItemModal::new(SWIPE_THRESHOLD);
        let mut chrome = PageChrome::new();
        modal.open(0, Vec::new(), &mut chrome);
        assert!(!modal.is_open());
        assert!(!chrome.is_scroll_locked());
    }

    #[test]
    fn test_close_restores_scroll_offset() {
        let mut modal = ItemModal::new(SWIPE_THRESHOLD);
        let mut chrome = PageChrome::new();
        chrome.scroll_by(7, 20);

        modal.open(1, keys(5), &mut chrome);
        assert!(chrome.is_scroll_locked());
        assert_eq!(chrome.focus(), crate::page::Focus::Modal);

        // Navigation in between must not disturb the saved offset.
        modal.next();
        modal.next();
        modal.prev();
        modal.close(&mut chrome);

        assert_eq!(chrome.scroll(), 7);
        assert!(!chrome.is_scroll_locked());
        assert_eq!(chrome.focus(), crate::page::Focus::Grid);
        assert!(modal.current_item().is_none());
        assert!(modal.items().is_empty());
    }

    #[test]
    fn test_reopen_in_place_keeps_first_saved_offset() {
        let mut modal = ItemModal::new(SWIPE_THRESHOLD);
        let mut chrome = PageChrome::new();
        chrome.scroll_by(3, 20);

        modal.open(0, keys(5), &mut chrome);
        // A second open while open replaces state without stacking.
        modal.open(4, keys(2), &mut chrome);
        assert!(modal.is_open());
        assert_eq!(modal.current_index(), 1); // clamped into the new snapshot
        assert_eq!(modal.items().len(), 2);

        modal.close(&mut chrome);
        assert_eq!(chrome.scroll(), 3);
    }

    #[test]
    fn test_swipe_left_advances() {
        let (mut modal, mut chrome) = open_modal(5, 2);
        modal.press(ModalTarget::Panel, 100, 10, &mut chrome);
        modal.release(20, 20); // diff_x = 80, diff_y = -10
        assert_eq!(modal.current_index(), 3);
    }

    #[test]
    fn test_swipe_right_goes_back() {
        let (mut modal, mut chrome) = open_modal(5, 2);
        modal.press(ModalTarget::Panel, 20, 10, &mut chrome);
        modal.release(100, 20); // diff_x = -80
        assert_eq!(modal.current_index(), 1);
    }

    #[test]
    fn test_vertical_drag_ignored() {
        let (mut modal, mut chrome) = open_modal(5, 2);
        modal.press(ModalTarget::Panel, 100, 10, &mut chrome);
        modal.release(20, 130); // diff_x = 80, diff_y = -120: vertical wins
        assert_eq!(modal.current_index(), 2);
    }

    #[test]
    fn test_sub_threshold_drag_ignored() {
        let (mut modal, mut chrome) = open_modal(5, 2);
        modal.press(ModalTarget::Panel, 40, 10, &mut chrome);
        modal.release(10, 10); // diff_x = 30, under the threshold
        assert_eq!(modal.current_index(), 2);
    }

    #[test]
    fn test_swipe_clamps_at_boundary() {
        let (mut modal, mut chrome) = open_modal(3, 2);
        modal.press(ModalTarget::Panel, 100, 10, &mut chrome);
        modal.release(20, 10);
        assert_eq!(modal.current_index(), 2); // already last: no wrap
    }

    #[test]
    fn test_backdrop_press_closes_panel_press_does_not() {
        let (mut modal, mut chrome) = open_modal(3, 1);
        modal.press(ModalTarget::Panel, 5, 5, &mut chrome);
        assert!(modal.is_open());
        modal.release(5, 5);

        modal.press(ModalTarget::Backdrop, 1, 1, &mut chrome);
        assert!(!modal.is_open());
        assert!(!chrome.is_scroll_locked());
    }

    #[test]
    fn test_escape_closes() {
        let (mut modal, mut chrome) = open_modal(3, 1);
        assert!(modal.handle_key(KeyCode::Esc, &mut chrome));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_arrow_keys_navigate() {
        let (mut modal, mut chrome) = open_modal(3, 1);
        assert!(modal.handle_key(KeyCode::Right, &mut chrome));
        assert_eq!(modal.current_index(), 2);
        assert!(modal.handle_key(KeyCode::Left, &mut chrome));
        assert!(modal.handle_key(KeyCode::Char('h'), &mut chrome));
        assert_eq!(modal.current_index(), 0);
    }

    #[test]
    fn test_nav_resets_body_scroll() {
        let (mut modal, _chrome) = open_modal(3, 0);
        modal.scroll_body(5);
        assert_eq!(modal.body_scroll(), 5);
        modal.next();
        assert_eq!(modal.body_scroll(), 0);
    }

    #[test]
    fn test_disabled_controls_reject_activation() {
        let (mut modal, mut chrome) = open_modal(3, 0);
        // At the first item the prev control is disabled.
        modal.press(ModalTarget::Prev, 5, 5, &mut chrome);
        assert_eq!(modal.current_index(), 0);
        assert!(modal.is_open());
        modal.release(5, 5);
        assert_eq!(modal.current_index(), 0);
    }

    #[test]
    fn test_time_range_uses_next_item() {
        use crate::agenda::{Agenda, Section, SessionItem, Speaker};

        let item = |time: &str| SessionItem {
            id: time.to_string(),
            time: time.to_string(),
            title: time.to_string(),
            speakers: vec![Speaker {
                name: "S".to_string(),
                ..Speaker::default()
            }],
            ..SessionItem::default()
        };
        let agenda = Agenda {
            sections: vec![Section {
                items: vec![item("09:15"), item("09:45"), item("10:15")],
                ..Section::default()
            }],
        };

        let mut modal = ItemModal::new(SWIPE_THRESHOLD);
        let mut chrome = PageChrome::new();
        modal.open(0, agenda.clickable_items(), &mut chrome);
        assert_eq!(modal.time_range(&agenda).as_deref(), Some("09:15 — 09:45"));

        modal.next();
        modal.next();
        // Last item has no successor: just its start time.
        assert_eq!(modal.time_range(&agenda).as_deref(), Some("10:15"));
    }
}
