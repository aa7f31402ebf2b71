//! Page-level scroll and focus state.
//!
//! The grid's scroll offset, the input focus, and the scroll lock the
//! detail modal holds while open. This is the one piece of shared mutable
//! state in the app; it is passed explicitly to whoever needs it so the
//! modal state machine can be tested without a terminal.

/// Where key events are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid,
    Modal,
}

/// Saved scroll offset held while the page is locked.
#[derive(Debug)]
struct ScrollLock {
    saved: usize,
}

/// Scroll/focus singleton for the page behind the modal.
#[derive(Debug)]
pub struct PageChrome {
    /// First visible visual row of the grid.
    scroll: usize,
    focus: Focus,
    lock: Option<ScrollLock>,
}

impl Default for PageChrome {
    fn default() -> Self {
        Self::new()
    }
}

impl PageChrome {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            focus: Focus::Grid,
            lock: None,
        }
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// Set the scroll offset, clamped to `max`. No-op while locked.
    pub fn set_scroll(&mut self, offset: usize, max: usize) {
        if self.lock.is_none() {
            self.scroll = offset.min(max);
        }
    }

    /// Move the scroll offset by `delta` rows, clamped to `0..=max`.
    /// No-op while locked.
    pub fn scroll_by(&mut self, delta: isize, max: usize) {
        if self.lock.is_some() {
            return;
        }
        let target = self.scroll.saturating_add_signed(delta);
        self.scroll = target.min(max);
    }

    /// Acquire the scroll lock, remembering the current offset so it can
    /// be restored on release. Re-locking while locked keeps the offset
    /// saved by the first acquisition.
    pub fn lock_scroll(&mut self) {
        if self.lock.is_none() {
            self.lock = Some(ScrollLock { saved: self.scroll });
        }
    }

    /// Release the scroll lock and restore the saved offset. No-op when
    /// not locked.
    pub fn unlock_scroll(&mut self) {
        if let Some(lock) = self.lock.take() {
            self.scroll = lock.saved;
        }
    }

    pub fn focus_modal(&mut self) {
        self.focus = Focus::Modal;
    }

    pub fn focus_grid(&mut self) {
        self.focus = Focus::Grid;
    }
}
