//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw.rs` - Commit step: buffer writes and pointer hit regions
//! - `theme.rs` - Color themes and presets
//! - `weights.rs` - Row width allocation
//! - `grid.rs` - Section/row layout tree
//! - `card.rs` - Session card widget
//! - `modal.rs` - Detail modal state machine

mod draw;
pub mod card;
pub mod grid;
pub mod modal;
pub mod theme;
pub mod weights;

use crate::agenda::Agenda;
use crate::config::Config;

// Re-export main draw function
pub use draw::{draw, HitMap, HitTarget, SECTION_HEADER_HEIGHT};

// Re-export commonly used types
pub use card::{CardDisplayConfig, SessionCard};
pub use modal::{ItemModal, ModalTarget};
pub use theme::Theme;

/// Flattened visual rows for an agenda under the current display config.
pub fn build_rows(agenda: &Agenda, config: &Config) -> Vec<grid::VisualRow> {
    grid::flatten_rows(
        grid::build_layout(agenda),
        SECTION_HEADER_HEIGHT,
        config.card_display_config().card_height(),
    )
}
