//! Agenda data model.
//!
//! The agenda is supplied as a static JSON document (a file passed on the
//! command line, or the built-in default embedded in the binary). It is
//! parsed once at startup and borrowed read-only everywhere else; nothing
//! in the UI mutates it.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default agenda bundled into the binary.
const DEFAULT_AGENDA: &str = include_str!("../data/agenda.json");

/// Title placeholder for sessions that are not announced yet.
pub const PLACEHOLDER_TITLE: &str = "TBD";

#[derive(Debug, Error)]
pub enum AgendaError {
    #[error("failed to read agenda from {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse agenda: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("agenda contains no sections")]
    Empty,
}

/// A person attached to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Speaker {
    pub name: String,
    pub job: Option<String>,
    pub company: Option<String>,
    /// Avatar image path. Carried through for data completeness; the TUI
    /// has no image rendering and omits it.
    pub avatar: Option<String>,
    pub linkedin: Option<String>,
    pub slides_url: Option<String>,
    pub is_tsc_member: bool,
    pub is_oai_member: bool,
}

impl Default for Speaker {
    fn default() -> Self {
        Self {
            name: String::new(),
            job: None,
            company: None,
            avatar: None,
            linkedin: None,
            slides_url: None,
            is_tsc_member: false,
            is_oai_member: false,
        }
    }
}

impl Speaker {
    /// Job and company joined for display ("Founder / Specmatic").
    pub fn byline(&self) -> Option<String> {
        let parts: Vec<&str> = [self.job.as_deref(), self.company.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" / "))
        }
    }
}

/// One slot on the agenda.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionItem {
    pub id: String,
    pub time: String,
    pub title: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub badge: Option<String>,
    pub icon: Option<String>,
    pub speakers: Vec<Speaker>,
    pub disable_hover: bool,
}

impl Default for SessionItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            time: String::new(),
            title: String::new(),
            category: None,
            description: None,
            badge: None,
            icon: None,
            speakers: Vec::new(),
            disable_hover: false,
        }
    }
}

impl SessionItem {
    /// An item opens the detail modal iff it has at least one speaker.
    pub fn is_clickable(&self) -> bool {
        !self.speakers.is_empty()
    }
}

/// A time-ordered group of sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub time_range: String,
    pub items: Vec<SessionItem>,
}

impl Default for Section {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            time_range: String::new(),
            items: Vec::new(),
        }
    }
}

/// Position of an item within the agenda.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemKey {
    pub section: usize,
    pub item: usize,
}

/// The whole conference agenda: an ordered list of sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agenda {
    pub sections: Vec<Section>,
}

impl Agenda {
    /// Parse an agenda from JSON text.
    pub fn from_json(json: &str) -> Result<Self, AgendaError> {
        let agenda: Agenda = serde_json::from_str(json)?;
        if agenda.sections.is_empty() {
            return Err(AgendaError::Empty);
        }
        Ok(agenda)
    }

    /// Load an agenda from a JSON file.
    pub fn load(path: &Path) -> Result<Self, AgendaError> {
        let content = std::fs::read_to_string(path).map_err(|source| AgendaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let agenda = Self::from_json(&content)?;
        tracing::info!(
            "Loaded agenda with {} sections from {}",
            agenda.sections.len(),
            path.display()
        );
        Ok(agenda)
    }

    /// The agenda embedded in the binary.
    pub fn bundled() -> Result<Self, AgendaError> {
        Self::from_json(DEFAULT_AGENDA)
    }

    pub fn item(&self, key: ItemKey) -> &SessionItem {
        &self.sections[key.section].items[key.item]
    }

    /// Flattened, order-preserving index of every item with speakers.
    ///
    /// This is the navigation domain for the detail modal. The order is
    /// sections first, then items within each section, so prev/next in
    /// the modal follows the visual scan order of the grid. Derived fresh
    /// on each call rather than cached.
    pub fn clickable_items(&self) -> Vec<ItemKey> {
        let mut keys = Vec::new();
        for (section, sec) in self.sections.iter().enumerate() {
            for (item, it) in sec.items.iter().enumerate() {
                if it.is_clickable() {
                    keys.push(ItemKey { section, item });
                }
            }
        }
        keys
    }
}
