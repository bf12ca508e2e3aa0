//! Accordion-style disclosure panels
//!
//! At most one panel is open. Opening a panel closes every sibling and resets
//! its arrow, then starts a short fade-and-slide entrance that finishes on
//! the first tick after [`ENTRANCE_DELAY`].

use crate::error::{ViewError, ViewResult};
use std::time::{Duration, Instant};

/// Delay before an opened panel takes its final opacity and position
pub const ENTRANCE_DELAY: Duration = Duration::from_millis(10);

/// Vertical offset (in rows) a panel starts from when opened
pub const ENTRANCE_OFFSET: i16 = -1;

/// A link inside a dropdown panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownEntry {
    pub label: String,
    pub table_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dropdown {
    pub id: String,
    pub label: String,
    pub entries: Vec<DropdownEntry>,
    pub open: bool,
    pub arrow_rotated: bool,
    pub opacity: f32,
    pub offset: i16,
}

impl Dropdown {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            entries: Vec::new(),
            open: false,
            arrow_rotated: false,
            opacity: 1.0,
            offset: 0,
        }
    }

    pub fn entry(mut self, label: impl Into<String>, table_id: impl Into<String>) -> Self {
        self.entries.push(DropdownEntry {
            label: label.into(),
            table_id: table_id.into(),
        });
        self
    }

    /// Whether the entrance transition is still pending
    pub fn is_entering(&self) -> bool {
        self.opacity < 1.0 || self.offset != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingEntrance {
    id: String,
    due: Instant,
}

/// The set of sibling dropdowns
#[derive(Debug, Clone, Default)]
pub struct DropdownGroup {
    panels: Vec<Dropdown>,
    pending: Vec<PendingEntrance>,
}

impl DropdownGroup {
    pub fn new(panels: Vec<Dropdown>) -> Self {
        Self {
            panels,
            pending: Vec::new(),
        }
    }

    pub fn panels(&self) -> &[Dropdown] {
        &self.panels
    }

    pub fn get(&self, id: &str) -> Option<&Dropdown> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn open_panel(&self) -> Option<&Dropdown> {
        self.panels.iter().find(|p| p.open)
    }

    /// Flip one panel, closing all others first
    ///
    /// Returns whether the panel is open afterwards.
    pub fn toggle(&mut self, id: &str, now: Instant) -> ViewResult<bool> {
        let index = self
            .panels
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ViewError::UnknownDropdown(id.to_string()))?;

        for (i, panel) in self.panels.iter_mut().enumerate() {
            if i != index {
                panel.open = false;
                panel.arrow_rotated = false;
            }
        }

        let panel = &mut self.panels[index];
        let opening = !panel.open;
        panel.open = opening;
        panel.arrow_rotated = opening;

        if opening {
            panel.opacity = 0.0;
            panel.offset = ENTRANCE_OFFSET;
            self.pending.push(PendingEntrance {
                id: panel.id.clone(),
                due: now + ENTRANCE_DELAY,
            });
        }
        Ok(opening)
    }

    /// Apply every entrance that has fallen due
    ///
    /// Entrances are never cancelled: a panel closed before its entrance is
    /// due still receives the final opacity and offset.
    pub fn tick(&mut self, now: Instant) {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        for entrance in due {
            if let Some(panel) = self.panels.iter_mut().find(|p| p.id == entrance.id) {
                panel.opacity = 1.0;
                panel.offset = 0;
            }
        }
    }
}
