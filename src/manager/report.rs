//! Debug dump of the menu stack
//!
//! Renders as one header line followed by one line per stacked menu, top
//! first, e.g.
//!
//! ```text
//! Menu Stack Count: 2
//! options - Active - Hide
//! main - Inactive - Hide
//! ```

use std::fmt;

use crate::menu::{CloseType, MenuId};

/// One stacked menu as seen by the debug overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub id: MenuId,
    pub active: bool,
    pub close_type: CloseType,
}

/// Snapshot of the stack, top first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackReport {
    pub entries: Vec<ReportEntry>,
}

impl StackReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for StackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Menu Stack Count: {}", self.entries.len())?;
        for entry in &self.entries {
            let state = if entry.active { "Active" } else { "Inactive" };
            writeln!(f, "{} - {} - {}", entry.id, state, entry.close_type)?;
        }
        Ok(())
    }
}
