//! Inspection options configuration.

use crate::xlsx::SheetSelector;

/// Number of leading rows shown in a summary.
pub const DEFAULT_HEAD_ROWS: usize = 10;

/// Options controlling what an inspection loads and shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectOptions {
    /// Which sheet to load
    pub sheet: SheetSelector,

    /// How many leading rows to preview
    pub head_rows: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            sheet: SheetSelector::First,
            head_rows: DEFAULT_HEAD_ROWS,
        }
    }
}

impl InspectOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sheet to load.
    pub fn with_sheet(mut self, sheet: SheetSelector) -> Self {
        self.sheet = sheet;
        self
    }

    /// Set the number of preview rows.
    pub fn with_head_rows(mut self, rows: usize) -> Self {
        self.head_rows = rows;
        self
    }
}

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}
