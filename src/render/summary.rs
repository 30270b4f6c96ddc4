//! Summary of a loaded sheet.

use crate::model::{ColumnLabel, Frame};
use serde::Serialize;

use super::options::InspectOptions;

/// What an inspection reports about a sheet: its shape, labels and the
/// leading rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Sheet name, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,

    /// Data rows in the whole sheet (header excluded)
    pub rows: usize,

    /// Columns in the whole sheet
    pub columns: usize,

    /// Column labels in sheet order
    pub labels: Vec<ColumnLabel>,

    /// Requested preview length
    pub head_rows: usize,

    /// The first `head_rows` rows
    pub preview: Frame,
}

impl Summary {
    /// Summarize `frame` with the preview length from `options`.
    pub fn from_frame(frame: &Frame, options: &InspectOptions) -> Self {
        let (rows, columns) = frame.shape();
        Self {
            sheet: None,
            rows,
            columns,
            labels: frame.columns().to_vec(),
            head_rows: options.head_rows,
            preview: frame.head(options.head_rows),
        }
    }

    /// Attach the sheet name.
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet = Some(name.into());
        self
    }

    /// `(rows, columns)` of the whole sheet.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }
}
