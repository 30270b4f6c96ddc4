//! Sparse cell storage for one worksheet.

use super::CellValue;
use std::collections::BTreeMap;

/// Raw cells of a worksheet, keyed by zero-based row index.
///
/// Rows are dense up to their last non-empty cell; rows with no cells are
/// not stored at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: BTreeMap<u32, Vec<CellValue>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value at zero-based `(row, col)`. Empty values are ignored.
    pub fn set(&mut self, row: u32, col: u32, value: CellValue) {
        if value.is_empty() {
            return;
        }
        let cells = self.rows.entry(row).or_default();
        let col = col as usize;
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value;
    }

    /// Value at `(row, col)`, if one was stored.
    pub fn get(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.rows
            .get(&row)
            .and_then(|cells| cells.get(col as usize))
            .filter(|v| !v.is_empty())
    }

    /// Stored rows in sheet order.
    pub fn rows(&self) -> impl Iterator<Item = (u32, &[CellValue])> {
        self.rows.iter().map(|(idx, cells)| (*idx, cells.as_slice()))
    }

    /// Number of stored rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest stored row.
    pub fn width(&self) -> usize {
        self.rows.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the grid, yielding rows in sheet order.
    pub fn into_rows(self) -> impl Iterator<Item = Vec<CellValue>> {
        self.rows.into_values()
    }
}

/// Parse an A1-style reference (`"C5"`, `"$AA$10"`) into zero-based
/// `(row, col)`.
pub fn parse_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let reference = reference.trim().replace('$', "");
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);

    let col = column_index(letters)?;
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col))
}

/// Zero-based index of a column name (`"A"` is 0, `"AA"` is 26).
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        index = index * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    Some(index - 1)
}
