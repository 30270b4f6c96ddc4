//! Tabular view of a worksheet: a header row of labels over typed rows.

use super::value::{format_datetime, format_time, integral};
use super::{CellValue, Grid};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Strings read as missing values.
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A column label taken from the header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnLabel {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ColumnLabel {
    /// Label for header cell `value` at zero-based position `index`.
    fn from_header(value: &CellValue, index: usize) -> Self {
        match value {
            CellValue::String(s) if !s.is_empty() => ColumnLabel::Text(s.clone()),
            CellValue::Number(n) => match integral(*n) {
                Some(i) => ColumnLabel::Int(i),
                None => ColumnLabel::Float(*n),
            },
            CellValue::Bool(b) => ColumnLabel::Bool(*b),
            CellValue::DateTime(dt) => ColumnLabel::Text(format_datetime(dt)),
            CellValue::Time(t) => ColumnLabel::Text(format_time(t)),
            CellValue::Error(code) => ColumnLabel::Text(code.clone()),
            CellValue::Empty | CellValue::String(_) => unnamed(index),
        }
    }
}

fn unnamed(index: usize) -> ColumnLabel {
    ColumnLabel::Text(format!("Unnamed: {}", index))
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnLabel::Text(s) => f.write_str(s),
            ColumnLabel::Int(i) => write!(f, "{}", i),
            ColumnLabel::Float(n) => write!(f, "{:?}", n),
            ColumnLabel::Bool(true) => f.write_str("True"),
            ColumnLabel::Bool(false) => f.write_str("False"),
        }
    }
}

/// Value type of a whole column, used to pick its display format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Integral numbers, none missing.
    Integer,
    /// Numbers, possibly with missing values.
    Float,
    /// Booleans, none missing.
    Bool,
    /// Dates, possibly with missing values.
    DateTime,
    /// Mixed or textual values, times of day included.
    Object,
    /// Every value missing.
    Empty,
}

impl ColumnKind {
    fn infer<'a>(values: impl Iterator<Item = &'a CellValue>) -> Self {
        let mut present = 0usize;
        let mut missing = false;
        let (mut numbers, mut integers, mut bools, mut dates) = (0, 0, 0, 0);

        for value in values {
            match value {
                CellValue::Empty => {
                    missing = true;
                    continue;
                }
                CellValue::Number(n) => {
                    numbers += 1;
                    if integral(*n).is_some() {
                        integers += 1;
                    }
                }
                CellValue::Bool(_) => bools += 1,
                CellValue::DateTime(_) => dates += 1,
                CellValue::String(_) | CellValue::Time(_) | CellValue::Error(_) => {}
            }
            present += 1;
        }

        if present == 0 {
            ColumnKind::Empty
        } else if numbers == present {
            if integers == present && !missing {
                ColumnKind::Integer
            } else {
                ColumnKind::Float
            }
        } else if bools == present && !missing {
            ColumnKind::Bool
        } else if dates == present {
            ColumnKind::DateTime
        } else {
            ColumnKind::Object
        }
    }
}

/// An in-memory table loaded from a worksheet.
///
/// Every row holds exactly [`Frame::column_count`] values. Labels are unique
/// and kept in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    labels: Vec<ColumnLabel>,
    kinds: Vec<ColumnKind>,
    rows: Vec<Vec<CellValue>>,
}

impl Frame {
    /// Build a frame from raw worksheet cells.
    ///
    /// Rows whose cells are all blank are skipped. The first remaining row
    /// becomes the header; the rest are data rows. Missing-value markers are
    /// turned into [`CellValue::Empty`].
    pub fn from_grid(grid: Grid) -> Self {
        let mut rows = grid
            .into_rows()
            .filter(|row| !row.iter().all(CellValue::is_blank));

        let Some(header) = rows.next() else {
            return Self::default();
        };
        let mut data: Vec<Vec<CellValue>> = rows
            .map(|row| row.into_iter().map(normalize_missing).collect())
            .collect();

        let width = data
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);

        let labels = dedupe_labels(
            (0..width)
                .map(|i| ColumnLabel::from_header(header.get(i).unwrap_or(&CellValue::Empty), i))
                .collect(),
        );

        for row in &mut data {
            row.resize(width, CellValue::Empty);
        }

        debug!("loaded frame: {} rows x {} columns", data.len(), width);
        Self::new(labels, data)
    }

    /// Build a frame from labels and rows, inferring column kinds.
    ///
    /// Rows are padded or truncated to the number of labels.
    pub fn new(labels: Vec<ColumnLabel>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = labels.len();
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        let kinds = (0..width)
            .map(|col| ColumnKind::infer(rows.iter().map(|row| &row[col])))
            .collect();
        Self {
            labels,
            kinds,
            rows,
        }
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.labels.len()
    }

    /// Column labels in sheet order.
    pub fn columns(&self) -> &[ColumnLabel] {
        &self.labels
    }

    /// Kind of column `index`, inferred over all rows.
    pub fn column_kind(&self, index: usize) -> Option<ColumnKind> {
        self.kinds.get(index).copied()
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows (all rows when fewer exist).
    ///
    /// Column kinds are those of the full frame, so a preview formats values
    /// the same way the whole column would.
    pub fn head(&self, n: usize) -> Frame {
        Frame {
            labels: self.labels.clone(),
            kinds: self.kinds.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

fn normalize_missing(value: CellValue) -> CellValue {
    match value {
        CellValue::String(ref s) if NA_MARKERS.contains(&s.as_str()) => CellValue::Empty,
        CellValue::Error(ref code) if code == "#N/A" => CellValue::Empty,
        other => other,
    }
}

/// Make labels unique, left to right: the n-th repeat of `X` becomes `X.n`.
///
/// A generated name that is itself taken gets suffixed again, so
/// `[A, A, A.1]` becomes `[A, A.1, A.1.1]`.
fn dedupe_labels(labels: Vec<ColumnLabel>) -> Vec<ColumnLabel> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(labels.len());

    for label in labels {
        let mut text = label.to_string();
        let mut count = counts.get(&text).copied().unwrap_or(0);
        if count == 0 {
            counts.insert(text, 1);
            result.push(label);
            continue;
        }

        while count > 0 {
            counts.insert(text.clone(), count + 1);
            text = format!("{}.{}", text, count);
            count = counts.get(&text).copied().unwrap_or(0);
        }
        counts.insert(text.clone(), 1);
        result.push(ColumnLabel::Text(text));
    }

    result
}
