//! # sheetpeek
//!
//! Quick inspection of Excel workbooks: load the first sheet into a table
//! and report its shape, column labels and leading rows.
//!
//! ## Quick Start
//!
//! ```no_run
//! // Print the report for a workbook
//! sheetpeek::inspect("ipo-data.xlsx")?;
//!
//! // Or work with the loaded table
//! let frame = sheetpeek::read_excel("ipo-data.xlsx")?;
//! println!("Shape: {:?}", frame.shape());
//! for label in frame.columns() {
//!     println!("{}", label);
//! }
//! # Ok::<(), sheetpeek::Error>(())
//! ```
//!
//! ## Options
//!
//! ```no_run
//! use sheetpeek::{summarize, InspectOptions, SheetSelector};
//!
//! let options = InspectOptions::new()
//!     .with_sheet(SheetSelector::Name("Deals".into()))
//!     .with_head_rows(5);
//!
//! let summary = summarize("ipo-data.xlsx", &options)?;
//! print!("{}", sheetpeek::render::to_text(&summary));
//! # Ok::<(), sheetpeek::Error>(())
//! ```
//!
//! ## Features
//!
//! - `async`: Async file loading with Tokio

pub mod container;
pub mod detect;
pub mod error;
pub mod model;
pub mod render;
pub mod xlsx;

// Re-exports
pub use container::{OoxmlPackage, Relationship, Relationships};
pub use detect::{detect_format_from_bytes, detect_format_from_path, FormatType};
pub use error::{Error, ErrorCategory, Result};
pub use model::{CellValue, ColumnKind, ColumnLabel, Frame, Grid};
pub use render::{InspectOptions, JsonFormat, Summary};
pub use xlsx::{SheetSelector, WorkbookReader};

use log::debug;
use std::io::Write;
use std::path::Path;

/// Load the first sheet of a workbook file.
///
/// # Example
///
/// ```no_run
/// let frame = sheetpeek::read_excel("ipo-data.xlsx")?;
/// assert_eq!(frame.columns().len(), frame.column_count());
/// # Ok::<(), sheetpeek::Error>(())
/// ```
pub fn read_excel(path: impl AsRef<Path>) -> Result<Frame> {
    read_excel_with(path, &InspectOptions::default())
}

/// Load the sheet chosen by `options` from a workbook file.
pub fn read_excel_with(path: impl AsRef<Path>, options: &InspectOptions) -> Result<Frame> {
    let data = read_file(path.as_ref())?;
    load(data, options).map(|(_, frame)| frame)
}

/// Load the first sheet of a workbook held in memory.
pub fn read_excel_bytes(data: &[u8]) -> Result<Frame> {
    load(data.to_vec(), &InspectOptions::default()).map(|(_, frame)| frame)
}

/// Load a workbook file and summarize the chosen sheet.
pub fn summarize(path: impl AsRef<Path>, options: &InspectOptions) -> Result<Summary> {
    let data = read_file(path.as_ref())?;
    summarize_data(data, options)
}

/// Summarize a workbook held in memory.
pub fn summarize_bytes(data: &[u8], options: &InspectOptions) -> Result<Summary> {
    summarize_data(data.to_vec(), options)
}

/// Print the inspection report for a workbook to standard output.
///
/// The report is built completely before anything is written, so a file
/// that fails to load produces no output.
///
/// # Example
///
/// ```no_run
/// sheetpeek::inspect("ipo-data.xlsx")?;
/// # Ok::<(), sheetpeek::Error>(())
/// ```
pub fn inspect(path: impl AsRef<Path>) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    inspect_to(path, &mut handle, &InspectOptions::default())
}

/// Write the inspection report for a workbook to `writer`.
pub fn inspect_to<W: Write>(
    path: impl AsRef<Path>,
    writer: &mut W,
    options: &InspectOptions,
) -> Result<()> {
    let summary = summarize(path, options)?;
    let report = render::to_text(&summary);
    writer.write_all(report.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Load the first sheet of a workbook file without blocking the runtime
/// on the file read.
#[cfg(feature = "async")]
pub async fn read_excel_async(path: impl AsRef<Path>) -> Result<Frame> {
    let path = path.as_ref();
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| Error::from_io(e, path))?;
    load(data, &InspectOptions::default()).map(|(_, frame)| frame)
}

/// Async variant of [`summarize`].
#[cfg(feature = "async")]
pub async fn summarize_async(path: impl AsRef<Path>, options: &InspectOptions) -> Result<Summary> {
    let path = path.as_ref();
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| Error::from_io(e, path))?;
    summarize_data(data, options)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    debug!("reading {}", path.display());
    std::fs::read(path).map_err(|e| Error::from_io(e, path))
}

fn summarize_data(data: Vec<u8>, options: &InspectOptions) -> Result<Summary> {
    let (sheet, frame) = load(data, options)?;
    Ok(Summary::from_frame(&frame, options).with_sheet_name(sheet))
}

/// Detect, open and load one sheet. Returns the sheet name with its frame.
fn load(data: Vec<u8>, options: &InspectOptions) -> Result<(String, Frame)> {
    let format = detect_format_from_bytes(&data)?;
    debug!("detected {}", format);

    let reader = WorkbookReader::from_bytes(data)?;
    let index = reader.select(&options.sheet)?;
    let name = reader
        .sheets()
        .get(index)
        .map(|sheet| sheet.name.clone())
        .unwrap_or_default();
    debug!("loading sheet {} '{}'", index, name);

    let grid = reader.read_sheet(index)?;
    Ok((name, Frame::from_grid(grid)))
}
