//! XLSX (Excel) workbook reader.
//!
//! Reads the workbook-level parts of an Office Open XML spreadsheet and
//! turns a worksheet into a [`Grid`](crate::model::Grid) of typed cells.
//!
//! # Example
//!
//! ```no_run
//! use sheetpeek::xlsx::WorkbookReader;
//!
//! let reader = WorkbookReader::open("ipo-data.xlsx")?;
//! println!("Sheets: {:?}", reader.sheet_names());
//!
//! let grid = reader.read_first_sheet()?;
//! println!("Rows with data: {}", grid.row_count());
//! # Ok::<(), sheetpeek::Error>(())
//! ```

mod parser;
mod shared_strings;
mod styles;

pub use parser::{SheetInfo, SheetSelector, WorkbookReader};
pub use shared_strings::SharedStrings;
pub use styles::Styles;
