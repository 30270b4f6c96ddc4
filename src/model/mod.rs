//! In-memory model of a loaded worksheet.
//!
//! The xlsx reader fills a [`Grid`] with typed [`CellValue`]s; [`Frame`]
//! turns that grid into a header of [`ColumnLabel`]s over data rows, which
//! the renderers then summarize.

mod frame;
mod grid;
mod value;

pub use frame::*;
pub use grid::*;
pub use value::{
    datetime_from_serial, format_date, format_datetime, format_time, is_midnight,
    parse_iso_datetime, time_from_serial, CellValue,
};
