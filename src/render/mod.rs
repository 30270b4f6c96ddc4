//! Output rendering for loaded sheets.
//!
//! A [`Summary`] captures what an inspection reports; [`to_text`] turns it
//! into the printed report and [`to_json`] into a JSON document.
//!
//! # Example
//!
//! ```no_run
//! use sheetpeek::{read_excel, render::*};
//!
//! let frame = read_excel("ipo-data.xlsx")?;
//! let summary = Summary::from_frame(&frame, &InspectOptions::default());
//!
//! print!("{}", to_text(&summary));
//! println!("{}", to_json(&summary, JsonFormat::Compact)?);
//! # Ok::<(), sheetpeek::Error>(())
//! ```

mod json;
mod options;
mod repr;
mod summary;
mod table;
mod text;

pub use json::{to_json, to_json_default};
pub use options::{InspectOptions, JsonFormat, DEFAULT_HEAD_ROWS};
pub use repr::{label_repr, labels_repr};
pub use summary::Summary;
pub use table::frame_to_string;
pub use text::to_text;
