//! Plain text renderer for summaries.

use super::repr::labels_repr;
use super::summary::Summary;
use super::table::frame_to_string;

/// Render a summary as the inspection report, ending with a newline.
///
/// ```text
/// Sheet Info:
/// Shape: (25, 3) (rows, columns)
///
/// Columns: ['ID', 'Date', 'Amount']
///
/// First 10 rows:
///    ID        Date  Amount
/// 0   1  2021-01-01   100.0
/// ...
/// ```
pub fn to_text(summary: &Summary) -> String {
    let (rows, columns) = summary.shape();
    let mut output = String::new();

    output.push_str("Sheet Info:\n");
    output.push_str(&format!("Shape: ({}, {}) (rows, columns)\n", rows, columns));
    output.push('\n');
    output.push_str(&format!("Columns: {}\n", labels_repr(&summary.labels)));
    output.push('\n');
    output.push_str(&format!("First {} rows:\n", summary.head_rows));
    output.push_str(&frame_to_string(&summary.preview));
    output.push('\n');

    output
}
