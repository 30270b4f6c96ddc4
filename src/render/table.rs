//! Plain-text table renderer for frames.

use crate::model::{
    format_date, format_datetime, format_time, is_midnight, CellValue, ColumnKind, Frame,
};
use unicode_width::UnicodeWidthStr;

/// Decimal places shown for floats at most.
const FLOAT_PRECISION: usize = 6;

/// Separator between rendered columns.
const COLUMN_GAP: &str = "  ";

/// Render a frame as an aligned plain-text table.
///
/// The first column is the zero-based row index, left-aligned; labels and
/// values are right-aligned. A frame without rows renders as an
/// `Empty DataFrame` block listing its columns.
///
/// # Example
///
/// ```
/// use sheetpeek::model::{CellValue, ColumnLabel, Frame};
/// use sheetpeek::render::frame_to_string;
///
/// let frame = Frame::new(
///     vec![ColumnLabel::Text("ID".into())],
///     vec![vec![CellValue::Number(1.0)], vec![CellValue::Number(2.0)]],
/// );
/// assert_eq!(frame_to_string(&frame), "   ID\n0   1\n1   2");
/// ```
pub fn frame_to_string(frame: &Frame) -> String {
    if frame.is_empty() {
        let labels: Vec<String> = frame
            .columns()
            .iter()
            .map(|label| escape(&label.to_string()))
            .collect();
        return format!(
            "Empty DataFrame\nColumns: [{}]\nIndex: []",
            labels.join(", ")
        );
    }

    let index: Vec<String> = (0..frame.row_count()).map(|i| i.to_string()).collect();
    let index_width = index.iter().map(|s| s.width()).max().unwrap_or(0);

    let headers: Vec<String> = frame
        .columns()
        .iter()
        .map(|label| escape(&label.to_string()))
        .collect();
    let columns: Vec<Vec<String>> = (0..frame.column_count())
        .map(|col| format_column(frame, col))
        .collect();
    let widths: Vec<usize> = headers
        .iter()
        .zip(&columns)
        .map(|(header, values)| {
            values
                .iter()
                .map(|v| v.width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(frame.row_count() + 1);

    let mut header_line = " ".repeat(index_width);
    for (header, width) in headers.iter().zip(&widths) {
        header_line.push_str(COLUMN_GAP);
        header_line.push_str(&pad_left(header, *width));
    }
    lines.push(header_line);

    for (row, label) in index.iter().enumerate() {
        let mut line = pad_right(label, index_width);
        for (values, width) in columns.iter().zip(&widths) {
            line.push_str(COLUMN_GAP);
            line.push_str(&pad_left(&values[row], *width));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Format every value of column `col` according to the column's kind.
fn format_column(frame: &Frame, col: usize) -> Vec<String> {
    let values: Vec<&CellValue> = frame.rows().iter().map(|row| &row[col]).collect();

    match frame.column_kind(col).unwrap_or(ColumnKind::Object) {
        ColumnKind::Integer => values
            .iter()
            .map(|v| match v.as_integer() {
                Some(i) => i.to_string(),
                None => display_object(v),
            })
            .collect(),
        ColumnKind::Float => format_floats(&values),
        ColumnKind::Bool => values.into_iter().map(display_object).collect(),
        ColumnKind::DateTime => {
            let dates_only = values.iter().all(|v| match v {
                CellValue::DateTime(dt) => is_midnight(dt),
                _ => true,
            });
            values
                .iter()
                .map(|v| match v {
                    CellValue::DateTime(dt) if dates_only => format_date(dt),
                    CellValue::DateTime(dt) => format_datetime(dt),
                    CellValue::Empty => "NaT".to_string(),
                    other => display_object(other),
                })
                .collect()
        }
        ColumnKind::Object | ColumnKind::Empty => values.into_iter().map(display_object).collect(),
    }
}

/// Format a float column with one shared number of decimals.
///
/// The count is the smallest (at least 1, at most 6) that shows every value
/// without losing digits at 6-decimal precision. Columns holding tiny values,
/// or huge values that would print wider than 12 characters, switch to
/// scientific notation.
fn format_floats(values: &[&CellValue]) -> Vec<String> {
    let numbers: Vec<Option<f64>> = values
        .iter()
        .map(|v| match v {
            CellValue::Number(n) => Some(*n),
            _ => None,
        })
        .collect();

    let finite = || numbers.iter().flatten().filter(|n| n.is_finite());

    let decimals = finite()
        .map(|n| significant_decimals(*n))
        .max()
        .unwrap_or(1)
        .max(1);

    let fixed: Vec<Option<String>> = numbers
        .iter()
        .map(|n| n.map(|n| format_float(n, decimals)))
        .collect();

    let longest = fixed.iter().flatten().map(|s| s.len()).max().unwrap_or(0);
    let threshold = 10f64.powi(-(FLOAT_PRECISION as i32));
    let has_small = finite().any(|n| *n != 0.0 && n.abs() < threshold);
    let has_large = finite().any(|n| n.abs() > 1e6);
    let scientific = has_small || (has_large && longest > FLOAT_PRECISION + 6);

    numbers
        .iter()
        .zip(fixed)
        .zip(values)
        .map(|((number, fixed), value)| match (number, fixed) {
            (Some(n), _) if scientific && n.is_finite() => format_scientific(*n),
            (Some(_), Some(s)) => s,
            (None, _) if value.is_empty() => "NaN".to_string(),
            _ => display_object(value),
        })
        .collect()
}

/// Decimals needed to show `n` at the display precision.
fn significant_decimals(n: f64) -> usize {
    let s = format!("{:.*}", FLOAT_PRECISION, n);
    match s.split_once('.') {
        Some((_, frac)) => frac.trim_end_matches('0').len(),
        None => 0,
    }
}

fn format_float(n: f64, decimals: usize) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let inf = if n > 0.0 { "inf" } else { "-inf" };
        inf.to_string()
    } else {
        format!("{:.*}", decimals, n)
    }
}

/// `1.500000e+07` style notation.
fn format_scientific(n: f64) -> String {
    let s = format!("{:.*e}", FLOAT_PRECISION, n);
    match s.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => s,
    }
}

/// Display form of a single value in a mixed column.
pub(crate) fn display_object(value: &CellValue) -> String {
    match value {
        CellValue::Empty => "NaN".to_string(),
        CellValue::String(s) => escape(s),
        CellValue::Number(n) => match value.as_integer() {
            Some(i) => i.to_string(),
            None => format_float_repr(*n),
        },
        CellValue::Bool(true) => "True".to_string(),
        CellValue::Bool(false) => "False".to_string(),
        CellValue::DateTime(dt) => format_datetime(dt),
        CellValue::Time(t) => format_time(t),
        CellValue::Error(code) => code.clone(),
    }
}

/// Shortest representation that reads back as the same float.
pub(crate) fn format_float_repr(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let inf = if n > 0.0 { "inf" } else { "-inf" };
        inf.to_string()
    } else {
        format!("{:?}", n)
    }
}

/// Keep one value on one line.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn pad_left(s: &str, width: usize) -> String {
    let mut padded = " ".repeat(width.saturating_sub(s.width()));
    padded.push_str(s);
    padded
}

fn pad_right(s: &str, width: usize) -> String {
    let mut padded = s.to_string();
    padded.push_str(&" ".repeat(width.saturating_sub(s.width())));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnLabel;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    fn ymd_hms(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn label(s: &str) -> ColumnLabel {
        ColumnLabel::Text(s.to_string())
    }

    fn num(n: f64) -> CellValue {
        CellValue::Number(n)
    }

    fn text(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    #[test]
    fn test_integer_and_text_columns() {
        let frame = Frame::new(
            vec![label("ID"), label("Name")],
            vec![vec![num(1.0), text("x")], vec![num(22.0), text("yy")]],
        );
        let expected = "   ID  Name\n0   1     x\n1  22    yy";
        assert_eq!(frame_to_string(&frame), expected);
    }

    #[test]
    fn test_float_column_shared_decimals() {
        let frame = Frame::new(
            vec![label("x")],
            vec![vec![num(1.5)], vec![num(2.25)], vec![CellValue::Empty]],
        );
        assert_eq!(frame_to_string(&frame), "      x\n0  1.50\n1  2.25\n2   NaN");
    }

    #[test]
    fn test_float_with_missing_integers() {
        let frame = Frame::new(
            vec![label("Amount")],
            vec![vec![num(100.0)], vec![CellValue::Empty]],
        );
        assert_eq!(
            frame_to_string(&frame),
            "   Amount\n0   100.0\n1     NaN"
        );
    }

    #[test]
    fn test_float_precision_capped() {
        let values = [num(1.0 / 3.0), num(2.0)];
        let refs: Vec<&CellValue> = values.iter().collect();
        assert_eq!(format_floats(&refs), vec!["0.333333", "2.000000"]);
    }

    #[test]
    fn test_scientific_floats() {
        let values = [num(1e16), num(0.5)];
        let refs: Vec<&CellValue> = values.iter().collect();
        assert_eq!(
            format_floats(&refs),
            vec!["1.000000e+16", "5.000000e-01"]
        );

        let values = [num(1e-9)];
        let refs: Vec<&CellValue> = values.iter().collect();
        assert_eq!(format_floats(&refs), vec!["1.000000e-09"]);
    }

    #[test]
    fn test_date_columns() {
        let frame = Frame::new(
            vec![label("Date")],
            vec![
                vec![CellValue::DateTime(ymd_hms(2021, 1, 1, 0))],
                vec![CellValue::Empty],
            ],
        );
        assert_eq!(
            frame_to_string(&frame),
            "         Date\n0  2021-01-01\n1         NaT"
        );

        let frame = Frame::new(
            vec![label("When")],
            vec![
                vec![CellValue::DateTime(ymd_hms(2021, 1, 1, 0))],
                vec![CellValue::DateTime(ymd_hms(2021, 1, 2, 9))],
            ],
        );
        assert_eq!(
            frame_to_string(&frame),
            "                  When\n0  2021-01-01 00:00:00\n1  2021-01-02 09:00:00"
        );
    }

    #[test]
    fn test_time_column() {
        let frame = Frame::new(
            vec![label("Open")],
            vec![
                vec![CellValue::Time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())],
                vec![CellValue::Time(NaiveTime::from_hms_opt(9, 30, 15).unwrap())],
                vec![CellValue::Empty],
            ],
        );
        assert_eq!(frame.column_kind(0), Some(ColumnKind::Object));
        assert_eq!(
            frame_to_string(&frame),
            "       Open\n0  12:00:00\n1  09:30:15\n2       NaN"
        );
    }

    #[test]
    fn test_mixed_column() {
        let frame = Frame::new(
            vec![label("v")],
            vec![
                vec![num(1.0)],
                vec![num(2.5)],
                vec![text("a\nb")],
                vec![CellValue::Bool(true)],
                vec![CellValue::Empty],
                vec![CellValue::Error("#DIV/0!".into())],
            ],
        );
        let out = frame_to_string(&frame);
        let values: Vec<&str> = out.lines().skip(1).map(|l| l[1..].trim()).collect();
        assert_eq!(values, vec!["1", "2.5", "a\\nb", "True", "NaN", "#DIV/0!"]);
    }

    #[test]
    fn test_index_width_grows() {
        let rows = (0..12).map(|i| vec![num(i as f64)]).collect();
        let frame = Frame::new(vec![label("n")], rows);
        let out = frame_to_string(&frame);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "     n");
        assert_eq!(lines[1], "0    0");
        assert_eq!(lines[12], "11  11");
    }

    #[test]
    fn test_wide_characters_aligned() {
        let frame = Frame::new(
            vec![label("city")],
            vec![vec![text("東京")], vec![text("Oslo")]],
        );
        assert_eq!(frame_to_string(&frame), "   city\n0  東京\n1  Oslo");
    }

    #[test]
    fn test_empty_frame() {
        let frame = Frame::new(vec![label("ID"), label("Date")], Vec::new());
        assert_eq!(
            frame_to_string(&frame),
            "Empty DataFrame\nColumns: [ID, Date]\nIndex: []"
        );

        assert_eq!(
            frame_to_string(&Frame::default()),
            "Empty DataFrame\nColumns: []\nIndex: []"
        );
    }
}
