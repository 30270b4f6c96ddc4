//! Typed cell values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Serialize, Serializer};

/// Largest serial Excel accepts (9999-12-31).
const MAX_SERIAL: f64 = 2_958_466.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Convert a workbook serial number to a date and time.
///
/// In the 1900 system day zero is 1899-12-30, except that serials below 60
/// count from 1899-12-31: Excel treats 1900 as a leap year, so serial 1 is
/// 1900-01-01 and serial 60 (Excel's 1900-02-29) lands on 1900-02-28. In the
/// 1904 system serial 0 is 1904-01-01. The fractional part is the time of
/// day, rounded to the second.
pub fn datetime_from_serial(serial: f64, date1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..MAX_SERIAL).contains(&serial) {
        return None;
    }

    let epoch = if date1904 {
        NaiveDate::from_ymd_opt(1904, 1, 1)?
    } else if serial < 60.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::try_seconds(seconds)?)
}

/// Convert the fractional serial of a time-only cell (`0 <= serial < 1`) to a
/// time of day, rounded to the second.
pub fn time_from_serial(serial: f64) -> Option<NaiveTime> {
    if !(0.0..1.0).contains(&serial) {
        return None;
    }
    let seconds = (serial * SECONDS_PER_DAY).round() as u32 % 86_400;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}

/// Parse an ISO 8601 value as stored in `t="d"` cells.
///
/// Fractional seconds are dropped. Impossible dates or times yield `None`.
pub fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim().trim_end_matches('Z');

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.with_nanosecond(0);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `YYYY-MM-DD`
pub fn format_date(dt: &NaiveDateTime) -> String {
    dt.format(DATE_FORMAT).to_string()
}

/// `YYYY-MM-DD HH:MM:SS`
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// `HH:MM:SS`
pub fn format_time(time: &NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Whether the time of day is exactly midnight.
pub fn is_midnight(dt: &NaiveDateTime) -> bool {
    dt.time().num_seconds_from_midnight() == 0 && dt.nanosecond() == 0
}

fn serialize_datetime<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&dt.format(DATETIME_FORMAT))
}

fn serialize_time<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(TIME_FORMAT))
}

/// A single cell value read from a worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value (a blank cell or a missing-value marker).
    #[default]
    Empty,
    String(String),
    Number(f64),
    Bool(bool),
    #[serde(serialize_with = "serialize_datetime")]
    DateTime(NaiveDateTime),
    /// A time of day with no date, from a time-formatted value below 1.
    #[serde(serialize_with = "serialize_time")]
    Time(NaiveTime),
    /// A formula error such as `#DIV/0!`.
    Error(String),
}

impl CellValue {
    /// Value of a number stored in a date- or time-formatted cell.
    ///
    /// In the 1900 system a serial below 1 has no date part and becomes a
    /// [`CellValue::Time`]. Serials outside the calendar stay numbers.
    pub fn from_date_serial(serial: f64, date1904: bool) -> Self {
        if !date1904 {
            if let Some(time) = time_from_serial(serial) {
                return CellValue::Time(time);
            }
        }
        match datetime_from_serial(serial, date1904) {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::Number(serial),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Blank for row-skipping purposes: empty, or a string with no content.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// The number as an integer, when it has no fractional part.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Number(n) => integral(*n),
            _ => None,
        }
    }
}

/// `n` as an i64 when it is integral and exactly representable.
pub(crate) fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
        Some(n as i64)
    } else {
        None
    }
}
