//! Conversion between wire timestamps and picker formats
//!
//! The server stores `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD` and `HH:MM:SS`.
//! Date-time pickers work in `YYYY-MM-DDTHH:MM` (minute precision), date
//! pickers in `YYYY-MM-DD`. Going through a picker keeps every component it
//! shows; seconds come back as `00`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Wire format for Datetime fields
pub const WIRE_DATETIME: &str = "%Y-%m-%d %H:%M:%S";
/// Wire format for Date fields and date pickers
pub const WIRE_DATE: &str = "%Y-%m-%d";
/// Wire format for Time fields
pub const WIRE_TIME: &str = "%H:%M:%S";
/// Date-time picker format
pub const PICKER_DATETIME: &str = "%Y-%m-%dT%H:%M";

const DATETIME_INPUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const TIME_INPUTS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Parse any accepted date or date-time spelling; bare dates are midnight
#[must_use]
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATETIME_INPUTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, WIRE_DATE)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse the date part of a date or date-time value
///
/// The whole value must be valid; a good date followed by junk is rejected.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    parse_datetime(text).map(|dt| dt.date())
}

/// Parse a time of day
#[must_use]
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    TIME_INPUTS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
}

/// Wire date-time to picker value
#[must_use]
pub fn datetime_to_picker(wire: &str) -> Option<String> {
    parse_datetime(wire).map(|dt| dt.format(PICKER_DATETIME).to_string())
}

/// Picker value to wire date-time, seconds set to `00`
#[must_use]
pub fn datetime_from_picker(picker: &str) -> Option<String> {
    parse_datetime(picker).map(|dt| format!("{}:00", dt.format("%Y-%m-%d %H:%M")))
}

/// Wire date or date-time to date picker value
#[must_use]
pub fn date_to_picker(wire: &str) -> Option<String> {
    parse_date(wire).map(|date| date.format(WIRE_DATE).to_string())
}

/// Date picker value to wire date
#[must_use]
pub fn date_from_picker(picker: &str) -> Option<String> {
    date_to_picker(picker)
}

/// Wire time to time picker value
#[must_use]
pub fn time_to_picker(wire: &str) -> Option<String> {
    parse_time(wire).map(|time| time.format(WIRE_TIME).to_string())
}

/// Time picker value to wire time
#[must_use]
pub fn time_from_picker(picker: &str) -> Option<String> {
    time_to_picker(picker)
}
