//! Application-wide constants and compile-time configuration.
//!
//! All buffer capacities, timing parameters, and BLE constants live
//! here so they can be tuned in one place. The capacities are contracts:
//! the face is physically bounded, so every display string has a fixed
//! maximum length and decoding reports truncation instead of growing.

// Display buffer capacities (bytes)

/// Formatted temperature, e.g. `"-12°C"` (the degree sign is two bytes).
pub const TEMPERATURE_MAX_LEN: usize = 7;

/// Conditions text, copied verbatim from the phone.
pub const CONDITIONS_MAX_LEN: usize = 31;

/// Two-character OpenWeatherMap icon id selecting the condition glyph.
pub const CONDITIONS_ID_MAX_LEN: usize = 2;

/// POSIX locale tag, e.g. `"de_DE"`.
pub const LOCALE_TAG_MAX_LEN: usize = 7;

/// Assembled `"<temperature>, <conditions>"` line.
pub const WEATHER_LINE_MAX_LEN: usize = 31;

/// `HH:MM` time text.
pub const TIME_TEXT_MAX_LEN: usize = 9;

/// Localized `weekday, century. month year` date text.
pub const DATE_TEXT_MAX_LEN: usize = 31;

// Placeholders shown until the first update arrives

pub const TIME_PLACEHOLDER: &str = "00:00";
pub const DATE_PLACEHOLDER: &str = "01.01.1900";
pub const WEATHER_PLACEHOLDER: &str = "Loading...";
pub const GLYPH_PLACEHOLDER: char = 'G';

// Scheduling

/// Weather is requested on minute ticks where the wall-clock minute is
/// a multiple of this interval.
pub const WEATHER_REQUEST_INTERVAL_MIN: u32 = 30;

// Host-reported preferences

/// 24-hour clock preference. On a finished product this comes from the
/// host settings service; there is no user-facing toggle on the watch.
pub const CLOCK_24H: bool = true;

/// Local timezone offset from UTC (seconds).
pub const TIMEZONE_OFFSET_SECS: i32 = 3_600;

// BLE companion channel

/// GAP device name advertised to the phone.
pub const BLE_DEVICE_NAME: &str = "wxface";

/// Largest inbound weather payload accepted from the phone.
pub const MAX_INBOUND_PAYLOAD: usize = 64;
