//! Weather message decoder.
//!
//! Consumes the fields of one inbound message and maintains the bounded
//! weather buffers. Buffers deliberately persist across messages: a
//! partial update (say, conditions without a temperature) reuses
//! whatever the previous message left behind.

use core::fmt::Write;

use heapless::String;

use crate::config::{
    CONDITIONS_ID_MAX_LEN, CONDITIONS_MAX_LEN, LOCALE_TAG_MAX_LEN, TEMPERATURE_MAX_LEN,
    WEATHER_LINE_MAX_LEN,
};
use crate::glyph;
use crate::locale::Locale;
use crate::text::bounded;

use super::{Field, MessageKey, Value};

/// What one call to [`WeatherDecoder::apply`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodeSummary {
    /// Fields that updated a buffer or the locale.
    pub applied: u8,
    /// Fields with an unrecognized key.
    pub unknown: u8,
    /// Key of the last unrecognized field, for logging.
    pub last_unknown_key: Option<u8>,
    /// Known keys whose value had the wrong type.
    pub mismatched: u8,
    /// At least one value was cut to fit its buffer.
    pub truncated: bool,
    /// This message carried a temperature.
    pub temperature_seen: bool,
    /// This message carried conditions text.
    pub conditions_seen: bool,
    /// The active locale changed.
    pub locale_changed: bool,
}

/// Decoder state: the four bounded buffers plus the resolved locale.
#[derive(Debug, Default)]
pub struct WeatherDecoder {
    temperature: String<TEMPERATURE_MAX_LEN>,
    conditions: String<CONDITIONS_MAX_LEN>,
    conditions_id: String<CONDITIONS_ID_MAX_LEN>,
    locale_tag: String<LOCALE_TAG_MAX_LEN>,
    locale: Locale,
}

impl WeatherDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one message: iterate its fields once, in delivery order,
    /// and dispatch on key. Never fails - anomalies are reported in the
    /// summary and skipped.
    pub fn apply<'a>(&mut self, fields: impl Iterator<Item = Field<'a>>) -> DecodeSummary {
        let mut summary = DecodeSummary::default();

        for field in fields {
            match (field.key, field.value) {
                (MessageKey::Temperature, Value::Int(celsius)) => {
                    summary.truncated |= self.set_temperature(celsius);
                    summary.temperature_seen = true;
                    summary.applied = summary.applied.saturating_add(1);
                }
                (MessageKey::Conditions, Value::Text(text)) => {
                    let (copy, cut) = bounded(text);
                    self.conditions = copy;
                    summary.truncated |= cut;
                    summary.conditions_seen = true;
                    summary.applied = summary.applied.saturating_add(1);
                }
                (MessageKey::Locale, Value::Text(tag)) => {
                    let (copy, cut) = bounded(tag);
                    let locale = Locale::from_tag(copy.as_str());
                    summary.locale_changed |= locale != self.locale;
                    summary.truncated |= cut;
                    self.locale_tag = copy;
                    self.locale = locale;
                    summary.applied = summary.applied.saturating_add(1);
                }
                (MessageKey::ConditionsId, Value::Text(id)) => {
                    let (copy, cut) = bounded(id);
                    self.conditions_id = copy;
                    summary.truncated |= cut;
                    summary.applied = summary.applied.saturating_add(1);
                }
                (MessageKey::Unknown(key), _) => {
                    summary.unknown = summary.unknown.saturating_add(1);
                    summary.last_unknown_key = Some(key);
                }
                // Known key, wrong value type. The original would have
                // read a garbage union member here; we leave the buffer
                // alone and report it.
                _ => {
                    summary.mismatched = summary.mismatched.saturating_add(1);
                }
            }
        }

        summary
    }

    fn set_temperature(&mut self, celsius: i32) -> bool {
        // i32::MIN plus the unit suffix needs 14 bytes before truncation
        let mut full: String<16> = String::new();
        let _ = write!(full, "{}°C", celsius);
        let (copy, cut) = bounded(full.as_str());
        self.temperature = copy;
        cut
    }

    /// Formatted temperature (`"7°C"`), empty until first decoded.
    pub fn temperature(&self) -> &str {
        &self.temperature
    }

    /// Conditions text, empty until first decoded.
    pub fn conditions(&self) -> &str {
        &self.conditions
    }

    /// Raw two-character icon id, empty until first decoded.
    pub fn conditions_id(&self) -> &str {
        &self.conditions_id
    }

    /// Locale tag as sent by the phone.
    pub fn locale_tag(&self) -> &str {
        &self.locale_tag
    }

    /// Active display locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Glyph for the current condition id, once one has been decoded.
    pub fn condition_glyph(&self) -> Option<char> {
        if self.conditions_id.is_empty() {
            None
        } else {
            Some(glyph::for_icon_id(self.conditions_id.as_str()))
        }
    }

    /// True once both weather buffers have been populated.
    pub fn has_full_report(&self) -> bool {
        !self.temperature.is_empty() && !self.conditions.is_empty()
    }

    /// Assemble the `"<temperature>, <conditions>"` display line.
    ///
    /// Returns `None` until both a temperature and a conditions value
    /// have been observed at least once, so a half-filled report never
    /// reaches the face. The line itself is bounded; an over-long
    /// conditions text is cut to fit.
    pub fn weather_line(&self) -> Option<String<WEATHER_LINE_MAX_LEN>> {
        if !self.has_full_report() {
            return None;
        }
        // Worst case 7 + 2 + 31 bytes before the display bound applies.
        let mut full: String<40> = String::new();
        let _ = write!(full, "{}, {}", self.temperature, self.conditions);
        Some(bounded(full.as_str()).0)
    }
}
