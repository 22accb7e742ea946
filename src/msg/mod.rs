//! Phone↔watch application messages.
//!
//! A message is an ordered sequence of key-tagged fields. Keys are small
//! integers; values are either a signed 32-bit integer or a short UTF-8
//! string. Fields are iterated in whatever order the transport delivered
//! them; unknown keys are reported, never fatal.
//!
//! Wire layout per field:
//! ```text
//! Byte 0: Key
//! Byte 1: Value type (0 = signed int, 1 = UTF-8 text)
//! Byte 2: Payload length in bytes
//! Byte 3..: Payload (ints are little-endian, 1, 2 or 4 bytes wide)
//! ```

pub mod decoder;


/// Field keys understood by the weather decoder.
pub const KEY_TEMPERATURE: u8 = 0;
pub const KEY_CONDITIONS: u8 = 1;
pub const KEY_LOCALE: u8 = 2;
pub const KEY_CONDITIONS_ID: u8 = 3;

const TYPE_INT: u8 = 0;
const TYPE_TEXT: u8 = 1;

/// Decoded field key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageKey {
    Temperature,
    Conditions,
    Locale,
    ConditionsId,
    /// Anything else - logged and skipped.
    Unknown(u8),
}

impl From<u8> for MessageKey {
    fn from(key: u8) -> Self {
        match key {
            KEY_TEMPERATURE => MessageKey::Temperature,
            KEY_CONDITIONS => MessageKey::Conditions,
            KEY_LOCALE => MessageKey::Locale,
            KEY_CONDITIONS_ID => MessageKey::ConditionsId,
            other => MessageKey::Unknown(other),
        }
    }
}

/// Tagged field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value<'a> {
    Int(i32),
    Text(&'a str),
}

/// One key/value pair of an inbound message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field<'a> {
    pub key: MessageKey,
    pub value: Value<'a>,
}

/// Walks the fields of a raw transport payload in delivery order.
///
/// Malformed fields (bad int width, invalid UTF-8, unknown value type)
/// are skipped; a field whose declared length runs past the end of the
/// payload terminates iteration.
pub struct FieldIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Field<'a>> {
        loop {
            if self.pos + 3 > self.data.len() {
                return None;
            }
            let key = self.data[self.pos];
            let ty = self.data[self.pos + 1];
            let len = self.data[self.pos + 2] as usize;

            let start = self.pos + 3;
            let end = start + len;
            if end > self.data.len() {
                return None;
            }
            self.pos = end;

            let payload = &self.data[start..end];
            let value = match ty {
                TYPE_INT => match payload.len() {
                    1 => Value::Int(payload[0] as i8 as i32),
                    2 => Value::Int(i16::from_le_bytes([payload[0], payload[1]]) as i32),
                    4 => Value::Int(i32::from_le_bytes([
                        payload[0], payload[1], payload[2], payload[3],
                    ])),
                    _ => continue,
                },
                TYPE_TEXT => match core::str::from_utf8(payload) {
                    Ok(text) => Value::Text(text),
                    Err(_) => continue,
                },
                _ => continue,
            };

            return Some(Field {
                key: MessageKey::from(key),
                value,
            });
        }
    }
}

/// The outbound "please send weather" trigger: a single field with
/// key 0 and one 8-bit zero value. Stateless - no correlation id.
pub fn weather_request() -> [u8; 4] {
    [KEY_TEMPERATURE, TYPE_INT, 1, 0]
}
