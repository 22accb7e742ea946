//! Watchface display state and the host-channel seam.
//!
//! `WatchfaceState` owns every string the face shows, so nothing in the
//! core depends on widget handles or globals. The embedded shell (or a
//! test) drives it through three entry points: the minute tick, inbound
//! payloads, and transport callbacks.

use chrono::{NaiveDateTime, Timelike};
use heapless::String;

use crate::clock::{self, ClockStyle};
use crate::config::{
    DATE_TEXT_MAX_LEN, DATE_PLACEHOLDER, GLYPH_PLACEHOLDER, TIME_TEXT_MAX_LEN, TIME_PLACEHOLDER,
    WEATHER_LINE_MAX_LEN, WEATHER_PLACEHOLDER,
};
use crate::error::Error;
use crate::msg::decoder::{DecodeSummary, WeatherDecoder};
use crate::msg::FieldIter;
use crate::policy;
use crate::text::bounded;

/// Capability the core needs from the host messaging subsystem.
///
/// Sending is fire-and-forget: the caller logs a failure and moves on.
/// There is no correlation id, no timeout, and no retry.
pub trait HostChannel {
    /// Queue the fixed weather-request message for transfer to the phone.
    fn send_weather_request(&mut self) -> Result<(), Error>;
}

/// Transport callbacks surfaced by the host messaging subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelEvent<'a> {
    /// An inbound message payload was delivered.
    Received(&'a [u8]),
    /// An inbound message was dropped before delivery.
    Dropped,
    /// The outbound request reached the transport.
    SentOk,
    /// The outbound request failed after it was queued.
    SendFailed,
}

/// Counters for the two log-only error classes plus sent requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    pub inbound_dropped: u32,
    pub send_failures: u32,
    pub requests_sent: u32,
}

/// All mutable face state, owned by the application shell.
pub struct WatchfaceState {
    decoder: WeatherDecoder,
    clock_style: ClockStyle,
    time_text: String<TIME_TEXT_MAX_LEN>,
    date_text: String<DATE_TEXT_MAX_LEN>,
    weather_text: String<WEATHER_LINE_MAX_LEN>,
    glyph: char,
    stats: LinkStats,
}

impl WatchfaceState {
    /// Fresh state showing the static placeholders.
    pub fn new(clock_style: ClockStyle) -> Self {
        Self {
            decoder: WeatherDecoder::new(),
            clock_style,
            time_text: bounded(TIME_PLACEHOLDER).0,
            date_text: bounded(DATE_PLACEHOLDER).0,
            weather_text: bounded(WEATHER_PLACEHOLDER).0,
            glyph: GLYPH_PLACEHOLDER,
            stats: LinkStats::default(),
        }
    }

    /// Minute tick from the host: refresh the clock strings and, on
    /// qualifying minutes, fire exactly one weather request.
    ///
    /// Returns whether a request was sent. A send failure is returned
    /// for logging; the tick itself has already succeeded and the next
    /// one will try again in due course.
    pub fn on_minute_tick(
        &mut self,
        now: NaiveDateTime,
        host: &mut impl HostChannel,
    ) -> Result<bool, Error> {
        self.time_text = clock::format_time(now.time(), self.clock_style);
        self.date_text = clock::format_date(now.date(), self.decoder.locale());

        if !policy::weather_request_due(now.time().minute()) {
            return Ok(false);
        }
        match host.send_weather_request() {
            Ok(()) => {
                self.stats.requests_sent += 1;
                Ok(true)
            }
            Err(e) => {
                self.stats.send_failures += 1;
                Err(e)
            }
        }
    }

    /// One inbound message from the phone.
    ///
    /// The weather line is reassembled once, after all fields have been
    /// applied, and only published when both halves of the report have
    /// been seen at least once. Buffers persist across messages, so a
    /// conditions-only update reuses the last temperature.
    pub fn on_message(&mut self, payload: &[u8]) -> DecodeSummary {
        let summary = self.decoder.apply(FieldIter::new(payload));

        if let Some(line) = self.decoder.weather_line() {
            self.weather_text = line;
        }
        if let Some(glyph) = self.decoder.condition_glyph() {
            self.glyph = glyph;
        }
        // Locale changes apply to the date on the next minute tick.
        summary
    }

    /// Dispatch a transport callback.
    pub fn on_channel_event(&mut self, event: ChannelEvent<'_>) -> Option<DecodeSummary> {
        match event {
            ChannelEvent::Received(payload) => Some(self.on_message(payload)),
            ChannelEvent::Dropped => {
                self.stats.inbound_dropped += 1;
                None
            }
            ChannelEvent::SentOk => None,
            ChannelEvent::SendFailed => {
                self.stats.send_failures += 1;
                None
            }
        }
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    pub fn weather_text(&self) -> &str {
        &self.weather_text
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    pub fn clock_style(&self) -> ClockStyle {
        self.clock_style
    }

    /// Apply a changed host clock preference; takes effect on the next
    /// minute tick.
    pub fn set_clock_style(&mut self, style: ClockStyle) {
        self.clock_style = style;
    }

    pub fn decoder(&self) -> &WeatherDecoder {
        &self.decoder
    }
}
