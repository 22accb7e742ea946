//! Host-testable core of the wxface watchface.
//!
//! Everything here is pure logic: message decoding, time/date
//! formatting, request scheduling, and the display state. No hardware
//! types, no async - the embedded shell in `main.rs` (behind the
//! `embedded` feature) wires this to the SoftDevice BLE link, a minute
//! ticker, and the OLED face.
//!
//! Usage: `cargo test` runs the whole suite on the host.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod error;
pub mod glyph;
pub mod locale;
pub mod msg;
pub mod policy;
pub mod state;
mod text;

#[cfg(feature = "embedded")]
pub mod ui;

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use crate::clock::{format_date, format_time, ClockStyle};
    use crate::config::{DATE_PLACEHOLDER, TIME_PLACEHOLDER, WEATHER_PLACEHOLDER};
    use crate::error::Error;
    use crate::glyph;
    use crate::locale::Locale;
    use crate::policy::weather_request_due;
    use crate::state::{ChannelEvent, HostChannel, WatchfaceState};

    // ════════════════════════════════════════════════════════════════════════
    // Time formatting
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn time_24h_matches_strftime_hm() {
        let t = NaiveTime::from_hms_opt(9, 41, 7).unwrap();
        assert_eq!(format_time(t, ClockStyle::H24).as_str(), "09:41");

        let t = NaiveTime::from_hms_opt(23, 5, 0).unwrap();
        assert_eq!(format_time(t, ClockStyle::H24).as_str(), "23:05");

        let t = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        assert_eq!(format_time(t, ClockStyle::H24).as_str(), "00:00");
    }

    #[test]
    fn time_12h_matches_strftime_im() {
        // %I is 01..12, zero-padded; midnight and noon render as 12.
        let t = NaiveTime::from_hms_opt(13, 7, 0).unwrap();
        assert_eq!(format_time(t, ClockStyle::H12).as_str(), "01:07");

        let t = NaiveTime::from_hms_opt(0, 5, 0).unwrap();
        assert_eq!(format_time(t, ClockStyle::H12).as_str(), "12:05");

        let t = NaiveTime::from_hms_opt(12, 30, 0).unwrap();
        assert_eq!(format_time(t, ClockStyle::H12).as_str(), "12:30");

        let t = NaiveTime::from_hms_opt(9, 41, 0).unwrap();
        assert_eq!(format_time(t, ClockStyle::H12).as_str(), "09:41");
    }

    // ════════════════════════════════════════════════════════════════════════
    // Date formatting
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn date_renders_weekday_century_month_year() {
        let d = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert_eq!(
            format_date(d, Locale::English).as_str(),
            "Sunday, 20. August 2026"
        );
    }

    #[test]
    fn date_is_locale_sensitive() {
        let d = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert_eq!(
            format_date(d, Locale::German).as_str(),
            "Sonntag, 20. August 2026"
        );
        assert_eq!(
            format_date(d, Locale::French).as_str(),
            "dimanche, 20. août 2026"
        );
        assert_eq!(
            format_date(d, Locale::Spanish).as_str(),
            "domingo, 20. agosto 2026"
        );
    }

    #[test]
    fn longest_date_rendering_fits_the_face() {
        // Spanish Wednesday/September is the longest supported
        // rendering at exactly 31 bytes.
        let d = NaiveDate::from_ymd_opt(2026, 9, 23).unwrap();
        let line = format_date(d, Locale::Spanish);
        assert_eq!(line.as_str(), "miércoles, 20. septiembre 2026");
        assert!(line.len() <= 31);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Locale resolution
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn locale_resolves_by_language_part() {
        assert_eq!(Locale::from_tag("en_US"), Locale::English);
        assert_eq!(Locale::from_tag("de_DE"), Locale::German);
        assert_eq!(Locale::from_tag("fr"), Locale::French);
        assert_eq!(Locale::from_tag("es_ES"), Locale::Spanish);
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        assert_eq!(Locale::from_tag("xx_XX"), Locale::English);
        assert_eq!(Locale::from_tag(""), Locale::English);
        assert_eq!(Locale::from_tag("d"), Locale::English);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Glyph selection
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn known_icon_ids_map_to_glyphs() {
        assert_eq!(glyph::for_icon_id("01"), 'B');
        assert_eq!(glyph::for_icon_id("10"), 'Q');
        assert_eq!(glyph::for_icon_id("13"), 'W');
    }

    #[test]
    fn unknown_icon_id_maps_to_na_glyph() {
        assert_eq!(glyph::for_icon_id("99"), ')');
        assert_eq!(glyph::for_icon_id(""), ')');
    }

    // ════════════════════════════════════════════════════════════════════════
    // Request policy
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn request_due_on_half_hour_marks_only() {
        assert!(weather_request_due(0));
        assert!(weather_request_due(30));

        assert!(!weather_request_due(1));
        assert!(!weather_request_due(29));
        assert!(!weather_request_due(31));
        assert!(!weather_request_due(59));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Watchface state
    // ════════════════════════════════════════════════════════════════════════

    #[derive(Default)]
    struct MockChannel {
        sent: usize,
        fail: bool,
    }

    impl HostChannel for MockChannel {
        fn send_weather_request(&mut self) -> Result<(), Error> {
            if self.fail {
                return Err(Error::SendFailed);
            }
            self.sent += 1;
            Ok(())
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 30)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn fresh_state_shows_placeholders() {
        let state = WatchfaceState::new(ClockStyle::H24);
        assert_eq!(state.time_text(), TIME_PLACEHOLDER);
        assert_eq!(state.date_text(), DATE_PLACEHOLDER);
        assert_eq!(state.weather_text(), WEATHER_PLACEHOLDER);
        assert_eq!(state.glyph(), 'G');
    }

    #[test]
    fn tick_refreshes_clock_strings() {
        let mut state = WatchfaceState::new(ClockStyle::H24);
        let mut channel = MockChannel::default();

        let sent = state.on_minute_tick(at(9, 41), &mut channel).unwrap();
        assert!(!sent);
        assert_eq!(state.time_text(), "09:41");
        assert_eq!(state.date_text(), "Sunday, 20. August 2026");
    }

    #[test]
    fn tick_on_half_hour_sends_exactly_one_request() {
        let mut state = WatchfaceState::new(ClockStyle::H24);
        let mut channel = MockChannel::default();

        assert!(state.on_minute_tick(at(9, 30), &mut channel).unwrap());
        assert_eq!(channel.sent, 1);
        assert_eq!(state.stats().requests_sent, 1);
    }

    #[test]
    fn one_hour_of_ticks_sends_two_requests() {
        let mut state = WatchfaceState::new(ClockStyle::H24);
        let mut channel = MockChannel::default();

        for minute in 0..60 {
            let _ = state.on_minute_tick(at(9, minute), &mut channel);
        }
        assert_eq!(channel.sent, 2);
    }

    #[test]
    fn failed_send_is_counted_and_reported() {
        let mut state = WatchfaceState::new(ClockStyle::H24);
        let mut channel = MockChannel {
            fail: true,
            ..Default::default()
        };

        let result = state.on_minute_tick(at(10, 0), &mut channel);
        assert_eq!(result, Err(Error::SendFailed));
        assert_eq!(state.stats().send_failures, 1);
        assert_eq!(state.stats().requests_sent, 0);
        // Clock strings were still refreshed before the send.
        assert_eq!(state.time_text(), "10:00");
    }

    #[test]
    fn dropped_and_failed_events_only_bump_counters() {
        let mut state = WatchfaceState::new(ClockStyle::H24);

        assert!(state.on_channel_event(ChannelEvent::Dropped).is_none());
        assert!(state.on_channel_event(ChannelEvent::SendFailed).is_none());
        assert!(state.on_channel_event(ChannelEvent::SentOk).is_none());

        assert_eq!(state.stats().inbound_dropped, 1);
        assert_eq!(state.stats().send_failures, 1);
        assert_eq!(state.weather_text(), WEATHER_PLACEHOLDER);
    }

    #[test]
    fn clock_style_change_applies_on_next_tick() {
        let mut state = WatchfaceState::new(ClockStyle::H24);
        let mut channel = MockChannel::default();

        let _ = state.on_minute_tick(at(13, 7), &mut channel);
        assert_eq!(state.time_text(), "13:07");

        state.set_clock_style(ClockStyle::H12);
        let _ = state.on_minute_tick(at(13, 7), &mut channel);
        assert_eq!(state.time_text(), "01:07");
    }

    #[test]
    fn locale_update_changes_date_on_next_tick() {
        let mut state = WatchfaceState::new(ClockStyle::H24);
        let mut channel = MockChannel::default();

        // LOCALE field: key 2, text "de_DE".
        let payload = [2, 1, 5, b'd', b'e', b'_', b'D', b'E'];
        let summary = state.on_message(&payload);
        assert!(summary.locale_changed);

        let _ = state.on_minute_tick(at(9, 41), &mut channel);
        assert_eq!(state.date_text(), "Sonntag, 20. August 2026");
    }
}
