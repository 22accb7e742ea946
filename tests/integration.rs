//! Integration tests for wxface host-testable logic: raw payloads in,
//! display strings out.

use chrono::NaiveDate;

use wxface::clock::ClockStyle;
use wxface::error::Error;
use wxface::msg::{weather_request, FieldIter};
use wxface::state::{ChannelEvent, HostChannel, WatchfaceState};

#[derive(Default)]
struct RecordingChannel {
    payloads: Vec<Vec<u8>>,
}

impl HostChannel for RecordingChannel {
    fn send_weather_request(&mut self) -> Result<(), Error> {
        self.payloads.push(weather_request().to_vec());
        Ok(())
    }
}

/// Build a payload from (key, value) pairs, text values marked by key.
fn payload(fields: &[(u8, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (key, text) in fields {
        out.push(*key);
        out.push(1);
        out.push(text.len() as u8);
        out.extend_from_slice(text.as_bytes());
    }
    out
}

fn temperature_field(celsius: i32) -> Vec<u8> {
    let mut out = vec![0, 0, 4];
    out.extend_from_slice(&celsius.to_le_bytes());
    out
}

#[test]
fn full_weather_update_reaches_the_face() {
    let mut state = WatchfaceState::new(ClockStyle::H24);

    let mut message = temperature_field(7);
    message.extend(payload(&[(1, "Clear"), (3, "01")]));

    let summary = state.on_message(&message);
    assert_eq!(summary.applied, 3);
    assert_eq!(state.weather_text(), "7°C, Clear");
    assert_eq!(state.glyph(), 'B');
}

#[test]
fn partial_update_keeps_placeholder_until_complete() {
    let mut state = WatchfaceState::new(ClockStyle::H24);

    state.on_message(&payload(&[(1, "Rain")]));
    assert_eq!(state.weather_text(), "Loading...");

    state.on_message(&temperature_field(12));
    assert_eq!(state.weather_text(), "12°C, Rain");
}

#[test]
fn unknown_keys_do_not_disturb_the_update() {
    let mut state = WatchfaceState::new(ClockStyle::H24);

    let mut message = temperature_field(-3);
    message.extend(payload(&[(99, "junk"), (1, "Snow"), (3, "13")]));

    let summary = state.on_message(&message);
    assert_eq!(summary.unknown, 1);
    assert_eq!(summary.last_unknown_key, Some(99));
    assert_eq!(state.weather_text(), "-3°C, Snow");
    assert_eq!(state.glyph(), 'W');
}

#[test]
fn locale_update_localizes_the_next_date_refresh() {
    let mut state = WatchfaceState::new(ClockStyle::H24);
    let mut channel = RecordingChannel::default();

    state.on_channel_event(ChannelEvent::Received(&payload(&[(2, "fr_FR")])));

    let now = NaiveDate::from_ymd_opt(2026, 8, 30)
        .unwrap()
        .and_hms_opt(9, 41, 0)
        .unwrap();
    state.on_minute_tick(now, &mut channel).unwrap();

    assert_eq!(state.time_text(), "09:41");
    assert_eq!(state.date_text(), "dimanche, 20. août 2026");
}

#[test]
fn an_hour_of_ticks_requests_weather_twice() {
    let mut state = WatchfaceState::new(ClockStyle::H24);
    let mut channel = RecordingChannel::default();

    let base = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
    for minute in 0..60 {
        let now = base.and_hms_opt(14, minute, 0).unwrap();
        state.on_minute_tick(now, &mut channel).unwrap();
    }

    // :00 and :30, each a single fixed request frame.
    assert_eq!(channel.payloads.len(), 2);
    for sent in &channel.payloads {
        assert_eq!(sent.as_slice(), &weather_request());
        assert_eq!(FieldIter::new(sent).count(), 1);
    }
    assert_eq!(state.stats().requests_sent, 2);
}
