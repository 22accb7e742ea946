//! Weather request scheduling policy.

use crate::config::WEATHER_REQUEST_INTERVAL_MIN;

/// Decide whether a minute tick should fire a weather request.
///
/// The request is stateless and fire-and-forget, so the schedule is a
/// plain modulo check on the wall-clock minute: at most one request per
/// qualifying tick, zero on all others.
pub fn weather_request_due(minute: u32) -> bool {
    minute % WEATHER_REQUEST_INTERVAL_MIN == 0
}
