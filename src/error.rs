//! Unified error type for wxface.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
///
/// The watchface has no fatal-error path: both variants below are
/// logged, counted in `LinkStats`, and otherwise ignored. The face
/// keeps showing the last successfully decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// An inbound message from the phone was dropped before delivery.
    MessageDropped,

    /// The outbound weather request could not be queued or sent.
    SendFailed,

    /// Buffer too small for the requested operation.
    BufferOverflow,
}
