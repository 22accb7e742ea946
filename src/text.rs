//! Bounded-copy helper for the fixed-capacity display buffers.

use heapless::String;

/// Copy `src` into a fresh bounded string, stopping at the first char
/// that no longer fits. Returns the copy and whether anything was cut
/// off. Truncation never splits a multi-byte character.
pub fn bounded<const N: usize>(src: &str) -> (String<N>, bool) {
    let mut out = String::new();
    for c in src.chars() {
        if out.push(c).is_err() {
            return (out, true);
        }
    }
    (out, false)
}
