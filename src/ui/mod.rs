//! Face rendering (embedded only).

pub mod screen;
