//! Foundational low-level utilities shared across issuelens crates.
//!
//! Provides the timestamp helpers used for cache write times and response
//! envelopes.

pub mod time_utils;

pub use time_utils::now_utc_iso;
