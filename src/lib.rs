//! Kana / pinyin to clause and sentence conversion.
//!
//! The work happens in `henkan-core` (dictionary port, converters, candidate
//! stream) and `henkan-session` (the `Engine` facade); this crate re-exports
//! both and carries the optional tracing setup.

pub mod trace_init;

pub use henkan_core::{candidates, converter, dict, pinyin, reading, settings, unicode};
pub use henkan_session::{Engine, EngineState};

pub use trace_init::init_tracing;
