//! Keystroke combiners for scripts that compose several keys into one grapheme.
//!
//! Every combiner implements [`Combiner`]: it sees one [`Event`] at a time,
//! keeps its own buffer of not-yet-committed input and reports the text that
//! should currently be shown as composing.

pub mod combiner;
pub mod dead_key;
pub mod event;
pub mod hangul;
pub mod khipro;
pub mod nfc;
pub mod settings;
pub mod unicode;
pub mod wylie;

pub use combiner::Combiner;
pub use event::{key, Event, EventKind};
