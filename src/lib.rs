//! Keystroke composition engine for scripts that build one grapheme from
//! several keys: Hangul, Tibetan (Extended Wylie), Bengali (Khipro) and
//! accented Latin.
//!
//! The combiners live in `glyph-core`, chains and sessions in `glyph-chain`;
//! this crate exports them to the host through UniFFI.

uniffi::setup_scaffolding!();

pub mod api;
mod trace_init;

pub use glyph_chain::{CombinerChain, ComposeSession, KeyResponse, Script};
