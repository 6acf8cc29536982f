//! Combiner chains and the host-facing composing session.
//!
//! A [`CombinerChain`] runs every keystroke through an ordered list of
//! combiners for one [`Script`]; [`ComposeSession`] turns the chain's output
//! into [`KeyResponse`]s telling the host what to commit and what to show.

mod chain;
mod script;
mod session;

#[cfg(test)]
mod tests;

pub use chain::CombinerChain;
pub use script::Script;
pub use session::{ComposeSession, KeyResponse};
