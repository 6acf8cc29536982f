//! Khipro: phonetic Latin-to-Bengali conversion.
//!
//! Conversion is a small transducer over a TOML mapping table. The combiner
//! buffers the Latin keystrokes of one word and shows the converted text as
//! composing; whitespace, functional keys and the commit suffix commit it.

mod config;
mod convert;
mod table;

pub use config::{parse_khipro_toml, KhiproConfigError, KhiproMappings};
pub use convert::{convert, convert_with, State};
pub use table::{Group, KhiproTable, DEFAULT_TOML};

use tracing::debug;

use crate::combiner::Combiner;
use crate::event::{key, Event};

#[derive(Debug, Default)]
pub struct BnKhiproCombiner {
    buffer: String,
    commit_suffix: String,
}

impl BnKhiproCombiner {
    /// `commit_suffix` is the typed sequence that commits the word; empty disables it.
    pub fn new(commit_suffix: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            commit_suffix: commit_suffix.into(),
        }
    }

    fn commit(&mut self, trailing: Option<char>, key_code: i32, source: &Event) -> Event {
        let mut text = convert(&self.buffer);
        text.extend(trailing);
        debug!(latin = %self.buffer, bengali = %text, "khipro commit");
        self.buffer.clear();
        Event::software_text(text, key_code, Some(source))
    }
}

impl Combiner for BnKhiproCombiner {
    fn process_event(&mut self, _history: &[Event], event: Event) -> Event {
        if event.key_code() == key::SHIFT || !event.is_handled() {
            return event;
        }

        if let Some(c) = event.code_point().filter(|c| c.is_whitespace()) {
            if self.buffer.is_empty() {
                return event;
            }
            return self.commit(Some(c), key::MULTIPLE_CODE_POINTS, &event);
        }

        if event.is_delete() {
            if self.buffer.pop().is_some() {
                return Event::consumed(&event);
            }
            return event;
        }

        if event.is_functional() {
            if self.buffer.is_empty() {
                return event;
            }
            return self.commit(None, event.key_code(), &event);
        }

        match event.code_point() {
            Some(c) if event.is_keypress() => {
                self.buffer.push(c);
                let suffix = self.commit_suffix.as_str();
                if !suffix.is_empty() && self.buffer.ends_with(suffix) {
                    self.buffer.truncate(self.buffer.len() - suffix.len());
                    return self.commit(None, key::MULTIPLE_CODE_POINTS, &event);
                }
                Event::consumed(&event)
            }
            _ => event,
        }
    }

    fn combining_state_feedback(&self) -> String {
        convert(&self.buffer)
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn name(&self) -> &'static str {
        "khipro"
    }
}
