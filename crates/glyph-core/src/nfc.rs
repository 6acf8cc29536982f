use unicode_normalization::UnicodeNormalization;

use crate::combiner::Combiner;
use crate::event::Event;
use crate::unicode::is_letter_or_mark;

/// Buffers letters and marks as typed, and shows them in Normalization Form C.
///
/// The buffer keeps the decomposed keystrokes so that delete removes one
/// typed step (the mark) rather than the whole precomposed character.
#[derive(Debug, Default)]
pub struct NfcNormalizingCombiner {
    buffer: String,
}

impl NfcNormalizingCombiner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Combiner for NfcNormalizingCombiner {
    fn process_event(&mut self, _history: &[Event], event: Event) -> Event {
        if event.is_keypress() {
            if let Some(c) = event.code_point().filter(|&c| is_letter_or_mark(c)) {
                self.buffer.push(c);
                return Event::consumed(&event);
            }
        }
        if !self.buffer.is_empty() && event.is_delete() {
            self.buffer.pop();
            return Event::consumed(&event);
        }
        event
    }

    fn combining_state_feedback(&self) -> String {
        self.buffer.nfc().collect()
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn name(&self) -> &'static str {
        "nfc"
    }
}
