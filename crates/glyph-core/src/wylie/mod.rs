//! Tibetan input through Extended Wylie transliteration.
//!
//! [`WylieCombiner`] buffers the ASCII Wylie keystrokes of one syllable and
//! shows the buffer transliterated by a [`Transliterator`]. The built-in
//! [`Ewts`] engine covers the common core of EWTS.

mod ewts;

pub use ewts::Ewts;

use crate::combiner::Combiner;
use crate::event::{key, Event};
use crate::unicode::is_wylie_char;

/// Converts a Wylie string to Tibetan Unicode.
pub trait Transliterator {
    fn to_unicode(&self, wylie: &str) -> String;
}

impl<F> Transliterator for F
where
    F: Fn(&str) -> String,
{
    fn to_unicode(&self, wylie: &str) -> String {
        self(wylie)
    }
}

/// Convert with the built-in engine.
pub fn to_unicode(wylie: &str) -> String {
    Ewts.to_unicode(wylie)
}

#[derive(Debug, Default)]
pub struct WylieCombiner<T: Transliterator = Ewts> {
    engine: T,
    buffer: String,
}

impl WylieCombiner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Transliterator> WylieCombiner<T> {
    pub fn with_engine(engine: T) -> Self {
        Self {
            engine,
            buffer: String::new(),
        }
    }
}

impl<T: Transliterator> Combiner for WylieCombiner<T> {
    fn process_event(&mut self, _history: &[Event], event: Event) -> Event {
        if event.is_keypress() {
            if let Some(c) = event.code_point().filter(|&c| is_wylie_char(c)) {
                self.buffer.push(c);
                return Event::consumed(&event);
            }
        }
        if event.is_delete() {
            match self.buffer.chars().count() {
                0 => {}
                // The host editor keeps the last composed character unless
                // it sees an edit, so a space is inserted for it to delete.
                1 => {
                    self.buffer.clear();
                    return Event::hardware_keypress(' ', key::SPACE, Some(&event));
                }
                _ => {
                    self.buffer.pop();
                    return Event::consumed(&event);
                }
            }
        }
        event
    }

    fn combining_state_feedback(&self) -> String {
        self.engine.to_unicode(&self.buffer)
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn name(&self) -> &'static str {
        "wylie"
    }
}
