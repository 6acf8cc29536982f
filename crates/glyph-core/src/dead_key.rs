//! Dead-key handling: a stateless pre-pass that turns typed combining marks
//! into dead events, and the combiner that applies pending dead keys to the
//! next base character.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::combiner::Combiner;
use crate::event::{key, Event, EventKind};
use crate::unicode::is_combining_diacritical;

/// Re-emits combining diacritical marks typed as ordinary keys as dead events.
#[derive(Debug, Default)]
pub struct DeadKeyPreCombiner;

impl DeadKeyPreCombiner {
    pub fn new() -> Self {
        Self
    }
}

impl Combiner for DeadKeyPreCombiner {
    fn process_event(&mut self, _history: &[Event], event: Event) -> Event {
        if event.kind() != EventKind::InputKeypress {
            return event;
        }
        match event.code_point() {
            Some(c) if is_combining_diacritical(c) => {
                Event::dead(c, key::NOT_A_KEY_CODE, Some(&event))
            }
            _ => event,
        }
    }

    fn combining_state_feedback(&self) -> String {
        String::new()
    }

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "dead_key_pre"
    }
}

// Display forms of dead keys, as sent by layouts.
const ACCENT_ACUTE: char = '\u{00B4}';
const ACCENT_BREVE: char = '\u{02D8}';
const ACCENT_CARON: char = '\u{02C7}';
const ACCENT_CEDILLA: char = '\u{00B8}';
const ACCENT_CIRCUMFLEX: char = '\u{02C6}';
const ACCENT_COMMA_ABOVE: char = '\u{1FBD}';
const ACCENT_COMMA_ABOVE_RIGHT: char = '\u{02BC}';
const ACCENT_DOT_ABOVE: char = '\u{02D9}';
const ACCENT_DOT_BELOW: char = '.';
const ACCENT_DOUBLE_ACUTE: char = '\u{02DD}';
const ACCENT_GRAVE: char = '\u{02CB}';
const ACCENT_HOOK_ABOVE: char = '\u{02C0}';
const ACCENT_HORN: char = '\'';
const ACCENT_MACRON: char = '\u{00AF}';
const ACCENT_MACRON_BELOW: char = '\u{02CD}';
const ACCENT_OGONEK: char = '\u{02DB}';
const ACCENT_REVERSED_COMMA_ABOVE: char = '\u{02BD}';
const ACCENT_RING_ABOVE: char = '\u{02DA}';
const ACCENT_STROKE: char = '-';
const ACCENT_TILDE: char = '\u{02DC}';
const ACCENT_TURNED_COMMA_ABOVE: char = '\u{02BB}';
const ACCENT_UMLAUT: char = '\u{00A8}';
const ACCENT_VERTICAL_LINE_ABOVE: char = '\u{02C8}';
const ACCENT_VERTICAL_LINE_BELOW: char = '\u{02CC}';

/// (combining mark, display accent)
const COMBINING_ACCENTS: &[(char, char)] = &[
    ('\u{0300}', ACCENT_GRAVE),
    ('\u{0301}', ACCENT_ACUTE),
    ('\u{0302}', ACCENT_CIRCUMFLEX),
    ('\u{0303}', ACCENT_TILDE),
    ('\u{0304}', ACCENT_MACRON),
    ('\u{0306}', ACCENT_BREVE),
    ('\u{0307}', ACCENT_DOT_ABOVE),
    ('\u{0308}', ACCENT_UMLAUT),
    ('\u{0309}', ACCENT_HOOK_ABOVE),
    ('\u{030A}', ACCENT_RING_ABOVE),
    ('\u{030B}', ACCENT_DOUBLE_ACUTE),
    ('\u{030C}', ACCENT_CARON),
    ('\u{030D}', ACCENT_VERTICAL_LINE_ABOVE),
    ('\u{0312}', ACCENT_TURNED_COMMA_ABOVE),
    ('\u{0313}', ACCENT_COMMA_ABOVE),
    ('\u{0314}', ACCENT_REVERSED_COMMA_ABOVE),
    ('\u{0315}', ACCENT_COMMA_ABOVE_RIGHT),
    ('\u{031B}', ACCENT_HORN),
    ('\u{0323}', ACCENT_DOT_BELOW),
    ('\u{0327}', ACCENT_CEDILLA),
    ('\u{0328}', ACCENT_OGONEK),
    ('\u{0329}', ACCENT_VERTICAL_LINE_BELOW),
    ('\u{0331}', ACCENT_MACRON_BELOW),
    ('\u{0335}', ACCENT_STROKE),
];

/// Legacy ASCII dead-key glyphs still accepted.
const LEGACY_ACCENTS: &[(char, char)] = &[('`', '\u{0300}'), ('^', '\u{0302}'), ('~', '\u{0303}')];

/// Stroke combinations with no canonical decomposition: (dead, base, result).
const NONSTANDARD_COMBINATIONS: &[(char, char, char)] = &[
    (ACCENT_STROKE, 'D', '\u{0110}'),
    (ACCENT_STROKE, 'G', '\u{01E4}'),
    (ACCENT_STROKE, 'H', '\u{0126}'),
    (ACCENT_STROKE, 'I', '\u{0197}'),
    (ACCENT_STROKE, 'L', '\u{0141}'),
    (ACCENT_STROKE, 'O', '\u{00D8}'),
    (ACCENT_STROKE, 'T', '\u{0166}'),
    (ACCENT_STROKE, 'd', '\u{0111}'),
    (ACCENT_STROKE, 'g', '\u{01E5}'),
    (ACCENT_STROKE, 'h', '\u{0127}'),
    (ACCENT_STROKE, 'i', '\u{0268}'),
    (ACCENT_STROKE, 'l', '\u{0142}'),
    (ACCENT_STROKE, 'o', '\u{00F8}'),
    (ACCENT_STROKE, 't', '\u{0167}'),
];

fn accent_to_combining() -> &'static HashMap<char, char> {
    static MAP: OnceLock<HashMap<char, char>> = OnceLock::new();
    MAP.get_or_init(|| {
        COMBINING_ACCENTS
            .iter()
            .map(|&(combining, accent)| (accent, combining))
            .chain(LEGACY_ACCENTS.iter().copied())
            .collect()
    })
}

fn nonstandard_combination(dead: char, base: char) -> Option<char> {
    NONSTANDARD_COMBINATIONS
        .iter()
        .find(|&&(d, b, _)| d == dead && b == base)
        .map(|&(_, _, result)| result)
}

/// Apply `dead` keys, in typing order, to `base` and normalise to NFC.
pub fn compose_dead_keys(dead: &str, base: char) -> String {
    let mut first = base;
    let mut marks = String::new();
    for d in dead.chars() {
        if let Some(replacement) = nonstandard_combination(d, base) {
            first = replacement;
        } else {
            marks.push(accent_to_combining().get(&d).copied().unwrap_or(d));
        }
    }
    let mut composed = String::with_capacity(marks.len() + 4);
    composed.push(first);
    composed.push_str(&marks);
    composed.nfc().collect()
}

/// One char becomes a key press; several become a text event.
fn event_from_text(text: &str, source: &Event) -> Event {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => source.clone(),
        (Some(c), None) => Event::hardware_keypress(c, source.key_code(), Some(source)),
        _ => Event::software_text(text, key::MULTIPLE_CODE_POINTS, Some(source)),
    }
}

/// Holds dead keys until the next base character arrives.
#[derive(Debug, Default)]
pub struct DeadKeyCombiner {
    dead_sequence: String,
}

impl DeadKeyCombiner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Combiner for DeadKeyCombiner {
    fn process_event(&mut self, _history: &[Event], event: Event) -> Event {
        let Some(last_dead) = self.dead_sequence.chars().last() else {
            if let (true, Some(c)) = (event.is_dead(), event.code_point()) {
                self.dead_sequence.push(c);
                return Event::consumed(&event);
            }
            return event;
        };

        if event.code_point().is_some_and(|c| c.is_whitespace() || c == last_dead) {
            // Typing the dead key twice, or a space, inputs the accent itself.
            let result = event_from_text(&self.dead_sequence, &event);
            self.dead_sequence.clear();
            return result;
        }
        if event.is_functional() {
            if event.is_delete() {
                self.dead_sequence.pop();
                return Event::consumed(&event);
            }
            return event;
        }
        let Some(base) = event.code_point() else {
            return event;
        };
        if event.is_dead() {
            self.dead_sequence.push(base);
            return Event::consumed(&event);
        }

        let composed = compose_dead_keys(&self.dead_sequence, base);
        debug!(dead = %self.dead_sequence, %base, %composed, "dead key composed");
        self.dead_sequence.clear();
        event_from_text(&composed, &event)
    }

    fn combining_state_feedback(&self) -> String {
        self.dead_sequence.clone()
    }

    fn reset(&mut self) {
        self.dead_sequence.clear();
    }

    fn name(&self) -> &'static str {
        "dead_key"
    }
}
