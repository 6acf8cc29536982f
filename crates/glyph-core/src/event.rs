//! Immutable keystroke events.
//!
//! An event does not necessarily input a character: it may be a dead key, a
//! control key, a marker that a combiner swallowed the keystroke, or text
//! synthesized by a combiner. Combiners never mutate an event; they build a
//! new one and return it.

// Key codes shared with the host keyboard.
pub mod key {
    /// Character keys carry their code point and no key code.
    pub const NOT_A_KEY_CODE: i32 = 0;
    pub const ENTER: i32 = 10;
    pub const SPACE: i32 = 32;
    pub const DELETE: i32 = -7;
    pub const SHIFT: i32 = -11;
    pub const MULTIPLE_CODE_POINTS: i32 = -902;
}

/// Sentinel used across the FFI boundary for "no code point".
pub const NOT_A_CODE_POINT: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A key press that is part of input; may be re-interpreted by a combiner.
    InputKeypress,
    /// A string produced by software, e.g. a combiner flushing its buffer.
    SoftwareText,
    /// A key press synthesized as if it came from a hardware keyboard.
    HardwareKeypress,
    /// A dead character that modifies the next key press.
    Dead,
    NotHandled,
    /// Accepted into a combiner's buffer; inputs no text.
    Consumed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    code_point: Option<char>,
    key_code: i32,
    text: Option<String>,
    is_key_repeat: bool,
    source: Option<Box<Event>>,
}

impl Event {
    fn new(kind: EventKind, code_point: Option<char>, key_code: i32) -> Self {
        Self {
            kind,
            code_point,
            key_code,
            text: None,
            is_key_repeat: false,
            source: None,
        }
    }

    pub fn input_keypress(code_point: Option<char>, key_code: i32, is_key_repeat: bool) -> Self {
        Self {
            is_key_repeat,
            ..Self::new(EventKind::InputKeypress, code_point, key_code)
        }
    }

    /// Character key press with no key code.
    pub fn from_char(c: char) -> Self {
        Self::input_keypress(Some(c), key::NOT_A_KEY_CODE, false)
    }

    /// Control key press (delete, shift, ...) with no code point.
    pub fn from_key_code(key_code: i32) -> Self {
        Self::input_keypress(None, key_code, false)
    }

    pub fn delete() -> Self {
        Self::from_key_code(key::DELETE)
    }

    /// Split a value that is either a key code (`<= 0`) or a code point.
    pub fn from_code_point_or_key(value: i32, is_key_repeat: bool) -> Self {
        if value <= 0 {
            return Self::input_keypress(None, value, is_key_repeat);
        }
        match u32::try_from(value).ok().and_then(char::from_u32) {
            Some(c) => Self::input_keypress(Some(c), key::NOT_A_KEY_CODE, is_key_repeat),
            None => Self::not_handled(),
        }
    }

    pub fn hardware_keypress(code_point: char, key_code: i32, source: Option<&Event>) -> Self {
        Self {
            is_key_repeat: source.is_some_and(|s| s.is_key_repeat),
            source: source.map(|s| Box::new(s.clone())),
            ..Self::new(EventKind::HardwareKeypress, Some(code_point), key_code)
        }
    }

    pub fn software_text(text: impl Into<String>, key_code: i32, source: Option<&Event>) -> Self {
        Self {
            text: Some(text.into()),
            is_key_repeat: source.is_some_and(|s| s.is_key_repeat),
            source: source.map(|s| Box::new(s.clone())),
            ..Self::new(EventKind::SoftwareText, None, key_code)
        }
    }

    pub fn dead(code_point: char, key_code: i32, source: Option<&Event>) -> Self {
        Self {
            is_key_repeat: source.is_some_and(|s| s.is_key_repeat),
            source: source.map(|s| Box::new(s.clone())),
            ..Self::new(EventKind::Dead, Some(code_point), key_code)
        }
    }

    /// Same key data as `source`, marked as swallowed by a combiner.
    pub fn consumed(source: &Event) -> Self {
        Self {
            kind: EventKind::Consumed,
            code_point: source.code_point,
            key_code: source.key_code,
            text: source.text.clone(),
            is_key_repeat: source.is_key_repeat,
            source: Some(Box::new(source.clone())),
        }
    }

    pub fn not_handled() -> Self {
        Self::new(EventKind::NotHandled, None, key::NOT_A_KEY_CODE)
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn code_point(&self) -> Option<char> {
        self.code_point
    }

    pub fn key_code(&self) -> i32 {
        self.key_code
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_key_repeat(&self) -> bool {
        self.is_key_repeat
    }

    /// The event this one was derived from, if a combiner re-synthesized it.
    pub fn source(&self) -> Option<&Event> {
        self.source.as_deref()
    }

    pub fn is_consumed(&self) -> bool {
        self.kind == EventKind::Consumed
    }

    pub fn is_dead(&self) -> bool {
        self.kind == EventKind::Dead
    }

    pub fn is_handled(&self) -> bool {
        self.kind != EventKind::NotHandled
    }

    pub fn is_keypress(&self) -> bool {
        matches!(
            self.kind,
            EventKind::InputKeypress | EventKind::HardwareKeypress
        )
    }

    /// Control keys like delete or shift, as opposed to keys that input text.
    pub fn is_functional(&self) -> bool {
        self.code_point.is_none() && self.kind != EventKind::SoftwareText
    }

    pub fn is_delete(&self) -> bool {
        self.key_code == key::DELETE
    }

    /// Text this event inputs when applied. Consumed and control events input nothing.
    pub fn text_to_commit(&self) -> String {
        match self.kind {
            EventKind::Consumed | EventKind::NotHandled => String::new(),
            EventKind::SoftwareText => self.text.clone().unwrap_or_default(),
            EventKind::InputKeypress | EventKind::HardwareKeypress | EventKind::Dead => {
                self.code_point.map(String::from).unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_point_or_key_split() {
        let e = Event::from_code_point_or_key('a' as i32, false);
        assert_eq!(e.code_point(), Some('a'));
        assert_eq!(e.key_code(), key::NOT_A_KEY_CODE);

        let e = Event::from_code_point_or_key(key::DELETE, true);
        assert_eq!(e.code_point(), None);
        assert!(e.is_delete());
        assert!(e.is_key_repeat());
        assert!(e.is_functional());
    }

    #[test]
    fn surrogate_value_is_not_handled() {
        let e = Event::from_code_point_or_key(0xD800, false);
        assert!(!e.is_handled());
    }

    #[test]
    fn consumed_keeps_key_data_and_inputs_nothing() {
        let original = Event::input_keypress(Some('ㄱ'), key::NOT_A_KEY_CODE, true);
        let consumed = Event::consumed(&original);
        assert!(consumed.is_consumed());
        assert_eq!(consumed.code_point(), Some('ㄱ'));
        assert!(consumed.is_key_repeat());
        assert_eq!(consumed.source(), Some(&original));
        assert_eq!(consumed.text_to_commit(), "");
    }

    #[test]
    fn synthesized_events_inherit_repeat_flag() {
        let original = Event::input_keypress(None, key::DELETE, true);
        let space = Event::hardware_keypress(' ', key::SPACE, Some(&original));
        assert!(space.is_key_repeat());
        assert_eq!(space.text_to_commit(), " ");
        assert_eq!(space.source().map(Event::key_code), Some(key::DELETE));
    }

    #[test]
    fn software_text_commits_its_text() {
        let e = Event::software_text("বাংলা ", key::MULTIPLE_CODE_POINTS, None);
        assert_eq!(e.text(), Some("বাংলা "));
        assert_eq!(e.text_to_commit(), "বাংলা ");
        assert!(!e.is_functional());
    }

    #[test]
    fn functional_keys_commit_nothing() {
        assert_eq!(Event::delete().text_to_commit(), "");
        assert_eq!(Event::not_handled().text_to_commit(), "");
    }
}
