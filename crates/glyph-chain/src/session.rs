use glyph_core::settings::Settings;
use glyph_core::unicode::is_letter_or_mark;
use glyph_core::{key, Event, EventKind};
use tracing::{debug, debug_span};

use crate::chain::CombinerChain;
use crate::script::Script;

/// What the host should do after one keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyResponse {
    /// The session handled the key; the host must not act on it.
    pub consumed: bool,
    /// Text to insert into the document, replacing the composing text.
    pub commit: Option<String>,
    /// Composing text to show after the commit (empty when idle).
    pub composing: String,
}

impl KeyResponse {
    fn not_consumed() -> Self {
        Self::default()
    }

    fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }
}

/// Drives a [`CombinerChain`] one key at a time and decides what gets
/// committed.
///
/// Letters and marks extend the current word. Separators (space, digits,
/// punctuation) commit the word followed by the separator. Functional keys
/// commit the word and are left for the host to perform.
#[derive(Debug)]
pub struct ComposeSession {
    chain: CombinerChain,
}

impl ComposeSession {
    pub fn new(script: Script) -> Self {
        Self {
            chain: CombinerChain::new(script),
        }
    }

    pub fn with_settings(script: Script, settings: Settings) -> Self {
        Self {
            chain: CombinerChain::with_settings(script, settings),
        }
    }

    pub fn script(&self) -> Script {
        self.chain.script()
    }

    pub fn chain(&self) -> &CombinerChain {
        &self.chain
    }

    pub fn is_composing(&self) -> bool {
        !self.chain.is_empty()
    }

    pub fn composing_text(&self) -> String {
        self.chain.composing_text()
    }

    /// Handle a typed character.
    pub fn handle_char(&mut self, c: char) -> KeyResponse {
        self.handle_event(Event::from_char(c))
    }

    /// Handle a key given as a code point (> 0) or a key code (<= 0).
    pub fn handle_key(&mut self, code: i32, is_key_repeat: bool) -> KeyResponse {
        self.handle_event(Event::from_code_point_or_key(code, is_key_repeat))
    }

    pub fn handle_event(&mut self, event: Event) -> KeyResponse {
        let _span = debug_span!("handle_event", script = %self.script(), ?event).entered();
        if event.key_code() == key::SHIFT {
            return self.respond(KeyResponse::not_consumed());
        }

        let processed = self.chain.process_event(event);
        if processed.is_consumed() {
            return self.respond(KeyResponse::consumed());
        }

        // A combiner answered a delete with a synthesized key: the last
        // composing character is gone.
        if processed.source().is_some_and(Event::is_delete) && !processed.is_delete() {
            return self.respond(KeyResponse::consumed());
        }

        if processed.is_delete() {
            if self.chain.combined_text().is_empty() {
                return self.respond(KeyResponse::not_consumed());
            }
            self.chain.apply_processed_event(&processed);
            return self.respond(KeyResponse::consumed());
        }

        match processed.kind() {
            EventKind::SoftwareText if self.is_word_commit() => {
                // The script combiner committed its own word.
                let mut commit = self.chain.composing_text();
                commit.push_str(&processed.text_to_commit());
                let host_acts = processed.source().is_some_and(Event::is_functional);
                self.commit_response(commit, !host_acts)
            }
            EventKind::SoftwareText => {
                // Composed text from an earlier stage, e.g. a letter with a
                // mark that has no precomposed form. The word goes on.
                self.chain.apply_processed_event(&processed);
                self.respond(KeyResponse::consumed())
            }
            EventKind::InputKeypress | EventKind::HardwareKeypress | EventKind::Dead => {
                match processed.code_point() {
                    Some(c) if is_letter_or_mark(c) => {
                        self.chain.apply_processed_event(&processed);
                        self.respond(KeyResponse::consumed())
                    }
                    Some(c) => {
                        if !self.is_composing() {
                            return self.respond(KeyResponse::not_consumed());
                        }
                        let mut commit = self.chain.composing_text();
                        commit.push(c);
                        self.commit_response(commit, true)
                    }
                    None => {
                        // Functional key: finish the word and let the host act.
                        let commit = self.chain.composing_text();
                        self.commit_response(commit, false)
                    }
                }
            }
            EventKind::NotHandled | EventKind::Consumed => {
                self.respond(KeyResponse::not_consumed())
            }
        }
    }

    /// Commit whatever is composing. Returns `None` when idle.
    pub fn commit(&mut self) -> Option<String> {
        let text = self.chain.composing_text();
        self.chain.reset();
        (!text.is_empty()).then_some(text)
    }

    /// Drop the composition without committing it.
    pub fn reset(&mut self) {
        self.chain.reset();
    }

    /// Switch scripts. The pending composition is committed and returned.
    pub fn set_script(&mut self, script: Script) -> Option<String> {
        if script == self.script() {
            return None;
        }
        let committed = self.commit();
        self.chain.set_script(script);
        committed
    }

    fn is_word_commit(&self) -> bool {
        self.script()
            .word_combiner()
            .is_some_and(|name| self.chain.producer() == Some(name))
    }

    fn commit_response(&mut self, commit: String, consumed: bool) -> KeyResponse {
        self.chain.reset();
        debug!(commit = %commit, consumed, "commit");
        KeyResponse {
            consumed,
            commit: (!commit.is_empty()).then_some(commit),
            composing: String::new(),
        }
    }

    fn respond(&self, mut resp: KeyResponse) -> KeyResponse {
        resp.composing = self.chain.composing_text();
        resp
    }
}
