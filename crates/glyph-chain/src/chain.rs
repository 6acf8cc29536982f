use glyph_core::settings::Settings;
use glyph_core::Event;
use tracing::{debug, debug_span};

use crate::script::{BoxedCombiner, Script};

/// Ordered combiners for one script, plus the text already composed in the
/// current word.
///
/// The composing text is `combined_text` (output that made it through every
/// combiner) followed by the feedback of each combiner, last combiner first.
pub struct CombinerChain {
    script: Script,
    settings: Settings,
    combiners: Vec<BoxedCombiner>,
    /// Events seen since the last reset, oldest first.
    history: Vec<Event>,
    combined_text: String,
    feedback: String,
    /// Last combiner that rewrote the most recent event.
    producer: Option<&'static str>,
}

impl CombinerChain {
    /// A chain configured from the global settings.
    pub fn new(script: Script) -> Self {
        Self::with_settings(script, Settings::global().clone())
    }

    pub fn with_settings(script: Script, settings: Settings) -> Self {
        let combiners = script.combiners(&settings);
        Self {
            script,
            settings,
            combiners,
            history: Vec::new(),
            combined_text: String::new(),
            feedback: String::new(),
            producer: None,
        }
    }

    pub fn script(&self) -> Script {
        self.script
    }

    /// Swap the script combiners. Any composition in progress is dropped.
    pub fn set_script(&mut self, script: Script) {
        if self.script == script {
            return;
        }
        debug!(from = %self.script, to = %script, "set_script");
        self.script = script;
        self.combiners = script.combiners(&self.settings);
        self.reset();
    }

    pub fn combiner_names(&self) -> Vec<&'static str> {
        self.combiners.iter().map(|c| c.name()).collect()
    }

    /// Run `event` through the combiners in order, stopping at the first
    /// one that consumes it. Returns what the last combiner produced.
    pub fn process_event(&mut self, event: Event) -> Event {
        let _span = debug_span!("process_event", key_code = event.key_code()).entered();
        let original = event.clone();
        let mut event = event;
        self.producer = None;
        for combiner in &mut self.combiners {
            let input = event.clone();
            event = combiner.process_event(&self.history, event);
            if event != input {
                self.producer = Some(combiner.name());
            }
            if event.is_consumed() {
                debug!(combiner = combiner.name(), "consumed");
                break;
            }
        }
        self.history.push(original);
        self.update_feedback();
        event
    }

    /// Apply the output of [`process_event`](Self::process_event) to the
    /// combined text: delete removes its last character, anything else
    /// appends the text it inputs.
    ///
    /// Text appended here lands after whatever the combiners were still
    /// holding, so their feedback is moved into the combined text first.
    pub fn apply_processed_event(&mut self, event: &Event) {
        if event.is_delete() {
            self.combined_text.pop();
        } else {
            let text = event.text_to_commit();
            if !text.is_empty() {
                if !self.feedback.is_empty() {
                    self.combined_text.push_str(&self.feedback);
                    self.reset_combiners();
                }
                self.combined_text.push_str(&text);
            }
        }
        self.update_feedback();
    }

    /// Text composed so far, including what the combiners still hold.
    pub fn composing_text(&self) -> String {
        let mut s = String::with_capacity(self.combined_text.len() + self.feedback.len());
        s.push_str(&self.combined_text);
        s.push_str(&self.feedback);
        s
    }

    /// Name of the last combiner that changed the event returned by the
    /// latest [`process_event`](Self::process_event), if any did.
    pub fn producer(&self) -> Option<&'static str> {
        self.producer
    }

    pub fn combined_text(&self) -> &str {
        &self.combined_text
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn is_empty(&self) -> bool {
        self.combined_text.is_empty() && self.feedback.is_empty()
    }

    pub fn history(&self) -> &[Event] {
        &self.history
    }

    pub fn reset(&mut self) {
        self.combined_text.clear();
        self.history.clear();
        self.producer = None;
        self.reset_combiners();
    }

    fn reset_combiners(&mut self) {
        for combiner in &mut self.combiners {
            combiner.reset();
        }
        self.feedback.clear();
    }

    fn update_feedback(&mut self) {
        self.feedback.clear();
        for combiner in self.combiners.iter().rev() {
            self.feedback
                .push_str(&combiner.combining_state_feedback());
        }
    }
}

impl std::fmt::Debug for CombinerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinerChain")
            .field("script", &self.script)
            .field("combiners", &self.combiner_names())
            .field("combined_text", &self.combined_text)
            .field("feedback", &self.feedback)
            .finish()
    }
}
