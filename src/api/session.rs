use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glyph_chain::ComposeSession;
use glyph_core::Event;

use super::types::{GlyphKeyResponse, GlyphScript};

#[derive(uniffi::Object)]
pub struct GlyphSession {
    session: Mutex<ComposeSession>,
}

impl GlyphSession {
    fn lock(&self) -> MutexGuard<'_, ComposeSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[uniffi::export]
impl GlyphSession {
    #[uniffi::constructor]
    pub fn new(script: GlyphScript) -> Arc<Self> {
        Arc::new(Self {
            session: Mutex::new(ComposeSession::new(script.into())),
        })
    }

    /// `code_point` is the typed character, or a value <= 0 for control keys
    /// identified by `key_code` alone.
    pub fn handle_key(&self, code_point: i32, key_code: i32, is_repeat: bool) -> GlyphKeyResponse {
        let c = u32::try_from(code_point).ok().and_then(char::from_u32);
        let event = match c {
            Some(c) if code_point > 0 => Event::input_keypress(Some(c), key_code, is_repeat),
            _ => Event::input_keypress(None, key_code, is_repeat),
        };
        self.lock().handle_event(event).into()
    }

    pub fn commit(&self) -> Option<String> {
        self.lock().commit()
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Returns the text committed by the switch, if anything was composing.
    pub fn set_script(&self, script: GlyphScript) -> Option<String> {
        self.lock().set_script(script.into())
    }

    pub fn script(&self) -> GlyphScript {
        self.lock().script().into()
    }

    pub fn composing_text(&self) -> String {
        self.lock().composing_text()
    }
}
