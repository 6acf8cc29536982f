
use glyph_core::settings::{LatinComposition, Settings, DEFAULT_TOML};

use super::{ComposeSession, KeyResponse, Script};

pub(super) fn default_settings() -> Settings {
    Settings::from_toml(DEFAULT_TOML).unwrap()
}

pub(super) fn nfc_settings() -> Settings {
    let mut settings = default_settings();
    settings.latin.composition = LatinComposition::Nfc;
    settings
}

pub(super) fn make_session(script: Script) -> ComposeSession {
    ComposeSession::with_settings(script, default_settings())
}

/// Type every char of `text`, returning the last response.
pub(super) fn type_str(session: &mut ComposeSession, text: &str) -> KeyResponse {
    let mut last = KeyResponse::default();
    for c in text.chars() {
        last = session.handle_char(c);
    }
    last
}
