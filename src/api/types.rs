use glyph_chain::{KeyResponse, Script};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum GlyphError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Result of one keystroke.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct GlyphKeyResponse {
    /// The engine handled the key; the host must not act on it.
    pub consumed: bool,
    /// Text to insert, replacing the composing text.
    pub commit: Option<String>,
    /// Composing text to show afterwards.
    pub composing: String,
}

impl From<KeyResponse> for GlyphKeyResponse {
    fn from(resp: KeyResponse) -> Self {
        Self {
            consumed: resp.consumed,
            commit: resp.commit,
            composing: resp.composing,
        }
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum GlyphScript {
    Latin,
    Hangul,
    Tibetan,
    Bengali,
}

impl From<GlyphScript> for Script {
    fn from(script: GlyphScript) -> Self {
        match script {
            GlyphScript::Latin => Script::Latin,
            GlyphScript::Hangul => Script::Hangul,
            GlyphScript::Tibetan => Script::Tibetan,
            GlyphScript::Bengali => Script::Bengali,
        }
    }
}

impl From<Script> for GlyphScript {
    fn from(script: Script) -> Self {
        match script {
            Script::Latin => GlyphScript::Latin,
            Script::Hangul => GlyphScript::Hangul,
            Script::Tibetan => GlyphScript::Tibetan,
            Script::Bengali => GlyphScript::Bengali,
        }
    }
}
