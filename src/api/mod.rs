mod session;
mod types;

pub use session::GlyphSession;
pub use types::{GlyphError, GlyphKeyResponse, GlyphScript};

use std::path::Path;

use glyph_core::khipro::{self, KhiproTable};
use glyph_core::settings::{self, Settings};
use glyph_core::wylie;
use tracing::debug;

#[uniffi::export]
fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert a whole Khipro string to Bengali with the global table.
#[uniffi::export]
fn khipro_convert(text: String) -> String {
    khipro::convert(&text)
}

#[uniffi::export]
fn wylie_to_unicode(text: String) -> String {
    wylie::to_unicode(&text)
}

/// Install a custom Khipro mapping file. Must run before the first
/// Bengali session or conversion.
#[uniffi::export]
fn khipro_load_config(path: String) -> Result<(), GlyphError> {
    let content = std::fs::read_to_string(&path).map_err(|e| GlyphError::Io {
        msg: format!("{path}: {e}"),
    })?;
    KhiproTable::init_custom(content).map_err(|e| GlyphError::InvalidData { msg: e.to_string() })?;
    debug!(%path, "khipro config loaded");
    Ok(())
}

/// Install a custom settings file. Must run before the first session.
#[uniffi::export]
fn settings_load_config(path: String) -> Result<(), GlyphError> {
    let content = std::fs::read_to_string(&path).map_err(|e| GlyphError::Io {
        msg: format!("{path}: {e}"),
    })?;
    Settings::init_custom(content).map_err(|e| GlyphError::InvalidData { msg: e.to_string() })?;
    debug!(%path, "settings loaded");
    Ok(())
}

#[uniffi::export]
fn khipro_default_config() -> String {
    khipro::DEFAULT_TOML.to_string()
}

#[uniffi::export]
fn settings_default_config() -> String {
    settings::DEFAULT_TOML.to_string()
}

#[uniffi::export]
fn trace_init(log_dir: String) {
    crate::trace_init::init_tracing(Path::new(&log_dir));
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn temp_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn version_matches_package() {
        assert_eq!(engine_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn default_configs_parse() {
        assert!(khipro::parse_khipro_toml(&khipro_default_config()).is_ok());
        assert!(Settings::from_toml(&settings_default_config()).is_ok());
    }

    #[test]
    fn conversions() {
        assert_eq!(khipro_convert("ami".to_string()), "আমি");
        assert_eq!(wylie_to_unicode("bod".to_string()), "\u{0F56}\u{0F7C}\u{0F51}");
    }

    #[test]
    fn load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml").display().to_string();
        let err = khipro_load_config(path.clone()).unwrap_err();
        assert!(matches!(err, GlyphError::Io { ref msg } if msg.starts_with(&path)));
        let err = settings_load_config(path).unwrap_err();
        assert!(matches!(err, GlyphError::Io { .. }));
    }

    #[test]
    fn load_config_invalid_content() {
        let file = temp_file("[shor]\n\"অ\" = \"o\"\n");
        let path = file.path().display().to_string();
        let err = khipro_load_config(path).unwrap_err();
        assert!(matches!(err, GlyphError::InvalidData { .. }));

        let file = temp_file("[latin]\ncomposition = \"telex\"\n");
        let path = file.path().display().to_string();
        let err = settings_load_config(path).unwrap_err();
        assert!(matches!(err, GlyphError::InvalidData { .. }));
    }

    #[test]
    fn load_default_content() {
        // Loading the embedded defaults leaves global behaviour unchanged for
        // the other tests in this binary.
        let file = temp_file(khipro::DEFAULT_TOML);
        let path = file.path().display().to_string();
        match khipro_load_config(path) {
            Ok(()) => {}
            Err(GlyphError::InvalidData { msg }) => assert!(msg.contains("already")),
            Err(e) => panic!("unexpected error: {e}"),
        }
        assert_eq!(khipro_convert("ami".to_string()), "আমি");
    }
}
