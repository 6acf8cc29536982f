//! Combiner settings.
//!
//! The defaults ship as `default_settings.toml`. A host can hand in its own
//! document once, before the first chain asks for [`Settings::global`].

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_TOML: &str = include_str!("default_settings.toml");

static HOST_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings: {0}")]
    Parse(String),
    #[error("settings: {field} {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
    #[error("settings were already loaded")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub latin: LatinSettings,
    pub korean: KoreanSettings,
    pub khipro: KhiproSettings,
}

/// How Latin-script accents are composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LatinComposition {
    /// Accent key first, then the letter.
    DeadKey,
    /// Letter first, then a combining mark; the result is normalised.
    Nfc,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatinSettings {
    pub composition: LatinComposition,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KoreanSettings {
    pub combine_initials: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KhiproSettings {
    #[serde(default)]
    pub commit_suffix: String,
}

impl Settings {
    /// Install a host settings document. Fails once [`Settings::global`] has
    /// been built from another source, or when the document is invalid.
    pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
        Settings::from_toml(&toml_content)?;
        HOST_TOML
            .set(toml_content)
            .map_err(|_| SettingsError::AlreadyInitialized)
    }

    pub fn global() -> &'static Settings {
        static GLOBAL: OnceLock<Settings> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let doc = HOST_TOML.get().map_or(DEFAULT_TOML, String::as_str);
            Settings::from_toml(doc).expect("settings TOML must be valid")
        })
    }

    pub fn from_toml(doc: &str) -> Result<Settings, SettingsError> {
        let settings: Settings =
            toml::from_str(doc).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.khipro.check()?;
        Ok(settings)
    }
}

impl KhiproSettings {
    fn check(&self) -> Result<(), SettingsError> {
        let reason = if !self.commit_suffix.is_ascii() {
            "must be ASCII"
        } else if self.commit_suffix.contains(char::is_whitespace) {
            "must not contain whitespace"
        } else {
            return Ok(());
        };
        Err(SettingsError::InvalidValue {
            field: "khipro.commit_suffix",
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(latin: &str, korean: &str, khipro: &str) -> String {
        format!("[latin]\n{latin}\n[korean]\n{korean}\n[khipro]\n{khipro}\n")
    }

    #[test]
    fn defaults() {
        let s = Settings::from_toml(DEFAULT_TOML).unwrap();
        assert_eq!(s.latin.composition, LatinComposition::DeadKey);
        assert!(!s.korean.combine_initials);
        assert_eq!(s.khipro.commit_suffix, ".ff");
    }

    #[test]
    fn host_document() {
        let s = Settings::from_toml(&doc(
            "composition = \"nfc\"",
            "combine_initials = true",
            "commit_suffix = \"\"",
        ))
        .unwrap();
        assert_eq!(s.latin.composition, LatinComposition::Nfc);
        assert!(s.korean.combine_initials);
        assert!(s.khipro.commit_suffix.is_empty());
    }

    #[test]
    fn commit_suffix_is_optional() {
        let s = Settings::from_toml(&doc(
            "composition = \"dead-key\"",
            "combine_initials = false",
            "",
        ))
        .unwrap();
        assert_eq!(s.khipro.commit_suffix, "");
    }

    #[test]
    fn rejects_unknown_composition() {
        let err = Settings::from_toml(&doc(
            "composition = \"telex\"",
            "combine_initials = false",
            "",
        ))
        .unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn rejects_misspelled_key() {
        let err = Settings::from_toml(&doc(
            "composition = \"nfc\"",
            "combine_initial = true",
            "",
        ))
        .unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn rejects_bad_suffix() {
        for suffix in ["commit_suffix = \"।\"", "commit_suffix = \". \""] {
            let err = Settings::from_toml(&doc(
                "composition = \"dead-key\"",
                "combine_initials = false",
                suffix,
            ))
            .unwrap_err();
            assert!(
                matches!(err, SettingsError::InvalidValue { field: "khipro.commit_suffix", .. }),
                "{suffix}"
            );
        }
    }

    #[test]
    fn rejects_missing_section() {
        let err = Settings::from_toml("[latin]\ncomposition = \"nfc\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
