use std::collections::BTreeMap;

use super::table::Group;

/// Mapping groups as parsed from TOML: group → (Latin key → Bengali text).
pub type KhiproMappings = BTreeMap<Group, BTreeMap<String, String>>;

#[derive(Debug, thiserror::Error)]
pub enum KhiproConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("unknown mapping group: [{0}]")]
    UnknownGroup(String),
    #[error("no mappings defined")]
    Empty,
    #[error("non-ASCII key in [{group}]: {key}")]
    NonAsciiKey { group: String, key: String },
    #[error("empty key in [{0}]")]
    EmptyKey(String),
    #[error("khipro table already initialized")]
    AlreadyInitialized,
}

/// Parse a Khipro mapping document. Every top-level table is one group.
///
/// Values may be empty; keys must be non-empty ASCII.
pub fn parse_khipro_toml(toml_str: &str) -> Result<KhiproMappings, KhiproConfigError> {
    let raw: BTreeMap<String, BTreeMap<String, String>> =
        toml::from_str(toml_str).map_err(|e| KhiproConfigError::Parse(e.to_string()))?;

    let mut mappings = KhiproMappings::new();
    for (name, entries) in raw {
        let group =
            Group::from_name(&name).ok_or_else(|| KhiproConfigError::UnknownGroup(name.clone()))?;
        for key in entries.keys() {
            if key.is_empty() {
                return Err(KhiproConfigError::EmptyKey(name.clone()));
            }
            if !key.is_ascii() {
                return Err(KhiproConfigError::NonAsciiKey {
                    group: name.clone(),
                    key: key.clone(),
                });
            }
        }
        mappings.insert(group, entries);
    }

    if mappings.values().all(BTreeMap::is_empty) {
        return Err(KhiproConfigError::Empty);
    }
    Ok(mappings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
[byanjon]
k = "ক"
kh = "খ"

[kar]
o = ""
"#;
        let map = parse_khipro_toml(toml).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&Group::Byanjon]["kh"], "খ");
        assert_eq!(map[&Group::Kar]["o"], "");
    }

    #[test]
    fn parse_default_toml() {
        let map = parse_khipro_toml(super::super::table::DEFAULT_TOML).unwrap();
        assert_eq!(map.len(), Group::ALL.len());
        assert!(map[&Group::Byanjon].len() > 30);
    }

    #[test]
    fn error_empty_document() {
        assert!(matches!(
            parse_khipro_toml("").unwrap_err(),
            KhiproConfigError::Empty
        ));
        assert!(matches!(
            parse_khipro_toml("[shor]\n[kar]\n").unwrap_err(),
            KhiproConfigError::Empty
        ));
    }

    #[test]
    fn error_unknown_group() {
        let err = parse_khipro_toml("[vowels]\na = \"আ\"\n").unwrap_err();
        assert!(matches!(err, KhiproConfigError::UnknownGroup(ref g) if g == "vowels"));
    }

    #[test]
    fn error_non_ascii_key() {
        let toml = "
[shor]
\"আ\" = \"a\"
";
        let err = parse_khipro_toml(toml).unwrap_err();
        assert!(matches!(err, KhiproConfigError::NonAsciiKey { .. }));
    }

    #[test]
    fn error_empty_key() {
        let err = parse_khipro_toml("[shor]\n\"\" = \"অ\"\n").unwrap_err();
        assert!(matches!(err, KhiproConfigError::EmptyKey(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_khipro_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, KhiproConfigError::Parse(_)));
    }
}
