use std::collections::HashMap;
use std::sync::OnceLock;

use super::config::{parse_khipro_toml, KhiproConfigError, KhiproMappings};

pub const DEFAULT_TOML: &str = include_str!("default_khipro.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

const GROUP_COUNT: usize = 12;

/// A class of Latin sequences. The transducer state decides which groups
/// are tried and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    /// Independent vowels.
    Shor,
    /// Forced vowel signs (`fa`, `fi`, ...).
    Fkar,
    /// Consonants.
    Byanjon,
    /// Conjuncts.
    Juktoborno,
    Reph,
    Phola,
    /// Dependent vowel signs.
    Kar,
    Diacritic,
    /// Punctuation, currency and digits.
    Biram,
    /// Separator.
    Prithayok,
    Ae,
    Ng,
}

impl Group {
    pub const ALL: [Group; GROUP_COUNT] = [
        Group::Shor,
        Group::Fkar,
        Group::Byanjon,
        Group::Juktoborno,
        Group::Reph,
        Group::Phola,
        Group::Kar,
        Group::Diacritic,
        Group::Biram,
        Group::Prithayok,
        Group::Ae,
        Group::Ng,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Group::Shor => "shor",
            Group::Fkar => "fkar",
            Group::Byanjon => "byanjon",
            Group::Juktoborno => "juktoborno",
            Group::Reph => "reph",
            Group::Phola => "phola",
            Group::Kar => "kar",
            Group::Diacritic => "diacritic",
            Group::Biram => "biram",
            Group::Prithayok => "prithayok",
            Group::Ae => "ae",
            Group::Ng => "ng",
        }
    }

    /// Group names are case-insensitive.
    pub fn from_name(name: &str) -> Option<Group> {
        Group::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(name))
    }
}

/// Lookup table for all mapping groups, with the longest key per group.
#[derive(Debug)]
pub struct KhiproTable {
    groups: [HashMap<String, String>; GROUP_COUNT],
    max_len: [usize; GROUP_COUNT],
}

impl KhiproTable {
    /// Set a custom mapping TOML before the first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), KhiproConfigError> {
        parse_khipro_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| KhiproConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global table.
    pub fn global() -> &'static KhiproTable {
        static INSTANCE: OnceLock<KhiproTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let mappings = parse_khipro_toml(toml_str).expect("khipro TOML must be valid");
            KhiproTable::from_mappings(mappings)
        })
    }

    pub fn from_mappings(mappings: KhiproMappings) -> Self {
        let mut groups: [HashMap<String, String>; GROUP_COUNT] =
            std::array::from_fn(|_| HashMap::new());
        let mut max_len = [0; GROUP_COUNT];
        for (group, entries) in mappings {
            let idx = group as usize;
            max_len[idx] = entries.keys().map(String::len).max().unwrap_or(0);
            groups[idx] = entries.into_iter().collect();
        }
        KhiproTable { groups, max_len }
    }

    pub fn lookup(&self, group: Group, key: &str) -> Option<&str> {
        self.groups[group as usize].get(key).map(String::as_str)
    }

    /// Length of the longest key in `group`, in bytes (keys are ASCII).
    pub fn max_key_len(&self, group: Group) -> usize {
        self.max_len[group as usize]
    }
}
