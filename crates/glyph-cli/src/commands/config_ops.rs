use std::fs;

use glyph_core::khipro::{parse_khipro_toml, Group};

pub fn khipro_export() {
    print!("{}", glyph_core::khipro::DEFAULT_TOML);
}

pub fn khipro_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let mappings = die!(parse_khipro_toml(&content), "Error: {}");
    let total: usize = mappings.values().map(|m| m.len()).sum();
    let missing: Vec<&str> = Group::ALL
        .into_iter()
        .filter(|g| mappings.get(g).map_or(true, |m| m.is_empty()))
        .map(Group::name)
        .collect();
    println!("OK: {total} mappings in {} groups", mappings.len());
    if !missing.is_empty() {
        println!("warning: no mappings for {}", missing.join(", "));
    }
}

pub fn settings_export() {
    print!("{}", glyph_core::settings::DEFAULT_TOML);
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        glyph_core::settings::Settings::from_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: latin.composition={:?}, korean.combine_initials={}, khipro.commit_suffix={:?}",
        s.latin.composition, s.korean.combine_initials, s.khipro.commit_suffix
    );
}
