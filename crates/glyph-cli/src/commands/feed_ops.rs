use std::fs;

use glyph_chain::{ComposeSession, KeyResponse, Script};
use glyph_core::settings::Settings;
use glyph_core::{key, Event};
use serde::Serialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeySpecError {
    #[error("unterminated key name: <{0}")]
    Unterminated(String),
    #[error("unknown key name: <{0}>")]
    UnknownKey(String),
}

/// One parsed key with the label it is reported under.
#[derive(Debug)]
pub struct Key {
    pub label: String,
    pub event: Event,
}

/// Parse a key string. Plain characters are typed as-is; named keys are
/// written in angle brackets: `<del>`, `<enter>`, `<shift>`, `<space>`,
/// `<lt>` for a literal `<`, and `<U+0301>` for any code point.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, KeySpecError> {
    let mut keys = Vec::new();
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '<' {
            keys.push(Key {
                label: c.to_string(),
                event: Event::from_char(c),
            });
            continue;
        }
        let mut name = String::new();
        loop {
            match chars.next() {
                Some('>') => break,
                Some(n) => name.push(n),
                None => return Err(KeySpecError::Unterminated(name)),
            }
        }
        let event = named_key(&name).ok_or_else(|| KeySpecError::UnknownKey(name.clone()))?;
        keys.push(Key {
            label: format!("<{name}>"),
            event,
        });
    }
    Ok(keys)
}

fn named_key(name: &str) -> Option<Event> {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "del" | "delete" | "bs" => Some(Event::delete()),
        "enter" | "ret" => Some(Event::from_key_code(key::ENTER)),
        "shift" => Some(Event::from_key_code(key::SHIFT)),
        "space" => Some(Event::from_char(' ')),
        "lt" => Some(Event::from_char('<')),
        _ => {
            let hex = lower.strip_prefix("u+")?;
            let code = u32::from_str_radix(hex, 16).ok()?;
            char::from_u32(code).map(Event::from_char)
        }
    }
}

#[derive(Debug, Serialize)]
struct FeedStep<'a> {
    key: &'a str,
    consumed: bool,
    commit: Option<&'a str>,
    composing: &'a str,
}

/// Everything committed, followed by what is still composing.
pub fn feed(session: &mut ComposeSession, keys: Vec<Key>) -> (Vec<(String, KeyResponse)>, String) {
    let mut output = String::new();
    let mut steps = Vec::with_capacity(keys.len());
    for Key { label, event } in keys {
        let resp = session.handle_event(event);
        if let Some(text) = &resp.commit {
            output.push_str(text);
        }
        steps.push((label, resp));
    }
    output.push_str(&session.composing_text());
    (steps, output)
}

pub fn feed_cmd(script: &str, keys: &str, settings_file: Option<&str>, json: bool) {
    let script = die!(
        Script::from_name(script).ok_or(script),
        "Error: unknown script {:?} (expected latin, hangul, tibetan or bengali)"
    );
    let mut session = match settings_file {
        Some(path) => {
            let content = die!(fs::read_to_string(path), "Error reading {path}: {}");
            let settings = die!(Settings::from_toml(&content), "Error: {}");
            ComposeSession::with_settings(script, settings)
        }
        None => ComposeSession::new(script),
    };
    let keys = die!(parse_keys(keys), "Error: {}");

    let (steps, output) = feed(&mut session, keys);
    for (label, resp) in &steps {
        if json {
            let step = FeedStep {
                key: label,
                consumed: resp.consumed,
                commit: resp.commit.as_deref(),
                composing: &resp.composing,
            };
            println!("{}", die!(serde_json::to_string(&step), "Error: {}"));
        } else {
            println!(
                "{:<10} {:<8} commit={:<12} composing={:?}",
                label,
                if resp.consumed { "consumed" } else { "passed" },
                format!("{:?}", resp.commit.as_deref().unwrap_or("")),
                resp.composing,
            );
        }
    }
    if !json {
        println!("=> {output}");
    }
}

#[cfg(test)]
mod tests {
    use glyph_core::settings::DEFAULT_TOML;

    use super::*;

    #[test]
    fn parse_plain_and_named_keys() {
        let keys = parse_keys("a<del><Enter><U+0301><lt>").unwrap();
        let labels: Vec<&str> = keys.iter().map(|k| k.label.as_str()).collect();
        assert_eq!(labels, ["a", "<del>", "<Enter>", "<U+0301>", "<lt>"]);
        assert_eq!(keys[0].event.code_point(), Some('a'));
        assert!(keys[1].event.is_delete());
        assert_eq!(keys[2].event.key_code(), key::ENTER);
        assert_eq!(keys[3].event.code_point(), Some('\u{0301}'));
        assert_eq!(keys[4].event.code_point(), Some('<'));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            parse_keys("ab<del").unwrap_err(),
            KeySpecError::Unterminated("del".to_string())
        );
        assert_eq!(
            parse_keys("<tab>").unwrap_err(),
            KeySpecError::UnknownKey("tab".to_string())
        );
        assert_eq!(
            parse_keys("<U+D800>").unwrap_err(),
            KeySpecError::UnknownKey("U+D800".to_string())
        );
    }

    #[test]
    fn feed_collects_commits_and_composing() {
        let settings = Settings::from_toml(DEFAULT_TOML).unwrap();
        let mut session = ComposeSession::with_settings(Script::Hangul, settings);
        let keys = parse_keys("ㅎㅏㄴ<space>ㄱㅡㄹ").unwrap();
        let (steps, output) = feed(&mut session, keys);
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[3].1.commit.as_deref(), Some("한 "));
        assert_eq!(output, "한 글");
    }
}
