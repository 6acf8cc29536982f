use super::Transliterator;

/// Subjoined consonants sit 0x50 above their base forms.
const SUBJOINED_OFFSET: u32 = 0x50;
const LETTER_A: char = '\u{0F68}';
const TSEK: char = '\u{0F0B}';
const SHAD: char = '\u{0F0D}';
const DIGIT_ZERO: u32 = 0x0F20;

const CONSONANTS: &[(&str, char)] = &[
    ("k", '\u{0F40}'),
    ("kh", '\u{0F41}'),
    ("g", '\u{0F42}'),
    ("gh", '\u{0F43}'),
    ("ng", '\u{0F44}'),
    ("c", '\u{0F45}'),
    ("ch", '\u{0F46}'),
    ("j", '\u{0F47}'),
    ("ny", '\u{0F49}'),
    ("T", '\u{0F4A}'),
    ("Th", '\u{0F4B}'),
    ("D", '\u{0F4C}'),
    ("Dh", '\u{0F4D}'),
    ("N", '\u{0F4E}'),
    ("t", '\u{0F4F}'),
    ("th", '\u{0F50}'),
    ("d", '\u{0F51}'),
    ("dh", '\u{0F52}'),
    ("n", '\u{0F53}'),
    ("p", '\u{0F54}'),
    ("ph", '\u{0F55}'),
    ("b", '\u{0F56}'),
    ("bh", '\u{0F57}'),
    ("m", '\u{0F58}'),
    ("ts", '\u{0F59}'),
    ("tsh", '\u{0F5A}'),
    ("dz", '\u{0F5B}'),
    ("dzh", '\u{0F5C}'),
    ("w", '\u{0F5D}'),
    ("zh", '\u{0F5E}'),
    ("z", '\u{0F5F}'),
    ("'", '\u{0F60}'),
    ("y", '\u{0F61}'),
    ("r", '\u{0F62}'),
    ("l", '\u{0F63}'),
    ("sh", '\u{0F64}'),
    ("Sh", '\u{0F65}'),
    ("s", '\u{0F66}'),
    ("h", '\u{0F67}'),
];

/// Vowel signs. `a` is the inherent vowel and adds nothing.
const VOWELS: &[(&str, &str)] = &[
    ("a", ""),
    ("A", "\u{0F71}"),
    ("i", "\u{0F72}"),
    ("I", "\u{0F71}\u{0F72}"),
    ("u", "\u{0F74}"),
    ("U", "\u{0F71}\u{0F74}"),
    ("e", "\u{0F7A}"),
    ("ai", "\u{0F7B}"),
    ("o", "\u{0F7C}"),
    ("au", "\u{0F7D}"),
    ("-i", "\u{0F80}"),
    ("-I", "\u{0F71}\u{0F80}"),
];

const MARKS: &[(&str, &str)] = &[
    ("M", "\u{0F7E}"),
    ("~M", "\u{0F83}"),
    ("~M`", "\u{0F82}"),
    ("H", "\u{0F7F}"),
    ("?", "\u{0F84}"),
    ("&", "\u{0F85}"),
];

const MAX_TOKEN_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Consonant(&'static str, char),
    Vowel(&'static str),
    Mark(&'static str),
    /// `+`: stack the neighbouring consonants.
    Plus,
    /// `.`: keep the neighbouring consonants apart.
    Dot,
    /// Space, `/` and digits: end the word.
    Punct(char),
    Other(char),
}

fn lookup<V: Copy>(table: &[(&'static str, V)], key: &str) -> Option<(&'static str, V)> {
    table.iter().find(|(k, _)| *k == key).copied()
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = text;
    'outer: while let Some(c) = rest.chars().next() {
        for len in (1..=MAX_TOKEN_LEN).rev() {
            let Some(chunk) = rest.get(..len) else {
                continue;
            };
            let token = if let Some((_, sign)) = lookup(MARKS, chunk) {
                Token::Mark(sign)
            } else if let Some((_, sign)) = lookup(VOWELS, chunk) {
                Token::Vowel(sign)
            } else if let Some((key, letter)) = lookup(CONSONANTS, chunk) {
                Token::Consonant(key, letter)
            } else {
                continue;
            };
            tokens.push(token);
            rest = &rest[len..];
            continue 'outer;
        }
        tokens.push(match c {
            '+' => Token::Plus,
            '.' => Token::Dot,
            ' ' => Token::Punct(TSEK),
            '/' => Token::Punct(SHAD),
            '0'..='9' => Token::Punct(
                char::from_u32(DIGIT_ZERO + (c as u32 - '0' as u32)).unwrap_or(c),
            ),
            _ => Token::Other(c),
        });
        rest = &rest[c.len_utf8()..];
    }
    tokens
}

fn superscript_over(top: &str, below: &str) -> bool {
    let allowed: &[&str] = match top {
        "r" => &["k", "g", "ng", "j", "ny", "t", "d", "n", "b", "m", "ts", "dz"],
        "l" => &["k", "g", "ng", "c", "j", "t", "d", "p", "b", "h"],
        "s" => &["k", "g", "ng", "ny", "t", "d", "n", "p", "b", "m", "ts"],
        _ => return false,
    };
    allowed.contains(&below)
}

fn subscript_under(sub: &str, above: &str) -> bool {
    let allowed: &[&str] = match sub {
        "y" => &["k", "kh", "g", "p", "ph", "b", "m"],
        "r" => &[
            "k", "kh", "g", "t", "th", "d", "n", "p", "ph", "b", "m", "sh", "s", "h", "dz",
        ],
        "l" => &["k", "g", "b", "r", "s", "z"],
        "w" => &[
            "k", "kh", "g", "c", "ny", "t", "d", "ts", "tsh", "zh", "z", "r", "l", "sh", "s", "h",
        ],
        _ => return false,
    };
    allowed.contains(&above)
}

/// A root letter with up to two subscripts (the second one only `w`).
fn is_rooted_stack(keys: &[&str]) -> bool {
    match keys {
        [_] => true,
        [root, sub] => subscript_under(sub, root),
        [root, sub, "w"] => subscript_under(sub, root),
        _ => false,
    }
}

/// Whether the consonants can be written as one stack without `+`.
fn is_stack(keys: &[&str]) -> bool {
    match keys {
        [top, rest @ ..] if !rest.is_empty() && superscript_over(top, rest[0]) => {
            is_rooted_stack(rest)
        }
        _ => is_rooted_stack(keys),
    }
}

fn push_stack(out: &mut String, letters: &[char]) {
    let mut iter = letters.iter();
    out.extend(iter.next());
    for &c in iter {
        out.push(char::from_u32(c as u32 + SUBJOINED_OFFSET).unwrap_or(c));
    }
}

/// Split a consonant run into stacks.
///
/// With explicit `+`, only `+`-joined consonants stack. Otherwise the
/// longest valid stack at the end of the run carries the vowel and the
/// consonants before it (prefixes, or suffixes of a previous syllable) stand
/// alone.
fn split_run(run: &[Token], carries_vowel: bool) -> Vec<Vec<char>> {
    let forced = run.contains(&Token::Plus);
    let letters: Vec<(&str, char)> = run
        .iter()
        .filter_map(|t| match *t {
            Token::Consonant(key, letter) => Some((key, letter)),
            _ => None,
        })
        .collect();

    if forced {
        let mut stacks: Vec<Vec<char>> = Vec::new();
        let mut joined = false;
        for t in run {
            match *t {
                Token::Plus => joined = true,
                Token::Consonant(_, letter) => {
                    match stacks.last_mut() {
                        Some(stack) if joined => stack.push(letter),
                        _ => stacks.push(vec![letter]),
                    }
                    joined = false;
                }
                _ => {}
            }
        }
        return stacks;
    }

    if !carries_vowel {
        return letters.iter().map(|&(_, c)| vec![c]).collect();
    }

    let keys: Vec<&str> = letters.iter().map(|&(k, _)| k).collect();
    let n = keys.len();
    let stack_len = (1..=n.min(4))
        .rev()
        .find(|&len| is_stack(&keys[n - len..]))
        .unwrap_or(1);
    let mut stacks: Vec<Vec<char>> = letters[..n - stack_len]
        .iter()
        .map(|&(_, c)| vec![c])
        .collect();
    stacks.push(letters[n - stack_len..].iter().map(|&(_, c)| c).collect());
    stacks
}

/// Built-in Extended Wylie engine.
///
/// Covers consonants (with the retroflex capitals), vowels and long vowels,
/// `-i`, superscript/subscript stacking, prefixes, `+` and `.`, the common
/// post-vowel marks, tsek (space), shad (`/`) and digits. Anything else is
/// copied through.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ewts;

impl Transliterator for Ewts {
    fn to_unicode(&self, wylie: &str) -> String {
        let tokens = tokenize(wylie);
        let mut out = String::with_capacity(wylie.len() * 3);
        let mut word_start = true;
        let mut i = 0;

        while i < tokens.len() {
            match tokens[i] {
                Token::Consonant(..) | Token::Plus => {
                    let end = tokens[i..]
                        .iter()
                        .position(|t| !matches!(t, Token::Consonant(..) | Token::Plus))
                        .map_or(tokens.len(), |p| i + p);
                    let vowel = match tokens.get(end) {
                        Some(Token::Vowel(sign)) => Some(*sign),
                        _ => None,
                    };
                    // Bare consonants at the start of a word are shown
                    // stacked, as they will be once the vowel is typed.
                    for stack in split_run(&tokens[i..end], vowel.is_some() || word_start) {
                        push_stack(&mut out, &stack);
                    }
                    i = end;
                    if let Some(sign) = vowel {
                        out.push_str(sign);
                        i += 1;
                    }
                    word_start = false;
                    continue;
                }
                Token::Vowel(sign) => {
                    out.push(LETTER_A);
                    out.push_str(sign);
                    word_start = false;
                }
                Token::Mark(sign) => out.push_str(sign),
                Token::Dot => {}
                Token::Punct(c) | Token::Other(c) => {
                    out.push(c);
                    word_start = true;
                }
            }
            i += 1;
        }
        out
    }
}
