//! Hangul jamo composition.
//!
//! The combiner buffers compatibility jamo exactly as typed and recomposes
//! the whole buffer into syllable blocks every time feedback is requested.

use crate::combiner::Combiner;
use crate::event::Event;
use crate::unicode::is_hangul_jamo;

/// Characters that can start a syllable, in syllable-formula order.
const INITIALS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Finals in formula order; index 0 (no final) is implicit.
const FINALS: [char; 27] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ', 'ㅁ',
    'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Initials that become their tense form (next code point) when typed twice.
const DOUBLEABLE_INITIALS: [char; 5] = ['ㄱ', 'ㄷ', 'ㅂ', 'ㅅ', 'ㅈ'];

/// First precomposed syllable (가).
const GA_LOCATION: u32 = 0xAC00;
const FIRST_VOWEL: u32 = 0x314F;
const LAST_VOWEL: u32 = 0x3163;

/// Adjacent jamo that collapse into one compound vowel or final.
const MERGED_CLUSTERS: [(char, char, char); 26] = [
    // vowels
    ('ㅗ', 'ㅏ', 'ㅘ'),
    ('ㅗ', 'ㅐ', 'ㅙ'),
    ('ㅗ', 'ㅣ', 'ㅚ'),
    ('ㅜ', 'ㅓ', 'ㅝ'),
    ('ㅜ', 'ㅔ', 'ㅞ'),
    ('ㅜ', 'ㅣ', 'ㅟ'),
    ('ㅡ', 'ㅣ', 'ㅢ'),
    // single-vowel layouts type the y-vowels as doubled vowels
    ('ㅏ', 'ㅏ', 'ㅑ'),
    ('ㅐ', 'ㅐ', 'ㅒ'),
    ('ㅓ', 'ㅓ', 'ㅕ'),
    ('ㅔ', 'ㅔ', 'ㅖ'),
    ('ㅗ', 'ㅗ', 'ㅛ'),
    ('ㅜ', 'ㅜ', 'ㅠ'),
    // finals
    ('ㄱ', 'ㄱ', 'ㄲ'),
    ('ㄱ', 'ㅅ', 'ㄳ'),
    ('ㄴ', 'ㅈ', 'ㄵ'),
    ('ㄴ', 'ㅎ', 'ㄶ'),
    ('ㄹ', 'ㄱ', 'ㄺ'),
    ('ㄹ', 'ㅁ', 'ㄻ'),
    ('ㄹ', 'ㅂ', 'ㄼ'),
    ('ㄹ', 'ㅅ', 'ㄽ'),
    ('ㄹ', 'ㅌ', 'ㄾ'),
    ('ㄹ', 'ㅍ', 'ㄿ'),
    ('ㄹ', 'ㅎ', 'ㅀ'),
    ('ㅂ', 'ㅅ', 'ㅄ'),
    ('ㅅ', 'ㅅ', 'ㅆ'),
];

fn initial_index(c: char) -> Option<u32> {
    INITIALS.iter().position(|&x| x == c).map(|i| i as u32)
}

fn vowel_index(c: char) -> Option<u32> {
    let code = c as u32;
    (FIRST_VOWEL..=LAST_VOWEL)
        .contains(&code)
        .then(|| code - FIRST_VOWEL)
}

fn final_index(c: char) -> Option<u32> {
    FINALS.iter().position(|&x| x == c).map(|i| i as u32 + 1)
}

fn is_initial(c: char) -> bool {
    initial_index(c).is_some()
}

fn is_vowel(c: char) -> bool {
    vowel_index(c).is_some()
}

fn is_final(c: char) -> bool {
    final_index(c).is_some()
}

fn merge(first: char, second: char) -> Option<char> {
    MERGED_CLUSTERS
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, merged)| merged)
}

/// `GA_LOCATION + 588 * initial + 28 * vowel + final`
pub fn compose_syllable(initial: char, vowel: char, fin: Option<char>) -> Option<char> {
    let i = initial_index(initial)?;
    let v = vowel_index(vowel)?;
    let f = match fin {
        Some(c) => final_index(c)?,
        None => 0,
    };
    char::from_u32(GA_LOCATION + 588 * i + 28 * v + f)
}

fn push_block(out: &mut String, initial: char, vowel: char, fin: Option<char>) {
    match compose_syllable(initial, vowel, fin) {
        Some(block) => out.push(block),
        None => {
            out.push(initial);
            out.push(vowel);
            out.extend(fin);
        }
    }
}

/// The syllable being assembled while walking the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Syllable {
    Empty,
    Initial(char),
    Vowel {
        initial: char,
        vowel: char,
    },
    Final {
        initial: char,
        vowel: char,
        fin: char,
    },
    /// Two finals that merge into a compound final (ㄹ + ㄱ → ㄺ).
    Cluster {
        initial: char,
        vowel: char,
        fin: char,
        fin2: char,
    },
}

impl Syllable {
    /// Feed one jamo. Completed output is appended to `out`.
    fn step(self, c: char, combine_initials: bool, out: &mut String) -> Syllable {
        match self {
            Syllable::Empty => Self::start(c, out),

            Syllable::Initial(initial) => {
                if combine_initials && c == initial && DOUBLEABLE_INITIALS.contains(&initial) {
                    // ㄱ → ㄲ, ㄷ → ㄸ, ...: the tense form is the next code point
                    return char::from_u32(initial as u32 + 1)
                        .map_or(Syllable::Initial(initial), Syllable::Initial);
                }
                if is_vowel(c) {
                    return Syllable::Vowel { initial, vowel: c };
                }
                out.push(initial);
                Self::start(c, out)
            }

            Syllable::Vowel { initial, vowel } => {
                if let Some(merged) = merge(vowel, c) {
                    return Syllable::Vowel {
                        initial,
                        vowel: merged,
                    };
                }
                if is_final(c) {
                    return Syllable::Final {
                        initial,
                        vowel,
                        fin: c,
                    };
                }
                push_block(out, initial, vowel, None);
                Self::start(c, out)
            }

            Syllable::Final {
                initial,
                vowel,
                fin,
            } => {
                if merge(fin, c).is_some() {
                    return Syllable::Cluster {
                        initial,
                        vowel,
                        fin,
                        fin2: c,
                    };
                }
                if is_vowel(c) && is_initial(fin) {
                    // The final moves over to become the next syllable's initial.
                    push_block(out, initial, vowel, None);
                    return Syllable::Vowel {
                        initial: fin,
                        vowel: c,
                    };
                }
                push_block(out, initial, vowel, Some(fin));
                Self::start(c, out)
            }

            Syllable::Cluster {
                initial,
                vowel,
                fin,
                fin2,
            } => {
                if is_vowel(c) && is_initial(fin2) {
                    // The cluster splits: only the second final moves over.
                    push_block(out, initial, vowel, Some(fin));
                    return Syllable::Vowel {
                        initial: fin2,
                        vowel: c,
                    };
                }
                push_block(out, initial, vowel, merge(fin, fin2));
                Self::start(c, out)
            }
        }
    }

    fn start(c: char, out: &mut String) -> Syllable {
        if is_initial(c) {
            Syllable::Initial(c)
        } else {
            out.push(c);
            Syllable::Empty
        }
    }

    fn finish(self, out: &mut String) {
        match self {
            Syllable::Empty => {}
            Syllable::Initial(initial) => out.push(initial),
            Syllable::Vowel { initial, vowel } => push_block(out, initial, vowel, None),
            Syllable::Final {
                initial,
                vowel,
                fin,
            } => push_block(out, initial, vowel, Some(fin)),
            Syllable::Cluster {
                initial,
                vowel,
                fin,
                fin2,
            } => push_block(out, initial, vowel, merge(fin, fin2)),
        }
    }
}

/// Compose a sequence of compatibility jamo into syllable blocks.
pub fn to_blocks(jamo: &str, combine_initials: bool) -> String {
    let mut out = String::with_capacity(jamo.len());
    let state = jamo.chars().fold(Syllable::Empty, |state, c| {
        state.step(c, combine_initials, &mut out)
    });
    state.finish(&mut out);
    out
}

/// Combiner for Korean: buffers one word of uncombined jamo.
///
/// With `combine_initials`, a doubleable initial typed twice (ㄱㄱ) becomes
/// the tense initial (ㄲ). Doubled finals are always combined.
#[derive(Debug, Default)]
pub struct KoreanCombiner {
    combine_initials: bool,
    buffer: String,
}

impl KoreanCombiner {
    pub fn new(combine_initials: bool) -> Self {
        Self {
            combine_initials,
            buffer: String::new(),
        }
    }
}

impl Combiner for KoreanCombiner {
    fn process_event(&mut self, _history: &[Event], event: Event) -> Event {
        if !event.is_keypress() {
            return event;
        }
        match event.code_point() {
            Some(c) if is_hangul_jamo(c) => {
                self.buffer.push(c);
                Event::consumed(&event)
            }
            _ if !self.buffer.is_empty() && event.is_delete() => {
                self.buffer.pop();
                Event::consumed(&event)
            }
            _ => event,
        }
    }

    fn combining_state_feedback(&self) -> String {
        to_blocks(&self.buffer, self.combine_initials)
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn name(&self) -> &'static str {
        "korean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(s: &str) -> String {
        to_blocks(s, false)
    }

    #[test]
    fn syllable_formula() {
        assert_eq!(compose_syllable('ㄱ', 'ㅏ', None), Some('가'));
        assert_eq!(compose_syllable('ㅎ', 'ㅣ', Some('ㅎ')), Some('\u{D7A3}'));
        assert_eq!(compose_syllable('ㅇ', 'ㅏ', Some('ㄱ')), Some('\u{C545}'));
        assert_eq!(compose_syllable('ㄳ', 'ㅏ', None), None);
    }

    #[test]
    fn single_syllables() {
        assert_eq!(blocks("ㅇㅏㄱ"), "악");
        assert_eq!(blocks("ㅎㅏㄴ"), "한");
        assert_eq!(blocks("ㄱㅏㅂㅅ"), "값");
    }

    #[test]
    fn final_becomes_next_initial() {
        assert_eq!(blocks("ㄱㅏㄴㅏ"), "가나");
        assert_eq!(blocks("ㅎㅏㄴㄱㅡㄹ"), "한글");
        assert_eq!(blocks("ㅇㅏㄸㅏ"), "아따");
    }

    #[test]
    fn cluster_splits_before_vowel() {
        assert_eq!(blocks("ㄷㅏㄹㄱ"), "닭");
        assert_eq!(blocks("ㄷㅏㄹㄱㅣ"), "달기");
        assert_eq!(blocks("ㄷㅏㄹㄱㅇㅣ"), "닭이");
        assert_eq!(blocks("ㅇㅓㅂㅅㅇㅓ"), "없어");
        assert_eq!(blocks("ㅇㅓㅂㅅㅓ"), "업서");
    }

    #[test]
    fn compound_vowels() {
        assert_eq!(blocks("ㅇㅗㅏ"), "와");
        assert_eq!(blocks("ㅇㅡㅣ"), "의");
        assert_eq!(blocks("ㄱㅜㅓㄴ"), "권");
        assert_eq!(blocks("ㅇㅏㅏ"), "야");
    }

    #[test]
    fn doubled_final_always_combines() {
        assert_eq!(blocks("ㄱㅏㄱㄱ"), "갂");
        assert_eq!(blocks("ㄱㅏㄱㄱㅏ"), "각가");
        assert_eq!(to_blocks("ㄱㅏㄱㄱ", true), "갂");
    }

    #[test]
    fn doubled_initial_only_with_option() {
        assert_eq!(blocks("ㄱㄱㅏ"), "ㄱ가");
        assert_eq!(to_blocks("ㄱㄱㅏ", true), "까");
        assert_eq!(to_blocks("ㅈㅈㅏ", true), "짜");
        // ㄴ is not doubleable
        assert_eq!(to_blocks("ㄴㄴㅏ", true), "ㄴ나");
    }

    #[test]
    fn lone_jamo_pass_through() {
        assert_eq!(blocks("ㅏ"), "ㅏ");
        assert_eq!(blocks("ㅏㄱ"), "ㅏㄱ");
        assert_eq!(blocks("ㄱ"), "ㄱ");
        assert_eq!(blocks("ㄱㄴ"), "ㄱㄴ");
        assert_eq!(blocks(""), "");
    }

    #[test]
    fn compound_final_typed_directly_stays_final() {
        assert_eq!(blocks("ㄱㅏㄳ"), "갃");
        assert_eq!(blocks("ㄱㅏㄳㅏ"), "갃ㅏ");
    }

    #[test]
    fn non_syllable_jamo_after_block_keeps_order() {
        // ㅄ can't merge with ㄴ, isn't a vowel and isn't an initial.
        assert_eq!(blocks("ㄱㅏㄴㅄ"), "간ㅄ");
    }

    #[test]
    fn combiner_consumes_jamo_and_passes_others() {
        let mut c = KoreanCombiner::new(false);
        for ch in "ㅎㅏㄴ".chars() {
            assert!(c.process_event(&[], Event::from_char(ch)).is_consumed());
        }
        assert_eq!(c.combining_state_feedback(), "한");
        let space = Event::from_char(' ');
        assert_eq!(c.process_event(&[], space.clone()), space);
        let latin = Event::from_char('a');
        assert_eq!(c.process_event(&[], latin.clone()), latin);
        assert_eq!(c.combining_state_feedback(), "한");
    }

    #[test]
    fn delete_removes_one_jamo() {
        let mut c = KoreanCombiner::new(false);
        for ch in "ㄷㅏㄹㄱ".chars() {
            c.process_event(&[], Event::from_char(ch));
        }
        let expected = ["달", "다", "ㄷ", ""];
        for want in expected {
            assert!(c.process_event(&[], Event::delete()).is_consumed());
            assert_eq!(c.combining_state_feedback(), want);
        }
        let del = Event::delete();
        assert_eq!(c.process_event(&[], del.clone()), del);
    }

    #[test]
    fn text_events_are_ignored() {
        let mut c = KoreanCombiner::new(false);
        let e = Event::software_text("ㄱ", crate::key::MULTIPLE_CODE_POINTS, None);
        assert_eq!(c.process_event(&[], e.clone()), e);
        assert_eq!(c.combining_state_feedback(), "");
    }

    #[test]
    fn reset_clears_buffer() {
        let mut c = KoreanCombiner::new(true);
        c.process_event(&[], Event::from_char('ㄱ'));
        c.reset();
        assert_eq!(c.combining_state_feedback(), "");
    }

    mod pass_through {
        use proptest::prelude::*;

        use super::*;

        fn non_jamo() -> impl Strategy<Value = char> {
            any::<char>().prop_filter("outside compatibility jamo", |&c| !is_hangul_jamo(c))
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn idle_combiner_returns_event(c in non_jamo()) {
                let mut k = KoreanCombiner::new(false);
                let event = Event::from_char(c);
                prop_assert_eq!(k.process_event(&[], event.clone()), event);
                prop_assert_eq!(k.combining_state_feedback(), "");
            }

            #[test]
            fn composing_combiner_keeps_block(c in non_jamo()) {
                let mut k = KoreanCombiner::new(false);
                k.process_event(&[], Event::from_char('ㄱ'));
                k.process_event(&[], Event::from_char('ㅏ'));
                let event = Event::from_char(c);
                prop_assert_eq!(k.process_event(&[], event.clone()), event);
                prop_assert_eq!(k.combining_state_feedback(), "가");
            }
        }
    }
}
