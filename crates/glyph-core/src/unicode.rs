//! Character-level classification used by the combiners.

use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

/// Combining Diacritical Marks handled as dead keys (U+0300..U+035B).
pub fn is_combining_diacritical(c: char) -> bool {
    ('\u{0300}'..='\u{035B}').contains(&c)
}

/// Hangul Compatibility Jamo letters (U+3131..U+3163).
pub fn is_hangul_jamo(c: char) -> bool {
    ('\u{3131}'..='\u{3163}').contains(&c)
}

/// Letters and marks (general categories L* and M*): what the NFC combiner
/// keeps buffering. Letter numbers and circled letters do not count.
pub fn is_letter_or_mark(c: char) -> bool {
    matches!(
        c.general_category_group(),
        GeneralCategoryGroup::Letter | GeneralCategoryGroup::Mark
    )
}

/// ASCII characters that can be part of an Extended Wylie syllable.
pub fn is_wylie_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '\'' | '+' | '-' | '.' | '~' | '`' | '&' | '?')
}
