//! Character classification tables for scientific-name parsing.
//!
//! These predicates are the single authority for Unicode membership checks
//! in the grammar and the normalizer. Grammar rules call into this crate
//! instead of inlining character ranges, so the curated sets live in exactly
//! one place.
//!
//! # Character classes
//!
//! - **Latin upper/lower**: plain ASCII `A-Z` / `a-z`, the backbone of
//!   Latin scientific names.
//! - **Name upper/lower**: the letters allowed inside genus and epithet
//!   words. Slightly wider than ASCII: a few ligatures and accented letters
//!   occur in historical spellings (`Œnothera`, `coërulescens`).
//! - **Author upper/lower**: author names carry a much wider set of
//!   diacritics (`Müller`, `Şahin`, `Łukasz`). The sets are curated, not
//!   derived from Unicode categories; they were collected from real
//!   authorship strings.
//! - **Greek rank letters**: deprecated infraspecific enumeration
//!   (`Aus bus β cus`).
//! - **Miscoded glyph**: U+FFFD, the replacement character left behind by
//!   broken encoding conversions.
//!
//! # Folding
//!
//! [`fold_name_char`] maps the extended name letters to their ASCII
//! canonical spelling (`é → e`, `Œ → Oe`). Canonical forms are ASCII-only;
//! the normalizer uses this table and reports the fold as a warning.

mod tables;

pub use tables::fold_name_char;

/// Plain ASCII upper-case Latin letter (`A-Z`).
#[inline]
pub fn is_latin_upper(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// Plain ASCII lower-case Latin letter (`a-z`).
#[inline]
pub fn is_latin_lower(c: char) -> bool {
    c.is_ascii_lowercase()
}

/// ASCII decimal digit.
#[inline]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// The only dash recognized inside words. The preprocessor folds en and em
/// dashes down to this one.
#[inline]
pub fn is_dash(c: char) -> bool {
    c == '-'
}

/// The only apostrophe recognized inside words. Curly apostrophes are
/// normalized away before parsing.
#[inline]
pub fn is_apostrophe(c: char) -> bool {
    c == '\''
}

/// Upper-case letter usable at the head of a genus or uninomial word:
/// ASCII upper plus the extended set (`Æ`, `Œ`, `Ö`).
#[inline]
pub fn is_name_upper(c: char) -> bool {
    c.is_ascii_uppercase() || matches!(c, 'Æ' | 'Œ' | 'Ö')
}

/// Lower-case letter usable inside a name word: ASCII lower, the extended
/// accented set, or the miscoded replacement glyph.
#[inline]
pub fn is_name_lower(c: char) -> bool {
    c.is_ascii_lowercase() || is_name_lower_extended(c) || is_misencoded(c)
}

/// Extended lower-case letters seen in historical name spellings.
///
/// The set is curated from letters observed in real name data; do not
/// "complete" it from Unicode categories.
#[inline]
pub fn is_name_lower_extended(c: char) -> bool {
    matches!(
        c,
        'æ' | 'œ'
            | 'à'
            | 'â'
            | 'å'
            | 'ã'
            | 'ä'
            | 'á'
            | 'ç'
            | 'č'
            | 'é'
            | 'è'
            | 'ë'
            | 'í'
            | 'ì'
            | 'ï'
            | 'ň'
            | 'ñ'
            | 'ó'
            | 'ò'
            | 'ô'
            | 'ø'
            | 'õ'
            | 'ö'
            | 'ú'
            | 'ù'
            | 'ü'
            | 'ŕ'
            | 'ř'
            | 'ŗ'
            | 'ſ'
            | 'š'
            | 'ş'
            | 'ž'
    )
}

/// Upper-case letter usable inside an author word.
///
/// ASCII upper union a curated diacritic set (includes `Œ` and `Æ`).
pub fn is_author_upper(c: char) -> bool {
    if c.is_ascii_uppercase() {
        return true;
    }
    matches!(
        c,
        'À' | 'Á'
            | 'Â'
            | 'Ã'
            | 'Ä'
            | 'Å'
            | 'Æ'
            | 'Ç'
            | 'È'
            | 'É'
            | 'Ê'
            | 'Ë'
            | 'Ì'
            | 'Í'
            | 'Î'
            | 'Ï'
            | 'Ð'
            | 'Ñ'
            | 'Ò'
            | 'Ó'
            | 'Ô'
            | 'Õ'
            | 'Ö'
            | 'Ø'
            | 'Ù'
            | 'Ú'
            | 'Û'
            | 'Ü'
            | 'Ý'
            | 'Ć'
            | 'Č'
            | 'Ď'
            | 'İ'
            | 'Ķ'
            | 'Ĺ'
            | 'ĺ'
            | 'Ľ'
            | 'ľ'
            | 'Ł'
            | 'ł'
            | 'Ņ'
            | 'Ō'
            | 'Ő'
            | 'Œ'
            | 'Ř'
            | 'Ś'
            | 'Ŝ'
            | 'Ş'
            | 'Š'
            | 'Ÿ'
            | 'Ź'
            | 'Ż'
            | 'Ž'
            | 'ƒ'
            | 'Ǿ'
            | 'Ș'
            | 'Ț'
    )
}

/// Lower-case letter usable inside an author word.
///
/// ASCII lower union a curated diacritic set. The apostrophe is a member:
/// it glues prefixes like `d'` and `O'` into author words.
pub fn is_author_lower(c: char) -> bool {
    if c.is_ascii_lowercase() {
        return true;
    }
    matches!(
        c,
        'à' | 'á'
            | 'â'
            | 'ã'
            | 'ä'
            | 'å'
            | 'æ'
            | 'ç'
            | 'è'
            | 'é'
            | 'ê'
            | 'ë'
            | 'ì'
            | 'í'
            | 'î'
            | 'ï'
            | 'ð'
            | 'ñ'
            | 'ò'
            | 'ó'
            | 'ô'
            | 'õ'
            | 'ö'
            | 'ø'
            | 'ù'
            | 'ú'
            | 'û'
            | 'ü'
            | 'ý'
            | 'ÿ'
            | 'ā'
            | 'ă'
            | 'ą'
            | 'ć'
            | 'ĉ'
            | 'č'
            | 'ď'
            | 'đ'
            | '\''
            | 'ē'
            | 'ĕ'
            | 'ė'
            | 'ę'
            | 'ě'
            | 'ğ'
            | 'ī'
            | 'ĭ'
            | 'İ'
            | 'ı'
            | 'ĺ'
            | 'ľ'
            | 'ł'
            | 'ń'
            | 'ņ'
            | 'ň'
            | 'ŏ'
            | 'ő'
            | 'œ'
            | 'ŕ'
            | 'ř'
            | 'ś'
            | 'ş'
            | 'š'
            | 'ţ'
            | 'ť'
            | 'ũ'
            | 'ū'
            | 'ŭ'
            | 'ů'
            | 'ű'
            | 'ź'
            | 'ż'
            | 'ž'
            | 'ſ'
            | 'ǎ'
            | 'ǔ'
            | 'ǧ'
            | 'ș'
            | 'ț'
            | 'ȳ'
            | 'ß'
    )
}

/// Greek letters used as deprecated infraspecific rank markers.
#[inline]
pub fn is_greek_rank(c: char) -> bool {
    matches!(c, 'α' | 'β' | 'γ' | 'δ' | 'ε' | 'φ' | 'θ' | 'μ')
}

/// The Unicode replacement character left behind by a broken encoding
/// conversion upstream of the parser.
#[inline]
pub fn is_misencoded(c: char) -> bool {
    c == '\u{FFFD}'
}
