//! Input preprocessor for the name parser.
//!
//! Raw name-strings arrive dirty: HTML markup from web scrapes, curly
//! quotes, non-breaking spaces, virus names, specimen codes. The
//! preprocessor turns the raw string into a clean buffer the grammar can
//! parse, and detects inputs that should not reach the grammar at all.
//!
//! The cleaned buffer stays as close to the input as possible: markers are
//! detected, whitespace and punctuation are normalized, everything else is
//! untouched. Warnings record each normalization so it shows up in the
//! parse quality.

mod markers;

use nomen_ir::{Surrogate, Warning};

pub use markers::strip_html;

/// Preprocessor switches, a subset of the facade options.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrepOptions {
    /// Strip the known set of HTML tags and decode basic entities.
    pub ignore_html_tags: bool,
    /// Upper-case a lower-case leading letter.
    pub with_capitalization: bool,
}

/// Result of preprocessing one name-string.
#[derive(Clone, Debug, Default)]
pub struct Preprocessed {
    /// Cleaned text for the grammar. Word positions in the parser output
    /// are rune offsets into this buffer.
    pub buffer: String,
    /// Input is a virus/phage/viroid name; parsing is skipped.
    pub virus: bool,
    /// Input contains a surrogate marker (BOLD or specimen code);
    /// parsing is skipped.
    pub surrogate: Option<Surrogate>,
    /// A `Candidatus` prefix was found and removed.
    pub bacteria_maybe: bool,
    /// An annotation was detected (Candidatus prefix or trailing marker).
    pub annotation: bool,
    /// Rune offset into `buffer` where a trailing annotation begins; the
    /// grammar only sees the text before it.
    pub tail_offset: Option<usize>,
    /// Normalization warnings to merge into the parse result.
    pub warnings: Vec<Warning>,
}

/// Clean a raw name-string and detect markers.
///
/// Never fails; inputs with no markers come back with an empty flag set
/// and a buffer equal to the (whitespace-normalized) input.
pub fn preprocess(raw: &str, opts: PrepOptions) -> Preprocessed {
    let mut res = Preprocessed::default();
    let mut text = raw.to_string();

    if opts.ignore_html_tags {
        let stripped = markers::strip_html(&text);
        if stripped != text {
            res.warnings.push(Warning::HtmlTagsEntities);
            text = stripped;
        }
    }

    if markers::is_virus(&text) {
        res.virus = true;
        res.buffer = text;
        return res;
    }
    if let Some(kind) = markers::surrogate_kind(&text) {
        res.surrogate = Some(kind);
        res.buffer = text;
        return res;
    }

    normalize(&mut text, &mut res.warnings);

    if let Some(rest) = text.strip_prefix("Candidatus ") {
        res.bacteria_maybe = true;
        res.annotation = true;
        res.warnings.push(Warning::CandidatusName);
        text = rest.trim_start().to_string();
    }

    if opts.with_capitalization {
        if let Some(first) = text.chars().next() {
            if first.is_lowercase() && first.is_alphabetic() {
                let mut capitalized = first.to_uppercase().collect::<String>();
                capitalized.push_str(&text[first.len_utf8()..]);
                text = capitalized;
                res.warnings.push(Warning::LowCase);
            }
        }
    }

    if let Some(byte_offset) = markers::annotation_offset(&text) {
        res.annotation = true;
        res.tail_offset = Some(text[..byte_offset].chars().count());
    }

    res.buffer = text;
    res
}

/// Normalize quotes, dashes and whitespace in place.
fn normalize(text: &mut String, warnings: &mut Vec<Warning>) {
    let mut out = String::with_capacity(text.len());
    let mut nonstandard_space = false;
    let mut other_apostrophe = false;

    for c in text.chars() {
        match c {
            '\u{2019}' | '\u{2018}' | '\u{00B4}' | '\u{02BC}' | '\u{2032}' | '`' => {
                other_apostrophe = true;
                out.push('\'');
            }
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\t' | '\n' | '\r' | '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}'
            | '\u{205F}' | '\u{3000}' => {
                nonstandard_space = true;
                out.push(' ');
            }
            '_' => out.push(' '),
            _ => out.push(c),
        }
    }

    let mut collapsed = String::with_capacity(out.len());
    let mut multiple = false;
    let mut prev_space = false;
    for c in out.chars() {
        if c == ' ' {
            if prev_space {
                multiple = true;
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        collapsed.push(c);
    }

    let trimmed = collapsed.trim();
    if other_apostrophe {
        warnings.push(Warning::ApostrOther);
    }
    if nonstandard_space {
        warnings.push(Warning::SpaceNonStandard);
    }
    if multiple {
        warnings.push(Warning::SpaceMultiple);
    }
    *text = trimmed.to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prep(raw: &str) -> Preprocessed {
        preprocess(raw, PrepOptions::default())
    }

    #[test]
    fn clean_input_passes_through() {
        let res = prep("Betula alba L.");
        assert_eq!(res.buffer, "Betula alba L.");
        assert!(res.warnings.is_empty());
        assert!(!res.virus && res.surrogate.is_none() && !res.bacteria_maybe);
        assert_eq!(res.tail_offset, None);
    }

    #[test]
    fn detects_viruses() {
        for name in [
            "Vesicular stomatitis Indiana virus",
            "Aeromonas phage 65",
            "Apple scar skin viroid",
            "Cytomegalovirus sp.",
        ] {
            assert!(prep(name).virus, "{name} should be a virus");
        }
        assert!(!prep("Betula alba").virus);
    }

    #[test]
    fn detects_surrogates() {
        assert_eq!(
            prep("Coleoptera BOLD:AAV0432").surrogate,
            Some(Surrogate::BoldSurrogate)
        );
        assert_eq!(
            prep("Fungal sp. SH1234567").surrogate,
            Some(Surrogate::Surrogate)
        );
        assert_eq!(prep("Betula alba").surrogate, None);
    }

    #[test]
    fn candidatus_prefix_sets_bacteria_maybe() {
        let res = prep("Candidatus Arsenophonus triatominarum");
        assert!(res.bacteria_maybe);
        assert!(res.annotation);
        assert_eq!(res.buffer, "Arsenophonus triatominarum");
        assert!(res.warnings.contains(&Warning::CandidatusName));
    }

    #[test]
    fn collapses_and_normalizes_whitespace() {
        let res = prep("Betula\u{00A0} alba\t L. ");
        assert_eq!(res.buffer, "Betula alba L.");
        assert!(res.warnings.contains(&Warning::SpaceNonStandard));
        assert!(res.warnings.contains(&Warning::SpaceMultiple));
    }

    #[test]
    fn normalizes_curly_apostrophes() {
        let res = prep("Junellia o\u{2019}donelli");
        assert_eq!(res.buffer, "Junellia o'donelli");
        assert!(res.warnings.contains(&Warning::ApostrOther));
    }

    #[test]
    fn underscores_become_spaces() {
        let res = prep("Betula_alba");
        assert_eq!(res.buffer, "Betula alba");
    }

    #[test]
    fn capitalization_is_opt_in() {
        let opts = PrepOptions {
            with_capitalization: true,
            ..PrepOptions::default()
        };
        let res = preprocess("betula alba", opts);
        assert_eq!(res.buffer, "Betula alba");
        assert!(res.warnings.contains(&Warning::LowCase));

        let res = prep("betula alba");
        assert_eq!(res.buffer, "betula alba");
    }

    #[test]
    fn capitalization_leaves_upper_case_alone() {
        let opts = PrepOptions {
            with_capitalization: true,
            ..PrepOptions::default()
        };
        let res = preprocess("Betula alba", opts);
        assert!(res.warnings.is_empty());
    }

    #[test]
    fn html_stripping_is_opt_in() {
        let opts = PrepOptions {
            ignore_html_tags: true,
            ..PrepOptions::default()
        };
        let res = preprocess("Homo sapiens <i>Linnaeus</i>, 1758", opts);
        assert_eq!(res.buffer, "Homo sapiens Linnaeus, 1758");
        assert!(res.warnings.contains(&Warning::HtmlTagsEntities));

        let res = prep("Homo sapiens <i>Linnaeus</i>, 1758");
        assert!(res.buffer.contains("<i>"));
    }

    #[test]
    fn annotation_marks_tail_offset() {
        let res = prep("Pomatomus saltatrix environmental sample");
        assert!(res.annotation);
        let off = res.tail_offset.expect("tail offset");
        let head: String = res.buffer.chars().take(off).collect();
        assert_eq!(head, "Pomatomus saltatrix");
    }

    #[test]
    fn no_annotation_no_tail_offset() {
        assert_eq!(prep("Pomatomus saltatrix").tail_offset, None);
    }
}
