//! Latin stemmer for scientific-name epithets.
//!
//! Epithets of the same word differ by Latin inflection (`alba`, `albus`,
//! `album`). Matching pipelines compare names by a suffix-stripped *stem*
//! instead, so that all three collapse to `alb`.
//!
//! The algorithm:
//!
//! 1. Latinize the word: `j → i`, `v → u`, diaereses and other accents
//!    folded to ASCII.
//! 2. Handle the `-que` enclitic: words on the exception list (`atque`,
//!    `usque`, `torque`, ...) are real words ending in "que" and are
//!    returned latinized but otherwise untouched; for anything else the
//!    `que` is stripped and stemming continues.
//! 3. Strip the longest matching inflection suffix from the table.
//! 4. A stem shorter than three runes is discarded and the latinized form
//!    is returned instead.
//!
//! [`stem_canonical`] applies the same rules to a whole canonical string,
//! leaving capitalized words (genus positions) and the hybrid/chimera signs
//! `×` and `+` in place.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Result of stemming a single word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stemmed {
    /// The suffix-stripped matching form.
    pub stem: String,
    /// The latinized form the stem was derived from.
    pub latinized: String,
}

/// Inflection suffixes, longest first. Ties keep table order.
///
/// Each suffix is replaced by the empty string; the stem is whatever
/// precedes it.
const SUFFIXES: &[&str] = &[
    "issimus", "issimum", "issima", "iorum", "ierum", "aceus", "aceum", "ensis", "arum", "orum",
    "imus", "imum", "acea", "atum", "atus", "ense", "icus", "icum", "ima", "ata", "ica", "iae",
    "ii", "ae", "us", "um", "is", "os", "as", "es", "a", "i", "e", "o",
];

/// Words that genuinely end in `-que` and must not lose the enclitic.
static QUE_EXCEPTIONS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "atque",
        "quoque",
        "neque",
        "itaque",
        "namque",
        "absque",
        "apsque",
        "abusque",
        "adaeque",
        "adusque",
        "conteque",
        "denique",
        "deque",
        "susque",
        "oblique",
        "peraeque",
        "plenisque",
        "quandoque",
        "quisque",
        "quaeque",
        "cuiusque",
        "quousque",
        "ubique",
        "undique",
        "usque",
        "uterque",
        "utique",
        "utroque",
        "utribique",
        "torque",
        "coque",
        "concoque",
        "contorque",
        "detorque",
        "decoque",
        "excoque",
        "extorque",
        "obtorque",
        "optorque",
        "retorque",
        "recoque",
        "attorque",
        "incoque",
        "intorque",
        "praetorque",
    ]
    .into_iter()
    .collect()
});

/// Latinize a word: `j → i`, `v → u`, extended letters folded to ASCII.
fn latinize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        match c {
            'j' => out.push('i'),
            'v' => out.push('u'),
            'J' => out.push('I'),
            'V' => out.push('U'),
            _ => match nomen_chars::fold_name_char(c) {
                Some(folded) => out.push_str(folded),
                None => out.push(c),
            },
        }
    }
    out
}

/// Stem a single Latin word.
pub fn stem(word: &str) -> Stemmed {
    let latinized = latinize(word);

    let mut body = latinized.as_str();
    if let Some(stripped) = body.strip_suffix("que") {
        if QUE_EXCEPTIONS.contains(body) {
            return Stemmed {
                stem: latinized.clone(),
                latinized,
            };
        }
        body = stripped;
    }

    let mut stem = body;
    for sufx in SUFFIXES {
        if let Some(stripped) = body.strip_suffix(sufx) {
            stem = stripped;
            break;
        }
    }

    if stem.chars().count() < 3 {
        stem = latinized.as_str();
    }

    Stemmed {
        stem: stem.to_string(),
        latinized: latinized.clone(),
    }
}

/// Stem every epithet of a canonical name string.
///
/// Tokens are space-separated. Capitalized tokens sit in genus positions
/// and keep their spelling (ASCII-folded only); the hybrid sign `×` and the
/// graft-chimera sign `+` pass through verbatim.
pub fn stem_canonical(canonical: &str) -> String {
    let mut out = String::with_capacity(canonical.len());
    for (i, token) in canonical.split(' ').filter(|t| !t.is_empty()).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if token == "×" || token == "+" {
            out.push_str(token);
        } else if token.chars().next().is_some_and(nomen_chars::is_name_upper) {
            for c in token.chars() {
                match nomen_chars::fold_name_char(c) {
                    Some(folded) => out.push_str(folded),
                    None => out.push(c),
                }
            }
        } else {
            out.push_str(&stem(token).stem);
        }
    }
    out
}
