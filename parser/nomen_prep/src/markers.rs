//! Marker detection: viruses, surrogates, annotations, HTML.

use once_cell::sync::Lazy;
use regex::Regex;

/// Virus, phage, viroid and friends. These names live outside the
/// nomenclatural codes the grammar covers.
static VIRUS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b([a-z]*virus(es)?|phage(s)?|viroid(s)?|virophage(s)?|prion(s)?|npv|ictv|satellite(s)?)\b",
    )
    .expect("virus pattern")
});

/// Surrogate identifiers: BOLD barcode bins and UNITE species-hypothesis
/// codes. The `SH` pattern is case-sensitive on purpose; lower-case "sh"
/// starts real epithets.
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bbold:").expect("bold pattern"));
static SPECIMEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bSH\d{4,}").expect("specimen pattern"));

/// Trailing annotations that end the formal part of a name.
static ANNOTATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\s(environmental sample(s)?|environmental|species group|species complex|clone|(un)?cultured)\b",
    )
    .expect("annotation pattern")
});

/// Tags commonly left behind by web rendering; removed by textual match,
/// inner text preserved.
static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?\s*(i|b|em|strong|u|sup|sub|small|big|tt|abbr|span)\s*/?>")
        .expect("html tag pattern")
});

static HTML_ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(amp|lt|gt|quot|apos|nbsp|#x?[0-9a-fA-F]+);").expect("html entity pattern")
});

pub(crate) fn is_virus(text: &str) -> bool {
    VIRUS_RE.is_match(text)
}

pub(crate) fn surrogate_kind(text: &str) -> Option<nomen_ir::Surrogate> {
    if BOLD_RE.is_match(text) {
        Some(nomen_ir::Surrogate::BoldSurrogate)
    } else if SPECIMEN_RE.is_match(text) {
        Some(nomen_ir::Surrogate::Surrogate)
    } else {
        None
    }
}

/// Byte offset where a trailing annotation begins, if any.
///
/// The offset points at the whitespace before the marker, so the formal
/// head of the name excludes it entirely. An annotation at the very start
/// of the string is not a tail and is ignored.
pub(crate) fn annotation_offset(text: &str) -> Option<usize> {
    ANNOTATION_RE.find(text).map(|m| m.start()).filter(|&s| s > 0)
}

/// Remove the known HTML tags and decode basic entities.
pub fn strip_html(text: &str) -> String {
    let without_tags = HTML_TAG_RE.replace_all(text, "");
    HTML_ENTITY_RE
        .replace_all(&without_tags, |caps: &regex::Captures<'_>| {
            match &caps[1] {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                "nbsp" => " ".to_string(),
                numeric => {
                    let digits = numeric.trim_start_matches('#');
                    let parsed = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        digits.parse::<u32>().ok()
                    };
                    parsed
                        .and_then(char::from_u32)
                        .map(String::from)
                        .unwrap_or_default()
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_known_tags_only() {
        assert_eq!(
            strip_html("<i>Homo sapiens</i> <B>L.</B>"),
            "Homo sapiens L."
        );
        // Unknown tags stay; they are part of the (broken) name.
        assert_eq!(strip_html("<xyz>abc</xyz>"), "<xyz>abc</xyz>");
    }

    #[test]
    fn decodes_basic_entities() {
        assert_eq!(strip_html("Aus &amp; Bus"), "Aus & Bus");
        assert_eq!(strip_html("O&apos;brien"), "O'brien");
        assert_eq!(strip_html("A&nbsp;b"), "A b");
        assert_eq!(strip_html("caf&#233;"), "café");
        assert_eq!(strip_html("caf&#xE9;"), "café");
    }

    #[test]
    fn annotation_at_start_is_not_a_tail() {
        assert_eq!(annotation_offset("environmental sample"), None);
        assert!(annotation_offset("Aus bus environmental sample").is_some());
    }

    #[test]
    fn specimen_codes_are_case_sensitive() {
        assert!(surrogate_kind("Fungi SH1234567").is_some());
        assert!(surrogate_kind("Physaria shehbazii").is_none());
    }

    #[test]
    fn bold_codes_are_their_own_kind() {
        use nomen_ir::Surrogate;
        assert_eq!(
            surrogate_kind("Coleoptera BOLD:AAV0432"),
            Some(Surrogate::BoldSurrogate)
        );
        assert_eq!(
            surrogate_kind("Fungi SH1234567"),
            Some(Surrogate::Surrogate)
        );
    }
}
