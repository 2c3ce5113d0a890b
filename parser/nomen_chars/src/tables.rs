//! ASCII folding for extended name letters.

/// Map an extended name letter to its ASCII canonical spelling.
///
/// Returns `None` for characters that are already canonical (plain ASCII)
/// and for characters outside the name alphabet. Ligatures expand to two
/// letters; everything else folds one-to-one.
///
/// The mapping covers exactly the extended sets accepted by
/// [`is_name_upper`](crate::is_name_upper) and
/// [`is_name_lower`](crate::is_name_lower), plus the miscoded replacement
/// glyph, which folds to nothing and is reported separately by the
/// normalizer.
pub fn fold_name_char(c: char) -> Option<&'static str> {
    let folded = match c {
        'Æ' => "Ae",
        'Œ' => "Oe",
        'Ö' => "O",
        'æ' => "ae",
        'œ' => "oe",
        'à' | 'â' | 'å' | 'ã' | 'ä' | 'á' => "a",
        'ç' | 'č' => "c",
        'é' | 'è' | 'ë' => "e",
        'í' | 'ì' | 'ï' => "i",
        'ň' | 'ñ' => "n",
        'ó' | 'ò' | 'ô' | 'ø' | 'õ' | 'ö' => "o",
        'ú' | 'ù' | 'ü' => "u",
        'ŕ' | 'ř' | 'ŗ' => "r",
        'ſ' | 'š' | 'ş' => "s",
        'ž' => "z",
        '\u{FFFD}' => "",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ligatures_expand() {
        assert_eq!(fold_name_char('Æ'), Some("Ae"));
        assert_eq!(fold_name_char('Œ'), Some("Oe"));
        assert_eq!(fold_name_char('æ'), Some("ae"));
        assert_eq!(fold_name_char('œ'), Some("oe"));
    }

    #[test]
    fn accents_fold_to_base_letter() {
        assert_eq!(fold_name_char('ë'), Some("e"));
        assert_eq!(fold_name_char('ö'), Some("o"));
        assert_eq!(fold_name_char('ñ'), Some("n"));
        assert_eq!(fold_name_char('š'), Some("s"));
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(fold_name_char('a'), None);
        assert_eq!(fold_name_char('Z'), None);
        assert_eq!(fold_name_char('-'), None);
    }

    #[test]
    fn miscoded_glyph_folds_to_nothing() {
        assert_eq!(fold_name_char('\u{FFFD}'), Some(""));
    }

    #[test]
    fn every_extended_name_letter_has_a_fold() {
        let extended = "æœàâåãäáçčéèëíìïňñóòôøõöúùüŕřŗſšşžÆŒÖ";
        for c in extended.chars() {
            assert!(fold_name_char(c).is_some(), "{c} has no ASCII fold");
        }
    }
}
