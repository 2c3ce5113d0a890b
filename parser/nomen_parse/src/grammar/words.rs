//! Word shapes: capitalized (uninomial) words, epithet words, two-letter
//! genera, cultivar epithets.

use nomen_chars::{is_dash, is_digit, is_latin_lower, is_latin_upper, is_name_lower, is_name_upper};

use crate::engine::Engine;
use crate::rule::Rule;

/// The full list of valid two-letter genera. Anything else of length two
/// is treated as an author initial.
const TWO_LETTER_GENERA: &[&str] = &[
    "Ca", "Ea", "Ge", "Ia", "Io", "Ix", "Lo", "Oa", "Ra", "Ty", "Ua", "Aa", "Ja", "Zu", "La",
    "Qu", "As", "Ba",
];

impl Engine {
    /// `UninomialWord <- CapWord / TwoLetterGenus`
    pub(crate) fn uninomial_word(&mut self) -> bool {
        self.node(Rule::UninomialWord, |e| {
            e.cap_word() || e.two_letter_genus()
        })
    }

    /// `AbbrGenus <- UpperChar LowerChar* '.'`
    pub(crate) fn abbr_genus(&mut self) -> bool {
        self.node(Rule::AbbrGenus, |e| {
            if !e.eat_if(is_latin_upper) {
                return false;
            }
            e.eat_while(is_latin_lower);
            e.eat('.')
        })
    }

    /// `CapWord <- CapWord2 / CapWord1`
    fn cap_word(&mut self) -> bool {
        self.cap_word2() || self.cap_word1()
    }

    /// `CapWord1 <- NameUpperChar NameLowerChar NameLowerChar+ '?'?`
    fn cap_word1(&mut self) -> bool {
        let cp = self.save();
        if self.eat_if(is_name_upper) && self.eat_while(is_name_lower) >= 2 {
            self.eat('?');
            true
        } else {
            self.restore(cp);
            false
        }
    }

    /// `CapWord2 <- CapWord1 dash (CapWord1 / Word1)`
    fn cap_word2(&mut self) -> bool {
        self.node(Rule::CapWord2, |e| {
            e.cap_word1() && e.eat_if(is_dash) && (e.cap_word1() || e.word1())
        })
    }

    /// `TwoLetterGenus <- 'Ca' / 'Ea' / ... / 'Ba'`
    fn two_letter_genus(&mut self) -> bool {
        TWO_LETTER_GENERA.iter().any(|g| self.eat_str(g))
    }

    /// `Word <- !(AuthorPrefix / RankUninomial / Approximation / Word4)
    ///          (WordApostr / WordStartsWithDigit / Word2 / Word1)
    ///          &(SpaceCharEOI / '(')`
    ///
    /// The lookahead fences epithet words off from author prefixes, rank
    /// markers and approximation markers, which are all lower-case too.
    pub(crate) fn word(&mut self) -> bool {
        self.node(Rule::Word, |e| {
            let fenced = e.not_ahead(|e| {
                e.author_prefix() || e.rank_uninomial() || e.approximation() || e.word4()
            });
            if !fenced {
                return false;
            }
            if !(e.word_apostr() || e.word_starts_with_digit() || e.word2() || e.word1()) {
                return false;
            }
            e.ahead_space_or_eoi() || e.cur() == '('
        })
    }

    /// `Word1 <- (lASCII dash)? NameLowerChar NameLowerChar+`
    pub(crate) fn word1(&mut self) -> bool {
        let cp = self.save();
        self.opt(|e| e.eat_if(is_latin_lower) && e.eat_if(is_dash));
        if self.eat_if(is_name_lower) && self.eat_while(is_name_lower) >= 1 {
            true
        } else {
            self.restore(cp);
            false
        }
    }

    /// `Word2 <- NameLowerChar+ dash? NameLowerChar+`
    ///
    /// Repetition is greedy, so in practice this matches only hyphenated
    /// words; plain words fall through to `Word1`.
    fn word2(&mut self) -> bool {
        let cp = self.save();
        if self.eat_while(is_name_lower) == 0 {
            return false;
        }
        self.eat_if(is_dash);
        if self.eat_while(is_name_lower) >= 1 {
            true
        } else {
            self.restore(cp);
            false
        }
    }

    /// `WordStartsWithDigit <- [1-9] nums? ('.' / dash)?
    ///                         NameLowerChar NameLowerChar NameLowerChar NameLowerChar+`
    ///
    /// Epithets like `1-setosus`; the numeral is spelled out during
    /// normalization.
    fn word_starts_with_digit(&mut self) -> bool {
        self.node(Rule::WordStartsWithDigit, |e| {
            if !e.eat_if(|c| ('1'..='9').contains(&c)) {
                return false;
            }
            e.eat_if(is_digit);
            e.eat_if(|c| c == '.' || is_dash(c));
            e.eat_while(is_name_lower) >= 4
        })
    }

    /// `WordApostr <- NameLowerChar NameLowerChar* apostr Word1`
    fn word_apostr(&mut self) -> bool {
        self.node(Rule::WordApostr, |e| {
            if e.eat_while(is_name_lower) == 0 {
                return false;
            }
            e.eat('\'') && e.word1()
        })
    }

    /// `Word4 <- NameLowerChar+ '.' NameLowerChar`
    ///
    /// Only used as a negative fence: a lower-case word with an interior
    /// period is never an epithet.
    fn word4(&mut self) -> bool {
        let cp = self.save();
        let ok = self.eat_while(is_name_lower) >= 1 && self.eat('.') && self.eat_if(is_name_lower);
        if !ok {
            self.restore(cp);
        }
        ok
    }

    /// `CultivarEpithet <- ('cv' '.' _?)? apostr CultivarWord apostr /
    ///                     'cv' '.' _ Word`
    ///
    /// Only active when cultivars are enabled; with the branch disabled the
    /// epithet falls into the unparsed tail.
    pub(crate) fn cultivar_epithet(&mut self) -> bool {
        if !self.cultivars_enabled {
            return false;
        }
        self.node(Rule::CultivarEpithet, |e| {
            let cp = e.save();
            // Quoted form, with an optional cv. marker.
            e.opt(|e| {
                if !e.eat_str("cv.") {
                    return false;
                }
                e.opt_space();
                true
            });
            if e.eat('\'') {
                let body = e.eat_while(|c| {
                    is_name_lower(c) || is_name_upper(c) || is_digit(c) || c == ' ' || is_dash(c)
                });
                if body > 0 && e.eat('\'') {
                    return true;
                }
            }
            e.restore(cp);
            // Bare cv. marker followed by a plain epithet word.
            e.eat_str("cv.") && e.space() && e.word()
        })
    }
}
