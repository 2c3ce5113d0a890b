//! The authorship tree: the densest part of the grammar.
//!
//! Authorship distinguishes the *original* (basionym) authors, possibly in
//! parentheses, from the *combination* authors that follow a
//! recombination. Each group holds one or two teams; the second team is
//! attributed through `ex` or `emend.`. Teams are authors separated by
//! commas or and-words, optionally closed by a year.

use nomen_chars::{is_author_lower, is_author_upper};

use crate::engine::Engine;
use crate::rule::Rule;

/// Author name prefixes (`van der Hoek`, `de la Torre`), curated from
/// real authorship strings. Ordered longest-first within each shared
/// stem so that `della` is not shadowed by `del`.
const AUTHOR_PREFIXES: &[&str] = &[
    "ab", "af", "bis", "da", "der", "des", "den", "della", "dela", "del", "de", "di", "du", "el",
    "la", "le", "ter", "van", "d'", "in't", "zur",
];

impl Engine {
    /// `Authorship <- (AuthorshipCombo / OriginalAuthorship) &(SpaceCharEOI / ',')`
    pub(crate) fn authorship(&mut self) -> bool {
        self.node(Rule::Authorship, |e| {
            if !(e.authorship_combo() || e.original_authorship()) {
                return false;
            }
            e.ahead_space_or_eoi() || e.cur() == ','
        })
    }

    /// `AuthorshipCombo <- OriginalAuthorship _? CombinationAuthorship`
    fn authorship_combo(&mut self) -> bool {
        let cp = self.save();
        let ok = self.original_authorship() && {
            self.opt_space();
            self.combination_authorship()
        };
        if !ok {
            self.restore(cp);
        }
        ok
    }

    /// `OriginalAuthorship <- BasionymAuthorshipYearMisformed / AuthorsGroup /
    ///                        BasionymAuthorship`
    fn original_authorship(&mut self) -> bool {
        self.node(Rule::OriginalAuthorship, |e| {
            e.basionym_authorship_year_misformed()
                || e.authors_group()
                || e.basionym_authorship()
        })
    }

    /// `CombinationAuthorship <- AuthorsGroup`
    fn combination_authorship(&mut self) -> bool {
        self.node(Rule::CombinationAuthorship, |e| e.authors_group())
    }

    /// `BasionymAuthorshipYearMisformed <- '(' _? AuthorsGroup _? ')'
    ///                                     (_? ',')? _? Year`
    ///
    /// A basionym year stranded outside the parentheses.
    fn basionym_authorship_year_misformed(&mut self) -> bool {
        self.node(Rule::BasionymAuthorshipYearMisformed, |e| {
            if !e.eat('(') {
                return false;
            }
            e.opt_space();
            if !e.authors_group() {
                return false;
            }
            e.opt_space();
            if !e.eat(')') {
                return false;
            }
            e.opt(|e| {
                e.opt_space();
                e.eat(',')
            });
            e.opt_space();
            e.year()
        })
    }

    /// `BasionymAuthorship <- BasionymAuthorship1 / BasionymAuthorship2Parens`
    fn basionym_authorship(&mut self) -> bool {
        self.node(Rule::BasionymAuthorship, |e| {
            e.basionym_authorship1() || e.basionym_authorship2_parens()
        })
    }

    /// `BasionymAuthorship1 <- '(' _? AuthorsGroup _? ')'`
    fn basionym_authorship1(&mut self) -> bool {
        let cp = self.save();
        let ok = self.eat('(') && {
            self.opt_space();
            self.authors_group() && {
                self.opt_space();
                self.eat(')')
            }
        };
        if !ok {
            self.restore(cp);
        }
        ok
    }

    /// `BasionymAuthorship2Parens <- '(' _? '(' _? AuthorsGroup _? ')' _? ')'`
    fn basionym_authorship2_parens(&mut self) -> bool {
        self.node(Rule::BasionymAuthorship2Parens, |e| {
            if !e.eat('(') {
                return false;
            }
            e.opt_space();
            if !e.eat('(') {
                return false;
            }
            e.opt_space();
            if !e.authors_group() {
                return false;
            }
            e.opt_space();
            if !e.eat(')') {
                return false;
            }
            e.opt_space();
            e.eat(')')
        })
    }

    /// `AuthorsGroup <- AuthorsTeam (_? AuthorEmend? AuthorEx? AuthorsTeam)?`
    fn authors_group(&mut self) -> bool {
        self.node(Rule::AuthorsGroup, |e| {
            if !e.authors_team() {
                return false;
            }
            e.opt(|e| {
                e.opt_space();
                let marked = {
                    let emend = e.author_emend();
                    let ex = e.author_ex();
                    emend || ex
                };
                // A second team without an attribution word is not a
                // separate team; leave it for the caller.
                marked && e.authors_team()
            });
            true
        })
    }

    /// `AuthorsTeam <- Author (AuthorSep Author)* (_? ','? _? Year)?`
    fn authors_team(&mut self) -> bool {
        self.node(Rule::AuthorsTeam, |e| {
            if !e.author() {
                return false;
            }
            loop {
                let cp = e.save();
                if e.author_sep() && e.author() {
                    continue;
                }
                e.restore(cp);
                break;
            }
            e.opt(|e| {
                e.opt_space();
                e.eat(',');
                e.opt_space();
                e.year()
            });
            true
        })
    }

    /// `AuthorSep <- AuthorSep1 / AuthorSep2`
    fn author_sep(&mut self) -> bool {
        self.author_sep1() || self.author_sep2()
    }

    /// `AuthorSep1 <- _? (',' _)? ('&' / 'et' / 'and' / 'apud') _?`
    fn author_sep1(&mut self) -> bool {
        let cp = self.save();
        self.opt_space();
        self.opt(|e| e.eat(',') && e.space());
        let ok = self.eat('&')
            || self.eat_str("et")
            || self.eat_str("and")
            || self.eat_str("apud");
        if ok {
            self.opt_space();
            true
        } else {
            self.restore(cp);
            false
        }
    }

    /// `AuthorSep2 <- _? ',' _?`
    fn author_sep2(&mut self) -> bool {
        let cp = self.save();
        self.opt_space();
        if self.eat(',') {
            self.opt_space();
            true
        } else {
            self.restore(cp);
            false
        }
    }

    /// `AuthorEx <- (('ex' '.'?) / 'in') _`
    pub(crate) fn author_ex(&mut self) -> bool {
        self.node(Rule::AuthorEx, |e| {
            let cp = e.save();
            if e.eat_str("ex") {
                e.eat('.');
                if e.space() {
                    return true;
                }
                e.restore(cp);
            }
            if e.eat_str("in") && e.space() {
                return true;
            }
            e.restore(cp);
            false
        })
    }

    /// `AuthorEmend <- 'emend' '.'? _`
    fn author_emend(&mut self) -> bool {
        self.node(Rule::AuthorEmend, |e| {
            if !e.eat_str("emend") {
                return false;
            }
            e.eat('.');
            e.space()
        })
    }

    /// `Author <- Author1 / Author2 / UnknownAuthor`
    fn author(&mut self) -> bool {
        self.node(Rule::Author, |e| {
            e.author1() || e.author2() || e.unknown_author()
        })
    }

    /// `Author1 <- Author2 _? Filius`
    fn author1(&mut self) -> bool {
        let cp = self.save();
        let ok = self.author2() && {
            self.opt_space();
            self.filius()
        };
        if !ok {
            self.restore(cp);
        }
        ok
    }

    /// `Author2 <- AuthorWord (_? AuthorWord)*`
    fn author2(&mut self) -> bool {
        if !self.author_word() {
            return false;
        }
        loop {
            let cp = self.save();
            self.opt_space();
            if !self.author_word() {
                self.restore(cp);
                break;
            }
        }
        true
    }

    /// `UnknownAuthor <- '?' / (('auct' / 'anon') (&SpaceCharEOI / '.'))`
    fn unknown_author(&mut self) -> bool {
        self.node(Rule::UnknownAuthor, |e| {
            if e.eat('?') {
                return true;
            }
            for marker in ["auct", "anon"] {
                let cp = e.save();
                if e.eat_str(marker) && (e.ahead_space_or_eoi() || e.eat('.')) {
                    return true;
                }
                e.restore(cp);
            }
            false
        })
    }

    /// `AuthorWord <- !('BOLD:') (AuthorWord1 / AuthorWord2 / AuthorWord3 /
    ///                AuthorPrefix)`
    pub(crate) fn author_word(&mut self) -> bool {
        self.node(Rule::AuthorWord, |e| {
            let bold = e.ahead(|e| {
                for c in "bold:".chars() {
                    if e.is_eof() || !e.cur().eq_ignore_ascii_case(&c) {
                        return false;
                    }
                    e.bump();
                }
                true
            });
            if bold {
                return false;
            }
            e.author_word1() || e.author_word2() || e.author_word3() || e.author_prefix()
        })
    }

    /// `AuthorWord1 <- 'arg.' / 'et al.{?}' / (('et' / '&') ' al' '.'?)`
    fn author_word1(&mut self) -> bool {
        if self.eat_str("arg.") || self.eat_str("et al.{?}") {
            return true;
        }
        let cp = self.save();
        let lead = self.eat_str("et") || self.eat('&');
        if lead && self.eat_str(" al") {
            self.eat('.');
            true
        } else {
            self.restore(cp);
            false
        }
    }

    /// `AuthorWord2 <- AuthorWord3 dash AuthorWordSoft`
    fn author_word2(&mut self) -> bool {
        let cp = self.save();
        let ok = self.author_word3() && self.eat('-') && self.author_word_soft();
        if !ok {
            self.restore(cp);
        }
        ok
    }

    /// `AuthorWord3 <- AuthorPrefixGlued? (AllCapsAuthorWord / CapAuthorWord) '.'?`
    fn author_word3(&mut self) -> bool {
        let cp = self.save();
        self.opt(Engine::author_prefix_glued);
        if self.all_caps_author_word() || self.cap_author_word() {
            self.eat('.');
            true
        } else {
            self.restore(cp);
            false
        }
    }

    /// `AuthorWordSoft <- ((AuthorUpperChar (AuthorUpperChar+ / AuthorLowerChar+)) /
    ///                    AuthorLowerChar+) '.'?`
    fn author_word_soft(&mut self) -> bool {
        let cp = self.save();
        let head = if self.eat_if(is_author_upper) {
            self.eat_while(is_author_upper) >= 1 || self.eat_while(is_author_lower) >= 1
        } else {
            self.eat_while(is_author_lower) >= 1
        };
        if head {
            self.eat('.');
            true
        } else {
            self.restore(cp);
            false
        }
    }

    /// `CapAuthorWord <- AuthorUpperChar AuthorLowerChar*`
    fn cap_author_word(&mut self) -> bool {
        if self.eat_if(is_author_upper) {
            self.eat_while(is_author_lower);
            true
        } else {
            false
        }
    }

    /// `AllCapsAuthorWord <- AuthorUpperChar AuthorUpperChar+`
    fn all_caps_author_word(&mut self) -> bool {
        let cp = self.save();
        if self.eat_if(is_author_upper) && self.eat_while(is_author_upper) >= 1 {
            true
        } else {
            self.restore(cp);
            false
        }
    }

    /// `Filius <- 'f.' / 'fil.' / 'filius'`
    fn filius(&mut self) -> bool {
        self.node(Rule::Filius, |e| {
            e.eat_str("f.") || e.eat_str("fil.") || e.eat_str("filius")
        })
    }

    /// `AuthorPrefixGlued <- 'd\'' / 'O\'' / 'L\''`
    fn author_prefix_glued(&mut self) -> bool {
        self.eat_str("d'") || self.eat_str("O'") || self.eat_str("L'")
    }

    /// `AuthorPrefix <- AuthorPrefix1 / AuthorPrefix2`
    pub(crate) fn author_prefix(&mut self) -> bool {
        self.author_prefix1() || self.author_prefix2()
    }

    /// `AuthorPrefix2 <- ('v.' (_? 'd.')?) / '\'t'`
    fn author_prefix2(&mut self) -> bool {
        let cp = self.save();
        if self.eat_str("v.") {
            self.opt(|e| {
                e.opt_space();
                e.eat_str("d.")
            });
            return true;
        }
        self.restore(cp);
        self.eat_str("'t")
    }

    /// `AuthorPrefix1 <- ('ab' / 'af' / ... / ('von' (_ ('d.' / 'dem'))?) /
    ///                   ('v' (_ 'd')?)) &_`
    fn author_prefix1(&mut self) -> bool {
        let cp = self.save();
        let matched = 'matched: {
            for prefix in AUTHOR_PREFIXES {
                if self.eat_str(prefix) {
                    break 'matched true;
                }
            }
            if self.eat_str("von") {
                self.opt(|e| e.space() && (e.eat_str("d.") || e.eat_str("dem")));
                break 'matched true;
            }
            if self.eat('v') {
                self.opt(|e| e.space() && e.eat('d'));
                break 'matched true;
            }
            false
        };
        if matched && self.ahead(|e| e.space()) {
            true
        } else {
            self.restore(cp);
            false
        }
    }
}
