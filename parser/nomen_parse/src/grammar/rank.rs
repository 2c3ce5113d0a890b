//! Infraspecific and uninomial rank markers.
//!
//! Every marker must be followed by a space, end of input, or its own
//! period; otherwise an epithet that merely starts with the same letters
//! (`formosana`, `variegata`) would be chopped in half.

use nomen_chars::is_greek_rank;

use crate::engine::Engine;
use crate::rule::Rule;

impl Engine {
    /// `Rank <- RankForma / RankVar / RankSsp / RankOther / RankOtherUncommon`
    pub(crate) fn rank(&mut self) -> bool {
        self.node(Rule::Rank, |e| {
            e.rank_forma()
                || e.rank_var()
                || e.rank_ssp()
                || e.rank_other()
                || e.rank_other_uncommon()
        })
    }

    /// `RankForma <- ('forma' / 'fma' / 'form' / 'fo' / 'f') (&SpaceCharEOI / '.')`
    fn rank_forma(&mut self) -> bool {
        self.node(Rule::RankForma, |e| {
            for marker in ["forma", "fma", "form", "fo", "f"] {
                let cp = e.save();
                if e.eat_str(marker) && (e.ahead_space_or_eoi() || e.eat('.')) {
                    return true;
                }
                e.restore(cp);
            }
            false
        })
    }

    /// `RankVar <- 'variety' / '[var.]' / 'nvar.' / ('var' (&SpaceCharEOI / '.'))`
    fn rank_var(&mut self) -> bool {
        self.node(Rule::RankVar, |e| {
            if e.eat_str("variety") || e.eat_str("[var.]") || e.eat_str("nvar.") {
                return true;
            }
            let cp = e.save();
            if e.eat_str("var") && (e.ahead_space_or_eoi() || e.eat('.')) {
                return true;
            }
            e.restore(cp);
            false
        })
    }

    /// `RankSsp <- ('ssp' / 'subsp') (&SpaceCharEOI / '.')`
    fn rank_ssp(&mut self) -> bool {
        self.node(Rule::RankSsp, |e| {
            for marker in ["ssp", "subsp"] {
                let cp = e.save();
                if e.eat_str(marker) && (e.ahead_space_or_eoi() || e.eat('.')) {
                    return true;
                }
                e.restore(cp);
            }
            false
        })
    }

    /// `RankOther <- ('morph.' / 'nothosubsp.' / 'convar.' / 'pseudovar.' /
    ///               'sect.' / 'ser.' / 'subvar.' / 'subf.' / 'race' /
    ///               'α' / 'ββ' / 'β' / 'γ' / 'δ' / 'ε' / 'φ' / 'θ' / 'μ' /
    ///               'a.' / 'b.' / 'c.' / 'd.' / 'e.' / 'g.' / 'k.' /
    ///               'pv.' / 'pathovar.' / ('ab.' (_? 'n.')?) / 'st.')
    ///               &SpaceCharEOI`
    fn rank_other(&mut self) -> bool {
        self.node(Rule::RankOther, |e| {
            let cp = e.save();
            let matched = e.rank_other_marker();
            if matched && e.ahead_space_or_eoi() {
                return true;
            }
            e.restore(cp);
            false
        })
    }

    fn rank_other_marker(&mut self) -> bool {
        const MARKERS: &[&str] = &[
            "morph.",
            "nothosubsp.",
            "convar.",
            "pseudovar.",
            "sect.",
            "ser.",
            "subvar.",
            "subf.",
            "race",
        ];
        for marker in MARKERS {
            if self.eat_str(marker) {
                return true;
            }
        }
        if self.eat_str("ββ") || self.eat_if(is_greek_rank) {
            return true;
        }
        const LETTER_MARKERS: &[&str] = &[
            "a.", "b.", "c.", "d.", "e.", "g.", "k.", "pv.", "pathovar.",
        ];
        for marker in LETTER_MARKERS {
            if self.eat_str(marker) {
                return true;
            }
        }
        if self.eat_str("ab.") {
            self.opt(|e| {
                e.opt_space();
                e.eat_str("n.")
            });
            return true;
        }
        self.eat_str("st.")
    }

    /// `RankOtherUncommon <- ('*' / 'nat' / 'f.sp' / 'mut.') &SpaceCharEOI`
    fn rank_other_uncommon(&mut self) -> bool {
        self.node(Rule::RankOtherUncommon, |e| {
            let cp = e.save();
            let matched =
                e.eat('*') || e.eat_str("nat") || e.eat_str("f.sp") || e.eat_str("mut.");
            if matched && e.ahead_space_or_eoi() {
                return true;
            }
            e.restore(cp);
            false
        })
    }

    /// `RankUninomial <- ('sect' / 'subsect' / 'trib' / 'subtrib' / 'subser' /
    ///                   'ser' / 'subgen' / 'fam' / 'subfam' / 'supertrib')
    ///                   '.'? &SpaceCharEOI`
    ///
    /// The boundary check keeps epithets like `serrata` from losing their
    /// first letters to a rank marker.
    pub(crate) fn rank_uninomial(&mut self) -> bool {
        self.node(Rule::RankUninomial, |e| {
            const MARKERS: &[&str] = &[
                "sect", "subsect", "trib", "subtrib", "subser", "ser", "subgen", "fam", "subfam",
                "supertrib",
            ];
            for marker in MARKERS {
                let cp = e.save();
                if e.eat_str(marker) {
                    e.eat('.');
                    if e.ahead_space_or_eoi() {
                        return true;
                    }
                    e.restore(cp);
                }
            }
            false
        })
    }
}
