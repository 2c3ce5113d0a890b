//! Grammar rules.
//!
//! Each method on [`Engine`] implements one PEG rule and returns whether it
//! matched. Ordered choice is encoded as `||` chains over backtracking
//! sub-rules: every rule restores the engine on failure, so the next
//! alternative starts clean. The first alternative that matches wins;
//! there is no longest-match across alternatives.
//!
//! # Organization
//!
//! - this module: the root (`SciName`, `Tail`) and the name-level branches
//!   (hybrid formulas, graft chimeras, named hybrids, single names);
//! - [`species`]: species/infraspecies structure, approximation and
//!   comparison names, uninomials and their combinations;
//! - [`words`]: word shapes (capitalized words, epithet words, two-letter
//!   genera, cultivar epithets);
//! - [`rank`]: infraspecific and uninomial rank markers;
//! - [`authorship`]: the authorship tree;
//! - [`year`]: year variants.
//!
//! The rule inventory covers the conventions of the nomenclatural codes:
//! rank marker tables, authorship structure with basionym and ex/emend
//! teams, year ornaments, hybrid signs, graft chimeras, and cultivar
//! epithets.

mod authorship;
mod rank;
mod species;
mod words;
mod year;

use crate::engine::Engine;
use crate::rule::Rule;

impl Engine {
    /// `SciName <- _? Name Tail !.`
    ///
    /// The root: a parse succeeds only when the whole buffer is consumed.
    /// Anything after the formal name lands in `Tail`.
    pub(crate) fn sci_name(&mut self) -> bool {
        self.node(Rule::SciName, |e| {
            e.opt_space();
            if !e.name() {
                return false;
            }
            e.tail();
            e.is_eof()
        })
    }

    /// `Tail <- ((_ / ',') .*)?`
    fn tail(&mut self) -> bool {
        self.node(Rule::Tail, |e| {
            let cp = e.save();
            if e.space() || e.eat(',') {
                while !e.is_eof() {
                    e.bump();
                }
            } else {
                e.restore(cp);
            }
            true
        })
    }

    /// `Name <- NamedHybrid / HybridFormula / GraftChimeraFormula / SingleName`
    fn name(&mut self) -> bool {
        self.named_hybrid()
            || self.hybrid_formula()
            || self.graft_chimera_formula()
            || self.single_name()
    }

    /// `HybridFormula <- SingleName (_ (HybridFormulaPart / HybridFormulaFull))+`
    fn hybrid_formula(&mut self) -> bool {
        self.node(Rule::HybridFormula, |e| {
            if !e.single_name() {
                return false;
            }
            let mut elements = 0;
            loop {
                let cp = e.save();
                if e.space() && (e.hybrid_formula_part() || e.hybrid_formula_full()) {
                    elements += 1;
                } else {
                    e.restore(cp);
                    break;
                }
            }
            elements > 0
        })
    }

    /// `HybridFormulaFull <- HybridChar (_ SingleName)?`
    fn hybrid_formula_full(&mut self) -> bool {
        self.node(Rule::HybridFormulaFull, |e| {
            if !e.hybrid_char() {
                return false;
            }
            e.opt(|e| e.space() && e.single_name());
            true
        })
    }

    /// `HybridFormulaPart <- HybridChar _ SpeciesEpithet (_ InfraspGroup)?`
    fn hybrid_formula_part(&mut self) -> bool {
        self.node(Rule::HybridFormulaPart, |e| {
            if !(e.hybrid_char() && e.space() && e.species_epithet()) {
                return false;
            }
            e.opt(|e| e.space() && e.infrasp_group());
            true
        })
    }

    /// `GraftChimeraFormula <- SingleName (_ (GraftChimeraPart / GraftChimeraFull))+`
    ///
    /// Same shape as the hybrid formula with `+` as the joiner; `+` marks a
    /// graft chimera, a plant whose tissues mix two taxa.
    fn graft_chimera_formula(&mut self) -> bool {
        self.node(Rule::GraftChimeraFormula, |e| {
            if !e.single_name() {
                return false;
            }
            let mut elements = 0;
            loop {
                let cp = e.save();
                if e.space() && (e.graft_chimera_part() || e.graft_chimera_full()) {
                    elements += 1;
                } else {
                    e.restore(cp);
                    break;
                }
            }
            elements > 0
        })
    }

    /// `GraftChimeraFull <- GraftChimeraChar (_ SingleName)?`
    fn graft_chimera_full(&mut self) -> bool {
        self.node(Rule::GraftChimeraFull, |e| {
            if !e.graft_chimera_char() {
                return false;
            }
            e.opt(|e| e.space() && e.single_name());
            true
        })
    }

    /// `GraftChimeraPart <- GraftChimeraChar _ SpeciesEpithet (_ InfraspGroup)?`
    fn graft_chimera_part(&mut self) -> bool {
        self.node(Rule::GraftChimeraPart, |e| {
            if !(e.graft_chimera_char() && e.space() && e.species_epithet()) {
                return false;
            }
            e.opt(|e| e.space() && e.infrasp_group());
            true
        })
    }

    /// `NamedHybrid <- NamedGenusHybrid / NamedSpeciesHybrid`
    fn named_hybrid(&mut self) -> bool {
        self.named_genus_hybrid() || self.named_species_hybrid()
    }

    /// `NamedSpeciesHybrid <- GenusWord _ HybridChar _? SpeciesEpithet`
    fn named_species_hybrid(&mut self) -> bool {
        self.node(Rule::NamedSpeciesHybrid, |e| {
            e.genus_word() && e.space() && e.hybrid_char() && e.opt_space() && e.species_epithet()
        })
    }

    /// `NamedGenusHybrid <- HybridChar _? SingleName`
    fn named_genus_hybrid(&mut self) -> bool {
        self.node(Rule::NamedGenusHybrid, |e| {
            e.hybrid_char() && e.opt_space() && e.single_name()
        })
    }

    /// `SingleName <- NameComp / NameApprox / NameSpecies / NameUninomial`
    pub(crate) fn single_name(&mut self) -> bool {
        self.name_comp() || self.name_approx() || self.name_species() || self.name_uninomial()
    }

    /// `HybridChar <- '×'`
    fn hybrid_char(&mut self) -> bool {
        self.node(Rule::HybridChar, |e| e.eat('×'))
    }

    /// `GraftChimeraChar <- '+'`
    fn graft_chimera_char(&mut self) -> bool {
        self.node(Rule::GraftChimeraChar, |e| e.eat('+'))
    }
}
