//! Single-name structure: species, infraspecies, approximations,
//! comparisons, uninomials and their combinations.

use crate::engine::Engine;
use crate::rule::Rule;

impl Engine {
    /// `NameUninomial <- UninomialCombo / Uninomial`
    pub(crate) fn name_uninomial(&mut self) -> bool {
        self.uninomial_combo() || self.uninomial()
    }

    /// `NameApprox <- GenusWord (_ SpeciesEpithet)? _ Approximation ApproxNameIgnored`
    pub(crate) fn name_approx(&mut self) -> bool {
        self.node(Rule::NameApprox, |e| {
            if !e.genus_word() {
                return false;
            }
            e.opt(|e| e.space() && e.species_epithet());
            if !(e.space() && e.approximation()) {
                return false;
            }
            e.approx_name_ignored();
            true
        })
    }

    /// `NameComp <- GenusWord _ Comparison (_ SpeciesEpithet)?`
    pub(crate) fn name_comp(&mut self) -> bool {
        self.node(Rule::NameComp, |e| {
            if !(e.genus_word() && e.space() && e.comparison()) {
                return false;
            }
            e.opt(|e| e.space() && e.species_epithet());
            true
        })
    }

    /// `NameSpecies <- GenusWord (_? (SubGenus / SubGenusOrSuperspecies))?
    ///                _ SpeciesEpithet (_ InfraspGroup)? (_ CultivarEpithet)?`
    pub(crate) fn name_species(&mut self) -> bool {
        self.node(Rule::NameSpecies, |e| {
            if !e.genus_word() {
                return false;
            }
            e.opt(|e| {
                e.opt_space();
                e.sub_genus() || e.sub_genus_or_superspecies()
            });
            if !(e.space() && e.species_epithet()) {
                return false;
            }
            e.opt(|e| e.space() && e.infrasp_group());
            e.opt(|e| e.space() && e.cultivar_epithet());
            true
        })
    }

    /// `GenusWord <- (AbbrGenus / UninomialWord) !(_ AuthorWord)`
    ///
    /// The lookahead keeps a capitalized author from being taken for a
    /// genus when the real structure is `Uninomial Author`.
    pub(crate) fn genus_word(&mut self) -> bool {
        self.node(Rule::GenusWord, |e| {
            if !(e.abbr_genus() || e.uninomial_word()) {
                return false;
            }
            e.not_ahead(|e| e.space() && e.author_word())
        })
    }

    /// `InfraspGroup <- InfraspEpithet (_ InfraspEpithet)? (_ InfraspEpithet)?`
    pub(crate) fn infrasp_group(&mut self) -> bool {
        self.node(Rule::InfraspGroup, |e| {
            if !e.infrasp_epithet() {
                return false;
            }
            e.opt(|e| e.space() && e.infrasp_epithet());
            e.opt(|e| e.space() && e.infrasp_epithet());
            true
        })
    }

    /// `InfraspEpithet <- (Rank _?)? !AuthorEx Word (_ Authorship)?`
    pub(crate) fn infrasp_epithet(&mut self) -> bool {
        self.node(Rule::InfraspEpithet, |e| {
            e.opt(|e| {
                if !e.rank() {
                    return false;
                }
                e.opt_space();
                true
            });
            if !e.not_ahead(Engine::author_ex) {
                return false;
            }
            if !e.word() {
                return false;
            }
            e.opt(|e| e.space() && e.authorship());
            true
        })
    }

    /// `SpeciesEpithet <- !AuthorEx Word (_? Authorship)? ','? &(SpaceCharEOI / '(')`
    pub(crate) fn species_epithet(&mut self) -> bool {
        self.node(Rule::SpeciesEpithet, |e| {
            if !e.not_ahead(Engine::author_ex) {
                return false;
            }
            if !e.word() {
                return false;
            }
            e.opt(|e| {
                e.opt_space();
                e.authorship()
            });
            e.eat(',');
            e.ahead_space_or_eoi() || e.cur() == '('
        })
    }

    /// `Comparison <- 'c' 'f' '.'?`
    pub(crate) fn comparison(&mut self) -> bool {
        self.node(Rule::Comparison, |e| {
            if !e.eat_str("cf") {
                return false;
            }
            e.eat('.');
            true
        })
    }

    /// `Approximation <- ('sp' '.' _? 'nr' '.') / ('sp' '.' _? 'aff' '.') /
    ///                   'monst' '.' / '?' /
    ///                   (('spp' / 'nr' / 'sp' / 'aff' / 'species') (&SpaceCharEOI / '.'))`
    pub(crate) fn approximation(&mut self) -> bool {
        self.node(Rule::Approximation, |e| {
            let sp_nr = |e: &mut Engine| {
                e.eat_str("sp.") && {
                    e.opt_space();
                    e.eat_str("nr.")
                }
            };
            let sp_aff = |e: &mut Engine| {
                e.eat_str("sp.") && {
                    e.opt_space();
                    e.eat_str("aff.")
                }
            };
            let cp = e.save();
            if sp_nr(e) {
                return true;
            }
            e.restore(cp);
            if sp_aff(e) {
                return true;
            }
            e.restore(cp);
            if e.eat_str("monst.") {
                return true;
            }
            if e.eat('?') {
                return true;
            }
            for marker in ["spp", "nr", "sp", "aff", "species"] {
                let cp = e.save();
                if e.eat_str(marker) && (e.ahead_space_or_eoi() || e.eat('.')) {
                    return true;
                }
                e.restore(cp);
            }
            false
        })
    }

    /// `ApproxNameIgnored <- .*`
    fn approx_name_ignored(&mut self) -> bool {
        self.node(Rule::ApproxNameIgnored, |e| {
            while !e.is_eof() {
                e.bump();
            }
            true
        })
    }

    /// `SubGenusOrSuperspecies <- '(' _? NameLowerChar+ _? ')'`
    fn sub_genus_or_superspecies(&mut self) -> bool {
        self.node(Rule::SubGenusOrSuperspecies, |e| {
            if !e.eat('(') {
                return false;
            }
            e.opt_space();
            if e.eat_while(nomen_chars::is_name_lower) == 0 {
                return false;
            }
            e.opt_space();
            e.eat(')')
        })
    }

    /// `SubGenus <- '(' _? UninomialWord _? ')'`
    fn sub_genus(&mut self) -> bool {
        self.node(Rule::SubGenus, |e| {
            if !e.eat('(') {
                return false;
            }
            e.opt_space();
            if !e.uninomial_word() {
                return false;
            }
            e.opt_space();
            e.eat(')')
        })
    }

    /// `UninomialCombo <- UninomialCombo1 / UninomialCombo2`
    fn uninomial_combo(&mut self) -> bool {
        self.uninomial_combo1() || self.uninomial_combo2()
    }

    /// `UninomialCombo1 <- UninomialWord _? SubGenus _? Authorship .?`
    fn uninomial_combo1(&mut self) -> bool {
        self.node(Rule::UninomialCombo1, |e| {
            if !e.uninomial_word() {
                return false;
            }
            e.opt_space();
            if !e.sub_genus() {
                return false;
            }
            e.opt_space();
            if !e.authorship() {
                return false;
            }
            if !e.is_eof() {
                e.bump();
            }
            true
        })
    }

    /// `UninomialCombo2 <- Uninomial _? RankUninomial _? Uninomial`
    fn uninomial_combo2(&mut self) -> bool {
        self.node(Rule::UninomialCombo2, |e| {
            if !e.uninomial() {
                return false;
            }
            e.opt_space();
            if !e.rank_uninomial() {
                return false;
            }
            e.opt_space();
            e.uninomial()
        })
    }

    /// `Uninomial <- UninomialWord (_ CultivarEpithet)? (_ Authorship)?`
    pub(crate) fn uninomial(&mut self) -> bool {
        self.node(Rule::Uninomial, |e| {
            if !e.uninomial_word() {
                return false;
            }
            e.opt(|e| e.space() && e.cultivar_epithet());
            e.opt(|e| e.space() && e.authorship());
            true
        })
    }
}
