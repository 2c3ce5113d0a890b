//! Typed AST built from the token tree.
//!
//! The builder descends the nested tokens and materializes typed nodes.
//! Each node owns its rune span plus a normalized rendering of its text;
//! normalization folds extended letters to ASCII, expands numeric
//! prefixes, and canonicalizes rank markers, raising the matching warnings
//! as it goes.

use nomen_ir::{Warning, WordType};
use rustc_hash::FxHashSet;

use crate::engine::Engine;
use crate::rule::Rule;
use crate::token_tree::Node;

/// A word with its position and both renderings.
#[derive(Clone, Debug)]
pub struct WordNode {
    pub start: usize,
    pub end: usize,
    pub verbatim: String,
    pub norm: String,
    pub wtype: WordType,
}

/// The name itself, one variant per shape the grammar recognizes.
#[derive(Clone, Debug)]
pub enum NameData {
    Uninomial(UninomialNode),
    UninomialCombo(UninomialComboNode),
    Species(SpeciesNode),
    Comparison(ComparisonNode),
    Approximation(ApproxNode),
    NamedGenusHybrid(NamedGenusHybridNode),
    NamedSpeciesHybrid(NamedSpeciesHybridNode),
    Formula(FormulaNode),
}

#[derive(Clone, Debug)]
pub struct UninomialNode {
    pub word: WordNode,
    pub cultivar: Option<WordNode>,
    pub authorship: Option<AuthorshipNode>,
}

#[derive(Clone, Debug)]
pub struct UninomialComboNode {
    pub parent: UninomialNode,
    /// Rank word; absent for the subgenus form, which gets a synthetic
    /// `subgen.` marker with no position.
    pub rank: Option<WordNode>,
    pub rank_norm: String,
    pub terminal: UninomialNode,
}

#[derive(Clone, Debug)]
pub struct SpeciesNode {
    /// Absent in hybrid-formula parts where the genus is implied.
    pub genus: Option<WordNode>,
    pub subgenus: Option<WordNode>,
    pub sp: SpEpithetNode,
    pub infraspecies: Vec<InfraspEpithetNode>,
    pub cultivar: Option<WordNode>,
}

#[derive(Clone, Debug)]
pub struct SpEpithetNode {
    pub word: WordNode,
    pub authorship: Option<AuthorshipNode>,
}

#[derive(Clone, Debug)]
pub struct InfraspEpithetNode {
    pub word: WordNode,
    pub rank: Option<WordNode>,
    pub authorship: Option<AuthorshipNode>,
}

#[derive(Clone, Debug)]
pub struct ComparisonNode {
    pub genus: WordNode,
    pub marker: WordNode,
    pub sp: Option<SpEpithetNode>,
}

#[derive(Clone, Debug)]
pub struct ApproxNode {
    pub genus: WordNode,
    pub sp: Option<SpEpithetNode>,
    pub marker: WordNode,
    pub ignored: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NamedGenusHybridNode {
    pub hybrid_char: WordNode,
    pub name: Box<NameData>,
}

#[derive(Clone, Debug)]
pub struct NamedSpeciesHybridNode {
    pub genus: WordNode,
    pub hybrid_char: WordNode,
    pub sp: SpEpithetNode,
}

/// A hybrid (`×`) or graft-chimera (`+`) formula.
#[derive(Clone, Debug)]
pub struct FormulaNode {
    pub chimera: bool,
    pub first: Box<NameData>,
    pub elements: Vec<FormulaElement>,
}

#[derive(Clone, Debug)]
pub struct FormulaElement {
    pub join_char: WordNode,
    pub name: Option<Box<NameData>>,
}

#[derive(Clone, Debug)]
pub struct AuthorshipNode {
    pub start: usize,
    pub end: usize,
    pub verbatim: String,
    /// Original authors were parenthesized (basionym of a recombination).
    pub parens: bool,
    pub original: Option<AuthGroupNode>,
    pub combination: Option<AuthGroupNode>,
}

#[derive(Clone, Debug)]
pub struct AuthGroupNode {
    pub team1: AuthorsTeamNode,
    pub team2: Option<Team2Node>,
}

#[derive(Clone, Debug)]
pub struct Team2Node {
    pub kind: Team2Kind,
    /// Normalized attribution word, `ex` or `emend.`.
    pub word: String,
    pub team: AuthorsTeamNode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Team2Kind {
    Ex,
    Emend,
}

#[derive(Clone, Debug, Default)]
pub struct AuthorsTeamNode {
    pub authors: Vec<AuthorNode>,
    pub year: Option<YearNode>,
}

#[derive(Clone, Debug)]
pub struct AuthorNode {
    pub words: Vec<WordNode>,
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct YearNode {
    pub word: WordNode,
    pub approximate: bool,
}

/// The built name: data plus the offset of the unparsed tail.
#[derive(Clone, Debug)]
pub struct ScientificName {
    pub name: NameData,
    pub tail_start: Option<usize>,
}

/// Numeric epithet prefixes spelled out during normalization.
const NUM_WORDS: &[(&str, &str)] = &[
    ("1", "uni"),
    ("2", "bi"),
    ("3", "tri"),
    ("4", "quadri"),
    ("5", "quinque"),
    ("6", "sex"),
    ("7", "septem"),
    ("8", "octo"),
    ("9", "novem"),
];

/// Build the typed name from the parse tree.
///
/// `root` must be the `SciName` node. Returns `None` for trees with no
/// name child, which cannot happen for a successful parse.
pub fn build(
    root: &Node,
    engine: &Engine,
    warnings: &mut FxHashSet<Warning>,
) -> Option<ScientificName> {
    let mut builder = Builder { engine, warnings };
    let mut name = None;
    let mut tail_start = None;
    for child in &root.children {
        match child.rule {
            Rule::Tail => tail_start = Some(child.start),
            _ => name = Some(builder.name(child)),
        }
    }
    Some(ScientificName {
        name: name?,
        tail_start,
    })
}

struct Builder<'a> {
    engine: &'a Engine,
    warnings: &'a mut FxHashSet<Warning>,
}

impl Builder<'_> {
    fn text(&self, node: &Node) -> String {
        self.engine.text(node.start, node.end)
    }

    fn warn(&mut self, warning: Warning) {
        self.warnings.insert(warning);
    }

    // === Name shapes ===

    fn name(&mut self, node: &Node) -> NameData {
        match node.rule {
            Rule::NamedGenusHybrid => self.named_genus_hybrid(node),
            Rule::NamedSpeciesHybrid => self.named_species_hybrid(node),
            Rule::HybridFormula => self.formula(node, false),
            Rule::GraftChimeraFormula => self.formula(node, true),
            Rule::NameComp => self.comparison(node),
            Rule::NameApprox => self.approximation(node),
            Rule::NameSpecies => NameData::Species(self.species(node)),
            Rule::UninomialCombo1 => self.uninomial_combo1(node),
            Rule::UninomialCombo2 => self.uninomial_combo2(node),
            Rule::Uninomial => NameData::Uninomial(self.uninomial(node)),
            other => {
                debug_assert!(false, "unexpected name rule {other:?}");
                NameData::Uninomial(UninomialNode {
                    word: self.name_word(node, WordType::Uninomial),
                    cultivar: None,
                    authorship: None,
                })
            }
        }
    }

    fn named_genus_hybrid(&mut self, node: &Node) -> NameData {
        self.warn(Warning::HybridNamed);
        let hybrid_char = self.char_word(node.child(Rule::HybridChar), WordType::HybridChar);
        let inner = node
            .children
            .iter()
            .find(|c| c.rule != Rule::HybridChar)
            .expect("named genus hybrid has a name");
        if hybrid_char.end == inner.start {
            self.warn(Warning::HybridCharNoSpace);
        }
        let name = self.name(inner);
        NameData::NamedGenusHybrid(NamedGenusHybridNode {
            hybrid_char,
            name: Box::new(name),
        })
    }

    fn named_species_hybrid(&mut self, node: &Node) -> NameData {
        self.warn(Warning::HybridNamed);
        let genus = self.genus_word(node.child(Rule::GenusWord).expect("genus"));
        let hybrid_char = self.char_word(node.child(Rule::HybridChar), WordType::HybridChar);
        let ep_node = node.child(Rule::SpeciesEpithet).expect("species epithet");
        if hybrid_char.end == ep_node.start {
            self.warn(Warning::HybridCharNoSpace);
        }
        let sp = self.sp_epithet(ep_node);
        NameData::NamedSpeciesHybrid(NamedSpeciesHybridNode {
            genus,
            hybrid_char,
            sp,
        })
    }

    fn formula(&mut self, node: &Node, chimera: bool) -> NameData {
        self.warn(if chimera {
            Warning::GraftChimeraFormula
        } else {
            Warning::HybridFormula
        });
        let first = self.name(&node.children[0]);
        let mut elements = Vec::new();
        let (full_rule, part_rule, char_rule, char_type) = if chimera {
            (
                Rule::GraftChimeraFull,
                Rule::GraftChimeraPart,
                Rule::GraftChimeraChar,
                WordType::GraftChimeraChar,
            )
        } else {
            (
                Rule::HybridFormulaFull,
                Rule::HybridFormulaPart,
                Rule::HybridChar,
                WordType::HybridChar,
            )
        };
        for child in &node.children[1..] {
            if child.rule == full_rule {
                let join_char = self.char_word(child.child(char_rule), char_type);
                let inner = child.children.iter().find(|c| c.rule != char_rule);
                let name = match inner {
                    Some(inner) => Some(Box::new(self.name(inner))),
                    None => {
                        self.warn(Warning::HybridFormulaIncomplete);
                        None
                    }
                };
                elements.push(FormulaElement { join_char, name });
            } else if child.rule == part_rule {
                self.warn(Warning::HybridFormulaProbIncomplete);
                let join_char = self.char_word(child.child(char_rule), char_type);
                let sp = self.sp_epithet(child.child(Rule::SpeciesEpithet).expect("epithet"));
                let infraspecies = child
                    .child(Rule::InfraspGroup)
                    .map(|g| self.infrasp_group(g))
                    .unwrap_or_default();
                let species = SpeciesNode {
                    genus: None,
                    subgenus: None,
                    sp,
                    infraspecies,
                    cultivar: None,
                };
                elements.push(FormulaElement {
                    join_char,
                    name: Some(Box::new(NameData::Species(species))),
                });
            }
        }
        NameData::Formula(FormulaNode {
            chimera,
            first: Box::new(first),
            elements,
        })
    }

    fn comparison(&mut self, node: &Node) -> NameData {
        self.warn(Warning::NameComparison);
        let genus = self.genus_word(node.child(Rule::GenusWord).expect("genus"));
        let marker_node = node.child(Rule::Comparison).expect("marker");
        let marker = WordNode {
            start: marker_node.start,
            end: marker_node.end,
            verbatim: self.text(marker_node),
            norm: "cf.".to_string(),
            wtype: WordType::ComparisonMarker,
        };
        let sp = node
            .child(Rule::SpeciesEpithet)
            .map(|n| self.sp_epithet(n));
        NameData::Comparison(ComparisonNode { genus, marker, sp })
    }

    fn approximation(&mut self, node: &Node) -> NameData {
        self.warn(Warning::NameApprox);
        let genus = self.genus_word(node.child(Rule::GenusWord).expect("genus"));
        let sp = node
            .child(Rule::SpeciesEpithet)
            .map(|n| self.sp_epithet(n));
        let marker_node = node.child(Rule::Approximation).expect("marker");
        let marker = WordNode {
            start: marker_node.start,
            end: marker_node.end,
            verbatim: self.text(marker_node),
            norm: self.text(marker_node),
            wtype: WordType::ApproximationMarker,
        };
        let ignored = node
            .child(Rule::ApproxNameIgnored)
            .map(|n| self.text(n))
            .filter(|t| !t.is_empty());
        NameData::Approximation(ApproxNode {
            genus,
            sp,
            marker,
            ignored,
        })
    }

    fn species(&mut self, node: &Node) -> SpeciesNode {
        let genus = self.genus_word(node.child(Rule::GenusWord).expect("genus"));
        let subgenus = node.child(Rule::SubGenus).map(|sg| {
            let word = sg
                .child(Rule::UninomialWord)
                .expect("subgenus uninomial word");
            self.name_word(word, WordType::Subgenus)
        });
        if node.child(Rule::SubGenusOrSuperspecies).is_some() {
            self.warn(Warning::Superspecies);
        }
        let sp = self.sp_epithet(node.child(Rule::SpeciesEpithet).expect("epithet"));
        let infraspecies = node
            .child(Rule::InfraspGroup)
            .map(|g| self.infrasp_group(g))
            .unwrap_or_default();
        let cultivar = node
            .child(Rule::CultivarEpithet)
            .map(|c| self.cultivar_word(c));
        SpeciesNode {
            genus: Some(genus),
            subgenus,
            sp,
            infraspecies,
            cultivar,
        }
    }

    fn uninomial(&mut self, node: &Node) -> UninomialNode {
        let word = self.name_word(
            node.child(Rule::UninomialWord).expect("uninomial word"),
            WordType::Uninomial,
        );
        let cultivar = node
            .child(Rule::CultivarEpithet)
            .map(|c| self.cultivar_word(c));
        let authorship = node.child(Rule::Authorship).map(|a| self.authorship(a));
        UninomialNode {
            word,
            cultivar,
            authorship,
        }
    }

    /// `Uninomial (Subgenus)` combination: the subgenus is the terminal
    /// uninomial, ranked with a synthetic `subgen.` marker.
    fn uninomial_combo1(&mut self, node: &Node) -> NameData {
        self.warn(Warning::UninomialCombo);
        let parent_word = self.name_word(
            node.child(Rule::UninomialWord).expect("parent word"),
            WordType::Uninomial,
        );
        let sub = node.child(Rule::SubGenus).expect("subgenus");
        let terminal_word = self.name_word(
            sub.child(Rule::UninomialWord).expect("subgenus word"),
            WordType::Uninomial,
        );
        let authorship = node.child(Rule::Authorship).map(|a| self.authorship(a));
        NameData::UninomialCombo(UninomialComboNode {
            parent: UninomialNode {
                word: parent_word,
                cultivar: None,
                authorship: None,
            },
            rank: None,
            rank_norm: "subgen.".to_string(),
            terminal: UninomialNode {
                word: terminal_word,
                cultivar: None,
                authorship,
            },
        })
    }

    fn uninomial_combo2(&mut self, node: &Node) -> NameData {
        self.warn(Warning::UninomialCombo);
        let mut uninomials = node.children_of(Rule::Uninomial);
        let parent = uninomials.next().expect("first uninomial");
        let terminal = uninomials.next().expect("second uninomial");
        let rank_node = node.child(Rule::RankUninomial).expect("rank");
        let rank_text = self.text(rank_node);
        let rank_norm = if rank_text.ends_with('.') {
            rank_text.clone()
        } else {
            format!("{rank_text}.")
        };
        let rank = WordNode {
            start: rank_node.start,
            end: rank_node.end,
            verbatim: rank_text,
            norm: rank_norm.clone(),
            wtype: WordType::Rank,
        };
        NameData::UninomialCombo(UninomialComboNode {
            parent: self.uninomial(parent),
            rank: Some(rank),
            rank_norm,
            terminal: self.uninomial(terminal),
        })
    }

    // === Epithets ===

    fn sp_epithet(&mut self, node: &Node) -> SpEpithetNode {
        let word = self.name_word(node.child(Rule::Word).expect("word"), WordType::SpEpithet);
        let authorship = node.child(Rule::Authorship).map(|a| self.authorship(a));
        SpEpithetNode { word, authorship }
    }

    fn infrasp_group(&mut self, node: &Node) -> Vec<InfraspEpithetNode> {
        node.children_of(Rule::InfraspEpithet)
            .collect::<Vec<_>>()
            .into_iter()
            .map(|ep| self.infrasp_epithet(ep))
            .collect()
    }

    fn infrasp_epithet(&mut self, node: &Node) -> InfraspEpithetNode {
        let rank = node.child(Rule::Rank).map(|r| self.rank(r));
        let word = self.name_word(
            node.child(Rule::Word).expect("word"),
            WordType::InfraspEpithet,
        );
        let authorship = node.child(Rule::Authorship).map(|a| self.authorship(a));
        InfraspEpithetNode {
            word,
            rank,
            authorship,
        }
    }

    fn rank(&mut self, node: &Node) -> WordNode {
        let verbatim = self.text(node);
        let variant = node.children.first();
        let norm = match variant.map(|v| v.rule) {
            Some(Rule::RankVar) => "var.".to_string(),
            Some(Rule::RankForma) => "f.".to_string(),
            Some(Rule::RankSsp) => "subsp.".to_string(),
            Some(Rule::RankOther) | Some(Rule::RankOtherUncommon) => {
                self.warn(Warning::RankUncommon);
                if verbatim.chars().all(nomen_chars::is_greek_rank) {
                    self.warn(Warning::GreekLetterInRank);
                }
                verbatim.clone()
            }
            _ => verbatim.clone(),
        };
        WordNode {
            start: node.start,
            end: node.end,
            verbatim,
            norm,
            wtype: WordType::Rank,
        }
    }

    // === Words ===

    fn genus_word(&mut self, node: &Node) -> WordNode {
        if let Some(abbr) = node.child(Rule::AbbrGenus) {
            self.warn(Warning::GenusAbbr);
            let text = self.text(abbr);
            return WordNode {
                start: abbr.start,
                end: abbr.end,
                verbatim: text.clone(),
                norm: text,
                wtype: WordType::Genus,
            };
        }
        let word = node.child(Rule::UninomialWord).expect("uninomial word");
        self.name_word(word, WordType::Genus)
    }

    /// Normalize a name word: ASCII folding, question-mark stripping,
    /// post-dash case correction, numeric prefix expansion.
    fn name_word(&mut self, node: &Node, wtype: WordType) -> WordNode {
        let verbatim = self.text(node);
        let mut norm = verbatim.clone();

        if let Some(stripped) = norm.strip_suffix('?') {
            self.warn(Warning::CapWordQuestion);
            norm = stripped.to_string();
        }

        if node.child(Rule::CapWord2).is_some() || wtype == WordType::Genus {
            if let Some((head, tail)) = norm.split_once('-') {
                if tail.chars().next().is_some_and(char::is_uppercase) {
                    self.warn(Warning::GenusUpperCharAfterDash);
                    let mut lowered = String::with_capacity(tail.len());
                    for (i, c) in tail.chars().enumerate() {
                        if i == 0 {
                            lowered.extend(c.to_lowercase());
                        } else {
                            lowered.push(c);
                        }
                    }
                    norm = format!("{head}-{lowered}");
                }
            }
        }

        if let Some(digit_word) = node.child(Rule::WordStartsWithDigit) {
            norm = self.expand_numeric(&self.engine.text(digit_word.start, digit_word.end));
        }
        if node.child(Rule::WordApostr).is_some() {
            self.warn(Warning::CanonicalApostrophe);
        }

        norm = self.fold_to_ascii(&norm);
        WordNode {
            start: node.start,
            end: node.end,
            verbatim,
            norm,
            wtype,
        }
    }

    fn expand_numeric(&mut self, text: &str) -> String {
        self.warn(Warning::SpeciesNumeric);
        let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
        let rest: String = text
            .chars()
            .skip(digits.chars().count())
            .skip_while(|&c| c == '.' || c == '-')
            .collect();
        match NUM_WORDS.iter().find(|(d, _)| *d == digits) {
            Some((_, word)) => format!("{word}{rest}"),
            None => text.to_string(),
        }
    }

    /// Fold extended letters to ASCII, warning per kind.
    fn fold_to_ascii(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match nomen_chars::fold_name_char(c) {
                Some(folded) => {
                    if nomen_chars::is_misencoded(c) {
                        self.warn(Warning::Utf8ConvBad);
                    } else {
                        self.warn(Warning::CharBad);
                    }
                    out.push_str(folded);
                }
                None => out.push(c),
            }
        }
        out
    }

    fn cultivar_word(&mut self, node: &Node) -> WordNode {
        self.warn(Warning::CultivarEpithet);
        let verbatim = self.text(node);
        let trimmed = verbatim.trim_start_matches("cv.").trim_start();
        let norm = trimmed.trim_matches('\'').to_string();
        WordNode {
            start: node.start,
            end: node.end,
            verbatim,
            norm,
            wtype: WordType::CultivarEpithet,
        }
    }

    fn char_word(&mut self, node: Option<&Node>, wtype: WordType) -> WordNode {
        let node = node.expect("join char token");
        let text = self.text(node);
        WordNode {
            start: node.start,
            end: node.end,
            verbatim: text.clone(),
            norm: text,
            wtype,
        }
    }

    // === Authorship ===

    fn authorship(&mut self, node: &Node) -> AuthorshipNode {
        let verbatim = self.text(node);
        let mut parens = false;
        let mut original = None;
        let mut combination = None;

        if let Some(orig) = node.child(Rule::OriginalAuthorship) {
            let first = orig.children.first().expect("original authorship child");
            match first.rule {
                Rule::AuthorsGroup => {
                    original = Some(self.authors_group(first));
                }
                Rule::BasionymAuthorship => {
                    parens = true;
                    if first.child(Rule::BasionymAuthorship2Parens).is_some() {
                        self.warn(Warning::AuthDoubleParens);
                    }
                    if let Some(group) = find_group(first) {
                        original = Some(self.authors_group(group));
                    }
                }
                Rule::BasionymAuthorshipYearMisformed => {
                    parens = true;
                    self.warn(Warning::YearMisplaced);
                    if let Some(group) = find_group(first) {
                        let mut group = self.authors_group(group);
                        if let Some(year_node) = first.child(Rule::Year) {
                            let year = self.year(year_node);
                            if group.team1.year.is_none() {
                                group.team1.year = Some(year);
                            }
                        }
                        original = Some(group);
                    }
                }
                other => debug_assert!(false, "unexpected original authorship child {other:?}"),
            }
        }
        if let Some(comb) = node.child(Rule::CombinationAuthorship) {
            if let Some(group) = comb.child(Rule::AuthorsGroup) {
                combination = Some(self.authors_group(group));
            }
        }

        AuthorshipNode {
            start: node.start,
            end: node.end,
            verbatim,
            parens,
            original,
            combination,
        }
    }

    fn authors_group(&mut self, node: &Node) -> AuthGroupNode {
        let mut teams = node.children_of(Rule::AuthorsTeam);
        let team1_node = teams.next().expect("first team");
        let team2_node = teams.next();
        let team1 = self.authors_team(team1_node);

        let team2 = team2_node.map(|t2| {
            let (kind, word) = if let Some(emend) = node.child(Rule::AuthorEmend) {
                self.warn(Warning::AuthEmend);
                if !self.text(emend).contains('.') {
                    self.warn(Warning::AuthEmendWithoutDot);
                }
                (Team2Kind::Emend, "emend.".to_string())
            } else if let Some(ex) = node.child(Rule::AuthorEx) {
                self.warn(Warning::AuthEx);
                if self.text(ex).contains('.') {
                    self.warn(Warning::AuthExWithDot);
                }
                (Team2Kind::Ex, "ex".to_string())
            } else {
                (Team2Kind::Ex, "ex".to_string())
            };
            Team2Node {
                kind,
                word,
                team: self.authors_team(t2),
            }
        });

        AuthGroupNode { team1, team2 }
    }

    fn authors_team(&mut self, node: &Node) -> AuthorsTeamNode {
        let authors = node
            .children_of(Rule::Author)
            .collect::<Vec<_>>()
            .into_iter()
            .map(|a| self.author(a))
            .collect();
        let year = node.child(Rule::Year).map(|y| self.year(y));
        AuthorsTeamNode { authors, year }
    }

    fn author(&mut self, node: &Node) -> AuthorNode {
        if let Some(unknown) = node.child(Rule::UnknownAuthor) {
            let text = self.text(unknown);
            if text == "?" {
                self.warn(Warning::AuthQuestion);
            } else {
                self.warn(Warning::AuthUnknown);
            }
            let norm = match text.as_str() {
                "auct" => "auct.".to_string(),
                "anon" => "anon.".to_string(),
                other => other.to_string(),
            };
            let word = WordNode {
                start: unknown.start,
                end: unknown.end,
                verbatim: text,
                norm: norm.clone(),
                wtype: WordType::AuthorWord,
            };
            return AuthorNode {
                words: vec![word],
                value: norm,
            };
        }

        let mut words = Vec::new();
        for child in &node.children {
            match child.rule {
                Rule::AuthorWord => {
                    let verbatim = self.text(child);
                    let norm = self.normalize_author_word(&verbatim);
                    words.push(WordNode {
                        start: child.start,
                        end: child.end,
                        verbatim,
                        norm,
                        wtype: WordType::AuthorWord,
                    });
                }
                Rule::Filius => {
                    self.warn(Warning::AuthAmbiguousFilius);
                    words.push(WordNode {
                        start: child.start,
                        end: child.end,
                        verbatim: self.text(child),
                        norm: "fil.".to_string(),
                        wtype: WordType::AuthorWordFilius,
                    });
                }
                _ => {}
            }
        }
        let value = words
            .iter()
            .map(|w| w.norm.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        AuthorNode { words, value }
    }

    /// Fix an all-caps author word down to title case.
    fn normalize_author_word(&mut self, word: &str) -> String {
        let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
        let all_caps = letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase());
        if !all_caps {
            return word.to_string();
        }
        self.warn(Warning::AuthUpperCase);
        let mut out = String::with_capacity(word.len());
        for (i, c) in word.chars().enumerate() {
            if i == 0 {
                out.push(c);
            } else {
                out.extend(c.to_lowercase());
            }
        }
        out
    }

    // === Year ===

    fn year(&mut self, node: &Node) -> YearNode {
        let variant = node.children.first().expect("year variant");
        let (approximate, num_node) = match variant.rule {
            Rule::YearNum => (false, variant),
            Rule::YearRange => {
                self.warn(Warning::YearRange);
                (true, find_year_num(variant).unwrap_or(variant))
            }
            Rule::YearApprox => {
                self.warn(Warning::YearSqBrackets);
                (true, find_year_num(variant).unwrap_or(variant))
            }
            Rule::YearWithParens => {
                self.warn(Warning::YearParens);
                (false, find_year_num(variant).unwrap_or(variant))
            }
            Rule::YearWithPage => {
                self.warn(Warning::YearPage);
                (false, find_year_num(variant).unwrap_or(variant))
            }
            Rule::YearWithDot => {
                self.warn(Warning::YearDot);
                (false, find_year_num(variant).unwrap_or(variant))
            }
            Rule::YearWithChar => {
                self.warn(Warning::YearChar);
                (true, find_year_num(variant).unwrap_or(variant))
            }
            _ => (false, variant),
        };
        // A YearWithChar nested in a page or parens year still warns.
        if variant.rule != Rule::YearWithChar && find_rule(variant, Rule::YearWithChar).is_some() {
            self.warn(Warning::YearChar);
        }

        let value = self.engine.text(num_node.start, num_node.end);
        if value.contains('?') {
            self.warn(Warning::YearQuestion);
        }
        let wtype = if approximate {
            WordType::ApproximateYear
        } else {
            WordType::Year
        };
        YearNode {
            word: WordNode {
                start: num_node.start,
                end: num_node.end,
                verbatim: value.clone(),
                norm: value,
                wtype,
            },
            approximate,
        }
    }
}

/// First `AuthorsGroup` descendant, however deep the parens nest it.
fn find_group(node: &Node) -> Option<&Node> {
    find_rule(node, Rule::AuthorsGroup)
}

fn find_year_num(node: &Node) -> Option<&Node> {
    find_rule(node, Rule::YearNum)
}

fn find_rule(node: &Node, rule: Rule) -> Option<&Node> {
    for child in &node.children {
        if child.rule == rule {
            return Some(child);
        }
        if let Some(found) = find_rule(child, rule) {
            return Some(found);
        }
    }
    None
}
