//! PEG engine, grammar, AST and output transformer for scientific names.
//!
//! The pipeline inside this crate:
//!
//! 1. [`Engine`] parses a preprocessed buffer against the PEG grammar,
//!    producing a flat token array and a warning set;
//! 2. [`token_tree`] nests the tokens into a tree;
//! 3. [`ast`] materializes typed nodes, normalizing words and raising the
//!    remaining semantic warnings;
//! 4. [`output`] renders canonical forms, the normalized string, authorship
//!    details, word spans and cardinality.
//!
//! [`analyze`] runs the whole pipeline for one buffer. The facade crate
//! owns preprocessing, pooling and the final record assembly.

pub mod ast;
mod engine;
mod grammar;
pub mod output;
mod rule;
pub mod token_tree;

pub use engine::{Engine, Token};
pub use rule::Rule;

use nomen_ir::{Authorship, Canonical, Details, Hybrid, Surrogate, Warning, Word};
use rustc_hash::FxHashSet;

/// Everything the grammar and transformer extract from one buffer.
#[derive(Clone, Debug, Default)]
pub struct Analysis {
    pub parsed: bool,
    pub canonical: Option<Canonical>,
    pub normalized: Option<String>,
    pub cardinality: u8,
    pub authorship: Option<Authorship>,
    pub hybrid: Option<Hybrid>,
    pub surrogate: Option<Surrogate>,
    pub details: Option<Details>,
    pub words: Option<Vec<Word>>,
    pub tail: Option<String>,
    pub warnings: FxHashSet<Warning>,
}

/// Parse one cleaned buffer and transform the result.
///
/// `tail_offset` optionally truncates the grammar's view of the buffer (a
/// trailing annotation found by the preprocessor); the cut-off text joins
/// the unparsed tail. On grammar rejection the whole buffer becomes the
/// tail and the analysis is empty.
pub fn analyze(
    engine: &mut Engine,
    buffer: &str,
    tail_offset: Option<usize>,
    with_details: bool,
) -> Analysis {
    let head: String = match tail_offset {
        Some(off) => buffer.chars().take(off).collect(),
        None => buffer.to_string(),
    };

    engine.reset(&head);
    if !engine.run() {
        return Analysis {
            tail: Some(buffer.to_string()).filter(|t| !t.is_empty()),
            ..Analysis::default()
        };
    }

    let mut warnings = engine.take_warnings();
    let root = match token_tree::build(engine.tokens()) {
        Some(root) => root,
        None => return Analysis::default(),
    };
    if tracing::enabled!(tracing::Level::DEBUG) {
        let dump = token_tree::render(&root, &|s, e| engine.text(s, e));
        tracing::debug!(tree = %dump, "parse tree");
    }

    let sci = match ast::build(&root, engine, &mut warnings) {
        Some(sci) => sci,
        None => return Analysis::default(),
    };

    // The unparsed tail: grammar tail if any, else the preprocessor cut.
    let tail_start_chars = sci.tail_start;
    let tail = match (tail_start_chars, tail_offset) {
        (Some(start), _) => {
            let in_head: String = head.chars().skip(start).collect();
            let cut: String = match tail_offset {
                Some(off) => buffer.chars().skip(off).collect(),
                None => String::new(),
            };
            Some(format!("{in_head}{cut}"))
        }
        (None, Some(off)) => Some(buffer.chars().skip(off).collect()),
        (None, None) => None,
    }
    .map(|t| t.trim_start().to_string())
    .filter(|t| !t.is_empty());
    if tail.is_some() {
        warnings.insert(Warning::Tail);
    }

    let name = &sci.name;
    let canon = name.canonical();
    let canonical = Canonical {
        stemmed: nomen_stem::stem_canonical(&canon.value),
        simple: canon.value.clone(),
        full: canon.ranked.clone(),
    };
    let words = name.words();
    output::check_words(&words, engine.buffer_len());

    let authorship = name.last_authorship().map(|a| {
        let mut details = a.details();
        if !with_details {
            details.original = None;
            details.combination = None;
        }
        details
    });

    Analysis {
        parsed: true,
        normalized: Some(name.value()),
        cardinality: name.cardinality(),
        hybrid: name.hybrid(),
        surrogate: name.surrogate(),
        details: with_details.then(|| name.details()),
        words: with_details.then_some(words),
        canonical: Some(canonical),
        authorship,
        tail,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Analysis {
        let mut engine = Engine::new();
        analyze(&mut engine, input, None, true)
    }

    // === Uninomials ===

    #[test]
    fn uninomial() {
        let a = parse("Pomatomus");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 1);
        let c = a.canonical.unwrap();
        assert_eq!(c.simple, "Pomatomus");
        assert_eq!(c.stemmed, "Pomatomus");
        assert!(a.authorship.is_none());
        assert!(a.warnings.is_empty());
    }

    #[test]
    fn uninomial_with_authorship() {
        let a = parse("Pomatomus Linnaeus 1758");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 1);
        let au = a.authorship.unwrap();
        assert_eq!(au.authors, vec!["Linnaeus"]);
        assert_eq!(au.year.as_deref(), Some("1758"));
        assert_eq!(au.normalized, "Linnaeus 1758");
    }

    #[test]
    fn uninomial_combo_with_rank() {
        let a = parse("Poaceae trib. Poeae");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 1);
        let c = a.canonical.unwrap();
        assert_eq!(c.simple, "Poeae");
        assert_eq!(c.full, "Poaceae trib. Poeae");
        assert!(a.warnings.contains(&Warning::UninomialCombo));
        match a.details.unwrap() {
            Details::Uninomial(u) => {
                assert_eq!(u.value, "Poeae");
                assert_eq!(u.rank.as_deref(), Some("trib."));
                assert_eq!(u.parent.as_deref(), Some("Poaceae"));
            }
            other => panic!("unexpected details {other:?}"),
        }
    }

    // === Binomials ===

    #[test]
    fn binomial_with_author_abbreviation() {
        let a = parse("Betula alba L.");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 2);
        let c = a.canonical.unwrap();
        assert_eq!(c.simple, "Betula alba");
        assert_eq!(c.stemmed, "Betula alb");
        let au = a.authorship.unwrap();
        assert_eq!(au.authors, vec!["L."]);
        assert!(au.year.is_none());
        assert!(a.warnings.is_empty());
    }

    #[test]
    fn binomial_with_comma_year() {
        let a = parse("Homo sapiens Linnaeus, 1758");
        assert!(a.parsed);
        let au = a.authorship.unwrap();
        assert_eq!(au.authors, vec!["Linnaeus"]);
        assert_eq!(au.year.as_deref(), Some("1758"));
        assert_eq!(a.normalized.as_deref(), Some("Homo sapiens Linnaeus 1758"));
    }

    #[test]
    fn binomial_with_subgenus() {
        let a = parse("Pomatomus (Cheilodipterus) saltatrix");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 2);
        let c = a.canonical.unwrap();
        assert_eq!(c.simple, "Pomatomus saltatrix");
        assert_eq!(
            a.normalized.as_deref(),
            Some("Pomatomus (Cheilodipterus) saltatrix")
        );
        match a.details.unwrap() {
            Details::Species(s) => {
                assert_eq!(s.subgenus.as_deref(), Some("Cheilodipterus"));
            }
            other => panic!("unexpected details {other:?}"),
        }
    }

    #[test]
    fn abbreviated_genus() {
        let a = parse("H. sapiens");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 2);
        assert_eq!(a.canonical.unwrap().simple, "H. sapiens");
        assert!(a.warnings.contains(&Warning::GenusAbbr));
    }

    #[test]
    fn two_letter_genus() {
        let a = parse("Ca aus");
        assert!(a.parsed);
        assert_eq!(a.canonical.unwrap().simple, "Ca aus");
    }

    // === Infraspecies ===

    #[test]
    fn trinomial_with_rank() {
        let a = parse("Betula alba var. pubescens");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 3);
        let c = a.canonical.unwrap();
        assert_eq!(c.simple, "Betula alba pubescens");
        assert_eq!(c.full, "Betula alba var. pubescens");
    }

    #[test]
    fn trinomial_without_rank() {
        let a = parse("Betula alba pubescens");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 3);
        assert_eq!(a.canonical.unwrap().full, "Betula alba pubescens");
    }

    #[test]
    fn full_combination_authorship() {
        let a = parse("Aus bus var. cus (Smith) Jones ex Brown 1901");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 3);
        assert_eq!(a.canonical.unwrap().full, "Aus bus var. cus");
        let au = a.authorship.unwrap();
        let original = au.original.unwrap();
        assert_eq!(original.authors, vec!["Smith"]);
        let combination = au.combination.unwrap();
        assert_eq!(combination.authors, vec!["Jones", "Brown"]);
        let ex = combination.ex_authors.unwrap();
        assert_eq!(ex.authors, vec!["Brown"]);
        assert_eq!(au.year.as_deref(), Some("1901"));
        assert!(a.warnings.contains(&Warning::AuthEx));
    }

    #[test]
    fn basionym_authorship() {
        let a = parse("Betula alba (L.) Smith");
        let au = a.authorship.unwrap();
        assert_eq!(au.normalized, "(L.) Smith");
        assert_eq!(au.authors, vec!["L.", "Smith"]);
    }

    // === Years ===

    #[test]
    fn year_with_char_warns() {
        let a = parse("Foo bar Smith, 1901a");
        assert!(a.parsed);
        let au = a.authorship.unwrap();
        assert_eq!(au.year.as_deref(), Some("1901"));
        assert!(a.warnings.contains(&Warning::YearChar));
    }

    #[test]
    fn year_in_brackets_is_approximate() {
        let a = parse("Aus bus Smith [1901]");
        assert!(a.parsed);
        let au = a.authorship.unwrap();
        assert_eq!(au.year.as_deref(), Some("1901"));
        assert!(a.warnings.contains(&Warning::YearSqBrackets));
        let original = au.original.unwrap();
        assert!(original.year.unwrap().approximate);
    }

    #[test]
    fn misplaced_basionym_year() {
        let a = parse("Aus bus (Smith), 1901");
        assert!(a.parsed);
        assert!(a.warnings.contains(&Warning::YearMisplaced));
        let au = a.authorship.unwrap();
        assert_eq!(au.year.as_deref(), Some("1901"));
    }

    // === Hybrids and chimeras ===

    #[test]
    fn named_genus_hybrid() {
        let a = parse("× Agropogon littoralis");
        assert!(a.parsed);
        let c = a.canonical.unwrap();
        assert_eq!(c.simple, "× Agropogon littoralis");
        assert_eq!(c.full, "× Agropogon littoralis");
        assert_eq!(a.hybrid, Some(Hybrid::NamedGenusHybrid));
        assert!(a.warnings.contains(&Warning::HybridNamed));
    }

    #[test]
    fn named_species_hybrid() {
        let a = parse("Salix × capreola");
        assert!(a.parsed);
        let c = a.canonical.unwrap();
        assert_eq!(c.simple, "Salix capreola");
        assert_eq!(c.full, "Salix × capreola");
        assert_eq!(a.hybrid, Some(Hybrid::NamedSpeciesHybrid));
        assert_eq!(a.cardinality, 2);
    }

    #[test]
    fn hybrid_formula() {
        let a = parse("Stanhopea tigrina × Stanhopea ecornuta");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 0);
        assert_eq!(
            a.canonical.unwrap().simple,
            "Stanhopea tigrina × Stanhopea ecornuta"
        );
        assert_eq!(a.hybrid, Some(Hybrid::HybridFormula));
        assert!(a.warnings.contains(&Warning::HybridFormula));
    }

    #[test]
    fn graft_chimera_formula() {
        let a = parse("Crataegus + Mespilus");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 0);
        let c = a.canonical.unwrap();
        assert_eq!(c.simple, "Crataegus + Mespilus");
        assert_eq!(c.stemmed, "Crataegus + Mespilus");
        assert!(a.hybrid.is_none());
        assert!(a.warnings.contains(&Warning::GraftChimeraFormula));
    }

    #[test]
    fn incomplete_hybrid_formula() {
        let a = parse("Aus bus ×");
        assert!(a.parsed);
        assert!(a.warnings.contains(&Warning::HybridFormulaIncomplete));
    }

    // === Approximations and comparisons ===

    #[test]
    fn approximation() {
        let a = parse("Pomatomus sp.");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 0);
        assert_eq!(a.surrogate, Some(Surrogate::Approximation));
        assert_eq!(a.canonical.unwrap().simple, "Pomatomus");
        assert!(a.warnings.contains(&Warning::NameApprox));
    }

    #[test]
    fn approximation_with_ignored_text() {
        let a = parse("Pomatomus sp. near saltatrix");
        assert!(a.parsed);
        match a.details.unwrap() {
            Details::Approximation(ap) => {
                assert_eq!(ap.genus, "Pomatomus");
                assert_eq!(ap.ignored.as_deref(), Some(" near saltatrix"));
            }
            other => panic!("unexpected details {other:?}"),
        }
    }

    #[test]
    fn comparison() {
        let a = parse("Homo cf. sapiens");
        assert!(a.parsed);
        assert_eq!(a.cardinality, 2);
        assert_eq!(a.surrogate, Some(Surrogate::Comparison));
        assert_eq!(a.canonical.unwrap().simple, "Homo sapiens");
        assert!(a.warnings.contains(&Warning::NameComparison));
    }

    // === Normalization ===

    #[test]
    fn folds_extended_characters() {
        let a = parse("Leptochloöpsis virgata");
        assert!(a.parsed);
        let c = a.canonical.unwrap();
        assert_eq!(c.simple, "Leptochloopsis virgata");
        assert_eq!(c.stemmed, "Leptochloopsis uirgat");
        assert!(a.warnings.contains(&Warning::CharBad));
    }

    #[test]
    fn numeric_prefix_is_spelled_out() {
        let a = parse("Aus 1-setosus");
        assert!(a.parsed);
        assert_eq!(a.canonical.unwrap().simple, "Aus unisetosus");
        assert!(a.warnings.contains(&Warning::SpeciesNumeric));
    }

    #[test]
    fn apostrophe_epithet() {
        let a = parse("Junellia o'donelli");
        assert!(a.parsed);
        assert_eq!(a.canonical.unwrap().simple, "Junellia o'donelli");
        assert!(a.warnings.contains(&Warning::CanonicalApostrophe));
    }

    #[test]
    fn uppercase_author_is_normalized() {
        let a = parse("Aus bus SMITH");
        assert!(a.parsed);
        let au = a.authorship.unwrap();
        assert_eq!(au.authors, vec!["Smith"]);
        assert!(a.warnings.contains(&Warning::AuthUpperCase));
    }

    // === Tail ===

    #[test]
    fn trailing_garbage_is_tail() {
        let a = parse("Pomatomus saltatrix 123");
        assert!(a.parsed);
        assert_eq!(a.tail.as_deref(), Some("123"));
        assert!(a.warnings.contains(&Warning::Tail));
    }

    #[test]
    fn capitalized_garbage_after_comma_is_tail() {
        let a = parse("Betula alba, Linnaeus");
        assert!(a.parsed);
        assert_eq!(a.canonical.unwrap().simple, "Betula alba");
        assert_eq!(a.tail.as_deref(), Some("Linnaeus"));
    }

    #[test]
    fn unparseable_input() {
        let a = parse("SomeRandomText123");
        assert!(!a.parsed);
        assert!(a.canonical.is_none());
        assert_eq!(a.tail.as_deref(), Some("SomeRandomText123"));
        assert!(a.warnings.is_empty());
    }

    #[test]
    fn empty_input() {
        let a = parse("");
        assert!(!a.parsed);
        assert!(a.tail.is_none());
    }

    // === Cultivars ===

    #[test]
    fn cultivar_epithet() {
        let a = parse("Rosa 'Peace'");
        assert!(a.parsed);
        let c = a.canonical.unwrap();
        assert_eq!(c.simple, "Rosa 'Peace'");
        assert!(a.warnings.contains(&Warning::CultivarEpithet));
    }

    #[test]
    fn cultivars_can_be_disabled() {
        let mut engine = Engine::new();
        engine.disable_cultivars();
        let a = analyze(&mut engine, "Rosa 'Peace'", None, false);
        assert!(a.parsed);
        assert_eq!(a.canonical.unwrap().simple, "Rosa");
        assert_eq!(a.tail.as_deref(), Some("'Peace'"));
    }

    // === Output forms ===

    #[test]
    fn last_authorship_is_deepest() {
        let a = parse("Betula alba var. pubescens Ehrh.");
        let au = a.authorship.unwrap();
        assert_eq!(au.authors, vec!["Ehrh."]);
    }

    #[test]
    fn words_are_ordered_and_tagged() {
        use nomen_ir::WordType;
        let a = parse("Betula alba L.");
        let words = a.words.unwrap();
        let types: Vec<WordType> = words.iter().map(|w| w.word_type).collect();
        assert_eq!(
            types,
            vec![WordType::Genus, WordType::SpEpithet, WordType::AuthorWord]
        );
        assert!(words.windows(2).all(|p| p[0].end <= p[1].start));
    }

    #[test]
    fn canonical_round_trip() {
        for input in [
            "Pomatomus",
            "Betula alba L.",
            "Aus bus var. cus (Smith) Jones ex Brown 1901",
            "Homo sapiens Linnaeus, 1758",
            "Salix × capreola",
            "Crataegus + Mespilus",
        ] {
            let first = parse(input);
            let simple = first.canonical.expect("first parse").simple;
            let second = parse(&simple);
            let again = second.canonical.expect("round-trip parse").simple;
            assert_eq!(simple, again, "round trip failed for {input}");
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_panics(input in "\\PC{0,64}") {
                let mut engine = Engine::new();
                let _ = analyze(&mut engine, &input, None, true);
            }

            #[test]
            fn word_spans_stay_in_buffer(
                genus in "[A-Z][a-z]{2,8}",
                epithet in "[a-z]{3,8}",
            ) {
                // A `cf` onset reads as a comparison marker and aborts
                // the parse.
                prop_assume!(!epithet.starts_with("cf"));
                let input = format!("{genus} {epithet}");
                let mut engine = Engine::new();
                let a = analyze(&mut engine, &input, None, true);
                prop_assert!(a.parsed);
                let len = input.chars().count();
                let words = a.words.unwrap();
                let mut prev_end = 0;
                for w in &words {
                    prop_assert!(w.start < w.end);
                    prop_assert!(w.end <= len);
                    prop_assert!(w.start >= prev_end);
                    prev_end = w.end;
                }
            }
        }
    }
}
