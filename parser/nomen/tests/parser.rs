//! End-to-end scenarios against the public facade.

use pretty_assertions::assert_eq;

use nomen::{Details, NameParser, Options, Surrogate};

fn parser() -> NameParser {
    NameParser::new(Options::new().is_test(true).with_details(true).jobs_num(2))
}

#[test]
fn uninomial_clean_parse() {
    let p = parser().parse("Pomatomus");
    assert!(p.parsed);
    assert_eq!(p.cardinality, 1);
    let c = p.canonical.expect("canonical");
    assert_eq!(c.simple, "Pomatomus");
    assert_eq!(c.stemmed, "Pomatomus");
    assert!(p.authorship.is_none());
    assert_eq!(p.quality, 1);
    assert!(p.quality_warnings.is_empty());
    assert_eq!(p.parser_version, "test_version");
}

#[test]
fn binomial_with_author() {
    let p = parser().parse("Betula alba L.");
    assert!(p.parsed);
    assert_eq!(p.cardinality, 2);
    let c = p.canonical.expect("canonical");
    assert_eq!(c.simple, "Betula alba");
    assert_eq!(c.stemmed, "Betula alb");
    let au = p.authorship.expect("authorship");
    assert_eq!(au.authors, vec!["L."]);
    assert!(au.year.is_none());
    assert_eq!(p.quality, 1);
}

#[test]
fn infraspecies_with_combination_authorship() {
    let p = parser().parse("Aus bus var. cus (Smith) Jones ex Brown 1901");
    assert!(p.parsed);
    assert_eq!(p.cardinality, 3);
    assert_eq!(p.canonical.expect("canonical").full, "Aus bus var. cus");
    let au = p.authorship.expect("authorship");
    assert_eq!(au.year.as_deref(), Some("1901"));
    let original = au.original.expect("original group");
    assert_eq!(original.authors, vec!["Smith"]);
    let combination = au.combination.expect("combination group");
    assert_eq!(combination.authors, vec!["Jones", "Brown"]);
    let ex = combination.ex_authors.expect("ex authors");
    assert_eq!(ex.authors, vec!["Brown"]);
    match p.details.expect("details") {
        Details::Infraspecies(inf) => {
            assert_eq!(inf.species.genus, "Aus");
            assert_eq!(inf.infraspecies.len(), 1);
            assert_eq!(inf.infraspecies[0].value, "cus");
            assert_eq!(inf.infraspecies[0].rank.as_deref(), Some("var."));
        }
        other => panic!("unexpected details: {other:?}"),
    }
}

#[test]
fn graft_chimera_formula() {
    let p = parser().parse("Crataegus + Mespilus");
    assert!(p.parsed);
    assert_eq!(p.cardinality, 0);
    let c = p.canonical.expect("canonical");
    assert_eq!(c.simple, "Crataegus + Mespilus");
    assert_eq!(c.stemmed, "Crataegus + Mespilus");
    assert!(matches!(
        p.details,
        Some(Details::GraftChimeraFormula(ref dets)) if dets.len() == 2
    ));
}

#[test]
fn html_tags_are_stripped_on_request() {
    let opts = Options::new().is_test(true).ignore_html_tags(true);
    let p = NameParser::new(opts).parse("Homo sapiens <i>Linnaeus</i>, 1758");
    assert!(p.parsed);
    assert_eq!(p.canonical.expect("canonical").simple, "Homo sapiens");
    let au = p.authorship.expect("authorship");
    assert_eq!(au.authors, vec!["Linnaeus"]);
    assert_eq!(au.year.as_deref(), Some("1758"));
    assert!(p
        .quality_warnings
        .iter()
        .any(|w| w.warning == "HTML tags or entities in the name"));
}

#[test]
fn year_with_trailing_character() {
    let p = parser().parse("Foo bar Smith, 1901a");
    assert!(p.parsed);
    let au = p.authorship.expect("authorship");
    assert_eq!(au.year.as_deref(), Some("1901"));
    assert_eq!(p.quality, 2);
    assert!(p
        .quality_warnings
        .iter()
        .any(|w| w.warning == "Year with latin character"));
}

#[test]
fn unparseable_input() {
    let p = parser().parse("SomeRandomText123");
    assert!(!p.parsed);
    assert_eq!(p.quality, 0);
    assert_eq!(p.cardinality, 0);
    assert!(p.canonical.is_none());
    assert_eq!(p.tail.as_deref(), Some("SomeRandomText123"));
}

#[test]
fn capitalization_option() {
    let opts = Options::new().is_test(true).with_capitalization(true);
    let p = NameParser::new(opts).parse("betula alba");
    assert!(p.parsed);
    assert_eq!(p.canonical.expect("canonical").simple, "Betula alba");
    assert!(p
        .quality_warnings
        .iter()
        .any(|w| w.warning == "Name starts with low case character"));
}

#[test]
fn cultivars_can_be_disabled() {
    let enabled = parser().parse("Rosa 'Peace'");
    assert_eq!(enabled.canonical.expect("canonical").simple, "Rosa 'Peace'");

    let opts = Options::new().is_test(true).disable_cultivars(true);
    let disabled = NameParser::new(opts).parse("Rosa 'Peace'");
    assert_eq!(disabled.canonical.expect("canonical").simple, "Rosa");
    assert_eq!(disabled.tail.as_deref(), Some("'Peace'"));
}

#[test]
fn comparison_marks_surrogate() {
    let p = parser().parse("Homo cf. sapiens");
    assert!(p.parsed);
    assert_eq!(p.surrogate, Some(Surrogate::Comparison));
}

#[test]
fn approximation_marks_surrogate_and_zero_cardinality() {
    let p = parser().parse("Pomatomus spp.");
    assert!(p.parsed);
    assert_eq!(p.cardinality, 0);
    assert_eq!(p.surrogate, Some(Surrogate::Approximation));
}

#[test]
fn csv_output() {
    let p = parser().parse("Betula alba L.");
    let row = p.to_csv();
    assert_eq!(row.split(',').count(), 9);
    assert!(row.contains("Betula alb"));
    assert!(row.ends_with(",1"));
}

#[test]
fn json_output() {
    let p = parser().parse("Betula alba L.");
    let value: serde_json::Value = serde_json::from_str(&p.to_json_compact()).expect("valid json");
    assert_eq!(value["parsed"], true);
    assert_eq!(value["cardinality"], 2);
    assert_eq!(value["canonical"]["simple"], "Betula alba");
    assert_eq!(value["parserVersion"], "test_version");
    // Absent optional fields are omitted entirely.
    assert!(value.get("hybrid").is_none());
    assert!(value.get("tail").is_none());

    let pretty = p.to_json_pretty();
    assert!(pretty.contains('\n'));
}

#[test]
fn verbatim_is_preserved_exactly() {
    let input = "  Betula\u{00A0}alba ";
    let p = parser().parse(input);
    assert_eq!(p.verbatim, input);
}
