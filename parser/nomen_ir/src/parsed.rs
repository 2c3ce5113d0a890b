//! The parse result record and its component types.
//!
//! `Parsed` is the single output of the parsing pipeline. Every input
//! string produces one, parseable or not. Serialization mirrors the record
//! field for field; optional fields vanish from JSON when absent.

use serde::Serialize;

use crate::warning::QualityWarning;

/// Output rendering variant for CLI and service front-ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    CompactJson,
    PrettyJson,
}

/// Top-level parse result.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parsed {
    pub parsed: bool,
    /// 1 best .. 4 worst; 0 when the grammar rejected the input.
    pub quality: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quality_warnings: Vec<QualityWarning>,
    pub verbatim: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    /// 1 uninomial, 2 binomial, 3+ infraspecific, 0 undetermined.
    pub cardinality: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<Canonical>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorship: Option<Authorship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bacteria: Option<Bacteria>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub virus: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid: Option<Hybrid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surrogate: Option<Surrogate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
    pub id: String,
    pub parser_version: String,
}

/// The three canonical forms of a name, most to least normalized.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Canonical {
    /// Epithets stemmed; the strongest matching key.
    pub stemmed: String,
    /// No rank markers, no authorship.
    pub simple: String,
    /// Rank markers and hybrid signs included.
    pub full: String,
}

/// Authorship of the smallest taxonomic unit of the name.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorship {
    pub verbatim: String,
    pub normalized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<AuthGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combination: Option<AuthGroup>,
}

/// One authorship group: the original (basionym) or combination authors.
///
/// `authors` flattens every team of the group; the `ex`/`emend` sub-teams
/// are additionally broken out into their own records.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthGroup {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ex_authors: Option<Authors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emend_authors: Option<Authors>,
}

/// A plain team of authors with an optional year.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Authors {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
}

/// A publication year; approximate when bracketed, ranged, or decorated
/// with a trailing character.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Year {
    pub value: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub approximate: bool,
}

/// Bacterial-name flag. `Maybe` marks a `Candidatus` annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bacteria {
    Maybe,
    Yes,
}

/// Kind of hybrid name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Hybrid {
    HybridFormula,
    NamedGenusHybrid,
    NamedSpeciesHybrid,
}

/// Kind of surrogate: a string that stands in for a formal name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Surrogate {
    Surrogate,
    BoldSurrogate,
    Comparison,
    Approximation,
}

/// A word of the name with its position and semantic role.
///
/// Positions are rune offsets into the cleaned (preprocessed) buffer, not
/// byte offsets into the verbatim input.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub verbatim: String,
    pub normalized: String,
    pub word_type: WordType,
    pub start: usize,
    pub end: usize,
}

/// Semantic role of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WordType {
    ApproximationMarker,
    ApproximateYear,
    AuthorWord,
    AuthorWordFilius,
    ComparisonMarker,
    CultivarEpithet,
    Genus,
    GraftChimeraChar,
    HybridChar,
    InfraspEpithet,
    Rank,
    SpEpithet,
    Subgenus,
    Uninomial,
    Year,
}

/// Structured details of the name, one variant per name shape.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Details {
    Uninomial(UninomialDetails),
    Species(SpeciesDetails),
    Infraspecies(InfraspeciesDetails),
    Approximation(ApproximationDetails),
    Comparison(ComparisonDetails),
    HybridFormula(Vec<Details>),
    GraftChimeraFormula(Vec<Details>),
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UninomialDetails {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    /// Parent uninomial of a `Family sect. Genus` style combination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultivar_epithet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorship: Option<Authorship>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesDetails {
    pub genus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgenus: Option<String>,
    pub species: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultivar_epithet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorship: Option<Authorship>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfraspeciesDetails {
    #[serde(flatten)]
    pub species: SpeciesDetails,
    pub infraspecies: Vec<InfraspeciesElem>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfraspeciesElem {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorship: Option<Authorship>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproximationDetails {
    pub genus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species_authorship: Option<Authorship>,
    pub approximation_marker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDetails {
    pub genus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species_authorship: Option<Authorship>,
    pub comparison_marker: String,
}

impl Parsed {
    /// CSV header matching [`Parsed::to_csv`].
    pub fn csv_header() -> &'static str {
        "Id,Verbatim,Cardinality,CanonicalStem,CanonicalSimple,CanonicalFull,Authorship,Year,Quality"
    }

    /// Render the record as one CSV row (9 columns, UTF-8).
    pub fn to_csv(&self) -> String {
        let (stem, simple, full) = match &self.canonical {
            Some(c) => (c.stemmed.as_str(), c.simple.as_str(), c.full.as_str()),
            None => ("", "", ""),
        };
        let authorship = self
            .authorship
            .as_ref()
            .map_or("", |a| a.normalized.as_str());
        let year = self
            .authorship
            .as_ref()
            .and_then(|a| a.year.as_deref())
            .unwrap_or("");
        [
            self.id.as_str(),
            self.verbatim.as_str(),
            &self.cardinality.to_string(),
            stem,
            simple,
            full,
            authorship,
            year,
            &self.quality.to_string(),
        ]
        .iter()
        .map(|&f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
    }

    /// Render with the given variant of the output format.
    pub fn output(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Csv => self.to_csv(),
            OutputFormat::CompactJson => self.to_json_compact(),
            OutputFormat::PrettyJson => self.to_json_pretty(),
        }
    }

    /// Serialize to compact JSON.
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        let escaped = field.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Parsed {
        Parsed {
            parsed: true,
            quality: 1,
            verbatim: "Betula alba L.".to_string(),
            normalized: Some("Betula alba L.".to_string()),
            cardinality: 2,
            canonical: Some(Canonical {
                stemmed: "Betula alb".to_string(),
                simple: "Betula alba".to_string(),
                full: "Betula alba".to_string(),
            }),
            authorship: Some(Authorship {
                verbatim: "L.".to_string(),
                normalized: "L.".to_string(),
                authors: vec!["L.".to_string()],
                ..Authorship::default()
            }),
            id: "11111111-2222-3333-4444-555555555555".to_string(),
            parser_version: "test_version".to_string(),
            ..Parsed::default()
        }
    }

    #[test]
    fn csv_row_has_nine_columns() {
        let row = sample().to_csv();
        assert_eq!(row.split(',').count(), 9);
        assert_eq!(
            row,
            "11111111-2222-3333-4444-555555555555,Betula alba L.,2,\
             Betula alb,Betula alba,Betula alba,L.,,1"
        );
    }

    #[test]
    fn csv_escapes_embedded_delimiters() {
        let mut p = sample();
        p.verbatim = "Aus bus (Smith, 1901)".to_string();
        let row = p.to_csv();
        assert!(row.contains("\"Aus bus (Smith, 1901)\""));
    }

    #[test]
    fn csv_header_matches_columns() {
        assert_eq!(Parsed::csv_header().split(',').count(), 9);
    }

    #[test]
    fn output_dispatches_on_format() {
        let p = sample();
        assert_eq!(p.output(OutputFormat::Csv), p.to_csv());
        assert_eq!(p.output(OutputFormat::CompactJson), p.to_json_compact());
        assert_eq!(p.output(OutputFormat::PrettyJson), p.to_json_pretty());
    }

    #[test]
    fn json_omits_absent_fields() {
        let p = Parsed {
            verbatim: "NotAName123".to_string(),
            id: "x".to_string(),
            parser_version: "test_version".to_string(),
            ..Parsed::default()
        };
        let json = p.to_json_compact();
        assert!(!json.contains("canonical"));
        assert!(!json.contains("authorship"));
        assert!(!json.contains("virus"));
        assert!(!json.contains("tail"));
        assert!(json.contains("\"parsed\":false"));
    }

    #[test]
    fn json_details_are_externally_tagged() {
        let details = Details::Uninomial(UninomialDetails {
            value: "Pomatomus".to_string(),
            ..UninomialDetails::default()
        });
        let json = serde_json::to_string(&details).unwrap();
        assert_eq!(json, r#"{"uninomial":{"value":"Pomatomus"}}"#);
    }

    #[test]
    fn infraspecies_details_flatten_species_fields() {
        let details = Details::Infraspecies(InfraspeciesDetails {
            species: SpeciesDetails {
                genus: "Aus".to_string(),
                species: "bus".to_string(),
                ..SpeciesDetails::default()
            },
            infraspecies: vec![InfraspeciesElem {
                value: "cus".to_string(),
                rank: Some("var.".to_string()),
                authorship: None,
            }],
        });
        let json = serde_json::to_string(&details).unwrap();
        assert!(json.contains(r#""genus":"Aus""#));
        assert!(json.contains(r#""infraspecies":[{"value":"cus","rank":"var."}]"#));
    }

    #[test]
    fn word_types_serialize_screaming_snake() {
        let word = Word {
            verbatim: "alba".to_string(),
            normalized: "alba".to_string(),
            word_type: WordType::SpEpithet,
            start: 7,
            end: 11,
        };
        let json = serde_json::to_string(&word).unwrap();
        assert!(json.contains(r#""wordType":"SP_EPITHET""#));
    }
}
