//! Parse warnings and the quality score derived from them.
//!
//! Warnings are non-fatal: they describe defects the parser worked around,
//! not failures. Every kind carries a fixed quality weight and a fixed
//! user-visible message. The parse quality of a name is the worst (highest)
//! weight among its warnings, or 1 for a clean parse.

use rustc_hash::FxHashSet;
use serde::Serialize;

/// A defect noticed while parsing a name.
///
/// Ordering of the enum is arbitrary; output ordering is defined by
/// [`prepare_warnings`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Warning {
    ApostrOther,
    AuthAmbiguousFilius,
    AuthDoubleParens,
    AuthEmend,
    AuthEmendWithoutDot,
    AuthEx,
    AuthExWithDot,
    AuthQuestion,
    AuthUnknown,
    AuthUpperCase,
    CandidatusName,
    CanonicalApostrophe,
    CapWordQuestion,
    CharBad,
    CultivarEpithet,
    GenusAbbr,
    GenusUpperCharAfterDash,
    GraftChimeraFormula,
    GreekLetterInRank,
    HtmlTagsEntities,
    HybridCharNoSpace,
    HybridFormula,
    HybridFormulaIncomplete,
    HybridFormulaProbIncomplete,
    HybridNamed,
    LowCase,
    NameApprox,
    NameComparison,
    RankUncommon,
    SpaceMultiple,
    SpaceNonStandard,
    SpeciesNumeric,
    Superspecies,
    Tail,
    UninomialCombo,
    Utf8ConvBad,
    YearChar,
    YearDot,
    YearMisplaced,
    YearPage,
    YearParens,
    YearQuestion,
    YearRange,
    YearSqBrackets,
}

impl Warning {
    /// Quality weight of the warning: 2 cosmetic, 3 structural, 4 doubtful.
    pub fn quality(self) -> u8 {
        use Warning::*;
        match self {
            AuthDoubleParens | GenusAbbr | YearMisplaced => 4,

            ApostrOther | AuthEmendWithoutDot | AuthExWithDot | AuthQuestion
            | CanonicalApostrophe | CapWordQuestion | HtmlTagsEntities | HybridCharNoSpace
            | HybridFormulaIncomplete | NameApprox | NameComparison | RankUncommon
            | SpeciesNumeric | Tail | Utf8ConvBad | YearRange | YearSqBrackets => 3,

            AuthAmbiguousFilius | AuthEmend | AuthEx | AuthUnknown | AuthUpperCase
            | CandidatusName | CharBad | CultivarEpithet | GenusUpperCharAfterDash
            | GraftChimeraFormula | GreekLetterInRank | HybridFormula
            | HybridFormulaProbIncomplete | HybridNamed | LowCase | SpaceMultiple
            | SpaceNonStandard | Superspecies | UninomialCombo | YearChar | YearDot | YearPage
            | YearParens | YearQuestion => 2,
        }
    }

    /// Fixed user-visible message.
    pub fn message(self) -> &'static str {
        use Warning::*;
        match self {
            ApostrOther => "Not an ASCII apostrophe",
            AuthAmbiguousFilius => "Ambiguous f. (filius or forma)",
            AuthDoubleParens => "Authorship in double parentheses",
            AuthEmend => "Emend authors are not required",
            AuthEmendWithoutDot => "`emend` without a period",
            AuthEx => "Ex authors are not required",
            AuthExWithDot => "`ex` ends with a period",
            AuthQuestion => "Author as a question mark",
            AuthUnknown => "Author is unknown",
            AuthUpperCase => "Author in upper case",
            CandidatusName => "Bacterial `Candidatus` annotation",
            CanonicalApostrophe => "Apostrophe in canonical",
            CapWordQuestion => "Uninomial word with question mark",
            CharBad => "Non-standard characters in canonical",
            CultivarEpithet => "Cultivar epithet",
            GenusAbbr => "Abbreviated uninomial word",
            GenusUpperCharAfterDash => "Apparent genus with capital character after hyphen",
            GraftChimeraFormula => "Graft-chimera formula",
            GreekLetterInRank => "Deprecated Greek letter enumeration in rank",
            HtmlTagsEntities => "HTML tags or entities in the name",
            HybridCharNoSpace => "Hybrid char not separated by space",
            HybridFormula => "Hybrid formula",
            HybridFormulaIncomplete => "Incomplete hybrid formula",
            HybridFormulaProbIncomplete => "Probably incomplete hybrid formula",
            HybridNamed => "Named hybrid",
            LowCase => "Name starts with low case character",
            NameApprox => "Name is approximate",
            NameComparison => "Name comparison",
            RankUncommon => "Uncommon rank",
            SpaceMultiple => "Multiple adjacent space characters",
            SpaceNonStandard => "Non-standard space characters",
            SpeciesNumeric => "Numeric prefix",
            Superspecies => "Ambiguity: subgenus or superspecies",
            Tail => "Unparsed tail",
            UninomialCombo => "Combination of two uninomials",
            Utf8ConvBad => "Incorrect conversion to UTF-8",
            YearChar => "Year with latin character",
            YearDot => "Year with period",
            YearMisplaced => "Misplaced basionym year",
            YearPage => "Year with page info",
            YearParens => "Year with parentheses",
            YearQuestion => "Year with question mark",
            YearRange => "Years range",
            YearSqBrackets => "Year with square brackets",
        }
    }
}

/// A warning in output form: weight plus message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QualityWarning {
    pub quality: u8,
    pub warning: &'static str,
}

/// Sort a warning set into its output order: descending quality, then
/// ascending message (byte order, locale-independent).
pub fn prepare_warnings(warnings: &FxHashSet<Warning>) -> Vec<QualityWarning> {
    let mut res: Vec<QualityWarning> = warnings
        .iter()
        .map(|w| QualityWarning {
            quality: w.quality(),
            warning: w.message(),
        })
        .collect();
    res.sort_by(|a, b| b.quality.cmp(&a.quality).then(a.warning.cmp(b.warning)));
    res
}

/// Aggregate a warning set into `(score, sorted list)`.
///
/// The score is the maximum weight, or 1 when the set is empty.
pub fn quality_and_warnings(warnings: &FxHashSet<Warning>) -> (u8, Vec<QualityWarning>) {
    let warns = prepare_warnings(warnings);
    let quality = warns.first().map_or(1, |w| w.quality);
    (quality, warns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_incoming_data_consistently() {
        let ws: FxHashSet<Warning> = [
            Warning::YearParens,
            Warning::YearChar,
            Warning::CharBad,
            Warning::YearQuestion,
            Warning::Tail,
        ]
        .into_iter()
        .collect();

        let res = prepare_warnings(&ws);
        let expected = vec![
            QualityWarning {
                quality: 3,
                warning: "Unparsed tail",
            },
            QualityWarning {
                quality: 2,
                warning: "Non-standard characters in canonical",
            },
            QualityWarning {
                quality: 2,
                warning: "Year with latin character",
            },
            QualityWarning {
                quality: 2,
                warning: "Year with parentheses",
            },
            QualityWarning {
                quality: 2,
                warning: "Year with question mark",
            },
        ];
        assert_eq!(res, expected);
    }

    #[test]
    fn quality_is_max_weight() {
        let ws: FxHashSet<Warning> = [Warning::YearChar, Warning::AuthDoubleParens]
            .into_iter()
            .collect();
        let (quality, warns) = quality_and_warnings(&ws);
        assert_eq!(quality, 4);
        assert_eq!(warns.len(), 2);
    }

    #[test]
    fn empty_set_is_quality_one() {
        let ws = FxHashSet::default();
        let (quality, warns) = quality_and_warnings(&ws);
        assert_eq!(quality, 1);
        assert!(warns.is_empty());
    }

    #[test]
    fn weights_stay_in_range() {
        use Warning::*;
        // Spot checks against the fixture values the weights were taken from.
        assert_eq!(Tail.quality(), 3);
        assert_eq!(CharBad.quality(), 2);
        assert_eq!(YearChar.quality(), 2);
        assert_eq!(YearParens.quality(), 2);
        assert_eq!(YearQuestion.quality(), 2);
        assert_eq!(AuthDoubleParens.quality(), 4);
    }
}
