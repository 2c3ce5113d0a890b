//! Grammar rule identifiers.
//!
//! Every token the engine records carries the rule that produced it. The
//! set below covers the rules with semantic weight; pure character classes
//! and whitespace never produce tokens.

/// A grammar rule that produces a token in the parse tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    SciName,
    Tail,
    HybridFormula,
    HybridFormulaFull,
    HybridFormulaPart,
    GraftChimeraFormula,
    GraftChimeraFull,
    GraftChimeraPart,
    NamedSpeciesHybrid,
    NamedGenusHybrid,
    NameApprox,
    NameComp,
    NameSpecies,
    GenusWord,
    InfraspGroup,
    InfraspEpithet,
    SpeciesEpithet,
    Comparison,
    Rank,
    RankOtherUncommon,
    RankOther,
    RankVar,
    RankForma,
    RankSsp,
    SubGenusOrSuperspecies,
    SubGenus,
    UninomialCombo1,
    UninomialCombo2,
    RankUninomial,
    Uninomial,
    UninomialWord,
    AbbrGenus,
    CapWord2,
    Word,
    WordStartsWithDigit,
    WordApostr,
    HybridChar,
    GraftChimeraChar,
    CultivarEpithet,
    ApproxNameIgnored,
    Approximation,
    Authorship,
    OriginalAuthorship,
    CombinationAuthorship,
    BasionymAuthorshipYearMisformed,
    BasionymAuthorship,
    BasionymAuthorship2Parens,
    AuthorsGroup,
    AuthorsTeam,
    AuthorEx,
    AuthorEmend,
    Author,
    UnknownAuthor,
    AuthorWord,
    Filius,
    Year,
    YearRange,
    YearWithDot,
    YearApprox,
    YearWithPage,
    YearWithParens,
    YearWithChar,
    YearNum,
}

impl Rule {
    /// Display name used by the debug tree dump.
    pub fn name(self) -> &'static str {
        match self {
            Rule::SciName => "SciName",
            Rule::Tail => "Tail",
            Rule::HybridFormula => "HybridFormula",
            Rule::HybridFormulaFull => "HybridFormulaFull",
            Rule::HybridFormulaPart => "HybridFormulaPart",
            Rule::GraftChimeraFormula => "GraftChimeraFormula",
            Rule::GraftChimeraFull => "GraftChimeraFull",
            Rule::GraftChimeraPart => "GraftChimeraPart",
            Rule::NamedSpeciesHybrid => "NamedSpeciesHybrid",
            Rule::NamedGenusHybrid => "NamedGenusHybrid",
            Rule::NameApprox => "NameApprox",
            Rule::NameComp => "NameComp",
            Rule::NameSpecies => "NameSpecies",
            Rule::GenusWord => "GenusWord",
            Rule::InfraspGroup => "InfraspGroup",
            Rule::InfraspEpithet => "InfraspEpithet",
            Rule::SpeciesEpithet => "SpeciesEpithet",
            Rule::Comparison => "Comparison",
            Rule::Rank => "Rank",
            Rule::RankOtherUncommon => "RankOtherUncommon",
            Rule::RankOther => "RankOther",
            Rule::RankVar => "RankVar",
            Rule::RankForma => "RankForma",
            Rule::RankSsp => "RankSsp",
            Rule::SubGenusOrSuperspecies => "SubGenusOrSuperspecies",
            Rule::SubGenus => "SubGenus",
            Rule::UninomialCombo1 => "UninomialCombo1",
            Rule::UninomialCombo2 => "UninomialCombo2",
            Rule::RankUninomial => "RankUninomial",
            Rule::Uninomial => "Uninomial",
            Rule::UninomialWord => "UninomialWord",
            Rule::AbbrGenus => "AbbrGenus",
            Rule::CapWord2 => "CapWord2",
            Rule::Word => "Word",
            Rule::WordStartsWithDigit => "WordStartsWithDigit",
            Rule::WordApostr => "WordApostr",
            Rule::HybridChar => "HybridChar",
            Rule::GraftChimeraChar => "GraftChimeraChar",
            Rule::CultivarEpithet => "CultivarEpithet",
            Rule::ApproxNameIgnored => "ApproxNameIgnored",
            Rule::Approximation => "Approximation",
            Rule::Authorship => "Authorship",
            Rule::OriginalAuthorship => "OriginalAuthorship",
            Rule::CombinationAuthorship => "CombinationAuthorship",
            Rule::BasionymAuthorshipYearMisformed => "BasionymAuthorshipYearMisformed",
            Rule::BasionymAuthorship => "BasionymAuthorship",
            Rule::BasionymAuthorship2Parens => "BasionymAuthorship2Parens",
            Rule::AuthorsGroup => "AuthorsGroup",
            Rule::AuthorsTeam => "AuthorsTeam",
            Rule::AuthorEx => "AuthorEx",
            Rule::AuthorEmend => "AuthorEmend",
            Rule::Author => "Author",
            Rule::UnknownAuthor => "UnknownAuthor",
            Rule::AuthorWord => "AuthorWord",
            Rule::Filius => "Filius",
            Rule::Year => "Year",
            Rule::YearRange => "YearRange",
            Rule::YearWithDot => "YearWithDot",
            Rule::YearApprox => "YearApprox",
            Rule::YearWithPage => "YearWithPage",
            Rule::YearWithParens => "YearWithParens",
            Rule::YearWithChar => "YearWithChar",
            Rule::YearNum => "YearNum",
        }
    }
}
