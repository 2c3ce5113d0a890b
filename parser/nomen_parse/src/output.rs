//! From the typed AST to the output record: canonical forms, normalized
//! rendering, authorship details, word spans, cardinality.

use nomen_ir::{
    self as ir, ApproximationDetails, AuthGroup, Authors, Authorship, ComparisonDetails, Details,
    Hybrid, InfraspeciesDetails, InfraspeciesElem, SpeciesDetails, Surrogate, UninomialDetails,
    Word,
};

use crate::ast::{
    AuthGroupNode, AuthorshipNode, AuthorsTeamNode, ApproxNode, ComparisonNode, FormulaNode,
    InfraspEpithetNode, NameData, NamedGenusHybridNode, NamedSpeciesHybridNode, SpEpithetNode,
    SpeciesNode, Team2Kind, UninomialComboNode, UninomialNode, WordNode, YearNode,
};

/// A canonical under construction: with and without rank markers.
#[derive(Clone, Debug, Default)]
pub struct Canonical {
    pub value: String,
    pub ranked: String,
}

fn join(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{a} {b}"),
    }
}

fn append_canonical(c: &Canonical, other: &Canonical) -> Canonical {
    Canonical {
        value: join(&c.value, &other.value),
        ranked: join(&c.ranked, &other.ranked),
    }
}

impl NameData {
    /// Canonical forms, without authorship.
    pub fn canonical(&self) -> Canonical {
        match self {
            NameData::Uninomial(u) => u.canonical(),
            NameData::UninomialCombo(u) => u.canonical(),
            NameData::Species(s) => s.canonical(),
            NameData::Comparison(c) => c.canonical(),
            NameData::Approximation(a) => a.canonical(),
            NameData::NamedGenusHybrid(h) => h.canonical(),
            NameData::NamedSpeciesHybrid(h) => h.canonical(),
            NameData::Formula(f) => f.canonical(),
        }
    }

    /// The fully-ornamented normalized rendering.
    pub fn value(&self) -> String {
        match self {
            NameData::Uninomial(u) => u.value(),
            NameData::UninomialCombo(u) => u.value(),
            NameData::Species(s) => s.value(),
            NameData::Comparison(c) => c.value(),
            NameData::Approximation(a) => a.value(),
            NameData::NamedGenusHybrid(h) => format!("× {}", h.name.value()),
            NameData::NamedSpeciesHybrid(h) => h.value(),
            NameData::Formula(f) => f.value(),
        }
    }

    /// Authorship of the smallest taxonomic unit; none for formulas.
    pub fn last_authorship(&self) -> Option<&AuthorshipNode> {
        match self {
            NameData::Uninomial(u) => u.authorship.as_ref(),
            NameData::UninomialCombo(u) => u.terminal.authorship.as_ref(),
            NameData::Species(s) => s.last_authorship(),
            NameData::Comparison(c) => c.sp.as_ref().and_then(|sp| sp.authorship.as_ref()),
            NameData::Approximation(a) => a.sp.as_ref().and_then(|sp| sp.authorship.as_ref()),
            NameData::NamedGenusHybrid(h) => h.name.last_authorship(),
            NameData::NamedSpeciesHybrid(h) => h.sp.authorship.as_ref(),
            NameData::Formula(_) => None,
        }
    }

    /// Words in source order with their semantic tags.
    pub fn words(&self) -> Vec<Word> {
        match self {
            NameData::Uninomial(u) => u.words(),
            NameData::UninomialCombo(u) => u.words(),
            NameData::Species(s) => s.words(),
            NameData::Comparison(c) => c.words(),
            NameData::Approximation(a) => a.words(),
            NameData::NamedGenusHybrid(h) => {
                let mut words = vec![to_word(&h.hybrid_char)];
                words.extend(h.name.words());
                words
            }
            NameData::NamedSpeciesHybrid(h) => h.words(),
            NameData::Formula(f) => f.words(),
        }
    }

    /// Cardinality per the details variant.
    pub fn cardinality(&self) -> u8 {
        match self {
            NameData::Uninomial(u) => {
                if u.cultivar.is_some() {
                    2
                } else {
                    1
                }
            }
            NameData::UninomialCombo(_) => 1,
            NameData::Species(s) => 2 + s.infraspecies.len() as u8,
            NameData::Comparison(c) => {
                if c.sp.is_some() {
                    2
                } else {
                    1
                }
            }
            NameData::Approximation(_) => 0,
            NameData::NamedGenusHybrid(h) => h.name.cardinality(),
            NameData::NamedSpeciesHybrid(_) => 2,
            NameData::Formula(_) => 0,
        }
    }

    /// The hybrid flag for the output record.
    pub fn hybrid(&self) -> Option<Hybrid> {
        match self {
            NameData::NamedGenusHybrid(_) => Some(Hybrid::NamedGenusHybrid),
            NameData::NamedSpeciesHybrid(_) => Some(Hybrid::NamedSpeciesHybrid),
            NameData::Formula(f) if !f.chimera => Some(Hybrid::HybridFormula),
            _ => None,
        }
    }

    /// The surrogate flag for the output record.
    pub fn surrogate(&self) -> Option<Surrogate> {
        match self {
            NameData::Comparison(_) => Some(Surrogate::Comparison),
            NameData::Approximation(_) => Some(Surrogate::Approximation),
            _ => None,
        }
    }

    /// The details tree for the output record.
    pub fn details(&self) -> Details {
        match self {
            NameData::Uninomial(u) => Details::Uninomial(u.details()),
            NameData::UninomialCombo(u) => Details::Uninomial(u.details()),
            NameData::Species(s) => s.details(),
            NameData::Comparison(c) => Details::Comparison(c.details()),
            NameData::Approximation(a) => Details::Approximation(a.details()),
            NameData::NamedGenusHybrid(h) => h.name.details(),
            NameData::NamedSpeciesHybrid(h) => h.details(),
            NameData::Formula(f) => {
                let mut dets = vec![f.first.details()];
                for el in &f.elements {
                    if let Some(name) = &el.name {
                        dets.push(name.details());
                    }
                }
                if f.chimera {
                    Details::GraftChimeraFormula(dets)
                } else {
                    Details::HybridFormula(dets)
                }
            }
        }
    }
}

fn to_word(w: &WordNode) -> Word {
    Word {
        verbatim: w.verbatim.clone(),
        normalized: w.norm.clone(),
        word_type: w.wtype,
        start: w.start,
        end: w.end,
    }
}

impl UninomialNode {
    fn canonical(&self) -> Canonical {
        let mut value = self.word.norm.clone();
        let mut ranked = self.word.norm.clone();
        if let Some(cv) = &self.cultivar {
            value = join(&value, &format!("'{}'", cv.norm));
            ranked = join(&ranked, &format!("'{}'", cv.norm));
        }
        Canonical { value, ranked }
    }

    fn value(&self) -> String {
        let mut res = self.word.norm.clone();
        if let Some(cv) = &self.cultivar {
            res = join(&res, &format!("'{}'", cv.norm));
        }
        if let Some(au) = &self.authorship {
            res = join(&res, &au.value());
        }
        res
    }

    fn words(&self) -> Vec<Word> {
        let mut words = vec![to_word(&self.word)];
        if let Some(cv) = &self.cultivar {
            words.push(to_word(cv));
        }
        if let Some(au) = &self.authorship {
            words.extend(au.words());
        }
        words
    }

    fn details(&self) -> UninomialDetails {
        UninomialDetails {
            value: self.word.norm.clone(),
            cultivar_epithet: self.cultivar.as_ref().map(|c| c.norm.clone()),
            authorship: self.authorship.as_ref().map(|a| a.details()),
            ..UninomialDetails::default()
        }
    }
}

impl UninomialComboNode {
    fn canonical(&self) -> Canonical {
        let ranked = join(
            &join(&self.parent.word.norm, &self.rank_norm),
            &self.terminal.word.norm,
        );
        Canonical {
            value: self.terminal.word.norm.clone(),
            ranked,
        }
    }

    fn value(&self) -> String {
        let head = join(&self.parent.word.norm, &self.rank_norm);
        let tail = join(
            &self.terminal.word.norm,
            &self
                .terminal
                .authorship
                .as_ref()
                .map(|a| a.value())
                .unwrap_or_default(),
        );
        join(&head, &tail)
    }

    fn words(&self) -> Vec<Word> {
        let mut words = vec![to_word(&self.parent.word)];
        if let Some(au) = &self.parent.authorship {
            words.extend(au.words());
        }
        if let Some(rank) = &self.rank {
            words.push(to_word(rank));
        }
        words.push(to_word(&self.terminal.word));
        if let Some(au) = &self.terminal.authorship {
            words.extend(au.words());
        }
        words
    }

    fn details(&self) -> UninomialDetails {
        UninomialDetails {
            value: self.terminal.word.norm.clone(),
            rank: Some(self.rank_norm.clone()),
            parent: Some(self.parent.word.norm.clone()),
            authorship: self.terminal.authorship.as_ref().map(|a| a.details()),
            ..UninomialDetails::default()
        }
    }
}

impl SpeciesNode {
    fn canonical(&self) -> Canonical {
        let genus = self.genus.as_ref().map(|g| g.norm.as_str()).unwrap_or("");
        let sp_part = join(genus, &self.sp.word.norm);
        let mut c = Canonical {
            value: sp_part.clone(),
            ranked: sp_part,
        };
        for inf in &self.infraspecies {
            c = append_canonical(&c, &inf.canonical());
        }
        if let Some(cv) = &self.cultivar {
            let quoted = format!("'{}'", cv.norm);
            c = append_canonical(
                &c,
                &Canonical {
                    value: quoted.clone(),
                    ranked: quoted,
                },
            );
        }
        c
    }

    fn value(&self) -> String {
        let genus = self.genus.as_ref().map(|g| g.norm.as_str()).unwrap_or("");
        let subgenus = self
            .subgenus
            .as_ref()
            .map(|s| format!("({})", s.norm))
            .unwrap_or_default();
        let mut res = join(genus, &subgenus);
        res = join(&res, &self.sp.value());
        for inf in &self.infraspecies {
            res = join(&res, &inf.value());
        }
        if let Some(cv) = &self.cultivar {
            res = join(&res, &format!("'{}'", cv.norm));
        }
        res
    }

    fn words(&self) -> Vec<Word> {
        let mut words = Vec::new();
        if let Some(genus) = &self.genus {
            words.push(to_word(genus));
        }
        if let Some(subgenus) = &self.subgenus {
            words.push(to_word(subgenus));
        }
        words.extend(self.sp.words());
        for inf in &self.infraspecies {
            words.extend(inf.words());
        }
        if let Some(cv) = &self.cultivar {
            words.push(to_word(cv));
        }
        words
    }

    fn last_authorship(&self) -> Option<&AuthorshipNode> {
        match self.infraspecies.last() {
            Some(inf) => inf.authorship.as_ref(),
            None => self.sp.authorship.as_ref(),
        }
    }

    fn species_details(&self) -> SpeciesDetails {
        SpeciesDetails {
            genus: self
                .genus
                .as_ref()
                .map(|g| g.norm.clone())
                .unwrap_or_default(),
            subgenus: self.subgenus.as_ref().map(|s| s.norm.clone()),
            species: self.sp.word.norm.clone(),
            cultivar_epithet: self.cultivar.as_ref().map(|c| c.norm.clone()),
            authorship: self.sp.authorship.as_ref().map(|a| a.details()),
        }
    }

    fn details(&self) -> Details {
        let species = self.species_details();
        if self.infraspecies.is_empty() {
            return Details::Species(species);
        }
        Details::Infraspecies(InfraspeciesDetails {
            species,
            infraspecies: self.infraspecies.iter().map(|i| i.details()).collect(),
        })
    }
}

impl SpEpithetNode {
    fn value(&self) -> String {
        join(
            &self.word.norm,
            &self
                .authorship
                .as_ref()
                .map(|a| a.value())
                .unwrap_or_default(),
        )
    }

    fn words(&self) -> Vec<Word> {
        let mut words = vec![to_word(&self.word)];
        if let Some(au) = &self.authorship {
            words.extend(au.words());
        }
        words
    }
}

impl InfraspEpithetNode {
    fn canonical(&self) -> Canonical {
        let rank = self.rank.as_ref().map(|r| r.norm.as_str()).unwrap_or("");
        Canonical {
            value: self.word.norm.clone(),
            ranked: join(rank, &self.word.norm),
        }
    }

    fn value(&self) -> String {
        let rank = self.rank.as_ref().map(|r| r.norm.as_str()).unwrap_or("");
        let au = self
            .authorship
            .as_ref()
            .map(|a| a.value())
            .unwrap_or_default();
        join(&join(rank, &self.word.norm), &au)
    }

    fn words(&self) -> Vec<Word> {
        let mut words = Vec::new();
        if let Some(rank) = &self.rank {
            words.push(to_word(rank));
        }
        words.push(to_word(&self.word));
        if let Some(au) = &self.authorship {
            words.extend(au.words());
        }
        words
    }

    fn details(&self) -> InfraspeciesElem {
        InfraspeciesElem {
            value: self.word.norm.clone(),
            rank: self.rank.as_ref().map(|r| r.norm.clone()),
            authorship: self.authorship.as_ref().map(|a| a.details()),
        }
    }
}

impl ComparisonNode {
    fn canonical(&self) -> Canonical {
        let mut c = Canonical {
            value: self.genus.norm.clone(),
            ranked: self.genus.norm.clone(),
        };
        if let Some(sp) = &self.sp {
            let spc = Canonical {
                value: sp.word.norm.clone(),
                ranked: sp.word.norm.clone(),
            };
            c = append_canonical(&c, &spc);
        }
        c
    }

    fn value(&self) -> String {
        let mut res = join(&self.genus.norm, &self.marker.norm);
        if let Some(sp) = &self.sp {
            res = join(&res, &sp.value());
        }
        res
    }

    fn words(&self) -> Vec<Word> {
        let mut words = vec![to_word(&self.genus), to_word(&self.marker)];
        if let Some(sp) = &self.sp {
            words.extend(sp.words());
        }
        words
    }

    fn details(&self) -> ComparisonDetails {
        ComparisonDetails {
            genus: self.genus.norm.clone(),
            species: self.sp.as_ref().map(|sp| sp.word.norm.clone()),
            species_authorship: self
                .sp
                .as_ref()
                .and_then(|sp| sp.authorship.as_ref())
                .map(|a| a.details()),
            comparison_marker: self.marker.norm.clone(),
        }
    }
}

impl ApproxNode {
    fn canonical(&self) -> Canonical {
        let mut c = Canonical {
            value: self.genus.norm.clone(),
            ranked: self.genus.norm.clone(),
        };
        if let Some(sp) = &self.sp {
            let spc = Canonical {
                value: sp.word.norm.clone(),
                ranked: sp.word.norm.clone(),
            };
            c = append_canonical(&c, &spc);
        }
        c
    }

    fn value(&self) -> String {
        let mut res = self.genus.norm.clone();
        if let Some(sp) = &self.sp {
            res = join(&res, &sp.value());
        }
        res
    }

    fn words(&self) -> Vec<Word> {
        let mut words = vec![to_word(&self.genus)];
        if let Some(sp) = &self.sp {
            words.extend(sp.words());
        }
        words.push(to_word(&self.marker));
        words
    }

    fn details(&self) -> ApproximationDetails {
        ApproximationDetails {
            genus: self.genus.norm.clone(),
            species: self.sp.as_ref().map(|sp| sp.word.norm.clone()),
            species_authorship: self
                .sp
                .as_ref()
                .and_then(|sp| sp.authorship.as_ref())
                .map(|a| a.details()),
            approximation_marker: self.marker.norm.clone(),
            ignored: self.ignored.clone(),
        }
    }
}

impl NamedGenusHybridNode {
    fn canonical(&self) -> Canonical {
        let hybrid = Canonical {
            value: "×".to_string(),
            ranked: "×".to_string(),
        };
        append_canonical(&hybrid, &self.name.canonical())
    }
}

impl NamedSpeciesHybridNode {
    fn canonical(&self) -> Canonical {
        let genus = Canonical {
            value: self.genus.norm.clone(),
            ranked: self.genus.norm.clone(),
        };
        let hybrid = Canonical {
            value: String::new(),
            ranked: "×".to_string(),
        };
        let sp = Canonical {
            value: self.sp.word.norm.clone(),
            ranked: self.sp.word.norm.clone(),
        };
        append_canonical(&append_canonical(&genus, &hybrid), &sp)
    }

    fn value(&self) -> String {
        format!("{} × {}", self.genus.norm, self.sp.value())
    }

    fn words(&self) -> Vec<Word> {
        let mut words = vec![to_word(&self.genus), to_word(&self.hybrid_char)];
        words.extend(self.sp.words());
        words
    }

    fn details(&self) -> Details {
        Details::Species(SpeciesDetails {
            genus: self.genus.norm.clone(),
            species: self.sp.word.norm.clone(),
            authorship: self.sp.authorship.as_ref().map(|a| a.details()),
            ..SpeciesDetails::default()
        })
    }
}

impl FormulaNode {
    fn canonical(&self) -> Canonical {
        let mut c = self.first.canonical();
        for el in &self.elements {
            let join_c = Canonical {
                value: el.join_char.norm.clone(),
                ranked: el.join_char.norm.clone(),
            };
            c = append_canonical(&c, &join_c);
            if let Some(name) = &el.name {
                let mut name_c = name.canonical();
                // A part with an implied genus borrows it from the first name.
                if let (NameData::Species(part), NameData::Species(first)) =
                    (name.as_ref(), self.first.as_ref())
                {
                    if part.genus.is_none() {
                        if let Some(genus) = &first.genus {
                            name_c = Canonical {
                                value: join(&genus.norm, &name_c.value),
                                ranked: join(&genus.norm, &name_c.ranked),
                            };
                        }
                    }
                }
                c = append_canonical(&c, &name_c);
            }
        }
        c
    }

    fn value(&self) -> String {
        let mut res = self.first.value();
        for el in &self.elements {
            res = join(&res, &el.join_char.norm);
            if let Some(name) = &el.name {
                res = join(&res, &name.value());
            }
        }
        res
    }

    fn words(&self) -> Vec<Word> {
        let mut words = self.first.words();
        for el in &self.elements {
            words.push(to_word(&el.join_char));
            if let Some(name) = &el.name {
                words.extend(name.words());
            }
        }
        words
    }
}

// === Authorship ===

impl AuthorshipNode {
    /// Normalized authorship string: `(Original) Combination Year`.
    pub fn value(&self) -> String {
        let orig = self
            .original
            .as_ref()
            .map(|g| g.value())
            .unwrap_or_default();
        let orig = if self.parens && !orig.is_empty() {
            format!("({orig})")
        } else {
            orig
        };
        match &self.combination {
            Some(comb) => join(&orig, &comb.value()),
            None => orig,
        }
    }

    pub fn words(&self) -> Vec<Word> {
        let mut words = Vec::new();
        if let Some(group) = &self.original {
            words.extend(group.words());
        }
        if let Some(group) = &self.combination {
            words.extend(group.words());
        }
        words
    }

    /// The output form of the authorship.
    pub fn details(&self) -> Authorship {
        let original = self.original.as_ref().map(|g| g.details());
        let combination = self.combination.as_ref().map(|g| g.details());

        let mut authors = Vec::new();
        if let Some(group) = &original {
            authors.extend(group.authors.iter().cloned());
        }
        if let Some(group) = &combination {
            authors.extend(group.authors.iter().cloned());
        }
        let year = original
            .as_ref()
            .and_then(|g| g.year.as_ref())
            .or_else(|| combination.as_ref().and_then(|g| g.year.as_ref()))
            .map(|y| y.value.clone());

        Authorship {
            verbatim: self.verbatim.clone(),
            normalized: self.value(),
            year,
            authors,
            original,
            combination,
        }
    }
}

impl AuthGroupNode {
    fn value(&self) -> String {
        let mut res = self.team1.value();
        if let Some(t2) = &self.team2 {
            res = join(&join(&res, &t2.word), &t2.team.value());
        }
        res
    }

    fn words(&self) -> Vec<Word> {
        let mut words = self.team1.words();
        if let Some(t2) = &self.team2 {
            words.extend(t2.team.words());
        }
        words
    }

    fn details(&self) -> AuthGroup {
        let (mut authors, year) = self.team1.details();
        let mut ex_authors = None;
        let mut emend_authors = None;
        if let Some(t2) = &self.team2 {
            let (t2_authors, t2_year) = t2.team.details();
            authors.extend(t2_authors.iter().cloned());
            let sub = Authors {
                authors: t2_authors,
                year: t2_year,
            };
            match t2.kind {
                Team2Kind::Ex => ex_authors = Some(sub),
                Team2Kind::Emend => emend_authors = Some(sub),
            }
        }
        let year = year.or_else(|| {
            self.team2
                .as_ref()
                .and_then(|t2| t2.team.year.as_ref())
                .map(year_details)
        });
        AuthGroup {
            authors,
            year,
            ex_authors,
            emend_authors,
        }
    }
}

impl AuthorsTeamNode {
    /// Authors joined `A, B & C`, with the team year appended.
    fn value(&self) -> String {
        let names: Vec<&str> = self.authors.iter().map(|a| a.value.as_str()).collect();
        let mut res = match names.len() {
            0 => String::new(),
            1 => names[0].to_string(),
            n => format!("{} & {}", names[..n - 1].join(", "), names[n - 1]),
        };
        if let Some(year) = &self.year {
            let value = if year.approximate {
                format!("({})", year.word.norm)
            } else {
                year.word.norm.clone()
            };
            res = join(&res, &value);
        }
        res
    }

    fn words(&self) -> Vec<Word> {
        let mut words = Vec::new();
        for author in &self.authors {
            for w in &author.words {
                words.push(to_word(w));
            }
        }
        if let Some(year) = &self.year {
            words.push(to_word(&year.word));
        }
        words
    }

    fn details(&self) -> (Vec<String>, Option<ir::Year>) {
        let authors = self.authors.iter().map(|a| a.value.clone()).collect();
        (authors, self.year.as_ref().map(year_details))
    }
}

fn year_details(year: &YearNode) -> ir::Year {
    ir::Year {
        value: year.word.norm.clone(),
        approximate: year.approximate,
    }
}

/// Assert the word-span invariants in debug builds: spans are non-empty,
/// inside the buffer, strictly ordered and non-overlapping.
pub fn check_words(words: &[Word], buffer_len: usize) {
    if cfg!(debug_assertions) {
        let mut prev_end = 0;
        for w in words {
            debug_assert!(w.start < w.end, "empty word span {w:?}");
            debug_assert!(w.end <= buffer_len, "word span out of buffer {w:?}");
            debug_assert!(w.start >= prev_end, "overlapping word spans at {w:?}");
            prev_end = w.end;
        }
    }
}
