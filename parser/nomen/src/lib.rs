//! Parser for scientific names of organisms.
//!
//! Turns name-strings such as `Homo sapiens Linnaeus, 1758` or
//! `Aus bus var. cus (Smith) Jones ex Brown 1901` into a structured,
//! normalized record: canonical forms, authorship with year, cardinality,
//! hybrid/surrogate/virus flags, a parse-quality score, and optionally the
//! full details tree with word positions.
//!
//! ```
//! use nomen::{NameParser, Options};
//!
//! let parser = NameParser::new(Options::new().is_test(true));
//! let parsed = parser.parse("Betula alba L.");
//! assert!(parsed.parsed);
//! assert_eq!(parsed.canonical.unwrap().simple, "Betula alba");
//! ```
//!
//! Every input produces a [`Parsed`] record; there is no error surface.
//! Inputs the grammar rejects come back with `parsed = false`, quality 0,
//! and the whole input as the unparsed tail.

mod options;
mod pool;

pub use nomen_ir::{
    AuthGroup, Authors, Authorship, Bacteria, Canonical, Details, Hybrid, OutputFormat, Parsed,
    QualityWarning, Surrogate, Warning, Word, WordType, Year,
};
pub use options::Options;

use crossbeam_channel::{Receiver, Sender};
use rayon::prelude::*;

use nomen_prep::PrepOptions;

/// Version reported in every parsed record.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version reported when the test flag is set, to keep fixtures stable.
const TEST_VERSION: &str = "test_version";

/// A name-string tagged with its position in the input stream.
#[derive(Clone, Debug)]
pub struct NameInput {
    pub index: usize,
    pub name: String,
}

/// The parser facade: options, an engine pool, and a thread pool for
/// batch and stream operations.
///
/// One `NameParser` is meant to live for the whole program and be shared
/// across threads; every `parse` call checks an engine out of the pool and
/// returns it when done.
pub struct NameParser {
    opts: Options,
    pool: pool::EnginePool,
    workers: rayon::ThreadPool,
}

impl Default for NameParser {
    fn default() -> Self {
        NameParser::new(Options::default())
    }
}

impl NameParser {
    pub fn new(opts: Options) -> Self {
        let pool = pool::EnginePool::new(opts.jobs_num, opts.disable_cultivars);
        let workers = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.jobs_num)
            .thread_name(|i| format!("nomen-worker-{i}"))
            .build()
            .expect("worker pool construction");
        NameParser {
            opts,
            pool,
            workers,
        }
    }

    /// The version string attached to results.
    pub fn version(&self) -> &'static str {
        if self.opts.is_test {
            TEST_VERSION
        } else {
            VERSION
        }
    }

    /// Parse one name-string.
    pub fn parse(&self, verbatim: &str) -> Parsed {
        let mut res = Parsed {
            verbatim: verbatim.to_string(),
            id: nomen_ir::verbatim_id(verbatim),
            parser_version: self.version().to_string(),
            ..Parsed::default()
        };

        let prep = nomen_prep::preprocess(
            verbatim,
            PrepOptions {
                ignore_html_tags: self.opts.ignore_html_tags,
                with_capitalization: self.opts.with_capitalization,
            },
        );

        if prep.virus {
            res.virus = true;
            return res;
        }
        if prep.surrogate.is_some() {
            res.surrogate = prep.surrogate;
            return res;
        }

        let mut engine = self.pool.checkout();
        let mut analysis = nomen_parse::analyze(
            &mut engine,
            &prep.buffer,
            prep.tail_offset,
            self.opts.with_details,
        );
        self.pool.put_back(engine);

        if !analysis.parsed {
            res.tail = Some(verbatim.to_string()).filter(|t| !t.is_empty());
            return res;
        }

        analysis.warnings.extend(prep.warnings.iter().copied());
        let (quality, warnings) = nomen_ir::quality_and_warnings(&analysis.warnings);

        res.parsed = true;
        res.quality = quality;
        res.quality_warnings = warnings;
        res.normalized = analysis.normalized;
        res.cardinality = analysis.cardinality;
        res.canonical = analysis.canonical;
        res.authorship = analysis.authorship;
        res.hybrid = analysis.hybrid;
        res.surrogate = analysis.surrogate;
        res.bacteria = prep.bacteria_maybe.then_some(Bacteria::Maybe);
        res.tail = analysis.tail;
        res.details = analysis.details;
        res.words = analysis.words;
        res
    }

    /// Parse a batch of name-strings.
    ///
    /// Results come back in input order unless the `with_no_order` option
    /// is set, in which case they arrive in completion order.
    pub fn parse_many(&self, names: &[String]) -> Vec<Parsed> {
        if self.opts.with_no_order {
            let (tx, rx) = crossbeam_channel::unbounded();
            self.workers.install(|| {
                names.par_iter().for_each_with(tx, |tx, name| {
                    // Receiver outlives the scope; send cannot fail.
                    let _ = tx.send(self.parse(name));
                });
            });
            rx.into_iter().collect()
        } else {
            self.workers
                .install(|| names.par_iter().map(|name| self.parse(name)).collect())
        }
    }

    /// Parse a stream of indexed name-strings.
    ///
    /// Worker threads drain `input` until it closes, sending each result
    /// tagged with its input index. Cancellation is cooperative: dropping
    /// the output receiver stops the workers between names.
    pub fn parse_stream(&self, input: Receiver<NameInput>, output: Sender<(usize, Parsed)>) {
        std::thread::scope(|scope| {
            for _ in 0..self.opts.jobs_num {
                let input = input.clone();
                let output = output.clone();
                scope.spawn(move || {
                    for NameInput { index, name } in input.iter() {
                        if output.send((index, self.parse(&name))).is_err() {
                            tracing::debug!("output sink closed, stopping stream worker");
                            break;
                        }
                    }
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_parser() -> NameParser {
        NameParser::new(Options::new().is_test(true).jobs_num(2))
    }

    #[test]
    fn version_follows_test_flag() {
        assert_eq!(test_parser().version(), "test_version");
        let real = NameParser::new(Options::new());
        assert_eq!(real.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn short_circuits_viruses() {
        let parsed = test_parser().parse("Tobacco mosaic virus");
        assert!(!parsed.parsed);
        assert!(parsed.virus);
        assert_eq!(parsed.quality, 0);
        assert!(parsed.canonical.is_none());
    }

    #[test]
    fn short_circuits_surrogates() {
        let parsed = test_parser().parse("Coleoptera BOLD:AAV0432");
        assert!(!parsed.parsed);
        assert_eq!(parsed.surrogate, Some(Surrogate::BoldSurrogate));
    }

    #[test]
    fn candidatus_sets_bacteria_maybe() {
        let parsed = test_parser().parse("Candidatus Arsenophonus triatominarum");
        assert!(parsed.parsed);
        assert_eq!(parsed.bacteria, Some(Bacteria::Maybe));
        assert_eq!(
            parsed.canonical.unwrap().simple,
            "Arsenophonus triatominarum"
        );
    }

    #[test]
    fn parse_many_keeps_input_order() {
        let parser = test_parser();
        let names: Vec<String> = ["Betula alba L.", "NotAName123", "Pomatomus"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let results = parser.parse_many(&names);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].verbatim, "Betula alba L.");
        assert!(!results[1].parsed);
        assert_eq!(results[2].cardinality, 1);
    }

    #[test]
    fn parse_many_no_order_returns_everything() {
        let parser = NameParser::new(Options::new().is_test(true).with_no_order(true));
        let names: Vec<String> = (0..20).map(|i| format!("Aus bus{i:02}")).collect();
        let results = parser.parse_many(&names);
        assert_eq!(results.len(), 20);
        let mut verbatims: Vec<&str> = results.iter().map(|r| r.verbatim.as_str()).collect();
        verbatims.sort_unstable();
        let mut expected: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(verbatims, expected);
    }

    #[test]
    fn parse_stream_tags_results_with_index() {
        let parser = test_parser();
        let (in_tx, in_rx) = crossbeam_channel::unbounded();
        let (out_tx, out_rx) = crossbeam_channel::unbounded();
        for (index, name) in ["Betula alba", "Pomatomus", "x y z"].iter().enumerate() {
            in_tx
                .send(NameInput {
                    index,
                    name: name.to_string(),
                })
                .unwrap();
        }
        drop(in_tx);
        parser.parse_stream(in_rx, out_tx);

        let mut results: Vec<(usize, Parsed)> = out_rx.into_iter().collect();
        results.sort_by_key(|(index, _)| *index);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].1.verbatim, "Betula alba");
        assert_eq!(results[1].1.cardinality, 1);
        assert!(!results[2].1.parsed);
    }

    #[test]
    fn ids_are_stable_across_calls() {
        let parser = test_parser();
        let a = parser.parse("Homo sapiens");
        let b = parser.parse("Homo sapiens");
        assert_eq!(a.id, b.id);
    }
}
