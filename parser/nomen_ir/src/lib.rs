//! Output data model for scientific-name parsing.
//!
//! This crate defines the types every other crate of the workspace speaks:
//! the [`Parsed`] result record with its canonical forms, authorship tree,
//! details variants and word spans, plus the [`Warning`] set and the
//! quality score derived from it.
//!
//! Nothing here parses anything. The types are plain data with serde
//! serialization and the CSV/JSON renderings consumed by front-ends.

mod parsed;
mod warning;

pub use parsed::{
    ApproximationDetails, AuthGroup, Authors, Authorship, Bacteria, Canonical, ComparisonDetails,
    Details, Hybrid, InfraspeciesDetails, InfraspeciesElem, OutputFormat, Parsed, SpeciesDetails,
    Surrogate, UninomialDetails, Word, WordType, Year,
};
pub use warning::{prepare_warnings, quality_and_warnings, QualityWarning, Warning};

use once_cell::sync::Lazy;
use uuid::Uuid;

/// Namespace for verbatim identifiers, itself derived from the DNS
/// namespace. Using a fixed namespace keeps ids stable across versions and
/// implementations.
static ID_NAMESPACE: Lazy<Uuid> =
    Lazy::new(|| Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"globalnames.org"));

/// Compute the stable identifier of a verbatim name-string.
///
/// A v5 UUID (128-bit SHA-1 digest, hex-encoded); identical input always
/// produces the identical id, which downstream pipelines use for
/// deduplication.
pub fn verbatim_id(verbatim: &str) -> String {
    Uuid::new_v5(&ID_NAMESPACE, verbatim.as_bytes()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbatim_id_is_deterministic() {
        let a = verbatim_id("Homo sapiens");
        let b = verbatim_id("Homo sapiens");
        assert_eq!(a, b);
    }

    #[test]
    fn verbatim_id_distinguishes_inputs() {
        assert_ne!(verbatim_id("Homo sapiens"), verbatim_id("Homo sapiens "));
    }

    #[test]
    fn verbatim_id_is_hex_encoded_uuid() {
        let id = verbatim_id("Pomatomus");
        assert_eq!(id.len(), 36);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == '-'));
    }
}
