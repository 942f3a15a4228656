//! Query-side preparation.
//!
//! A [`PreparedQuery`] is built once per query string and reused across every
//! candidate scored against it. It carries the lowercased bytes, the 37-bit
//! character-class mask and the trigram multiset the prefilters consult, the
//! precomputed prefilter thresholds for the owning matcher's configuration,
//! and (in Smith-Waterman mode with space splitting) one pre-prepared
//! sub-query per whitespace-separated word. It has no interior mutability and
//! is safe to share read-only across threads.

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::chars::{class_bitmask, to_lower};
use crate::prefilter::Prefilter;
use crate::{Algorithm, MatchConfig};

type QueryBytes = SmallVec<[u8; 16]>;

/// Trigram multiset: 3-byte windows of the lowercased query with their
/// occurrence counts. Empty for queries shorter than 3 bytes.
pub(crate) type TrigramCounts = AHashMap<[u8; 3], u32>;

#[derive(Debug, Clone)]
pub struct PreparedQuery {
    pub(crate) raw: QueryBytes,
    pub(crate) lower: QueryBytes,
    pub(crate) bitmask: u64,
    pub(crate) trigrams: TrigramCounts,
    pub(crate) contains_whitespace: bool,
    /// Whitespace-split sub-queries; non-empty only in Smith-Waterman mode
    /// with `split_spaces` on and whitespace present. Atoms never have atoms
    /// of their own.
    pub(crate) atoms: Vec<PreparedQuery>,
    pub(crate) filter: Prefilter,
}

impl PreparedQuery {
    pub(crate) fn new(raw_bytes: &[u8], config: &MatchConfig) -> Self {
        let mut query = Self::prepare_atom(raw_bytes, config);
        let split = match &config.algorithm {
            Algorithm::SmithWaterman(sw) => sw.split_spaces,
            Algorithm::EditDistance(_) => false,
        };
        if split && query.contains_whitespace {
            query.atoms = query
                .lower
                .split(|b| b.is_ascii_whitespace())
                .filter(|atom| !atom.is_empty())
                .map(|atom| Self::prepare_atom(atom, config))
                .collect();
        }
        query
    }

    fn prepare_atom(raw_bytes: &[u8], config: &MatchConfig) -> Self {
        let raw: QueryBytes = SmallVec::from_slice(raw_bytes);
        let lower: QueryBytes = raw.iter().map(|&b| to_lower(b)).collect();
        let mut trigrams = TrigramCounts::default();
        if lower.len() >= 3 {
            for window in lower.windows(3) {
                let key = [window[0], window[1], window[2]];
                *trigrams.entry(key).or_insert(0) += 1;
            }
        }
        Self {
            bitmask: class_bitmask(&lower),
            contains_whitespace: lower.iter().any(|b| b.is_ascii_whitespace()),
            filter: Prefilter::for_query(lower.len(), config),
            atoms: Vec::new(),
            raw,
            lower,
            trigrams,
        }
    }

    /// The query bytes as given.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The ASCII-folded query bytes.
    pub fn lower(&self) -> &[u8] {
        &self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    pub fn contains_whitespace(&self) -> bool {
        self.contains_whitespace
    }
}
