//! Fuzzymatch is a fuzzy string matching engine for interactive search and
//! programmatic ranking. Given a short query and a candidate it returns
//! either nothing or a normalized score in `[0.0, 1.0]` tagged with how the
//! match arose: exact, prefix, substring, acronym, or local alignment. It
//! matches against bytes directly with ASCII-class case folding, ignoring
//! unicode.
//!
//! Two scoring algorithms are available. The default edit-distance mode
//! runs a cascade of phases (exact, prefix, substring, a Damerau-Levenshtein
//! fit of the query against the best candidate substring, acronym) with
//! position-dependent bonuses. Smith-Waterman mode runs a single
//! local-alignment pass with affine gaps and boundary bonuses, splitting
//! multi-word queries into independently aligned atoms. In both modes a
//! three-stage prefilter (length, character-class bitmask, trigram
//! multiset) rejects the vast majority of candidates before any dynamic
//! programming runs, and all scratch memory lives in a reusable
//! [`ScoringBuffer`] so the steady-state hot path never allocates.
//!
//! # Example: scoring single candidates
//!
//! ```rust
//! use fuzzymatch::{FuzzyMatcher, MatchConfig, MatchKind};
//!
//! let matcher = FuzzyMatcher::new(MatchConfig::default());
//! let query = matcher.prepare("user");
//! let mut buf = matcher.make_buffer();
//!
//! let m = matcher.score("getCurrentUser", &query, &mut buf).unwrap();
//! assert_eq!(m.kind, MatchKind::Substring);
//!
//! assert!(matcher.score("apple", &query, &mut buf).is_none());
//! ```
//!
//! # Example: using `match_list`
//!
//! ```rust
//! use fuzzymatch::{match_list, match_list_parallel, MatchConfig};
//!
//! let matches = match_list("use", &["user", "banana"], &MatchConfig::default());
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].index, 0);
//!
//! // or across 8 threads
//! let matches = match_list_parallel("use", &["user", "banana"], &MatchConfig::default(), 8);
//! assert_eq!(matches.len(), 1);
//! ```
//!
//! # Example: Smith-Waterman mode
//!
//! ```rust
//! use fuzzymatch::{Algorithm, FuzzyMatcher, MatchConfig, MatchKind, SwConfig};
//!
//! let matcher = FuzzyMatcher::new(MatchConfig {
//!     algorithm: Algorithm::SmithWaterman(SwConfig::default()),
//!     ..MatchConfig::default()
//! });
//! let query = matcher.prepare("gubi");
//! let mut buf = matcher.make_buffer();
//!
//! let m = matcher.score("getUserById", &query, &mut buf).unwrap();
//! assert_eq!(m.kind, MatchKind::Alignment);
//! assert!(m.score > 0.3);
//! ```
//!
//! # Sharing across threads
//!
//! A [`PreparedQuery`] and the configuration are immutable and shared
//! read-only; each worker owns one [`ScoringBuffer`]. The `&mut` borrow on
//! [`FuzzyMatcher::score`] is what keeps a buffer out of two scoring
//! operations at once.

use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod acronym;
mod buffer;
mod chars;
mod r#const;
mod edit_distance;
mod one_shot;
mod prefilter;
mod query;
mod smith_waterman;

pub use buffer::ScoringBuffer;
pub use one_shot::{FuzzyMatcher, match_list, match_list_parallel, top_matches};
pub use query::PreparedQuery;

use r#const::*;

/// How a match arose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MatchKind {
    /// Candidate equals the query after case folding.
    Exact,
    /// Candidate begins with the query.
    Prefix,
    /// Query found inside the candidate, exactly or within the edit budget.
    Substring,
    /// Query matched the candidate's word initials.
    Acronym,
    /// Smith-Waterman local alignment.
    Alignment,
}

/// A scored candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredMatch {
    /// Normalized score in `[0.0, 1.0]`.
    pub score: f64,
    pub kind: MatchKind,
}

/// A match from one of the list APIs.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Match {
    /// Index of the match in the original list of haystacks.
    pub index: u32,
    /// Normalized score in `[0.0, 1.0]`.
    pub score: f64,
    pub kind: MatchKind,
}

impl PartialOrd for Match {
    fn partial_cmp(&self, other: &Match) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Match {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .reverse()
            .then_with(|| self.index.cmp(&other.index))
    }
}
impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Match {}

/// Top-level configuration, fixed at matcher construction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchConfig {
    /// Matches scoring below this are rejected.
    pub min_score: f64,
    pub algorithm: Algorithm,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_score: MIN_SCORE,
            algorithm: Algorithm::EditDistance(EdConfig::default()),
        }
    }
}

/// Scoring algorithm selection.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    EditDistance(EdConfig),
    SmithWaterman(SwConfig),
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::EditDistance(EdConfig::default())
    }
}

/// Gap cost model for the edit-distance bonus scorer.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GapPenalty {
    /// Flat cost per skipped candidate byte.
    Linear { per: f64 },
    /// Opening a gap costs more than extending it.
    Affine { open: f64, extend: f64 },
}

impl Default for GapPenalty {
    fn default() -> Self {
        GapPenalty::Affine {
            open: GAP_OPEN_PENALTY,
            extend: GAP_EXTEND_PENALTY,
        }
    }
}

/// Edit-distance mode tuning. You may tweak these but pay close attention
/// to each property, as small changes can lead to poor ranking.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdConfig {
    /// Most edits a fitted match may spend.
    pub max_edit_distance: u32,
    /// Relaxed edit budget for long queries.
    pub long_query_max_edit_distance: u32,
    /// Query length at which the relaxed budget applies.
    pub long_query_threshold: usize,

    /// Weight of prefix matches relative to the exact unit score.
    pub prefix_weight: f64,
    /// Weight of substring and fitted matches.
    pub substring_weight: f64,
    /// Weight of acronym matches.
    pub acronym_weight: f64,

    /// Bonus when the match starts on a word boundary.
    pub word_boundary_bonus: f64,
    /// Bonus per adjacent matched pair in a gapped alignment.
    pub consecutive_bonus: f64,
    /// Cost of candidate bytes skipped inside the alignment.
    pub gap_penalty: GapPenalty,
    /// Bonus for matches starting near the head of the candidate, decaying
    /// to zero across `first_match_bonus_range` bytes.
    pub first_match_bonus: f64,
    pub first_match_bonus_range: usize,
    /// Cost per candidate byte beyond the query length.
    pub length_penalty: f64,
}

impl Default for EdConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: MAX_EDIT_DISTANCE,
            long_query_max_edit_distance: LONG_QUERY_MAX_EDIT_DISTANCE,
            long_query_threshold: LONG_QUERY_THRESHOLD,
            prefix_weight: PREFIX_WEIGHT,
            substring_weight: SUBSTRING_WEIGHT,
            acronym_weight: ACRONYM_WEIGHT,
            word_boundary_bonus: WORD_BOUNDARY_BONUS,
            consecutive_bonus: CONSECUTIVE_BONUS,
            gap_penalty: GapPenalty::default(),
            first_match_bonus: FIRST_MATCH_BONUS,
            first_match_bonus_range: FIRST_MATCH_BONUS_RANGE,
            length_penalty: LENGTH_PENALTY,
        }
    }
}

impl EdConfig {
    /// Edit budget for a query of `q_len` bytes.
    pub(crate) fn distance_cap(&self, q_len: usize) -> u32 {
        if q_len >= self.long_query_threshold {
            self.long_query_max_edit_distance
        } else {
            self.max_edit_distance
        }
    }
}

/// Smith-Waterman mode tuning. Integer scores; normalization happens once
/// at the end.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwConfig {
    /// Score for a matching byte.
    pub score_match: u32,
    /// Penalty for opening a gap.
    pub penalty_gap_start: u32,
    /// Penalty for extending a gap.
    pub penalty_gap_extend: u32,

    /// Bonus when the previous query byte matched the previous candidate
    /// byte.
    pub bonus_consecutive: u32,
    /// Bonus for matching after a non-delimiter, non-whitespace word break.
    pub bonus_boundary: u32,
    /// Bonus for matching after whitespace (and at the head).
    pub bonus_boundary_whitespace: u32,
    /// Bonus for matching after a delimiter (`_ - . / : ; ,`).
    pub bonus_boundary_delimiter: u32,
    /// Bonus for matching at a camelCase or letter/digit transition.
    pub bonus_camel_case: u32,
    /// Multiplier on the first query byte's match score.
    pub bonus_first_char_multiplier: u32,

    /// Align whitespace-separated query words independently and sum them.
    pub split_spaces: bool,
}

impl Default for SwConfig {
    fn default() -> Self {
        Self {
            score_match: SW_SCORE_MATCH,
            penalty_gap_start: SW_PENALTY_GAP_START,
            penalty_gap_extend: SW_PENALTY_GAP_EXTEND,
            bonus_consecutive: SW_BONUS_CONSECUTIVE,
            bonus_boundary: SW_BONUS_BOUNDARY,
            bonus_boundary_whitespace: SW_BONUS_BOUNDARY_WHITESPACE,
            bonus_boundary_delimiter: SW_BONUS_BOUNDARY_DELIMITER,
            bonus_camel_case: SW_BONUS_CAMEL_CASE,
            bonus_first_char_multiplier: SW_BONUS_FIRST_CHAR_MULTIPLIER,
            split_spaces: SW_SPLIT_SPACES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let MatchConfig {
            min_score,
            algorithm,
        } = MatchConfig::default();
        assert_eq!(min_score, 0.2);
        let Algorithm::EditDistance(ed) = algorithm else {
            panic!("default algorithm is edit distance");
        };
        assert_eq!(ed.max_edit_distance, 2);
        assert_eq!(ed.long_query_max_edit_distance, 3);
        assert_eq!(ed.long_query_threshold, 13);
        assert_eq!(ed.prefix_weight, 1.5);
        assert!(matches!(
            ed.gap_penalty,
            GapPenalty::Affine { open, extend } if open == 0.03 && extend == 0.005
        ));

        let sw = SwConfig::default();
        assert_eq!(sw.score_match, 16);
        assert_eq!(sw.penalty_gap_start, 3);
        assert_eq!(sw.penalty_gap_extend, 1);
        assert_eq!(sw.bonus_boundary_whitespace, 10);
        assert!(sw.split_spaces);
    }

    #[test]
    fn test_distance_cap_switches_at_threshold() {
        let ed = EdConfig::default();
        assert_eq!(ed.distance_cap(12), 2);
        assert_eq!(ed.distance_cap(13), 3);
        assert_eq!(ed.distance_cap(40), 3);
    }

    #[test]
    fn test_match_ordering() {
        let a = Match {
            index: 3,
            score: 0.9,
            kind: MatchKind::Prefix,
        };
        let b = Match {
            index: 1,
            score: 0.5,
            kind: MatchKind::Substring,
        };
        let c = Match {
            index: 0,
            score: 0.5,
            kind: MatchKind::Substring,
        };
        let mut v = vec![b, a, c];
        v.sort_unstable();
        assert_eq!(v[0].index, 3);
        assert_eq!(v[1].index, 0);
        assert_eq!(v[2].index, 1);
    }
}
