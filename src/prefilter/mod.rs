//! Cheap rejection tests, run before the scorers since in the typical case
//! only a small percentage of candidates can match the query. Three tests
//! apply cheapest-first: candidate length, character-class bitmask, trigram
//! multiset intersection. Each is conservative — a candidate any scoring
//! phase could accept is never rejected here.

use crate::chars::class_bitmask;
use crate::query::TrigramCounts;
use crate::r#const::*;
use crate::{Algorithm, MatchConfig};

/// Per-query rejection thresholds, computed once at preparation time.
#[derive(Debug, Clone, Default)]
pub(crate) struct Prefilter {
    /// Shortest candidate worth scoring.
    min_len: usize,
    /// Longest candidate that could still clear `min_score` under the
    /// length penalty. Edit-distance mode only.
    max_len: Option<usize>,
    /// Character classes of the query allowed to be absent from the
    /// candidate before a match becomes impossible.
    max_missing: u32,
    /// Minimum surviving trigram intersection; 0 disables the test.
    min_trigram_hits: u32,
}

impl Prefilter {
    pub(crate) fn for_query(q_len: usize, config: &MatchConfig) -> Self {
        match &config.algorithm {
            Algorithm::EditDistance(ed) => {
                let cap = ed.distance_cap(q_len);
                // Upper length bound: the largest score a non-exact match can
                // reach is the best phase weight plus every additive bonus,
                // and the length penalty eats 'length_penalty' per surplus
                // byte. Anything the penalty pushes below min_score at that
                // ceiling is hopeless regardless of alignment.
                let ceiling = ed
                    .prefix_weight
                    .max(ed.substring_weight)
                    .max(ed.acronym_weight)
                    + ed.word_boundary_bonus
                    + ed.first_match_bonus
                    + q_len.saturating_sub(1) as f64 * ed.consecutive_bonus;
                let max_len = if ed.length_penalty > 0.0 && ceiling > config.min_score {
                    let surplus = ((ceiling - config.min_score) / ed.length_penalty) as usize;
                    Some(q_len + surplus)
                } else if ed.length_penalty > 0.0 {
                    // Only an exact match (scored 1.0 without bonuses) can
                    // clear min_score.
                    Some(q_len)
                } else {
                    None
                };
                // Disabled for acronym-eligible lengths: an initialism
                // match shares no trigrams with its candidate.
                let min_trigram_hits = if q_len > ACRONYM_MAX_LEN {
                    (q_len as u32 - 2).saturating_sub(3 * cap)
                } else {
                    0
                };
                Self {
                    min_len: q_len.saturating_sub(cap as usize),
                    max_len,
                    max_missing: cap,
                    min_trigram_hits,
                }
            }
            Algorithm::SmithWaterman(sw) => {
                // Every matched query byte contributes at most the match
                // score plus the strongest boundary and consecutive bonuses,
                // doubled for the first query row. Clearing min_score under
                // the fixed normalization therefore needs a minimum number
                // of matched bytes; each missing character class forfeits at
                // least one of them.
                let best_boundary = sw
                    .bonus_boundary_whitespace
                    .max(sw.bonus_boundary_delimiter)
                    .max(sw.bonus_boundary)
                    .max(sw.bonus_camel_case);
                let per_byte = (sw.score_match + best_boundary + sw.bonus_consecutive)
                    * sw.bonus_first_char_multiplier.max(1);
                let target = config.min_score
                    * (q_len as u32 * sw.score_match) as f64
                    * SW_NORM_FACTOR;
                let min_matched = (target / per_byte as f64).ceil() as usize;
                Self {
                    min_len: min_matched.min(q_len.saturating_add(1)),
                    max_len: None,
                    max_missing: q_len.saturating_sub(min_matched) as u32,
                    min_trigram_hits: 0,
                }
            }
        }
    }

    #[inline]
    pub(crate) fn check_len(&self, c_len: usize) -> bool {
        c_len >= self.min_len && self.max_len.is_none_or(|max| c_len <= max)
    }

    #[inline]
    pub(crate) fn check_bitmask(&self, query_mask: u64, cand_lower: &[u8]) -> bool {
        let missing = (query_mask & !class_bitmask(cand_lower)).count_ones();
        missing <= self.max_missing
    }

    /// Multiset-intersection test. `seen` is caller-owned scratch; its
    /// capacity is reused across calls.
    pub(crate) fn check_trigrams(
        &self,
        query_trigrams: &TrigramCounts,
        cand_lower: &[u8],
        seen: &mut TrigramCounts,
    ) -> bool {
        if self.min_trigram_hits == 0 || query_trigrams.is_empty() {
            return true;
        }
        seen.clear();
        let mut hits = 0u32;
        for window in cand_lower.windows(3) {
            let key = [window[0], window[1], window[2]];
            if let Some(&budget) = query_trigrams.get(&key) {
                let used = seen.entry(key).or_insert(0);
                if *used < budget {
                    *used += 1;
                    hits += 1;
                    if hits >= self.min_trigram_hits {
                        return true;
                    }
                }
            }
        }
        false
    }
}
