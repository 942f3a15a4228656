//! Edit-distance scoring: a cascade of phases from cheap to expensive.
//!
//! Exact and prefix matches are resolved by direct comparison, contiguous
//! infixes by a window search, and everything else by a restricted
//! Damerau-Levenshtein DP that fits the query against the best-matching
//! substring of the candidate (free leading and trailing candidate skip).
//! A phase result below the score floor falls through to the acronym
//! matcher, so initialisms are not shadowed by marginal far-fetched fits.

mod bonus;

use bonus::AlignmentRecord;

use crate::acronym;
use crate::buffer::ScoringBuffer;
use crate::query::PreparedQuery;
use crate::{EdConfig, MatchKind, ScoredMatch};

/// Shrinks the phase base of long candidates: matching 4 bytes out of 40
/// says less than matching 4 out of 5. Capped at 1 so short candidates
/// (reachable within the edit budget) are not inflated.
#[inline]
fn coverage(q_len: usize, c_len: usize) -> f64 {
    (q_len as f64 / c_len as f64).min(1.0).sqrt()
}

pub(crate) fn score(
    cfg: &EdConfig,
    min_score: f64,
    query: &PreparedQuery,
    buf: &mut ScoringBuffer,
    c_len: usize,
) -> Option<ScoredMatch> {
    let q_len = query.lower.len();
    let cov = coverage(q_len, c_len);
    let ScoringBuffer {
        lower,
        boundaries,
        row_prev,
        row_curr,
        row_prev2,
        start_prev,
        start_curr,
        start_prev2,
        acronym_initials,
        ..
    } = buf;
    let cand = &lower[..c_len];
    let q = &query.lower[..];

    let contiguous = |start: usize| AlignmentRecord {
        start,
        edits: 0,
        gap_bytes: 0,
        gap_opens: 0,
        contiguous_pairs: 0,
        base: cfg.substring_weight * cov,
    };

    if cand.starts_with(q) {
        // The fit DP cannot beat distance zero, so the best-of comparison
        // reduces to the prefix score against a gapless alignment at the
        // head. Either way the match reports as a prefix.
        let mut prefix = cfg.prefix_weight * cov;
        if boundaries[0].is_boundary() {
            prefix += cfg.word_boundary_bonus;
        }
        prefix -= cfg.length_penalty * c_len.saturating_sub(q_len) as f64;
        let prefix = prefix.clamp(0.0, 1.0);
        let fitted = bonus::score(cfg, &contiguous(0), boundaries, q_len, c_len);
        let best = prefix.max(fitted);
        return (best >= min_score).then_some(ScoredMatch {
            score: best,
            kind: MatchKind::Prefix,
        });
    }

    let infix = if let Some(p) = cand.windows(q_len).position(|w| w == q) {
        // A contiguous occurrence is already the optimal fit; skip the DP.
        Some(bonus::score(cfg, &contiguous(p), boundaries, q_len, c_len))
    } else {
        let cap = cfg.distance_cap(q_len);
        fit_damerau(
            q,
            cand,
            cap,
            row_prev,
            row_curr,
            row_prev2,
            start_prev,
            start_curr,
            start_prev2,
        )
        .filter(|fit| fit.distance < q_len as u32)
        .map(|fit| {
            let span = fit.end - fit.start;
            let gap_bytes = span.saturating_sub(q_len);
            let contiguous_pairs = if gap_bytes > 0 {
                (q_len - 1).saturating_sub(fit.distance as usize + gap_bytes)
            } else {
                0
            };
            let rec = AlignmentRecord {
                start: fit.start,
                edits: fit.distance,
                gap_bytes,
                gap_opens: gap_bytes.min(1),
                contiguous_pairs,
                base: cfg.substring_weight * (1.0 - fit.distance as f64 / q_len as f64) * cov,
            };
            bonus::score(cfg, &rec, boundaries, q_len, c_len)
        })
    };

    if let Some(score) = infix {
        if score >= min_score {
            return Some(ScoredMatch {
                score,
                kind: MatchKind::Substring,
            });
        }
    }

    acronym::score(q, cand, boundaries, acronym_initials, cfg.acronym_weight)
        .map(|s| (s - cfg.length_penalty * c_len.saturating_sub(q_len) as f64).clamp(0.0, 1.0))
        .filter(|s| *s >= min_score)
        .map(|score| ScoredMatch {
            score,
            kind: MatchKind::Acronym,
        })
}

/// Best fit of the query against any substring of the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fit {
    distance: u32,
    /// One past the last candidate byte of the alignment.
    end: usize,
    /// First candidate byte of the alignment.
    start: usize,
}

/// Restricted Damerau-Levenshtein (insert, delete, substitute, adjacent
/// transpose) of the query against every candidate substring: the first
/// row costs nothing, the terminal distance is the minimum over the last
/// row, and each cell carries the start of the alignment it extends.
/// Rows roll by swap; a row whose minimum exceeds `cap` ends the search.
#[allow(clippy::too_many_arguments)]
fn fit_damerau(
    q: &[u8],
    cand: &[u8],
    cap: u32,
    prev: &mut Vec<u32>,
    curr: &mut Vec<u32>,
    prev2: &mut Vec<u32>,
    s_prev: &mut Vec<usize>,
    s_curr: &mut Vec<usize>,
    s_prev2: &mut Vec<usize>,
) -> Option<Fit> {
    let q_len = q.len();
    let c_len = cand.len();

    for j in 0..=c_len {
        prev[j] = 0;
        s_prev[j] = j;
    }

    for i in 1..=q_len {
        curr[0] = i as u32;
        s_curr[0] = 0;
        let mut row_min = curr[0];

        for j in 1..=c_len {
            let sub_cost = u32::from(q[i - 1] != cand[j - 1]);
            let mut best = prev[j - 1] + sub_cost;
            let mut best_start = s_prev[j - 1];

            let delete = prev[j] + 1;
            if delete < best {
                best = delete;
                best_start = s_prev[j];
            }
            let insert = curr[j - 1] + 1;
            if insert < best {
                best = insert;
                best_start = s_curr[j - 1];
            }
            if i >= 2 && j >= 2 && q[i - 1] == cand[j - 2] && q[i - 2] == cand[j - 1] {
                let transpose = prev2[j - 2] + 1;
                if transpose < best {
                    best = transpose;
                    best_start = s_prev2[j - 2];
                }
            }

            curr[j] = best;
            s_curr[j] = best_start;
            row_min = row_min.min(best);
        }

        if row_min > cap {
            return None;
        }

        std::mem::swap(prev2, prev);
        std::mem::swap(prev, curr);
        std::mem::swap(s_prev2, s_prev);
        std::mem::swap(s_prev, s_curr);
    }

    // Final row now lives in `prev`. Smallest end position wins ties.
    let mut distance = prev[0];
    let mut end = 0;
    for j in 1..=c_len {
        if prev[j] < distance {
            distance = prev[j];
            end = j;
        }
    }
    (distance <= cap).then(|| Fit {
        distance,
        end,
        start: s_prev[end],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(q: &str, cand: &str, cap: u32) -> Option<Fit> {
        let cells = cand.len() + 1;
        let mut prev = vec![0u32; cells];
        let mut curr = vec![0u32; cells];
        let mut prev2 = vec![0u32; cells];
        let mut s_prev = vec![0usize; cells];
        let mut s_curr = vec![0usize; cells];
        let mut s_prev2 = vec![0usize; cells];
        fit_damerau(
            q.as_bytes(),
            cand.as_bytes(),
            cap,
            &mut prev,
            &mut curr,
            &mut prev2,
            &mut s_prev,
            &mut s_curr,
            &mut s_prev2,
        )
    }

    #[test]
    fn test_fit_exact_infix() {
        assert_eq!(
            fit("abc", "zzabczz", 2),
            Some(Fit {
                distance: 0,
                end: 5,
                start: 2
            })
        );
    }

    #[test]
    fn test_fit_prefers_earliest_end_on_ties() {
        let f = fit("ab", "abab", 2).unwrap();
        assert_eq!(f.distance, 0);
        assert_eq!(f.end, 2);
        assert_eq!(f.start, 0);
    }

    #[test]
    fn test_fit_single_insertion() {
        // distance 1 is reachable both by substituting at "use" (end 3) and
        // by inserting the 'e' (end 4); the earlier end wins
        assert_eq!(
            fit("usr", "user", 2),
            Some(Fit {
                distance: 1,
                end: 3,
                start: 0
            })
        );
    }

    #[test]
    fn test_fit_transposition_costs_one() {
        assert_eq!(
            fit("ba", "ab", 2),
            Some(Fit {
                distance: 1,
                end: 2,
                start: 0
            })
        );
        let f = fit("goldamn", "goldman sachs", 2).unwrap();
        assert_eq!(f.distance, 1);
        assert_eq!(f.end, 7);
        assert_eq!(f.start, 0);
    }

    #[test]
    fn test_fit_cap_boundary() {
        // two substitutions sit exactly at the cap
        assert_eq!(fit("abcdef", "axcxef", 2).map(|f| f.distance), Some(2));
        // three exceed it
        assert_eq!(fit("abcdef", "axcxex", 2), None);
        assert_eq!(fit("abcdef", "axcxex", 3).map(|f| f.distance), Some(3));
    }

    #[test]
    fn test_fit_rejects_disjoint_strings_early() {
        assert_eq!(fit("abc", "xyz", 2), None);
        assert_eq!(fit("abcdefgh", "zzzzzzzzzzzz", 2), None);
    }

    #[test]
    fn test_fit_candidate_shorter_than_query() {
        // deleting the trailing query byte fits "abc" onto "ab"
        assert_eq!(
            fit("abc", "ab", 2),
            Some(Fit {
                distance: 1,
                end: 2,
                start: 0
            })
        );
    }

    #[test]
    fn test_coverage_capped_at_one() {
        assert_eq!(coverage(5, 3), 1.0);
        assert!((coverage(3, 12) - 0.5).abs() < 1e-12);
    }
}
