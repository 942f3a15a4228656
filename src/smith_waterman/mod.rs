//! Smith-Waterman local alignment with affine gaps, in integer arithmetic.
//!
//! One DP pass over the whole candidate per query (or per atom when the
//! query was split on whitespace). Three states roll row by row: `H` is the
//! best alignment ending at the current cell, `D` the best ending in a run
//! of skipped query bytes, and a running `P` scalar the best ending in a
//! run of skipped candidate bytes. Matches earn the match score plus the
//! boundary bonus of their candidate position and a consecutive bonus when
//! the previous diagonal cell also matched; the first query row is
//! multiplied up so anchoring the first character counts extra. Mismatches
//! carry the diagonal forward unpenalized — ranking is driven by what did
//! match, typo tolerance is the edit-distance mode's job.

use crate::acronym;
use crate::buffer::ScoringBuffer;
use crate::chars::Boundary;
use crate::query::PreparedQuery;
use crate::r#const::{ACRONYM_WEIGHT, SW_NORM_FACTOR};
use crate::{MatchKind, ScoredMatch, SwConfig};

pub(crate) fn score(
    cfg: &SwConfig,
    min_score: f64,
    query: &PreparedQuery,
    buf: &mut ScoringBuffer,
    c_len: usize,
) -> Option<ScoredMatch> {
    let ScoringBuffer {
        lower,
        boundaries,
        sw_h_prev,
        sw_h_curr,
        sw_d_prev,
        sw_d_curr,
        sw_m_prev,
        sw_m_curr,
        acronym_initials,
        ..
    } = buf;
    let cand = &lower[..c_len];

    let normalized = if query.atoms.is_empty() {
        let raw = alignment_raw(
            cfg,
            &query.lower,
            cand,
            boundaries,
            sw_h_prev,
            sw_h_curr,
            sw_d_prev,
            sw_d_curr,
            sw_m_prev,
            sw_m_curr,
        );
        let max = max_raw(cfg, query.lower.len());
        (raw > 0 && max > 0.0).then(|| raw as f64 / max)
    } else {
        // Atom splitting: each whitespace-separated word aligns on its own;
        // one dead atom rejects the candidate.
        let mut raw_sum = 0u64;
        let mut max_sum = 0.0f64;
        let mut alive = true;
        for atom in &query.atoms {
            let raw = alignment_raw(
                cfg,
                &atom.lower,
                cand,
                boundaries,
                sw_h_prev,
                sw_h_curr,
                sw_d_prev,
                sw_d_curr,
                sw_m_prev,
                sw_m_curr,
            );
            if raw == 0 {
                alive = false;
                break;
            }
            raw_sum += raw as u64;
            max_sum += max_raw(cfg, atom.lower.len());
        }
        (alive && max_sum > 0.0).then(|| raw_sum as f64 / max_sum)
    };

    let mut best = normalized.map(|score| ScoredMatch {
        score: score.min(1.0),
        kind: MatchKind::Alignment,
    });

    // Acronym fallback: when the alignment cannot clear the floor, an
    // initialism still can ("bms" against "Bristol-Myers Squibb").
    if best.is_none_or(|m| m.score < min_score) {
        if let Some(acr) =
            acronym::score(&query.lower, cand, boundaries, acronym_initials, ACRONYM_WEIGHT)
        {
            let acr = acr.clamp(0.0, 1.0);
            if best.is_none_or(|m| acr > m.score) {
                best = Some(ScoredMatch {
                    score: acr,
                    kind: MatchKind::Acronym,
                });
            }
        }
    }

    best.filter(|m| m.score >= min_score)
}

/// Score an exact, perfectly-anchored match of `q_len` bytes would be in
/// the vicinity of `q_len * score_match * 2`; normalizing by that keeps
/// strong matches near 1.0 without exceeding it.
#[inline]
fn max_raw(cfg: &SwConfig, q_len: usize) -> f64 {
    (q_len as u32 * cfg.score_match) as f64 * SW_NORM_FACTOR
}

#[inline]
fn boundary_bonus(cfg: &SwConfig, class: Boundary) -> u32 {
    match class {
        Boundary::Whitespace => cfg.bonus_boundary_whitespace,
        Boundary::Delimiter => cfg.bonus_boundary_delimiter,
        Boundary::OtherNonWord => cfg.bonus_boundary,
        Boundary::Camel => cfg.bonus_camel_case,
        Boundary::None => 0,
    }
}

#[allow(clippy::too_many_arguments)]
fn alignment_raw(
    cfg: &SwConfig,
    q: &[u8],
    cand: &[u8],
    boundaries: &[Boundary],
    h_prev: &mut Vec<u32>,
    h_curr: &mut Vec<u32>,
    d_prev: &mut Vec<u32>,
    d_curr: &mut Vec<u32>,
    m_prev: &mut Vec<bool>,
    m_curr: &mut Vec<bool>,
) -> u32 {
    let c_len = cand.len();
    h_prev[..=c_len].fill(0);
    d_prev[..=c_len].fill(0);
    m_prev[..=c_len].fill(false);

    let mut best = 0u32;
    for i in 1..=q.len() {
        h_curr[0] = 0;
        d_curr[0] = 0;
        m_curr[0] = false;
        let mut p = 0u32;

        for j in 1..=c_len {
            let matched = q[i - 1] == cand[j - 1];
            let match_score = if matched {
                let mut s = cfg.score_match + boundary_bonus(cfg, boundaries[j - 1]);
                if m_prev[j - 1] {
                    s += cfg.bonus_consecutive;
                }
                if i == 1 {
                    s *= cfg.bonus_first_char_multiplier.max(1);
                }
                s
            } else {
                0
            };

            let diag = h_prev[j - 1] + match_score;
            p = (h_curr[j - 1].saturating_sub(cfg.penalty_gap_start))
                .max(p.saturating_sub(cfg.penalty_gap_extend));
            let d = (h_prev[j].saturating_sub(cfg.penalty_gap_start))
                .max(d_prev[j].saturating_sub(cfg.penalty_gap_extend));

            let h = diag.max(p).max(d);
            h_curr[j] = h;
            d_curr[j] = d;
            m_curr[j] = matched;
            best = best.max(h);
        }

        std::mem::swap(h_prev, h_curr);
        std::mem::swap(d_prev, d_curr);
        std::mem::swap(m_prev, m_curr);
    }
    best
}
