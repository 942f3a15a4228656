//! Acronym matching: fit a short, letter-only query against the
//! word-initial bytes of the candidate, in order. "bms" finds
//! "Bristol-Myers Squibb" even though no other phase can.

use crate::chars::Boundary;
use crate::r#const::ACRONYM_MAX_LEN;

/// Match every query byte against candidate word initials, in order, with
/// no mismatch tolerance. The score rewards dense initialisms: consuming
/// the initials of adjacent words scores higher than skipping across the
/// candidate.
///
/// `initials` is caller-owned scratch; it ends up holding the word-initial
/// positions of the candidate.
pub(crate) fn score(
    query_lower: &[u8],
    cand_lower: &[u8],
    boundaries: &[Boundary],
    initials: &mut Vec<usize>,
    weight: f64,
) -> Option<f64> {
    let q_len = query_lower.len();
    if q_len == 0 || q_len > ACRONYM_MAX_LEN {
        return None;
    }
    if !query_lower.iter().all(|b| b.is_ascii_lowercase()) {
        return None;
    }

    initials.clear();
    for i in 0..cand_lower.len() {
        if i == 0 || boundaries[i].is_boundary() {
            initials.push(i);
        }
    }

    let mut first = None;
    let mut last = 0usize;
    let mut cursor = 0usize;
    for &qb in query_lower {
        let mut hit = None;
        while cursor < initials.len() {
            let pos = initials[cursor];
            cursor += 1;
            if cand_lower[pos] == qb {
                hit = Some(cursor - 1);
                break;
            }
        }
        let idx = hit?;
        if first.is_none() {
            first = Some(idx);
        }
        last = idx;
    }

    let span = (last - first? + 1) as f64;
    Some(weight * q_len as f64 / span)
}
