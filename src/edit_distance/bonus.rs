//! Position-dependent bonus scoring for edit-distance matches.
//!
//! Every phase reduces its work to an [`AlignmentRecord`] and feeds it
//! through [`score`], so word-boundary, contiguity, gap, first-match and
//! length adjustments are applied identically everywhere.

use crate::chars::Boundary;
use crate::{EdConfig, GapPenalty};

/// What a phase learned about its best alignment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AlignmentRecord {
    /// Candidate byte position where the alignment begins.
    pub start: usize,
    /// Edit operations spent.
    pub edits: u32,
    /// Candidate bytes skipped inside the alignment span.
    pub gap_bytes: usize,
    /// Distinct gap openings (at most `gap_bytes`).
    pub gap_opens: usize,
    /// Adjacent matched pairs credited with the consecutive bonus.
    pub contiguous_pairs: usize,
    /// Weighted raw score before positional adjustments.
    pub base: f64,
}

pub(crate) fn score(
    cfg: &EdConfig,
    rec: &AlignmentRecord,
    boundaries: &[Boundary],
    q_len: usize,
    c_len: usize,
) -> f64 {
    let mut bonuses = 0.0;

    if boundaries[rec.start].is_boundary() {
        bonuses += cfg.word_boundary_bonus;
    }
    bonuses += cfg.consecutive_bonus * rec.contiguous_pairs as f64;

    if cfg.first_match_bonus_range > 0 && rec.start < cfg.first_match_bonus_range {
        let decay = 1.0 - rec.start as f64 / cfg.first_match_bonus_range as f64;
        bonuses += cfg.first_match_bonus * decay;
    }

    // Positional bonuses are weighted by alignment quality so they cannot
    // carry a mostly-edited fit over the score floor on their own.
    let quality = 1.0 - rec.edits as f64 / q_len as f64;
    let mut score = rec.base + bonuses * quality;

    score -= match cfg.gap_penalty {
        GapPenalty::Linear { per } => per * rec.gap_bytes as f64,
        GapPenalty::Affine { open, extend } => {
            open * rec.gap_opens as f64 + extend * (rec.gap_bytes - rec.gap_opens) as f64
        }
    };

    score -= cfg.length_penalty * c_len.saturating_sub(q_len) as f64;
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chars::classify_boundaries;

    fn boundaries_of(s: &str) -> Vec<Boundary> {
        let mut out = vec![Boundary::None; s.len() + 1];
        classify_boundaries(s.as_bytes(), &mut out);
        out
    }

    fn record(start: usize, base: f64) -> AlignmentRecord {
        AlignmentRecord {
            start,
            edits: 0,
            gap_bytes: 0,
            gap_opens: 0,
            contiguous_pairs: 0,
            base,
        }
    }

    #[test]
    fn test_word_boundary_bonus_applied_at_start() {
        let cfg = EdConfig::default();
        let b = boundaries_of("foo_bar");
        let at_boundary = score(&cfg, &record(4, 0.5), &b, 3, 7);
        let inside_word = score(&cfg, &record(5, 0.5), &b, 3, 7);
        assert!(at_boundary > inside_word);
    }

    #[test]
    fn test_first_match_bonus_decays_with_start() {
        let cfg = EdConfig::default();
        let b = boundaries_of("aaaaaaaaaaaaaaaaaaaa");
        let early = score(&cfg, &record(1, 0.5), &b, 3, 20);
        let later = score(&cfg, &record(5, 0.5), &b, 3, 20);
        let out_of_range = score(&cfg, &record(12, 0.5), &b, 3, 20);
        assert!(early > later);
        assert!(later > out_of_range);
        let expected = 0.5 + 0.15 * (1.0 - 0.5) - 0.003 * 17.0;
        assert!((later - expected).abs() < 1e-9);
    }

    #[test]
    fn test_affine_gap_penalty() {
        let cfg = EdConfig::default();
        let b = boundaries_of("aaaaaaaaaa");
        let gapless = score(&cfg, &record(2, 0.5), &b, 4, 10);
        let one_gap = score(
            &cfg,
            &AlignmentRecord {
                gap_bytes: 3,
                gap_opens: 1,
                ..record(2, 0.5)
            },
            &b,
            4,
            10,
        );
        // open 0.03 + 2 extensions at 0.005
        assert!((gapless - one_gap - 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_linear_gap_penalty() {
        let cfg = EdConfig {
            gap_penalty: GapPenalty::Linear { per: 0.02 },
            ..EdConfig::default()
        };
        let b = boundaries_of("aaaaaaaaaa");
        let gapless = score(&cfg, &record(2, 0.5), &b, 4, 10);
        let gapped = score(
            &cfg,
            &AlignmentRecord {
                gap_bytes: 3,
                gap_opens: 1,
                ..record(2, 0.5)
            },
            &b,
            4,
            10,
        );
        assert!((gapless - gapped - 0.06).abs() < 1e-9);
    }

    #[test]
    fn test_bonuses_scale_with_alignment_quality() {
        let cfg = EdConfig::default();
        let b = boundaries_of("abcdefgh");
        let clean = score(&cfg, &record(0, 0.3), &b, 3, 8);
        let edited = score(
            &cfg,
            &AlignmentRecord {
                edits: 2,
                ..record(0, 0.3)
            },
            &b,
            3,
            8,
        );
        // same base: with two of three query bytes edited only a third of
        // the positional bonuses survives
        let full_bonus = 0.1 + 0.15;
        assert!((clean - edited - full_bonus * (2.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_length_penalty_monotonic() {
        let cfg = EdConfig::default();
        let b = boundaries_of("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let short = score(&cfg, &record(15, 0.5), &b, 4, 10);
        let long = score(&cfg, &record(15, 0.5), &b, 4, 30);
        assert!(short > long);
    }

    #[test]
    fn test_clamped_to_unit_interval() {
        let cfg = EdConfig::default();
        let b = boundaries_of("abc");
        assert_eq!(score(&cfg, &record(0, 2.0), &b, 3, 3), 1.0);
        let negative = AlignmentRecord {
            gap_bytes: 100,
            gap_opens: 1,
            ..record(0, 0.0)
        };
        assert_eq!(score(&cfg, &negative, &b, 3, 3), 0.0);
    }
}
