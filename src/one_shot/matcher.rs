use std::collections::BinaryHeap;

use crate::buffer::ScoringBuffer;
use crate::chars::{classify_boundaries, to_lower};
use crate::query::PreparedQuery;
use crate::{Algorithm, Match, MatchConfig, MatchKind, ScoredMatch, edit_distance, smith_waterman};

/// Scoring entry point. Holds the configuration; all per-query state lives
/// in [`PreparedQuery`] and all scratch memory in [`ScoringBuffer`], so one
/// matcher serves any number of concurrent workers.
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    config: MatchConfig,
}

impl FuzzyMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Build the reusable query-side state for this matcher's configuration.
    pub fn prepare(&self, query: impl AsRef<[u8]>) -> PreparedQuery {
        PreparedQuery::new(query.as_ref(), &self.config)
    }

    /// A fresh scratch buffer. Create one per worker and reuse it; growth
    /// stops once it has seen the longest candidate.
    pub fn make_buffer(&self) -> ScoringBuffer {
        ScoringBuffer::new()
    }

    /// Score one candidate. `None` covers every kind of rejection:
    /// prefiltered out, no phase matched, or the score fell below
    /// `min_score`.
    pub fn score(
        &self,
        candidate: impl AsRef<[u8]>,
        query: &PreparedQuery,
        buf: &mut ScoringBuffer,
    ) -> Option<ScoredMatch> {
        self.score_impl(candidate.as_ref(), query, buf, true)
    }

    pub(crate) fn score_impl(
        &self,
        raw: &[u8],
        query: &PreparedQuery,
        buf: &mut ScoringBuffer,
        prefilter: bool,
    ) -> Option<ScoredMatch> {
        if query.lower.is_empty() || raw.is_empty() {
            return None;
        }
        let c_len = raw.len();
        buf.reserve(c_len);
        buf.lower.clear();
        buf.lower.extend(raw.iter().map(|&b| to_lower(b)));

        let min_score = self.config.min_score;
        if buf.lower[..] == query.lower[..] {
            return (1.0 >= min_score).then_some(ScoredMatch {
                score: 1.0,
                kind: MatchKind::Exact,
            });
        }

        if prefilter {
            if !query.filter.check_len(c_len) {
                return None;
            }
            if !query.filter.check_bitmask(query.bitmask, &buf.lower) {
                return None;
            }
            let ScoringBuffer {
                lower,
                trigram_seen,
                ..
            } = &mut *buf;
            if !query.filter.check_trigrams(&query.trigrams, lower, trigram_seen) {
                return None;
            }
        }

        classify_boundaries(raw, &mut buf.boundaries);

        let result = match &self.config.algorithm {
            Algorithm::EditDistance(ed) => {
                edit_distance::score(ed, min_score, query, buf, c_len)
            }
            Algorithm::SmithWaterman(sw) => {
                smith_waterman::score(sw, min_score, query, buf, c_len)
            }
        };
        debug_assert!(result.is_none_or(|m| (0.0..=1.0).contains(&m.score)));
        result.filter(|m| m.score >= min_score)
    }

    /// Score every haystack and return the survivors sorted best-first.
    pub fn match_list<S: AsRef<[u8]>>(
        &self,
        haystacks: &[S],
        query: &PreparedQuery,
    ) -> Vec<Match> {
        assert!(
            haystacks.len() < u32::MAX as usize,
            "haystack index overflow"
        );
        let mut buf = self.make_buffer();
        let mut matches = Vec::new();
        for (index, haystack) in haystacks.iter().enumerate() {
            if let Some(m) = self.score(haystack.as_ref(), query, &mut buf) {
                matches.push(Match {
                    index: index as u32,
                    score: m.score,
                    kind: m.kind,
                });
            }
        }
        matches.sort_unstable();
        matches
    }

    /// Like [`match_list`](Self::match_list) but keeps only the best
    /// `limit` results, via a bounded heap.
    pub fn top_matches<S: AsRef<[u8]>>(
        &self,
        haystacks: &[S],
        query: &PreparedQuery,
        limit: usize,
    ) -> Vec<Match> {
        assert!(
            haystacks.len() < u32::MAX as usize,
            "haystack index overflow"
        );
        if limit == 0 {
            return vec![];
        }
        let mut buf = self.make_buffer();
        let mut heap: BinaryHeap<Match> = BinaryHeap::with_capacity(limit + 1);
        for (index, haystack) in haystacks.iter().enumerate() {
            if let Some(m) = self.score(haystack.as_ref(), query, &mut buf) {
                heap.push(Match {
                    index: index as u32,
                    score: m.score,
                    kind: m.kind,
                });
                if heap.len() > limit {
                    // the heap's greatest element is the worst match
                    heap.pop();
                }
            }
        }
        heap.into_sorted_vec()
    }
}
