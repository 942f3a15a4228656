//! Reusable scratch memory for the scoring hot path.

use crate::chars::Boundary;
use crate::query::TrigramCounts;

/// Per-worker scratch space owning every array the scorers need.
///
/// Capacities grow monotonically with the longest candidate seen and are
/// never shrunk, so a buffer that has warmed up performs no heap allocation.
/// Contents carry no meaning between calls. The exclusive `&mut` borrow
/// taken by [`FuzzyMatcher::score`](crate::FuzzyMatcher::score) is what
/// prevents a buffer from being shared by two scoring operations; the type
/// is `Send`, so workers can each own one, but nothing about it is `Sync`.
#[derive(Debug, Default)]
pub struct ScoringBuffer {
    /// Lowercased candidate bytes for the current call.
    pub(crate) lower: Vec<u8>,
    /// Boundary class per candidate position, plus one sentinel cell.
    pub(crate) boundaries: Vec<Boundary>,

    // Edit-distance fit DP: three rolling cost rows and the matching
    // alignment-start rows, rotated by swap.
    pub(crate) row_prev: Vec<u32>,
    pub(crate) row_curr: Vec<u32>,
    pub(crate) row_prev2: Vec<u32>,
    pub(crate) start_prev: Vec<usize>,
    pub(crate) start_curr: Vec<usize>,
    pub(crate) start_prev2: Vec<usize>,

    // Smith-Waterman rolling rows: match-state scores, query-gap scores,
    // and the per-cell matched flags feeding the consecutive bonus.
    pub(crate) sw_h_prev: Vec<u32>,
    pub(crate) sw_h_curr: Vec<u32>,
    pub(crate) sw_d_prev: Vec<u32>,
    pub(crate) sw_d_curr: Vec<u32>,
    pub(crate) sw_m_prev: Vec<bool>,
    pub(crate) sw_m_curr: Vec<bool>,

    /// Word-initial byte positions of the current candidate.
    pub(crate) acronym_initials: Vec<usize>,
    /// Consumed-count scratch for the trigram multiset intersection.
    pub(crate) trigram_seen: TrigramCounts,
}

impl ScoringBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow every array to hold a candidate of `len` bytes. Never shrinks.
    pub(crate) fn reserve(&mut self, len: usize) {
        let cells = len + 1;
        if self.row_prev.len() >= cells {
            return;
        }
        self.boundaries.resize(cells, Boundary::None);
        self.row_prev.resize(cells, 0);
        self.row_curr.resize(cells, 0);
        self.row_prev2.resize(cells, 0);
        self.start_prev.resize(cells, 0);
        self.start_curr.resize(cells, 0);
        self.start_prev2.resize(cells, 0);
        self.sw_h_prev.resize(cells, 0);
        self.sw_h_curr.resize(cells, 0);
        self.sw_d_prev.resize(cells, 0);
        self.sw_d_curr.resize(cells, 0);
        self.sw_m_prev.resize(cells, false);
        self.sw_m_curr.resize(cells, false);
    }
}
