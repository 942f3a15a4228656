//! Default scoring constants. `EdConfig::default()` and `SwConfig::default()`
//! are built entirely from these names; tweak with care, small changes can
//! lead to poor ranking.

/// Matches below this score are rejected.
pub const MIN_SCORE: f64 = 0.2;

// Edit-distance mode

pub const MAX_EDIT_DISTANCE: u32 = 2;
pub const LONG_QUERY_MAX_EDIT_DISTANCE: u32 = 3;
/// Queries at least this long use [`LONG_QUERY_MAX_EDIT_DISTANCE`].
pub const LONG_QUERY_THRESHOLD: usize = 13;

pub const PREFIX_WEIGHT: f64 = 1.5;
pub const SUBSTRING_WEIGHT: f64 = 1.0;
pub const ACRONYM_WEIGHT: f64 = 1.0;

pub const WORD_BOUNDARY_BONUS: f64 = 0.1;
pub const CONSECUTIVE_BONUS: f64 = 0.05;
pub const GAP_OPEN_PENALTY: f64 = 0.03;
pub const GAP_EXTEND_PENALTY: f64 = 0.005;
pub const FIRST_MATCH_BONUS: f64 = 0.15;
pub const FIRST_MATCH_BONUS_RANGE: usize = 10;
pub const LENGTH_PENALTY: f64 = 0.003;

/// Longest query the acronym matcher considers.
pub const ACRONYM_MAX_LEN: usize = 8;

// Smith-Waterman mode

pub const SW_SCORE_MATCH: u32 = 16;
pub const SW_PENALTY_GAP_START: u32 = 3;
pub const SW_PENALTY_GAP_EXTEND: u32 = 1;

pub const SW_BONUS_CONSECUTIVE: u32 = 4;
pub const SW_BONUS_BOUNDARY: u32 = 8;
pub const SW_BONUS_BOUNDARY_WHITESPACE: u32 = 10;
pub const SW_BONUS_BOUNDARY_DELIMITER: u32 = 9;
pub const SW_BONUS_CAMEL_CASE: u32 = 5;
pub const SW_BONUS_FIRST_CHAR_MULTIPLIER: u32 = 2;
/// Align whitespace-separated query words independently by default.
pub const SW_SPLIT_SPACES: bool = true;

/// Normalization headroom: a perfect score is treated as
/// `query_len * SW_SCORE_MATCH * SW_NORM_FACTOR`.
pub const SW_NORM_FACTOR: f64 = 2.0;
