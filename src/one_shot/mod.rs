use crate::{Match, MatchConfig};

mod matcher;
mod parallel;

pub use matcher::FuzzyMatcher;
pub use parallel::match_list_parallel;

/// Score `haystacks` against `needle`, sorted best-first.
pub fn match_list<S1: AsRef<[u8]>, S2: AsRef<[u8]>>(
    needle: S1,
    haystacks: &[S2],
    config: &MatchConfig,
) -> Vec<Match> {
    let matcher = FuzzyMatcher::new(config.clone());
    let query = matcher.prepare(needle);
    matcher.match_list(haystacks, &query)
}

/// Score `haystacks` against `needle`, keeping the best `limit` results.
pub fn top_matches<S1: AsRef<[u8]>, S2: AsRef<[u8]>>(
    needle: S1,
    haystacks: &[S2],
    config: &MatchConfig,
    limit: usize,
) -> Vec<Match> {
    let matcher = FuzzyMatcher::new(config.clone());
    let query = matcher.prepare(needle);
    matcher.top_matches(haystacks, &query, limit)
}
