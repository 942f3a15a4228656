use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use itertools::Itertools;

use super::FuzzyMatcher;
use crate::{Match, MatchConfig};

/// Score the haystack list across `threads` workers.
///
/// Workers claim fixed-size chunks through an atomic counter, each owning
/// its own [`ScoringBuffer`](crate::ScoringBuffer) while sharing the
/// prepared query read-only. Per-thread results are sorted locally and
/// k-way merged, so the output ordering matches the serial
/// [`match_list`](super::match_list).
pub fn match_list_parallel<S1: AsRef<[u8]>, S2: AsRef<[u8]> + Sync>(
    needle: S1,
    haystacks: &[S2],
    config: &MatchConfig,
    threads: usize,
) -> Vec<Match> {
    assert!(
        haystacks.len() < u32::MAX as usize,
        "haystack index overflow"
    );
    if needle.as_ref().is_empty() || haystacks.is_empty() {
        return vec![];
    }
    let threads = threads.max(1);

    // Smaller chunks enable better load balancing via stealing but too
    // small increases atomic contention.
    let chunk_size = 512;
    let num_chunks = haystacks.len().div_ceil(chunk_size);
    let next_chunk = AtomicUsize::new(0);

    let matcher = FuzzyMatcher::new(config.clone());
    let query = matcher.prepare(needle.as_ref());

    thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(|| {
                    let mut local_matches = Vec::new();
                    let mut buf = matcher.make_buffer();

                    loop {
                        let chunk_idx = next_chunk.fetch_add(1, Ordering::Relaxed);
                        if chunk_idx >= num_chunks {
                            break;
                        }

                        let start = chunk_idx * chunk_size;
                        let end = (start + chunk_size).min(haystacks.len());
                        for (offset, haystack) in haystacks[start..end].iter().enumerate() {
                            if let Some(m) = matcher.score(haystack.as_ref(), &query, &mut buf) {
                                local_matches.push(Match {
                                    index: (start + offset) as u32,
                                    score: m.score,
                                    kind: m.kind,
                                });
                            }
                        }
                    }

                    // Each thread sorts so the join is a k-way merge
                    local_matches.sort_unstable();
                    local_matches
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .kmerge()
            .collect()
    })
}
