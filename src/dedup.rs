//! Similarity-based deduplication of the ranked candidate list.

use crate::candidate::Candidate;
use crate::config::DedupFunction;
use crate::similarity;
use lru::LruCache;
use std::cell::RefCell;
use std::num::NonZeroUsize;

/// Extractor-owned, bounded memo of pairwise similarity scores. Purely a
/// compute shortcut — must never change the deterministic output of
/// extraction.
pub struct SimilarityCache {
    cache: RefCell<LruCache<(String, String), f64>>,
}

impl SimilarityCache {
    pub fn new(capacity: usize) -> Option<Self> {
        let capacity = NonZeroUsize::new(capacity)?;
        Some(Self {
            cache: RefCell::new(LruCache::new(capacity)),
        })
    }

    fn get_or_compute(&self, func: DedupFunction, a: &str, b: &str) -> f64 {
        let key = if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        };
        if let Some(&v) = self.cache.borrow().peek(&key) {
            return v;
        }
        let v = similarity::similarity(func, a, b);
        self.cache.borrow_mut().put(key, v);
        v
    }

    /// Drop every memoized entry.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}

fn similarity_of(
    func: DedupFunction,
    cache: Option<&SimilarityCache>,
    a: &str,
    b: &str,
) -> f64 {
    match cache {
        Some(cache) => cache.get_or_compute(func, a, b),
        None => similarity::similarity(func, a, b),
    }
}

/// Consume candidates already sorted by `H` ascending, and emit at most
/// `top_k` of them such that no emitted candidate is more than
/// `threshold`-similar to one emitted earlier.
///
/// `threshold >= 1.0` disables dedup entirely: the first `top_k` candidates
/// are returned unchanged.
pub fn dedup<'a>(
    candidates_sorted: impl Iterator<Item = &'a Candidate>,
    threshold: f64,
    func: DedupFunction,
    top_k: usize,
    cache: Option<&SimilarityCache>,
) -> Vec<&'a Candidate> {
    if threshold >= 1.0 {
        return candidates_sorted.take(top_k).collect();
    }

    let mut result: Vec<&Candidate> = Vec::with_capacity(top_k.min(64));
    for cand in candidates_sorted {
        if result.len() >= top_k {
            break;
        }

        let mut too_similar = false;
        for &prior in &result {
            // Pre-filter: the Levenshtein-ratio upper bound from length
            // alone is a sound, output-preserving fast rejection — it never
            // changes the verdict, only skips work when the bound already
            // rules out similarity above threshold.
            if func != DedupFunction::Jaro {
                let bound =
                    similarity::levenshtein_ratio_upper_bound(&cand.surface_lower, &prior.surface_lower);
                if bound <= threshold {
                    continue;
                }
            }

            let sim = similarity_of(func, cache, &cand.surface_lower, &prior.surface_lower);
            if sim > threshold {
                too_similar = true;
                break;
            }
        }

        if !too_similar {
            result.push(cand);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(surface: &str, h: f64) -> Candidate {
        Candidate {
            surface: surface.to_string(),
            surface_lower: surface.to_lowercase(),
            term_ids: vec![],
            tf: 1,
            h,
            valid: true,
        }
    }

    #[test]
    fn no_dedup_identity_at_threshold_one() {
        let cands = vec![cand("alpha", 0.1), cand("alpha beta", 0.11), cand("alpha!", 0.12)];
        let result = dedup(cands.iter(), 1.0, DedupFunction::SeqMatcher, 2, None);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].surface, "alpha");
        assert_eq!(result[1].surface, "alpha beta");
    }

    #[test]
    fn near_duplicate_is_dropped() {
        let cands = vec![cand("machine learning", 0.1), cand("machine learnings", 0.2)];
        let result = dedup(cands.iter(), 0.9, DedupFunction::SeqMatcher, 10, None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].surface, "machine learning");
    }

    #[test]
    fn dedup_is_idempotent() {
        let cands = vec![cand("data science", 0.1), cand("data sciences", 0.2), cand("cloud platform", 0.3)];
        let first = dedup(cands.iter(), 0.9, DedupFunction::SeqMatcher, 10, None);
        let firsts: Vec<Candidate> = first.iter().map(|c| (*c).clone()).collect();
        let second = dedup(firsts.iter(), 0.9, DedupFunction::SeqMatcher, 10, None);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.surface, b.surface);
        }
    }

    #[test]
    fn bounded_by_top_k() {
        let cands: Vec<Candidate> = (0..50).map(|i| cand(&format!("term{i}"), i as f64)).collect();
        let result = dedup(cands.iter(), 0.9, DedupFunction::SeqMatcher, 5, None);
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn similarity_cache_agrees_with_uncached() {
        let cache = SimilarityCache::new(16).unwrap();
        let cands = vec![cand("machine learning", 0.1), cand("machine learnings", 0.2)];
        let cached = dedup(cands.iter(), 0.9, DedupFunction::SeqMatcher, 10, Some(&cache));
        let uncached = dedup(cands.iter(), 0.9, DedupFunction::SeqMatcher, 10, None);
        assert_eq!(cached.len(), uncached.len());
        cache.clear();
    }
}
