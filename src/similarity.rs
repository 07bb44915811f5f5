//! Pairwise string similarity functions for dedup.
//!
//! Dispatch is a plain enum match to one of a few pure functions rather than
//! a trait object — there is a small, fixed set of metrics and no need for a
//! virtual call on the hot path.

use crate::config::DedupFunction;

/// Normalized Levenshtein ratio in `[0, 1]`: `1 - edit_distance(a,b) / max(|a|,|b|)`.
/// Used by both the `seqm` and `levs` dedup functions, which are the same
/// metric under different historical names.
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// An upper bound on `levenshtein_ratio(a, b)`, cheap to compute from
/// lengths alone (`|len(a) - len(b)|` is a lower bound on edit distance).
/// If this bound is already `<= threshold`, the real ratio is guaranteed to
/// be too, so callers can skip the full computation without changing which
/// candidates get deduplicated.
pub fn levenshtein_ratio_upper_bound(a: &str, b: &str) -> f64 {
    let la = a.chars().count();
    let lb = b.chars().count();
    let max_len = la.max(lb);
    if max_len == 0 {
        return 1.0;
    }
    let min_dist = (la as i64 - lb as i64).unsigned_abs() as f64;
    1.0 - min_dist / max_len as f64
}

/// Jaro similarity, in `[0, 1]`.
pub fn jaro(a: &str, b: &str) -> f64 {
    strsim::jaro(a, b)
}

/// Dispatch to the configured similarity function.
pub fn similarity(func: DedupFunction, a: &str, b: &str) -> f64 {
    match func {
        DedupFunction::SeqMatcher | DedupFunction::Levenshtein => levenshtein_ratio(a, b),
        DedupFunction::Jaro => jaro(a, b),
    }
}
