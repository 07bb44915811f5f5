//! Single-term features and the composite `H` score.

use crate::document::DocumentStats;
use crate::error::YakeError;
use crate::graph::CooccurrenceGraph;
use crate::term::TermTable;

/// The five per-term features, each in `[0, inf)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermFeatures {
    pub w_case: f64,
    pub w_pos: f64,
    pub w_freq: f64,
    pub w_rel: f64,
    pub w_spread: f64,
}

impl TermFeatures {
    /// Composite importance score. Lower is better.
    pub fn h(&self) -> f64 {
        self.w_rel * self.w_pos
            / (self.w_case + self.w_freq / self.w_rel + self.w_spread / self.w_rel)
    }
}

fn relatedness_side(distinct: u32, sum_weights: u64) -> f64 {
    if distinct == 0 || sum_weights == 0 {
        return 0.0;
    }
    let dl = distinct as f64 / sum_weights as f64;
    dl / distinct as f64
}

fn compute_term_features(
    graph: &CooccurrenceGraph,
    stats: &DocumentStats,
    id: u32,
    tf: u32,
    tf_a: u32,
    tf_n: u32,
    median_sentence_id: f64,
    n_sentences_member: usize,
) -> TermFeatures {
    let w_case = tf_a.max(tf_n) as f64 / (1.0 + (tf as f64).ln());
    let w_pos = (3.0 + median_sentence_id).ln().ln();

    let denom_freq = stats.avg_tf_doc + stats.std_tf_doc;
    let w_freq = if denom_freq > 0.0 {
        tf as f64 / denom_freq
    } else {
        0.0
    };

    let mut distinct_left = 0u32;
    let mut sum_incoming = 0u64;
    for (_src, w) in graph.left_neighbors(id) {
        distinct_left += 1;
        sum_incoming += w as u64;
    }
    let mut distinct_right = 0u32;
    let mut sum_outgoing = 0u64;
    for (_dst, w) in graph.right_neighbors(id) {
        distinct_right += 1;
        sum_outgoing += w as u64;
    }
    let wl = relatedness_side(distinct_left, sum_incoming);
    let wr = relatedness_side(distinct_right, sum_outgoing);

    let tf_ratio = if stats.max_tf_doc > 0 {
        tf as f64 / stats.max_tf_doc as f64
    } else {
        0.0
    };
    let w_rel = 1.0 + (wl + wr) * tf_ratio;

    let w_spread = if stats.n_sentences_doc > 0 {
        n_sentences_member as f64 / stats.n_sentences_doc as f64
    } else {
        0.0
    };

    TermFeatures {
        w_case,
        w_pos,
        w_freq,
        w_rel,
        w_spread,
    }
}

/// Fill `h` on every non-stopword term in the table. Stopwords keep
/// `h = 0.0`; their `tf`/edge statistics still feed the relatedness feature
/// of their neighbors, which is why the graph and term table retain them
/// rather than discarding them up front.
///
/// Every denominator here is structurally positive given the term-table and
/// graph invariants; a non-finite or negative `H` means an invariant was
/// violated upstream, so this is checked unconditionally rather than with
/// `debug_assert!`, which a release build would compile away.
pub fn compute(terms: &mut TermTable, graph: &CooccurrenceGraph, stats: &DocumentStats) -> Result<(), YakeError> {
    let ids: Vec<u32> = terms
        .iter()
        .filter(|t| !t.is_stopword)
        .map(|t| t.id)
        .collect();

    for id in ids {
        let (tf, tf_a, tf_n, median, n_sent) = {
            let t = terms.get(id);
            (t.tf, t.tf_a, t.tf_n, t.median_sentence_id(), t.sentence_ids.len())
        };
        let features = compute_term_features(graph, stats, id, tf, tf_a, tf_n, median, n_sent);
        let h = features.h();
        if !(h.is_finite() && h >= 0.0) {
            return Err(YakeError::InvariantViolation(format!(
                "non-finite or negative H ({h}) for term {id}"
            )));
        }
        terms.get_mut(id).h = h;
    }
    Ok(())
}
