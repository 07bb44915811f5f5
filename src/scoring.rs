//! Composed-candidate scoring: aggregating constituent `H` values, term
//! frequency, and the stopword-adjacency penalty into a single per-candidate
//! `H`.

use crate::candidate::CandidateTable;
use crate::error::YakeError;
use crate::graph::CooccurrenceGraph;
use crate::term::TermTable;

/// Aggregated stopword-adjacency penalty for one maximal run of consecutive
/// stopwords inside a candidate. This is the corrected, aggregated form: a
/// per-stopword subtractive version produces negative denominators for long
/// runs in highly stopworded text and must not be reintroduced.
fn run_penalty(left_neighbor: u32, first_stop: u32, last_stop: u32, right_neighbor: u32, terms: &TermTable, graph: &CooccurrenceGraph, run_len: usize) -> f64 {
    let left = terms.get(left_neighbor);
    let right = terms.get(right_neighbor);

    let p1 = if left.tf > 0 {
        graph.edge_weight(left_neighbor, first_stop) as f64 / left.tf as f64
    } else {
        0.0
    };
    let p2 = if right.tf > 0 {
        graph.edge_weight(last_stop, right_neighbor) as f64 / right.tf as f64
    } else {
        0.0
    };
    let mean_p = (p1 + p2) / 2.0;
    run_len as f64 * (1.0 - mean_p)
}

fn stopword_penalty(term_ids: &[u32], terms: &TermTable, graph: &CooccurrenceGraph) -> f64 {
    let mut penalty = 0.0;
    let mut i = 0;
    while i < term_ids.len() {
        if terms.get(term_ids[i]).is_stopword {
            let start = i;
            while i < term_ids.len() && terms.get(term_ids[i]).is_stopword {
                i += 1;
            }
            let end = i; // exclusive
            // Boundaries are never stopwords (candidate validity guarantees
            // this), so a left and right neighbor always exist here.
            let left_neighbor = term_ids[start - 1];
            let right_neighbor = term_ids[end];
            let first_stop = term_ids[start];
            let last_stop = term_ids[end - 1];
            let run_len = end - start;
            penalty += run_penalty(left_neighbor, first_stop, last_stop, right_neighbor, terms, graph, run_len);
        } else {
            i += 1;
        }
    }
    penalty
}

/// Score every candidate in the table. Candidates whose constituent terms
/// are all stopwords are marked invalid and dropped from ranking, never
/// reported as an error.
///
/// `sum_h + 1 > 0` and the final `H` being finite and positive are
/// structural invariants, not conditions that can legitimately fail on
/// well-formed input — but since a failure here would otherwise surface as
/// a silently wrong ranking, both are checked unconditionally (not via
/// `debug_assert!`, which a release build strips) and reported as
/// `YakeError::InvariantViolation`.
pub fn score(table: &mut CandidateTable, terms: &TermTable, graph: &CooccurrenceGraph) -> Result<(), YakeError> {
    for cand in table.iter_mut() {
        let non_stopword_h: Vec<f64> = cand
            .term_ids
            .iter()
            .map(|&id| terms.get(id))
            .filter(|t| !t.is_stopword)
            .map(|t| t.h)
            .collect();

        if non_stopword_h.is_empty() {
            cand.valid = false;
            continue;
        }

        let prod_h: f64 = non_stopword_h.iter().product();
        let mut sum_h: f64 = non_stopword_h.iter().sum();
        sum_h += stopword_penalty(&cand.term_ids, terms, graph);

        if sum_h + 1.0 <= 0.0 {
            return Err(YakeError::InvariantViolation(format!(
                "aggregated stopword penalty left sum_h + 1 non-positive ({}) for candidate {:?}",
                sum_h + 1.0,
                cand.surface
            )));
        }

        cand.h = prod_h / ((sum_h + 1.0) * cand.tf as f64);
        if !(cand.h.is_finite() && cand.h > 0.0) {
            return Err(YakeError::InvariantViolation(format!(
                "non-finite or non-positive candidate H ({}) for candidate {:?}",
                cand.h, cand.surface
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::build as build_candidates;
    use crate::document::build as build_document;
    use crate::features;
    use crate::token::tokenize;
    use std::collections::HashSet;

    fn pipeline(text: &str, stopwords: &[&str], n: usize) -> CandidateTable {
        let sentences = tokenize(text);
        let stopwords: HashSet<String> = stopwords.iter().map(|s| s.to_string()).collect();
        let (mut terms, graph, stats) = build_document(&sentences, &stopwords, 1);
        features::compute(&mut terms, &graph, &stats).unwrap();
        let mut table = build_candidates(&sentences, &terms, n);
        score(&mut table, &terms, &graph).unwrap();
        table
    }

    #[test]
    fn every_valid_candidate_has_positive_score() {
        let table = pipeline(
            "In the context of the machine learning research that has been conducted, \
             the results of the study were published in the context of that research.",
            &["in", "the", "of", "that", "has", "been", "were"],
            6,
        );
        for c in table.iter().filter(|c| c.valid) {
            assert!(c.h > 0.0, "candidate {:?} has non-positive score {}", c.surface, c.h);
            assert!(c.h.is_finite());
        }
    }

    #[test]
    fn all_stopword_candidate_is_invalid() {
        // A single-stopword unigram: boundary check in candidate generation
        // already excludes it, so the table should simply be empty/small.
        let table = pipeline("- not yet", &["not", "yet"], 3);
        assert!(table.iter().all(|c| !c.valid || c.h > 0.0));
    }
}
