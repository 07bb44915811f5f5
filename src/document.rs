//! The single pass that builds the term table and co-occurrence graph
//! together.

use crate::graph::{CooccurrenceGraph, GraphBuilder};
use crate::term::TermTable;
use crate::token::Token;
use std::collections::HashSet;

/// Document-wide statistics precomputed once the single pass finishes,
/// needed by the per-term feature formulas.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentStats {
    pub max_tf_doc: u32,
    pub avg_tf_doc: f64,
    pub std_tf_doc: f64,
    pub n_sentences_doc: usize,
}

fn is_stopword(surface_lower: &str, tag: crate::token::Tag, stopwords: &HashSet<String>) -> bool {
    matches!(tag, crate::token::Tag::Unusable | crate::token::Tag::Digit)
        || surface_lower.chars().count() <= 2
        || stopwords.contains(surface_lower)
}

/// Walk tokens in document order, populating a fresh term table and
/// co-occurrence graph in one pass, then derive the document statistics
/// feature computation needs.
pub fn build(
    sentences: &[Vec<Token>],
    stopwords: &HashSet<String>,
    window_size: usize,
) -> (TermTable, CooccurrenceGraph, DocumentStats) {
    let mut terms = TermTable::new();
    let mut graph = GraphBuilder::new();

    for sentence in sentences {
        // Sliding window of the most recent eligible (non-u, non-d) term
        // ids in this sentence, used to form edges at distance <= window_size.
        let mut recent: std::collections::VecDeque<u32> = std::collections::VecDeque::new();

        for token in sentence {
            let surface_lower = token.surface.to_lowercase();
            let stop = is_stopword(&surface_lower, token.tag, stopwords);
            let id = terms.get_or_create(&surface_lower, stop);

            let term = terms.get_mut(id);
            term.tf += 1;
            match token.tag {
                crate::token::Tag::Acronym => term.tf_a += 1,
                crate::token::Tag::ProperNoun => term.tf_n += 1,
                _ => {}
            }
            term.sentence_ids.insert(token.sentence_index as u32);

            if token.tag.is_window_eligible() {
                for &prev_id in recent.iter() {
                    graph.add_edge(prev_id, id);
                }
                recent.push_back(id);
                if recent.len() > window_size {
                    recent.pop_front();
                }
            }
        }
    }

    let n_terms = terms.len();
    let graph = graph.finish(n_terms);

    let eligible_tf: Vec<f64> = terms
        .iter()
        .filter(|t| !t.is_stopword)
        .map(|t| t.tf as f64)
        .collect();

    let max_tf_doc = terms
        .iter()
        .filter(|t| !t.is_stopword)
        .map(|t| t.tf)
        .max()
        .unwrap_or(0);

    let avg_tf_doc = if eligible_tf.is_empty() {
        0.0
    } else {
        eligible_tf.iter().sum::<f64>() / eligible_tf.len() as f64
    };

    let std_tf_doc = if eligible_tf.is_empty() {
        0.0
    } else {
        let variance = eligible_tf
            .iter()
            .map(|&tf| (tf - avg_tf_doc).powi(2))
            .sum::<f64>()
            / eligible_tf.len() as f64;
        variance.sqrt()
    };

    let n_sentences_doc = sentences.len();

    let stats = DocumentStats {
        max_tf_doc,
        avg_tf_doc,
        std_tf_doc,
        n_sentences_doc,
    };

    (terms, graph, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    #[test]
    fn single_pass_populates_term_table_and_graph() {
        let sentences = tokenize("the cat sat on the mat");
        let stopwords: HashSet<String> = ["the", "on"].iter().map(|s| s.to_string()).collect();
        let (terms, graph, stats) = build(&sentences, &stopwords, 1);

        let cat_id = terms.lookup("cat").unwrap();
        let sat_id = terms.lookup("sat").unwrap();
        assert_eq!(terms.get(cat_id).tf, 1);
        assert!(!terms.get(cat_id).is_stopword);
        assert!(terms.get(terms.lookup("the").unwrap()).is_stopword);

        // "cat" precedes "sat" with window_size=1.
        assert_eq!(graph.edge_weight(cat_id, sat_id), 1);
        assert_eq!(stats.n_sentences_doc, 1);
    }

    #[test]
    fn stopword_by_short_length() {
        let sentences = tokenize("an ox runs");
        let stopwords = HashSet::new();
        let (terms, _graph, _stats) = build(&sentences, &stopwords, 1);
        // "an" and "ox" are length <= 2.
        assert!(terms.get(terms.lookup("an").unwrap()).is_stopword);
        assert!(terms.get(terms.lookup("ox").unwrap()).is_stopword);
        assert!(!terms.get(terms.lookup("runs").unwrap()).is_stopword);
    }

    #[test]
    fn punctuation_and_digits_do_not_form_edges() {
        let sentences = tokenize("word1 42 word2");
        let stopwords = HashSet::new();
        let (terms, graph, _stats) = build(&sentences, &stopwords, 1);
        let w1 = terms.lookup("word1").unwrap();
        let w2 = terms.lookup("word2").unwrap();
        // "42" is not window-eligible, so word1 -> word2 still links despite
        // the intervening digit token (digits don't consume window space).
        assert_eq!(graph.edge_weight(w1, w2), 1);
    }

    #[test]
    fn window_size_reaches_across_multiple_eligible_tokens() {
        let sentences = tokenize("alpha beta gamma delta");
        let stopwords = HashSet::new();
        let (terms, graph, _stats) = build(&sentences, &stopwords, 2);
        let alpha = terms.lookup("alpha").unwrap();
        let gamma = terms.lookup("gamma").unwrap();
        let delta = terms.lookup("delta").unwrap();
        // window_size=2: alpha is within distance 2 of gamma.
        assert_eq!(graph.edge_weight(alpha, gamma), 1);
        // alpha is distance 3 from delta: no edge.
        assert_eq!(graph.edge_weight(alpha, delta), 0);
    }
}
