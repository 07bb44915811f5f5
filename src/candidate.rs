//! N-gram candidate enumeration and the candidate table.

use crate::term::TermTable;
use crate::token::{Tag, Token};
use ahash::AHashMap;

/// A contiguous 1..N token candidate keyphrase.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// First-seen casing, tokens joined by a single space.
    pub surface: String,
    /// Whitespace-normalized lowercase dedup key.
    pub surface_lower: String,
    /// Ordered references into the term table, one per token.
    pub term_ids: Vec<u32>,
    pub tf: u32,
    pub h: f64,
    pub valid: bool,
}

/// One entry per distinct lowercased phrase, insertion-ordered (ties in the
/// final ranking break on this order).
#[derive(Debug, Default)]
pub struct CandidateTable {
    candidates: Vec<Candidate>,
    index: AHashMap<String, usize>,
}

impl CandidateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Candidate> {
        self.candidates.iter_mut()
    }

    fn insert_occurrence(&mut self, surface: String, surface_lower: String, term_ids: Vec<u32>) {
        if let Some(&idx) = self.index.get(&surface_lower) {
            self.candidates[idx].tf += 1;
        } else {
            let idx = self.candidates.len();
            self.candidates.push(Candidate {
                surface,
                surface_lower: surface_lower.clone(),
                term_ids,
                tf: 1,
                h: 0.0,
                valid: true,
            });
            self.index.insert(surface_lower, idx);
        }
    }
}

/// A span `[i, i+L)` is valid iff: the first and last tokens are neither `u`
/// nor `d`; the first and last terms are not stopwords; and no token in the
/// span is tagged `u`. Interior stopwords are allowed.
fn is_valid_span(tokens: &[Token], terms: &TermTable) -> bool {
    let first = &tokens[0];
    let last = tokens.last().unwrap();

    if matches!(first.tag, Tag::Unusable | Tag::Digit) {
        return false;
    }
    if matches!(last.tag, Tag::Unusable | Tag::Digit) {
        return false;
    }
    if tokens.iter().any(|t| matches!(t.tag, Tag::Unusable)) {
        return false;
    }

    let first_lower = first.surface.to_lowercase();
    let last_lower = last.surface.to_lowercase();
    let first_stop = terms.lookup(&first_lower).map(|id| terms.get(id).is_stopword).unwrap_or(true);
    let last_stop = terms.lookup(&last_lower).map(|id| terms.get(id).is_stopword).unwrap_or(true);
    if first_stop || last_stop {
        return false;
    }

    true
}

/// Enumerate every valid 1..=n n-gram across every sentence and build the
/// candidate table. `terms` must already be fully populated by
/// `document::build` — this stage only reads from it.
pub fn build(sentences: &[Vec<Token>], terms: &TermTable, n: usize) -> CandidateTable {
    let mut table = CandidateTable::new();

    for sentence in sentences {
        for start in 0..sentence.len() {
            let max_len = n.min(sentence.len() - start);
            for len in 1..=max_len {
                let span = &sentence[start..start + len];
                if !is_valid_span(span, terms) {
                    continue;
                }

                let surface = span
                    .iter()
                    .map(|t| t.surface.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let surface_lower = span
                    .iter()
                    .map(|t| t.surface.to_lowercase())
                    .collect::<Vec<_>>()
                    .join(" ");
                let term_ids = span
                    .iter()
                    .map(|t| {
                        terms
                            .lookup(&t.surface.to_lowercase())
                            .expect("term must exist: populated by document::build")
                    })
                    .collect();

                table.insert_occurrence(surface, surface_lower, term_ids);
            }
        }
    }

    table
}
