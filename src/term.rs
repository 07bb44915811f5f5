//! One entry per distinct lowercased surface form.

use ahash::AHashMap;
use std::collections::BTreeSet;

/// Statistics aggregated over every occurrence of one lowercased surface.
#[derive(Debug, Clone)]
pub struct Term {
    pub id: u32,
    pub surface_lower: String,
    pub tf: u32,
    pub tf_a: u32,
    pub tf_n: u32,
    /// Sentence indices this term appears in, kept sorted for the median
    /// computation the positional-bias feature needs.
    pub sentence_ids: BTreeSet<u32>,
    pub is_stopword: bool,
    /// Composite importance score, filled by `features::compute` after the
    /// term table and graph are built. Stopwords keep `h = 0.0` by
    /// convention.
    pub h: f64,
}

impl Term {
    fn new(id: u32, surface_lower: String, is_stopword: bool) -> Self {
        Self {
            id,
            surface_lower,
            tf: 0,
            tf_a: 0,
            tf_n: 0,
            sentence_ids: BTreeSet::new(),
            is_stopword,
            h: 0.0,
        }
    }

    /// Median of `sentence_ids`. Panics on an empty set — callers only
    /// invoke this once `tf >= 1` has been established.
    pub fn median_sentence_id(&self) -> f64 {
        let ids: Vec<u32> = self.sentence_ids.iter().copied().collect();
        let n = ids.len();
        if n % 2 == 1 {
            ids[n / 2] as f64
        } else {
            (ids[n / 2 - 1] as f64 + ids[n / 2] as f64) / 2.0
        }
    }
}

/// Dense, append-only table of terms, keyed by lowercased surface.
#[derive(Debug, Default)]
pub struct TermTable {
    terms: Vec<Term>,
    index: AHashMap<String, u32>,
}

impl TermTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a term id by surface, creating a fresh entry (with the next
    /// dense id, assigned monotonically) the first time it is seen.
    /// `is_stopword` is only used on creation — it is never recomputed for
    /// an existing term.
    pub fn get_or_create(&mut self, surface_lower: &str, is_stopword: bool) -> u32 {
        if let Some(&id) = self.index.get(surface_lower) {
            return id;
        }
        let id = self.terms.len() as u32;
        self.terms.push(Term::new(id, surface_lower.to_string(), is_stopword));
        self.index.insert(surface_lower.to_string(), id);
        id
    }

    pub fn lookup(&self, surface_lower: &str) -> Option<u32> {
        self.index.get(surface_lower).copied()
    }

    pub fn get(&self, id: u32) -> &Term {
        &self.terms[id as usize]
    }

    pub fn get_mut(&mut self, id: u32) -> &mut Term {
        &mut self.terms[id as usize]
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }
}
