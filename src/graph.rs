//! Directed weighted co-occurrence graph over term ids.
//!
//! Terms own nothing in the graph and the graph owns no terms: it is
//! modeled as dense arrays of `(u32, u32, u32)` triples indexed by term id
//! rather than a pointer/reference graph — there are no ownership cycles to
//! reason about.

use ahash::AHashMap;

/// Accumulates co-occurrence counts during the single-pass build, then
/// finalizes into a compact, dense `CooccurrenceGraph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    counts: AHashMap<(u32, u32), u32>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `dst` following `src` within the window.
    pub fn add_edge(&mut self, src: u32, dst: u32) {
        *self.counts.entry((src, dst)).or_insert(0) += 1;
    }

    pub fn finish(self, n_terms: usize) -> CooccurrenceGraph {
        let mut out_edges: Vec<(u32, u32, u32)> = self
            .counts
            .iter()
            .map(|(&(src, dst), &w)| (src, dst, w))
            .collect();
        let mut in_edges = out_edges.clone();

        out_edges.sort_unstable_by_key(|&(src, dst, _)| (src, dst));
        in_edges.sort_unstable_by_key(|&(src, dst, _)| (dst, src));

        let out_offsets = build_offsets(&out_edges, n_terms, |&(src, _, _)| src);
        let in_offsets = build_offsets(&in_edges, n_terms, |&(_, dst, _)| dst);

        CooccurrenceGraph {
            out_edges,
            out_offsets,
            in_edges,
            in_offsets,
        }
    }
}

fn build_offsets(
    edges: &[(u32, u32, u32)],
    n_terms: usize,
    key: impl Fn(&(u32, u32, u32)) -> u32,
) -> Vec<usize> {
    let mut offsets = vec![0usize; n_terms + 1];
    for edge in edges {
        offsets[key(edge) as usize + 1] += 1;
    }
    for i in 1..offsets.len() {
        offsets[i] += offsets[i - 1];
    }
    offsets
}

/// A compact, read-only view over the co-occurrence graph once the single
/// build pass has finished.
#[derive(Debug, Clone)]
pub struct CooccurrenceGraph {
    /// Sorted by `(src, dst)`.
    out_edges: Vec<(u32, u32, u32)>,
    out_offsets: Vec<usize>,
    /// Sorted by `(dst, src)`.
    in_edges: Vec<(u32, u32, u32)>,
    in_offsets: Vec<usize>,
}

impl CooccurrenceGraph {
    /// Outgoing edges `(dst, weight)` for `src` — i.e. `src`'s right
    /// neighbors, the terms that follow it.
    pub fn right_neighbors(&self, src: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        let (start, end) = self.out_range(src);
        self.out_edges[start..end].iter().map(|&(_, dst, w)| (dst, w))
    }

    /// Incoming edges `(src, weight)` for `dst` — i.e. `dst`'s left
    /// neighbors, the terms that precede it.
    pub fn left_neighbors(&self, dst: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        let (start, end) = self.in_range(dst);
        self.in_edges[start..end].iter().map(|&(src, _, w)| (src, w))
    }

    /// Weight of the edge `src -> dst`, or 0 if absent.
    pub fn edge_weight(&self, src: u32, dst: u32) -> u32 {
        let (start, end) = self.out_range(src);
        self.out_edges[start..end]
            .binary_search_by_key(&dst, |&(_, d, _)| d)
            .map(|idx| self.out_edges[start + idx].2)
            .unwrap_or(0)
    }

    fn out_range(&self, src: u32) -> (usize, usize) {
        let i = src as usize;
        (self.out_offsets[i], self.out_offsets[i + 1])
    }

    fn in_range(&self, dst: u32) -> (usize, usize) {
        let i = dst as usize;
        (self.in_offsets[i], self.in_offsets[i + 1])
    }
}
