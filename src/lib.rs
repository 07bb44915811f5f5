//! YAKE: unsupervised, single-document keyword extraction.
//!
//! Given one text and a language-specific stopword set, returns the top-K
//! most representative keyphrases (1 to N tokens) ranked by an importance
//! score where **lower is better**. Purely statistical: no corpus, no
//! training, no external knowledge, no cross-document statistics.
//!
//! Public API:
//! - [`YakeExtractor`] — constructed from a [`Config`], runs [`extract`](YakeExtractor::extract)
//! - [`Config`] — construction-time parameters (sensible defaults apply via `Default`)
//! - [`YakeError`] — construction-time error taxonomy

pub mod candidate;
pub mod config;
pub mod dedup;
pub mod document;
pub mod error;
pub mod features;
pub mod graph;
pub mod scoring;
pub mod similarity;
pub mod term;
pub mod token;

pub use config::{Config, DedupFunction};
pub use error::{ConfigError, YakeError};

use dedup::SimilarityCache;

/// A single extraction engine, bound to one configuration. The core
/// extraction is single-threaded and synchronous: one call to `extract`
/// is a pure function of `(text, config, stopwords)` modulo the optional
/// similarity cache, which never changes the result.
pub struct YakeExtractor {
    config: Config,
    similarity_cache: Option<SimilarityCache>,
}

impl YakeExtractor {
    /// Construct an extractor, validating the configuration. The extractor
    /// is not created on invalid config.
    pub fn new(config: Config) -> Result<Self, YakeError> {
        config.validate()?;
        let similarity_cache = SimilarityCache::new(config.similarity_cache_size);
        Ok(Self {
            config,
            similarity_cache,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Drop every memoized similarity comparison. Purely a compute
    /// shortcut — never changes what `extract` returns.
    pub fn clear_caches(&self) {
        if let Some(cache) = &self.similarity_cache {
            cache.clear();
        }
    }

    /// Run the full extraction pipeline over `text`.
    ///
    /// Empty or whitespace-only input, or input with no valid candidate,
    /// yields an empty result — this is not an error.
    ///
    /// Returns `Err(YakeError::InvariantViolation(_))` only if a structural
    /// invariant is violated — contractually unreachable on well-formed
    /// input, but surfaced rather than silently producing a `NaN`/`Inf`
    /// score: such a failure aborts the extraction with a diagnostic rather
    /// than returning a corrupted ranking.
    pub fn extract(&self, text: &str) -> Result<Vec<(String, f64)>, YakeError> {
        let span = tracing::debug_span!("extract");
        let _enter = span.enter();

        let sentences = token::tokenize(text);
        if sentences.is_empty() {
            tracing::debug!("empty or whitespace-only input");
            return Ok(Vec::new());
        }

        let (mut terms, graph, stats) =
            document::build(&sentences, &self.config.stopwords, self.config.window_size);
        tracing::debug!(n_terms = terms.len(), n_sentences = stats.n_sentences_doc, "built term table and graph");

        features::compute(&mut terms, &graph, &stats).inspect_err(|err| {
            tracing::error!(%err, "invariant violation computing term features");
        })?;

        let mut candidates = candidate::build(&sentences, &terms, self.config.n);
        tracing::debug!(n_candidates = candidates.len(), "enumerated candidates");

        scoring::score(&mut candidates, &terms, &graph).inspect_err(|err| {
            tracing::error!(%err, "invariant violation scoring candidates");
        })?;

        let mut valid: Vec<&candidate::Candidate> = candidates.iter().filter(|c| c.valid).collect();
        // Sort by H ascending; Rust's sort is stable, so ties break on the
        // insertion order already recorded by the candidate table.
        // `scoring::score` has already guaranteed every live H is finite, so
        // this total_cmp never needs a fallback arm.
        valid.sort_by(|a, b| a.h.total_cmp(&b.h));

        let emitted = dedup::dedup(
            valid.into_iter(),
            self.config.dedup_threshold,
            self.config.dedup_function,
            self.config.top_k,
            self.similarity_cache.as_ref(),
        );

        tracing::debug!(n_emitted = emitted.len(), "dedup complete");

        Ok(emitted.into_iter().map(|c| (c.surface.clone(), c.h)).collect())
    }
}
