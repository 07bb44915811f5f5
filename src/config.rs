//! Construction configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigError;

/// Which pairwise string similarity function the dedup stage uses to decide
/// whether a candidate is orthographically too close to an already-emitted
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupFunction {
    /// Sequence-matcher / normalized Levenshtein ratio. Default.
    SeqMatcher,
    /// Jaro similarity.
    Jaro,
    /// Normalized Levenshtein ratio (the same metric as `SeqMatcher`, kept as
    /// a separate name for configuration compatibility).
    Levenshtein,
}

impl DedupFunction {
    fn as_str(&self) -> &'static str {
        match self {
            DedupFunction::SeqMatcher => "seqm",
            DedupFunction::Jaro => "jaro",
            DedupFunction::Levenshtein => "levs",
        }
    }

    fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "seqm" | "sequencematcher" => Ok(DedupFunction::SeqMatcher),
            "jaro" | "jaro_winkler" => Ok(DedupFunction::Jaro),
            "levs" => Ok(DedupFunction::Levenshtein),
            other => Err(ConfigError::UnknownDedupFunction(other.to_string())),
        }
    }
}

impl Default for DedupFunction {
    fn default() -> Self {
        DedupFunction::SeqMatcher
    }
}

impl std::fmt::Display for DedupFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extraction configuration.
///
/// `language` is carried as inert metadata: stopword loading and language
/// selection are a host concern; this crate never reads a file or picks a
/// stopword list on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,
    pub n: usize,
    pub top_k: usize,
    pub dedup_threshold: f64,
    pub dedup_function: DedupFunction,
    pub window_size: usize,
    /// Explicit stopword set, lowercased. If non-empty, always used; a host
    /// wanting language-specific stopwords populates this before
    /// construction (this crate never loads a list itself).
    pub stopwords: HashSet<String>,
    /// Bound on the optional similarity cache (0 disables caching).
    pub similarity_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            n: 3,
            top_k: 20,
            dedup_threshold: 0.9,
            dedup_function: DedupFunction::default(),
            window_size: 1,
            stopwords: HashSet::new(),
            similarity_cache_size: 2048,
        }
    }
}

impl Config {
    /// Validate the configuration, producing the `ConfigError` taxonomy.
    /// Called once, at extractor construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n < 1 {
            return Err(ConfigError::InvalidN(self.n));
        }
        if self.top_k < 1 {
            return Err(ConfigError::InvalidTopK(self.top_k));
        }
        if !(0.0..=1.0).contains(&self.dedup_threshold) {
            return Err(ConfigError::InvalidDedupThreshold(self.dedup_threshold));
        }
        if self.window_size < 1 {
            return Err(ConfigError::InvalidWindowSize(self.window_size));
        }
        Ok(())
    }

    /// Set the dedup function from its string name (`"seqm"`, `"jaro"`, `"levs"`).
    pub fn set_dedup_function_str(&mut self, name: &str) -> Result<(), ConfigError> {
        self.dedup_function = DedupFunction::parse(name)?;
        Ok(())
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let c = Config::default();
        assert_eq!(c.language, "en");
        assert_eq!(c.n, 3);
        assert_eq!(c.top_k, 20);
        assert_eq!(c.dedup_threshold, 0.9);
        assert_eq!(c.dedup_function, DedupFunction::SeqMatcher);
        assert_eq!(c.window_size, 1);
    }

    #[test]
    fn rejects_invalid_n() {
        let mut c = Config::default();
        c.n = 0;
        assert_eq!(c.validate(), Err(ConfigError::InvalidN(0)));
    }

    #[test]
    fn rejects_invalid_top_k() {
        let mut c = Config::default();
        c.top_k = 0;
        assert_eq!(c.validate(), Err(ConfigError::InvalidTopK(0)));
    }

    #[test]
    fn rejects_out_of_range_dedup_threshold() {
        let mut c = Config::default();
        c.dedup_threshold = 1.5;
        assert!(c.validate().is_err());
        c.dedup_threshold = -0.1;
        assert!(c.validate().is_err());
    }

    #[test]
    fn parses_dedup_function_names() {
        assert_eq!(DedupFunction::parse("seqm").unwrap(), DedupFunction::SeqMatcher);
        assert_eq!(DedupFunction::parse("jaro").unwrap(), DedupFunction::Jaro);
        assert_eq!(DedupFunction::parse("levs").unwrap(), DedupFunction::Levenshtein);
        assert!(DedupFunction::parse("bogus").is_err());
    }

    #[test]
    fn toml_round_trip() {
        let c = Config::default();
        let s = c.to_toml_string().unwrap();
        let back = Config::from_toml_str(&s).unwrap();
        assert_eq!(back.n, c.n);
        assert_eq!(back.dedup_function, c.dedup_function);
    }
}
