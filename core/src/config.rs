//! Tunables for building and querying a collection.
//!
//! Every field has a default, so a config file only needs the values it changes:
//!
//! ```json
//! { "build": { "min_freq": 3 }, "bm25": { "k1": 1.5 } }
//! ```

use crate::error::CollectionError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MIN_FREQ: u64 = 5;
pub const DEFAULT_MAX_TERM_LEN: usize = 30;
pub const DEFAULT_DOC_MARKER: &str = ".pdf";

/// BM25 term frequency saturation.
pub const DEFAULT_K1: f64 = 1.2;
/// BM25 length normalization. 0.0 disables it, 1.0 normalizes fully.
pub const DEFAULT_B: f64 = 0.75;
pub const DEFAULT_TOP_K: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Terms seen fewer times than this across the corpus are dropped.
    pub min_freq: u64,
    /// Exclusive upper bound on term length, in characters.
    pub max_term_len: usize,
    /// Substring a file name must contain to be scanned.
    pub doc_marker: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            min_freq: DEFAULT_MIN_FREQ,
            max_term_len: DEFAULT_MAX_TERM_LEN,
            doc_marker: DEFAULT_DOC_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
    /// Maximum number of ranked documents reported.
    pub top_k: usize,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: DEFAULT_K1, b: DEFAULT_B, top_k: DEFAULT_TOP_K }
    }
}

impl Bm25Params {
    pub fn validate(&self) -> Result<(), CollectionError> {
        if !self.k1.is_finite() || self.k1 <= 0.0 {
            return Err(CollectionError::InvalidParameter(format!("k1 must be a positive real, got {}", self.k1)));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(CollectionError::InvalidParameter(format!("b must lie in [0, 1], got {}", self.b)));
        }
        if self.top_k == 0 {
            return Err(CollectionError::InvalidParameter("top_k must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub build: BuildConfig,
    pub bm25: Bm25Params,
}

impl Config {
    /// Reads a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CollectionError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&contents)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "loaded configuration");
        Ok(config)
    }
}
