//! Configuration and defaults for prset.
//!
//! This module contains the configuration structure that selects the region
//! inputs and controls how the annotation file is filtered.

use std::path::PathBuf;

/// Default GTF feature tags kept when building gene boundaries.
pub const DEFAULT_FEATURES: [&str; 4] = ["exon", "gene", "protein_coding", "CDS"];

/// Name of the implicit set every SNP belongs to.
pub const BASE_SET_NAME: &str = "Base";

/// Configuration for building the region catalog.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interval (BED) files, one region set each.
    pub bed: Vec<PathBuf>,
    /// Gene annotation file (GTF, optionally gzipped).
    pub gtf: Option<PathBuf>,
    /// Gene set file (MSigDB style).
    pub msigdb: Option<PathBuf>,
    /// Accepted GTF feature types.
    pub features: Vec<String>,
    /// Worker threads for scanning (0 = all cores, 1 = sequential).
    pub threads: usize,
    /// Number of positions read per chunk.
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bed: Vec::new(),
            gtf: None,
            msigdb: None,
            features: DEFAULT_FEATURES.iter().map(|s| s.to_string()).collect(),
            threads: 1,
            batch_size: 10000,
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list of feature tags.
    ///
    /// Returns false (leaving the current list untouched) if the list is
    /// empty or a tag is empty or contains whitespace.
    pub fn parse_features(&mut self, features_str: &str) -> bool {
        let mut new_features: Vec<String> = Vec::new();

        for tag in features_str.split(',') {
            if tag.is_empty() || tag.chars().any(char::is_whitespace) {
                return false;
            }
            if !new_features.iter().any(|f| f == tag) {
                new_features.push(tag.to_string());
            }
        }

        if new_features.is_empty() {
            return false;
        }
        self.features = new_features;
        true
    }

    /// True if `feature` is one of the accepted GTF feature types.
    pub fn accepts_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}
