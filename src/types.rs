//! Core data structures for prset.
//!
//! This module contains the chromosome ranking table and the interval types
//! shared by the loaders, the catalog and the scanner.

use ahash::AHashMap;
use std::fmt;

/// Chromosome rank: a dense integer standing in for a chromosome label.
pub type ChromRank = u32;

/// Mapping from chromosome label to a dense, comparable rank.
///
/// The table is built once and only queried afterwards.
#[derive(Debug, Clone, Default)]
pub struct ChromosomeOrder {
    ranks: AHashMap<String, ChromRank>,
    len: usize,
}

impl ChromosomeOrder {
    /// Build an order from labels listed in rank order.
    ///
    /// A label that appears twice keeps its first rank.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut order = ChromosomeOrder::default();
        for label in labels {
            let label = label.into();
            if !order.ranks.contains_key(&label) {
                order.ranks.insert(label, order.len as ChromRank);
                order.len += 1;
            }
        }
        order
    }

    /// Default human ordering: 1-22, X, Y, XY, MT.
    ///
    /// Every label is accepted both bare and with a `chr` prefix, and both
    /// spellings share one rank.
    pub fn human() -> Self {
        let mut labels: Vec<String> = (1..=22).map(|i| i.to_string()).collect();
        labels.extend(["X", "Y", "XY", "MT"].iter().map(|s| s.to_string()));

        let mut order = ChromosomeOrder::default();
        for label in labels {
            let rank = order.len as ChromRank;
            order.ranks.insert(format!("chr{}", label), rank);
            order.ranks.insert(label, rank);
            order.len += 1;
        }
        order
    }

    /// Look up the rank of a chromosome label.
    pub fn rank(&self, label: &str) -> Option<ChromRank> {
        self.ranks.get(label).copied()
    }

    /// Number of distinct ranks.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A genomic interval, 1-based and inclusive on both ends.
///
/// `start <= end` is not enforced here; malformed input is rejected by the
/// loaders before intervals are built.
///
/// The derived ordering compares rank, then start, then end. This is the
/// order every [`RegionSet`] is sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenomicInterval {
    pub chrom: ChromRank,
    pub start: u64,
    pub end: u64,
}

impl GenomicInterval {
    pub fn new(chrom: ChromRank, start: u64, end: u64) -> Self {
        GenomicInterval { chrom, start, end }
    }

    /// True if `pos` lies inside the interval (both bounds inclusive).
    #[inline]
    pub fn contains(&self, pos: u64) -> bool {
        self.start <= pos && pos <= self.end
    }
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// Merged span of every annotation record sharing one gene identifier.
pub type GeneBoundary = GenomicInterval;

/// A named, sorted list of intervals.
///
/// Intervals are neither merged nor deduplicated; overlaps are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSet {
    pub name: String,
    pub intervals: Vec<GenomicInterval>,
}

impl RegionSet {
    /// Create a set, sorting the intervals by (rank, start, end).
    pub fn new(name: impl Into<String>, mut intervals: Vec<GenomicInterval>) -> Self {
        intervals.sort_unstable();
        RegionSet {
            name: name.into(),
            intervals,
        }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}
