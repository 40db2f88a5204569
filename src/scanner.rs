//! Single-pass membership classification of sorted SNP positions.
//!
//! Every region set keeps a cursor into its sorted interval list. Because the
//! queries arrive sorted, a cursor only ever moves forward, so classifying N
//! positions against a set of M intervals costs O(N + M).
//!
//! # Ordering precondition
//!
//! Queries must be presented in non-decreasing (chromosome rank, position)
//! order. This is not checked. Cursors never rewind, so an out-of-order query
//! can miss an interval that was already passed.

use bitvec::prelude::*;
use std::cmp::Ordering;

use crate::catalog::FrozenCatalog;
use crate::types::{ChromRank, ChromosomeOrder};

/// Per-query membership flags. Bit `i` is set iff the query fell in set `i`;
/// bit 0 (Base) is always set.
pub type Membership = BitVec<u64, Lsb0>;

/// Sweep-line classifier over a frozen catalog.
///
/// Not meant to be shared between threads; sharded scans should use one
/// scanner per shard and combine them with [`MembershipScanner::merge_counts`].
pub struct MembershipScanner<'a> {
    catalog: &'a FrozenCatalog,
    order: &'a ChromosomeOrder,
    cursors: Vec<usize>,
    counts: Vec<u64>,
}

impl<'a> MembershipScanner<'a> {
    pub fn new(catalog: &'a FrozenCatalog, order: &'a ChromosomeOrder) -> Self {
        MembershipScanner {
            catalog,
            order,
            cursors: vec![0; catalog.len()],
            counts: vec![0; catalog.len()],
        }
    }

    /// Classify one position, returning a fresh membership vector.
    pub fn classify(&mut self, chrom: &str, pos: u64) -> Membership {
        let mut flags = self.catalog.empty_membership();
        self.classify_into(chrom, pos, &mut flags);
        flags
    }

    /// Classify one position into a caller-owned membership vector.
    ///
    /// `flags` must be sized to the catalog; it is cleared first.
    pub fn classify_into(&mut self, chrom: &str, pos: u64, flags: &mut BitSlice<u64, Lsb0>) {
        let rank = self.order.rank(chrom);
        self.classify_rank(rank, pos, flags);
    }

    /// Classify a position whose chromosome is already ranked.
    ///
    /// `None` stands for a chromosome unknown to the order: only Base matches
    /// and no cursor moves.
    pub fn classify_rank(
        &mut self,
        rank: Option<ChromRank>,
        pos: u64,
        flags: &mut BitSlice<u64, Lsb0>,
    ) {
        flags.fill(false);
        flags.set(0, true);
        self.counts[0] += 1;

        let rank = match rank {
            Some(r) => r,
            None => return,
        };

        let catalog = self.catalog;
        for (i, set) in catalog.sets().iter().enumerate().skip(1) {
            let intervals = &set.intervals;
            let cursor = &mut self.cursors[i];

            while let Some(bound) = intervals.get(*cursor) {
                match bound.chrom.cmp(&rank) {
                    Ordering::Less => *cursor += 1,
                    Ordering::Greater => break,
                    Ordering::Equal => {
                        if bound.contains(pos) {
                            // the same interval may cover the next query too
                            flags.set(i, true);
                            self.counts[i] += 1;
                            break;
                        } else if bound.start > pos {
                            break;
                        } else {
                            *cursor += 1;
                        }
                    }
                }
            }
        }
    }

    /// Hit count per set, in catalog order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Current cursor per set. Index 0 (Base) never moves.
    pub fn cursors(&self) -> &[usize] {
        &self.cursors
    }

    /// `(set name, hit count)` pairs in catalog order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.catalog.names().zip(self.counts.iter().copied())
    }

    /// Add another scanner's counts into this one.
    ///
    /// Both scanners must come from the same catalog.
    pub fn merge_counts(&mut self, other: &MembershipScanner<'_>) {
        debug_assert_eq!(self.counts.len(), other.counts.len());
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += *theirs;
        }
    }
}
