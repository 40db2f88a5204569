//! Region catalog: the ordered collection of every named region set.
//!
//! The catalog has two phases. While loading, [`RegionCatalog`] accepts new
//! sets and rejects duplicate names. [`RegionCatalog::freeze`] consumes it and
//! returns a [`FrozenCatalog`], which can no longer grow and hands out
//! [`MembershipScanner`]s sized to the final set count.

use ahash::RandomState;
use indexmap::IndexMap;
use log::{error, info, warn};

use crate::config::{Config, BASE_SET_NAME};
use crate::error::{RegionError, Result};
use crate::parser::{load_bed_sets, load_msigdb_sets, GeneIndex};
use crate::scanner::{Membership, MembershipScanner};
use crate::types::{ChromosomeOrder, GenomicInterval, RegionSet};

/// Catalog in its loading phase.
///
/// Index 0 is always the Base set, which matches every position.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    sets: IndexMap<String, Vec<GenomicInterval>, RandomState>,
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionCatalog {
    /// Create a catalog holding only the Base set.
    pub fn new() -> Self {
        let mut sets = IndexMap::with_hasher(RandomState::new());
        sets.insert(BASE_SET_NAME.to_string(), Vec::new());
        RegionCatalog { sets }
    }

    /// Register a set, returning its index.
    ///
    /// A name already in use is rejected and the catalog is left unchanged.
    pub fn add(&mut self, set: RegionSet) -> Result<usize> {
        if self.sets.contains_key(&set.name) {
            return Err(RegionError::DuplicateName(set.name));
        }
        let (index, _) = self.sets.insert_full(set.name, set.intervals);
        Ok(index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// Look up a set by name.
    pub fn get(&self, name: &str) -> Option<RegionSet> {
        self.sets.get(name).map(|intervals| RegionSet {
            name: name.to_string(),
            intervals: intervals.clone(),
        })
    }

    /// Number of sets, Base included.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Always false: Base is present from construction.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// End the loading phase.
    pub fn freeze(self) -> FrozenCatalog {
        FrozenCatalog {
            sets: self
                .sets
                .into_iter()
                .map(|(name, intervals)| RegionSet { name, intervals })
                .collect(),
        }
    }
}

/// Catalog after loading; read-only.
#[derive(Debug, Clone)]
pub struct FrozenCatalog {
    sets: Vec<RegionSet>,
}

impl FrozenCatalog {
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn sets(&self) -> &[RegionSet] {
        &self.sets
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|s| s.name.as_str())
    }

    /// A cleared membership vector sized to the catalog.
    pub fn empty_membership(&self) -> Membership {
        Membership::repeat(false, self.sets.len())
    }

    /// Create a scanner with its own cursors and counters, all at zero.
    pub fn scanner<'a>(&'a self, order: &'a ChromosomeOrder) -> MembershipScanner<'a> {
        MembershipScanner::new(self, order)
    }
}

/// Build the catalog from every configured source.
///
/// BED files are read first, then the GTF, then the gene set file. A GTF that
/// fails to load for any reason leaves the gene index empty, so no gene sets
/// are built; BED sets already loaded are kept.
pub fn build_catalog(config: &Config, order: &ChromosomeOrder) -> RegionCatalog {
    let mut catalog = RegionCatalog::new();
    load_bed_sets(&config.bed, order, &mut catalog);

    match &config.gtf {
        Some(gtf) => {
            info!("Processing the GTF file");
            let genes = GeneIndex::load(gtf, order, config).unwrap_or_else(|e| {
                error!("Cannot process GTF file: {}", e);
                error!("Will not process any of the msigdb items");
                GeneIndex::default()
            });
            info!("A total of {} genes found in the GTF file", genes.len());

            if let Some(msigdb) = &config.msigdb {
                load_msigdb_sets(msigdb, &genes, &mut catalog);
            }
        }
        None => {
            if let Some(msigdb) = &config.msigdb {
                warn!(
                    "No GTF file provided, gene sets in {} will be ignored",
                    msigdb.display()
                );
            }
        }
    }

    catalog
}
