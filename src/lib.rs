//! prset - Genomic region sets for SNP annotation.
//!
//! This library builds named region sets from BED files, a GTF annotation and
//! an MSigDB-style gene set file, then classifies a sorted stream of SNP
//! positions against every set in a single pass.
//!
//! # Features
//!
//! - Load BED files (with gzip support), one region set per file
//! - Merge GTF records into per-gene boundaries and resolve gene names
//! - Build gene sets from gene identifiers or gene names
//! - Classify sorted positions with one forward-only cursor per set
//! - Report the number of SNPs falling in each set
//!
//! # Example
//!
//! ```ignore
//! use prset::{build_catalog, ChromosomeOrder, Config};
//! use prset::output::write_report_file;
//! use std::path::Path;
//!
//! let mut config = Config::default();
//! config.bed.push("enhancers.bed".into());
//! config.gtf = Some("genes.gtf.gz".into());
//! config.msigdb = Some("pathways.gmt".into());
//!
//! let order = ChromosomeOrder::human();
//! let catalog = build_catalog(&config, &order).freeze();
//! let mut scanner = catalog.scanner(&order);
//! for (chrom, pos) in [("1", 1_000_000), ("1", 1_000_500), ("2", 42)] {
//!     let membership = scanner.classify(chrom, pos);
//!     // Hand membership to downstream scoring...
//! }
//! write_report_file(Path::new("out.region"), &scanner)?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod scanner;
pub mod types;

pub use catalog::{build_catalog, FrozenCatalog, RegionCatalog};
pub use config::Config;
pub use error::RegionError;
pub use parser::{GeneIndex, SnpPosition, SnpReader};
pub use scanner::{Membership, MembershipScanner};
pub use types::{ChromosomeOrder, GeneBoundary, GenomicInterval, RegionSet};
