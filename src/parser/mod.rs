//! Loaders for region sources and the position stream.

pub mod bed;
pub mod gtf;
pub mod msigdb;
pub mod snp;
pub mod util;

pub use bed::{load_bed_sets, read_bed_set};
pub use gtf::GeneIndex;
pub use msigdb::load_msigdb_sets;
pub use snp::{SnpPosition, SnpReader};
