//! Error types for region set loading and reporting.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building region sets or writing the report.
///
/// Most of these never leave the loaders: they are logged and the affected
/// file (or the whole annotation load) is dropped. Only [`RegionError::OutputWrite`]
/// is meant to reach the caller.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Input file could not be opened
    #[error("{} cannot be opened: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// I/O failure while reading an already opened file
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Wrong column count or unparsable coordinate
    #[error("malformed record in {} at line {line}: {message}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Coordinate parsed but below zero
    #[error("negative {which} coordinate in {} at line {line}", path.display())]
    NegativeCoordinate {
        path: PathBuf,
        line: usize,
        which: &'static str,
    },

    /// Set name already registered in the catalog
    #[error("{0} is duplicated, it will be ignored")]
    DuplicateName(String),

    /// The same gene identifier was seen on two chromosomes
    #[error("gene {gene_id} occurs on two separate chromosomes (line {line})")]
    CrossChromosomeGene { gene_id: String, line: usize },

    /// Report could not be written
    #[error("cannot write region information to {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RegionError>;
