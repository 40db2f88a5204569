//! Gene set (MSigDB style) loader.
//!
//! Each row is `name gene gene ...`. Gene tokens are resolved through a
//! [`GeneIndex`]; a URL or description column is just a token that resolves
//! to nothing.

use log::warn;
use std::io::BufRead;
use std::path::Path;

use crate::catalog::RegionCatalog;
use crate::error::RegionError;
use crate::parser::gtf::GeneIndex;
use crate::parser::util::open_reader;
use crate::types::RegionSet;

/// Build region sets from gene set rows and add them to `catalog`.
///
/// Rows with fewer than two tokens or with an already registered name are
/// skipped with a warning. A row whose genes resolve to nothing still yields
/// an (empty) set. Returns the number of sets added.
pub fn parse_msigdb_reader<R: BufRead>(
    reader: R,
    path: &Path,
    genes: &GeneIndex,
    catalog: &mut RegionCatalog,
) -> usize {
    let mut added = 0;

    for line_result in reader.lines() {
        let line = match line_result {
            Ok(l) => l,
            Err(source) => {
                let err = RegionError::Io {
                    path: path.to_path_buf(),
                    source,
                };
                warn!("{}. Remaining gene sets are ignored", err);
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() < 2 {
            warn!("Each line require at least 2 information: {}", trimmed);
            continue;
        }

        let name = tokens[0];
        if catalog.contains(name) {
            warn!("Duplicated Set: {}. It will be ignored", name);
            continue;
        }

        let mut intervals = Vec::new();
        for gene in &tokens[1..] {
            genes.resolve_into(gene, &mut intervals);
        }

        match catalog.add(RegionSet::new(name, intervals)) {
            Ok(_) => added += 1,
            Err(e) => warn!("{}", e),
        }
    }

    added
}

/// Load a gene set file into `catalog`.
///
/// Does nothing when `genes` is empty. A file that cannot be opened is
/// skipped with a warning.
pub fn load_msigdb_sets(path: &Path, genes: &GeneIndex, catalog: &mut RegionCatalog) -> usize {
    if genes.is_empty() {
        return 0;
    }

    match open_reader(path) {
        Ok(reader) => parse_msigdb_reader(reader, path, genes, catalog),
        Err(e) => {
            warn!("{}. Will skip this file", e);
            0
        }
    }
}
