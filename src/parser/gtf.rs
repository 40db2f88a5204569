//! GTF file parser with gzip support.
//!
//! Builds per-gene boundaries (the merged span of every accepted record of a
//! gene) and an index from gene name to the gene identifiers carrying it.

use ahash::AHashMap;
use indexmap::IndexSet;
use log::info;
use std::io::BufRead;
use std::path::Path;

use crate::config::Config;
use crate::error::{RegionError, Result};
use crate::parser::util::{open_reader, parse_coordinate};
use crate::types::{ChromosomeOrder, GeneBoundary};

/// Result of parsing a GTF file.
#[derive(Debug, Clone, Default)]
pub struct GeneIndex {
    /// Merged boundary per gene identifier.
    pub boundaries: AHashMap<String, GeneBoundary>,
    /// Gene name to every gene identifier sharing it, in first-seen order.
    pub aliases: AHashMap<String, IndexSet<String>>,
    /// Records skipped because their feature type was not accepted.
    pub excluded_by_feature: usize,
}

impl GeneIndex {
    /// Parse a GTF file.
    ///
    /// Supports both plain text and gzip-compressed GTF files. On any error
    /// nothing is returned; the caller should treat the annotation as absent.
    pub fn load(path: &Path, order: &ChromosomeOrder, config: &Config) -> Result<GeneIndex> {
        let reader = open_reader(path)?;
        let index = GeneIndex::from_reader(reader, path, order, config)?;

        if let Some(message) = excluded_message(index.excluded_by_feature) {
            info!("{}", message);
        }

        Ok(index)
    }

    /// Parse GTF data from a reader.
    pub fn from_reader<R: BufRead>(
        reader: R,
        path: &Path,
        order: &ChromosomeOrder,
        config: &Config,
    ) -> Result<GeneIndex> {
        let mut index = GeneIndex::default();

        for (idx, line_result) in reader.lines().enumerate() {
            let line_num = idx + 1;
            let line = line_result.map_err(|source| RegionError::Io {
                path: path.to_path_buf(),
                source,
            })?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 9 {
                return Err(RegionError::MalformedRecord {
                    path: path.to_path_buf(),
                    line: line_num,
                    message: format!("expected 9 tab-separated columns, found {}", fields.len()),
                });
            }

            if !config.accepts_feature(fields[2]) {
                index.excluded_by_feature += 1;
                continue;
            }

            let chrom = match order.rank(fields[0]) {
                Some(c) => c,
                None => continue,
            };

            let start = parse_coordinate(fields[3], path, line_num, "start")?;
            let end = parse_coordinate(fields[4], path, line_num, "end")?;

            let (gene_id, gene_name) = extract_gene_attributes(fields[8]);
            if gene_id.is_empty() {
                continue;
            }

            if !gene_name.is_empty() {
                index
                    .aliases
                    .entry(gene_name)
                    .or_default()
                    .insert(gene_id.clone());
            }

            match index.boundaries.get_mut(&gene_id) {
                Some(bound) => {
                    if bound.chrom != chrom {
                        return Err(RegionError::CrossChromosomeGene {
                            gene_id,
                            line: line_num,
                        });
                    }
                    bound.start = bound.start.min(start);
                    bound.end = bound.end.max(end);
                }
                None => {
                    index
                        .boundaries
                        .insert(gene_id, GeneBoundary::new(chrom, start, end));
                }
            }
        }

        Ok(index)
    }

    /// Number of genes with a boundary.
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Append the boundaries a gene-set token refers to.
    ///
    /// A token naming a gene identifier yields that gene. Otherwise, if it is
    /// a gene name, every identifier carrying that name contributes its
    /// boundary. Unknown tokens add nothing. Returns the number appended.
    pub fn resolve_into(&self, token: &str, out: &mut Vec<GeneBoundary>) -> usize {
        if let Some(bound) = self.boundaries.get(token) {
            out.push(*bound);
            return 1;
        }

        let before = out.len();
        if let Some(ids) = self.aliases.get(token) {
            out.extend(ids.iter().filter_map(|id| self.boundaries.get(id).copied()));
        }
        out.len() - before
    }
}

/// Report line for records dropped by the feature filter, if any were.
pub fn excluded_message(excluded: usize) -> Option<String> {
    match excluded {
        0 => None,
        1 => Some("A total of 1 entry removed due to feature selection".to_string()),
        n => Some(format!("A total of {} entries removed due to feature selection", n)),
    }
}

/// Pull `gene_id` and `gene_name` out of a GTF attribute column.
///
/// Each `;`-separated token is matched by key containment, `gene_id` first.
/// The value is the second whitespace-separated word with quotes removed.
/// Missing keys come back as empty strings.
fn extract_gene_attributes(attributes: &str) -> (String, String) {
    let mut gene_id = String::new();
    let mut gene_name = String::new();

    for token in attributes.split(';') {
        let target = if token.contains("gene_id") {
            &mut gene_id
        } else if token.contains("gene_name") {
            &mut gene_name
        } else {
            continue;
        };
        if let Some(value) = token.split_whitespace().nth(1) {
            *target = value.replace('"', "");
        }
    }

    (gene_id, gene_name)
}
