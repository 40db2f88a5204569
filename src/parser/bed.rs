//! BED file loader with gzip support.
//!
//! Each BED file becomes one region set, named after its path.

use log::{info, warn};
use std::io::BufRead;
use std::path::Path;

use crate::catalog::RegionCatalog;
use crate::error::{RegionError, Result};
use crate::parser::util::{open_reader, parse_coordinate};
use crate::types::{ChromosomeOrder, GenomicInterval, RegionSet};

/// Set name used for a BED file.
pub fn bed_set_name(path: &Path) -> String {
    path.display().to_string()
}

/// Parse BED data from a reader.
///
/// Coordinates are shifted by one on both ends to move from the 0-based BED
/// convention to 1-based positions. Rows on chromosomes missing from `order`
/// are dropped. Any short row or bad coordinate fails the whole file.
pub fn parse_bed_reader<R: BufRead>(
    reader: R,
    path: &Path,
    order: &ChromosomeOrder,
) -> Result<Vec<GenomicInterval>> {
    let mut intervals = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line_result.map_err(|source| RegionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(RegionError::MalformedRecord {
                path: path.to_path_buf(),
                line: line_num,
                message: "contains less than 3 columns".to_string(),
            });
        }

        let start = parse_coordinate(fields[1], path, line_num, "start")?;
        let end = parse_coordinate(fields[2], path, line_num, "end")?;

        if let Some(chrom) = order.rank(fields[0]) {
            intervals.push(GenomicInterval::new(chrom, start + 1, end + 1));
        }
    }

    Ok(intervals)
}

/// Load one BED file into a sorted region set.
pub fn read_bed_set(path: &Path, order: &ChromosomeOrder) -> Result<RegionSet> {
    let reader = open_reader(path)?;
    let intervals = parse_bed_reader(reader, path, order)?;
    Ok(RegionSet::new(bed_set_name(path), intervals))
}

/// Load every BED file into `catalog`.
///
/// Files that cannot be opened, are malformed, or reuse a registered name are
/// skipped with a warning. Returns the number of sets added.
pub fn load_bed_sets<P: AsRef<Path>>(
    paths: &[P],
    order: &ChromosomeOrder,
    catalog: &mut RegionCatalog,
) -> usize {
    let mut added = 0;

    for path in paths {
        let path = path.as_ref();
        info!("Reading: {}", path.display());

        let reader = match open_reader(path) {
            Ok(r) => r,
            Err(e) => {
                warn!("{}. It will be ignored", e);
                continue;
            }
        };

        let name = bed_set_name(path);
        if catalog.contains(&name) {
            warn!("{}", RegionError::DuplicateName(name));
            continue;
        }

        match parse_bed_reader(reader, path, order) {
            Ok(intervals) => match catalog.add(RegionSet::new(name, intervals)) {
                Ok(_) => added += 1,
                Err(e) => warn!("{}", e),
            },
            Err(e) => {
                warn!("{}", e);
                warn!("{} will be ignored", path.display());
            }
        }
    }

    added
}
