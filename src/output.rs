//! Output formatting for prset results.
//!
//! This module writes the per-set SNP count report and builds the summary
//! message shown after loading.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{RegionError, Result};
use crate::scanner::MembershipScanner;

/// Write the report header.
pub fn write_header<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "Region\t#SNPs")
}

/// Write the header and one `name<TAB>count` row per set.
pub fn write_report<'a, W, I>(writer: &mut W, rows: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, u64)>,
{
    write_header(writer)?;
    for (name, count) in rows {
        writeln!(writer, "{}\t{}", name, count)?;
    }
    Ok(())
}

/// Write the scanner's final counts to `path`.
pub fn write_report_file(path: &Path, scanner: &MembershipScanner<'_>) -> Result<()> {
    let to_error = |source| RegionError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, scanner.rows()).map_err(to_error)?;
    writer.flush().map_err(to_error)
}

/// Human-readable count of loaded region sets.
///
/// The catalog always holds Base, so `num_sets` is at least one.
pub fn summary_message(num_sets: usize) -> String {
    match num_sets {
        1 => "1 region included".to_string(),
        n => format!("A total of {} regions are included", n),
    }
}
