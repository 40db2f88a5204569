//! CLI entry point for prset.
//!
//! Builds the region catalog, classifies a sorted SNP position file and
//! writes the per-region SNP counts.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

use prset::catalog::{build_catalog, FrozenCatalog};
use prset::config::Config;
use prset::output::{summary_message, write_report_file};
use prset::parser::{SnpPosition, SnpReader};
use prset::scanner::MembershipScanner;
use prset::types::ChromosomeOrder;
use rayon::prelude::*;

/// Genomic region set builder and SNP membership scanner.
///
/// Builds region sets from BED, GTF and MSigDB files and counts how many SNPs
/// fall in each set.
#[derive(Parser, Debug)]
#[command(name = "prset")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// BED region files (repeatable or comma-separated)
    #[arg(short = 'b', long = "bed", value_delimiter = ',')]
    bed: Vec<PathBuf>,

    /// GTF annotation file (plain or .gz)
    #[arg(short = 'g', long = "gtf")]
    gtf: Option<PathBuf>,

    /// MSigDB-style gene set file (requires --gtf)
    #[arg(short = 'm', long = "msigdb")]
    msigdb: Option<PathBuf>,

    /// Accepted GTF feature types (comma-separated)
    #[arg(short = 'f', long = "feature", default_value = "exon,gene,protein_coding,CDS")]
    feature: String,

    /// Sorted SNP positions: chromosome and position per line (required)
    #[arg(short = 's', long = "snps")]
    snps: PathBuf,

    /// Chromosome order (comma-separated labels); defaults to human 1-22,X,Y,XY,MT
    #[arg(short = 'c', long = "chrom-order")]
    chrom_order: Option<String>,

    /// Output report file (required)
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Number of worker threads (0 = auto-detect, 1 = sequential)
    #[arg(long = "threads", short = 'j', default_value = "1")]
    threads: usize,

    /// Batch size for streaming SNP positions
    #[arg(long = "batch-size", default_value = "10000")]
    batch_size: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Validate inputs
    if !args.snps.exists() {
        bail!("SNP file not found: {}", args.snps.display());
    }
    if args.batch_size == 0 {
        bail!("Batch size must be greater than 0");
    }

    // Build configuration
    let mut config = Config::new();
    config.bed = args.bed.clone();
    config.gtf = args.gtf.clone();
    config.msigdb = args.msigdb.clone();
    config.batch_size = args.batch_size;
    config.threads = if args.threads == 0 {
        num_cpus::get()
    } else {
        args.threads
    };
    if !config.parse_features(&args.feature) {
        bail!("Features not properly passed: {}", args.feature);
    }

    let order = match &args.chrom_order {
        Some(labels) => {
            let order = ChromosomeOrder::from_labels(labels.split(',').filter(|l| !l.is_empty()));
            if order.is_empty() {
                bail!("Chromosome order is empty");
            }
            order
        }
        None => ChromosomeOrder::human(),
    };

    let catalog = build_catalog(&config, &order).freeze();
    info!("{}", summary_message(catalog.len()));

    let started = Instant::now();
    let scanner = if config.threads == 1 {
        run_sequential(&args.snps, &config, &catalog, &order)?
    } else {
        run_parallel(&args.snps, &config, &catalog, &order)?
    };
    info!(
        "Classified {} SNPs in {:.2?}",
        scanner.counts()[0],
        started.elapsed()
    );

    info!("Writing output to: {}", args.output.display());
    write_report_file(&args.output, &scanner).context("Failed to write region report")?;

    info!("Done!");
    Ok(())
}

/// Sequential implementation with streaming.
fn run_sequential<'a>(
    snps: &Path,
    config: &Config,
    catalog: &'a FrozenCatalog,
    order: &'a ChromosomeOrder,
) -> Result<MembershipScanner<'a>> {
    info!("Processing SNP file: {}", snps.display());

    let mut reader = SnpReader::new(snps)?;
    let mut scanner = catalog.scanner(order);
    let mut flags = catalog.empty_membership();

    while let Some(chunk) = reader.read_chunk(config.batch_size)? {
        for snp in chunk {
            scanner.classify_into(&snp.chrom, snp.pos, &mut flags);
        }
    }

    Ok(scanner)
}

/// Positions of one contiguous run of a chromosome, in file order.
struct Shard {
    chrom: String,
    positions: Vec<u64>,
}

/// Split sorted positions into per-chromosome shards.
fn shard_by_chromosome(snps: Vec<SnpPosition>, shards: &mut Vec<Shard>) {
    for snp in snps {
        match shards.last_mut() {
            Some(shard) if shard.chrom == snp.chrom => shard.positions.push(snp.pos),
            _ => shards.push(Shard {
                chrom: snp.chrom,
                positions: vec![snp.pos],
            }),
        }
    }
}

/// Parallel implementation: one scanner per chromosome shard.
///
/// Each shard starts from fresh cursors. Matches on one chromosome never depend
/// on cursor moves made for another, so the merged counts equal those of a
/// sequential scan.
fn run_parallel<'a>(
    snps: &Path,
    config: &Config,
    catalog: &'a FrozenCatalog,
    order: &'a ChromosomeOrder,
) -> Result<MembershipScanner<'a>> {
    info!("Using parallel mode with {} threads", config.threads);
    info!("Processing SNP file: {}", snps.display());

    let mut reader = SnpReader::new(snps)?;
    let mut shards: Vec<Shard> = Vec::new();
    while let Some(chunk) = reader.read_chunk(config.batch_size)? {
        shard_by_chromosome(chunk, &mut shards);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .context("Failed to create thread pool")?;

    let partials: Vec<MembershipScanner<'a>> = pool.install(|| {
        shards
            .par_iter()
            .map(|shard| {
                let mut scanner = catalog.scanner(order);
                let mut flags = catalog.empty_membership();
                let rank = order.rank(&shard.chrom);
                for &pos in &shard.positions {
                    scanner.classify_rank(rank, pos, &mut flags);
                }
                scanner
            })
            .collect()
    });

    let mut scanner = catalog.scanner(order);
    for partial in &partials {
        scanner.merge_counts(partial);
    }
    Ok(scanner)
}
