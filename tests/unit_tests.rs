//! Cross-module tests for catalog building and membership scanning.
//!
//! These cover the behaviour downstream scoring relies on: coordinate
//! conversion, name uniqueness, alias resolution, failure isolation and the
//! sorted-stream scanning contract.

use prset::catalog::{build_catalog, FrozenCatalog, RegionCatalog};
use prset::config::Config;
use prset::parser::bed::{bed_set_name, read_bed_set};
use prset::parser::gtf::GeneIndex;
use prset::parser::msigdb::load_msigdb_sets;
use prset::scanner::Membership;
use prset::types::{ChromosomeOrder, GenomicInterval, RegionSet};
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

// -------------------------------------------------------------------------
// Helper functions
// -------------------------------------------------------------------------

fn write_temp(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn order() -> ChromosomeOrder {
    ChromosomeOrder::from_labels(["chr1", "chr2", "chr3"])
}

fn gtf_line(chrom: &str, start: u64, end: u64, id: &str, name: &str) -> String {
    format!(
        "{}\ttest\tgene\t{}\t{}\t.\t+\t.\tgene_id \"{}\"; gene_name \"{}\";\n",
        chrom, start, end, id, name
    )
}

fn scan_all(
    catalog: &FrozenCatalog,
    order: &ChromosomeOrder,
    queries: &[(&str, u64)],
) -> (Vec<Membership>, Vec<u64>) {
    let mut scanner = catalog.scanner(order);
    let flags = queries
        .iter()
        .map(|(chrom, pos)| scanner.classify(chrom, *pos))
        .collect();
    (flags, scanner.counts().to_vec())
}

// -------------------------------------------------------------------------
// Loading
// -------------------------------------------------------------------------

mod test_loading {
    use super::*;

    #[test]
    fn test_bed_coordinate_conversion() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chr1 0 10").unwrap();
        file.flush().unwrap();

        let set = read_bed_set(file.path(), &order()).unwrap();
        assert_eq!(set.intervals, vec![GenomicInterval::new(0, 1, 11)]);
    }

    #[test]
    fn test_catalog_size_counts_valid_sources() {
        let dir = TempDir::new().unwrap();
        let bed_a = write_temp(&dir, "a.bed", "chr1\t0\t10\n");
        let bed_b = write_temp(&dir, "b.bed", "chr2\t5\t50\n");
        let bed_bad = write_temp(&dir, "bad.bed", "chr1\t0\n");
        let gtf = write_temp(
            &dir,
            "genes.gtf",
            &(gtf_line("chr1", 100, 200, "G1", "ONE")
                + &gtf_line("chr2", 10, 20, "G2", "TWO")),
        );
        let gmt = write_temp(&dir, "sets.gmt", "S1 url G1\nS2 url TWO\nS3 url ONE TWO\n");

        let mut config = Config::default();
        config.bed = vec![bed_a, bed_bad, bed_b];
        config.gtf = Some(gtf);
        config.msigdb = Some(gmt);

        let catalog = build_catalog(&config, &order());
        assert_eq!(catalog.len(), 1 + 2 + 3);
    }

    #[test]
    fn test_duplicate_name_keeps_first_definition() {
        let mut catalog = RegionCatalog::new();
        let first = vec![GenomicInterval::new(0, 5, 10)];
        catalog.add(RegionSet::new("setA", first.clone())).unwrap();
        let before = catalog.len();

        assert!(catalog
            .add(RegionSet::new("setA", vec![GenomicInterval::new(2, 1, 2)]))
            .is_err());
        assert_eq!(catalog.len(), before);
        assert_eq!(catalog.get("setA").unwrap().intervals, first);
    }

    #[test]
    fn test_bed_and_gene_set_share_name_space() {
        let dir = TempDir::new().unwrap();
        let bed = write_temp(&dir, "x.bed", "chr1\t0\t10\n");
        let bed_name = bed_set_name(&bed);
        let gtf = write_temp(&dir, "genes.gtf", &gtf_line("chr1", 100, 200, "G1", "ONE"));
        let gmt = write_temp(&dir, "sets.gmt", &format!("{} G1\nNEW G1\n", bed_name));

        let mut config = Config::default();
        config.bed = vec![bed];
        config.gtf = Some(gtf);
        config.msigdb = Some(gmt);

        let catalog = build_catalog(&config, &order());
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.get(&bed_name).unwrap().intervals,
            vec![GenomicInterval::new(0, 1, 11)]
        );
    }

    #[test]
    fn test_alias_contributes_every_gene() {
        let dir = TempDir::new().unwrap();
        let gtf = write_temp(
            &dir,
            "genes.gtf",
            &(gtf_line("chr2", 300, 400, "ID_B", "SHARED")
                + &gtf_line("chr1", 100, 200, "ID_A", "SHARED")),
        );
        let genes = GeneIndex::load(&gtf, &order(), &Config::default()).unwrap();
        let gmt = write_temp(&dir, "sets.gmt", "ALIASED url SHARED\n");

        let mut catalog = RegionCatalog::new();
        assert_eq!(load_msigdb_sets(&gmt, &genes, &mut catalog), 1);
        assert_eq!(
            catalog.get("ALIASED").unwrap().intervals,
            vec![
                GenomicInterval::new(0, 100, 200),
                GenomicInterval::new(1, 300, 400),
            ]
        );
    }

    #[test]
    fn test_gtf_failure_skips_gene_sets_keeps_bed() {
        let dir = TempDir::new().unwrap();
        let bed = write_temp(&dir, "keep.bed", "chr1\t0\t10\n");
        let gtf = write_temp(
            &dir,
            "conflict.gtf",
            &(gtf_line("chr1", 100, 200, "G1", "ONE")
                + &gtf_line("chr2", 100, 200, "G1", "ONE")),
        );
        let gmt = write_temp(&dir, "sets.gmt", "S1 G1\n");

        let mut config = Config::default();
        config.bed = vec![bed];
        config.gtf = Some(gtf);
        config.msigdb = Some(gmt);

        let catalog = build_catalog(&config, &order());
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.contains("S1"));

        let order = order();
        let frozen = catalog.freeze();
        let (flags, counts) = scan_all(&frozen, &order, &[("chr1", 5), ("chr1", 12)]);
        assert!(flags[0][1]);
        assert!(!flags[1][1]);
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn test_missing_gtf_file_skips_gene_sets() {
        let dir = TempDir::new().unwrap();
        let gmt = write_temp(&dir, "sets.gmt", "S1 G1\n");

        let mut config = Config::default();
        config.gtf = Some(dir.path().join("absent.gtf"));
        config.msigdb = Some(gmt);

        let catalog = build_catalog(&config, &order());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_feature_filter_applies() {
        let dir = TempDir::new().unwrap();
        let gtf = write_temp(&dir, "genes.gtf", &gtf_line("chr1", 100, 200, "G1", "ONE"));
        let gmt = write_temp(&dir, "sets.gmt", "S1 G1\n");

        let mut config = Config::default();
        assert!(config.parse_features("exon"));
        config.gtf = Some(gtf);
        config.msigdb = Some(gmt);

        // every record is filtered out, so there is nothing to build sets from
        let catalog = build_catalog(&config, &order());
        assert_eq!(catalog.len(), 1);
    }
}

// -------------------------------------------------------------------------
// Scanning
// -------------------------------------------------------------------------

mod test_scanning {
    use super::*;

    fn catalog_with(sets: &[(&str, Vec<GenomicInterval>)]) -> FrozenCatalog {
        let mut catalog = RegionCatalog::new();
        for (name, intervals) in sets {
            catalog.add(RegionSet::new(*name, intervals.clone())).unwrap();
        }
        catalog.freeze()
    }

    #[test]
    fn test_interval_boundaries() {
        let catalog = catalog_with(&[("r", vec![GenomicInterval::new(1, 5, 10)])]);
        let order = order();
        let (flags, _) = scan_all(
            &catalog,
            &order,
            &[("chr2", 4), ("chr2", 5), ("chr2", 10), ("chr2", 11)],
        );
        let hits: Vec<bool> = flags.iter().map(|f| f[1]).collect();
        assert_eq!(hits, vec![false, true, true, false]);
    }

    #[test]
    fn test_deterministic_across_fresh_scanners() {
        let sets = [
            (
                "a",
                vec![
                    GenomicInterval::new(0, 10, 20),
                    GenomicInterval::new(0, 15, 40),
                    GenomicInterval::new(2, 1, 5),
                ],
            ),
            ("b", vec![GenomicInterval::new(1, 100, 100)]),
            ("empty", vec![]),
        ];
        let queries = [
            ("chr1", 12),
            ("chr1", 30),
            ("chr1", 41),
            ("chr2", 100),
            ("chrUn", 3),
            ("chr3", 5),
        ];
        let order = order();

        let first = catalog_with(&sets);
        let second = catalog_with(&sets);
        let run1 = scan_all(&first, &order, &queries);
        let run2 = scan_all(&second, &order, &queries);

        assert_eq!(run1, run2);
        assert_eq!(run1.1, vec![6, 3, 1, 0]);
    }

    #[test]
    fn test_every_query_in_base() {
        let catalog = catalog_with(&[]);
        let order = order();
        let (flags, counts) = scan_all(&catalog, &order, &[("chr1", 1), ("weird", 2)]);
        assert!(flags.iter().all(|f| f.len() == 1 && f[0]));
        assert_eq!(counts, vec![2]);
    }

    #[test]
    fn test_sharded_scan_matches_sequential() {
        let catalog = catalog_with(&[
            (
                "a",
                vec![
                    GenomicInterval::new(0, 1, 50),
                    GenomicInterval::new(1, 20, 30),
                    GenomicInterval::new(2, 5, 5),
                ],
            ),
            ("b", vec![GenomicInterval::new(1, 1, 1000)]),
        ]);
        let order = order();
        let queries = [
            ("chr1", 10),
            ("chr1", 60),
            ("chr2", 25),
            ("chr2", 31),
            ("chr3", 5),
        ];

        let (_, sequential) = scan_all(&catalog, &order, &queries);

        let mut merged = catalog.scanner(&order);
        for chrom in ["chr1", "chr2", "chr3"] {
            let mut shard = catalog.scanner(&order);
            for (c, pos) in queries.iter().filter(|(c, _)| *c == chrom) {
                shard.classify(c, *pos);
            }
            merged.merge_counts(&shard);
        }

        assert_eq!(merged.counts(), sequential.as_slice());
    }

    #[test]
    fn test_unsorted_queries_violate_contract() {
        let catalog = catalog_with(&[("a", vec![GenomicInterval::new(0, 1, 10)])]);
        let order = order();

        let (_, sorted) = scan_all(&catalog, &order, &[("chr1", 5), ("chr2", 1)]);
        let (_, unsorted) = scan_all(&catalog, &order, &[("chr2", 1), ("chr1", 5)]);

        assert_eq!(sorted, vec![2, 1]);
        // the chr1 interval was passed while scanning chr2, so the hit is lost
        assert_eq!(unsorted, vec![2, 0]);
    }
}
