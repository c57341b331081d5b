//! Karyotype ordering of contigs and loci
//!
//! Numbered chromosomes come first by integer value, then `chrX`, `chrY` and
//! the mitochondrial contig (`chrM` or `chrMT`), then every other contig by
//! name. Names that share a rank, such as `chrM` and `chrMT` or `chr1` and
//! `chr01`, are ordered by name so each contig stays contiguous.

use std::cmp::Ordering;

use crate::types::NormalizedLocus;

/// Sort rank of a normalized contig name
///
/// Variant order is the sort order, so the derived `Ord` is the karyotype order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContigRank {
    Numbered(u64),
    X,
    Y,
    Mitochondrial,
    Other(String),
}

impl ContigRank {
    pub fn of(chrom: &str) -> Self {
        match chrom {
            "chrX" => return ContigRank::X,
            "chrY" => return ContigRank::Y,
            "chrM" | "chrMT" => return ContigRank::Mitochondrial,
            _ => {}
        }

        if let Some(number) = chrom.strip_prefix("chr")
            && !number.is_empty()
            && number.bytes().all(|b| b.is_ascii_digit())
            && let Ok(n) = number.parse::<u64>()
        {
            return ContigRank::Numbered(n);
        }

        ContigRank::Other(chrom.to_string())
    }
}

/// Compare two contig names in karyotype order, then by name.
pub fn compare_contigs(a: &str, b: &str) -> Ordering {
    ContigRank::of(a)
        .cmp(&ContigRank::of(b))
        .then_with(|| a.cmp(b))
}

/// Compare two loci by contig, then start position.
pub fn compare_loci(a: &NormalizedLocus, b: &NormalizedLocus) -> Ordering {
    compare_contigs(&a.chrom, &b.chrom).then(a.pos.cmp(&b.pos))
}

/// Sort loci in output order. Equal keys keep their input order.
pub fn sort_loci(loci: &mut [NormalizedLocus]) {
    loci.sort_by(compare_loci);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn locus(chrom: &str, pos: u64, id: &str) -> NormalizedLocus {
        use crate::types::AlleleCall;
        let allele = AlleleCall {
            repeat_count: 10.0,
            ci_min: "9".to_string(),
            ci_max: "11".to_string(),
            is_outlier: 0,
            z_score: 0.0,
        };
        NormalizedLocus {
            chrom: chrom.to_string(),
            pos,
            end: pos + 10,
            id: id.to_string(),
            motif: "CAG".to_string(),
            period: 3,
            allele1: allele.clone(),
            allele2: allele,
            coverage: 30,
            filter: String::new(),
            diseases: String::new(),
        }
    }

    #[test]
    fn test_contig_ranks() {
        assert_eq!(ContigRank::of("chr1"), ContigRank::Numbered(1));
        assert_eq!(ContigRank::of("chr22"), ContigRank::Numbered(22));
        assert_eq!(ContigRank::of("chrX"), ContigRank::X);
        assert_eq!(ContigRank::of("chrY"), ContigRank::Y);
        assert_eq!(ContigRank::of("chrM"), ContigRank::Mitochondrial);
        assert_eq!(ContigRank::of("chrMT"), ContigRank::Mitochondrial);
        assert_eq!(
            ContigRank::of("chrUn_KI270742v1"),
            ContigRank::Other("chrUn_KI270742v1".to_string())
        );
        assert_eq!(ContigRank::of("chr"), ContigRank::Other("chr".to_string()));
        assert_eq!(ContigRank::of("chr1a"), ContigRank::Other("chr1a".to_string()));
    }

    #[test]
    fn test_karyotype_order() {
        let mut contigs = vec![
            "chrUn_KI270742v1",
            "chrMT",
            "chr10",
            "chrY",
            "chr2",
            "chr1_KI270706v1_random",
            "chrX",
            "chr1",
            "chr22",
        ];
        contigs.sort_by(|a, b| compare_contigs(a, b));
        assert_eq!(
            contigs,
            vec![
                "chr1",
                "chr2",
                "chr10",
                "chr22",
                "chrX",
                "chrY",
                "chrMT",
                "chr1_KI270706v1_random",
                "chrUn_KI270742v1",
            ]
        );
    }

    #[test]
    fn test_same_rank_contigs_are_split_by_name() {
        assert_eq!(ContigRank::of("chrM"), ContigRank::of("chrMT"));
        assert_eq!(compare_contigs("chrM", "chrMT"), Ordering::Less);
        assert_eq!(compare_contigs("chr01", "chr1"), Ordering::Less);
        assert_eq!(compare_contigs("chrMT", "chrMT"), Ordering::Equal);
        assert_eq!(compare_contigs("chrMT", "chrUn_KI270742v1"), Ordering::Less);
    }

    #[test]
    fn test_same_rank_contigs_are_not_interleaved() {
        let mut loci = vec![
            locus("chrM", 100, "m1"),
            locus("chrMT", 200, "mt"),
            locus("chrM", 300, "m2"),
            locus("chr1", 50, "one_a"),
            locus("chr01", 70, "zero_one"),
            locus("chr1", 90, "one_b"),
        ];
        sort_loci(&mut loci);
        let ids: Vec<&str> = loci.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["zero_one", "one_a", "one_b", "m1", "m2", "mt"]);
    }

    #[test]
    fn test_sort_loci_by_contig_then_position() {
        let mut loci = vec![
            locus("chrX", 147912051, "FMR1"),
            locus("chr4", 3074877, "HTT"),
            locus("chr19", 45770205, "DMPK"),
            locus("chr4", 39348425, "RFC1"),
            locus("chr9", 69037287, "FXN"),
        ];
        sort_loci(&mut loci);
        let ids: Vec<&str> = loci.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["HTT", "RFC1", "FXN", "DMPK", "FMR1"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut loci = vec![
            locus("chrM", 100, "first"),
            locus("chr2", 5, "a"),
            locus("chrMT", 100, "other"),
            locus("chrM", 100, "second"),
        ];
        sort_loci(&mut loci);
        let ids: Vec<&str> = loci.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "first", "second", "other"]);
    }

    fn contig_name() -> impl Strategy<Value = String> {
        prop_oneof![
            (1u64..=22).prop_map(|n| format!("chr{n}")),
            Just("chrX".to_string()),
            Just("chrY".to_string()),
            Just("chrM".to_string()),
            Just("chrMT".to_string()),
            Just("chr01".to_string()),
            "chr[A-Za-z_][A-Za-z0-9_]{0,8}",
        ]
    }

    proptest! {
        #[test]
        fn sorted_loci_are_ordered(
            entries in proptest::collection::vec((contig_name(), 1u64..1_000_000), 0..64)
        ) {
            let mut loci: Vec<NormalizedLocus> = entries
                .iter()
                .enumerate()
                .map(|(i, (chrom, pos))| locus(chrom, *pos, &i.to_string()))
                .collect();
            sort_loci(&mut loci);

            let mut finished: Vec<&str> = Vec::new();
            for pair in loci.windows(2) {
                if pair[0].chrom != pair[1].chrom {
                    prop_assert!(!finished.contains(&pair[1].chrom.as_str()));
                    finished.push(pair[0].chrom.as_str());
                }
                prop_assert_ne!(compare_loci(&pair[0], &pair[1]), Ordering::Greater);
                if compare_loci(&pair[0], &pair[1]) == Ordering::Equal {
                    let first: usize = pair[0].id.parse().unwrap();
                    let second: usize = pair[1].id.parse().unwrap();
                    prop_assert!(first < second);
                }
            }
        }

        #[test]
        fn numbered_contigs_precede_all_others(n in 1u64..=22, other in contig_name()) {
            let numbered = format!("chr{n}");
            if !matches!(ContigRank::of(&other), ContigRank::Numbered(_)) {
                prop_assert_eq!(compare_contigs(&numbered, &other), Ordering::Less);
            }
        }
    }
}
