// Coordinate strings from the report, e.g. `chr4:3074877-3074933`

const CHR_PREFIX: &str = "chr";

/// A parsed `[chr]<contig>:<start>-<end>` coordinate string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

/// Parse a coordinate string into a normalized contig and 1-based bounds.
///
/// The leading `chr` is optional and case-sensitive. Returns `None` when the
/// string does not have the expected shape or when the start is 0.
pub fn parse_coordinates(coordinates: &str) -> Option<Coordinates> {
    let (contig, range) = coordinates.trim().split_once(':')?;
    let (start, end) = range.split_once('-')?;

    if contig.is_empty() || !is_decimal(start) || !is_decimal(end) {
        return None;
    }

    let start = start.parse::<u64>().ok()?;
    let end = end.parse::<u64>().ok()?;
    if start == 0 {
        return None;
    }

    Some(Coordinates {
        chrom: normalize_contig(contig),
        start,
        end,
    })
}

/// Prefix a contig name with `chr` unless it already carries it.
pub fn normalize_contig(contig: &str) -> String {
    if contig.starts_with(CHR_PREFIX) {
        contig.to_string()
    } else {
        format!("{CHR_PREFIX}{contig}")
    }
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixed_coordinates() {
        assert_eq!(
            parse_coordinates("chr4:3074877-3074933"),
            Some(Coordinates {
                chrom: "chr4".to_string(),
                start: 3074877,
                end: 3074933,
            })
        );
        assert_eq!(
            parse_coordinates("chrX:147912051-147912110").map(|c| c.chrom),
            Some("chrX".to_string())
        );
    }

    #[test]
    fn test_parse_unprefixed_coordinates() {
        let parsed = parse_coordinates("4:3074877-3074933").unwrap();
        assert_eq!(parsed.chrom, "chr4");
        assert_eq!(parsed.start, 3074877);
        assert_eq!(parsed.end, 3074933);

        assert_eq!(
            parse_coordinates("MT:100-200").map(|c| c.chrom),
            Some("chrMT".to_string())
        );
        assert_eq!(
            parse_coordinates("  chr1:10-20\n").map(|c| c.start),
            Some(10)
        );
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        assert_eq!(
            parse_coordinates("CHR4:1-2").map(|c| c.chrom),
            Some("chrCHR4".to_string())
        );
    }

    #[test]
    fn test_reject_malformed_coordinates() {
        assert_eq!(parse_coordinates("chr4-bad"), None);
        assert_eq!(parse_coordinates("chr4:100"), None);
        assert_eq!(parse_coordinates("chr4:abc-200"), None);
        assert_eq!(parse_coordinates("chr4:100-"), None);
        assert_eq!(parse_coordinates("chr4:-100-200"), None);
        assert_eq!(parse_coordinates(":100-200"), None);
        assert_eq!(parse_coordinates("chr4:1:100-200"), None);
        assert_eq!(parse_coordinates("chr4:0-200"), None);
        assert_eq!(parse_coordinates(""), None);
    }

    #[test]
    fn test_normalize_contig_adds_prefix_once() {
        assert_eq!(normalize_contig("4"), "chr4");
        assert_eq!(normalize_contig("chr4"), "chr4");
        assert_eq!(normalize_contig("X"), "chrX");
        assert_eq!(normalize_contig("chrUn_KI270742v1"), "chrUn_KI270742v1");
    }
}
