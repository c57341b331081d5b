//! Fixed VCF header schema for STR records
//!
//! The INFO and FORMAT definitions here are the output contract: IDs, arities
//! and types are what downstream tools key on and must stay as declared.

use noodles::vcf::{
    self,
    header::{
        FileFormat,
        record::{
            Value,
            key::Other,
            value::{
                Map,
                map::{AlternativeAllele, Contig, Filter, Format, Info, format, info},
            },
        },
    },
};

use crate::error::{ConvertError, Result};
use crate::types::NormalizedLocus;

pub const FILE_FORMAT: FileFormat = FileFormat::new(4, 2);
pub const SOURCE: &str = "STRipy2VCF";
pub const PASS: &str = "PASS";
pub const STR_ALT_ID: &str = "STR";
pub const STR_ALLELE: &str = "<STR>";

pub const END: &str = "END";
pub const SVTYPE: &str = "SVTYPE";
pub const RU: &str = "RU";
pub const PERIOD: &str = "PERIOD";
pub const REPCN: &str = "REPCN";
pub const REPCI: &str = "REPCI";
pub const OUTLIER: &str = "OUTLIER";
pub const ZSCORE: &str = "ZSCORE";
pub const DP: &str = "DP";
pub const DISEASES: &str = "DISEASES";
pub const LOCUS: &str = "LOCUS";

pub const GT: &str = "GT";
pub const AR: &str = "AR";

/// INFO definitions in header and record order
pub const INFO_FIELDS: [(&str, info::Number, info::Type, &str); 11] = [
    (
        END,
        info::Number::Count(1),
        info::Type::Integer,
        "Stop position of the interval",
    ),
    (
        SVTYPE,
        info::Number::Count(1),
        info::Type::String,
        "Type of structural variant",
    ),
    (
        RU,
        info::Number::Count(1),
        info::Type::String,
        "Repeat unit sequence (motif)",
    ),
    (
        PERIOD,
        info::Number::Count(1),
        info::Type::Integer,
        "Length of the repeat unit",
    ),
    (
        REPCN,
        info::Number::Count(2),
        info::Type::Float,
        "Allelic repeat counts (A1,A2) from STRipy",
    ),
    (
        REPCI,
        info::Number::Count(2),
        info::Type::String,
        "Allelic 95% CI on repeat counts as min-max,min-max",
    ),
    (
        OUTLIER,
        info::Number::Count(2),
        info::Type::Integer,
        "Allelic population outlier flags (0/1)",
    ),
    (
        ZSCORE,
        info::Number::Count(2),
        info::Type::Float,
        "Allelic population Z-scores",
    ),
    (
        DP,
        info::Number::Count(1),
        info::Type::Integer,
        "Depth (coverage) at locus, from STRipy",
    ),
    (
        DISEASES,
        info::Number::Unknown,
        info::Type::String,
        "Associated disease symbols for this locus (| separated)",
    ),
    (
        LOCUS,
        info::Number::Count(1),
        info::Type::String,
        "Gene/locus identifier from STRipy",
    ),
];

/// FORMAT definitions in header and sample order
pub const FORMAT_FIELDS: [(&str, format::Number, format::Type, &str); 2] = [
    (
        GT,
        format::Number::Count(1),
        format::Type::String,
        "Unphased genotype",
    ),
    (
        AR,
        format::Number::Count(2),
        format::Type::Integer,
        "Allelic repeat counts (A1,A2) from STRipy",
    ),
];

/// Turn a report filter into a valid FILTER ID.
///
/// Anything outside `[A-Za-z0-9_.]` becomes `_`; an empty filter is `PASS`.
pub fn sanitize_filter(filter: &str) -> String {
    let filter = filter.trim();
    if filter.is_empty() {
        return PASS.to_string();
    }
    filter
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Header of a single-sample STR VCF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrHeader {
    pub contigs: Vec<String>,
    pub filters: Vec<String>,
    pub sample_name: String,
}

impl StrHeader {
    /// Collect contigs and filters in order of first appearance.
    pub fn new<'a, I>(loci: I, sample_name: &str) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedLocus>,
    {
        let mut contigs: Vec<String> = Vec::new();
        let mut filters: Vec<String> = Vec::new();

        for locus in loci {
            if !contigs.contains(&locus.chrom) {
                contigs.push(locus.chrom.clone());
            }
            let filter = sanitize_filter(&locus.filter);
            if filter != PASS && !filters.contains(&filter) {
                filters.push(filter);
            }
        }

        Self {
            contigs,
            filters,
            sample_name: sample_name.to_string(),
        }
    }

    pub fn has_contig(&self, chrom: &str) -> bool {
        self.contigs.iter().any(|contig| contig == chrom)
    }

    /// Build the VCF header
    pub fn build(&self) -> Result<vcf::Header> {
        let mut builder = vcf::Header::builder()
            .set_file_format(FILE_FORMAT)
            .add_filter(PASS, Map::<Filter>::pass());

        for (id, number, ty, description) in INFO_FIELDS {
            builder = builder.add_info(id, Map::<Info>::new(number, ty, description));
        }
        for filter in &self.filters {
            builder = builder.add_filter(
                filter.as_str(),
                Map::<Filter>::new(format!("STRipy filter {filter}")),
            );
        }
        for (id, number, ty, description) in FORMAT_FIELDS {
            builder = builder.add_format(id, Map::<Format>::new(number, ty, description));
        }
        builder = builder.add_alternative_allele(
            STR_ALT_ID,
            Map::<AlternativeAllele>::new("Short tandem repeat"),
        );
        for contig in &self.contigs {
            builder = builder.add_contig(contig.as_str(), Map::<Contig>::new());
        }

        let mut header = builder.add_sample_name(self.sample_name.as_str()).build();

        let key = "source".parse::<Other>().map_err(|err| ConvertError::Header {
            reason: format!("invalid source key: {err}"),
        })?;
        header
            .insert(key, Value::from(SOURCE))
            .map_err(|err| ConvertError::Header {
                reason: format!("cannot add source line: {err}"),
            })?;

        Ok(header)
    }
}
