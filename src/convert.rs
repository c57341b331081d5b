//! End-to-end conversion: report in, indexed VCF out

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::encoder::RecordEncoder;
use crate::error::{ConvertError, Result};
use crate::loader::load_loci;
use crate::output::BgzOutput;
use crate::schema::StrHeader;
use crate::types::NormalizedLocus;
use crate::verify::verify_indexed_output;

const VCF_SUFFIXES: [&str; 4] = [".vcf.gz", ".vcf.bgz", ".vcf", ".gz"];
const FALLBACK_SAMPLE_NAME: &str = "sample";

/// Settings for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sample_name: Option<String>,
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub output: PathBuf,
    pub sample_name: String,
    pub records: usize,
    pub contigs: Vec<String>,
}

/// Derive a sample name from the output file name by dropping its VCF suffix.
pub fn sample_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = VCF_SUFFIXES
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .unwrap_or(&file_name);

    if stem.is_empty() {
        FALLBACK_SAMPLE_NAME.to_string()
    } else {
        stem.to_string()
    }
}

/// Use the override when given, else derive the name from the output path.
pub fn resolve_sample_name(config: &ConvertConfig) -> Result<String> {
    let sample_name = match &config.sample_name {
        Some(name) => name.clone(),
        None => sample_name_from_path(&config.output),
    };

    if sample_name.is_empty() || sample_name.contains(['\t', '\n', '\r']) {
        return Err(ConvertError::SampleName(sample_name));
    }

    Ok(sample_name)
}

/// Write loci as a single-sample, bgzip-compressed and tabix-indexed VCF
///
/// Loci must already be in output order. Returns the published path.
pub fn write_vcf(loci: &[NormalizedLocus], path: &Path, sample_name: &str) -> Result<PathBuf> {
    let header = StrHeader::new(loci, sample_name);
    debug!("Declaring contigs: {}", header.contigs.join(", "));

    let vcf_header = header.build()?;
    let encoder = RecordEncoder::new(&header);
    let mut output = BgzOutput::new(path)?;

    output.write_header(&vcf_header)?;
    for locus in loci {
        output.write_record(&vcf_header, &encoder.encode(locus)?)?;
    }

    let indexed = output.finalize()?;
    verify_indexed_output(
        indexed.data_path(),
        indexed.index_path(),
        &header.contigs,
        loci.len(),
    )?;

    indexed.publish()
}

/// Run a full conversion
pub fn convert(config: &ConvertConfig) -> Result<ConvertSummary> {
    let sample_name = resolve_sample_name(config)?;
    let loci = load_loci(&config.input)?;

    let output = write_vcf(&loci, &config.output, &sample_name)?;
    let contigs = StrHeader::new(&loci, &sample_name).contigs;

    info!(
        "Wrote {} records on {} contigs for sample '{}' to {}",
        loci.len(),
        contigs.len(),
        sample_name,
        output.display()
    );

    Ok(ConvertSummary {
        output,
        sample_name,
        records: loci.len(),
        contigs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(output: &str, sample_name: Option<&str>) -> ConvertConfig {
        ConvertConfig {
            input: PathBuf::from("report.json"),
            output: PathBuf::from(output),
            sample_name: sample_name.map(str::to_string),
        }
    }

    #[test]
    fn test_sample_name_from_path() {
        assert_eq!(sample_name_from_path(Path::new("out/NA12878.vcf.gz")), "NA12878");
        assert_eq!(sample_name_from_path(Path::new("NA12878.vcf.bgz")), "NA12878");
        assert_eq!(sample_name_from_path(Path::new("NA12878.vcf")), "NA12878");
        assert_eq!(sample_name_from_path(Path::new("NA12878.gz")), "NA12878");
        assert_eq!(sample_name_from_path(Path::new("NA12878.str")), "NA12878.str");
        assert_eq!(sample_name_from_path(Path::new(".vcf.gz")), "sample");
    }

    #[test]
    fn test_sample_name_override() {
        assert_eq!(
            resolve_sample_name(&config("x.vcf.gz", Some("HG002"))).unwrap(),
            "HG002"
        );
        assert_eq!(resolve_sample_name(&config("x.vcf.gz", None)).unwrap(), "x");
    }

    #[test]
    fn test_sample_name_with_tab_is_rejected() {
        let err = resolve_sample_name(&config("x.vcf.gz", Some("bad\tname"))).unwrap_err();
        assert!(matches!(err, ConvertError::SampleName(_)));
        assert!(resolve_sample_name(&config("x.vcf.gz", Some(""))).is_err());
    }
}
