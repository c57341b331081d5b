//! Indexed read-back of a finished output
//!
//! Before an output is published it is reopened through its tabix index:
//! the declared contigs must match and every contig must be queryable, with
//! the per-contig record counts adding up to the number of loci written.

use std::path::Path;

use log::debug;
use noodles::core::Region;
use noodles::{tabix, vcf};

use crate::error::{ConvertError, Result};

/// Check a compressed VCF and its tabix index against what was written
pub fn verify_indexed_output(
    vcf_path: &Path,
    index_path: &Path,
    expected_contigs: &[String],
    expected_records: usize,
) -> Result<()> {
    let fail = |reason: String| ConvertError::Verify {
        path: vcf_path.to_path_buf(),
        reason,
    };
    let io_fail = |err: std::io::Error| fail(err.to_string());

    let index = tabix::fs::read(index_path).map_err(io_fail)?;
    let mut indexed_reader = vcf::io::indexed_reader::Builder::default()
        .set_index(index)
        .build_from_path(vcf_path)
        .map_err(io_fail)?;

    let header = indexed_reader.read_header().map_err(io_fail)?;

    let contigs: Vec<String> = header.contigs().keys().cloned().collect();
    if contigs != expected_contigs {
        return Err(fail(format!(
            "header declares contigs {contigs:?}, expected {expected_contigs:?}"
        )));
    }

    let mut records = 0;
    for contig in &contigs {
        let region = Region::new(contig.as_str(), ..);
        let query = indexed_reader.query(&header, &region).map_err(io_fail)?;

        let mut contig_records = 0;
        for result in query {
            result.map_err(io_fail)?;
            contig_records += 1;
        }

        debug!("  Indexed query {contig} returned {contig_records} records");
        records += contig_records;
    }

    if records != expected_records {
        return Err(fail(format!(
            "indexed queries returned {records} records, expected {expected_records}"
        )));
    }

    Ok(())
}
