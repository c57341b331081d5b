//! Error types for the STRipy to VCF conversion

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("cannot read report {}: {source}", .path.display())]
    ReadReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("report {} is not a valid genotyping report: {source}", .path.display())]
    ParseReport {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("locus {locus}: {source}")]
    LocusSchema {
        locus: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("locus {locus}: malformed coordinates {coordinates:?}, expected [chr]<contig>:<start>-<end>")]
    Coordinates { locus: String, coordinates: String },

    #[error("locus {locus}: invalid {field}: {reason}")]
    InvalidField {
        locus: String,
        field: &'static str,
        reason: String,
    },

    #[error("record for locus {locus} references contig {contig} which is not declared in the header")]
    UnregisteredContig { locus: String, contig: String },

    #[error("cannot build VCF header: {reason}")]
    Header { reason: String },

    #[error("invalid sample name {0:?}: must not contain tabs or line breaks")]
    SampleName(String),

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot index {}: {source}", .path.display())]
    Index {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("verification of {} failed: {reason}", .path.display())]
    Verify { path: PathBuf, reason: String },
}

impl ConvertError {
    pub(crate) fn invalid_field(
        locus: &str,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        ConvertError::InvalidField {
            locus: locus.to_string(),
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
