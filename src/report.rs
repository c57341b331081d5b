//! Typed model of the STRipy JSON report
//!
//! Each level of the document has its own record so that a missing or
//! mistyped field fails with the name of the field. Fields whose JSON type
//! varies between STRipy releases are kept as `serde_json::Value` and coerced
//! by the loader.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Top level of the report
#[derive(Debug, Deserialize)]
pub struct Report {
    /// Each entry maps locus names to locus bodies, in document order
    #[serde(rename = "GenotypingResults")]
    pub genotyping_results: Vec<Map<String, Value>>,
}

/// Body of one genotyped locus
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocusReport {
    pub targeted_locus: TargetedLocus,
    pub alleles: Vec<AlleleReport>,
    pub metadata: Metadata,
    /// Required key, `null` allowed
    #[serde(deserialize_with = "Option::deserialize")]
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetedLocus {
    pub coordinates: String,
    #[serde(default)]
    pub motif: Option<String>,
    #[serde(rename = "LocusID", default)]
    pub locus_id: Option<Value>,
    pub corresponding_disease: BTreeMap<String, DiseaseReport>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiseaseReport {
    pub disease_symbol: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlleleReport {
    pub repeats: Value,
    #[serde(rename = "CI")]
    pub ci: ConfidenceInterval,
    pub is_population_outlier: Value,
    pub population_zscore: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfidenceInterval {
    #[serde(default)]
    pub min: Option<Value>,
    #[serde(default)]
    pub max: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Metadata {
    pub coverage: Value,
}
