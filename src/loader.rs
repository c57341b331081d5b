//! Report loading and locus normalization
//!
//! This module provides functionality for:
//! - Reading and deserializing the STRipy JSON report
//! - Converting each genotyped locus into a [`NormalizedLocus`]
//! - Ordering the loci for position-sorted output

use std::{collections::BTreeSet, fs::File, io::BufReader, path::Path};

use log::{debug, info, warn};
use serde_json::Value;

use crate::contig::sort_loci;
use crate::coordinates::parse_coordinates;
use crate::error::{ConvertError, Result};
use crate::report::{AlleleReport, LocusReport, Report};
use crate::types::{AlleleCall, NormalizedLocus};

/// Load a report and return its loci in output order
///
/// Any schema or coordinate error aborts the whole load; numeric fields that
/// cannot be parsed become NaN instead.
pub fn load_loci(path: &Path) -> Result<Vec<NormalizedLocus>> {
    info!("Loading STRipy report {}", path.display());
    let report = read_report(path)?;

    let mut loci = normalize_report(report)?;
    sort_loci(&mut loci);

    info!("Loaded {} loci", loci.len());
    Ok(loci)
}

/// Read and deserialize the report document.
pub fn read_report(path: &Path) -> Result<Report> {
    let file = File::open(path).map_err(|source| ConvertError::ReadReport {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ConvertError::ParseReport {
        path: path.to_path_buf(),
        source,
    })
}

/// Normalize every locus of every entry, in document order.
pub fn normalize_report(report: Report) -> Result<Vec<NormalizedLocus>> {
    let mut loci = Vec::new();

    for entry in report.genotyping_results {
        for (locus_name, body) in entry {
            loci.push(normalize_locus(&locus_name, body)?);
        }
    }

    Ok(loci)
}

/// Convert one locus body into its canonical form.
pub fn normalize_locus(locus_name: &str, body: Value) -> Result<NormalizedLocus> {
    let locus: LocusReport =
        serde_json::from_value(body).map_err(|source| ConvertError::LocusSchema {
            locus: locus_name.to_string(),
            source,
        })?;
    let targeted = &locus.targeted_locus;

    let id = resolve_locus_id(locus_name, targeted.locus_id.as_ref());

    let coordinates =
        parse_coordinates(&targeted.coordinates).ok_or_else(|| ConvertError::Coordinates {
            locus: id.clone(),
            coordinates: targeted.coordinates.clone(),
        })?;

    let [allele1, allele2] = match <[AlleleReport; 2]>::try_from(locus.alleles) {
        Ok(alleles) => alleles,
        Err(alleles) => {
            return Err(ConvertError::invalid_field(
                &id,
                "Alleles",
                format!("expected 2 alleles, found {}", alleles.len()),
            ));
        }
    };
    let allele1 = allele_call(&id, &allele1)?;
    let allele2 = allele_call(&id, &allele2)?;

    let motif = targeted.motif.clone().unwrap_or_default();
    let period = motif.chars().count();

    let diseases = join_diseases(
        targeted
            .corresponding_disease
            .values()
            .map(|disease| disease.disease_symbol.as_str()),
    );

    let normalized = NormalizedLocus {
        chrom: coordinates.chrom,
        pos: coordinates.start,
        end: coordinates.end,
        coverage: coerce_coverage(&id, &locus.metadata.coverage)?,
        filter: locus.filter.unwrap_or_default(),
        id,
        motif,
        period,
        allele1,
        allele2,
        diseases,
    };

    if normalized.pos > normalized.end {
        warn!(
            "Locus {} has start after end ({}), passing through unchanged",
            normalized.id,
            normalized.region_string()
        );
    }
    debug!(
        "  Normalized locus {} at {} (motif: '{}', diseases: '{}')",
        normalized.id,
        normalized.region_string(),
        normalized.motif,
        normalized.diseases
    );

    Ok(normalized)
}

fn allele_call(locus: &str, allele: &AlleleReport) -> Result<AlleleCall> {
    let repeat_count = coerce_float(&allele.repeats);
    if repeat_count.is_nan() {
        warn!("Locus {locus}: repeat count {} is not a number, writing NaN", allele.repeats);
    }

    let z_score = coerce_float(&allele.population_zscore);
    if z_score.is_nan() {
        warn!(
            "Locus {locus}: Z-score {} is not a number, writing NaN",
            allele.population_zscore
        );
    }

    Ok(AlleleCall {
        repeat_count,
        ci_min: ci_bound(allele.ci.min.as_ref()),
        ci_max: ci_bound(allele.ci.max.as_ref()),
        is_outlier: coerce_outlier(locus, &allele.is_population_outlier)?,
        z_score,
    })
}

/// Use the explicit locus id when present and non-empty, else the report key.
pub fn resolve_locus_id(locus_name: &str, locus_id: Option<&Value>) -> String {
    match locus_id {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) if id.as_f64() != Some(0.0) => id.to_string(),
        _ => locus_name.to_string(),
    }
}

/// Parse a repeat count or Z-score, yielding NaN for anything non-numeric.
///
/// Booleans count as 1 and 0.
pub fn coerce_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Map the population-outlier indicator to 0 or 1.
///
/// Booleans map directly and numbers are 1 when non-zero. Strings must be a
/// recognised yes/no token; `"false"` is 0. Null, other strings and
/// containers are errors.
pub fn coerce_outlier(locus: &str, value: &Value) -> Result<u8> {
    const FIELD: &str = "IsPopulationOutlier";

    match value {
        Value::Bool(flag) => Ok(u8::from(*flag)),
        Value::Number(n) => Ok(u8::from(n.as_f64().is_some_and(|x| x != 0.0))),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Ok(1),
            "false" | "f" | "no" | "n" | "0" | "" => Ok(0),
            _ => Err(ConvertError::invalid_field(
                locus,
                FIELD,
                format!("unrecognized flag {s:?}"),
            )),
        },
        Value::Null => Err(ConvertError::invalid_field(locus, FIELD, "value is null")),
        other => Err(ConvertError::invalid_field(
            locus,
            FIELD,
            format!("expected a boolean, found {other}"),
        )),
    }
}

/// Render a confidence-interval bound as written in the report.
fn ci_bound(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read the locus depth; fractional depths are rounded.
pub fn coerce_coverage(locus: &str, value: &Value) -> Result<i64> {
    let depth = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|depth| depth.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|depth| depth.is_finite())
                    .map(|depth| depth.round() as i64)
            })
        }
        _ => None,
    };

    depth.ok_or_else(|| {
        ConvertError::invalid_field(locus, "Coverage", format!("expected a number, found {value}"))
    })
}

/// Deduplicate, sort and `|`-join disease symbols. Empty symbols are skipped.
pub fn join_diseases<'a>(symbols: impl IntoIterator<Item = &'a str>) -> String {
    symbols
        .into_iter()
        .filter(|symbol| !symbol.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join("|")
}
