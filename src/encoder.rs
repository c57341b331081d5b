//! VCF record building for normalized STR loci
//!
//! Maps each locus onto the fixed INFO/FORMAT schema as a noodles
//! [`RecordBuf`]. Integer fields are range-checked here since the VCF
//! writer stores them as 32-bit values.

use std::fmt;

use noodles::core::Position;
use noodles::vcf::variant::{
    RecordBuf,
    record_buf::{
        AlternateBases, Filters, Ids, Info, Samples,
        info::field::{Value as InfoValue, value::Array as InfoArray},
        samples::{
            Keys,
            sample::{Value as SampleValue, value::Array as SampleArray},
        },
    },
};

use crate::error::{ConvertError, Result};
use crate::schema::{self, StrHeader};
use crate::types::NormalizedLocus;

const REFERENCE_BASE: &str = "N";
const HOM_REF_GENOTYPE: &str = "0/0";

/// An ID column value: whitespace and `;` become `_`.
fn record_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_whitespace() || c == ';' { '_' } else { c })
        .collect()
}

fn rounded_count(repeat_count: f64) -> Option<i32> {
    if repeat_count.is_finite() {
        i32::try_from(repeat_count.round() as i64).ok()
    } else {
        None
    }
}

fn integer<T>(locus: &NormalizedLocus, field: &'static str, value: T) -> Result<i32>
where
    T: Copy + fmt::Display,
    i32: TryFrom<T>,
{
    i32::try_from(value).map_err(|_| {
        ConvertError::invalid_field(
            &locus.id,
            field,
            format!("{value} does not fit a VCF integer"),
        )
    })
}

/// INFO values of a locus in header order, omitting the optional ones that are empty
pub fn info_values(locus: &NormalizedLocus) -> Result<Vec<(&'static str, InfoValue)>> {
    let [a1, a2] = locus.alleles();
    let mut info = vec![
        (
            schema::END,
            InfoValue::Integer(integer(locus, schema::END, locus.end)?),
        ),
        (schema::SVTYPE, InfoValue::String(schema::STR_ALT_ID.to_string())),
    ];

    if !locus.motif.is_empty() {
        info.push((schema::RU, InfoValue::String(locus.motif.clone())));
        if locus.period > 0 {
            info.push((
                schema::PERIOD,
                InfoValue::Integer(integer(locus, schema::PERIOD, locus.period)?),
            ));
        }
    }

    info.extend([
        (
            schema::REPCN,
            InfoValue::Array(InfoArray::Float(vec![
                Some(a1.repeat_count as f32),
                Some(a2.repeat_count as f32),
            ])),
        ),
        (
            schema::REPCI,
            InfoValue::Array(InfoArray::String(vec![
                Some(a1.ci_string()),
                Some(a2.ci_string()),
            ])),
        ),
        (
            schema::OUTLIER,
            InfoValue::Array(InfoArray::Integer(vec![
                Some(i32::from(a1.is_outlier)),
                Some(i32::from(a2.is_outlier)),
            ])),
        ),
        (
            schema::ZSCORE,
            InfoValue::Array(InfoArray::Float(vec![
                Some(a1.z_score as f32),
                Some(a2.z_score as f32),
            ])),
        ),
        (
            schema::DP,
            InfoValue::Integer(integer(locus, schema::DP, locus.coverage)?),
        ),
    ]);

    if !locus.diseases.is_empty() {
        info.push((schema::DISEASES, InfoValue::String(locus.diseases.clone())));
    }

    info.push((schema::LOCUS, InfoValue::String(locus.id.clone())));
    Ok(info)
}

/// Builds records for loci under a fixed header
pub struct RecordEncoder<'h> {
    header: &'h StrHeader,
}

impl<'h> RecordEncoder<'h> {
    pub fn new(header: &'h StrHeader) -> Self {
        Self { header }
    }

    /// Build the VCF record for one locus.
    pub fn encode(&self, locus: &NormalizedLocus) -> Result<RecordBuf> {
        if !self.header.has_contig(&locus.chrom) {
            return Err(ConvertError::UnregisteredContig {
                locus: locus.id.clone(),
                contig: locus.chrom.clone(),
            });
        }

        let position = usize::try_from(locus.pos)
            .ok()
            .and_then(|pos| Position::try_from(pos).ok())
            .ok_or_else(|| {
                ConvertError::invalid_field(
                    &locus.id,
                    "Coordinates",
                    format!("start {} is not a valid position", locus.pos),
                )
            })?;

        let ids: Ids = if locus.id.is_empty() {
            Ids::default()
        } else {
            [record_id(&locus.id)].into_iter().collect()
        };

        let filters: Filters = [schema::sanitize_filter(&locus.filter)]
            .into_iter()
            .collect();

        let info: Info = info_values(locus)?
            .into_iter()
            .map(|(key, value)| (key.to_string(), Some(value)))
            .collect();

        let [a1, a2] = locus.alleles();
        let keys: Keys = schema::FORMAT_FIELDS
            .iter()
            .map(|(id, ..)| id.to_string())
            .collect();
        let samples = Samples::new(
            keys,
            vec![vec![
                Some(SampleValue::String(HOM_REF_GENOTYPE.to_string())),
                Some(SampleValue::Array(SampleArray::Integer(vec![
                    rounded_count(a1.repeat_count),
                    rounded_count(a2.repeat_count),
                ]))),
            ]],
        );

        Ok(RecordBuf::builder()
            .set_reference_sequence_name(locus.chrom.clone())
            .set_variant_start(position)
            .set_ids(ids)
            .set_reference_bases(REFERENCE_BASE)
            .set_alternate_bases(AlternateBases::from(vec![schema::STR_ALLELE.to_string()]))
            .set_filters(filters)
            .set_info(info)
            .set_samples(samples)
            .build())
    }
}
