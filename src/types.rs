// Common data structures shared by the loader and the encoder

/// One allele call of a locus after numeric coercion
#[derive(Debug, Clone, PartialEq)]
pub struct AlleleCall {
    pub repeat_count: f64, // NaN when the report value is not a number
    pub ci_min: String,    // Raw lower CI bound, not coerced
    pub ci_max: String,    // Raw upper CI bound, not coerced
    pub is_outlier: u8,    // 0 or 1
    pub z_score: f64,      // NaN when the report value is not a number
}

impl AlleleCall {
    /// Confidence interval rendered as `min-max`
    pub fn ci_string(&self) -> String {
        format!("{}-{}", self.ci_min, self.ci_max)
    }
}

/// A genotyped STR locus in canonical form
///
/// Built once per report entry by the loader and consumed once by the encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLocus {
    pub chrom: String, // Always carries a single `chr` prefix
    pub pos: u64,      // 1-based inclusive start
    pub end: u64,      // 1-based inclusive end
    pub id: String,
    pub motif: String,
    pub period: usize,
    pub allele1: AlleleCall,
    pub allele2: AlleleCall,
    pub coverage: i64,
    pub filter: String,
    pub diseases: String, // Sorted, deduplicated, `|`-joined
}

impl NormalizedLocus {
    /// Both allele calls in output order
    pub fn alleles(&self) -> [&AlleleCall; 2] {
        [&self.allele1, &self.allele2]
    }

    /// Region string used in log messages, e.g. `chr4:3074877-3074933`
    pub fn region_string(&self) -> String {
        format!("{}:{}-{}", self.chrom, self.pos, self.end)
    }
}
