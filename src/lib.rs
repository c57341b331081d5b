// stripy2vcf - STRipy repeat-expansion reports as structural-variant VCF
//
// This library converts a STRipy JSON report by:
// 1. Reading and normalizing every genotyped locus
// 2. Ordering loci in karyotype order
// 3. Encoding one STR record per locus under a fixed header
// 4. Outputting a bgzip-compressed, tabix-indexed VCF

pub mod contig; // Contig ranking and locus ordering
pub mod convert; // End-to-end conversion pipeline
pub mod coordinates; // Coordinate string parsing
pub mod encoder; // VCF record encoding
pub mod error;
pub mod loader; // Report loading and locus normalization
pub mod output; // Output compression, indexing and publication
pub mod report; // Typed model of the STRipy JSON report
pub mod schema; // Fixed INFO/FORMAT schema and header lines
pub mod types; // Common data structures
pub mod verify; // Indexed read-back of finished output

// Re-export commonly used types for convenience
pub use contig::{ContigRank, compare_contigs, compare_loci, sort_loci};
pub use convert::{
    ConvertConfig, ConvertSummary, convert, resolve_sample_name, sample_name_from_path, write_vcf,
};
pub use coordinates::{Coordinates, normalize_contig, parse_coordinates};
pub use encoder::RecordEncoder;
pub use error::{ConvertError, Result};
pub use loader::{load_loci, normalize_locus, read_report};
pub use output::{BgzOutput, IndexedOutput};
pub use schema::StrHeader;
pub use types::{AlleleCall, NormalizedLocus};
