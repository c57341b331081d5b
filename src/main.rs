//! stripy2vcf - convert a STRipy JSON report into an indexed STR VCF
//!
//! # Usage
//!
//! ```bash
//! stripy2vcf --json NA12878.json -o NA12878.vcf.gz
//! stripy2vcf --json report.json -o out/str.vcf.gz --sample-name NA12878
//! ```
//!
//! Writes `<out>` and `<out>.tbi`. Logging is controlled with `RUST_LOG`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use stripy2vcf::{ConvertConfig, convert};

/// Convert STRipy JSON output into a VCF with SV-style STR annotations
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// STRipy JSON report
    #[arg(long)]
    json: PathBuf,

    /// Output VCF, written bgzip-compressed with a tabix index alongside
    #[arg(short, long)]
    out: PathBuf,

    /// Sample name for the VCF column (default: output file name without its VCF suffix)
    #[arg(long)]
    sample_name: Option<String>,
}

impl From<Args> for ConvertConfig {
    fn from(args: Args) -> Self {
        ConvertConfig {
            input: args.json,
            output: args.out,
            sample_name: args.sample_name,
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = ConvertConfig::from(args);
    info!("Input report: {:?}", config.input);
    info!("Output file: {:?}", config.output);

    convert(&config)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Args::parse()) {
        error!("{err}");
        std::process::exit(1);
    }
}
