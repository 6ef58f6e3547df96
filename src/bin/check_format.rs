//! Report the quality encoding of a FASTQ file.
//!
//! ```bash
//! fastq-check-format reads.fastq
//! # fail unless every file is Illumina 1.3-1.7 (or ambiguous)
//! fastq-check-format a.fastq b.fastq.gz --expect illumina13 --expect ambiguous
//! ```

use anyhow::Result;
use clap::Parser;
use fastq_prep::{ClassifyOptions, SamplingPolicy, check_format, classify_file, parse_targets};
use std::path::PathBuf;

/// Verify that FASTQ input is in Illumina 1.3-1.7 format
#[derive(Parser)]
#[command(name = "fastq-check-format", version)]
struct Args {
    /// Input FASTQ file(s), plain or gzip
    #[arg(required = true)]
    fastq: Vec<PathBuf>,

    /// Accepted encodings (illumina13, illumina18, ambiguous); repeatable
    #[arg(short, long)]
    expect: Vec<String>,

    /// Number of leading records to sample
    #[arg(short = 'n', long, default_value_t = 10)]
    max_entries: usize,

    /// Decide from the first record only
    #[arg(long)]
    first_only: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let sampling = if args.first_only {
        SamplingPolicy::FirstRecord
    } else {
        SamplingPolicy::Consensus
    };
    let opts = ClassifyOptions::default()
        .max_entries(args.max_entries)
        .sampling(sampling);

    if args.expect.is_empty() {
        for path in &args.fastq {
            let verdict = classify_file(path, &opts)?;
            if args.fastq.len() > 1 {
                print!("{}: ", path.display());
            }
            println!("{}", verdict.verdict());
        }
    } else {
        let targets = parse_targets(args.expect.iter().map(String::as_str))?;
        check_format(args.fastq.as_slice(), &targets, &opts)?;
        log::info!("all {} file(s) match {:?}", args.fastq.len(), targets);
    }
    Ok(())
}
