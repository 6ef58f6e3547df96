//! Strip a primer from the start of each read.
//!
//! ```bash
//! fastq-remove-primers reads.fastq ACGTACGT -m 1 -l primers.log > trimmed.fastq
//! ```
//!
//! Reads whose best primer placement (start offset 0..=15) has more than
//! `-m` mismatches are dropped. `RUST_LOG=debug` logs each rejected read.

use anyhow::{Context, Result};
use clap::Parser;
use fastq_prep::{FastqReader, OutputFormat, PrimerTrimmer, TrimOptions};
use std::io;
use std::path::PathBuf;

/// Remove well-matched primers from reads in a FASTQ file
#[derive(Parser)]
#[command(name = "fastq-remove-primers", version)]
struct Args {
    /// Input FASTQ file, plain or gzip
    fastq: PathBuf,

    /// Primer sequence
    primer: String,

    /// Maximum number of nucleotide mismatches in the primer
    #[arg(short, long, default_value_t = 0)]
    max_primer_diffs: usize,

    /// Log file for successes, failures, and time elapsed
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Write `header<TAB>sequence<TAB>quality` lines instead of FASTQ
    #[arg(long)]
    fields: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let output = if args.fields {
        OutputFormat::Fields
    } else {
        OutputFormat::Fastq
    };
    let opts = TrimOptions::new(args.primer.into_bytes())
        .max_primer_diffs(args.max_primer_diffs)
        .output(output);

    let reader = FastqReader::from_path(&args.fastq)
        .with_context(|| format!("opening {}", args.fastq.display()))?;
    let stats = PrimerTrimmer::new(reader, opts)?.run(io::stdout().lock())?;

    if let Some(log) = &args.log {
        stats
            .write_log(log)
            .with_context(|| format!("writing {}", log.display()))?;
    }
    Ok(())
}
