//! Tally reads per sample from `@id#BARCODE/mate` headers.
//!
//! ```bash
//! fastq-count-barcodes reads.fastq barcodes.txt -n 100000
//! ```
//!
//! The barcode map holds one `BARCODE SAMPLE` pair per line.

use anyhow::{Context, Result};
use clap::Parser;
use fastq_prep::{FastqReader, count_barcodes, load_barcode_map};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Count how many reads carry each known barcode
#[derive(Parser)]
#[command(name = "fastq-count-barcodes", version)]
struct Args {
    /// Input FASTQ file, plain or gzip
    fastq: PathBuf,

    /// Barcode map: `BARCODE SAMPLE` per line
    barcodes: PathBuf,

    /// Stop after this many records
    #[arg(short = 'n', long)]
    max_entries: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let map_file = File::open(&args.barcodes)
        .with_context(|| format!("opening {}", args.barcodes.display()))?;
    let map = load_barcode_map(BufReader::new(map_file))?;

    let reader = FastqReader::from_path(&args.fastq)
        .with_context(|| format!("opening {}", args.fastq.display()))?;
    let counts = count_barcodes(reader, &map, args.max_entries)?;

    print!("{counts}");
    Ok(())
}
