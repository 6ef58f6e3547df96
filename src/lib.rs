//! Streaming FASTQ preprocessing ahead of sequence clustering.
//!
//! - Strict 4-line record reader over plain or `.gz` input (`gzip` feature).
//! - Quality-encoding check: Illumina 1.3-1.7 vs 1.8, or ambiguous.
//! - Primer removal by ungapped mismatch search near the read start.
//! - Per-sample barcode tallies from `@id#BARCODE/mate` headers.
//! - Optional async reader behind the `async` feature; CLIs behind `cli`.

pub mod barcode;
pub mod encoding;
pub mod error;
pub mod header;
pub mod options;
pub mod primer;
pub mod reader;
pub mod record;
pub mod trim;
pub mod writer;
mod util;

#[cfg(feature = "async")]
pub mod async_reader;

pub use crate::barcode::{BarcodeMap, Counts, count_barcodes, load_barcode_map};
pub use crate::encoding::{
    EncodingClassifier, ILLUMINA13_CODES, ILLUMINA18_CODES, QualityAlphabet, QualityEncoding,
    check_format, classify_file, classify_records, parse_targets, quality_line_format,
};
pub use crate::error::{
    ConfigError, EncodingError, FastqError, FormatError, FormatMismatches, HeaderError,
    IoContext, VerificationError,
};
pub use crate::header::ReadHeader;
pub use crate::options::{ClassifyOptions, SamplingPolicy, TrimOptions};
pub use crate::primer::{PrimerMatch, locate};
pub use crate::reader::{FastqReader, Source};
pub use crate::record::FastqRecord;
pub use crate::trim::{PrimerTrimmer, RejectReason, TrimOutcome, TrimStats, trim_record};
pub use crate::writer::{OutputFormat, RecordWriter};

#[cfg(feature = "async")]
pub use crate::async_reader::AsyncFastqReader;
