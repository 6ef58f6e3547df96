use crate::encoding::QualityEncoding;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

impl IoContext {
    /// Count one raw line of `n` bytes and strip its `\n` or `\r\n` ending.
    pub(crate) fn advance(&mut self, buf: &mut String, n: usize) {
        self.line_num += 1;
        self.byte_pos += n as u64;
        if buf.ends_with('\n') {
            buf.pop();
        }
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
}

/// Structural violations of the 4-line record layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected header '@' at start of record")]
    MissingHeader,
    #[error("found FASTA header '>' where FASTQ '@' expected")]
    FastaHeaderDetected,
    #[error("missing '+' separator line")]
    MissingPlus,
    #[error("input ends inside a record ({lines} of 4 lines read)")]
    TruncatedRecord { lines: usize },
    #[error("quality length ({qual}) does not match sequence length ({seq})")]
    LengthMismatch { seq: usize, qual: usize },
}

/// Failures of the `@<id>#<BARCODE>/<mate>` header grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("header does not start with '@'")]
    MissingAt,
    #[error("header has an empty read id")]
    EmptyId,
    #[error("header has no '#<barcode>' field")]
    MissingBarcode,
    #[error("header has an empty barcode")]
    EmptyBarcode,
    #[error("header barcode is not followed by '/<mate>'")]
    MissingMate,
    #[error("header mate number '{0}' is not a small integer")]
    InvalidMate(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("quality line doesn't match a known encoding: {line}")]
pub struct EncodingError {
    pub line: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("could not verify format after {max_entries} entries")]
    NoRecords { max_entries: usize },
    #[error(
        "sampled records disagree: {illumina13} look like illumina13, {illumina18} like illumina18"
    )]
    Conflicting { illumina13: usize, illumina18: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unrecognized format type: {0}")]
    UnknownEncoding(String),
    #[error("primer must not be empty")]
    EmptyPrimer,
    #[error("mismatch threshold {max_primer_diffs} exceeds primer length {primer_len}")]
    ThresholdTooLarge {
        max_primer_diffs: usize,
        primer_len: usize,
    },
    #[error("max_entries must be at least 1")]
    ZeroMaxEntries,
    #[error("barcode map line {line} is not 'BARCODE SAMPLE'")]
    MalformedBarcodeMap { line: usize },
    #[error("barcode {0} is listed twice in the barcode map")]
    DuplicateBarcode(String),
}

/// Every checked file whose verdict fell outside the accepted encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatMismatches {
    pub expected: Vec<QualityEncoding>,
    pub files: Vec<(PathBuf, QualityEncoding)>,
}

impl fmt::Display for FormatMismatches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "files do not appear to be in {:?} format:", self.expected)?;
        for (path, found) in &self.files {
            write!(f, "\n{} {found}", path.display())?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum FastqError {
    #[error("I/O error at {ctx:?}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("format error at {ctx:?}: {source}")]
    Format {
        #[source]
        source: FormatError,
        ctx: IoContext,
    },
    #[error("bad header in record {record}: {source}")]
    Header {
        #[source]
        source: HeaderError,
        record: u64,
    },
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Verification(#[from] VerificationError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("{0}")]
    UnexpectedFormat(FormatMismatches),
}

impl FastqError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn fmt_err(source: FormatError, ctx: IoContext) -> Self {
        Self::Format { source, ctx }
    }
    pub(crate) fn header_err(source: HeaderError, record: u64) -> Self {
        Self::Header { source, record }
    }

    /// Malformed record structure, including unparsable headers.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. } | Self::Header { .. })
    }
}
