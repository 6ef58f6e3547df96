//! Quality-score encoding classification.
//!
//! A quality line is compared against two fixed character sets: the legacy
//! high-offset Illumina 1.3-1.7 codes (`B` to `h`) and the modern low-offset
//! Illumina 1.8 codes (`"` to `J`). Lines drawn only from the overlap
//! (`B` to `J`) are ambiguous.

use crate::error::{
    ConfigError, EncodingError, FastqError, FormatMismatches, VerificationError,
};
use crate::options::{ClassifyOptions, SamplingPolicy};
use crate::reader::FastqReader;
use crate::record::FastqRecord;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A set of ASCII quality characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityAlphabet {
    bits: [u64; 2],
}

impl QualityAlphabet {
    pub const fn empty() -> Self {
        Self { bits: [0; 2] }
    }

    /// Every character from `lo` to `hi` inclusive (ASCII only).
    pub const fn range(lo: u8, hi: u8) -> Self {
        let mut bits = [0u64; 2];
        let mut c = lo;
        while c <= hi && c < 128 {
            bits[(c / 64) as usize] |= 1 << (c % 64);
            c += 1;
        }
        Self { bits }
    }

    pub fn from_chars(chars: &[u8]) -> Self {
        let mut set = Self::empty();
        for &c in chars.iter().filter(|c| c.is_ascii()) {
            set.bits[(c / 64) as usize] |= 1 << (c % 64);
        }
        set
    }

    #[inline]
    pub fn contains(&self, c: u8) -> bool {
        c < 128 && self.bits[(c / 64) as usize] & (1 << (c % 64)) != 0
    }

    pub fn matches_all(&self, line: &[u8]) -> bool {
        line.iter().all(|&c| self.contains(c))
    }
}

/// Illumina 1.3-1.7, phred+64.
pub const ILLUMINA13_CODES: QualityAlphabet = QualityAlphabet::range(b'B', b'h');
/// Illumina 1.8+, phred+33.
pub const ILLUMINA18_CODES: QualityAlphabet = QualityAlphabet::range(b'"', b'J');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityEncoding {
    Illumina13,
    Illumina18,
    Ambiguous,
}

impl QualityEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Illumina13 => "illumina13",
            Self::Illumina18 => "illumina18",
            Self::Ambiguous => "ambiguous",
        }
    }

    /// Human-readable advice printed by the format checker.
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Illumina13 => "Looks like Illumina 1.3-1.7 format. Proceed with the pipeline!",
            Self::Illumina18 => "Looks like Illumina 1.8 format. You may need to convert. Beware...",
            Self::Ambiguous => {
                "Could be either 1.3-1.7 or 1.8 format. Ambiguous. Proceed with caution."
            }
        }
    }
}

impl fmt::Display for QualityEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "illumina13" => Ok(Self::Illumina13),
            "illumina18" => Ok(Self::Illumina18),
            "ambiguous" => Ok(Self::Ambiguous),
            other => Err(ConfigError::UnknownEncoding(other.to_string())),
        }
    }
}

/// Per-line classifier over a pair of alphabets.
#[derive(Debug, Clone, Copy)]
pub struct EncodingClassifier {
    illumina13: QualityAlphabet,
    illumina18: QualityAlphabet,
}

impl Default for EncodingClassifier {
    fn default() -> Self {
        Self::new(ILLUMINA13_CODES, ILLUMINA18_CODES)
    }
}

impl EncodingClassifier {
    pub fn new(illumina13: QualityAlphabet, illumina18: QualityAlphabet) -> Self {
        Self {
            illumina13,
            illumina18,
        }
    }

    pub fn from_options(opts: &ClassifyOptions) -> Self {
        Self::new(opts.illumina13, opts.illumina18)
    }

    pub fn classify_line(&self, line: &[u8]) -> Result<QualityEncoding, EncodingError> {
        match (
            self.illumina13.matches_all(line),
            self.illumina18.matches_all(line),
        ) {
            (true, true) => Ok(QualityEncoding::Ambiguous),
            (true, false) => Ok(QualityEncoding::Illumina13),
            (false, true) => Ok(QualityEncoding::Illumina18),
            (false, false) => Err(EncodingError {
                line: String::from_utf8_lossy(line).into_owned(),
            }),
        }
    }

    /// Classify one record; its header needs a read id, nothing more.
    fn classify_record(
        &self,
        rec: &FastqRecord,
        index: u64,
    ) -> Result<QualityEncoding, FastqError> {
        rec.read_id().map_err(|e| FastqError::header_err(e, index))?;
        let enc = self.classify_line(&rec.qual)?;
        log::debug!("record {index} ({}) classified as {enc}", rec.header);
        Ok(enc)
    }
}

/// Classify a single quality line with the default alphabets.
pub fn quality_line_format(line: &[u8]) -> Result<QualityEncoding, EncodingError> {
    EncodingClassifier::default().classify_line(line)
}

/// File-level verdict from records sampled at the start of a stream.
pub fn classify_records<I>(
    records: I,
    opts: &ClassifyOptions,
) -> Result<QualityEncoding, FastqError>
where
    I: IntoIterator<Item = Result<FastqRecord, FastqError>>,
{
    opts.validate()?;
    let classifier = EncodingClassifier::from_options(opts);
    let mut sample = records.into_iter().take(opts.max_entries);

    let verdict = match opts.sampling {
        SamplingPolicy::FirstRecord => match sample.next() {
            Some(rec) => classifier.classify_record(&rec?, 0)?,
            None => {
                return Err(VerificationError::NoRecords {
                    max_entries: opts.max_entries,
                }
                .into());
            }
        },
        SamplingPolicy::Consensus => {
            let mut tally = Tally::default();
            for (i, rec) in sample.enumerate() {
                tally.add(classifier.classify_record(&rec?, i as u64)?);
            }
            tally.verdict(opts.max_entries)?
        }
    };

    log::info!("quality encoding verdict: {verdict}");
    Ok(verdict)
}

/// Open `path` (plain or gzip) and classify its leading records.
pub fn classify_file<P: AsRef<Path>>(
    path: P,
    opts: &ClassifyOptions,
) -> Result<QualityEncoding, FastqError> {
    let reader = FastqReader::from_path(path)?;
    classify_records(reader, opts)
}

/// Parse target names such as `"illumina13"`; unknown names are rejected.
pub fn parse_targets<'a, I>(names: I) -> Result<Vec<QualityEncoding>, ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().map(str::parse).collect()
}

/// Classify every file; fail with all of those whose verdict is not one of
/// `targets`.
pub fn check_format<P: AsRef<Path>>(
    paths: &[P],
    targets: &[QualityEncoding],
    opts: &ClassifyOptions,
) -> Result<(), FastqError> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let found = classify_file(path, opts)?;
        if targets.contains(&found) {
            log::debug!("{} is {found}", path.display());
        } else {
            log::warn!("{} is {found}, expected one of {targets:?}", path.display());
            files.push((path.to_path_buf(), found));
        }
    }
    if files.is_empty() {
        Ok(())
    } else {
        Err(FastqError::UnexpectedFormat(FormatMismatches {
            expected: targets.to_vec(),
            files,
        }))
    }
}

#[derive(Debug, Default)]
struct Tally {
    illumina13: usize,
    illumina18: usize,
    ambiguous: usize,
}

impl Tally {
    fn add(&mut self, enc: QualityEncoding) {
        match enc {
            QualityEncoding::Illumina13 => self.illumina13 += 1,
            QualityEncoding::Illumina18 => self.illumina18 += 1,
            QualityEncoding::Ambiguous => self.ambiguous += 1,
        }
    }

    fn verdict(&self, max_entries: usize) -> Result<QualityEncoding, VerificationError> {
        match (self.illumina13, self.illumina18, self.ambiguous) {
            (0, 0, 0) => Err(VerificationError::NoRecords { max_entries }),
            (0, 0, _) => Ok(QualityEncoding::Ambiguous),
            (_, 0, _) => Ok(QualityEncoding::Illumina13),
            (0, _, _) => Ok(QualityEncoding::Illumina18),
            (illumina13, illumina18, _) => Err(VerificationError::Conflicting {
                illumina13,
                illumina18,
            }),
        }
    }
}
