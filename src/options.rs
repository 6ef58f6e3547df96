use crate::encoding::{ILLUMINA13_CODES, ILLUMINA18_CODES, QualityAlphabet};
use crate::error::ConfigError;
use crate::writer::OutputFormat;

/// Search limit for the primer start offset used by the trimmer.
pub const DEFAULT_SEARCH_WINDOW: usize = 15;

/// Records sampled from the start of a file when classifying its encoding.
pub const DEFAULT_MAX_ENTRIES: usize = 10;

/// How sampled records are turned into one file-level verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingPolicy {
    /// The first record decides; later records are never read.
    FirstRecord,
    /// Classify up to `max_entries` records and require them to agree
    /// (ambiguous records agree with either side).
    Consensus,
}

#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    pub max_entries: usize,
    pub sampling: SamplingPolicy,
    pub illumina13: QualityAlphabet,
    pub illumina18: QualityAlphabet,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            sampling: SamplingPolicy::Consensus,
            illumina13: ILLUMINA13_CODES,
            illumina18: ILLUMINA18_CODES,
        }
    }
}

impl ClassifyOptions {
    pub fn max_entries(mut self, n: usize) -> Self {
        self.max_entries = n;
        self
    }

    pub fn sampling(mut self, sampling: SamplingPolicy) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn alphabets(mut self, illumina13: QualityAlphabet, illumina18: QualityAlphabet) -> Self {
        self.illumina13 = illumina13;
        self.illumina18 = illumina18;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 {
            return Err(ConfigError::ZeroMaxEntries);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TrimOptions {
    pub primer: Vec<u8>,
    /// Inclusive upper bound on primer mismatches for an accepted read.
    pub max_primer_diffs: usize,
    pub search_window: usize,
    pub output: OutputFormat,
}

impl TrimOptions {
    pub fn new(primer: impl Into<Vec<u8>>) -> Self {
        Self {
            primer: primer.into(),
            max_primer_diffs: 0,
            search_window: DEFAULT_SEARCH_WINDOW,
            output: OutputFormat::Fastq,
        }
    }

    pub fn max_primer_diffs(mut self, n: usize) -> Self {
        self.max_primer_diffs = n;
        self
    }

    pub fn search_window(mut self, w: usize) -> Self {
        self.search_window = w;
        self
    }

    pub fn output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primer.is_empty() {
            return Err(ConfigError::EmptyPrimer);
        }
        if self.max_primer_diffs > self.primer.len() {
            return Err(ConfigError::ThresholdTooLarge {
                max_primer_diffs: self.max_primer_diffs,
                primer_len: self.primer.len(),
            });
        }
        Ok(())
    }
}
