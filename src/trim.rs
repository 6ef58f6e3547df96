//! Primer removal as a per-record transformation.
//!
//! [`PrimerTrimmer`] yields one [`TrimOutcome`] per input record; counting
//! successes and failures is a fold over those outcomes ([`TrimStats`]).

use crate::error::FastqError;
use crate::options::TrimOptions;
use crate::primer::{PrimerMatch, locate};
use crate::record::FastqRecord;
use crate::writer::RecordWriter;

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Best placement in the window still has too many mismatches.
    TooManyMismatches { best: PrimerMatch, allowed: usize },
    /// Read is shorter than the primer.
    TooShort { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimOutcome {
    Accepted(FastqRecord),
    Rejected(RejectReason),
}

impl TrimOutcome {
    pub fn accepted(self) -> Option<FastqRecord> {
        match self {
            Self::Accepted(rec) => Some(rec),
            Self::Rejected(_) => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Trim one record: drop everything through the matched primer, reset the
/// separator to a bare `+`, keep the header.
pub fn trim_record(rec: FastqRecord, opts: &TrimOptions) -> TrimOutcome {
    let Some(hit) = locate(&rec.seq, &opts.primer, opts.search_window) else {
        return TrimOutcome::Rejected(RejectReason::TooShort { len: rec.len() });
    };
    if hit.mismatches > opts.max_primer_diffs {
        return TrimOutcome::Rejected(RejectReason::TooManyMismatches {
            best: hit,
            allowed: opts.max_primer_diffs,
        });
    }

    let end = hit.end(opts.primer.len());
    let FastqRecord {
        header,
        mut seq,
        mut qual,
        ..
    } = rec;
    seq.drain(..end);
    qual.drain(..end);
    TrimOutcome::Accepted(FastqRecord {
        header,
        seq,
        separator: "+".to_string(),
        qual,
    })
}

/// Running success/failure totals plus the wall-clock time of a full pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimStats {
    pub successes: u64,
    pub failures: u64,
    pub elapsed: Duration,
}

impl TrimStats {
    pub fn record(&mut self, outcome: &TrimOutcome) {
        match outcome {
            TrimOutcome::Accepted(_) => self.successes += 1,
            TrimOutcome::Rejected(_) => self.failures += 1,
        }
    }

    pub fn fold<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a TrimOutcome>,
    {
        outcomes.into_iter().fold(Self::default(), |mut stats, o| {
            stats.record(o);
            stats
        })
    }

    pub fn total(&self) -> u64 {
        self.successes + self.failures
    }

    pub fn failure_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.failures as f64 / self.total() as f64
        }
    }

    /// Plain-text summary suitable for a log file.
    pub fn diagnostic_message(&self) -> String {
        self.to_string()
    }

    pub fn write_log<P: AsRef<Path>>(&self, path: P) -> Result<(), FastqError> {
        fs::write(path, self.diagnostic_message()).map_err(FastqError::Output)
    }
}

impl fmt::Display for TrimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Primer removal:")?;
        writeln!(
            f,
            "{} successes and {} failures ({:.2}% failure rate)",
            self.successes,
            self.failures,
            self.failure_rate() * 100.0
        )?;
        writeln!(f, "{:.6} seconds elapsed", self.elapsed.as_secs_f64())
    }
}

/// Streaming primer trimmer over any record source.
pub struct PrimerTrimmer<I> {
    records: I,
    opts: TrimOptions,
}

impl<I> PrimerTrimmer<I>
where
    I: Iterator<Item = Result<FastqRecord, FastqError>>,
{
    pub fn new<R>(records: R, opts: TrimOptions) -> Result<Self, FastqError>
    where
        R: IntoIterator<IntoIter = I>,
    {
        opts.validate()?;
        Ok(Self {
            records: records.into_iter(),
            opts,
        })
    }

    pub fn options(&self) -> &TrimOptions {
        &self.opts
    }

    /// Only the accepted records, in input order.
    pub fn accepted(self) -> impl Iterator<Item = Result<FastqRecord, FastqError>> {
        self.filter_map(|res| match res {
            Ok(outcome) => outcome.accepted().map(Ok),
            Err(e) => Some(Err(e)),
        })
    }

    /// Consume the whole input, writing accepted records to `out` in the
    /// configured output format.
    pub fn run<W: Write>(self, out: W) -> Result<TrimStats, FastqError> {
        let start = Instant::now();
        let mut writer = RecordWriter::new(out, self.opts.output);
        let mut stats = TrimStats::default();

        for outcome in self {
            let outcome = outcome?;
            stats.record(&outcome);
            if let TrimOutcome::Accepted(rec) = &outcome {
                writer.write_record(rec).map_err(FastqError::Output)?;
            }
        }
        writer.finish().map_err(FastqError::Output)?;

        stats.elapsed = start.elapsed();
        log::info!(
            "primer removal: {} accepted, {} rejected in {:.3}s",
            stats.successes,
            stats.failures,
            stats.elapsed.as_secs_f64()
        );
        Ok(stats)
    }
}

impl<I> Iterator for PrimerTrimmer<I>
where
    I: Iterator<Item = Result<FastqRecord, FastqError>>,
{
    type Item = Result<TrimOutcome, FastqError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rec = match self.records.next()? {
            Ok(rec) => rec,
            Err(e) => return Some(Err(e)),
        };
        let outcome = trim_record(rec, &self.opts);
        if let TrimOutcome::Rejected(reason) = &outcome {
            log::debug!("read rejected: {reason:?}");
        }
        Some(Ok(outcome))
    }
}
