use crate::error::{ConfigError, FastqError, IoContext};
use crate::record::FastqRecord;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::BufRead;

/// Barcode sequence to sample name.
pub type BarcodeMap = HashMap<String, String>;

/// Parse `BARCODE SAMPLE` lines (any whitespace between the two columns).
pub fn load_barcode_map<R: BufRead>(reader: R) -> Result<BarcodeMap, FastqError> {
    let mut map = BarcodeMap::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            FastqError::io_err(
                e,
                IoContext {
                    byte_pos: 0,
                    line_num: i as u64 + 1,
                },
            )
        })?;
        let mut cols = line.split_whitespace();
        let (barcode, sample) = match (cols.next(), cols.next(), cols.next()) {
            (None, _, _) => continue,
            (Some(b), Some(s), None) => (b, s),
            _ => return Err(ConfigError::MalformedBarcodeMap { line: i + 1 }.into()),
        };
        if map.insert(barcode.to_string(), sample.to_string()).is_some() {
            return Err(ConfigError::DuplicateBarcode(barcode.to_string()).into());
        }
    }
    Ok(map)
}

/// Barcode tally. Every sample from the map is present, zero if never seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    pub total: u64,
    pub mapped: u64,
    pub samples: BTreeMap<String, u64>,
}

impl Counts {
    pub fn for_map(map: &BarcodeMap) -> Self {
        Self {
            total: 0,
            mapped: 0,
            samples: map.values().map(|s| (s.clone(), 0)).collect(),
        }
    }

    /// Look up `"total"`, `"mapped"`, or a sample name.
    pub fn get(&self, label: &str) -> Option<u64> {
        match label {
            "total" => Some(self.total),
            "mapped" => Some(self.mapped),
            sample => self.samples.get(sample).copied(),
        }
    }

    /// Flat label-to-count view; samples named `total` or `mapped` are shadowed.
    pub fn to_map(&self) -> BTreeMap<String, u64> {
        let mut out = self.samples.clone();
        out.insert("total".to_string(), self.total);
        out.insert("mapped".to_string(), self.mapped);
        out
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total\t{}", self.total)?;
        writeln!(f, "mapped\t{}", self.mapped)?;
        for (sample, n) in &self.samples {
            writeln!(f, "{sample}\t{n}")?;
        }
        Ok(())
    }
}

/// Tally header barcodes against `map`, stopping after `max_entries` records
/// when a cap is given. Every header must carry a `#<BARCODE>/<mate>` field.
pub fn count_barcodes<I>(
    records: I,
    map: &BarcodeMap,
    max_entries: Option<usize>,
) -> Result<Counts, FastqError>
where
    I: IntoIterator<Item = Result<FastqRecord, FastqError>>,
{
    let mut counts = Counts::for_map(map);
    let cap = max_entries.unwrap_or(usize::MAX);

    for (i, rec) in records.into_iter().take(cap).enumerate() {
        let rec = rec?;
        let index = i as u64;
        let header = rec
            .parse_header()
            .map_err(|e| FastqError::header_err(e, index))?;
        let barcode = header
            .require_barcode()
            .map_err(|e| FastqError::header_err(e, index))?;

        counts.total += 1;
        match map.get(barcode) {
            Some(sample) => {
                counts.mapped += 1;
                *counts.samples.entry(sample.clone()).or_insert(0) += 1;
            }
            None => log::debug!("unmapped barcode {barcode} in {}", header.id),
        }
    }

    log::info!(
        "barcodes: {} of {} reads mapped to {} samples",
        counts.mapped,
        counts.total,
        counts.samples.len()
    );
    Ok(counts)
}
