use crate::error::{FormatError, HeaderError};
use crate::header::ReadHeader;
use std::fmt;

/// One 4-line FASTQ entry. Header and separator keep their `@` / `+` markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    pub header: String,
    pub seq: Vec<u8>,
    pub separator: String,
    pub qual: Vec<u8>,
}

impl FastqRecord {
    /// Assemble a record from its four lines (line endings already stripped).
    pub fn from_lines(
        header: String,
        seq: String,
        separator: String,
        qual: String,
    ) -> Result<Self, FormatError> {
        check_header_line(&header)?;
        if !separator.starts_with('+') {
            return Err(FormatError::MissingPlus);
        }
        if seq.len() != qual.len() {
            return Err(FormatError::LengthMismatch {
                seq: seq.len(),
                qual: qual.len(),
            });
        }
        Ok(Self {
            header,
            seq: seq.into_bytes(),
            separator,
            qual: qual.into_bytes(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Parse the header line; the barcode and mate fields stay optional.
    pub fn parse_header(&self) -> Result<ReadHeader<'_>, HeaderError> {
        ReadHeader::parse(&self.header)
    }

    /// Just the read id; a malformed barcode field is not an error here.
    pub fn read_id(&self) -> Result<&str, HeaderError> {
        ReadHeader::parse_id(&self.header)
    }

    /// Header, sequence and quality without the separator line.
    pub fn fields(&self) -> (&str, &[u8], &[u8]) {
        (&self.header, &self.seq, &self.qual)
    }
}

/// The header line must carry the `@` marker; a `>` means FASTA input.
fn check_header_line(header: &str) -> Result<(), FormatError> {
    if header.starts_with('@') {
        Ok(())
    } else if header.starts_with('>') {
        Err(FormatError::FastaHeaderDetected)
    } else {
        Err(FormatError::MissingHeader)
    }
}

/// Collects the lines of one record as they are read. Shared by the sync and
/// async readers so both apply the same structural checks.
#[derive(Debug, Default)]
pub(crate) struct RecordLines {
    lines: [String; 4],
    filled: usize,
}

impl RecordLines {
    /// Add the next line; yields the record once its fourth line is in.
    pub(crate) fn push(&mut self, line: String) -> Result<Option<FastqRecord>, FormatError> {
        if self.filled == 0 {
            check_header_line(&line)?;
        }
        self.lines[self.filled] = line;
        self.filled += 1;
        if self.filled < 4 {
            return Ok(None);
        }
        self.filled = 0;
        let [header, seq, separator, qual] = std::mem::take(&mut self.lines);
        FastqRecord::from_lines(header, seq, separator, qual).map(Some)
    }

    /// End of input: clean between records, truncation inside one.
    pub(crate) fn finish(&self) -> Result<(), FormatError> {
        match self.filled {
            0 => Ok(()),
            lines => Err(FormatError::TruncatedRecord { lines }),
        }
    }
}

impl fmt::Display for FastqRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f, "{}", String::from_utf8_lossy(&self.seq))?;
        writeln!(f, "{}", self.separator)?;
        f.write_str(&String::from_utf8_lossy(&self.qual))
    }
}
