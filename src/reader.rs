use crate::error::{FastqError, IoContext};
use crate::record::{FastqRecord, RecordLines};
use crate::util::{has_gz_extension, looks_like_gzip, open_file};

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum Source {
    Path(PathBuf),
    Reader,
}

/// Sync FASTQ reader (plain/.gz), streaming, exactly 4 lines per record.
///
/// The first structural error is returned once; the reader is fused after it.
pub struct FastqReader {
    src: Source,
    rdr: Box<dyn BufRead + Send>,
    pos: IoContext,
    records: u64,
    failed: bool,
}

impl FastqReader {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FastqError> {
        let path = path.as_ref();
        let start = IoContext::default();
        let f = open_file(path).map_err(|e| FastqError::io_err(e, start))?;

        let is_gz = has_gz_extension(path) || looks_like_gzip(&f).unwrap_or(false);

        let rdr: Box<dyn BufRead + Send> = if is_gz {
            #[cfg(feature = "gzip")]
            {
                let dec = MultiGzDecoder::new(f);
                Box::new(BufReader::with_capacity(256 * 1024, dec))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(FastqError::io_err(
                    std::io::Error::new(
                        std::io::ErrorKind::Unsupported,
                        "gzip input requires the `gzip` feature",
                    ),
                    start,
                ));
            }
        } else {
            #[cfg(feature = "mmap")]
            {
                use memmap2::Mmap;
                use std::io::Cursor;
                // SAFETY: the file is opened read-only and not truncated while mapped.
                let mmap = unsafe { Mmap::map(&f) }.map_err(|e| FastqError::io_err(e, start))?;
                Box::new(BufReader::with_capacity(512 * 1024, Cursor::new(mmap)))
            }
            #[cfg(not(feature = "mmap"))]
            {
                Box::new(BufReader::with_capacity(256 * 1024, f))
            }
        };

        Ok(Self::with_source(Source::Path(path.to_path_buf()), rdr))
    }

    /// Wrap an arbitrary `BufRead` (stdin, in-memory buffers, etc.).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self::with_source(Source::Reader, Box::new(reader))
    }

    fn with_source(src: Source, rdr: Box<dyn BufRead + Send>) -> Self {
        Self {
            src,
            rdr,
            pos: IoContext::default(),
            records: 0,
            failed: false,
        }
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    /// Number of records yielded so far.
    pub fn records_read(&self) -> u64 {
        self.records
    }

    /// Iterator-style `next` record.
    pub fn next(&mut self) -> Option<Result<FastqRecord, FastqError>> {
        if self.failed {
            return None;
        }
        match self.read_one() {
            Ok(Some(rec)) => {
                self.records += 1;
                Some(Ok(rec))
            }
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    fn read_one(&mut self) -> Result<Option<FastqRecord>, FastqError> {
        let mut lines = RecordLines::default();
        loop {
            let mut line = String::with_capacity(256);
            let n = self
                .rdr
                .read_line(&mut line)
                .map_err(|e| FastqError::io_err(e, self.pos))?;
            if n == 0 {
                return match lines.finish() {
                    Ok(()) => Ok(None),
                    Err(e) => Err(FastqError::fmt_err(e, self.pos)),
                };
            }
            self.pos.advance(&mut line, n);
            if let Some(rec) = lines
                .push(line)
                .map_err(|e| FastqError::fmt_err(e, self.pos))?
            {
                return Ok(Some(rec));
            }
        }
    }
}

impl Iterator for FastqReader {
    type Item = Result<FastqRecord, FastqError>;
    fn next(&mut self) -> Option<Self::Item> {
        FastqReader::next(self)
    }
}
