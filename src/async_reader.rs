#![cfg(feature = "async")]

use crate::error::{FastqError, IoContext};
use crate::record::{FastqRecord, RecordLines};
use crate::util::has_gz_extension;

use async_compression::tokio::bufread::GzipDecoder;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

#[derive(Debug)]
pub enum AsyncSource {
    Path(PathBuf),
    Reader,
}

/// Async FASTQ reader (plain/.gz) with the same 4-line contract as [`crate::FastqReader`].
pub struct AsyncFastqReader {
    src: AsyncSource,
    rdr: Box<dyn AsyncBufRead + Unpin + Send>,
    pos: IoContext,
    failed: bool,
}

impl AsyncFastqReader {
    /// Open async from path; `.gz` auto-detect by extension or magic bytes.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FastqError> {
        let path = path.as_ref().to_path_buf();
        let mut f = File::open(&path)
            .await
            .map_err(|e| FastqError::io_err(e, IoContext::default()))?;

        let is_gz =
            has_gz_extension(&path) || looks_like_gzip_async(&mut f).await.unwrap_or(false);

        let rdr: Box<dyn AsyncBufRead + Unpin + Send> = if is_gz {
            let gz = GzipDecoder::new(BufReader::with_capacity(256 * 1024, f));
            Box::new(BufReader::with_capacity(256 * 1024, gz))
        } else {
            Box::new(BufReader::with_capacity(256 * 1024, f))
        };

        Ok(Self {
            src: AsyncSource::Path(path),
            rdr,
            pos: IoContext::default(),
            failed: false,
        })
    }

    /// Wrap any `AsyncBufRead`.
    pub fn from_async_bufread<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        Self {
            src: AsyncSource::Reader,
            rdr: Box::new(reader),
            pos: IoContext::default(),
            failed: false,
        }
    }

    pub fn source(&self) -> &AsyncSource {
        &self.src
    }

    /// Fetch next record (async). Fused after the first error.
    pub async fn next_record(&mut self) -> Option<Result<FastqRecord, FastqError>> {
        if self.failed {
            return None;
        }
        match self.read_one().await {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    async fn read_one(&mut self) -> Result<Option<FastqRecord>, FastqError> {
        let mut lines = RecordLines::default();
        loop {
            let mut line = String::with_capacity(256);
            let n = self
                .rdr
                .read_line(&mut line)
                .await
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

async fn looks_like_gzip_async(f: &mut File) -> io::Result<bool> {
    let pos = f.stream_position().await?;
    let mut magic = [0u8; 2];
    let n = f.read(&mut magic).await?;
    f.seek(SeekFrom::Start(pos)).await?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}
