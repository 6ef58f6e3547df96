use crate::record::FastqRecord;
use crate::util::has_gz_extension;

#[cfg(feature = "gzip")]
use flate2::{Compression, write::GzEncoder};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// How emitted records are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Four FASTQ lines: header, sequence, separator, quality.
    #[default]
    Fastq,
    /// One tab-separated line: header, sequence, quality.
    Fields,
}

impl OutputFormat {
    pub fn write_record<W: Write + ?Sized>(&self, w: &mut W, rec: &FastqRecord) -> io::Result<()> {
        let (header, seq, qual) = rec.fields();
        match self {
            Self::Fastq => {
                w.write_all(header.as_bytes())?;
                w.write_all(b"\n")?;
                w.write_all(seq)?;
                w.write_all(b"\n")?;
                w.write_all(rec.separator.as_bytes())?;
                w.write_all(b"\n")?;
                w.write_all(qual)?;
                w.write_all(b"\n")
            }
            Self::Fields => {
                w.write_all(header.as_bytes())?;
                w.write_all(b"\t")?;
                w.write_all(seq)?;
                w.write_all(b"\t")?;
                w.write_all(qual)?;
                w.write_all(b"\n")
            }
        }
    }
}

/// Buffered record sink, optionally gzip-compressed.
pub struct RecordWriter<W: Write> {
    inner: Sink<W>,
    format: OutputFormat,
}

enum Sink<W: Write> {
    Plain(BufWriter<W>),
    #[cfg(feature = "gzip")]
    Gzip(GzEncoder<BufWriter<W>>),
}

impl RecordWriter<File> {
    /// Create `path`; a `.gz` extension selects gzip output.
    pub fn to_path<P: AsRef<Path>>(path: P, format: OutputFormat) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        if has_gz_extension(path) {
            #[cfg(feature = "gzip")]
            {
                return Ok(Self::gzip(file, format));
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "gzip output requires the `gzip` feature",
                ));
            }
        }
        Ok(Self::new(file, format))
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            inner: Sink::Plain(BufWriter::new(writer)),
            format,
        }
    }

    #[cfg(feature = "gzip")]
    pub fn gzip(writer: W, format: OutputFormat) -> Self {
        Self {
            inner: Sink::Gzip(GzEncoder::new(BufWriter::new(writer), Compression::default())),
            format,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn write_record(&mut self, rec: &FastqRecord) -> io::Result<()> {
        let w: &mut dyn Write = match &mut self.inner {
            Sink::Plain(w) => w,
            #[cfg(feature = "gzip")]
            Sink::Gzip(w) => w,
        };
        self.format.write_record(w, rec)
    }

    /// Flush buffers and, for gzip, write the stream trailer.
    pub fn finish(self) -> io::Result<W> {
        match self.inner {
            Sink::Plain(w) => w.into_inner().map_err(|e| e.into_error()),
            #[cfg(feature = "gzip")]
            Sink::Gzip(w) => w.finish()?.into_inner().map_err(|e| e.into_error()),
        }
    }
}
