use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Peek at the first two bytes without moving the stream position.
pub fn looks_like_gzip<R: Read + Seek>(mut r: R) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    let pos = r.stream_position()?;
    let n = r.read(&mut magic)?;
    r.seek(SeekFrom::Start(pos))?;
    Ok(n >= 2 && magic == GZIP_MAGIC)
}

pub fn has_gz_extension(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

pub fn open_file(path: &Path) -> io::Result<File> {
    File::open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn sniffs_magic_and_rewinds() {
        let mut c = Cursor::new(vec![0x1F, 0x8B, 0x08]);
        assert!(looks_like_gzip(&mut c).unwrap());
        assert_eq!(c.position(), 0);
        assert!(!looks_like_gzip(Cursor::new(b"@r\n".to_vec())).unwrap());
    }
}
