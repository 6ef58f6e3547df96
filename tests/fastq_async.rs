#[cfg(feature = "async")]
mod t {
    use fastq_prep::{AsyncFastqReader, FastqError, FormatError};
    use tempfile::tempdir;
    use tokio::fs::File;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn async_parse_plain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.fastq");
        {
            let mut f = File::create(&path).await.unwrap();
            f.write_all(b"@id#CCC/2\nACGT\n+\n!!!!\n").await.unwrap();
        }
        let mut fq = AsyncFastqReader::from_path(&path).await.unwrap();

        if let Some(Ok(rec)) = fq.next_record().await {
            assert_eq!(rec.header, "@id#CCC/2");
            assert_eq!(rec.seq, b"ACGT");
            assert_eq!(rec.qual, b"!!!!");
        } else {
            panic!("no record");
        }
        assert!(fq.next_record().await.is_none());
    }

    #[tokio::test]
    async fn async_truncated_input() {
        let data: &'static [u8] = b"@id\nACGT\n+\n";
        let mut fq = AsyncFastqReader::from_async_bufread(data);
        match fq.next_record().await {
            Some(Err(FastqError::Format { source, .. })) => {
                assert_eq!(source, FormatError::TruncatedRecord { lines: 3 });
            }
            _ => panic!("expected truncated record"),
        }
        assert!(fq.next_record().await.is_none());
    }

    #[tokio::test]
    async fn async_blank_line_between_records() {
        let data: &'static [u8] = b"@a\nAC\n+\nII\n\n@b\nAC\n+\nII\n";
        let mut fq = AsyncFastqReader::from_async_bufread(data);
        assert!(matches!(fq.next_record().await, Some(Ok(_))));
        match fq.next_record().await {
            Some(Err(FastqError::Format { source, .. })) => {
                assert_eq!(source, FormatError::MissingHeader);
            }
            _ => panic!("expected missing header"),
        }
        assert!(fq.next_record().await.is_none());
    }
}
