use fastq_prep::{
    BarcodeMap, ConfigError, Counts, FastqError, FastqReader, HeaderError, count_barcodes,
    load_barcode_map,
};
use std::io::{BufReader, Cursor};

fn reader(data: impl Into<String>) -> FastqReader {
    FastqReader::from_bufread(BufReader::new(Cursor::new(data.into())))
}

fn barcode_map() -> BarcodeMap {
    [("AAA", "sampleA"), ("TTT", "sampleT"), ("CCC", "sampleC")]
        .into_iter()
        .map(|(b, s)| (b.to_string(), s.to_string()))
        .collect()
}

const FASTQ: &str = "\
@lol#AAA/1
CAT
+
aaa
@hoo#TTT/1
CAT
+
aaa
@crap#ACT/1
CAT
+
aaa
";

#[test]
fn counts_barcodes_correctly() {
    let counts = count_barcodes(reader(FASTQ), &barcode_map(), Some(100)).unwrap();

    let expected: Vec<(String, u64)> = [
        ("mapped", 2),
        ("sampleA", 1),
        ("sampleC", 0),
        ("sampleT", 1),
        ("total", 3),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    assert_eq!(counts.to_map().into_iter().collect::<Vec<_>>(), expected);

    assert_eq!(counts.get("total"), Some(3));
    assert_eq!(counts.get("sampleC"), Some(0));
    assert_eq!(counts.get("nobody"), None);
}

#[test]
fn mapped_never_exceeds_total() {
    let counts = count_barcodes(reader(FASTQ.repeat(4)), &barcode_map(), None).unwrap();
    assert!(counts.mapped <= counts.total);
    assert_eq!(counts.samples.values().sum::<u64>(), counts.mapped);
    assert_eq!(counts.total, 12);
}

#[test]
fn cap_stops_early() {
    let counts = count_barcodes(reader(FASTQ), &barcode_map(), Some(1)).unwrap();
    assert_eq!(counts.total, 1);
    assert_eq!(counts.mapped, 1);
    assert_eq!(counts.samples["sampleA"], 1);
    assert_eq!(counts.samples["sampleT"], 0);
}

#[test]
fn empty_input_reports_zeroes() {
    let counts = count_barcodes(reader(""), &barcode_map(), None).unwrap();
    assert_eq!(counts, Counts::for_map(&barcode_map()));
    assert_eq!(counts.samples.len(), 3);
}

#[test]
fn header_without_barcode_is_format_error() {
    let data = format!("{FASTQ}@plain/1\nCAT\n+\naaa\n");
    let err = count_barcodes(reader(data), &barcode_map(), None).unwrap_err();
    assert!(err.is_format());
    match err {
        FastqError::Header { source, record } => {
            assert_eq!(source, HeaderError::MissingBarcode);
            assert_eq!(record, 3);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn table_rendering() {
    let counts = count_barcodes(reader(FASTQ), &barcode_map(), None).unwrap();
    assert_eq!(
        counts.to_string(),
        "total\t3\nmapped\t2\nsampleA\t1\nsampleC\t0\nsampleT\t1\n"
    );
}

#[test]
fn load_map_file() {
    let text = "AAA\tsampleA\n\nTTT   sampleT\n";
    let map = load_barcode_map(Cursor::new(text)).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["TTT"], "sampleT");

    let err = load_barcode_map(Cursor::new("AAA sampleA extra\n")).unwrap_err();
    assert!(matches!(
        err,
        FastqError::Configuration(ConfigError::MalformedBarcodeMap { line: 1 })
    ));

    let err = load_barcode_map(Cursor::new("AAA a\nAAA b\n")).unwrap_err();
    assert!(matches!(
        err,
        FastqError::Configuration(ConfigError::DuplicateBarcode(_))
    ));
}
