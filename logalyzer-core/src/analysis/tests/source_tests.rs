use super::log_line;
use crate::analysis::{LineSource, ParseError, is_compressed};
use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn collect(source: LineSource) -> Vec<Result<String, ParseError>> {
    source.map(|line| line.unwrap()).collect()
}

fn write_gz(path: &Path, contents: &[u8]) {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(contents).unwrap();
    fs::write(path, encoder.finish().unwrap()).unwrap();
}

#[test]
fn reads_plain_lines_without_terminators() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("nginx-access-ui.log-20170630");
    fs::write(&path, "first\nsecond\r\nthird").unwrap();

    // Act
    let lines = collect(LineSource::open(&path).unwrap());

    // Assert
    assert_eq!(
        lines,
        vec![
            Ok("first".to_string()),
            Ok("second".to_string()),
            Ok("third".to_string()),
        ]
    );
}

#[test]
fn reads_gzip_lines_transparently() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nginx-access-ui.log-20170630.gz");
    let line = log_line("/api/v2/banner/1", "0.5");
    write_gz(&path, format!("{line}\n{line}\n").as_bytes());

    let lines = collect(LineSource::open(&path).unwrap());

    assert_eq!(lines, vec![Ok(line.clone()), Ok(line)]);
}

#[test]
fn reads_concatenated_gzip_members() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.gz");

    let mut bytes = Vec::new();
    for chunk in ["one\n", "two\n"] {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(chunk.as_bytes()).unwrap();
        bytes.extend(encoder.finish().unwrap());
    }
    fs::write(&path, bytes).unwrap();

    let lines = collect(LineSource::open(&path).unwrap());

    assert_eq!(lines, vec![Ok("one".to_string()), Ok("two".to_string())]);
}

#[test]
fn invalid_utf8_is_a_per_line_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log");
    fs::write(&path, b"good\n\xff\xfe bad\nalso good\n").unwrap();

    let lines = collect(LineSource::open(&path).unwrap());

    assert_eq!(
        lines,
        vec![
            Ok("good".to_string()),
            Err(ParseError::InvalidEncoding),
            Ok("also good".to_string()),
        ]
    );
}

#[test]
fn empty_file_yields_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.log");
    fs::write(&path, "").unwrap();

    assert_eq!(LineSource::open(&path).unwrap().count(), 0);
}

#[test]
fn missing_file_fails_to_open() {
    let dir = tempdir().unwrap();

    let result = LineSource::open(dir.path().join("nope.gz"));

    assert!(result.is_err());
}

#[test]
fn corrupt_gzip_is_a_read_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.gz");
    fs::write(&path, b"definitely not gzip").unwrap();

    let mut source = LineSource::open(&path).unwrap();

    assert!(source.next().unwrap().is_err());
    assert!(source.next().is_none());
}

#[test]
fn compression_follows_suffix() {
    assert!(is_compressed(Path::new("nginx-access-ui.log-20170630.gz")));
    assert!(!is_compressed(Path::new("nginx-access-ui.log-20170630")));
    assert!(!is_compressed(Path::new("nginx-access-ui.log-20170630.bz2")));
}
