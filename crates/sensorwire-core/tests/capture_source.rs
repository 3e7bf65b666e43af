use std::fs;
use std::io::Write;

use sensorwire_core::source::burst::{Burst, BurstReader};
use sensorwire_core::source::clock::ManualClock;
use sensorwire_core::{ByteSource, CaptureFileSource, SourceError};

#[test]
fn capture_source_replays_bytes_then_closes() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"R:070.0RH 032.4C\n").unwrap();

    let mut source = CaptureFileSource::open(file.path()).unwrap();
    assert_eq!(source.available().unwrap(), 17);

    let mut bytes = Vec::new();
    while source.available().unwrap() > 0 {
        bytes.push(source.read_byte().unwrap());
    }

    assert_eq!(bytes, b"R:070.0RH 032.4C\n");
    assert!(source.is_closed());
    assert!(matches!(source.read_byte(), Err(SourceError::Empty)));
}

#[test]
fn capture_source_rejects_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = match CaptureFileSource::open(&dir.path().join("missing.bin")) {
        Ok(_) => panic!("expected missing file to be rejected"),
        Err(err) => err,
    };

    assert!(matches!(err, SourceError::Io(_)));
}

#[test]
fn bursts_from_capture_respect_capacity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.bin");
    fs::write(&path, [0x55u8; 100]).unwrap();
    let mut source = CaptureFileSource::open(&path).unwrap();
    let clock = ManualClock::new();
    let reader = BurstReader::default();

    let first = reader.read(&mut source, &clock).unwrap();
    let second = reader.read(&mut source, &clock).unwrap();
    let third = reader.read(&mut source, &clock).unwrap();

    assert!(matches!(first, Burst::Bytes(ref bytes) if bytes.len() == 64));
    assert!(matches!(second, Burst::Bytes(ref bytes) if bytes.len() == 36));
    assert_eq!(third, Burst::Closed);
}
