use securevault_backup::errors::{ContainerError, EnvelopeError, OpenError};
use securevault_backup::EnvelopeFormat;

use std::fs;
use std::path::PathBuf;

fn input_path(name: &str) -> PathBuf {
    let mut file_path = PathBuf::new();
    file_path.push(env!("CARGO_MANIFEST_DIR"));
    file_path.push("res");
    file_path.push("test_input");
    file_path.push(name);
    file_path
}

fn assert_fixture_container(backup: &securevault_backup::Backup<securevault_backup::Locked>) {
    let container = backup.container();
    assert_eq!(container.salt, (0u8..32).collect::<Vec<_>>());
    assert_eq!(container.iv, (100u8..116).collect::<Vec<_>>());
    assert_eq!(container.ciphertext.len(), 288);
}

#[test]
fn load_data_format() {
    let file = fs::File::open(input_path("data-format.backup")).unwrap();

    let backup = securevault_backup::from_reader(file).unwrap();

    assert_eq!(backup.format(), EnvelopeFormat::Data);
    assert_fixture_container(&backup);
}

#[test]
fn load_legacy_format() {
    let backup = securevault_backup::open(input_path("legacy-format.backup")).unwrap();

    assert_eq!(backup.format(), EnvelopeFormat::Legacy);
    assert_fixture_container(&backup);
}

#[test]
fn load_raw_line_wrapped_format() {
    let backup = securevault_backup::open(input_path("raw-format.backup")).unwrap();

    assert_eq!(backup.format(), EnvelopeFormat::Raw);
    assert_fixture_container(&backup);
}

#[test]
fn missing_file() {
    let err = securevault_backup::open(input_path("does-not-exist.backup")).unwrap_err();
    assert!(matches!(err, OpenError::Io(_)));
}

#[test]
fn binary_file_rejected() {
    let data: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00];
    let err = securevault_backup::from_reader(data).unwrap_err();
    assert!(matches!(err, OpenError::NotUtf8(_)));
}

#[test]
fn json_without_payload_rejected() {
    let data = br#"{"version": 2, "timestamp": 1767618682000}"#;
    let err = securevault_backup::from_reader(&data[..]).unwrap_err();
    assert!(matches!(
        err,
        OpenError::Envelope(EnvelopeError::MissingPayloadField)
    ));
}

#[test]
fn truncated_payload_rejected() {
    // 10 bytes once decoded
    let data = br#"{"data": "AAECAwQFBgcICQ=="}"#;
    let err = securevault_backup::from_reader(&data[..]).unwrap_err();
    assert!(matches!(
        err,
        OpenError::Container(ContainerError::TooShort {
            actual: 10,
            minimum: 48
        })
    ));
}

#[test]
fn byte_order_mark_skipped() {
    let mut data = "\u{feff}".as_bytes().to_vec();
    data.extend(fs::read(input_path("data-format.backup")).unwrap());

    let backup = securevault_backup::from_reader(&*data).unwrap();
    assert_eq!(backup.format(), EnvelopeFormat::Data);
}
