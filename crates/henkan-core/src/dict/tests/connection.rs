use crate::dict::{ConnectMatrix, DictError};

fn sample_matrix() -> ConnectMatrix {
    // Row = left class, column = right class.
    let text = "3\n100\n011\n001\n";
    ConnectMatrix::from_text(text).unwrap()
}

#[test]
fn test_from_text() {
    let m = sample_matrix();
    assert_eq!(m.size(), 3);
    assert_eq!(m.cell(0, 0), 1);
    assert_eq!(m.cell(0, 1), 0);
    assert_eq!(m.cell(1, 1), 1);
    assert_eq!(m.cell(1, 2), 1);
    assert_eq!(m.cell(2, 1), 0);
}

#[test]
fn test_connects_reads_left_then_right() {
    let m = sample_matrix();
    // A word ending in class 2 may be followed by one starting with class 1.
    assert!(m.connects(2, 1));
    // ...but not the reverse.
    assert!(!m.connects(1, 2));
}

#[test]
fn test_out_of_range_is_not_connectible() {
    let m = sample_matrix();
    assert!(!m.connects(3, 0));
    assert!(!m.connects(0, 3));
    assert!(!m.connects(u16::MAX, u16::MAX));
    assert!(!ConnectMatrix::empty().connects(0, 0));
}

#[test]
fn test_text_with_spaces_and_comments() {
    let m = ConnectMatrix::from_text("# two classes\n2\n1 0\n\n1 1\n").unwrap();
    assert_eq!(m.cell(0, 1), 0);
    assert_eq!(m.cell(1, 0), 1);
}

#[test]
fn test_text_errors() {
    assert!(matches!(ConnectMatrix::from_text(""), Err(DictError::Parse(_))));
    assert!(matches!(
        ConnectMatrix::from_text("2\n10\n"),
        Err(DictError::Parse(_))
    ));
    assert!(matches!(
        ConnectMatrix::from_text("2\n10\n1\n"),
        Err(DictError::Parse(_))
    ));
    assert!(matches!(
        ConnectMatrix::from_text("2\n1x\n11\n"),
        Err(DictError::Parse(_))
    ));
    assert!(matches!(
        ConnectMatrix::from_text("1\n1\n1\n"),
        Err(DictError::Parse(_))
    ));
}

#[test]
fn test_serialize_roundtrip() {
    let m = sample_matrix();
    let bytes = m.to_bytes();
    assert_eq!(&bytes[..4], b"HKCM");
    let m2 = ConnectMatrix::from_bytes(&bytes).unwrap();
    assert_eq!(m2.size(), 3);
    for left in 0..3 {
        for right in 0..3 {
            assert_eq!(m.cell(left, right), m2.cell(left, right));
        }
    }
}

#[test]
fn test_file_roundtrip_mapped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matrix.bin");
    sample_matrix().save(&path).unwrap();

    let m = ConnectMatrix::open(&path).unwrap();
    assert_eq!(m.size(), 3);
    assert!(m.connects(2, 1));
    assert!(!m.connects(1, 2));
    assert_eq!(m.to_bytes(), sample_matrix().to_bytes());
}

#[test]
fn test_invalid_magic() {
    let result = ConnectMatrix::from_bytes(b"XXXX\x01\x00\x00");
    assert!(matches!(result, Err(DictError::InvalidMagic)));
}

#[test]
fn test_header_too_short() {
    let result = ConnectMatrix::from_bytes(b"HKC");
    assert!(matches!(result, Err(DictError::InvalidHeader)));
}

#[test]
fn test_unsupported_version() {
    let result = ConnectMatrix::from_bytes(b"HKCM\x99\x00\x00");
    assert!(matches!(result, Err(DictError::UnsupportedVersion(0x99))));
}

#[test]
fn test_truncated_body() {
    let mut bytes = sample_matrix().to_bytes();
    bytes.pop();
    assert!(matches!(
        ConnectMatrix::from_bytes(&bytes),
        Err(DictError::Parse(_))
    ));
}

#[test]
fn test_set_cell() {
    let mut m = ConnectMatrix::all_connected(2);
    m.set(1, 0, false);
    assert!(!m.connects(0, 1));
    assert!(m.connects(1, 0));
    // Out of range is ignored.
    m.set(5, 5, true);
    assert!(!m.connects(5, 5));
}
