use std::io::Write;

use specmap_core::{DataLoader, LoadError};
use specmap_io::TextLoader;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_map() {
    let file = write_temp("# map\n1,2,3\n4,5,6\n");
    let map = TextLoader.load_map(file.path()).unwrap();
    assert_eq!(map.row_count(), 2);
    assert_eq!(map.channel_count(), 3);
    assert_eq!(map.row(1).unwrap().to_vec(), vec![4.0, 5.0, 6.0]);
}

#[test]
fn test_load_map_ragged() {
    let file = write_temp("1,2,3\n4,5\n");
    let err = TextLoader.load_map(file.path()).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Ragged {
            line: 2,
            expected: 3,
            found: 2
        }
    ));
}

#[test]
fn test_load_map_ragged_after_header() {
    let file = write_temp("# exported map\n# rows: 2\n1,2,3\n4,5\n");
    let err = TextLoader.load_map(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Ragged { line: 4, .. }));
}

#[test]
fn test_load_map_empty_file() {
    let file = write_temp("# nothing here\n\n");
    assert!(matches!(
        TextLoader.load_map(file.path()),
        Err(LoadError::Empty)
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = TextLoader
        .load_map(&dir.path().join("absent.txt"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn test_load_reference_row_or_column() {
    let row = write_temp("1 2 3 4\n");
    let column = write_temp("1\n2\n3\n4\n");
    let a = TextLoader.load_reference(row.path()).unwrap();
    let b = TextLoader.load_reference(column.path()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.channel_count(), 4);
}

#[test]
fn test_load_reference_rejects_block() {
    let file = write_temp("1,2\n3,4\n");
    assert!(matches!(
        TextLoader.load_reference(file.path()),
        Err(LoadError::NotASpectrum {
            rows: 2,
            columns: 2
        })
    ));
}
