//! Input resolution and file-backed sources.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::InputError;
use crate::io::{InputProvider, InputSource};

#[test]
fn file_wins_over_piped_stdin() {
    let source = InputSource::resolve(Some("users.csv"), true).unwrap();
    let InputSource::File(file) = &source else {
        panic!("expected a file source, got {source:?}");
    };
    assert_eq!(file.path(), Path::new("users.csv"));
    assert_eq!(source.provider().id(), "users.csv");
}

#[test]
fn dash_and_piped_stdin_mean_stdin() {
    assert!(matches!(
        InputSource::resolve(Some("-"), false).unwrap(),
        InputSource::Stdin(_)
    ));
    assert!(matches!(
        InputSource::resolve(None, true).unwrap(),
        InputSource::Stdin(_)
    ));
}

#[test]
fn no_file_and_no_pipe_is_missing_input() {
    assert!(matches!(
        InputSource::resolve(None, false),
        Err(InputError::MissingInput)
    ));
    assert!(matches!(
        InputSource::resolve(Some(""), false),
        Err(InputError::MissingInput)
    ));
}

#[test]
fn file_input_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "oldsales@x.io").unwrap();

    let path = file.path().to_string_lossy().into_owned();
    let source = InputSource::resolve(Some(&path), false).unwrap();
    let mut buf = String::new();
    source.provider().open().unwrap().read_to_string(&mut buf).unwrap();
    assert_eq!(buf, "oldsales@x.io\n");
}

#[test]
fn missing_file_fails_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    let source = InputSource::resolve(path.to_str(), false).unwrap();
    assert!(source.provider().open().is_err());
}
