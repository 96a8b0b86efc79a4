//! Error type tests
//!
//! Tests for ItgError and its conversions.

use std::path::Path;

use crate::error::{
    ItgError, ambiguous_entity, file_read_failed, file_write_failed, io_error, no_entity_found,
    not_an_entity,
};
use miette::Diagnostic;

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

#[test]
fn test_error_display() {
    let err = no_entity_found("packs", Path::new("/tmp/work"));
    assert_eq!(err.to_string(), "No packs found in /tmp/work");
}

#[test]
fn test_error_code() {
    let err = ambiguous_entity(3);
    assert_eq!(
        err.code().map(|c| c.to_string()),
        Some("itg::entity::ambiguous".to_string())
    );
}

#[test]
fn test_ambiguous_has_help() {
    let err = ambiguous_entity(2);
    let help = err.help().map(|h| h.to_string()).unwrap_or_default();
    assert!(help.contains("add-pack"));
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ItgError = io_err.into();
    assert!(matches!(err, ItgError::IoError { .. }));
}

#[test]
fn test_yaml_error_conversion() {
    let parse_result: std::result::Result<serde_yaml::Value, _> =
        serde_yaml::from_str("invalid: yaml: content: [unclosed");
    let err: ItgError = parse_result.unwrap_err().into();
    assert!(matches!(err, ItgError::ConfigParseFailed { .. }));
}

#[test]
fn test_walkdir_error_conversion() {
    let walk_err = walkdir::WalkDir::new("/definitely/not/here/itg-cli")
        .into_iter()
        .find_map(std::result::Result::err)
        .unwrap();
    let err: ItgError = walk_err.into();
    assert!(matches!(err, ItgError::FileReadFailed { .. }));
}

test_error_contains!(
    test_not_an_entity,
    not_an_entity(Path::new("/songs/Pack/Song"), "no simfile"),
    "/songs/Pack/Song",
    "not a valid simfile directory"
);

test_error_contains!(
    test_overwrite_declined,
    ItgError::OverwriteDeclined {
        name: "pack MyPack".to_string()
    },
    "Kept existing pack MyPack"
);

test_error_contains!(
    test_nothing_to_uncensor,
    ItgError::NothingToUncensor,
    "No censored songs"
);

test_error_contains!(
    test_file_read_failed,
    file_read_failed(Path::new("/a/b.sm"), "permission denied"),
    "Failed to read file",
    "permission denied"
);

test_error_contains!(
    test_file_write_failed,
    file_write_failed(Path::new("/a/b.sm"), "disk full"),
    "Failed to write file",
    "disk full"
);

test_error_contains!(test_io_error, io_error("some error"), "IO error");
