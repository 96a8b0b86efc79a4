//! add-pack pipeline tests against a real on-disk library

mod common;

use std::fs;
use std::path::Path;

use common::TestLibrary;
use itg_cli::error::ItgError;
use itg_cli::operations::{PackPolicy, add_pack};
use itg_cli::simfile::SimfilePack;
use itg_cli::source::InputSpec;
use serial_test::serial;

fn always(answer: bool) -> impl Fn(&SimfilePack, &SimfilePack) -> bool {
    move |_, _| answer
}

fn input(path: &Path) -> InputSpec {
    InputSpec::parse(&path.to_string_lossy())
}

#[test]
fn test_add_pack_from_folder() {
    let lib = TestLibrary::new();
    let pack = lib.make_pack("My Pack", &["Song A", "Song B"]);
    let overwrite = always(false);

    let added = add_pack(
        &input(&pack),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    )
    .unwrap();

    assert_eq!(added.pack.name, "My Pack");
    assert_eq!(added.pack.song_count(), 2);
    assert_eq!(added.course_count, 0);
    assert!(added.rejected.is_empty());
    assert!(lib.song_in_library("My Pack", "Song A").join("Song A.sm").is_file());
    // The input folder is copied, not consumed
    assert!(pack.join("Song B").is_dir());
}

#[test]
fn test_add_pack_finds_pack_under_wrapper_folders() {
    let lib = TestLibrary::new();
    lib.make_pack("download/Wrapper/Deep Pack", &["One", "Two", "Three"]);
    let overwrite = always(false);

    let added = add_pack(
        &input(&lib.inbox.join("download")),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    )
    .unwrap();

    assert_eq!(added.pack.name, "Deep Pack");
    assert_eq!(added.pack.path, lib.packs().join("Deep Pack"));
    assert!(!lib.packs().join("download").exists());
    assert!(!lib.packs().join("Wrapper").exists());
}

#[test]
fn test_add_pack_picks_most_populous_candidate() {
    let lib = TestLibrary::new();
    lib.make_pack("bundle/Small", &["a", "b", "c"]);
    lib.make_pack("bundle/Big", &["d", "e", "f", "g", "h"]);
    let overwrite = always(false);

    let added = add_pack(
        &input(&lib.inbox.join("bundle")),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    )
    .unwrap();

    assert_eq!(added.pack.name, "Big");
    assert_eq!(added.pack.song_count(), 5);
    assert_eq!(added.rejected.len(), 1);
    assert_eq!(added.rejected[0].count, 3);
    assert!(!lib.packs().join("Small").exists());
}

#[test]
fn test_add_pack_migrates_courses() {
    let lib = TestLibrary::new();
    let pack = lib.make_pack("Course Pack", &["Song A"]);
    common::write_file(&pack.join("Courses/marathon.crs"), "#COURSE:Marathon;");
    common::write_file(&pack.join("Courses/marathon.png"), "png");
    let overwrite = always(false);

    let added = add_pack(
        &input(&pack),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    )
    .unwrap();

    assert_eq!(added.course_count, 1);
    assert!(lib.courses().join("Course Pack/marathon.crs").is_file());
    assert!(lib.courses().join("Course Pack/marathon.png").is_file());
}

#[test]
fn test_add_pack_declined_overwrite_keeps_library() {
    let lib = TestLibrary::new();
    let existing = lib.packs().join("My Pack");
    common::make_song(&existing, "Old Song");
    let pack = lib.make_pack("My Pack", &["New Song"]);
    let overwrite = always(false);

    let err = add_pack(
        &input(&pack),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ItgError::OverwriteDeclined { .. }));
    assert!(existing.join("Old Song").is_dir());
    assert!(!existing.join("New Song").exists());
}

#[test]
fn test_add_pack_overwrite_sees_both_song_counts() {
    let lib = TestLibrary::new();
    let existing = lib.packs().join("My Pack");
    for song in ["a", "b", "c", "d", "e"] {
        common::make_song(&existing, song);
    }
    let pack = lib.make_pack("My Pack", &["x", "y", "z"]);

    let seen = std::cell::Cell::new((0, 0));
    let overwrite = |new: &SimfilePack, old: &SimfilePack| {
        seen.set((new.song_count(), old.song_count()));
        true
    };

    let added = add_pack(
        &input(&pack),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    )
    .unwrap();

    assert_eq!(seen.get(), (3, 5));
    assert_eq!(added.pack.song_count(), 3);
    assert!(!existing.join("a").exists());
    assert!(existing.join("x").is_dir());
}

#[test]
fn test_add_pack_without_courses_keeps_existing_courses() {
    let lib = TestLibrary::new();
    common::write_file(&lib.courses().join("My Pack/old.crs"), "#COURSE:Old;");
    common::make_song(&lib.packs().join("My Pack"), "Old Song");
    let pack = lib.make_pack("My Pack", &["New Song"]);
    let overwrite = always(true);

    let added = add_pack(
        &input(&pack),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    )
    .unwrap();

    assert_eq!(added.course_count, 0);
    assert!(lib.courses().join("My Pack/old.crs").is_file());
}

#[test]
fn test_add_pack_missing_input() {
    let lib = TestLibrary::new();
    let overwrite = always(false);

    let err = add_pack(
        &input(&lib.inbox.join("nope")),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ItgError::InputNotFound { .. }));
}

#[test]
fn test_add_pack_without_charts() {
    let lib = TestLibrary::new();
    common::write_file(&lib.inbox.join("empty/readme.txt"), "nothing here");
    let overwrite = always(false);

    let err = add_pack(
        &input(&lib.inbox.join("empty")),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ItgError::NoEntityFound { .. }));
    let entries: Vec<_> = fs::read_dir(lib.packs()).unwrap().collect();
    assert_eq!(entries.len(), 1, "only Singles should remain");
    assert!(lib.work_root().is_dir());
    assert!(lib.leftover_work().is_empty(), "{:?}", lib.leftover_work());
}

#[test]
fn test_add_pack_removes_working_dir_after_success() {
    let lib = TestLibrary::new();
    let pack = lib.make_pack("My Pack", &["Song A"]);
    let overwrite = always(false);

    add_pack(
        &input(&pack),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    )
    .unwrap();

    assert!(lib.work_root().is_dir());
    assert!(lib.leftover_work().is_empty(), "{:?}", lib.leftover_work());
}

#[test]
fn test_add_pack_removes_working_dir_after_declined_overwrite() {
    let lib = TestLibrary::new();
    common::make_song(&lib.packs().join("My Pack"), "Old Song");
    let pack = lib.make_pack("My Pack", &["New Song"]);
    let overwrite = always(false);

    let err = add_pack(
        &input(&pack),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ItgError::OverwriteDeclined { .. }));
    assert!(lib.leftover_work().is_empty(), "{:?}", lib.leftover_work());
}

#[test]
#[serial]
fn test_add_pack_from_current_dir() {
    let lib = TestLibrary::new();
    let pack = lib.make_pack("My Pack", &["Song A", "Song B"]);
    let overwrite = always(false);

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(&pack).unwrap();
    let result = add_pack(
        &InputSpec::parse("."),
        &lib.library(),
        &common::offline(),
        PackPolicy {
            overwrite: &overwrite,
            tie_break: None,
        },
    );
    std::env::set_current_dir(previous).unwrap();

    let added = result.unwrap();
    assert_eq!(added.pack.name, "My Pack");
    assert_eq!(added.pack.song_count(), 2);
    assert!(lib.song_in_library("My Pack", "Song B").is_dir());
}
