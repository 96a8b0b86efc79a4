//! Overwrite decisions
//!
//! [`resolve`] only reads: it opens both entities so the caller's policy can
//! compare them, and reports the verdict. Deleting anything is left to
//! [`crate::library`].

use std::path::{Path, PathBuf};

use crate::error::{ItgError, Result};

/// Outcome of a conflict check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Proceed,
    Abort,
}

impl Verdict {
    /// Turn an `Abort` into [`ItgError::OverwriteDeclined`] for `name`
    pub fn into_result(self, name: &str) -> Result<()> {
        match self {
            Verdict::Proceed => Ok(()),
            Verdict::Abort => Err(ItgError::OverwriteDeclined {
                name: name.to_string(),
            }),
        }
    }
}

/// The entity named `name` in `dest_root`, if one is already there
pub fn existing_entity(dest_root: &Path, name: &str) -> Option<PathBuf> {
    let path = dest_root.join(name);
    path.exists().then_some(path)
}

/// Decide whether the entity at `new_path` may replace `existing`.
///
/// With nothing at the destination the answer is always `Proceed` and
/// `verdict_fn` is not called. Otherwise both sides are opened with `open`
/// and passed to `verdict_fn(new, existing)`; `true` means overwrite.
pub fn resolve<T, O, V>(
    new_path: &Path,
    existing: Option<&Path>,
    open: O,
    verdict_fn: V,
) -> Result<Verdict>
where
    O: Fn(&Path) -> Result<T>,
    V: FnOnce(&T, &T) -> bool,
{
    let Some(existing) = existing else {
        return Ok(Verdict::Proceed);
    };

    let new = open(new_path)?;
    let old = open(existing)?;
    let verdict = if verdict_fn(&new, &old) {
        Verdict::Proceed
    } else {
        Verdict::Abort
    };
    tracing::debug!(existing = %existing.display(), ?verdict, "resolved conflict");
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simfile::SimfilePack;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    fn pack(root: &Path, name: &str, songs: usize) -> PathBuf {
        let dir = root.join(name);
        for i in 0..songs {
            let song = dir.join(format!("Song{i}"));
            fs::create_dir_all(&song).unwrap();
            fs::write(song.join("a.sm"), format!("#TITLE:Song{i};")).unwrap();
        }
        dir
    }

    #[test]
    fn test_no_existing_skips_policy() {
        let called = Cell::new(false);
        let verdict = resolve(
            Path::new("/new/Pack"),
            None,
            |_p: &Path| -> Result<()> { panic!("must not open") },
            |_: &(), _: &()| {
                called.set(true);
                false
            },
        )
        .unwrap();
        assert_eq!(verdict, Verdict::Proceed);
        assert!(!called.get());
    }

    #[test]
    fn test_policy_sees_song_counts_before_mutation() {
        let temp = TempDir::new().unwrap();
        let new = pack(&temp.path().join("work"), "MyPack", 3);
        let old = pack(&temp.path().join("Songs"), "MyPack", 5);

        let seen = Cell::new((0, 0));
        let verdict = resolve(
            &new,
            Some(old.as_path()),
            SimfilePack::open,
            |n: &SimfilePack, o: &SimfilePack| {
                seen.set((n.song_count(), o.song_count()));
                false
            },
        )
        .unwrap();

        assert_eq!(verdict, Verdict::Abort);
        assert_eq!(seen.get(), (3, 5));
        assert_eq!(fs::read_dir(&old).unwrap().count(), 5);
        assert_eq!(fs::read_dir(&new).unwrap().count(), 3);
    }

    #[test]
    fn test_verdict_into_result() {
        assert!(Verdict::Proceed.into_result("MyPack").is_ok());
        let err = Verdict::Abort.into_result("MyPack").unwrap_err();
        assert!(matches!(err, ItgError::OverwriteDeclined { ref name } if name == "MyPack"));
    }

    #[test]
    fn test_existing_entity() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("Here")).unwrap();
        assert_eq!(
            existing_entity(temp.path(), "Here"),
            Some(temp.path().join("Here"))
        );
        assert_eq!(existing_entity(temp.path(), "Gone"), None);
    }
}
