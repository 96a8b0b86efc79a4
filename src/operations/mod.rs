//! Operations module for library changes
//!
//! Each operation is a complete pipeline over an explicit [`Library`](crate::library::Library):
//! - `add_pack`: stage, locate the pack, resolve conflicts, commit with courses
//! - `add_song`: stage, locate the single song, resolve conflicts, commit to singles
//! - `censor`: move songs into and out of the quarantine folder
//!
//! Interactive decisions arrive as callbacks so the same code runs from the
//! CLI and from tests.

pub mod add_pack;
pub mod add_song;
pub mod censor;

pub use add_pack::{AddedPack, PackOverwriteHandler, PackPolicy, add_pack};
pub use add_song::{AddedSong, OpenedSong, SongOverwriteHandler, add_song};
pub use censor::{CensoredSong, censor, list_censored, uncensor};
