//! Common test utilities for itg-cli integration tests

use std::fs;
use std::path::{Path, PathBuf};

use itg_cli::error::{ItgError, Result};
use itg_cli::library::Library;
use itg_cli::source::{ArchiveExtractor, Collaborators, Fetch};
use tempfile::TempDir;

/// A throwaway game data root with its library folders and a config file
#[allow(dead_code)]
pub struct TestLibrary {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Game data root
    pub root: PathBuf,
    /// Where inputs are prepared before being added
    pub inbox: PathBuf,
}

#[allow(dead_code)]
impl TestLibrary {
    /// Create `Songs/Singles`, `Courses`, `Cache/Songs` and an inbox
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("itgmania");
        for dir in ["Songs/Singles", "Courses", "Cache/Songs"] {
            fs::create_dir_all(root.join(dir)).expect("Failed to create library directory");
        }
        let inbox = temp.path().join("inbox");
        fs::create_dir_all(&inbox).expect("Failed to create inbox");
        Self { temp, root, inbox }
    }

    pub fn packs(&self) -> PathBuf {
        self.root.join("Songs")
    }

    pub fn singles(&self) -> PathBuf {
        self.packs().join("Singles")
    }

    pub fn courses(&self) -> PathBuf {
        self.root.join("Courses")
    }

    pub fn cache(&self) -> PathBuf {
        self.root.join("Cache")
    }

    pub fn library(&self) -> Library {
        Library {
            packs: self.packs(),
            singles: self.singles(),
            courses: self.courses(),
            cache: self.cache(),
            downloads: None,
            work_root: Some(self.work_root()),
            delete_macos_files: false,
        }
    }

    /// Base the pipelines stage their working directories under
    pub fn work_root(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    /// Entries left under the working base
    pub fn leftover_work(&self) -> Vec<PathBuf> {
        match fs::read_dir(self.work_root()) {
            Ok(entries) => entries.filter_map(|e| e.ok().map(|e| e.path())).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Write a `config.yaml` pointing at this library and return its path
    pub fn write_config(&self) -> PathBuf {
        let path = self.temp.path().join("config").join("config.yaml");
        let yaml = format!(
            "root: {}\nsingles_pack_name: Singles\ndelete_macos_files: false\nwork_dir: {}\n",
            self.root.display(),
            self.work_root().display()
        );
        write_file(&path, &yaml);
        path
    }

    /// Build `inbox/<rel>/<song>/<song>.sm` for each song and return `inbox/<rel>`
    pub fn make_pack(&self, rel: &str, songs: &[&str]) -> PathBuf {
        let pack = self.inbox.join(rel);
        for song in songs {
            make_song(&pack, song);
        }
        pack
    }

    /// Path of a song inside the library's packs folder
    pub fn song_in_library(&self, pack: &str, song: &str) -> PathBuf {
        self.packs().join(pack).join(song)
    }

    /// Create the cache entry the game keeps for a library song
    pub fn make_cache_entry(&self, pack: &str, song: &str) -> PathBuf {
        let entry = self.cache().join("Songs").join(format!("Songs_{pack}_{song}"));
        write_file(&entry, "cached");
        entry
    }
}

/// Write a file, creating parent folders
#[allow(dead_code)]
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
}

/// Minimal `.sm` chart with one dance-single chart of the given meter
#[allow(dead_code)]
pub fn sm_text(title: &str, meter: u32) -> String {
    format!(
        "#TITLE:{title};\n#ARTIST:Test Artist;\n\
         #NOTES:\n dance-single:\n :\n Hard:\n {meter}:\n 0,0,0,0,0:\n0000\n;\n"
    )
}

/// Create `<parent>/<song>/<song>.sm` and return the song folder
#[allow(dead_code)]
pub fn make_song(parent: &Path, song: &str) -> PathBuf {
    let dir = parent.join(song);
    write_file(&dir.join(format!("{song}.sm")), &sm_text(song, 9));
    dir
}

/// Fetcher for tests that never touch the network
#[allow(dead_code)]
pub struct NoNetwork;

impl Fetch for NoNetwork {
    fn fetch(&self, url: &str, _dest_dir: &Path) -> Result<PathBuf> {
        Err(ItgError::DownloadFailed {
            url: url.to_string(),
            reason: "network disabled in tests".to_string(),
        })
    }
}

#[allow(dead_code)]
pub fn offline() -> Collaborators<'static> {
    Collaborators {
        fetcher: &NoNetwork,
        extractor: &ArchiveExtractor,
    }
}

/// Path to the itg-cli binary
#[allow(dead_code)]
pub fn itg_cli_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_itg-cli"))
}
