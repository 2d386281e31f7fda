use super::SnapshotStore;
use crate::error::{Result, ShortenError};
use crate::mapping::MappingStore;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// Default snapshot file name, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "mapping.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_FILE)
    }
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn tmp_path(&self, dir: &Path) -> PathBuf {
        let stem = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_STORE_FILE.to_string());
        dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()))
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| ShortenError::persistence(dir, e))?;
        }
        Ok(())
    }

    fn write_snapshot(tmp: &Path, store: &MappingStore) -> io::Result<()> {
        let file = File::create(tmp)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, store)?;
        writer.write_all(b"\n")?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }

    /// Flushes the directory entry so a completed rename survives a crash.
    #[cfg(unix)]
    fn sync_dir(dir: &Path) -> io::Result<()> {
        File::open(dir)?.sync_all()
    }

    #[cfg(not(unix))]
    fn sync_dir(_dir: &Path) -> io::Result<()> {
        Ok(())
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<MappingStore> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no mapping file yet, starting empty");
                return Ok(MappingStore::new());
            }
            Err(e) => return Err(ShortenError::persistence(&self.path, e)),
        };

        let store: MappingStore =
            serde_json::from_str(&content).map_err(|e| ShortenError::corrupt(&self.path, e))?;
        info!(path = %self.path.display(), entries = store.len(), "loaded mappings");
        Ok(store)
    }

    fn save(&mut self, store: &MappingStore) -> Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;

        let tmp = self.tmp_path(&dir);
        debug!(tmp = %tmp.display(), "writing snapshot");

        let written =
            Self::write_snapshot(&tmp, store).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(ShortenError::persistence(&self.path, e));
        }
        Self::sync_dir(&dir).map_err(|e| ShortenError::persistence(&dir, e))?;

        info!(path = %self.path.display(), entries = store.len(), "saved mappings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("mapping.json"));
        (dir, store)
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, backend) = setup();
        let store = backend.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, mut backend) = setup();
        let mut store = MappingStore::new();
        store.add("https://example.com").unwrap();
        store.add("https://another.example/page").unwrap();

        backend.save(&store).unwrap();
        let loaded = backend.load().unwrap();

        assert_eq!(loaded, store);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let (_dir, mut backend) = setup();
        let mut store = MappingStore::new();
        store.add("https://one.example").unwrap();
        backend.save(&store).unwrap();

        backend.save(&MappingStore::new()).unwrap();
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_leaves_no_tmp_files() {
        let (dir, mut backend) = setup();
        let mut store = MappingStore::new();
        store.add("https://example.com").unwrap();
        backend.save(&store).unwrap();

        for entry in fs::read_dir(dir.path()).unwrap() {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn test_parent_dir_of_bare_file_name() {
        let backend = FileStore::new("mapping.json");
        assert_eq!(backend.parent_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_sync_dir() {
        let (dir, mut backend) = setup();
        FileStore::sync_dir(dir.path()).unwrap();

        backend.save(&MappingStore::new()).unwrap();
        assert!(backend.load().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_sync_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        assert!(FileStore::sync_dir(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_save_creates_missing_parent() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileStore::new(dir.path().join("nested/deeper/mapping.json"));
        backend.save(&MappingStore::new()).unwrap();
        assert!(backend.path().exists());
    }

    #[test]
    fn test_load_corrupt_json() {
        let (_dir, backend) = setup();
        fs::write(backend.path(), "{ not json").unwrap();
        assert!(matches!(
            backend.load(),
            Err(ShortenError::CorruptState { .. })
        ));
    }

    #[test]
    fn test_load_empty_file_is_corrupt() {
        let (_dir, backend) = setup();
        fs::write(backend.path(), "").unwrap();
        assert!(matches!(
            backend.load(),
            Err(ShortenError::CorruptState { .. })
        ));
    }

    #[test]
    fn test_load_rejects_bad_code_key() {
        let (_dir, backend) = setup();
        fs::write(backend.path(), r#"{"abc123": "https://example.com"}"#).unwrap();
        match backend.load() {
            Err(ShortenError::CorruptState { reason, .. }) => {
                assert!(reason.contains("invalid code"), "reason: {}", reason)
            }
            other => panic!("expected CorruptState, got {:?}", other),
        }
    }

    #[test]
    fn test_load_directory_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let backend = FileStore::new(dir.path());
        assert!(matches!(
            backend.load(),
            Err(ShortenError::Persistence { .. })
        ));
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let (dir, mut backend) = setup();
        let mut store = MappingStore::new();
        store.add("https://kept.example").unwrap();
        backend.save(&store).unwrap();

        // Renaming a file over a non-empty directory fails on every platform.
        let blocked = dir.path().join("blocked");
        fs::create_dir_all(blocked.join("inner")).unwrap();
        let mut bad = FileStore::new(&blocked);
        assert!(matches!(
            bad.save(&store),
            Err(ShortenError::Persistence { .. })
        ));

        assert_eq!(backend.load().unwrap(), store);
        for entry in fs::read_dir(dir.path()).unwrap() {
            let name = entry.unwrap().file_name();
            assert!(!name.to_string_lossy().ends_with(".tmp"));
        }
    }
}
