use crate::infrastructure::{CliError, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use treasure_hunt_core::{KeyValueStore, StorageError};

/// Key-value store backed by a directory, one `<key>.json` file per key.
///
/// Writes go through a temporary file in the same directory and are renamed
/// into place, so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if missing) a data directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.exists() && !root.is_dir() {
            return Err(CliError::invalid_directory(root));
        }

        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }
}

/// Bytes escaped in file names: everything outside `[A-Za-z0-9._-]`
const KEY_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Keys become file names: anything outside `[A-Za-z0-9._-]` is `%XX`-escaped
fn encode_key(key: &str) -> String {
    let encoded = utf8_percent_encode(key, KEY_ESCAPES).to_string();
    // A leading dot would hide the file
    match encoded.strip_prefix('.') {
        Some(rest) => format!("%2E{}", rest),
        None => encoded,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!(?e, key, "Failed to read entry");
                Err(StorageError::Backend(format!("{}: {}", path.display(), e)))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        let path = self.path_for(key);
        debug!(key, bytes = value.len(), "Writing entry");

        let write = || -> std::io::Result<()> {
            let mut file = tempfile::NamedTempFile::new_in(&self.root)?;
            file.write_all(value.as_bytes())?;
            file.persist(&path).map_err(|e| e.error)?;
            Ok(())
        };

        write().map_err(|e| {
            error!(?e, key, "Failed to write entry");
            StorageError::Backend(format!("{}: {}", path.display(), e))
        })
    }

    fn remove(&self, key: &str) -> std::result::Result<(), StorageError> {
        let path = self.path_for(key);
        debug!(key, "Removing entry");
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!(?e, key, "Failed to remove entry");
                Err(StorageError::Backend(format!("{}: {}", path.display(), e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use treasure_hunt_core::{JsonStoreExt, Quest, QuestStateStore};

    #[test]
    fn test_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("treasure-hunt-users").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("treasure-hunt-users", "[]").unwrap();
        assert_eq!(
            store.get("treasure-hunt-users").unwrap().as_deref(),
            Some("[]")
        );
        assert!(dir.path().join("treasure-hunt-users.json").is_file());

        store.set("treasure-hunt-users", "[1]").unwrap();
        assert_eq!(
            store.get("treasure-hunt-users").unwrap().as_deref(),
            Some("[1]")
        );

        store.remove("treasure-hunt-users").unwrap();
        assert_eq!(store.get("treasure-hunt-users").unwrap(), None);
        // Second remove is a no-op
        store.remove("treasure-hunt-users").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store
                .save_json("treasure-hunt-master-quest", &Quest::default_template())
                .unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        let quest: Option<Quest> = store.load_json("treasure-hunt-master-quest").unwrap();
        assert_eq!(quest, Some(Quest::default_template()));
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("data").join("hunt");

        let store = FileStore::open(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn test_open_rejects_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();

        assert!(matches!(
            FileStore::open(&file),
            Err(CliError::InvalidDataDirectory { .. })
        ));
    }

    #[test]
    fn test_unsafe_usernames_stay_inside_root() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        QuestStateStore::new(&store).create_fresh("../escape").unwrap();

        assert!(QuestStateStore::new(&store).read("../escape").unwrap().is_some());
        assert!(!dir.path().parent().unwrap().join("escape.json").exists());
        assert!(dir
            .path()
            .join("treasure-quest-state-..%2Fescape.json")
            .is_file());
    }

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("treasure-hunt-users"), "treasure-hunt-users");
        assert_eq!(encode_key("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_key(".hidden"), "%2Ehidden");
        assert_eq!(encode_key("..hidden"), "%2E.hidden");
        assert_eq!(encode_key("v1.2_x"), "v1.2_x");
        assert_eq!(encode_key("mïra"), "m%C3%AFra");
    }
}
