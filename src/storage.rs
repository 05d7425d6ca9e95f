use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ConsoleError, ConsoleResult};

/// Storage key holding the raw credential.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the serialized session profile.
pub const PROFILE_KEY: &str = "profile";

// 1. KeyValueStore Contract
/// KeyValueStore
///
/// Durable, string-valued local storage. Every write is synchronous: when `set` or
/// `remove` returns `Ok`, the change survives a process restart.
///
/// Removing a key that is not present is a successful no-op, which keeps forced
/// session clears idempotent.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> ConsoleResult<()>;

    fn remove(&self, key: &str) -> ConsoleResult<()>;
}

// 2. The Real Implementation (JSON file on disk)
/// FileStorage
///
/// Keeps the whole store as one JSON object in a single file. The in-memory copy is
/// written through on every mutation via a temp file + rename.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// open
    ///
    /// Loads the file if it exists. A missing file is an empty store; an unreadable
    /// or corrupt one is logged and treated as empty rather than blocking startup.
    pub fn open(path: impl AsRef<Path>) -> ConsoleResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "session file is corrupt, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(ConsoleError::Io(e)),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> ConsoleResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ConsoleResult<()> {
        let mut entries = self.entries.lock();
        let previous = entries.insert(key.to_string(), value.to_string());

        if let Err(e) = self.flush(&entries) {
            // Keep memory consistent with what is on disk.
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> ConsoleResult<()> {
        let mut entries = self.entries.lock();
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.flush(&entries) {
            entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}

// 3. The In-Memory Implementation (tests, ephemeral sessions)
/// MemoryStorage
///
/// Process-local store. `new_failing` builds a store whose writes always fail, used to
/// exercise the rollback paths of the session store.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    /// When true, `set` and `remove` return a simulated failure.
    pub should_fail: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            should_fail: true,
        }
    }

    /// Seeds entries without going through the failure switch.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        {
            let mut map = store.entries.lock();
            for (key, value) in entries {
                map.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ConsoleResult<()> {
        if self.should_fail {
            return Err(ConsoleError::Storage(
                "Mock Storage Error: Simulation requested".to_string(),
            ));
        }
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ConsoleResult<()> {
        if self.should_fail {
            return Err(ConsoleError::Storage(
                "Mock Storage Error: Simulation requested".to_string(),
            ));
        }
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// StorageState
///
/// Shared handle to the durable store used by the session store and the pipeline.
pub type StorageState = Arc<dyn KeyValueStore>;
