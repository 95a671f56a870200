use std::fs;
use std::path::{Path, PathBuf};

use eyre::Result;
use log::{debug, info};

/// Key-value persistence behind the feed cache. The binary uses the
/// file-backed store; flows only see this trait so tests can swap in an
/// in-memory fake.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// One file per key under a dot-directory next to where the binary runs.
/// Writes are whole-value replacements, last write wins.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            info!("created storage directory: {}", dir.display());
        }
        Ok(FileStorage { dir })
    }

    fn file_for(&self, key: &str) -> PathBuf {
        // Keys are plain identifiers, but never trust them as paths.
        self.dir.join(key.replace(['/', '\\'], "-"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.file_for(key)) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("no stored value for {}: {}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.file_for(key), value)?;
        debug!("stored {} ({} bytes)", key, value.len());
        Ok(())
    }
}

/// HashMap-backed store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    values: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
