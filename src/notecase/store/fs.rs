use super::KeyValueStore;
use crate::error::{NotecaseError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

pub const STORAGE_FILENAME: &str = "storage.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.root.join(STORAGE_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NotecaseError::Io)?;
        }
        Ok(())
    }

    fn load_all(&self) -> Result<Map<String, Value>> {
        let path = self.storage_path();
        if !path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&path).map_err(NotecaseError::Io)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(NotecaseError::Store(format!(
                "{} does not contain a JSON object",
                path.display()
            ))),
            Err(e) => Err(NotecaseError::Store(format!(
                "{} is corrupt: {}",
                path.display(),
                e
            ))),
        }
    }

    fn save_all(&self, all: &Map<String, Value>) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(all).map_err(NotecaseError::Serialization)?;

        // Atomic replace: a crash mid-write leaves the old file in place
        let tmp_file = self.root.join(format!(".storage-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_file, content) {
            let _ = fs::remove_file(&tmp_file);
            return Err(NotecaseError::Io(e));
        }
        fs::rename(&tmp_file, self.storage_path()).map_err(|e| {
            let _ = fs::remove_file(&tmp_file);
            NotecaseError::Io(e)
        })?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut all = self.load_all()?;
        Ok(all.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut all = self.load_all()?;
        all.insert(key.to_string(), value);
        self.save_all(&all)?;
        log::debug!("wrote key {} to {}", key, self.storage_path().display());
        Ok(())
    }
}
