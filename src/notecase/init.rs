use crate::api::NotecaseApi;
use crate::config::NotecaseConfig;
use crate::error::{NotecaseError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides the data directory (config and storage) when set.
pub const HOME_ENV: &str = "NOTECASE_HOME";

pub struct NotecaseContext {
    pub api: NotecaseApi<FileStore>,
    pub config: NotecaseConfig,
}

/// Resolves the data directory: `NOTECASE_HOME` if set, else the platform data dir.
pub fn data_dir() -> Result<PathBuf> {
    resolve_data_dir(std::env::var_os(HOME_ENV).map(PathBuf::from))
}

fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    ProjectDirs::from("com", "notecase", "notecase")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NotecaseError::Api("Could not determine a data directory".into()))
}

/// Builds the API over the file store in `data_dir`.
///
/// A config file that cannot be read falls back to defaults so a broken config never
/// locks the user out of their notes.
pub fn initialize(data_dir: &Path) -> NotecaseContext {
    let config = match NotecaseConfig::load(data_dir) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring unreadable config in {}: {}", data_dir.display(), e);
            NotecaseConfig::default()
        }
    };
    log::debug!(
        "using data dir {} with storage key '{}'",
        data_dir.display(),
        config.storage_key
    );

    let store = FileStore::new(data_dir.to_path_buf());
    let api = NotecaseApi::new(store, config.clone(), data_dir.to_path_buf());

    NotecaseContext { api, config }
}
