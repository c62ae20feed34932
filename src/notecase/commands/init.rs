use crate::commands::{CmdMessage, CmdResult};
use crate::config::NotecaseConfig;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Creates the data directory and writes a default config if there is none.
pub fn run(data_dir: &Path) -> Result<CmdResult> {
    fs::create_dir_all(data_dir)?;
    let mut result = CmdResult::default();

    if data_dir.join("config.json").exists() {
        result.add_message(CmdMessage::info(format!(
            "Store already initialized at {}",
            data_dir.display()
        )));
        return Ok(result);
    }

    NotecaseConfig::default().save(data_dir)?;
    result.add_message(CmdMessage::success(format!(
        "Initialized notecase store at {}",
        data_dir.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_dir_and_config_once() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data");

        let first = run(&dir).unwrap();
        assert!(dir.join("config.json").exists());
        assert!(first.messages[0].content.starts_with("Initialized"));

        let second = run(&dir).unwrap();
        assert!(second.messages[0].content.contains("already"));
    }
}
