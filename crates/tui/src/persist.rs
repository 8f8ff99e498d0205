use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use swipecon_core::CommandHistory;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SavedHistory {
    pub entries: Vec<String>,
}

impl From<&CommandHistory> for SavedHistory {
    fn from(h: &CommandHistory) -> Self {
        SavedHistory {
            entries: h.entries().to_vec(),
        }
    }
}

pub fn history_path() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    Some(base.data_dir().join("swipecon").join("history.json"))
}

pub fn load_history() -> Result<Option<CommandHistory>> {
    match history_path() {
        Some(path) => load_history_from(&path),
        None => Ok(None),
    }
}

pub fn save_history(history: &CommandHistory) -> Result<()> {
    match history_path() {
        Some(path) => save_history_to(&path, history),
        None => Ok(()),
    }
}

pub fn load_history_from(path: &Path) -> Result<Option<CommandHistory>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read(path).with_context(|| format!("read history file: {}", path.display()))?;
    let saved: SavedHistory =
        serde_json::from_slice(&data).with_context(|| "parse history json")?;
    Ok(Some(CommandHistory::from_entries(saved.entries)))
}

pub fn save_history_to(path: &Path, history: &CommandHistory) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok();
    }
    let saved = SavedHistory::from(history);
    let data = serde_json::to_vec_pretty(&saved)?;
    let mut tmp = path.to_path_buf();
    tmp.set_extension("json.tmp");
    {
        let mut f =
            fs::File::create(&tmp).with_context(|| format!("create tmp: {}", tmp.display()))?;
        f.write_all(&data)?;
        f.flush()?;
    }
    fs::rename(&tmp, path).with_context(|| format!("persist history to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("swipecon-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn history_survives_a_save_load_cycle() {
        let path = scratch("cycle/history.json");
        let h = CommandHistory::from_entries(["stat fps", "r.vsync 0", "quit"]);
        save_history_to(&path, &h).unwrap();
        let loaded = load_history_from(&path).unwrap().unwrap();
        assert_eq!(loaded.entries(), h.entries());
        assert_eq!(loaded.cursor(), loaded.len());
        assert!(!path.with_extension("json.tmp").exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn hand_edited_duplicates_collapse_on_load() {
        let path = scratch("dupes/history.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"entries":["a","b","a"]}"#).unwrap();
        let loaded = load_history_from(&path).unwrap().unwrap();
        assert_eq!(loaded.entries(), ["b", "a"]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        assert!(load_history_from(&scratch("absent/history.json")).unwrap().is_none());
    }
}
