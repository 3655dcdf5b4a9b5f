use anyhow::{Context, Result};
use pigeon_core::JsonFileStore;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;

/// `$PIGEON_HOME`, or `~/.pigeon`.
pub fn pigeon_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PIGEON_HOME")
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".pigeon"))
}

pub fn ensure_pigeon_home() -> Result<PathBuf> {
    let dir = pigeon_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Where the JSON lists live: CLI flag, then config, then `<home>/data`.
pub fn data_dir(cfg: &Config, flag: Option<PathBuf>) -> Result<PathBuf> {
    match flag.or_else(|| cfg.storage.data_dir.clone()) {
        Some(dir) => Ok(dir),
        None => Ok(pigeon_home()?.join("data")),
    }
}

/// The one store handed to every page for this run.
pub fn open_store(cfg: &Config, flag: Option<PathBuf>) -> Result<JsonFileStore> {
    let dir = data_dir(cfg, flag)?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    debug!(dir = %dir.display(), "opened data directory");
    Ok(JsonFileStore::new(dir))
}
