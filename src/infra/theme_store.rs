use crate::domain::{StoreError, Theme, ThemeStore};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadThemeError {
    #[error("failed to read color scheme: {0}")]
    Read(#[from] io::Error),

    #[error("failed to parse color scheme: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SaveThemeError {
    #[error("failed to encode color scheme: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write color scheme: {0}")]
    Write(#[from] io::Error),
}

fn colorscheme_path(state_dir: &Path) -> PathBuf {
    state_dir.join("colorscheme.json")
}

/// Returns the persisted scheme, or `None` when nothing has been saved yet.
/// A parse failure is an error so the caller can fall back to the default
/// scheme and tell the user, instead of dying at startup.
pub fn load_active_theme(state_dir: &Path) -> Result<Option<Theme>, LoadThemeError> {
    let path = colorscheme_path(state_dir);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };

    Ok(Some(serde_json::from_str(&raw)?))
}

/// Overwrites the whole record; there is deliberately no merging with a
/// previously persisted scheme.
pub fn save_active_theme(state_dir: &Path, theme: &Theme) -> Result<(), SaveThemeError> {
    fs::create_dir_all(state_dir)?;

    let path = colorscheme_path(state_dir);
    let tmp = path.with_extension("json.tmp");
    let text = serde_json::to_string_pretty(theme)?;
    fs::write(&tmp, text)?;
    fs::rename(tmp, path)?;
    Ok(())
}

pub struct JsonThemeStore {
    state_dir: PathBuf,
}

impl JsonThemeStore {
    pub fn new(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }
}

impl ThemeStore for JsonThemeStore {
    fn save(&mut self, theme: &Theme) -> Result<(), StoreError> {
        save_active_theme(&self.state_dir, theme).map_err(|error| StoreError(error.to_string()))
    }
}

/// Session-only fallback when no state directory is available.
pub struct SessionThemeStore;

impl ThemeStore for SessionThemeStore {
    fn save(&mut self, _theme: &Theme) -> Result<(), StoreError> {
        Ok(())
    }
}
