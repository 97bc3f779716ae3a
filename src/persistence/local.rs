//! Local save slots on disk

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::core::error::{GeoError, Result};
use crate::world::state::GameState;

const SAVE_EXTENSION: &str = "json";
const TIMESTAMP_EXTENSION: &str = "timestamp";

/// A save slot and when it was last written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveInfo {
    pub slot: String,
    /// Seconds since the Unix epoch, if the sidecar is readable
    pub saved_at: Option<u64>,
}

/// Directory of named save slots: `<slot>.json` plus a `<slot>.timestamp` sidecar
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn validate_slot(slot: &str) -> Result<()> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(())
        } else {
            Err(GeoError::InvalidSlot(slot.to_string()))
        }
    }

    fn slot_path(&self, slot: &str, extension: &str) -> Result<PathBuf> {
        Self::validate_slot(slot)?;
        Ok(self.dir.join(format!("{}.{}", slot, extension)))
    }

    /// Write a slot atomically (temp file then rename)
    pub fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        let path = self.slot_path(slot, SAVE_EXTENSION)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!(".{}.{}.tmp", slot, SAVE_EXTENSION));
        fs::write(&tmp, state.to_json()?)?;
        fs::rename(&tmp, &path)?;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        fs::write(self.slot_path(slot, TIMESTAMP_EXTENSION)?, now.to_string())?;

        debug!(slot, turn = state.turn, "saved locally");
        Ok(())
    }

    /// Load a slot. Missing or unreadable save data counts as no save.
    pub fn load(&self, slot: &str) -> Result<Option<GameState>> {
        let path = self.slot_path(slot, SAVE_EXTENSION)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match GameState::from_json(&content) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!(slot, error = %e, "ignoring malformed save");
                Ok(None)
            }
        }
    }

    pub fn saved_at(&self, slot: &str) -> Option<u64> {
        let path = self.slot_path(slot, TIMESTAMP_EXTENSION).ok()?;
        fs::read_to_string(path).ok()?.trim().parse().ok()
    }

    /// All slots in the directory, newest first
    pub fn list_saves(&self) -> Result<Vec<SaveInfo>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut saves = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION) {
                continue;
            }
            let Some(slot) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if Self::validate_slot(slot).is_err() {
                continue;
            }
            saves.push(SaveInfo {
                slot: slot.to_string(),
                saved_at: self.saved_at(slot),
            });
        }

        saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then_with(|| a.slot.cmp(&b.slot)));
        Ok(saves)
    }

    /// Remove a slot; returns whether anything was deleted
    pub fn delete(&self, slot: &str) -> Result<bool> {
        let removed = remove_if_exists(&self.slot_path(slot, SAVE_EXTENSION)?)?;
        remove_if_exists(&self.slot_path(slot, TIMESTAMP_EXTENSION)?)?;
        Ok(removed)
    }
}

fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Write a human-readable copy of the game to an arbitrary path
pub fn export_to_file(state: &GameState, path: &Path) -> Result<()> {
    fs::write(path, state.to_json_pretty()?)?;
    Ok(())
}

/// Read an exported game; unlike slot loading, bad data is an error
pub fn import_from_file(path: &Path) -> Result<GameState> {
    let content = fs::read_to_string(path)?;
    GameState::from_json(&content)
}
