//! SaveManager - where games go after each turn and where they come from at startup
//!
//! Remote first when configured, local disk otherwise or on any remote
//! failure. Nothing here can fail a turn: every error is logged and
//! reported as a `SaveTarget`.

use rand::Rng;
use tracing::{info, warn};

use crate::core::config::{PersistenceConfig, WorldConfig};
use crate::persistence::local::LocalStore;
use crate::persistence::remote::RemoteStore;
use crate::world::generation::generate_world;
use crate::world::state::GameState;

/// Where a save ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Remote,
    Local,
    /// No remote took the save and local autosave is switched off
    Skipped,
    /// Neither target accepted the save
    Failed,
}

/// Where a starting game came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Local(String),
    Generated,
}

pub struct SaveManager {
    config: PersistenceConfig,
    local: LocalStore,
    remote: Option<RemoteStore>,
}

impl SaveManager {
    pub fn new(config: PersistenceConfig, remote: Option<RemoteStore>) -> Self {
        let local = LocalStore::new(config.save_dir.clone());
        Self {
            config,
            local,
            remote,
        }
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Save after a completed turn.
    ///
    /// A configured remote service is always tried; the `autosave` setting
    /// only decides whether a local copy is written when there is none or
    /// it fails.
    pub async fn autosave(&self, state: &GameState) -> SaveTarget {
        if self.save_remote(state, &save_name(state, "Auto-save")).await {
            return SaveTarget::Remote;
        }
        if !self.config.autosave {
            return SaveTarget::Skipped;
        }
        self.save_local(&self.config.autosave_slot, state)
    }

    /// Explicit save requested by the player; falls back to the manual slot
    pub async fn save(&self, state: &GameState) -> SaveTarget {
        let name = save_name(state, &format!("Turn {}", state.turn));
        if self.save_remote(state, &name).await {
            return SaveTarget::Remote;
        }
        self.save_local(&self.config.manual_slot, state)
    }

    async fn save_remote(&self, state: &GameState, name: &str) -> bool {
        let Some(remote) = &self.remote else {
            return false;
        };
        match remote.save(state, name).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "remote save failed, falling back to local");
                false
            }
        }
    }

    fn save_local(&self, slot: &str, state: &GameState) -> SaveTarget {
        match self.local.save(slot, state) {
            Ok(()) => SaveTarget::Local,
            Err(e) => {
                warn!(slot, error = %e, "local save failed");
                SaveTarget::Failed
            }
        }
    }

    /// The most recent saved game: remote, then the newer of the local slots
    pub async fn load_existing(&self) -> Option<(GameState, LoadSource)> {
        if let Some(remote) = &self.remote {
            match remote.load().await {
                Ok(Some(state)) => return Some((state, LoadSource::Remote)),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "remote load failed, trying local saves"),
            }
        }

        let mut slots = [
            self.config.autosave_slot.as_str(),
            self.config.manual_slot.as_str(),
        ];
        slots.sort_by_key(|slot| std::cmp::Reverse(self.local.saved_at(slot)));

        for slot in slots {
            match self.local.load(slot) {
                Ok(Some(state)) => return Some((state, LoadSource::Local(slot.to_string()))),
                Ok(None) => {}
                Err(e) => warn!(slot, error = %e, "local load failed"),
            }
        }
        None
    }

    /// Resume the last game, or start a fresh world
    pub async fn load_or_generate<R: Rng + ?Sized>(
        &self,
        world: &WorldConfig,
        rng: &mut R,
    ) -> (GameState, LoadSource) {
        if let Some(found) = self.load_existing().await {
            info!(source = ?found.1, turn = found.0.turn, "resuming saved game");
            return found;
        }
        info!(nations = world.nation_count, "no saved game, generating world");
        (generate_world(world, rng), LoadSource::Generated)
    }
}

fn save_name(state: &GameState, suffix: &str) -> String {
    let player = state
        .player_nation()
        .map(|n| n.name.as_str())
        .unwrap_or("Unknown");
    format!("{} - {}", player, suffix)
}
