use crate::constants::STORAGE_KEY;
use crate::game::GameState;
use crate::snapshot::SavedGame;
use crate::types::{CardSlot, Prize};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use tracing::warn;

// Persistence gateway. Storage is best effort: a missing or unreadable blob starts a new
// game and a failed write never interrupts play.

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryStore {
    /// A store whose writes always fail, as a full browser quota would.
    pub fn read_only() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes {
            return Err(anyhow!("storage quota exceeded"));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn load_game<S: KeyValueStore + ?Sized>(store: &S, catalog: &[Prize]) -> Option<Vec<CardSlot>> {
    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("could not read saved game: {e:#}");
            return None;
        }
    };
    let saved: SavedGame = match serde_json::from_str(&raw) {
        Ok(saved) => saved,
        Err(e) => {
            warn!("discarding unreadable saved game: {e}");
            return None;
        }
    };
    match saved.into_slots(catalog) {
        Ok(slots) => Some(slots),
        Err(e) => {
            warn!("discarding saved game: {e}");
            None
        }
    }
}

/// Writes the whole game as one blob. Returns false if the write was dropped.
pub fn save_game<S: KeyValueStore + ?Sized>(store: &mut S, state: &GameState, catalog: &[Prize]) -> bool {
    let saved = SavedGame::capture(state, catalog);
    let result = serde_json::to_string(&saved)
        .map_err(anyhow::Error::from)
        .and_then(|json| store.set(STORAGE_KEY, &json));
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("could not save game: {e:#}");
            false
        }
    }
}
