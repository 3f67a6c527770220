use crate::certificate::{Celebration, Certificate};
use crate::constants::*;
use crate::game::GameState;
use crate::rng::{allocate, new_game_rng};
use crate::storage::{load_game, save_game, KeyValueStore};
use crate::types::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

// Game lifecycle. Owns the state and the store, persists after every confirmed pick and at
// the end, and hands the adapter the effects it has to play out (repaints, the end-of-game
// pause, the certificate).

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Progress {
    Unchanged,
    Revealed,
    /// All picks are revealed. The certificate follows after `delay_ms`.
    Completed { delay_ms: u32 },
}

pub struct Session<S: KeyValueStore> {
    state: GameState,
    catalog: Vec<Prize>,
    store: S,
    announced: bool,
}

impl<S: KeyValueStore> Session<S> {
    pub fn start(store: S, catalog: Vec<Prize>) -> Self {
        Self::start_with_rng(store, catalog, &mut new_game_rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(store: S, catalog: Vec<Prize>, rng: &mut R) -> Self {
        let mut session = Self {
            state: GameState::default(),
            catalog,
            store,
            announced: false,
        };
        match load_game(&session.store, &session.catalog) {
            Some(slots) => {
                info!(
                    scratched = slots.iter().filter(|s| s.scratched).count(),
                    "restored saved game"
                );
                session.state = GameState::restore(slots, SELECTIONS_ALLOWED);
            }
            None => {
                let slots = allocate(&session.catalog, rng);
                session.state = GameState::new(slots, SELECTIONS_ALLOWED);
                session.persist();
                info!(slots = session.state.slots.len(), "started new game");
            }
        }
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_restored(&self) -> bool {
        self.state.restored
    }

    pub fn select(&mut self, slot: usize) -> SelectOutcome {
        self.state.select_card(slot)
    }

    pub fn cancel(&mut self) {
        self.state.cancel_selection();
    }

    pub fn confirm(&mut self) -> Result<Confirmation, String> {
        let confirmation = self.state.confirm_selection()?;
        self.persist();
        Ok(confirmation)
    }

    pub fn release(&mut self, slot: usize) {
        self.state.release_scratch(slot);
    }

    pub fn scratch_progress(&mut self, slot: usize, transparent_fraction: f64) -> Progress {
        match self.state.record_reveal(slot, transparent_fraction) {
            RevealOutcome::Unchanged => Progress::Unchanged,
            RevealOutcome::Revealed => Progress::Revealed,
            RevealOutcome::GameComplete => {
                if self.state.finish() {
                    self.persist();
                    Progress::Completed {
                        delay_ms: END_GAME_DELAY_MS,
                    }
                } else {
                    Progress::Revealed
                }
            }
        }
    }

    /// Produces the certificate and fires the celebration, once per session. Called after
    /// the end-of-game pause, or straight away for a restored game.
    pub fn announce<C: Celebration + ?Sized>(&mut self, celebration: &C) -> Option<Certificate> {
        if !self.state.is_ended() || self.announced {
            return None;
        }
        self.announced = true;
        celebration.celebrate();
        Some(Certificate::from_state(&self.state))
    }

    pub fn certificate(&self) -> Option<Certificate> {
        self.state
            .is_ended()
            .then(|| Certificate::from_state(&self.state))
    }

    pub fn reveal_all(&mut self) -> Vec<usize> {
        self.state.reveal_all()
    }

    fn persist(&mut self) {
        save_game(&mut self.store, &self.state, &self.catalog);
    }
}
