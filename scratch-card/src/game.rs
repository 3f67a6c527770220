use crate::constants::*;
use crate::surface::is_revealed;
use crate::types::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// Game engine state and the selection state machine. Every transition is a plain method on
// `GameState`; the session layer decides when to persist and the browser adapter only
// translates input events into these calls.

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GameState {
    pub slots: Vec<CardSlot>,
    pub selections_allowed: usize,
    /// Categories of confirmed picks: pick order while live, slot order after a restore
    /// (the saved blob does not record pick order).
    pub won_kinds: Vec<PrizeKind>,
    pub phase: Phase,
    pub selection: Selection,
    pub restored: bool,
    pub all_revealed: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            slots: vec![],
            selections_allowed: SELECTIONS_ALLOWED,
            won_kinds: vec![],
            phase: Phase::Initializing,
            selection: Selection::Idle,
            restored: false,
            all_revealed: false,
        }
    }
}

impl GameState {
    pub fn new(slots: Vec<CardSlot>, selections_allowed: usize) -> Self {
        Self {
            slots,
            selections_allowed,
            phase: Phase::InProgress,
            ..Self::default()
        }
    }

    /// Rehydrates a saved game. Restored games are over: every card is shown, but only the
    /// slots the player actually scratched count as won.
    pub fn restore(mut slots: Vec<CardSlot>, selections_allowed: usize) -> Self {
        for slot in slots.iter_mut() {
            slot.fully_revealed = true;
        }
        // Pick order is not saved, so wins are listed by slot.
        let won_kinds = slots
            .iter()
            .filter(|s| s.scratched)
            .map(|s| s.kind())
            .collect();
        Self {
            slots,
            selections_allowed,
            won_kinds,
            phase: Phase::Ended,
            selection: Selection::Idle,
            restored: true,
            all_revealed: true,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn selections_made(&self) -> usize {
        self.slots.iter().filter(|s| s.scratched).count()
    }

    pub fn remaining(&self) -> usize {
        self.selections_allowed.saturating_sub(self.won_kinds.len())
    }

    pub fn main_won(&self) -> usize {
        self.won_kinds
            .iter()
            .filter(|k| **k == PrizeKind::Main)
            .count()
    }

    pub fn revealed_wins(&self) -> usize {
        self.slots.iter().filter(|s| s.won()).count()
    }

    pub fn select_card(&mut self, slot: usize) -> SelectOutcome {
        if self.phase != Phase::InProgress || self.remaining() == 0 {
            return SelectOutcome::Ignored;
        }
        match self.slots.get(slot) {
            Some(card) if !card.scratched => {}
            _ => return SelectOutcome::Ignored,
        }
        self.selection = Selection::PendingConfirmation(slot);
        let remaining = self.remaining();
        SelectOutcome::Prompt(Prompt {
            slot,
            remaining,
            message: prompt_text(remaining),
        })
    }

    pub fn cancel_selection(&mut self) {
        if let Selection::PendingConfirmation(_) = self.selection {
            self.selection = Selection::Idle;
        }
    }

    pub fn confirm_selection(&mut self) -> Result<Confirmation, String> {
        let slot = match self.selection {
            Selection::PendingConfirmation(slot) => slot,
            _ => return Err("no card awaiting confirmation".into()),
        };
        if self.phase != Phase::InProgress {
            self.selection = Selection::Idle;
            return Err("game is over".into());
        }
        if self.slots.get(slot).map(|s| s.scratched).unwrap_or(true) {
            self.selection = Selection::Idle;
            return Err("card already scratched".into());
        }

        let swapped_with = self.fairness_partner(slot);
        if let Some(other) = swapped_with {
            self.swap_prizes(slot, other);
            debug!(slot, other, "fairness swap applied");
        }

        let card = &mut self.slots[slot];
        card.scratched = true;
        let kind = card.kind();
        self.won_kinds.push(kind);
        self.selection = Selection::Scratching(slot);
        info!(slot, ?kind, remaining = self.remaining(), "card confirmed");

        Ok(Confirmation {
            slot,
            swapped_with,
            remaining: self.remaining(),
        })
    }

    /// Picks the slot to exchange prizes with so that a finished game holds exactly one
    /// main prize. Only two decision points ever steer: a second main pick, and a final pick
    /// that would leave the player without one.
    pub fn fairness_partner(&self, slot: usize) -> Option<usize> {
        let current = self.slots.get(slot)?.kind();
        let main_won = self.main_won();
        if main_won == 1 && current == PrizeKind::Main {
            self.find_unscratched(PrizeKind::Side, slot)
        } else if self.won_kinds.len() + 1 == self.selections_allowed
            && main_won == 0
            && current != PrizeKind::Main
        {
            self.find_unscratched(PrizeKind::Main, slot)
        } else {
            None
        }
    }

    fn find_unscratched(&self, kind: PrizeKind, exclude: usize) -> Option<usize> {
        self.slots
            .iter()
            .find(|s| s.index != exclude && !s.scratched && s.kind() == kind)
            .map(|s| s.index)
    }

    fn swap_prizes(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let prize_a = self.slots[a].prize.clone();
        self.slots[a].prize = std::mem::replace(&mut self.slots[b].prize, prize_a);
    }

    pub fn release_scratch(&mut self, slot: usize) {
        if self.selection == Selection::Scratching(slot) {
            self.selection = Selection::Idle;
        }
    }

    /// Feeds a measured transparent fraction for one slot. Crossing the threshold is only
    /// reported once per slot.
    pub fn record_reveal(&mut self, slot: usize, transparent_fraction: f64) -> RevealOutcome {
        let Some(card) = self.slots.get_mut(slot) else {
            return RevealOutcome::Unchanged;
        };
        if card.fully_revealed || !is_revealed(transparent_fraction) {
            return RevealOutcome::Unchanged;
        }
        card.fully_revealed = true;
        debug!(slot, transparent_fraction, "card fully revealed");
        if self.phase == Phase::InProgress && self.revealed_wins() == self.selections_allowed {
            RevealOutcome::GameComplete
        } else {
            RevealOutcome::Revealed
        }
    }

    /// One-way transition to `Ended`. Returns true only for the call that performed it.
    pub fn finish(&mut self) -> bool {
        if self.phase == Phase::Ended {
            return false;
        }
        self.phase = Phase::Ended;
        self.selection = Selection::Idle;
        info!(kinds = ?self.won_kinds, "game finished");
        true
    }

    /// Shows every card the player did not pick. Available once after a live game ends.
    pub fn reveal_all(&mut self) -> Vec<usize> {
        if !self.is_ended() || self.restored || self.all_revealed {
            return vec![];
        }
        self.all_revealed = true;
        let mut revealed = vec![];
        for slot in self.slots.iter_mut().filter(|s| !s.scratched) {
            if !slot.fully_revealed {
                slot.fully_revealed = true;
                revealed.push(slot.index);
            }
        }
        revealed
    }

    pub fn won_gifts(&self) -> Vec<WonGift> {
        self.slots
            .iter()
            .filter(|s| s.scratched)
            .map(|s| WonGift {
                name: s.prize.name.clone(),
                image: s.prize.image.clone(),
            })
            .collect()
    }

    pub fn status_text(&self) -> String {
        if self.restored {
            TITLE_RESTORED.to_string()
        } else if self.is_ended() {
            TITLE_ENDED.to_string()
        } else {
            format!("Pick {} more card(s)...", self.remaining())
        }
    }
}

pub fn prompt_text(remaining: usize) -> String {
    format!(
        "Are you sure you want to scratch this card? {} choice(s) remaining.",
        remaining
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;

    fn fixed_game() -> GameState {
        // Slot 2 holds the only main prize.
        let catalog = build_catalog();
        let order = ["side1", "side2", "main1", "side3", "side4"];
        let slots = order
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let prize = catalog.iter().find(|p| p.id == *id).unwrap().clone();
                CardSlot::new(i, prize)
            })
            .collect();
        GameState::new(slots, SELECTIONS_ALLOWED)
    }

    fn pick(game: &mut GameState, slot: usize) -> Confirmation {
        assert!(matches!(game.select_card(slot), SelectOutcome::Prompt(_)));
        game.confirm_selection().unwrap()
    }

    fn scratch_clean(game: &mut GameState, slot: usize) -> RevealOutcome {
        game.release_scratch(slot);
        game.record_reveal(slot, 1.0)
    }

    #[test]
    fn prompt_reports_remaining_choices() {
        let mut game = fixed_game();
        match game.select_card(0) {
            SelectOutcome::Prompt(prompt) => {
                assert_eq!(prompt.remaining, 3);
                assert_eq!(
                    prompt.message,
                    "Are you sure you want to scratch this card? 3 choice(s) remaining."
                );
            }
            SelectOutcome::Ignored => panic!("selection ignored"),
        }
        assert_eq!(game.selection, Selection::PendingConfirmation(0));
    }

    #[test]
    fn cancel_returns_to_idle_without_changes() {
        let mut game = fixed_game();
        let before = game.slots.clone();
        game.select_card(1);
        game.cancel_selection();
        assert_eq!(game.selection, Selection::Idle);
        assert_eq!(game.slots, before);
        assert!(game.confirm_selection().is_err());
    }

    #[test]
    fn scratched_card_and_ended_game_ignore_selection() {
        let mut game = fixed_game();
        pick(&mut game, 0);
        assert_eq!(game.select_card(0), SelectOutcome::Ignored);
        assert_eq!(game.select_card(99), SelectOutcome::Ignored);
        game.finish();
        assert_eq!(game.select_card(1), SelectOutcome::Ignored);
    }

    #[test]
    fn second_main_pick_swaps_with_side() {
        let mut game = fixed_game();
        // Move a second main into slot 4 so a back-to-back main pick is possible.
        game.slots[4].prize.kind = PrizeKind::Main;
        pick(&mut game, 2);
        let confirmation = pick(&mut game, 4);
        assert_eq!(confirmation.swapped_with, Some(0));
        assert_eq!(game.slots[4].kind(), PrizeKind::Side);
        assert_eq!(game.slots[0].kind(), PrizeKind::Main);
        assert_eq!(game.won_kinds, vec![PrizeKind::Main, PrizeKind::Side]);
    }

    #[test]
    fn last_pick_without_main_steers_to_main() {
        let mut game = fixed_game();
        pick(&mut game, 0);
        pick(&mut game, 1);
        let confirmation = pick(&mut game, 3);
        assert_eq!(confirmation.swapped_with, Some(2));
        assert_eq!(game.slots[3].prize.id, "main1");
        assert_eq!(game.slots[2].prize.id, "side3");
        assert_eq!(game.main_won(), 1);
    }

    #[test]
    fn side_main_side_needs_no_swap() {
        let mut game = fixed_game();
        assert_eq!(pick(&mut game, 0).swapped_with, None);
        assert_eq!(pick(&mut game, 2).swapped_with, None);
        assert_eq!(pick(&mut game, 4).swapped_with, None);
        assert_eq!(
            game.won_kinds,
            vec![PrizeKind::Side, PrizeKind::Main, PrizeKind::Side]
        );
    }

    #[test]
    fn every_pick_order_yields_exactly_one_main() {
        let base = fixed_game();
        let n = base.slots.len();
        for a in 0..n {
            for b in (0..n).filter(|b| *b != a) {
                for c in (0..n).filter(|c| *c != a && *c != b) {
                    let mut game = base.clone();
                    for slot in [a, b, c] {
                        pick(&mut game, slot);
                    }
                    assert_eq!(game.main_won(), 1, "order {:?}", (a, b, c));
                    let mains = game
                        .slots
                        .iter()
                        .filter(|s| s.scratched && s.kind() == PrizeKind::Main)
                        .count();
                    assert_eq!(mains, 1);
                }
            }
        }
    }

    #[test]
    fn swaps_preserve_bijection() {
        let mut game = fixed_game();
        pick(&mut game, 0);
        pick(&mut game, 1);
        pick(&mut game, 3);
        let mut ids: Vec<_> = game.slots.iter().map(|s| s.prize.id.clone()).collect();
        ids.sort();
        let mut expected: Vec<_> = build_catalog().into_iter().map(|p| p.id).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn reveal_threshold_is_strict() {
        let mut game = fixed_game();
        pick(&mut game, 0);
        assert_eq!(game.record_reveal(0, 0.5 - 1e-6), RevealOutcome::Unchanged);
        assert!(!game.slots[0].fully_revealed);
        assert_eq!(game.record_reveal(0, 0.5), RevealOutcome::Unchanged);
        assert_eq!(game.record_reveal(0, 0.5 + 1e-6), RevealOutcome::Revealed);
        assert!(game.slots[0].fully_revealed);
        assert_eq!(game.record_reveal(0, 1.0), RevealOutcome::Unchanged);
    }

    #[test]
    fn completion_fires_once_all_picks_revealed() {
        let mut game = fixed_game();
        pick(&mut game, 0);
        pick(&mut game, 2);
        assert_eq!(scratch_clean(&mut game, 0), RevealOutcome::Revealed);
        assert_eq!(scratch_clean(&mut game, 2), RevealOutcome::Revealed);
        pick(&mut game, 4);
        assert_eq!(scratch_clean(&mut game, 4), RevealOutcome::GameComplete);
        assert!(game.finish());
        assert!(!game.finish());
        assert_eq!(scratch_clean(&mut game, 4), RevealOutcome::Unchanged);
        assert_eq!(game.status_text(), TITLE_ENDED);
    }

    #[test]
    fn flags_never_revert() {
        let mut game = fixed_game();
        pick(&mut game, 1);
        game.record_reveal(1, 0.9);
        game.record_reveal(1, 0.0);
        pick(&mut game, 3);
        pick(&mut game, 0);
        assert!(game.slots[1].scratched);
        assert!(game.slots[1].fully_revealed);
        game.finish();
        game.reveal_all();
        assert!(game.slots.iter().filter(|s| s.index == 1).all(|s| s.won()));
    }

    #[test]
    fn reveal_all_only_touches_unpicked_cards_once() {
        let mut game = fixed_game();
        assert!(game.reveal_all().is_empty());
        for slot in [0, 1, 2] {
            pick(&mut game, slot);
            scratch_clean(&mut game, slot);
        }
        game.finish();
        assert_eq!(game.reveal_all(), vec![3, 4]);
        assert!(game.reveal_all().is_empty());
        assert_eq!(game.revealed_wins(), 3);
    }

    #[test]
    fn status_text_counts_down() {
        let mut game = fixed_game();
        assert_eq!(game.status_text(), "Pick 3 more card(s)...");
        pick(&mut game, 0);
        assert_eq!(game.status_text(), "Pick 2 more card(s)...");
    }

    #[test]
    fn restored_game_is_ended_and_fully_shown() {
        let mut live = fixed_game();
        pick(&mut live, 1);
        pick(&mut live, 2);
        let game = GameState::restore(live.slots.clone(), SELECTIONS_ALLOWED);
        assert!(game.is_ended());
        assert!(game.slots.iter().all(|s| s.fully_revealed));
        assert_eq!(game.won_kinds, vec![PrizeKind::Side, PrizeKind::Main]);
        assert_eq!(game.won_gifts().len(), 2);
        assert_eq!(game.status_text(), TITLE_RESTORED);
    }

    #[test]
    fn restored_wins_follow_slot_order() {
        let mut live = fixed_game();
        pick(&mut live, 2);
        pick(&mut live, 1);
        assert_eq!(live.won_kinds, vec![PrizeKind::Main, PrizeKind::Side]);
        let game = GameState::restore(live.slots.clone(), SELECTIONS_ALLOWED);
        assert_eq!(game.won_kinds, vec![PrizeKind::Side, PrizeKind::Main]);
        assert_eq!(game.main_won(), 1);
    }
}
