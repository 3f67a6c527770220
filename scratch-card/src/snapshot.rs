use crate::catalog::catalog_fingerprint;
use crate::game::GameState;
use crate::types::{CardSlot, Prize, PrizeKind};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

// Persisted form of a game. One blob per save, written after every confirmed pick and at
// game end, read back on the next visit.

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SavedGame {
    pub gifts: Vec<SavedGift>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SavedGift {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PrizeKind,
    pub image: String,
    #[serde(deserialize_with = "index_from_number_or_text")]
    pub index: usize,
    pub scratched: bool,
}

// Older blobs stored the slot index as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Number(usize),
    Text(String),
}

fn index_from_number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    match RawIndex::deserialize(deserializer)? {
        RawIndex::Number(n) => Ok(n),
        RawIndex::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl SavedGame {
    pub fn capture(state: &GameState, catalog: &[Prize]) -> Self {
        let gifts = state
            .slots
            .iter()
            .map(|slot| SavedGift {
                id: slot.prize.id.clone(),
                name: slot.prize.name.clone(),
                kind: slot.prize.kind,
                image: slot.prize.image.clone(),
                index: slot.index,
                scratched: slot.scratched,
            })
            .collect();
        Self {
            gifts,
            catalog: Some(catalog_fingerprint(catalog)),
        }
    }

    /// Rebuilds the slot records, ordered by slot. Rejects blobs that no longer describe a
    /// permutation of `catalog` across the rendered slots.
    ///
    /// Blobs without a catalog fingerprint come from the older writer, which swapped whole
    /// gift records (`index` included) on a fairness swap. For those the array position is
    /// the slot and `index` is ignored.
    pub fn into_slots(self, catalog: &[Prize]) -> Result<Vec<CardSlot>, String> {
        let legacy = self.catalog.is_none();
        if let Some(fingerprint) = &self.catalog {
            if *fingerprint != catalog_fingerprint(catalog) {
                return Err("saved game was written for a different catalog".into());
            }
        }
        if self.gifts.len() != catalog.len() {
            return Err(format!(
                "saved game has {} slots, catalog has {}",
                self.gifts.len(),
                catalog.len()
            ));
        }
        let known: HashSet<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        let mut seen_ids = HashSet::new();
        let mut slots: Vec<Option<CardSlot>> = vec![None; catalog.len()];
        for (position, gift) in self.gifts.into_iter().enumerate() {
            if !known.contains(gift.id.as_str()) {
                return Err(format!("unknown prize {}", gift.id));
            }
            if !seen_ids.insert(gift.id.clone()) {
                return Err(format!("prize {} assigned twice", gift.id));
            }
            let index = if legacy { position } else { gift.index };
            let entry = slots
                .get_mut(index)
                .ok_or_else(|| format!("slot index {} out of range", index))?;
            if entry.is_some() {
                return Err(format!("slot index {} assigned twice", index));
            }
            let prize = Prize {
                id: gift.id,
                name: gift.name,
                kind: gift.kind,
                image: gift.image,
            };
            let mut slot = CardSlot::new(index, prize);
            slot.scratched = gift.scratched;
            *entry = Some(slot);
        }
        Ok(slots.into_iter().flatten().collect())
    }
}
