use serde::{Deserialize, Serialize};

// Shared data types for prizes, card slots and the outcomes of game transitions. These are
// kept plain so the engine can own the mutation logic elsewhere.

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PrizeKind {
    Main,
    Side,
    Jackpot,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Prize {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PrizeKind,
    pub image: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct CardSlot {
    pub index: usize,
    pub prize: Prize,
    pub scratched: bool,
    pub fully_revealed: bool,
}

impl CardSlot {
    pub fn new(index: usize, prize: Prize) -> Self {
        Self {
            index,
            prize,
            scratched: false,
            fully_revealed: false,
        }
    }

    pub fn kind(&self) -> PrizeKind {
        self.prize.kind
    }

    /// Scratched by the player and eroded past the reveal threshold.
    pub fn won(&self) -> bool {
        self.scratched && self.fully_revealed
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    InProgress,
    Ended,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Selection {
    Idle,
    PendingConfirmation(usize),
    Scratching(usize),
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum SelectOutcome {
    Prompt(Prompt),
    Ignored,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Prompt {
    pub slot: usize,
    pub remaining: usize,
    pub message: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Confirmation {
    pub slot: usize,
    /// Slot whose prize was exchanged with the confirmed one, if the fairness rule fired.
    pub swapped_with: Option<usize>,
    pub remaining: usize,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Unchanged,
    Revealed,
    GameComplete,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct WonGift {
    pub name: String,
    pub image: String,
}
