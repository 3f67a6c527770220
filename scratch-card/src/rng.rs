use crate::types::{CardSlot, Prize};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

// Prize allocation. A fresh game binds a uniformly random permutation of the catalog to the
// card slots. Seeded streams keep tests stable.

/// In-place Fisher-Yates: walk from the last element down, swapping each with a uniformly
/// chosen element at or before it.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    if items.len() <= 1 {
        return;
    }
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

pub fn allocate<R: Rng + ?Sized>(catalog: &[Prize], rng: &mut R) -> Vec<CardSlot> {
    let mut prizes = catalog.to_vec();
    shuffle(&mut prizes, rng);
    prizes
        .into_iter()
        .enumerate()
        .map(|(index, prize)| CardSlot::new(index, prize))
        .collect()
}

/// Unseeded stream for a real game, drawn from OS (or browser) entropy.
pub fn new_game_rng() -> Pcg64Mcg {
    Pcg64Mcg::seed_from_u64(rand::thread_rng().gen())
}

/// Reproducible stream for tests and simulations.
pub fn pcg_from_seed(seed: u64) -> Pcg64Mcg {
    Pcg64Mcg::seed_from_u64(seed)
}
