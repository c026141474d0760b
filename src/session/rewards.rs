use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

/// Default reward tokens revealed from the boxes.
pub const ANIMALS: [&str; 25] = [
    "cat", "dog", "bunny", "turtle", "fox", "panda", "koala", "penguin", "lion", "tiger",
    "giraffe", "elephant", "hippo", "zebra", "monkey", "owl", "dolphin", "whale", "parrot",
    "frog", "raccoon", "squirrel", "deer", "llama", "sloth",
];

pub fn all_animals() -> Vec<String> {
    ANIMALS.iter().map(|a| a.to_string()).collect()
}

/// Shuffle the pool and hand one token to each box `0..count`, cycling
/// through the pool when it is shorter than `count`.
///
/// An empty pool yields placeholder tokens `animal-{i}`.
pub fn assign_rewards<R: Rng + ?Sized>(
    count: usize,
    pool: &[String],
    rng: &mut R,
) -> BTreeMap<usize, String> {
    let mut shuffled: Vec<String> = if pool.is_empty() {
        (0..count).map(|i| format!("animal-{}", i)).collect()
    } else {
        pool.to_vec()
    };
    shuffled.shuffle(rng);

    let mut by_box = BTreeMap::new();
    if shuffled.is_empty() {
        return by_box;
    }
    for index in 0..count {
        by_box.insert(index, shuffled[index % shuffled.len()].clone());
    }
    by_box
}

/// Fill boxes in `0..count` that have no token. Existing tokens are kept.
pub(super) fn backfill_rewards<R: Rng + ?Sized>(
    by_box: &mut BTreeMap<usize, String>,
    count: usize,
    pool: &[String],
    rng: &mut R,
) -> usize {
    let missing: Vec<usize> = (0..count).filter(|i| !by_box.contains_key(i)).collect();
    if missing.is_empty() {
        return 0;
    }
    let fresh = assign_rewards(count, pool, rng);
    for index in &missing {
        if let Some(token) = fresh.get(index) {
            by_box.insert(*index, token.clone());
        }
    }
    missing.len()
}
