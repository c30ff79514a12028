//! Board generation
//!
//! A board of K symbols holds 2K cards. The duplicated symbol list is built
//! in a fixed order, ids are assigned sequentially, then the cards are
//! permuted with a Fisher-Yates shuffle driven by the caller's RNG.

use rand::Rng;

use super::card::Card;

/// Uniformly permute `items` in place (Fisher-Yates)
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Build a shuffled board holding two cards of every symbol
pub fn generate_cards<R: Rng + ?Sized>(symbols: &[&str], rng: &mut R) -> Vec<Card> {
    let mut cards: Vec<Card> = symbols
        .iter()
        .chain(symbols.iter())
        .enumerate()
        .map(|(index, symbol)| Card::new(index as u32, *symbol))
        .collect();

    shuffle(&mut cards, rng);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SYMBOLS;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_generate_default_board() {
        let mut rng = Pcg32::seed_from_u64(42);
        let cards = generate_cards(&SYMBOLS[..8], &mut rng);
        assert_eq!(cards.len(), 16);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for card in &cards {
            *counts.entry(card.value.as_str()).or_default() += 1;
            assert!(!card.is_flipped);
            assert!(!card.is_matched);
        }
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = generate_cards(&SYMBOLS, &mut Pcg32::seed_from_u64(7));
        let b = generate_cards(&SYMBOLS, &mut Pcg32::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_and_single_element_shuffle() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);

        let mut one = [5];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, [5]);
    }

    #[test]
    fn test_shuffle_is_uniform_over_small_permutations() {
        // 6 permutations of 3 items, each should land near 1/6 of trials
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
        let trials = 60_000;
        for _ in 0..trials {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (perm, count) in counts {
            assert!(
                (9_400..=10_600).contains(&count),
                "permutation {:?} drawn {} times",
                perm,
                count
            );
        }
    }

    proptest! {
        #[test]
        fn prop_boards_hold_every_symbol_twice(seed in any::<u64>(), pairs in 1usize..=12) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let cards = generate_cards(&SYMBOLS[..pairs], &mut rng);
            prop_assert_eq!(cards.len(), pairs * 2);

            let ids: HashSet<u32> = cards.iter().map(|c| c.id).collect();
            prop_assert_eq!(ids.len(), cards.len());

            for symbol in &SYMBOLS[..pairs] {
                let n = cards.iter().filter(|c| c.value == *symbol).count();
                prop_assert_eq!(n, 2);
            }
            prop_assert!(cards.iter().all(|c| !c.is_flipped && !c.is_matched));
        }
    }
}
