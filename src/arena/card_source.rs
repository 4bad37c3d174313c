use rand::Rng;

use crate::core::{Card, FlatDeck};

/// Where the simulation gets its cards from.
///
/// A source must never hand out the same card twice between two calls to
/// `reset`.
pub trait CardSource {
    /// Take the next card. `None` once every card has been drawn.
    fn draw(&mut self) -> Option<Card>;
    /// Put every card back in the starting, unshuffled, order.
    fn reset(&mut self);
    /// Randomize the order of the cards not drawn yet.
    fn shuffle(&mut self);
}

/// The usual card source: a 52 card `FlatDeck` shuffled with its own rng.
#[derive(Debug, Clone)]
pub struct RngCardSource<R: Rng> {
    deck: FlatDeck,
    rng: R,
}

impl<R: Rng> RngCardSource<R> {
    pub fn new(rng: R) -> Self {
        Self {
            deck: FlatDeck::new(),
            rng,
        }
    }

    /// How many cards can still be drawn.
    pub fn remaining(&self) -> usize {
        self.deck.len()
    }
}

impl<R: Rng> CardSource for RngCardSource<R> {
    fn draw(&mut self) -> Option<Card> {
        self.deck.deal()
    }

    fn reset(&mut self) {
        self.deck.reset();
    }

    fn shuffle(&mut self) {
        self.deck.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_no_duplicates_in_a_cycle() {
        let mut source = RngCardSource::new(StdRng::seed_from_u64(42));
        for _ in 0..3 {
            source.reset();
            source.shuffle();
            let mut seen = HashSet::new();
            while let Some(c) = source.draw() {
                assert!(seen.insert(c));
            }
            assert_eq!(52, seen.len());
            assert_eq!(0, source.remaining());
        }
    }

    #[test]
    fn test_reset_without_shuffle_is_sorted() {
        let mut source = RngCardSource::new(StdRng::seed_from_u64(1));
        source.shuffle();
        source.reset();

        let mut expected = FlatDeck::new();
        assert_eq!(expected.deal(), source.draw());
    }
}
