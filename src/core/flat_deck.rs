use std::ops::{Index, RangeFull};

use rand::Rng;
use rand::seq::SliceRandom;

use super::card::{Card, Suit, Value};

/// `FlatDeck` is a deck of cards that allows easy
/// indexing into the cards. Cards are dealt from the
/// back without replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatDeck {
    /// Card storage.
    cards: Vec<Card>,
}

impl FlatDeck {
    /// Create the full 52 card deck in sorted order.
    ///
    /// ```
    /// use holdem_arena::core::FlatDeck;
    ///
    /// assert_eq!(52, FlatDeck::new().len());
    /// ```
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(52);
        for v in Value::values() {
            for s in Suit::suits() {
                cards.push(Card::new(v, s));
            }
        }
        Self { cards }
    }

    /// How many cards are there in the deck ?
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all cards been dealt ?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Put every card back in sorted order.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Randomly shuffle the cards that have not been dealt yet.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng)
    }

    /// Deal a card if there is one there to deal.
    /// None if the deck is empty
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Given a card remove it from the deck if it is present.
    pub fn remove(&mut self, c: &Card) -> bool {
        match self.cards.iter().position(|x| x == c) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }
}

impl Default for FlatDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for FlatDeck {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl Index<RangeFull> for FlatDeck {
    type Output = [Card];
    fn index(&self, index: RangeFull) -> &[Card] {
        &self.cards[index]
    }
}

impl From<Vec<Card>> for FlatDeck {
    fn from(value: Vec<Card>) -> Self {
        Self { cards: value }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_new_has_no_duplicates() {
        let fd = FlatDeck::new();
        let unique: HashSet<Card> = fd[..].iter().copied().collect();
        assert_eq!(52, unique.len());
    }

    #[test]
    fn test_deal_until_empty() {
        let mut fd = FlatDeck::new();
        let mut rng = StdRng::seed_from_u64(7);
        fd.shuffle(&mut rng);

        let mut seen = HashSet::new();
        while let Some(c) = fd.deal() {
            assert!(seen.insert(c));
        }
        assert_eq!(52, seen.len());
        assert!(fd.is_empty());
        assert_eq!(None, fd.deal());
    }

    #[test]
    fn test_reset_restores_order() {
        let mut fd = FlatDeck::new();
        let mut rng = StdRng::seed_from_u64(420);
        fd.shuffle(&mut rng);
        fd.deal();
        fd.deal();

        fd.reset();
        assert_eq!(FlatDeck::new(), fd);
    }

    #[test]
    fn test_shuffle_rng() {
        let mut fd_one = FlatDeck::new();
        let mut fd_two = FlatDeck::new();

        let mut rng_one = StdRng::seed_from_u64(420);
        let mut rng_two = StdRng::seed_from_u64(420);

        fd_one.shuffle(&mut rng_one);
        fd_two.shuffle(&mut rng_two);

        assert_eq!(fd_one, fd_two);
    }

    #[test]
    fn test_from_vec() {
        let c = Card::new(Value::Nine, Suit::Heart);
        let mut flat_deck: FlatDeck = vec![c].into();

        assert_eq!(1, flat_deck.len());
        assert_eq!(c, flat_deck[0]);
        assert_eq!(Some(c), flat_deck.deal());
    }

    #[test]
    fn test_remove() {
        let mut fd = FlatDeck::new();
        let c = Card::new(Value::Ace, Suit::Heart);
        assert!(fd.remove(&c));
        assert!(!fd.remove(&c));
        assert_eq!(51, fd.len());
    }
}
