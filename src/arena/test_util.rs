//! Helpers for tests that drive the simulation with known cards and check
//! the table stays consistent.
use std::collections::HashSet;

use crate::core::Card;

use super::card_source::CardSource;
use super::game_state::TableState;

/// Hands out cards in a fixed order. Shuffling does nothing and `reset`
/// starts again from the first card.
#[derive(Debug, Clone)]
pub struct StackedCardSource {
    cards: Vec<Card>,
    next: usize,
}

impl StackedCardSource {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards, next: 0 }
    }

    /// Stack the cards so that seat `i` is dealt `hands[i]` and the board
    /// comes out as `board`. Every seat must be in the game.
    pub fn for_deal(dealer_idx: usize, hands: &[[&str; 2]], board: [&str; 5]) -> Self {
        let num_players = hands.len();
        let parse = |s: &str| Card::try_from(s).unwrap();
        let mut cards: Vec<Card> = (1..=num_players)
            .map(|step| (dealer_idx + step) % num_players)
            .flat_map(|idx| hands[idx].map(parse))
            .collect();
        cards.extend(board.map(parse));
        Self::new(cards)
    }
}

impl CardSource for StackedCardSource {
    fn draw(&mut self) -> Option<Card> {
        let card = self.cards.get(self.next).copied();
        self.next += 1;
        card
    }

    fn reset(&mut self) {
        self.next = 0;
    }

    fn shuffle(&mut self) {}
}

pub fn assert_valid_round_data(state: &TableState) {
    let round = &state.round;

    // The pot is exactly what everyone put in.
    let total_bet: u32 = round.player_total_bet.iter().sum();
    assert_eq!(total_bet, round.pot);

    // All in players have nothing behind until they're paid.
    for idx in round.player_all_in.ones() {
        if round.player_winnings[idx] == 0 {
            assert_eq!(0, state.game.stacks[idx]);
        }
    }

    assert!(round.board.len() <= 5);

    // No card shows up twice.
    let mut seen = HashSet::new();
    for card in round.hands.iter().flatten().flatten().chain(round.board.iter()) {
        assert!(seen.insert(*card), "{card} was dealt twice");
    }
}

pub fn assert_valid_game_state(state: &TableState, total_chips: u64) {
    // Chips are either in a stack or in the pot waiting to be awarded.
    let awarded: u64 = state.round.player_winnings.iter().map(|w| u64::from(*w)).sum();
    let in_pot = u64::from(state.round.pot) - awarded;
    assert_eq!(total_chips, state.game.total_chips() + in_pot);

    for idx in 0..state.num_players() {
        if state.game.player_out.get(idx) {
            assert_eq!(0, state.game.stacks[idx]);
        }
    }
}
