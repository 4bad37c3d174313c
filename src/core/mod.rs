//! This is the core module. It exports the non-betting
//! related code.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value};

/// The error type for parsing and evaluating cards.
mod error;
pub use self::error::PokerError;

/// Flattened 52 card deck that's dealt without replacement.
mod flat_deck;
pub use self::flat_deck::FlatDeck;

/// Seven card hand strength evaluation.
mod rank;
pub use self::rank::{HandKind, HandStrength, Rankable, evaluate};

/// Compact set of seat indexes.
mod player_bit_set;
pub use self::player_bit_set::{ActivePlayerBitSetIter, PlayerBitSet};
