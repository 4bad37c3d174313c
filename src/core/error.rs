use thiserror::Error;

use super::Card;

/// This is the core error type for the library. It uses
/// `thiserror` to provide readable error messages
#[derive(Error, Debug, Hash, PartialEq, Eq)]
pub enum PokerError {
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Card already added to hand {0}")]
    DuplicateCardInHand(Card),
}
