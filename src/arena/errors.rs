use thiserror::Error;

/// Reasons a bet is refused. The simulation never lets these escape, a
/// refused bet from an agent gets that agent eliminated.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStateError {
    #[error("The amount bet doesn't call the previous bet")]
    BetSizeDoesntCall,
    #[error("A raise must be at least double the current bet")]
    RaiseSizeTooSmall,
    #[error("An opening bet must be at least the small blind")]
    BetBelowMinimum,
    #[error("The player doesn't have enough chips for this bet")]
    InsufficientChips,
    #[error("This action isn't allowed with the current bet")]
    BetNotAllowed,
}

/// Errors that stop a simulation. Anything here is either a mis-configured
/// simulation or a broken engine invariant.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HoldemSimulationError {
    #[error("Builder needs a game state")]
    NeedGameState,
    #[error("Builder needs agents")]
    NeedAgents,
    #[error("Expected {expected} agents but got {actual}")]
    AgentCountMismatch { expected: usize, actual: usize },
    #[error("A game needs at least two players, got {0}")]
    TooFewPlayers(usize),
    #[error("A single deck can't deal to {0} players")]
    TooManyPlayers(usize),
    #[error("The card source ran out of cards")]
    DeckExhausted,
    #[error("Showdown reached with {0} players still holding cards")]
    ShowdownWithoutContest(usize),
    #[error("No round is in progress")]
    RoundNotStarted,
    #[error("Showdown needs five community cards, the board has {0}")]
    IncompleteBoard(usize),
    #[error("The round still has betting left before showdown")]
    NotAtShowdown,
    #[error("Round ended with no one left to take the pot")]
    NoWinner,
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}
