use crate::core::{Card, HandStrength, PlayerBitSet};

use super::errors::GameStateError;
use super::game_state::Street;

/// What an agent wants to do on its turn.
///
/// `Raise` and `Bet` carry the player's total bet for the street, not the
/// extra chips going in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentAction {
    Fold,
    Check,
    Call,
    Raise(u32),
    Bet(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForcedBetType {
    SmallBlind,
    BigBlind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundStartPayload {
    pub dealer_idx: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub stacks: Vec<u32>,
    pub player_out: PlayerBitSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DealStartingHandPayload {
    pub idx: usize,
    pub cards: [Card; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForcedBetPayload {
    pub idx: usize,
    /// The amount actually posted. Short stacks post less than the blind.
    pub bet: u32,
    pub player_stack: u32,
    pub forced_bet_type: ForcedBetType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayedActionPayload {
    pub idx: usize,
    pub street: Street,
    pub action: AgentAction,
    pub starting_bet: u32,
    pub final_bet: u32,
    pub starting_player_bet: u32,
    pub final_player_bet: u32,
    pub player_stack: u32,
    pub final_pot: u32,
    /// Was raising closed off because someone couldn't match the bet.
    pub equalizing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EliminationPayload {
    pub idx: usize,
    pub street: Street,
    pub action: AgentAction,
    pub reason: GameStateError,
    /// Chips left in the stack that went into the pot.
    pub forfeited: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwardPayload {
    pub idx: usize,
    pub total_pot: u32,
    pub award_amount: u32,
    /// Only set when the pot went to showdown.
    pub strength: Option<HandStrength>,
}

/// Everything the simulation does, in order. Historians receive these.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    RoundStart(RoundStartPayload),
    DealStartingHand(DealStartingHandPayload),
    ForcedBet(ForcedBetPayload),
    PlayedAction(PlayedActionPayload),
    PlayerEliminated(EliminationPayload),
    DealCommunity(Card),
    StreetAdvance(Street),
    Award(AwardPayload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bet() {
        let a = AgentAction::Bet(100);
        assert_eq!(AgentAction::Bet(100), a);
        assert_ne!(AgentAction::Raise(100), a);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_action_json() {
        let action = Action::PlayedAction(PlayedActionPayload {
            idx: 1,
            street: Street::Flop,
            action: AgentAction::Raise(40),
            starting_bet: 20,
            final_bet: 40,
            starting_player_bet: 0,
            final_player_bet: 40,
            player_stack: 960,
            final_pot: 80,
            equalizing: false,
        });
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
