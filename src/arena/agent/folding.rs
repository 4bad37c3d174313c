use crate::arena::{
    action::AgentAction,
    game_state::{GameState, PlayerView},
};

use super::{Agent, AgentGenerator};

/// An agent that gives up on every pot it has to pay for. It still checks
/// when checking is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldingAgent;

impl Agent for FoldingAgent {
    fn act(&mut self, view: &PlayerView<'_>) -> AgentAction {
        if view.can_check {
            AgentAction::Check
        } else {
            AgentAction::Fold
        }
    }
}

/// Default Generator for `FoldingAgent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldingAgentGenerator;

impl AgentGenerator for FoldingAgentGenerator {
    fn generate(&self, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(FoldingAgent)
    }
}
