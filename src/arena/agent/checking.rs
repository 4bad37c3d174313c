use crate::arena::{
    action::AgentAction,
    game_state::{GameState, PlayerView},
};

use super::{Agent, AgentGenerator};

/// A simple agent that checks when it can and calls everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckingAgent;

impl Agent for CheckingAgent {
    fn act(&mut self, view: &PlayerView<'_>) -> AgentAction {
        if view.can_check {
            AgentAction::Check
        } else {
            AgentAction::Call
        }
    }
}

/// Default Generator for `CheckingAgent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckingAgentGenerator;

impl AgentGenerator for CheckingAgentGenerator {
    fn generate(&self, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(CheckingAgent)
    }
}
