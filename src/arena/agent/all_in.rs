use crate::arena::{
    action::AgentAction,
    game_state::{GameState, PlayerView},
};

use super::{Agent, AgentGenerator};

/// An agent that shoves every chip it has the first chance it gets. Once
/// raising is closed it just calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllInAgent;

impl Agent for AllInAgent {
    fn act(&mut self, view: &PlayerView<'_>) -> AgentAction {
        let all_in = view.max_bet();
        if view.can_raise && all_in >= view.min_raise() {
            if view.current_bet == 0 {
                AgentAction::Bet(all_in)
            } else {
                AgentAction::Raise(all_in)
            }
        } else if view.can_check {
            AgentAction::Check
        } else {
            AgentAction::Call
        }
    }
}

/// Default Generator for `AllInAgent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllInAgentGenerator;

impl AgentGenerator for AllInAgentGenerator {
    fn generate(&self, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(AllInAgent)
    }
}
