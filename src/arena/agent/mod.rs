//! `Agent`s are the players in the simulations. They are the logic and
//! strategies behind choosing an action.
//!
//! An agent only ever sees a [`PlayerView`]. It can't touch the table, the
//! only effect it has is the action it returns.
//!
//! Some basic agents are provided as a way of testing baseline value.
mod all_in;
mod checking;
mod folding;
mod interactive;
mod random;
mod replay;

use super::{
    action::AgentAction,
    game_state::{GameState, PlayerView},
};

/// This is the trait that you need to implement in order to implement
/// different strategies. It's up to you to to implement the logic and state.
pub trait Agent {
    /// This is the method that will be called by the game to get the action
    fn act(&mut self, view: &PlayerView<'_>) -> AgentAction;
}

/// AgentGenerator is a trait that is used to build agents for games and
/// competitions where each game needs a fresh agent.
///
/// Generators are shared across threads by `HoldemCompetition`.
pub trait AgentGenerator: Send + Sync {
    /// This method is called before each game to build a new agent.
    fn generate(&self, game_state: &GameState) -> Box<dyn Agent>;
}

/// Build agents by cloning a template agent.
pub struct CloneAgentGenerator<T> {
    agent: T,
}

impl<T> CloneAgentGenerator<T>
where
    T: Agent + Clone + Send + Sync + 'static,
{
    pub fn new(agent: T) -> Self {
        CloneAgentGenerator { agent }
    }
}

impl<T> AgentGenerator for CloneAgentGenerator<T>
where
    T: Agent + Clone + Send + Sync + 'static,
{
    fn generate(&self, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(self.agent.clone())
    }
}

pub use all_in::{AllInAgent, AllInAgentGenerator};
pub use checking::{CheckingAgent, CheckingAgentGenerator};
pub use folding::{FoldingAgent, FoldingAgentGenerator};
pub use interactive::{InteractiveAgent, InteractiveAgentGenerator, parse_action};
pub use random::{RandomAgent, RandomAgentGenerator};
pub use replay::VecReplayAgent;
