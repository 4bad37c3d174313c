//! This is the arena module for simulation via agents.
//!
//! # Single Simulation
//!
//! The tools allow explicit control over the
//! simulation all the way down to the rng and the cards.
//!
//! ## Single Round Example
//!
//! ```
//! use holdem_arena::arena::agent::{CheckingAgent, RandomAgent};
//! use holdem_arena::arena::{Agent, GameState, HoldemSimulationBuilder};
//!
//! let stacks = vec![100, 100];
//! let agents: Vec<Box<dyn Agent>> = vec![
//!     Box::<CheckingAgent>::default(),
//!     Box::<RandomAgent>::default(),
//! ];
//!
//! let game_state = GameState::new(stacks, 10, 5, 0);
//! let mut sim = HoldemSimulationBuilder::default()
//!     .game_state(game_state)
//!     .agents(agents)
//!     .build()
//!     .unwrap();
//!
//! sim.run_round(true).unwrap();
//! assert_eq!(200, sim.game_state().total_chips());
//! ```
//!
//! ## Stepping Through A Round
//!
//! `run_round` is a shortcut for starting the round, running each street
//! and then the showdown. Each step can also be run on its own.
//!
//! ```
//! use holdem_arena::arena::agent::CheckingAgent;
//! use holdem_arena::arena::game_state::Street;
//! use holdem_arena::arena::{Agent, GameState, HoldemSimulationBuilder};
//!
//! let agents: Vec<Box<dyn Agent>> = vec![Box::new(CheckingAgent), Box::new(CheckingAgent)];
//! let mut sim = HoldemSimulationBuilder::default()
//!     .game_state(GameState::new(vec![1000, 1000], 20, 10, 0))
//!     .agents(agents)
//!     .build()
//!     .unwrap();
//!
//! sim.start_round(true).unwrap();
//! while sim.round_state().street != Street::Showdown {
//!     sim.run_street().unwrap();
//! }
//! let showdown = sim.run_showdown().unwrap();
//! assert_eq!(40, showdown.pot);
//! ```
//!
//! # Games and Competitions
//!
//! ## `HoldemGame` Example
//!
//! A game keeps playing rounds at one table until one player has all the
//! chips.
//!
//! ```
//! use holdem_arena::arena::agent::AllInAgent;
//! use holdem_arena::arena::game::HoldemGame;
//! use holdem_arena::arena::{Agent, GameState, HoldemSimulationBuilder};
//!
//! let agents: Vec<Box<dyn Agent>> = (0..4)
//!     .map(|_| Box::<AllInAgent>::default() as Box<dyn Agent>)
//!     .collect();
//! let sim = HoldemSimulationBuilder::default()
//!     .game_state(GameState::new(vec![100; 4], 10, 5, 0))
//!     .agents(agents)
//!     .build()
//!     .unwrap();
//!
//! let result = HoldemGame::new(sim).run().unwrap();
//! assert!(result.winner.is_some());
//! ```
//!
//! ## `HoldemCompetition` Example
//!
//! It's also possible to run a competition where the same agents play
//! many independent games, in parallel, with tabulated results.
//!
//! ```
//! use holdem_arena::arena::AgentGenerator;
//! use holdem_arena::arena::GameState;
//! use holdem_arena::arena::agent::{CheckingAgentGenerator, RandomAgentGenerator};
//! use holdem_arena::arena::competition::HoldemCompetition;
//!
//! let agent_gens: Vec<Box<dyn AgentGenerator>> = vec![
//!     Box::<CheckingAgentGenerator>::default(),
//!     Box::<RandomAgentGenerator>::default(),
//!     Box::<RandomAgentGenerator>::default(),
//! ];
//!
//! let competition = HoldemCompetition::new(agent_gens, GameState::new(vec![100; 3], 10, 5, 0))
//!     .unwrap()
//!     .max_rounds(Some(100))
//!     .seed(420);
//!
//! let stats = competition.run(10).unwrap();
//! println!("{:?}", stats);
//! ```
pub mod action;
pub mod agent;
pub mod card_source;
pub mod competition;
pub mod errors;
pub mod game;
pub mod game_state;
pub mod historian;
pub mod settings;
pub mod sim_builder;
pub mod simulation;

#[cfg(any(test, feature = "arena-test-util"))]
pub mod test_util;

pub use agent::{Agent, AgentGenerator, CloneAgentGenerator};
pub use game_state::{GameState, Outcome, TableState};
pub use historian::{Historian, HistorianError};
pub use sim_builder::{HoldemSimulationBuilder, RngHoldemSimulationBuilder};
pub use simulation::{HoldemSimulation, RoundResult, ShowdownResult};
