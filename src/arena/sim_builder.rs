use rand::{Rng, SeedableRng, rngs::StdRng, rngs::ThreadRng};

use super::{
    Agent, GameState, HoldemSimulation,
    agent::FoldingAgent,
    card_source::{CardSource, RngCardSource},
    errors::HoldemSimulationError,
    game_state::MAX_PLAYERS,
    historian::Historian,
};

fn build_agents(num_agents: usize) -> Vec<Box<dyn Agent>> {
    (0..num_agents)
        .map(|_| -> Box<dyn Agent> { Box::<FoldingAgent>::default() })
        .collect()
}

/// # HoldemSimulationBuilder
///
/// `RngHoldemSimulationBuilder` is a builder to allow for complex
/// configurations of a holdem simulation played via agents. A game state is
/// required, other fields are optional.
///
/// `HoldemSimulationBuilder` is a type alias
/// for `RngHoldemSimulationBuilder<ThreadRng>` which is the default builder.
///
/// ## Setters
///
/// Each setter will set the optional value to the passed in value. Then return
/// the mutated builder.
///
/// While agents are not required the default is a full ring of folding agents.
/// So likely not that interesting a simulation.
///
/// ## Examples
///
/// ```
/// use holdem_arena::arena::{GameState, HoldemSimulationBuilder};
///
/// let game_state = GameState::new(vec![100; 5], 2, 1, 3);
/// let sim = HoldemSimulationBuilder::default()
///     .game_state(game_state)
///     .build()
///     .unwrap();
/// ```
/// However sometimes you want to use a known but random simulation. In that
/// case you can pass in the rng like this:
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use holdem_arena::arena::{GameState, RngHoldemSimulationBuilder};
///
/// let game_state = GameState::new(vec![100; 5], 2, 1, 3);
/// let rng = StdRng::seed_from_u64(420);
/// let sim = RngHoldemSimulationBuilder::default()
///     .game_state(game_state)
///     .rng(rng)
///     .build()
///     .unwrap();
/// ```
pub struct RngHoldemSimulationBuilder<R: Rng> {
    agents: Option<Vec<Box<dyn Agent>>>,
    historians: Vec<Box<dyn Historian>>,
    game_state: Option<GameState>,
    card_source: Option<Box<dyn CardSource>>,
    rng: Option<R>,
    panic_on_historian_error: bool,
}

impl<R: Rng + 'static> RngHoldemSimulationBuilder<R> {
    /// Set the agents for the simulation created by this builder.
    pub fn agents(mut self, agents: Vec<Box<dyn Agent>>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Set the game state for the simulation created by this builder.
    pub fn game_state(mut self, game_state: GameState) -> Self {
        self.game_state = Some(game_state);
        self
    }

    /// Set where cards come from. If not set a shuffled 52 card deck is
    /// used, driven by `rng` when one is given.
    pub fn card_source(mut self, card_source: Box<dyn CardSource>) -> Self {
        self.card_source = Some(card_source);
        self
    }

    pub fn rng(mut self, rng: R) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Set the historians for the simulation created by this builder.
    pub fn historians(mut self, historians: Vec<Box<dyn Historian>>) -> Self {
        self.historians = historians;
        self
    }

    /// Panic when a historian fails instead of dropping it. Meant for tests.
    pub fn panic_on_historian_error(mut self, panic_on_historian_error: bool) -> Self {
        self.panic_on_historian_error = panic_on_historian_error;
        self
    }

    /// Given the fields already specified build any that are not specified and
    /// create a new HoldemSimulation.
    ///
    /// @returns HoldemSimulationError if no game_state was given, if the
    /// table size can't be dealt, if the chips at the table can't fit in a
    /// `u32` pot, or the agents don't match the seats.
    pub fn build(self) -> Result<HoldemSimulation, HoldemSimulationError> {
        let game_state = self
            .game_state
            .ok_or(HoldemSimulationError::NeedGameState)?;

        let num_players = game_state.num_players;
        if num_players < 2 {
            return Err(HoldemSimulationError::TooFewPlayers(num_players));
        }
        if num_players > MAX_PLAYERS {
            return Err(HoldemSimulationError::TooManyPlayers(num_players));
        }
        if game_state.small_blind == 0 || game_state.big_blind < game_state.small_blind {
            return Err(HoldemSimulationError::InvalidSettings(format!(
                "blinds {}/{} must be positive with the big blind at least the small",
                game_state.small_blind, game_state.big_blind
            )));
        }
        if game_state.total_chips() > u64::from(u32::MAX) {
            return Err(HoldemSimulationError::InvalidSettings(format!(
                "{} chips at the table won't fit in a single pot",
                game_state.total_chips()
            )));
        }
        if game_state.dealer_idx >= num_players {
            return Err(HoldemSimulationError::InvalidSettings(format!(
                "dealer seat {} is past the end of a {} seat table",
                game_state.dealer_idx, num_players
            )));
        }

        let agents = self.agents.unwrap_or_else(|| build_agents(num_players));
        if agents.len() != num_players {
            return Err(HoldemSimulationError::AgentCountMismatch {
                expected: num_players,
                actual: agents.len(),
            });
        }

        let card_source = match (self.card_source, self.rng) {
            (Some(card_source), _) => card_source,
            (None, Some(rng)) => Box::new(RngCardSource::new(rng)),
            (None, None) => Box::new(RngCardSource::new(StdRng::from_rng(&mut rand::rng()))),
        };

        Ok(HoldemSimulation::new(
            game_state,
            agents,
            card_source,
            self.historians,
            self.panic_on_historian_error,
        ))
    }
}

impl<R: Rng> Default for RngHoldemSimulationBuilder<R> {
    fn default() -> Self {
        Self {
            agents: None,
            historians: vec![],
            game_state: None,
            card_source: None,
            rng: None,
            panic_on_historian_error: false,
        }
    }
}

/// The rng is ThreadRng.
pub type HoldemSimulationBuilder = RngHoldemSimulationBuilder<ThreadRng>;
