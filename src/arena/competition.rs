use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use tracing::{Level, debug_span, event};

use super::{
    AgentGenerator, GameState, RngHoldemSimulationBuilder,
    errors::HoldemSimulationError,
    game::{GameResult, HoldemGame},
};

/// Totals over every game in a competition, indexed by seat.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompetitionStats {
    pub num_games: usize,
    /// Games that hit the round cap with more than one player left.
    pub unfinished_games: usize,
    pub rounds_played: usize,
    pub games_won: Vec<usize>,
    pub showdowns_won: Vec<usize>,
    /// Games each seat was the first player out of.
    pub first_out: Vec<usize>,
}

impl CompetitionStats {
    pub fn new(num_players: usize) -> Self {
        Self {
            num_games: 0,
            unfinished_games: 0,
            rounds_played: 0,
            games_won: vec![0; num_players],
            showdowns_won: vec![0; num_players],
            first_out: vec![0; num_players],
        }
    }

    fn from_game(num_players: usize, result: &GameResult) -> Self {
        let mut stats = Self::new(num_players);
        stats.num_games = 1;
        stats.rounds_played = result.rounds_played;
        match result.winner {
            Some(idx) => stats.games_won[idx] = 1,
            None => stats.unfinished_games = 1,
        }
        for (idx, won) in result.showdowns_won.iter().enumerate() {
            stats.showdowns_won[idx] = *won;
        }
        if let Some(idx) = result.elimination_order.first() {
            stats.first_out[*idx] = 1;
        }
        stats
    }

    /// Combine two sets of totals. Order doesn't matter.
    pub fn merge(mut self, other: Self) -> Self {
        self.num_games += other.num_games;
        self.unfinished_games += other.unfinished_games;
        self.rounds_played += other.rounds_played;
        for (a, b) in [
            (&mut self.games_won, &other.games_won),
            (&mut self.showdowns_won, &other.showdowns_won),
            (&mut self.first_out, &other.first_out),
        ] {
            a.iter_mut().zip(b).for_each(|(a, b)| *a += b);
        }
        self
    }
}

/// Plays the same agents against each other over many independent games,
/// in parallel, and adds up how each seat did.
///
/// Every game gets its own deck rng seeded from `seed` and the game's
/// index, so a competition with a fixed seed deals the same cards no
/// matter how rayon splits the work.
pub struct HoldemCompetition {
    agent_generators: Vec<Box<dyn AgentGenerator>>,
    starting_game_state: GameState,
    max_rounds: Option<usize>,
    seed: u64,
}

impl HoldemCompetition {
    pub fn new(
        agent_generators: Vec<Box<dyn AgentGenerator>>,
        starting_game_state: GameState,
    ) -> Result<Self, HoldemSimulationError> {
        if agent_generators.is_empty() {
            return Err(HoldemSimulationError::NeedAgents);
        }
        if agent_generators.len() != starting_game_state.num_players {
            return Err(HoldemSimulationError::AgentCountMismatch {
                expected: starting_game_state.num_players,
                actual: agent_generators.len(),
            });
        }
        Ok(Self {
            agent_generators,
            starting_game_state,
            max_rounds: None,
            seed: 0,
        })
    }

    pub fn max_rounds(mut self, max_rounds: Option<usize>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run `num_games` games and return the combined stats.
    pub fn run(&self, num_games: usize) -> Result<CompetitionStats, HoldemSimulationError> {
        let num_players = self.starting_game_state.num_players;
        let span = debug_span!("HoldemCompetition::run", num_games, num_players);
        let _enter = span.enter();

        let stats = (0..num_games)
            .into_par_iter()
            .map(|game_idx| {
                self.run_game(game_idx)
                    .map(|result| CompetitionStats::from_game(num_players, &result))
            })
            .try_reduce(
                || CompetitionStats::new(num_players),
                |a, b| Ok(a.merge(b)),
            )?;

        event!(parent: &span, Level::INFO, games_won = ?stats.games_won, "competition_complete");
        Ok(stats)
    }

    fn run_game(&self, game_idx: usize) -> Result<GameResult, HoldemSimulationError> {
        let game_state = self.starting_game_state.clone();
        let agents = self
            .agent_generators
            .iter()
            .map(|generator| generator.generate(&game_state))
            .collect();
        let rng = StdRng::seed_from_u64(self.seed.wrapping_add(game_idx as u64));

        let sim = RngHoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .rng(rng)
            .build()?;
        HoldemGame::new(sim).max_rounds(self.max_rounds).run()
    }
}
