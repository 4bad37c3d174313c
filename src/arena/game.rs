use tracing::{Level, debug_span, event};

use super::{HoldemSimulation, errors::HoldemSimulationError, game_state::Outcome};

/// How a full game went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// The only player left with chips. `None` if the round cap was hit
    /// first.
    pub winner: Option<usize>,
    pub rounds_played: usize,
    pub final_stacks: Vec<u32>,
    /// Seats in the order they went out. Players busting in the same round
    /// are ordered by the stack they started that round with, smallest
    /// first.
    pub elimination_order: Vec<usize>,
    /// How many showdowns each seat won a share of.
    pub showdowns_won: Vec<usize>,
}

/// A `HoldemGame` plays rounds at a single table until one player has all
/// the chips. The button moves to the next player still in the game after
/// every round.
///
/// The same agents play every round, so they can carry state from one
/// round to the next.
pub struct HoldemGame {
    sim: HoldemSimulation,
    max_rounds: Option<usize>,
}

impl HoldemGame {
    pub fn new(sim: HoldemSimulation) -> Self {
        Self {
            sim,
            max_rounds: None,
        }
    }

    /// Stop after this many rounds even if nobody has won.
    pub fn max_rounds(mut self, max_rounds: Option<usize>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn simulation(&self) -> &HoldemSimulation {
        &self.sim
    }

    /// Run the game to completion.
    pub fn run(mut self) -> Result<GameResult, HoldemSimulationError> {
        let num_players = self.sim.state.num_players();
        let span = debug_span!("HoldemGame::run", num_players, max_rounds = ?self.max_rounds);
        let _enter = span.enter();

        let mut rounds_played = 0;
        let mut elimination_order = vec![];
        let mut showdowns_won = vec![0; num_players];

        while self.sim.state.game.num_non_out_players() > 1
            && self.max_rounds.is_none_or(|max| rounds_played < max)
        {
            let result = self.sim.run_round(rounds_played == 0)?;
            rounds_played += 1;

            if let Some(showdown) = &result.showdown {
                for idx in &showdown.winners {
                    showdowns_won[*idx] += 1;
                }
            }

            let starting_stacks = &self.sim.state.round.starting_stacks;
            let mut busted = result.busted;
            busted.sort_by_key(|idx| (starting_stacks[*idx], *idx));
            for idx in &busted {
                event!(Level::INFO, idx, round = rounds_played, "player_out");
            }
            elimination_order.extend(busted);

            if result.outcome == Outcome::GameWon {
                break;
            }
        }

        let game = &self.sim.state.game;
        let winner = if game.num_non_out_players() == 1 {
            (0..num_players).find(|idx| !game.player_out.get(*idx))
        } else {
            None
        };
        event!(parent: &span, Level::INFO, ?winner, rounds_played, "game_over");

        Ok(GameResult {
            winner,
            rounds_played,
            final_stacks: game.stacks.clone(),
            elimination_order,
            showdowns_won,
        })
    }
}
