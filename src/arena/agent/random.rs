use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::arena::{
    action::AgentAction,
    game_state::{GameState, PlayerView},
};

use super::{Agent, AgentGenerator};

/// An agent that picks between folding, calling and raising at random.
///
/// `percent_fold` and `percent_call` are indexed by street, preflop first.
/// Streets past the end of a list use its last value. Folding is only
/// considered when there's something to call.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    percent_fold: Vec<f64>,
    percent_call: Vec<f64>,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(percent_fold: Vec<f64>, percent_call: Vec<f64>) -> Self {
        Self::new_with_rng(
            percent_fold,
            percent_call,
            StdRng::from_rng(&mut rand::rng()),
        )
    }

    pub fn new_with_rng(percent_fold: Vec<f64>, percent_call: Vec<f64>, rng: StdRng) -> Self {
        Self {
            percent_fold,
            percent_call,
            rng,
        }
    }

    fn chance(percents: &[f64], street_idx: usize, missing: f64) -> f64 {
        let p = percents
            .get(street_idx)
            .or_else(|| percents.last())
            .copied()
            .unwrap_or(missing);
        if p.is_nan() { missing } else { p.clamp(0.0, 1.0) }
    }

    fn passive(view: &PlayerView<'_>) -> AgentAction {
        if view.can_check {
            AgentAction::Check
        } else {
            AgentAction::Call
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new(vec![0.25, 0.30, 0.50], vec![0.5, 0.6, 0.45])
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, view: &PlayerView<'_>) -> AgentAction {
        let street_idx = view.street as usize;
        let percent_fold = Self::chance(&self.percent_fold, street_idx, 1.0);
        let percent_call = Self::chance(&self.percent_call, street_idx, 1.0);

        // We shouldn't fold when checking is free.
        if view.to_call > 0 && self.rng.random_bool(percent_fold) {
            return AgentAction::Fold;
        }

        let min = view.min_raise();
        let all_in = view.max_bet();
        if !view.can_raise || all_in < min || self.rng.random_bool(percent_call) {
            return Self::passive(view);
        }

        // Don't overbet too early. Cap the raise at roughly a pot sized bet,
        // but never below the minimum.
        let cap = all_in.min(min.max(view.pot.saturating_add(view.to_call).saturating_mul(2)));
        let amount = self.rng.random_range(min..=cap);
        if view.current_bet == 0 {
            AgentAction::Bet(amount)
        } else {
            AgentAction::Raise(amount)
        }
    }
}

/// Builds a `RandomAgent` with the same percentages for every game.
#[derive(Debug, Clone)]
pub struct RandomAgentGenerator {
    percent_fold: Vec<f64>,
    percent_call: Vec<f64>,
}

impl RandomAgentGenerator {
    pub fn new(percent_fold: Vec<f64>, percent_call: Vec<f64>) -> Self {
        Self {
            percent_fold,
            percent_call,
        }
    }
}

impl Default for RandomAgentGenerator {
    fn default() -> Self {
        Self::new(vec![0.25, 0.30, 0.50], vec![0.5, 0.6, 0.45])
    }
}

impl AgentGenerator for RandomAgentGenerator {
    fn generate(&self, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(RandomAgent::new(
            self.percent_fold.clone(),
            self.percent_call.clone(),
        ))
    }
}
