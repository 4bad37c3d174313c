use crate::arena::{action::Action, game_state::TableState};

use super::{Historian, HistorianError};

/// A historian that hands every action to a function. This is useful for
/// testing and debugging.
#[derive(Debug, Clone)]
pub struct FnHistorian<F> {
    func: F,
}

impl<F: Fn(&TableState, Action) -> Result<(), HistorianError>> FnHistorian<F> {
    /// Create a new `FnHistorian` with the provided function
    /// that will be called when an action is received on a simulation.
    pub fn new(f: F) -> Self {
        Self { func: f }
    }
}

impl<F: Fn(&TableState, Action) -> Result<(), HistorianError>> Historian for FnHistorian<F> {
    fn record_action(&mut self, state: &TableState, action: Action) -> Result<(), HistorianError> {
        (self.func)(state, action)
    }
}
