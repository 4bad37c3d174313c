use thiserror::Error;

use super::{action::Action, game_state::TableState};

/// HistorianError is the error type for historian implementations.
#[derive(Error, Debug)]
pub enum HistorianError {
    #[error("Unable to record action")]
    UnableToRecordAction,
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Borrow Mut Error: {0}")]
    BorrowMutError(#[from] std::cell::BorrowMutError),
}

/// Historians are a way for the simulation to record or notify of
/// actions while the game is progressing. This is useful for
/// logging, debugging, or even for implementing a replay system.
pub trait Historian {
    /// This method is called by the simulation after every action.
    ///
    /// # Arguments
    /// - `state` - The table after the action was applied
    /// - `action` - The action that happened
    ///
    /// Returning an error will cause the historian to be dropped from the
    /// `HoldemSimulation`, unless the simulation was built to panic instead.
    fn record_action(&mut self, state: &TableState, action: Action) -> Result<(), HistorianError>;
}

mod failing;
mod fn_historian;
mod vec;

pub use failing::FailingHistorian;
pub use fn_historian::FnHistorian;
pub use vec::{HistoryRecord, VecHistorian};
