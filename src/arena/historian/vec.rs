use std::{cell::RefCell, rc::Rc};

use crate::arena::{action::Action, game_state::GameState, game_state::TableState};

use super::{Historian, HistorianError};

#[derive(Debug, Clone)]
pub struct HistoryRecord {
    pub before_game_state: Option<GameState>,
    pub action: Action,
    pub after_game_state: GameState,
}

/// VecHistorian is a historian that will
/// append each action to a vector.
pub struct VecHistorian {
    previous: Option<GameState>,
    records: Rc<RefCell<Vec<HistoryRecord>>>,
}

impl VecHistorian {
    /// Create a new storage for the historian
    /// that can be introspected later.
    pub fn new_storage() -> Rc<RefCell<Vec<HistoryRecord>>> {
        Rc::new(RefCell::new(vec![]))
    }

    /// Create a new VecHistorian with the provided storage
    /// `Rc<RefCell<Vec<HistoryRecord>>>`
    pub fn new(records: Rc<RefCell<Vec<HistoryRecord>>>) -> Self {
        Self {
            records,
            previous: None,
        }
    }
}

impl Historian for VecHistorian {
    fn record_action(&mut self, state: &TableState, action: Action) -> Result<(), HistorianError> {
        let mut records = self.records.try_borrow_mut()?;

        records.push(HistoryRecord {
            before_game_state: self.previous.clone(),
            action,
            after_game_state: state.game.clone(),
        });

        // Record the game state for the next action
        self.previous = Some(state.game.clone());
        Ok(())
    }
}
