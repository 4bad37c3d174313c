use crate::arena::{action::Action, game_state::TableState};

use super::{Historian, HistorianError};

/// A historian that will always fail to record an action
/// and will return an error.
///
/// This historian is useful for testing the behavior of the simulation
pub struct FailingHistorian;

impl Historian for FailingHistorian {
    fn record_action(&mut self, _state: &TableState, _action: Action) -> Result<(), HistorianError> {
        Err(HistorianError::UnableToRecordAction)
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{GameState, HoldemSimulationBuilder, agent::CheckingAgent};

    use super::*;

    #[test]
    #[should_panic]
    fn test_panic_fail_historian() {
        let historian = Box::new(FailingHistorian);

        let game_state = GameState::new(vec![100; 3], 10, 5, 0);
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(vec![
                Box::new(CheckingAgent),
                Box::new(CheckingAgent),
                Box::new(CheckingAgent),
            ])
            .panic_on_historian_error(true)
            .historians(vec![historian])
            .build()
            .unwrap();

        // The very first action fails to record and that panics.
        let _ = sim.run_round(true);
    }

    #[test_log::test]
    fn test_failing_historian_is_dropped() {
        let game_state = GameState::new(vec![100; 2], 10, 5, 0);
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(vec![Box::new(CheckingAgent), Box::new(CheckingAgent)])
            .historians(vec![Box::new(FailingHistorian)])
            .build()
            .unwrap();

        sim.run_round(true).unwrap();
        assert_eq!(0, sim.num_historians());
    }
}
