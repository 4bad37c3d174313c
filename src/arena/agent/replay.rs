use crate::arena::{action::AgentAction, game_state::PlayerView};

use super::Agent;

/// An agent that plays back a fixed list of actions, then keeps returning
/// `default` once the list runs out.
#[derive(Debug, Clone)]
pub struct VecReplayAgent {
    actions: Vec<AgentAction>,
    idx: usize,
    default: AgentAction,
}

impl VecReplayAgent {
    pub fn new(actions: Vec<AgentAction>) -> Self {
        Self {
            actions,
            idx: 0,
            default: AgentAction::Fold,
        }
    }

    pub fn new_with_default(actions: Vec<AgentAction>, default: AgentAction) -> Self {
        Self {
            actions,
            idx: 0,
            default,
        }
    }
}

impl Agent for VecReplayAgent {
    fn act(&mut self, _view: &PlayerView<'_>) -> AgentAction {
        let idx = self.idx;
        self.idx += 1;
        self.actions.get(idx).map_or(self.default, |a| *a)
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{
        GameState, HoldemSimulationBuilder, Outcome,
        action::{Action, AgentAction},
        historian::VecHistorian,
    };

    use super::*;

    #[test_log::test]
    fn test_replay_then_default() {
        let game_state = GameState::new(vec![100, 100], 10, 5, 1);
        let agents: Vec<Box<dyn Agent>> = vec![
            // Seat 0 is the small blind and acts first heads up.
            Box::new(VecReplayAgent::new(vec![AgentAction::Call])),
            Box::new(VecReplayAgent::new_with_default(vec![], AgentAction::Call)),
        ];
        let records = VecHistorian::new_storage();
        let hist = Box::new(VecHistorian::new(records.clone()));
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .historians(vec![hist])
            .build()
            .unwrap();

        let result = sim.run_round(true).unwrap();
        // Seat 0 runs out of actions on the flop and folds to seat 1's call.
        assert_eq!(Outcome::RoundWon, result.outcome);
        assert_eq!(vec![90, 110], sim.state.game.stacks);

        let played: Vec<AgentAction> = records
            .borrow()
            .iter()
            .filter_map(|r| match &r.action {
                Action::PlayedAction(p) => Some(p.action),
                _ => None,
            })
            .collect();
        assert_eq!(
            vec![AgentAction::Call, AgentAction::Call, AgentAction::Fold],
            played
        );
    }
}
