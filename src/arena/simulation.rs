use tracing::{Level, debug_span, event, trace_span};

use crate::core::{Card, HandStrength, evaluate};

use super::{
    Agent,
    action::{
        Action, AgentAction, AwardPayload, DealStartingHandPayload, EliminationPayload,
        ForcedBetPayload, ForcedBetType, PlayedActionPayload, RoundStartPayload,
    },
    card_source::CardSource,
    errors::{GameStateError, HoldemSimulationError},
    game_state::{GameState, Outcome, RoundState, Street, StreetState, TableState},
    historian::Historian,
};

/// How a pot that went to showdown was split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowdownResult {
    /// The strength of every seat that showed a hand. `None` for players
    /// who folded or weren't dealt in.
    pub strengths: Vec<Option<HandStrength>>,
    /// Seats that split the pot, starting left of the dealer.
    pub winners: Vec<usize>,
    pub pot: u32,
    /// `GameWon` if the showdown left only one player with chips.
    pub outcome: Outcome,
}

/// What happened over one full round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub dealer_idx: usize,
    pub pot: u32,
    /// `RoundWon` if everyone else folded or was eliminated, `GameWon` if
    /// the game is over, `Continue` after a showdown that left the game
    /// going.
    pub outcome: Outcome,
    pub showdown: Option<ShowdownResult>,
    /// Players who went out during this round, in seat order.
    pub busted: Vec<usize>,
}

/// The round engine. It deals, posts blinds, asks each agent for its action
/// in turn, enforces the betting rules and settles the pot.
///
/// Illegal actions are never errors. The agent that sent one is eliminated
/// from the game and whatever it had left goes into the pot. Errors returned
/// from here mean the simulation itself can't go on.
pub struct HoldemSimulation {
    pub(crate) agents: Vec<Box<dyn Agent>>,
    pub(crate) card_source: Box<dyn CardSource>,
    pub(crate) historians: Vec<Box<dyn Historian>>,
    pub state: TableState,
    pub(crate) panic_on_historian_error: bool,
    round_started: bool,
    busted: Vec<usize>,
}

impl HoldemSimulation {
    pub(crate) fn new(
        game_state: GameState,
        agents: Vec<Box<dyn Agent>>,
        card_source: Box<dyn CardSource>,
        historians: Vec<Box<dyn Historian>>,
        panic_on_historian_error: bool,
    ) -> Self {
        Self {
            agents,
            card_source,
            historians,
            state: TableState::new(game_state),
            panic_on_historian_error,
            round_started: false,
            busted: vec![],
        }
    }

    pub fn game_state(&self) -> &GameState {
        &self.state.game
    }

    pub fn round_state(&self) -> &RoundState {
        &self.state.round
    }

    pub fn street_state(&self) -> &StreetState {
        &self.state.street
    }

    /// How many historians are still attached. Historians that fail are
    /// dropped.
    pub fn num_historians(&self) -> usize {
        self.historians.len()
    }

    /// Is there a round that has been started but not settled.
    pub fn round_in_progress(&self) -> bool {
        self.round_started
    }

    /// Play one full round: blinds, up to four betting streets and the
    /// showdown if more than one player is left.
    ///
    /// `first_round` keeps the dealer where the game state has it. Every
    /// later round moves the button to the next player still in the game.
    pub fn run_round(&mut self, first_round: bool) -> Result<RoundResult, HoldemSimulationError> {
        let span = debug_span!("run_round", first_round);
        let _enter = span.enter();

        let mut outcome = self.start_round(first_round)?;
        if !self.round_started {
            // The game was already over, nothing got dealt.
            return Ok(RoundResult {
                dealer_idx: self.state.game.dealer_idx,
                pot: 0,
                outcome,
                showdown: None,
                busted: vec![],
            });
        }

        while self.round_started && self.state.round.street != Street::Showdown {
            outcome = self.run_street()?;
        }

        let showdown = if self.round_started {
            let showdown = self.run_showdown()?;
            outcome = showdown.outcome;
            Some(showdown)
        } else {
            None
        };

        Ok(RoundResult {
            dealer_idx: self.state.round.dealer_idx,
            pot: self.state.round.pot,
            outcome,
            showdown,
            busted: std::mem::take(&mut self.busted),
        })
    }

    /// Set up a new round: move the button, shuffle, deal hole cards and
    /// post the blinds.
    ///
    /// Returns `GameWon` without starting anything if only one player is
    /// left in the game.
    pub fn start_round(&mut self, first_round: bool) -> Result<Outcome, HoldemSimulationError> {
        let span = trace_span!("start_round");
        let _enter = span.enter();

        let non_out = self.state.game.num_non_out_players();
        if non_out == 1 {
            return Ok(Outcome::GameWon);
        } else if non_out == 0 {
            return Err(HoldemSimulationError::TooFewPlayers(0));
        }

        let dealer_idx = self.next_dealer(first_round)?;
        self.state.reset_round(dealer_idx);
        self.card_source.reset();
        self.card_source.shuffle();
        self.busted.clear();
        self.round_started = true;

        event!(parent: &span, Level::DEBUG, dealer_idx, stacks = ?self.state.game.stacks, "round_start");
        self.record_action(Action::RoundStart(RoundStartPayload {
            dealer_idx,
            small_blind: self.state.game.small_blind,
            big_blind: self.state.game.big_blind,
            stacks: self.state.game.stacks.clone(),
            player_out: self.state.game.player_out,
        }));

        self.deal_starting_hands()?;
        self.post_blinds();

        Ok(self.state.outcome())
    }

    /// Run the current street's betting then move the round to the next
    /// street. Community cards for the flop, turn and river are dealt at
    /// the start of their street.
    ///
    /// Betting only happens when at least two players can still act. Once
    /// a single player is left in the round the pot is awarded and the
    /// round is over.
    pub fn run_street(&mut self) -> Result<Outcome, HoldemSimulationError> {
        if !self.round_started {
            return Err(HoldemSimulationError::RoundNotStarted);
        }
        let street = self.state.round.street;
        if street == Street::Showdown {
            return Ok(Outcome::Continue);
        }

        let span = trace_span!("run_street", ?street);
        let _enter = span.enter();

        if street != Street::Preflop {
            self.state.start_street(street);
            self.record_action(Action::StreetAdvance(street));
            self.deal_community(street.cards_to_deal())?;
        }

        let outcome = self.run_betting()?;
        if outcome.is_terminal() {
            return self.finish_uncontested();
        }

        self.state.round.street = street.advance();
        Ok(Outcome::Continue)
    }

    /// Compare hands and split the pot between the best of them. Odd chips
    /// go one at a time to winners starting left of the dealer.
    pub fn run_showdown(&mut self) -> Result<ShowdownResult, HoldemSimulationError> {
        if !self.round_started {
            return Err(HoldemSimulationError::RoundNotStarted);
        }
        if self.state.round.street != Street::Showdown {
            return Err(HoldemSimulationError::NotAtShowdown);
        }

        let span = trace_span!("showdown");
        let _enter = span.enter();

        let contenders = self.state.num_in_hand();
        if contenders < 2 {
            return Err(HoldemSimulationError::ShowdownWithoutContest(contenders));
        }
        let board: [_; 5] = self
            .state
            .round
            .board
            .as_slice()
            .try_into()
            .map_err(|_| HoldemSimulationError::IncompleteBoard(self.state.round.board.len()))?;

        let num_players = self.state.num_players();
        let mut strengths: Vec<Option<HandStrength>> = vec![None; num_players];
        for idx in self.state.players_in_hand().collect::<Vec<_>>() {
            let hole = self.state.round.hands[idx].ok_or(HoldemSimulationError::RoundNotStarted)?;
            strengths[idx] = Some(evaluate(hole, board));
        }

        let best = strengths
            .iter()
            .flatten()
            .max()
            .copied()
            .ok_or(HoldemSimulationError::NoWinner)?;
        let dealer_idx = self.state.round.dealer_idx;
        let winners: Vec<usize> = (1..=num_players)
            .map(|step| (dealer_idx + step) % num_players)
            .filter(|idx| strengths[*idx] == Some(best))
            .collect();

        let pot = self.state.round.pot;
        let share = pot / winners.len() as u32;
        let remainder = pot as usize % winners.len();
        for (position, idx) in winners.iter().enumerate() {
            let award_amount = share + u32::from(position < remainder);
            self.state.award(*idx, award_amount);
            event!(parent: &span, Level::INFO, idx, award_amount, pot, strength = %best, "pot_awarded");
            self.record_action(Action::Award(AwardPayload {
                idx: *idx,
                total_pot: pot,
                award_amount,
                strength: Some(best),
            }));
        }

        let outcome = match self.end_round() {
            Outcome::GameWon => Outcome::GameWon,
            _ => Outcome::Continue,
        };
        Ok(ShowdownResult {
            strengths,
            winners,
            pot,
            outcome,
        })
    }

    fn next_dealer(&self, first_round: bool) -> Result<usize, HoldemSimulationError> {
        let game = &self.state.game;
        if first_round && !game.player_out.get(game.dealer_idx) {
            return Ok(game.dealer_idx);
        }
        self.state
            .next_seat_after(game.dealer_idx, |idx| !game.player_out.get(idx))
            .ok_or(HoldemSimulationError::TooFewPlayers(0))
    }

    fn draw(&mut self) -> Result<Card, HoldemSimulationError> {
        self.card_source
            .draw()
            .ok_or(HoldemSimulationError::DeckExhausted)
    }

    fn deal_starting_hands(&mut self) -> Result<(), HoldemSimulationError> {
        let num_players = self.state.num_players();
        let dealer_idx = self.state.round.dealer_idx;
        for step in 1..=num_players {
            let idx = (dealer_idx + step) % num_players;
            if self.state.game.player_out.get(idx) {
                continue;
            }
            let cards = [self.draw()?, self.draw()?];
            self.state.round.hands[idx] = Some(cards);
            self.record_action(Action::DealStartingHand(DealStartingHandPayload { idx, cards }));
        }
        Ok(())
    }

    fn post_blinds(&mut self) {
        for (amount, forced_bet_type) in [
            (self.state.round.small_blind, ForcedBetType::SmallBlind),
            (self.state.round.big_blind, ForcedBetType::BigBlind),
        ] {
            let idx = self.state.street.to_act_idx;
            let bet = self.state.forced_bet(amount);
            event!(Level::TRACE, idx, bet, ?forced_bet_type, "forced_bet");
            self.record_action(Action::ForcedBet(ForcedBetPayload {
                idx,
                bet,
                player_stack: self.state.game.stacks[idx],
                forced_bet_type,
            }));
            if forced_bet_type == ForcedBetType::BigBlind && !self.state.round.player_all_in.get(idx)
            {
                self.state.street.big_blind_option = Some(idx);
            }
        }
    }

    fn deal_community(&mut self, count: usize) -> Result<(), HoldemSimulationError> {
        for _ in 0..count {
            let card = self.draw()?;
            self.state.round.board.push(card);
            self.record_action(Action::DealCommunity(card));
        }
        Ok(())
    }

    /// Ask agents for actions until the street is complete or the round is
    /// decided.
    fn run_betting(&mut self) -> Result<Outcome, HoldemSimulationError> {
        while !self.state.street_complete() {
            let idx = self.state.street.to_act_idx;
            let equalizing = self.state.is_equalizing();

            let action = {
                let view = self
                    .state
                    .player_view(idx)
                    .ok_or(HoldemSimulationError::RoundNotStarted)?;
                let agent = self
                    .agents
                    .get_mut(idx)
                    .ok_or(HoldemSimulationError::AgentCountMismatch {
                        expected: self.state.num_players(),
                        actual: idx,
                    })?;
                agent.act(&view)
            };
            event!(Level::TRACE, idx, ?action, equalizing, "agent_action");

            // Acting at all uses up the big blind's option.
            if self.state.street.big_blind_option == Some(idx) {
                self.state.street.big_blind_option = None;
            }

            let outcome = if equalizing {
                self.equalize_turn(idx, action)
            } else {
                self.player_turn(idx, action)
            };
            if outcome.is_terminal() {
                return Ok(outcome);
            }
        }
        Ok(self.state.outcome())
    }

    /// A normal turn, raising is open.
    fn player_turn(&mut self, idx: usize, action: AgentAction) -> Outcome {
        let starting_bet = self.state.street.bet;
        let starting_player_bet = self.state.street.current_player_bet();

        let result = match action {
            AgentAction::Fold => {
                self.state.fold();
                Ok(())
            }
            AgentAction::Check => self.state.check(),
            AgentAction::Call => self.state.bet(starting_bet).map(|_| ()),
            AgentAction::Raise(amount) => self.state.bet(amount).map(|_| ()),
            AgentAction::Bet(amount) if starting_bet == 0 => self.state.bet(amount).map(|_| ()),
            AgentAction::Bet(_) => Err(GameStateError::BetNotAllowed),
        };

        self.settle_turn(idx, action, result, starting_bet, starting_player_bet, false)
    }

    /// Someone can't match the bet, so the only choices are to match it (or
    /// go all in for less) or fold.
    fn equalize_turn(&mut self, idx: usize, action: AgentAction) -> Outcome {
        let starting_bet = self.state.street.bet;
        let starting_player_bet = self.state.street.current_player_bet();
        let call_total = starting_bet.min(starting_player_bet + self.state.game.stacks[idx]);

        let result = match action {
            AgentAction::Fold => {
                self.state.fold();
                Ok(())
            }
            AgentAction::Check => self.state.check(),
            AgentAction::Call => {
                self.state.call_capped();
                Ok(())
            }
            // Naming the call amount is accepted as a call.
            AgentAction::Raise(amount) if amount == call_total => {
                self.state.call_capped();
                Ok(())
            }
            AgentAction::Raise(_) | AgentAction::Bet(_) => Err(GameStateError::BetNotAllowed),
        };

        self.settle_turn(idx, action, result, starting_bet, starting_player_bet, true)
    }

    fn settle_turn(
        &mut self,
        idx: usize,
        action: AgentAction,
        result: Result<(), GameStateError>,
        starting_bet: u32,
        starting_player_bet: u32,
        equalizing: bool,
    ) -> Outcome {
        match result {
            Ok(()) => {
                self.record_action(Action::PlayedAction(PlayedActionPayload {
                    idx,
                    street: self.state.round.street,
                    action,
                    starting_bet,
                    final_bet: self.state.street.bet,
                    starting_player_bet,
                    final_player_bet: self.state.street.player_bet[idx],
                    player_stack: self.state.game.stacks[idx],
                    final_pot: self.state.round.pot,
                    equalizing,
                }));
            }
            Err(reason) => {
                event!(Level::WARN, idx, ?action, ?reason, "player_eliminated");
                let forfeited = self.state.eliminate(idx);
                self.busted.push(idx);
                self.record_action(Action::PlayerEliminated(EliminationPayload {
                    idx,
                    street: self.state.round.street,
                    action,
                    reason,
                    forfeited,
                }));
            }
        }
        self.state.outcome()
    }

    /// Everyone but one player folded or was eliminated. They take the pot
    /// without showing.
    fn finish_uncontested(&mut self) -> Result<Outcome, HoldemSimulationError> {
        let winner = self
            .state
            .players_in_hand()
            .next()
            .or_else(|| (0..self.state.num_players()).find(|idx| !self.state.game.player_out.get(*idx)))
            .ok_or(HoldemSimulationError::NoWinner)?;

        let total_pot = self.state.round.pot;
        self.state.award(winner, total_pot);
        event!(Level::INFO, winner, total_pot, "folded_to_winner");
        self.record_action(Action::Award(AwardPayload {
            idx: winner,
            total_pot,
            award_amount: total_pot,
            strength: None,
        }));

        Ok(self.end_round())
    }

    fn end_round(&mut self) -> Outcome {
        let busted = self.state.settle_busted();
        if !busted.is_empty() {
            event!(Level::DEBUG, ?busted, "players_busted");
        }
        self.busted.extend(busted);
        self.busted.sort_unstable();
        self.round_started = false;

        if self.state.game.num_non_out_players() == 1 {
            Outcome::GameWon
        } else {
            Outcome::RoundWon
        }
    }

    // Make sure that all modifications to the state are complete before
    // calling `record_action`. Historians see the state after the action.
    fn record_action(&mut self, action: Action) {
        event!(Level::TRACE, ?action, "record_action");
        let state = &self.state;
        let panic_on_historian_error = self.panic_on_historian_error;
        self.historians
            .retain_mut(|historian| match historian.record_action(state, action.clone()) {
                Ok(()) => true,
                Err(error) => {
                    if panic_on_historian_error {
                        panic!("Historian error {error}");
                    }
                    event!(Level::WARN, ?error, "historian_error");
                    false
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{
        HoldemSimulationBuilder,
        agent::{CheckingAgent, FoldingAgent, VecReplayAgent},
        historian::VecHistorian,
        test_util::{StackedCardSource, assert_valid_game_state, assert_valid_round_data},
    };
    use crate::core::HandKind;

    use super::*;

    fn replay(actions: Vec<AgentAction>) -> Box<dyn Agent> {
        Box::new(VecReplayAgent::new(actions))
    }

    #[test_log::test]
    fn test_heads_up_check_down() {
        let game_state = GameState::new(vec![1000, 1000], 20, 10, 0);
        let agents: Vec<Box<dyn Agent>> = vec![Box::new(CheckingAgent), Box::new(CheckingAgent)];
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .build()
            .unwrap();

        assert_eq!(Outcome::Continue, sim.start_round(true).unwrap());
        // Heads up the dealer is the big blind.
        assert_eq!(vec![980, 990], sim.state.game.stacks);
        assert_eq!(1, sim.state.street.to_act_idx);

        for street in [Street::Preflop, Street::Flop, Street::Turn, Street::River] {
            assert_eq!(street, sim.state.round.street);
            assert_eq!(Outcome::Continue, sim.run_street().unwrap());
        }
        assert_eq!(Street::Showdown, sim.state.round.street);
        assert_eq!(40, sim.state.round.pot);
        assert_eq!(5, sim.state.round.board.len());

        let showdown = sim.run_showdown().unwrap();
        assert_eq!(40, showdown.pot);
        assert!(showdown.strengths.iter().all(|s| s.is_some()));
        assert_valid_game_state(&sim.state, 2000);
        assert!(!sim.round_in_progress());
    }

    #[test_log::test]
    fn test_showdown_best_hand_wins() {
        let game_state = GameState::new(vec![100, 100, 100], 10, 5, 0);
        // Seat 1 gets the pair of aces, seat 2 the kings, seat 0 junk.
        let cards = StackedCardSource::for_deal(
            0,
            &[["7c", "2d"], ["As", "Ad"], ["Ks", "Kd"]],
            ["3h", "8s", "9d", "Jc", "4h"],
        );
        let agents: Vec<Box<dyn Agent>> = (0..3)
            .map(|_| Box::new(CheckingAgent) as Box<dyn Agent>)
            .collect();
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .card_source(Box::new(cards))
            .build()
            .unwrap();

        let result = sim.run_round(true).unwrap();
        let showdown = result.showdown.unwrap();
        assert_eq!(vec![1], showdown.winners);
        assert_eq!(30, showdown.pot);
        assert_eq!(
            HandKind::Pair,
            showdown.strengths[1].map(|s| s.kind).unwrap()
        );
        assert_eq!(vec![90, 120, 90], sim.state.game.stacks);
    }

    #[test_log::test]
    fn test_split_pot_odd_chip() {
        // Board plays for everyone, so all three split.
        let game_state = GameState::new(vec![100, 100, 100], 10, 5, 0);
        let cards = StackedCardSource::for_deal(
            0,
            &[["2c", "3d"], ["2d", "3c"], ["2h", "3s"]],
            ["As", "Ks", "Qs", "Js", "Ts"],
        );
        let agents: Vec<Box<dyn Agent>> = vec![
            // Seat 0 limps, bets the flop then checks it down.
            Box::new(VecReplayAgent::new_with_default(
                vec![AgentAction::Call, AgentAction::Bet(11)],
                AgentAction::Check,
            )),
            Box::new(CheckingAgent),
            Box::new(CheckingAgent),
        ];
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .card_source(Box::new(cards))
            .build()
            .unwrap();

        let result = sim.run_round(true).unwrap();
        assert_eq!(Outcome::Continue, result.outcome);
        let showdown = result.showdown.unwrap();
        // 30 preflop plus 11 from seat 0 and two calls of 11.
        assert_eq!(63, showdown.pot);
        assert_eq!(vec![1, 2, 0], showdown.winners);
        assert_valid_game_state(&sim.state, 300);
        // 21 each, no odd chip.
        assert_eq!(vec![100, 100, 100], sim.state.game.stacks);
    }

    #[test_log::test]
    fn test_odd_chip_goes_left_of_dealer() {
        let game_state = GameState::new(vec![100, 100, 100], 10, 5, 2);
        // Seat 0 is the small blind and folds, seats 1 and 2 chop.
        let cards = StackedCardSource::for_deal(
            2,
            &[["2c", "3d"], ["2d", "3c"], ["2h", "3s"]],
            ["As", "Ks", "Qs", "Js", "Ts"],
        );
        let agents: Vec<Box<dyn Agent>> = vec![
            replay(vec![AgentAction::Fold]),
            Box::new(CheckingAgent),
            Box::new(CheckingAgent),
        ];
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .card_source(Box::new(cards))
            .build()
            .unwrap();

        let result = sim.run_round(true).unwrap();
        let showdown = result.showdown.unwrap();
        // 5 from the folded small blind and 10 from each of the others.
        assert_eq!(25, showdown.pot);
        assert_eq!(vec![1, 2], showdown.winners);
        assert_eq!(vec![95, 103, 102], sim.state.game.stacks);
    }

    #[test_log::test]
    fn test_everyone_folds_to_big_blind() {
        let game_state = GameState::new(vec![100; 4], 10, 5, 0);
        let agents: Vec<Box<dyn Agent>> = (0..4)
            .map(|_| Box::new(FoldingAgent) as Box<dyn Agent>)
            .collect();
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .build()
            .unwrap();

        sim.start_round(true).unwrap();
        assert_eq!(Outcome::RoundWon, sim.run_street().unwrap());
        assert!(!sim.round_in_progress());
        assert_eq!(0, sim.state.round.board.len());
        assert_eq!(105, sim.state.game.stacks[2]);
        assert_eq!(
            Err(HoldemSimulationError::RoundNotStarted),
            sim.run_street()
        );
    }

    #[test_log::test]
    fn test_illegal_check_eliminates() {
        let game_state = GameState::new(vec![100; 3], 10, 5, 0);
        let records = VecHistorian::new_storage();
        let agents: Vec<Box<dyn Agent>> = vec![
            // First to act faces the big blind, checking isn't allowed.
            replay(vec![AgentAction::Check]),
            Box::new(CheckingAgent),
            Box::new(CheckingAgent),
        ];
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .historians(vec![Box::new(VecHistorian::new(records.clone()))])
            .build()
            .unwrap();

        let result = sim.run_round(true).unwrap();
        assert!(sim.state.game.player_out.get(0));
        assert_eq!(0, sim.state.game.stacks[0]);
        assert_eq!(vec![0], result.busted);
        // The forfeited stack is part of the pot.
        assert_eq!(100 + 10 + 10, result.pot);
        assert_valid_game_state(&sim.state, 300);

        let eliminated = records
            .borrow()
            .iter()
            .find_map(|r| match r.action {
                Action::PlayerEliminated(payload) => Some(payload),
                _ => None,
            })
            .unwrap();
        assert_eq!(0, eliminated.idx);
        assert_eq!(GameStateError::BetNotAllowed, eliminated.reason);
        assert_eq!(100, eliminated.forfeited);
    }

    #[test_log::test]
    fn test_small_raise_eliminates() {
        let game_state = GameState::new(vec![100; 2], 10, 5, 0);
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(CheckingAgent),
            // Seat 1 acts first heads up and raises to less than double.
            replay(vec![AgentAction::Raise(15)]),
        ];
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .build()
            .unwrap();

        let result = sim.run_round(true).unwrap();
        assert_eq!(Outcome::GameWon, result.outcome);
        assert_eq!(vec![200, 0], sim.state.game.stacks);

        // Nothing more to play.
        let again = sim.run_round(false).unwrap();
        assert_eq!(Outcome::GameWon, again.outcome);
        assert!(again.showdown.is_none());
    }

    #[test_log::test]
    fn test_bet_over_bet_eliminates() {
        let game_state = GameState::new(vec![100; 2], 10, 5, 0);
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(CheckingAgent),
            replay(vec![AgentAction::Bet(40)]),
        ];
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .build()
            .unwrap();

        let result = sim.run_round(true).unwrap();
        assert_eq!(Outcome::GameWon, result.outcome);
        assert_eq!(vec![1], result.busted);
    }

    #[test_log::test]
    fn test_short_stack_calls_all_in_for_less() {
        // Seat 2 is the big blind with 50 behind the blind.
        let game_state = GameState::new(vec![500, 500, 60], 10, 5, 0);
        let agents: Vec<Box<dyn Agent>> = vec![
            replay(vec![AgentAction::Raise(200)]),
            replay(vec![AgentAction::Call]),
            // Naming the all in total is taken as a call.
            replay(vec![AgentAction::Raise(60)]),
        ];
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .build()
            .unwrap();

        sim.start_round(true).unwrap();
        sim.run_street().unwrap();
        assert!(sim.state.round.player_all_in.get(2));
        assert_eq!(0, sim.state.game.stacks[2]);
        assert_eq!(200 + 200 + 60, sim.state.round.pot);
        assert_valid_round_data(&sim.state);
    }

    #[test_log::test]
    fn test_raise_while_equalizing_eliminates() {
        let game_state = GameState::new(vec![500, 500, 60], 10, 5, 0);
        let agents: Vec<Box<dyn Agent>> = vec![
            replay(vec![AgentAction::Raise(200)]),
            // Seat 2 can't match 200, so raising is closed.
            replay(vec![AgentAction::Raise(400)]),
            Box::new(CheckingAgent),
        ];
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .build()
            .unwrap();

        sim.start_round(true).unwrap();
        sim.run_street().unwrap();
        assert!(sim.state.game.player_out.get(1));
        assert_eq!(0, sim.state.game.stacks[1]);
    }

    #[test_log::test]
    fn test_earlier_all_in_closes_raising_on_flop() {
        // 0 dealer, 1 small blind, 2 big blind with 20 behind.
        let game_state = GameState::new(vec![100, 100, 30], 10, 5, 0);
        let cards = StackedCardSource::for_deal(
            0,
            &[["7c", "2d"], ["As", "Ad"], ["Ks", "Kd"]],
            ["3h", "8s", "9d", "Jc", "4h"],
        );
        let records = VecHistorian::new_storage();
        let agents: Vec<Box<dyn Agent>> = vec![
            replay(vec![
                AgentAction::Call,
                AgentAction::Call,
                AgentAction::Raise(40),
            ]),
            Box::new(VecReplayAgent::new_with_default(
                vec![AgentAction::Call, AgentAction::Call, AgentAction::Bet(10)],
                AgentAction::Check,
            )),
            // Big blind shoves on its option.
            replay(vec![AgentAction::Raise(30)]),
        ];
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .card_source(Box::new(cards))
            .historians(vec![Box::new(VecHistorian::new(records.clone()))])
            .build()
            .unwrap();

        sim.start_round(true).unwrap();
        sim.run_street().unwrap();
        assert_eq!(Street::Flop, sim.round_state().street);
        assert!(sim.state.round.player_all_in.get(2));
        assert_eq!(90, sim.state.round.pot);
        assert_eq!(vec![70, 70, 0], sim.state.game.stacks);

        // Seat 1 bets, which seat 2 can't match from an earlier all in.
        // Seat 0 raises anyway and is removed.
        sim.run_street().unwrap();
        assert!(sim.state.game.player_out.get(0));
        assert_eq!(0, sim.state.game.stacks[0]);
        assert_eq!(90 + 10 + 70, sim.state.round.pot);
        assert_valid_round_data(&sim.state);

        let eliminated = records
            .borrow()
            .iter()
            .find_map(|r| match r.action {
                Action::PlayerEliminated(payload) => Some(payload),
                _ => None,
            })
            .unwrap();
        assert_eq!(0, eliminated.idx);
        assert_eq!(Street::Flop, eliminated.street);
        assert_eq!(AgentAction::Raise(40), eliminated.action);
        assert_eq!(GameStateError::BetNotAllowed, eliminated.reason);
        assert_eq!(70, eliminated.forfeited);

        while sim.round_state().street != Street::Showdown {
            sim.run_street().unwrap();
        }
        let showdown = sim.run_showdown().unwrap();
        assert_eq!(vec![1], showdown.winners);
        assert_eq!(170, showdown.pot);
        assert_eq!(vec![0, 230, 0], sim.state.game.stacks);
        assert_valid_game_state(&sim.state, 230);
    }

    #[test_log::test]
    fn test_all_in_winner_round_data() {
        // Heads up the dealer posts the big blind and seat 1 acts first.
        let game_state = GameState::new(vec![100, 100], 10, 5, 0);
        let cards = StackedCardSource::for_deal(
            0,
            &[["7c", "2d"], ["As", "Ad"]],
            ["3h", "8s", "9d", "Jc", "4h"],
        );
        let agents: Vec<Box<dyn Agent>> = vec![
            replay(vec![AgentAction::Call]),
            replay(vec![AgentAction::Raise(100)]),
        ];
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .card_source(Box::new(cards))
            .build()
            .unwrap();

        let result = sim.run_round(true).unwrap();
        assert_eq!(Outcome::GameWon, result.outcome);
        assert_eq!(vec![0, 200], sim.state.game.stacks);
        // The winner was all in and has since been paid.
        assert!(sim.state.round.player_all_in.get(1));
        assert_eq!(200, sim.state.round.player_winnings[1]);
        assert_valid_round_data(&sim.state);
    }

    #[test_log::test]
    fn test_all_in_players_skip_betting() {
        let game_state = GameState::new(vec![100, 100], 10, 5, 0);
        let records = VecHistorian::new_storage();
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(CheckingAgent),
            replay(vec![AgentAction::Raise(100)]),
        ];
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .historians(vec![Box::new(VecHistorian::new(records.clone()))])
            .build()
            .unwrap();

        let result = sim.run_round(true).unwrap();
        assert!(result.showdown.is_some());
        let played = records
            .borrow()
            .iter()
            .filter(|r| matches!(r.action, Action::PlayedAction(_)))
            .count();
        // The shove and the call, nothing after.
        assert_eq!(2, played);
    }

    #[test_log::test]
    fn test_dealer_moves_past_out_players() {
        let game_state = GameState::new(vec![100, 0, 100, 100], 10, 5, 0);
        let agents: Vec<Box<dyn Agent>> = (0..4)
            .map(|_| Box::new(CheckingAgent) as Box<dyn Agent>)
            .collect();
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .build()
            .unwrap();

        assert_eq!(0, sim.run_round(true).unwrap().dealer_idx);
        assert!(sim.state.round.hands[1].is_none());
        assert_eq!(2, sim.run_round(false).unwrap().dealer_idx);
    }

    #[test_log::test]
    fn test_deck_exhausted() {
        let game_state = GameState::new(vec![100, 100], 10, 5, 0);
        let cards = StackedCardSource::new(
            ["As", "Ks", "Qs"]
                .iter()
                .map(|s| Card::try_from(*s).unwrap())
                .collect(),
        );
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(vec![Box::new(CheckingAgent), Box::new(CheckingAgent)])
            .card_source(Box::new(cards))
            .build()
            .unwrap();

        assert_eq!(
            Err(HoldemSimulationError::DeckExhausted),
            sim.run_round(true)
        );
    }

    #[test_log::test]
    fn test_showdown_too_early() {
        let game_state = GameState::new(vec![100, 100], 10, 5, 0);
        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(vec![Box::new(CheckingAgent), Box::new(CheckingAgent)])
            .build()
            .unwrap();

        assert_eq!(
            Err(HoldemSimulationError::RoundNotStarted),
            sim.run_showdown()
        );
        sim.start_round(true).unwrap();
        assert_eq!(
            Err(HoldemSimulationError::NotAtShowdown),
            sim.run_showdown()
        );
    }
}
