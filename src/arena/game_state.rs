use core::fmt;

use crate::core::{ActivePlayerBitSetIter, Card, PlayerBitSet};

use super::errors::GameStateError;

/// The most players a single 52 card deck can deal to:
/// two hole cards each plus five community cards.
pub const MAX_PLAYERS: usize = (52 - 5) / 2;

/// The betting streets of a round, in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub fn advance(&self) -> Self {
        match *self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::Showdown,
            Street::Showdown => Street::Showdown,
        }
    }

    /// How many community cards get dealt going into this street.
    pub fn cards_to_deal(&self) -> usize {
        match *self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }
}

/// What's left to do after a change to who is folded or out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// More than one player is still contesting the pot.
    Continue,
    /// Exactly one player is left in the round. They take the pot.
    RoundWon,
    /// Exactly one player is left in the game.
    GameWon,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

/// State that lives for a whole game, until one player has every chip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// The number of seats at the table.
    pub num_players: usize,
    /// Players that can no longer play. Never cleared during a game.
    pub player_out: PlayerBitSet,
    /// How much is left in each player's stack
    pub stacks: Vec<u32>,
    /// The big blind size
    pub big_blind: u32,
    /// The small blind size
    pub small_blind: u32,
    /// The index of the player who's the dealer for the next round.
    pub dealer_idx: usize,
}

impl GameState {
    pub fn new(stacks: Vec<u32>, big_blind: u32, small_blind: u32, dealer_idx: usize) -> Self {
        let num_players = stacks.len();
        let mut player_out = PlayerBitSet::default();
        // Anyone sitting down with nothing can't play.
        for (idx, stack) in stacks.iter().enumerate() {
            if *stack == 0 {
                player_out.enable(idx);
            }
        }
        GameState {
            num_players,
            player_out,
            stacks,
            big_blind,
            small_blind,
            dealer_idx,
        }
    }

    /// Seats that are still in the game.
    pub fn non_out_players(&self) -> PlayerBitSet {
        !self.player_out & PlayerBitSet::new(self.num_players)
    }

    pub fn num_non_out_players(&self) -> usize {
        self.non_out_players().count()
    }

    pub fn total_chips(&self) -> u64 {
        self.stacks.iter().map(|s| u64::from(*s)).sum()
    }
}

/// State that lives from the blinds until the pot is awarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub small_blind: u32,
    pub big_blind: u32,
    pub dealer_idx: usize,
    /// Everything put in this round. It only ever grows.
    pub pot: u32,
    pub player_folded: PlayerBitSet,
    /// Players with no chips left behind who are still in the hand.
    pub player_all_in: PlayerBitSet,
    pub board: Vec<Card>,
    /// Hole cards. `None` for players dealt out of the round.
    pub hands: Vec<Option<[Card; 2]>>,
    /// Total each player has put in over every street this round.
    pub player_total_bet: Vec<u32>,
    pub player_winnings: Vec<u32>,
    pub starting_stacks: Vec<u32>,
    pub street: Street,
}

impl RoundState {
    fn new(game: &GameState, dealer_idx: usize) -> Self {
        let num_players = game.num_players;
        RoundState {
            small_blind: game.small_blind,
            big_blind: game.big_blind,
            dealer_idx,
            pot: 0,
            player_folded: PlayerBitSet::default(),
            player_all_in: PlayerBitSet::default(),
            board: Vec::with_capacity(5),
            hands: vec![None; num_players],
            player_total_bet: vec![0; num_players],
            player_winnings: vec![0; num_players],
            starting_stacks: game.stacks.clone(),
            street: Street::Preflop,
        }
    }
}

/// State that lives for one betting street.
#[derive(Clone, PartialEq, Eq)]
pub struct StreetState {
    /// The index of the next player to act.
    pub to_act_idx: usize,
    /// The value to be called. The largest amount anyone has put in this
    /// street.
    pub bet: u32,
    /// How much each player has put in so far this street.
    pub player_bet: Vec<u32>,
    /// The first player to check, only meaningful while there's no bet.
    pub first_checker: Option<usize>,
    /// The big blind still gets to act even if everyone just called.
    pub big_blind_option: Option<usize>,
}

impl StreetState {
    fn new(num_players: usize, to_act_idx: usize) -> Self {
        StreetState {
            to_act_idx,
            bet: 0,
            player_bet: vec![0; num_players],
            first_checker: None,
            big_blind_option: None,
        }
    }

    pub fn current_player_bet(&self) -> u32 {
        self.player_bet[self.to_act_idx]
    }
}

/// The read only view of the table an agent gets on its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView<'a> {
    pub idx: usize,
    pub hole_cards: [Card; 2],
    pub board: &'a [Card],
    pub street: Street,
    pub dealer_idx: usize,
    pub pot: u32,
    /// The largest total bet on this street.
    pub current_bet: u32,
    /// What this player has already put in this street.
    pub player_bet: u32,
    pub stack: u32,
    /// Extra chips needed to match the current bet.
    pub to_call: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Players still in the hand, this one included.
    pub num_in_hand: usize,
    /// Checking is only allowed with no bet on the street.
    pub can_check: bool,
    /// Raising is closed once someone can't match the bet.
    pub can_raise: bool,
}

impl PlayerView<'_> {
    /// The smallest total bet that counts as a raise (or an opening bet).
    pub fn min_raise(&self) -> u32 {
        if self.current_bet == 0 {
            self.small_blind
        } else {
            self.current_bet.saturating_mul(2)
        }
    }

    /// The total bet that puts this player all in.
    pub fn max_bet(&self) -> u32 {
        self.player_bet + self.stack
    }
}

/// Everything the round engine mutates. The simulation is the only writer.
#[derive(Clone, PartialEq, Eq)]
pub struct TableState {
    pub game: GameState,
    pub round: RoundState,
    pub street: StreetState,
}

impl TableState {
    pub fn new(game: GameState) -> Self {
        let round = RoundState::new(&game, game.dealer_idx);
        let street = StreetState::new(game.num_players, game.dealer_idx);
        TableState {
            game,
            round,
            street,
        }
    }

    pub fn num_players(&self) -> usize {
        self.game.num_players
    }

    /// Still contesting the pot this round.
    pub fn in_hand(&self, idx: usize) -> bool {
        !self.game.player_out.get(idx) && !self.round.player_folded.get(idx)
    }

    /// Still has decisions to make this round.
    pub fn can_act(&self, idx: usize) -> bool {
        self.in_hand(idx) && !self.round.player_all_in.get(idx)
    }

    /// Seats still contesting the pot this round.
    pub fn in_hand_set(&self) -> PlayerBitSet {
        PlayerBitSet::new(self.num_players())
            & !(self.game.player_out | self.round.player_folded)
    }

    /// Seats that still have decisions to make this round.
    pub fn actor_set(&self) -> PlayerBitSet {
        self.in_hand_set() & !self.round.player_all_in
    }

    pub fn num_in_hand(&self) -> usize {
        self.in_hand_set().count()
    }

    pub fn players_in_hand(&self) -> ActivePlayerBitSetIter {
        self.in_hand_set().ones()
    }

    /// The first seat after `from`, going around the table, that matches.
    /// `from` itself is checked last.
    pub fn next_seat_after(&self, from: usize, pred: impl Fn(usize) -> bool) -> Option<usize> {
        let n = self.num_players();
        (1..=n).map(|step| (from + step) % n).find(|idx| pred(*idx))
    }

    /// Throw away the last round and start a fresh one with the button at
    /// `dealer_idx`. Nothing is dealt and no blinds are posted.
    pub fn reset_round(&mut self, dealer_idx: usize) {
        self.game.dealer_idx = dealer_idx;
        self.round = RoundState::new(&self.game, dealer_idx);
        self.street = StreetState::new(self.num_players(), dealer_idx);
        // Blinds get posted starting from the seat after the dealer.
        self.street.to_act_idx = self
            .next_seat_after(dealer_idx, |idx| self.in_hand(idx))
            .unwrap_or(dealer_idx);
    }

    /// Move on to `street`. Action starts with the first player after the
    /// dealer that can act.
    pub fn start_street(&mut self, street: Street) {
        self.round.street = street;
        let dealer_idx = self.round.dealer_idx;
        self.street = StreetState::new(self.num_players(), dealer_idx);
        self.street.to_act_idx = self
            .next_seat_after(dealer_idx, |idx| self.can_act(idx))
            .unwrap_or(dealer_idx);
    }

    /// Pass the action to the next player that can act. If nobody else can
    /// act the action stays where it is.
    pub fn advance(&mut self) {
        if let Some(next) = self.next_seat_after(self.street.to_act_idx, |idx| self.can_act(idx)) {
            self.street.to_act_idx = next;
        }
    }

    /// Put a bet in for the player to act.
    ///
    /// `amount` is the player's total for the street. On success the extra
    /// chips that went in are returned and the action moves on. On failure
    /// nothing has changed.
    pub fn bet(&mut self, amount: u32) -> Result<u32, GameStateError> {
        let idx = self.street.to_act_idx;
        let extra = self.validate_bet(idx, amount)?;
        self.commit(idx, extra);
        self.advance();
        Ok(extra)
    }

    /// Post a blind for the player to act. Short stacks go all in for
    /// whatever they have instead of being refused.
    pub fn forced_bet(&mut self, amount: u32) -> u32 {
        let idx = self.street.to_act_idx;
        let wanted = amount.saturating_sub(self.street.player_bet[idx]);
        let extra = wanted.min(self.game.stacks[idx]);
        self.commit(idx, extra);
        self.advance();
        extra
    }

    /// Match the current bet, or go all in for less if the stack is short.
    /// Only used once raising is closed.
    pub fn call_capped(&mut self) -> u32 {
        let idx = self.street.to_act_idx;
        let wanted = self.street.bet - self.street.player_bet[idx];
        let extra = wanted.min(self.game.stacks[idx]);
        self.commit(idx, extra);
        self.advance();
        extra
    }

    pub fn check(&mut self) -> Result<(), GameStateError> {
        if self.street.bet != 0 {
            return Err(GameStateError::BetNotAllowed);
        }
        let idx = self.street.to_act_idx;
        if self.street.first_checker.is_none() {
            self.street.first_checker = Some(idx);
        }
        self.advance();
        Ok(())
    }

    pub fn fold(&mut self) {
        let idx = self.street.to_act_idx;
        self.round.player_folded.enable(idx);
        self.advance();
    }

    /// Remove a player from the game for the rest of the game. Whatever
    /// is left in their stack goes into the pot. Returns the forfeited chips.
    pub fn eliminate(&mut self, idx: usize) -> u32 {
        self.game.player_out.enable(idx);
        let forfeited = self.game.stacks[idx];
        self.game.stacks[idx] = 0;
        self.round.pot += forfeited;
        self.round.player_total_bet[idx] += forfeited;
        if self.street.to_act_idx == idx {
            self.advance();
        }
        forfeited
    }

    fn validate_bet(&self, idx: usize, amount: u32) -> Result<u32, GameStateError> {
        let current = self.street.bet;
        if amount < current {
            // We've got to at least call. No takes backs.
            Err(GameStateError::BetSizeDoesntCall)
        } else if current < amount && amount < current.saturating_mul(2) {
            Err(GameStateError::RaiseSizeTooSmall)
        } else if current == 0 && amount < self.round.small_blind {
            Err(GameStateError::BetBelowMinimum)
        } else {
            // amount >= current >= player_bet
            let extra = amount - self.street.player_bet[idx];
            if extra > self.game.stacks[idx] {
                Err(GameStateError::InsufficientChips)
            } else {
                Ok(extra)
            }
        }
    }

    fn commit(&mut self, idx: usize, extra: u32) {
        self.game.stacks[idx] -= extra;
        self.street.player_bet[idx] += extra;
        self.round.player_total_bet[idx] += extra;
        self.round.pot += extra;
        self.street.bet = self.street.bet.max(self.street.player_bet[idx]);

        if self.game.stacks[idx] == 0 {
            // Keep track of going all in. They stay in the hand but won't be
            // asked to act again.
            self.round.player_all_in.enable(idx);
        }
    }

    /// Someone still in the hand can't match the current bet, so nobody may
    /// raise until that's resolved.
    pub fn is_equalizing(&self) -> bool {
        self.players_in_hand()
            .any(|idx| self.street.player_bet[idx] + self.game.stacks[idx] < self.street.bet)
    }

    /// Has the action come back around to where everyone still able to act
    /// has either checked or matched the bet.
    pub fn street_complete(&self) -> bool {
        let actors = self.actor_set();
        if actors.empty() {
            true
        } else if actors.count() == 1 {
            // With nobody left to bet against the last player only needs
            // to have matched.
            actors
                .ones()
                .all(|only| self.street.player_bet[only] >= self.street.bet)
        } else {
            let idx = self.street.to_act_idx;
            let committed = self.street.player_bet[idx];
            committed == self.street.bet
                && (self.street.bet > 0 || self.street.first_checker == Some(idx))
                && self.street.big_blind_option != Some(idx)
        }
    }

    pub fn outcome(&self) -> Outcome {
        let non_out = self.game.num_non_out_players();
        let active = self.num_in_hand();
        if non_out == 1 {
            Outcome::GameWon
        } else if active == 1 {
            Outcome::RoundWon
        } else {
            Outcome::Continue
        }
    }

    pub fn award(&mut self, idx: usize, amount: u32) {
        self.game.stacks[idx] += amount;
        self.round.player_winnings[idx] += amount;
    }

    /// Mark anyone left with an empty stack as out. Returns who went out.
    pub fn settle_busted(&mut self) -> Vec<usize> {
        let busted: Vec<usize> = self
            .game
            .non_out_players()
            .ones()
            .filter(|idx| self.game.stacks[*idx] == 0)
            .collect();
        for idx in &busted {
            self.game.player_out.enable(*idx);
        }
        busted
    }

    /// The view handed to the agent in seat `idx`. `None` if that player
    /// hasn't been dealt in.
    pub fn player_view(&self, idx: usize) -> Option<PlayerView<'_>> {
        let hole_cards = self.round.hands.get(idx).copied().flatten()?;
        let player_bet = self.street.player_bet[idx];
        Some(PlayerView {
            idx,
            hole_cards,
            board: &self.round.board,
            street: self.round.street,
            dealer_idx: self.round.dealer_idx,
            pot: self.round.pot,
            current_bet: self.street.bet,
            player_bet,
            stack: self.game.stacks[idx],
            to_call: self.street.bet - player_bet,
            small_blind: self.round.small_blind,
            big_blind: self.round.big_blind,
            num_in_hand: self.num_in_hand(),
            can_check: self.street.bet == 0,
            can_raise: !self.is_equalizing(),
        })
    }
}

impl fmt::Debug for StreetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreetState")
            .field("to_act_idx", &self.to_act_idx)
            .field("bet", &self.bet)
            .field("player_bet", &self.player_bet)
            .field("first_checker", &self.first_checker)
            .field("big_blind_option", &self.big_blind_option)
            .finish()
    }
}

impl fmt::Debug for TableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableState")
            .field("stacks", &self.game.stacks)
            .field("player_out", &self.game.player_out)
            .field("dealer_idx", &self.round.dealer_idx)
            .field("street", &self.round.street)
            .field("pot", &self.round.pot)
            .field("player_folded", &self.round.player_folded)
            .field("player_all_in", &self.round.player_all_in)
            .field("board", &self.round.board)
            .field("street_state", &self.street)
            .finish()
    }
}
