use std::io::{self, BufRead, Write};

use tracing::{Level, event};

use crate::arena::{
    action::AgentAction,
    game_state::{GameState, PlayerView},
};

use super::{Agent, AgentGenerator};

/// Turn one line of text into an action.
///
/// Accepts `fold`, `check`, `call`, `bet N` and `raise N` along with their
/// first letters. Case and surrounding whitespace don't matter.
pub fn parse_action(line: &str) -> Option<AgentAction> {
    let lower = line.trim().to_ascii_lowercase();
    let mut words = lower.split_whitespace();
    let verb = words.next()?;
    let amount = words.next().map(str::parse::<u32>);
    if words.next().is_some() {
        return None;
    }

    match (verb, amount) {
        ("f" | "fold", None) => Some(AgentAction::Fold),
        ("x" | "k" | "check", None) => Some(AgentAction::Check),
        ("c" | "call", None) => Some(AgentAction::Call),
        ("b" | "bet", Some(Ok(amount))) => Some(AgentAction::Bet(amount)),
        ("r" | "raise", Some(Ok(amount))) => Some(AgentAction::Raise(amount)),
        _ => None,
    }
}

/// An agent driven by a person typing actions.
///
/// Lines that don't parse are asked for again. Running out of input, or
/// any io error, folds.
pub struct InteractiveAgent<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, view: &PlayerView<'_>) -> io::Result<()> {
        let hole: Vec<String> = view.hole_cards.iter().map(|c| c.to_string()).collect();
        let board: Vec<String> = view.board.iter().map(|c| c.to_string()).collect();
        writeln!(
            self.output,
            "Seat {} {:?} | hole {} | board [{}] | pot {} | bet {} | to call {} | stack {}",
            view.idx,
            view.street,
            hole.join(" "),
            board.join(" "),
            view.pot,
            view.current_bet,
            view.to_call,
            view.stack,
        )?;
        if !view.can_raise {
            writeln!(self.output, "Raising is closed, call or fold.")?;
        }
        write!(self.output, "> ")?;
        self.output.flush()
    }

    fn read_action(&mut self, view: &PlayerView<'_>) -> io::Result<AgentAction> {
        loop {
            self.prompt(view)?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(AgentAction::Fold);
            }
            match parse_action(&line) {
                Some(action) => return Ok(action),
                None => writeln!(
                    self.output,
                    "Unknown action {:?}. Try fold, check, call, bet N or raise N.",
                    line.trim()
                )?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Agent for InteractiveAgent<R, W> {
    fn act(&mut self, view: &PlayerView<'_>) -> AgentAction {
        self.read_action(view).unwrap_or_else(|error| {
            event!(Level::WARN, ?error, "interactive_io_error");
            AgentAction::Fold
        })
    }
}

/// Builds an `InteractiveAgent` reading stdin and writing stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveAgentGenerator;

impl AgentGenerator for InteractiveAgentGenerator {
    fn generate(&self, _game_state: &GameState) -> Box<dyn Agent> {
        Box::new(InteractiveAgent::new(io::stdin().lock(), io::stdout()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::arena::game_state::Street;
    use crate::core::Card;

    use super::*;

    fn view(board: &[Card]) -> PlayerView<'_> {
        PlayerView {
            idx: 1,
            hole_cards: [Card::try_from("As").unwrap(), Card::try_from("Kd").unwrap()],
            board,
            street: Street::Flop,
            dealer_idx: 0,
            pot: 40,
            current_bet: 0,
            player_bet: 0,
            stack: 980,
            to_call: 0,
            small_blind: 10,
            big_blind: 20,
            num_in_hand: 2,
            can_check: true,
            can_raise: true,
        }
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(Some(AgentAction::Fold), parse_action("fold"));
        assert_eq!(Some(AgentAction::Check), parse_action("  X \n"));
        assert_eq!(Some(AgentAction::Call), parse_action("Call"));
        assert_eq!(Some(AgentAction::Bet(30)), parse_action("bet 30"));
        assert_eq!(Some(AgentAction::Raise(90)), parse_action("r 90"));
        assert_eq!(None, parse_action("raise"));
        assert_eq!(None, parse_action("raise lots"));
        assert_eq!(None, parse_action("fold 10"));
        assert_eq!(None, parse_action(""));
    }

    #[test]
    fn test_reprompts_until_valid() {
        let board: Vec<Card> = ["2c", "7h", "Td"]
            .iter()
            .map(|s| Card::try_from(*s).unwrap())
            .collect();
        let input = Cursor::new("what\nbet 30\n");
        let mut output = Vec::new();
        let mut agent = InteractiveAgent::new(input, &mut output);

        assert_eq!(AgentAction::Bet(30), agent.act(&view(&board)));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Unknown action \"what\""));
        assert!(text.contains("board [2c 7h Td]"));
    }

    #[test]
    fn test_end_of_input_folds() {
        let mut output = Vec::new();
        let mut agent = InteractiveAgent::new(Cursor::new(""), &mut output);
        assert_eq!(AgentAction::Fold, agent.act(&view(&[])));
    }
}
