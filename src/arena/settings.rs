use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    AgentGenerator, GameState, RngHoldemSimulationBuilder,
    agent::{
        AllInAgentGenerator, CheckingAgentGenerator, FoldingAgentGenerator,
        InteractiveAgentGenerator, RandomAgentGenerator,
    },
    competition::HoldemCompetition,
    errors::HoldemSimulationError,
    game::HoldemGame,
    game_state::MAX_PLAYERS,
};

/// The built in strategies that can be named in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentKind {
    Checking,
    Folding,
    AllIn,
    Random,
    /// A person at the terminal, reading stdin.
    Interactive,
}

impl AgentKind {
    pub fn generator(&self) -> Box<dyn AgentGenerator> {
        match self {
            AgentKind::Checking => Box::new(CheckingAgentGenerator),
            AgentKind::Folding => Box::new(FoldingAgentGenerator),
            AgentKind::AllIn => Box::new(AllInAgentGenerator),
            AgentKind::Random => Box::<RandomAgentGenerator>::default(),
            AgentKind::Interactive => Box::new(InteractiveAgentGenerator),
        }
    }
}

/// Everything needed to set up a table.
///
/// ```
/// use holdem_arena::arena::settings::{AgentKind, GameSettings};
///
/// let settings = GameSettings {
///     stacks: vec![500; 3],
///     small_blind: 5,
///     agents: vec![AgentKind::Checking, AgentKind::AllIn, AgentKind::Folding],
///     seed: Some(7),
///     ..GameSettings::default()
/// };
/// assert_eq!(10, settings.big_blind());
/// let result = settings.build_game().unwrap().run().unwrap();
/// assert_eq!(1500u32, result.final_stacks.iter().sum::<u32>());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameSettings {
    pub stacks: Vec<u32>,
    pub small_blind: u32,
    /// Twice the small blind when not set.
    pub big_blind: Option<u32>,
    pub dealer_idx: usize,
    /// Stop a game after this many rounds.
    pub max_rounds: Option<usize>,
    /// Seed for the deck. A random seed is picked when not set.
    pub seed: Option<u64>,
    /// One per seat, in seat order.
    pub agents: Vec<AgentKind>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            stacks: vec![1000; 4],
            small_blind: 10,
            big_blind: None,
            dealer_idx: 0,
            max_rounds: Some(1000),
            seed: None,
            agents: vec![
                AgentKind::Random,
                AgentKind::Random,
                AgentKind::Checking,
                AgentKind::AllIn,
            ],
        }
    }
}

impl GameSettings {
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, HoldemSimulationError> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| HoldemSimulationError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn big_blind(&self) -> u32 {
        self.big_blind
            .unwrap_or_else(|| self.small_blind.saturating_mul(2))
    }

    pub fn validate(&self) -> Result<(), HoldemSimulationError> {
        let num_players = self.stacks.len();
        if num_players < 2 {
            return Err(HoldemSimulationError::TooFewPlayers(num_players));
        }
        if num_players > MAX_PLAYERS {
            return Err(HoldemSimulationError::TooManyPlayers(num_players));
        }
        if self.small_blind == 0 {
            return Err(HoldemSimulationError::InvalidSettings(
                "small_blind must be positive".to_string(),
            ));
        }
        if self.big_blind() < self.small_blind {
            return Err(HoldemSimulationError::InvalidSettings(format!(
                "big_blind {} is below small_blind {}",
                self.big_blind(),
                self.small_blind
            )));
        }
        let total_chips: u64 = self.stacks.iter().map(|s| u64::from(*s)).sum();
        if total_chips > u64::from(u32::MAX) {
            return Err(HoldemSimulationError::InvalidSettings(format!(
                "{total_chips} chips at the table won't fit in a single pot"
            )));
        }
        if self.dealer_idx >= num_players {
            return Err(HoldemSimulationError::InvalidSettings(format!(
                "dealer_idx {} is past the last seat",
                self.dealer_idx
            )));
        }
        if self.agents.len() != num_players {
            return Err(HoldemSimulationError::AgentCountMismatch {
                expected: num_players,
                actual: self.agents.len(),
            });
        }
        Ok(())
    }

    pub fn game_state(&self) -> GameState {
        GameState::new(
            self.stacks.clone(),
            self.big_blind(),
            self.small_blind,
            self.dealer_idx,
        )
    }

    pub fn agent_generators(&self) -> Vec<Box<dyn AgentGenerator>> {
        self.agents.iter().map(AgentKind::generator).collect()
    }

    /// The seed to use, picking one if none was set.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// A single game with these settings.
    pub fn build_game(&self) -> Result<HoldemGame, HoldemSimulationError> {
        self.validate()?;
        let game_state = self.game_state();
        let agents = self
            .agent_generators()
            .iter()
            .map(|generator| generator.generate(&game_state))
            .collect();
        let sim = RngHoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .rng(StdRng::seed_from_u64(self.seed_or_random()))
            .build()?;
        Ok(HoldemGame::new(sim).max_rounds(self.max_rounds))
    }

    /// Many independent games with these settings.
    pub fn build_competition(&self) -> Result<HoldemCompetition, HoldemSimulationError> {
        self.validate()?;
        Ok(
            HoldemCompetition::new(self.agent_generators(), self.game_state())?
                .max_rounds(self.max_rounds)
                .seed(self.seed_or_random()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let too_few = GameSettings {
            stacks: vec![100],
            agents: vec![AgentKind::Checking],
            ..GameSettings::default()
        };
        assert_eq!(
            Err(HoldemSimulationError::TooFewPlayers(1)),
            too_few.validate()
        );

        let too_many = GameSettings {
            stacks: vec![100; 24],
            agents: vec![AgentKind::Checking; 24],
            ..GameSettings::default()
        };
        assert_eq!(
            Err(HoldemSimulationError::TooManyPlayers(24)),
            too_many.validate()
        );

        let mismatch = GameSettings {
            agents: vec![AgentKind::Checking],
            ..GameSettings::default()
        };
        assert_eq!(
            Err(HoldemSimulationError::AgentCountMismatch {
                expected: 4,
                actual: 1
            }),
            mismatch.validate()
        );

        let bad_blinds = GameSettings {
            big_blind: Some(5),
            ..GameSettings::default()
        };
        assert!(matches!(
            bad_blinds.validate(),
            Err(HoldemSimulationError::InvalidSettings(_))
        ));

        let too_many_chips = GameSettings {
            stacks: vec![3_000_000_000; 2],
            agents: vec![AgentKind::Checking; 2],
            ..GameSettings::default()
        };
        assert!(matches!(
            too_many_chips.validate(),
            Err(HoldemSimulationError::InvalidSettings(_))
        ));
        assert!(too_many_chips.build_game().is_err());
    }

    #[test_log::test]
    fn test_seeded_game_repeats() {
        let settings = GameSettings {
            agents: vec![AgentKind::AllIn, AgentKind::Checking, AgentKind::Checking, AgentKind::Folding],
            seed: Some(1234),
            max_rounds: Some(200),
            ..GameSettings::default()
        };
        let first = settings.build_game().unwrap().run().unwrap();
        let second = settings.build_game().unwrap().run().unwrap();
        assert_eq!(first, second);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let settings = GameSettings::from_json(
            r#"{
                "stacks": [200, 200, 200],
                "small_blind": 5,
                "agents": ["checking", "all_in", "random"]
            }"#,
        )
        .unwrap();
        assert_eq!(10, settings.big_blind());
        assert_eq!(Some(1000), settings.max_rounds);
        assert_eq!(AgentKind::AllIn, settings.agents[1]);

        assert!(matches!(
            GameSettings::from_json(r#"{"agents": ["psychic"]}"#),
            Err(HoldemSimulationError::InvalidSettings(_))
        ));
    }
}
