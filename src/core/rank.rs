use std::fmt;

use super::{Card, PokerError, Value};

/// All the different possible hand kinds, weakest first.
///
/// The derived ordering is the ordering used at showdown.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandKind {
    /// The lowest rank.
    /// No matches
    HighCard,
    /// One Card matches another.
    Pair,
    /// Two different pair of matching cards.
    TwoPair,
    /// Three of the same value.
    ThreeOfAKind,
    /// Five cards in a sequence
    Straight,
    /// Five cards of the same suit
    Flush,
    /// Three of one value and two of another value
    FullHouse,
    /// Four of the same value.
    FourOfAKind,
    /// Five cards in a sequence all of the same suit.
    StraightFlush,
    /// Ten through ace all of the same suit.
    RoyalFlush,
}

/// The strength of the best five cards out of seven.
///
/// `rank_strength` only means something when compared against another
/// strength of the same `kind`. It packs the tie breakers four bits at a
/// time with the most significant tie breaker in the highest nibble.
///
/// Field order matters: the derived `Ord` compares `kind` first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandStrength {
    pub kind: HandKind,
    pub rank_strength: u32,
}

impl HandStrength {
    pub fn new(kind: HandKind, rank_strength: u32) -> Self {
        Self {
            kind,
            rank_strength,
        }
    }
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:#x})", self.kind, self.rank_strength)
    }
}

/// Can this turn into a hand strength?
pub trait Rankable {
    /// Rank the cards. The cards must all be distinct.
    fn rank(&self) -> HandStrength;

    /// Same as `rank` but refuses to rank a set with a duplicated card.
    fn try_rank(&self) -> Result<HandStrength, PokerError>;
}

impl Rankable for [Card; 7] {
    fn rank(&self) -> HandStrength {
        rank_seven(self)
    }

    fn try_rank(&self) -> Result<HandStrength, PokerError> {
        for (i, c) in self.iter().enumerate() {
            if self[i + 1..].contains(c) {
                return Err(PokerError::DuplicateCardInHand(*c));
            }
        }
        Ok(rank_seven(self))
    }
}

/// Evaluate two hole cards plus the five community cards.
///
/// ```
/// use holdem_arena::core::{Card, HandKind, evaluate};
///
/// let hole = [Card::try_from("9s").unwrap(), Card::try_from("9c").unwrap()];
/// let board = ["9h", "9d", "As", "Kd", "2c"].map(|c| Card::try_from(c).unwrap());
///
/// let strength = evaluate(hole, board);
/// assert_eq!(HandKind::FourOfAKind, strength.kind);
/// assert_eq!((9 << 4) | 14, strength.rank_strength);
/// ```
pub fn evaluate(hole: [Card; 2], community: [Card; 5]) -> HandStrength {
    let cards = [
        hole[0],
        hole[1],
        community[0],
        community[1],
        community[2],
        community[3],
        community[4],
    ];
    rank_seven(&cards)
}

/// Ranks grouped by how many times they show up, each list highest first.
#[derive(Default)]
struct Groups {
    quad: Option<u8>,
    trips: Slots<2>,
    pairs: Slots<3>,
    singles: Slots<5>,
}

/// Fixed capacity list of ranks. Pushes past capacity are dropped, which is
/// what keeps only the best few of each group.
struct Slots<const N: usize> {
    ranks: [u8; N],
    len: usize,
}

impl<const N: usize> Default for Slots<N> {
    fn default() -> Self {
        Self {
            ranks: [0; N],
            len: 0,
        }
    }
}

impl<const N: usize> Slots<N> {
    fn push(&mut self, rank: u8) {
        if self.len < N {
            self.ranks[self.len] = rank;
            self.len += 1;
        }
    }

    fn get(&self, idx: usize) -> Option<u8> {
        if idx < self.len {
            Some(self.ranks[idx])
        } else {
            None
        }
    }

    fn as_slice(&self) -> &[u8] {
        &self.ranks[..self.len]
    }
}

/// Bit masks over value indexes (rank - 2).
const ACE_BIT: u16 = 1 << (Value::Ace as u16);
const WHEEL_LOW: u16 = 0b1111;

fn rank_seven(cards: &[Card; 7]) -> HandStrength {
    let mut suit_count = [0u8; 4];
    let mut value_count = [0u8; 13];
    // One bit per value for every suit.
    let mut suit_values = [0u16; 4];

    for c in cards {
        suit_count[c.suit as usize] += 1;
        value_count[c.value as usize] += 1;
        suit_values[c.suit as usize] |= 1 << (c.value as u16);
    }

    // With seven cards at most one suit can have five.
    let flush_suit = (0..4).find(|s| suit_count[*s] >= 5);

    let mut groups = Groups::default();
    let mut value_set: u16 = 0;
    for idx in (0..13).rev() {
        let rank = idx as u8 + 2;
        match value_count[idx] {
            0 => continue,
            1 => groups.singles.push(rank),
            2 => groups.pairs.push(rank),
            3 => groups.trips.push(rank),
            _ => {
                if groups.quad.is_none() {
                    groups.quad = Some(rank);
                }
            }
        }
        value_set |= 1 << idx;
    }

    if let Some(suit) = flush_suit {
        let flush_values = suit_values[suit];
        if let Some(high) = best_straight(flush_values) {
            return if high == Value::Ace.rank() {
                HandStrength::new(HandKind::RoyalFlush, 0)
            } else {
                HandStrength::new(HandKind::StraightFlush, u32::from(high))
            };
        }
        if let Some(strength) = four_of_a_kind(&groups).or_else(|| full_house(&groups)) {
            return strength;
        }
        let top: Vec<u8> = (0..13u8)
            .rev()
            .filter(|idx| flush_values & (1 << idx) != 0)
            .take(5)
            .map(|idx| idx + 2)
            .collect();
        return HandStrength::new(HandKind::Flush, pack(&top));
    }

    if let Some(strength) = four_of_a_kind(&groups).or_else(|| full_house(&groups)) {
        return strength;
    }

    if let Some(high) = best_straight(value_set) {
        return HandStrength::new(HandKind::Straight, u32::from(high));
    }

    if let Some(trip) = groups.trips.get(0) {
        let kickers = &groups.singles.as_slice()[..2.min(groups.singles.len)];
        return HandStrength::new(
            HandKind::ThreeOfAKind,
            (u32::from(trip) << 8) | pack(kickers),
        );
    }

    if let (Some(high), Some(low)) = (groups.pairs.get(0), groups.pairs.get(1)) {
        let kicker = best_of(groups.pairs.get(2), groups.singles.get(0));
        return HandStrength::new(
            HandKind::TwoPair,
            (u32::from(high) << 8) | (u32::from(low) << 4) | u32::from(kicker),
        );
    }

    if let Some(pair) = groups.pairs.get(0) {
        let kickers = &groups.singles.as_slice()[..3.min(groups.singles.len)];
        return HandStrength::new(HandKind::Pair, (u32::from(pair) << 12) | pack(kickers));
    }

    HandStrength::new(HandKind::HighCard, pack(groups.singles.as_slice()))
}

fn four_of_a_kind(groups: &Groups) -> Option<HandStrength> {
    let quad = groups.quad?;
    // The three other cards can be any mix of trips, pairs, and singles.
    let kicker = best_of(
        best_of_opt(groups.trips.get(0), groups.pairs.get(0)),
        groups.singles.get(0),
    );
    Some(HandStrength::new(
        HandKind::FourOfAKind,
        (u32::from(quad) << 4) | u32::from(kicker),
    ))
}

fn full_house(groups: &Groups) -> Option<HandStrength> {
    let trip = groups.trips.get(0)?;
    let pair = best_of_opt(groups.trips.get(1), groups.pairs.get(0))?;
    Some(HandStrength::new(
        HandKind::FullHouse,
        (u32::from(trip) << 4) | u32::from(pair),
    ))
}

/// The high rank of the best straight in a value mask, counting the wheel
/// (ace through five) as a five high straight.
fn best_straight(values: u16) -> Option<u8> {
    for low in (0..=8u16).rev() {
        let run = 0b1_1111 << low;
        if values & run == run {
            return Some(low as u8 + 4 + 2);
        }
    }
    if values & (ACE_BIT | WHEEL_LOW) == ACE_BIT | WHEEL_LOW {
        return Some(Value::Five.rank());
    }
    None
}

fn best_of_opt(a: Option<u8>, b: Option<u8>) -> Option<u8> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

fn best_of(a: Option<u8>, b: Option<u8>) -> u8 {
    best_of_opt(a, b).unwrap_or(0)
}

/// Pack ranks into nibbles, first rank most significant.
fn pack(ranks: &[u8]) -> u32 {
    ranks
        .iter()
        .fold(0, |acc, rank| (acc << 4) | u32::from(*rank))
}
