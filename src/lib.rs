//! `holdem_arena` simulates multi-player no-limit Texas Hold'em.
//!
//! It is split into two halves:
//!
//! - [`core`] holds the poker primitives: cards, the deck, and the 7 card
//!   hand strength evaluator.
//! - [`arena`] holds the round engine that runs betting streets to
//!   completion, the agents that make decisions, and the game loop that
//!   plays rounds until one player has all the chips.
//!
//! ```
//! use holdem_arena::core::{Card, evaluate, HandKind};
//!
//! let hole = [Card::try_from("As").unwrap(), Card::try_from("Ks").unwrap()];
//! let board = [
//!     Card::try_from("Qs").unwrap(),
//!     Card::try_from("Js").unwrap(),
//!     Card::try_from("Ts").unwrap(),
//!     Card::try_from("2d").unwrap(),
//!     Card::try_from("3c").unwrap(),
//! ];
//! let strength = evaluate(hole, board);
//! assert_eq!(HandKind::RoyalFlush, strength.kind);
//! ```

/// Everything in core is agnostic to betting.
pub mod core;

/// The round engine, agents, and simulations built on top of it.
pub mod arena;
