//! Core engine types: sides, RNG, configuration, actions, errors.
//!
//! These are the building blocks every other module depends on. Nothing
//! here knows about damage formulas or phase rules.

pub mod side;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use side::{Side, SideMap};
pub use rng::{FixedRandom, GameRng, RandomSource};
pub use config::BattleConfig;
pub use action::{ActionRecord, BattleAction};
pub use error::{BattleError, Result};
