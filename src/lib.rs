//! # janken-battle
//!
//! Battle engine for a leader + 10-card janken card game against a CPU.
//!
//! ## Design Principles
//!
//! 1. **Explicit Transitions**: One method per phase change. No event loop,
//!    no callbacks; the driver calls and then reads the state.
//!
//! 2. **Injected Randomness**: Damage rolls, CPU choices and shuffles all go
//!    through one `RandomSource`. Seed it and the whole battle replays.
//!
//! 3. **Configuration Over Constants**: Every damage constant sits in
//!    `DamageConfig`; alternate formulas implement `DamageModel`.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG, configuration, actions, errors
//! - `cards`: Card/leader definitions, catalog, deck storage seam
//! - `rules`: Hand judge, element advantage, damage models
//! - `zones`: Deck engine (shuffle, draw)
//! - `battle`: State, log and the turn state machine

pub mod core;
pub mod cards;
pub mod rules;
pub mod zones;
pub mod battle;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, BattleAction, BattleConfig, BattleError, FixedRandom, GameRng, RandomSource, Result, Side,
    SideMap,
};

pub use crate::cards::{Card, CardCatalog, CardId, CardKind, DeckRecord, DeckStore, InMemoryDeckStore, Leader, Loadout};

pub use crate::rules::{
    has_advantage, judge_hands, CombatStats, DamageClass, DamageConfig, DamageModel, Element, FlatDamage, Hand,
    HandOutcome, SoftCapDamage,
};

pub use crate::zones::{draw, shuffle, Drawn};

pub use crate::battle::{
    prepare_battle, start_battle, Battle, BattleState, EndReason, LogEntry, Phase, TurnReport, Winner,
};
