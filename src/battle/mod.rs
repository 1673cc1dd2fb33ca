//! Battle state machine: turn flow, judgement and termination.
//!
//! A `Battle` owns its `BattleState`, the injected random source and the
//! damage model. Drivers call one method per transition (or feed
//! `BattleAction`s through `Battle::apply`) and read the state after each.

pub mod state;
pub mod log;
pub mod machine;
pub mod prepare;

pub use state::{BattleState, EndReason, Hit, Phase, Selection, TurnReport, Winner};
pub use log::LogEntry;
pub use machine::{start_battle, Battle};
pub use prepare::prepare_battle;
