//! Deck engine: card piles and how cards move between them.
//!
//! A combatant's cards live in two ordered piles, the deck (hidden) and the
//! hand (available this turn). `shuffle` and `draw` are the only ways cards
//! enter a hand.

pub mod pile;

pub use pile::{draw, shuffle, Drawn};
