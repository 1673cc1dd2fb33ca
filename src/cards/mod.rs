//! Card system: definitions, catalog, loadouts and deck storage.
//!
//! ## Definitions vs Copies
//!
//! - `Card`: static reference data (name, atk/def, element). Never mutated.
//! - Decks and hands hold cloned `Card` values; the battle only tracks
//!   where each copy currently sits.
//!
//! ## Leaders
//!
//! A `Leader` shares the card stat shape and supplies starting HP. Any card
//! can be read as a leader via `Leader::from_card`.

pub mod definition;
pub mod registry;
pub mod loadout;
pub mod store;

pub use definition::{Card, CardId, CardKind, Leader};
pub use registry::CardCatalog;
pub use loadout::Loadout;
pub use store::{DeckRecord, DeckStore, InMemoryDeckStore};
