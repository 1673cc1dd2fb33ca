//! Deck storage seam.
//!
//! Decks are persisted outside the engine. `DeckStore` is the contract the
//! engine needs from that collaborator; `InMemoryDeckStore` backs tests and
//! local drivers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::{BattleError, Result, Side};

/// A saved deck: leader plus card ids, keyed externally by user id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecord {
    pub leader_id: CardId,
    pub card_ids: Vec<CardId>,
}

impl DeckRecord {
    #[must_use]
    pub fn new(leader_id: impl Into<CardId>, card_ids: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            leader_id: leader_id.into(),
            card_ids: card_ids.into_iter().collect(),
        }
    }
}

/// Deck read/write keyed by user id.
pub trait DeckStore {
    /// The user's saved deck, if any.
    fn get(&self, user_id: &str) -> Option<DeckRecord>;

    /// Replace the user's saved deck.
    fn put(&mut self, user_id: &str, record: DeckRecord) -> Result<()>;
}

/// Hash-map backed store that enforces the deck size on write.
#[derive(Clone, Debug)]
pub struct InMemoryDeckStore {
    decks: FxHashMap<String, DeckRecord>,
    deck_size: usize,
}

impl InMemoryDeckStore {
    #[must_use]
    pub fn new(deck_size: usize) -> Self {
        Self {
            decks: FxHashMap::default(),
            deck_size,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }
}

impl DeckStore for InMemoryDeckStore {
    fn get(&self, user_id: &str) -> Option<DeckRecord> {
        self.decks.get(user_id).cloned()
    }

    fn put(&mut self, user_id: &str, record: DeckRecord) -> Result<()> {
        if record.card_ids.len() != self.deck_size {
            return Err(BattleError::WrongCardCount {
                side: Side::Player,
                expected: self.deck_size,
                actual: record.card_ids.len(),
            });
        }
        self.decks.insert(user_id.to_string(), record);
        Ok(())
    }
}
