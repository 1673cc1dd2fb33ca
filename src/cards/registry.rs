//! Card catalog for definition lookup.
//!
//! The `CardCatalog` is the engine's view of the external card and leader
//! tables: lookup by id, iteration in registration order, and resolution of
//! a stored deck record into playable cards.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::definition::{Card, CardId, Leader};
use super::loadout::Loadout;
use crate::core::{BattleError, Result};

/// Registry of cards and leaders.
///
/// ## Example
///
/// ```
/// use janken_battle::cards::{Card, CardCatalog, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(Card::new("C001", "Flame Knight", 300, 200).with_hp(900)).unwrap();
///
/// let found = catalog.get(&CardId::new("C001")).unwrap();
/// assert_eq!(found.name, "Flame Knight");
///
/// // Any card can stand in as a leader.
/// assert_eq!(catalog.leader(&CardId::new("C001")).unwrap().hp, 900);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
    leaders: FxHashMap<CardId, Leader>,
    order: Vec<CardId>,
}

#[derive(Deserialize)]
struct CatalogFile {
    cards: Vec<Card>,
    #[serde(default)]
    leaders: Vec<Leader>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from `{"cards": [...], "leaders": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for card in file.cards {
            catalog.register(card)?;
        }
        for leader in file.leaders {
            catalog.register_leader(leader)?;
        }
        Ok(catalog)
    }

    /// Register a card definition. Ids must be unique among cards.
    pub fn register(&mut self, card: Card) -> Result<()> {
        if self.cards.contains_key(&card.id) {
            return Err(BattleError::DuplicateId(card.id));
        }
        self.order.push(card.id.clone());
        self.cards.insert(card.id.clone(), card);
        Ok(())
    }

    /// Register a standalone leader. Ids must be unique among leaders.
    pub fn register_leader(&mut self, leader: Leader) -> Result<()> {
        if self.leaders.contains_key(&leader.id) {
            return Err(BattleError::DuplicateId(leader.id));
        }
        self.leaders.insert(leader.id.clone(), leader);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Look up a leader.
    ///
    /// Standalone leaders win; otherwise a card with that id is read as a leader.
    #[must_use]
    pub fn leader(&self, id: &CardId) -> Option<Leader> {
        self.leaders
            .get(id)
            .cloned()
            .or_else(|| self.cards.get(id).map(Leader::from_card))
    }

    /// Iterate cards in registration order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    /// Number of registered cards (leaders excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Resolve ids into a playable loadout.
    ///
    /// Fails on the first unknown id. Card count is checked later, when the
    /// battle starts.
    pub fn resolve(&self, leader_id: &CardId, card_ids: &[CardId]) -> Result<Loadout> {
        let leader = self
            .leader(leader_id)
            .ok_or_else(|| BattleError::UnknownLeader(leader_id.clone()))?;

        let deck = card_ids
            .iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| BattleError::UnknownCard(id.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Loadout::new(leader, deck))
    }
}
