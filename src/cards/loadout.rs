//! A combatant's leader plus deck, ready to start a battle.

use serde::{Deserialize, Serialize};

use super::definition::{Card, Leader};
use super::registry::CardCatalog;
use crate::core::{BattleError, RandomSource, Result, Side};
use crate::zones;

/// Leader and deck for one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub leader: Leader,
    pub deck: Vec<Card>,
}

impl Loadout {
    #[must_use]
    pub fn new(leader: Leader, deck: Vec<Card>) -> Self {
        Self { leader, deck }
    }

    /// Build a CPU opponent from the whole catalog.
    ///
    /// The leader is a uniformly random card with HP, read as a leader; the
    /// deck is the first `deck_size` cards of a shuffled catalog.
    pub fn random_cpu<R: RandomSource + ?Sized>(
        catalog: &CardCatalog,
        deck_size: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let cards: Vec<Card> = catalog.cards().cloned().collect();
        if cards.is_empty() {
            return Err(BattleError::EmptyCatalog);
        }
        if cards.len() < deck_size {
            return Err(BattleError::WrongCardCount {
                side: Side::Cpu,
                expected: deck_size,
                actual: cards.len(),
            });
        }

        let candidates: Vec<&Card> = cards.iter().filter(|card| card.hp > 0).collect();
        if candidates.is_empty() {
            return Err(BattleError::NoLeaderCandidates);
        }

        let leader = Leader::from_card(candidates[rng.next_index(candidates.len())]);
        let deck = zones::draw(&zones::shuffle(&cards, rng), deck_size).drawn;

        Ok(Self::new(leader, deck))
    }
}
