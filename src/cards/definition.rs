//! Card and leader definitions - static reference data.
//!
//! A `Card` never changes during a battle. The engine only tracks which
//! copies sit in a deck or hand, so cards are cloned freely.

use serde::{Deserialize, Serialize};

use crate::rules::{CombatStats, Element};

/// Catalog identifier of a card or leader (e.g. `"C001"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Card rarity class. Descriptive only; the battle rules ignore it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardKind {
    #[default]
    Normal,
    Special,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use janken_battle::cards::Card;
/// use janken_battle::rules::Element;
///
/// let card = Card::new("C001", "Flame Knight", 320, 180)
///     .with_hp(900)
///     .with_element(Element::Fire);
///
/// assert_eq!(card.stats().atk, 320);
/// assert_eq!(card.element, Some(Element::Fire));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(default)]
    pub kind: CardKind,
    pub atk: u32,
    pub def: u32,
    /// Only meaningful when the card is read as a leader.
    #[serde(default)]
    pub hp: u32,
    #[serde(default)]
    pub element: Option<Element>,
}

impl Card {
    /// Create an untagged normal card with zero HP.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, atk: u32, def: u32) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            kind: CardKind::Normal,
            atk,
            def,
            hp: 0,
            element: None,
        }
    }

    #[must_use]
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: CardKind) -> Self {
        self.kind = kind;
        self
    }

    /// The card's own combat stats.
    #[must_use]
    pub fn stats(&self) -> CombatStats {
        CombatStats {
            atk: self.atk,
            def: self.def,
            element: self.element,
        }
    }
}

/// The HP-defining combatant of a match.
///
/// Leaders have the same stat shape as cards. Any card can be read as a
/// leader with `Leader::from_card`; standalone leaders default atk/def to 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leader {
    pub id: CardId,
    pub name: String,
    pub hp: u32,
    #[serde(default)]
    pub atk: u32,
    #[serde(default)]
    pub def: u32,
}

impl Leader {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, hp: u32) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            hp,
            atk: 0,
            def: 0,
        }
    }

    /// Read a card as a leader, keeping its id and stats.
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            hp: card.hp,
            atk: card.atk,
            def: card.def,
        }
    }

    #[must_use]
    pub fn with_stats(mut self, atk: u32, def: u32) -> Self {
        self.atk = atk;
        self.def = def;
        self
    }
}
