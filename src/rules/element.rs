//! Element advantage: the second, independent dominance cycle.

use serde::{Deserialize, Serialize};

/// Elemental tag. Fire beats wind, wind beats water, water beats fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Element {
    Fire,
    Wind,
    Water,
}

impl Element {
    pub const ALL: [Element; 3] = [Element::Fire, Element::Wind, Element::Water];

    #[must_use]
    pub const fn beats(self) -> Element {
        match self {
            Element::Fire => Element::Wind,
            Element::Wind => Element::Water,
            Element::Water => Element::Fire,
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Fire => write!(f, "FIRE"),
            Element::Wind => write!(f, "WIND"),
            Element::Water => write!(f, "WATER"),
        }
    }
}

/// Does `attacker` get the elemental bonus against `defender`?
///
/// Untagged on either side means no advantage.
#[must_use]
pub fn has_advantage(attacker: Option<Element>, defender: Option<Element>) -> bool {
    match (attacker, defender) {
        (Some(a), Some(d)) => a.beats() == d,
        _ => false,
    }
}
