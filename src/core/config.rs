//! Battle configuration.
//!
//! `BattleConfig` carries the structural rules of a match: deck size, opening
//! hand, turn limit and whether leader stats add to the played card. Damage
//! constants live with the damage model (`rules::DamageConfig`) so alternate
//! rulesets can swap one without touching the other.
//!
//! Both load from JSON; missing fields fall back to the standard ruleset.

use serde::{Deserialize, Serialize};

use super::error::{BattleError, Result};

/// Structural rules for a match.
///
/// ## Example
///
/// ```
/// use janken_battle::core::BattleConfig;
///
/// let config = BattleConfig::from_json(r#"{ "max_turns": 8 }"#).unwrap();
/// assert_eq!(config.deck_size, 10);
/// assert_eq!(config.max_turns, Some(8));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Exact number of cards each deck must contain.
    pub deck_size: usize,

    /// Cards drawn into each hand at battle start.
    pub initial_hand_size: usize,

    /// Last playable turn. `None` lets the battle run until HP or cards run out.
    pub max_turns: Option<u32>,

    /// Add the leader's atk/def to the played card's stats.
    pub leader_adds_stats: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            deck_size: 10,
            initial_hand_size: 3,
            max_turns: None,
            leader_adds_stats: false,
        }
    }
}

impl BattleConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    /// Set the deck size.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the turn limit.
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = Some(turns);
        self
    }

    /// Enable additive leader stats.
    #[must_use]
    pub fn with_leader_stats(mut self) -> Self {
        self.leader_adds_stats = true;
        self
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.deck_size == 0 {
            return Err(BattleError::InvalidConfig("deck_size must be positive".into()));
        }
        if self.initial_hand_size == 0 || self.initial_hand_size > self.deck_size {
            return Err(BattleError::InvalidConfig(format!(
                "initial_hand_size must be in 1..={}, got {}",
                self.deck_size, self.initial_hand_size
            )));
        }
        if self.max_turns == Some(0) {
            return Err(BattleError::InvalidConfig("max_turns must be at least 1".into()));
        }
        Ok(())
    }
}
