//! Driver inputs as data.
//!
//! Every transition a driver can request is a `BattleAction`. Feeding actions
//! through `Battle::apply` records them, so a battle can be replayed from its
//! seed plus the recorded history.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::rules::Hand;

/// One driver-requested transition.
///
/// ## Example
///
/// ```
/// use janken_battle::cards::CardId;
/// use janken_battle::core::BattleAction;
/// use janken_battle::rules::Hand;
///
/// let turn = [
///     BattleAction::SelectCard(CardId::new("C001")),
///     BattleAction::ConfirmCard,
///     BattleAction::SelectHand(Hand::Rock),
///     BattleAction::ConfirmHand,
///     BattleAction::NextTurn,
/// ];
/// assert_eq!(turn.len(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleAction {
    SelectCard(CardId),
    ConfirmCard,
    SelectHand(Hand),
    ConfirmHand,
    NextTurn,
}

impl std::fmt::Display for BattleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleAction::SelectCard(id) => write!(f, "select card {id}"),
            BattleAction::ConfirmCard => write!(f, "confirm card"),
            BattleAction::SelectHand(hand) => write!(f, "select hand {hand}"),
            BattleAction::ConfirmHand => write!(f, "confirm hand"),
            BattleAction::NextTurn => write!(f, "next turn"),
        }
    }
}

/// An accepted action with the turn it was taken on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: BattleAction,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: BattleAction, turn: u32, sequence: u32) -> Self {
        Self {
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_display() {
        let action = BattleAction::SelectCard(CardId::new("C007"));
        assert_eq!(action.to_string(), "select card C007");
        assert_eq!(BattleAction::SelectHand(Hand::Paper).to_string(), "select hand PAPER");
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(BattleAction::SelectHand(Hand::Scissors), 3, 2);
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
