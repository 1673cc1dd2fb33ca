//! Error type shared by every fallible engine operation.

use thiserror::Error;

use super::side::Side;
use crate::battle::Phase;
use crate::cards::CardId;

/// Errors raised by battle construction and turn transitions.
///
/// Transition errors are raised before any state is touched, so a rejected
/// call leaves the battle exactly as it was.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BattleError {
    #[error("{side} deck has {actual} cards, expected {expected}")]
    WrongCardCount {
        side: Side,
        expected: usize,
        actual: usize,
    },
    #[error("unknown card id {0}")]
    UnknownCard(CardId),
    #[error("unknown leader id {0}")]
    UnknownLeader(CardId),
    #[error("no deck stored for user {0}")]
    DeckNotFound(String),
    #[error("card catalog is empty")]
    EmptyCatalog,
    #[error("no catalog card has HP to lead the CPU")]
    NoLeaderCandidates,
    #[error("{side} leader {leader} has no HP")]
    LeaderWithoutHp { side: Side, leader: CardId },
    #[error("duplicate id {0} in catalog")]
    DuplicateId(CardId),
    #[error("invalid phase: expected {expected:?}, battle is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("battle is already over")]
    BattleOver,
    #[error("card {0} is not in hand")]
    CardNotInHand(CardId),
    #[error("no card selected")]
    NoCardSelected,
    #[error("no hand selected")]
    NoHandSelected,
    #[error("{0} has no card to play")]
    EmptyHand(Side),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config parse error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for BattleError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BattleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BattleError::WrongCardCount {
            side: Side::Player,
            expected: 10,
            actual: 9,
        };
        assert_eq!(err.to_string(), "Player deck has 9 cards, expected 10");

        let err = BattleError::UnknownLeader(CardId::new("L404"));
        assert_eq!(err.to_string(), "unknown leader id L404");

        let err = BattleError::LeaderWithoutHp {
            side: Side::Cpu,
            leader: CardId::new("C017"),
        };
        assert_eq!(err.to_string(), "CPU leader C017 has no HP");
    }

    #[test]
    fn test_from_json_error() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: BattleError = parse.unwrap_err().into();
        assert!(matches!(err, BattleError::Config(_)));
    }
}
