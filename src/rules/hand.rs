//! Hand judge: the rock-paper-scissors cycle.

use serde::{Deserialize, Serialize};

use crate::core::RandomSource;

/// One of the three janken throws.
///
/// Rock beats scissors, scissors beats paper, paper beats rock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Hand {
    Rock,
    Scissors,
    Paper,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Scissors, Hand::Paper];

    /// The hand this one beats.
    #[must_use]
    pub const fn beats(self) -> Hand {
        match self {
            Hand::Rock => Hand::Scissors,
            Hand::Scissors => Hand::Paper,
            Hand::Paper => Hand::Rock,
        }
    }

    /// Uniformly random hand.
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Hand {
        Hand::ALL[rng.next_index(Hand::ALL.len())]
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hand::Rock => write!(f, "ROCK"),
            Hand::Scissors => write!(f, "SCISSORS"),
            Hand::Paper => write!(f, "PAPER"),
        }
    }
}

/// Result of a throw from the first hand's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandOutcome {
    Win,
    Lose,
    Draw,
}

impl HandOutcome {
    /// The same throw seen from the other side.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            HandOutcome::Win => HandOutcome::Lose,
            HandOutcome::Lose => HandOutcome::Win,
            HandOutcome::Draw => HandOutcome::Draw,
        }
    }
}

/// Judge `a` against `b`.
#[must_use]
pub fn judge_hands(a: Hand, b: Hand) -> HandOutcome {
    if a == b {
        HandOutcome::Draw
    } else if a.beats() == b {
        HandOutcome::Win
    } else {
        HandOutcome::Lose
    }
}
