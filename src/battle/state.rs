//! Battle state: everything a driver needs to render a match.
//!
//! ## BattleState
//!
//! - HP per side (never increases, floored at 0)
//! - Hand and remaining deck per side (disjoint; played cards are gone)
//! - Current selections, phase, turn counter
//! - Append-only battle log
//! - Winner and end reason once the phase is `End`
//!
//! Hands, decks and the log use `im` persistent vectors, so cloning a state
//! snapshot after every transition is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::log::LogEntry;
use crate::cards::{Card, Leader};
use crate::core::{Side, SideMap};
use crate::rules::{Hand, HandOutcome};

/// Where a battle is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The player picks a card from hand.
    SelectCard,
    /// The player picks a hand to throw.
    SelectHand,
    /// The turn has been judged; waiting for `next_turn`.
    Judge,
    /// Terminal. No further transitions.
    End,
}

/// Final result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Cpu,
    Draw,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Winner::Player,
            Side::Cpu => Winner::Cpu,
        }
    }
}

/// Why the battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// At least one side reached 0 HP.
    Knockout,
    /// A side has no card in hand and none left to draw.
    CardsExhausted,
    /// The configured turn limit was reached.
    TurnLimit,
}

/// What one side has picked this turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub card: Option<Card>,
    pub hand: Option<Hand>,
}

/// Damage landing on one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub target: Side,
    pub amount: u32,
    /// The attacker had elemental advantage.
    pub element_advantage: bool,
}

/// Everything that happened in one judged turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    pub cards: SideMap<Card>,
    pub hands: SideMap<Hand>,
    /// From the player's perspective.
    pub outcome: HandOutcome,
    /// One hit on a win or loss, two on a draw.
    pub hits: SmallVec<[Hit; 2]>,
    pub hp_after: SideMap<u32>,
}

impl TurnReport {
    /// Total damage taken by `side` this turn.
    #[must_use]
    pub fn damage_to(&self, side: Side) -> u32 {
        self.hits
            .iter()
            .filter(|hit| hit.target == side)
            .map(|hit| hit.amount)
            .sum()
    }
}

/// Complete per-match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    /// Turn number (starts at 1).
    pub turn: u32,

    pub phase: Phase,

    pub leaders: SideMap<Leader>,

    pub hp: SideMap<u32>,

    /// Cards available to play this turn.
    pub hands: SideMap<Vector<Card>>,

    /// Cards still to be drawn, top first.
    pub decks: SideMap<Vector<Card>>,

    /// The CPU entry stays empty until its choice is revealed at judgement.
    pub selections: SideMap<Selection>,

    /// Most recent judged turn.
    pub last_turn: Option<TurnReport>,

    pub log: Vector<LogEntry>,

    pub winner: Option<Winner>,

    pub end_reason: Option<EndReason>,
}

impl BattleState {
    pub(crate) fn new(leaders: SideMap<Leader>, hands: SideMap<Vector<Card>>, decks: SideMap<Vector<Card>>) -> Self {
        let hp = leaders.map(|_, leader| leader.hp);
        let mut log = Vector::new();
        log.push_back(LogEntry::BattleStarted {
            leaders: leaders.map(|_, leader| leader.name.clone()),
        });

        Self {
            turn: 1,
            phase: Phase::SelectCard,
            leaders,
            hp,
            hands,
            decks,
            selections: SideMap::default(),
            last_turn: None,
            log,
            winner: None,
            end_reason: None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::End
    }

    /// A side with no card in hand and nothing left to draw.
    #[must_use]
    pub fn is_exhausted(&self, side: Side) -> bool {
        self.hands[side].is_empty() && self.decks[side].is_empty()
    }

    /// Cards this side still holds, in hand or deck.
    #[must_use]
    pub fn cards_left(&self, side: Side) -> usize {
        self.hands[side].len() + self.decks[side].len()
    }

    /// Rendered log lines, oldest first.
    pub fn log_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.log.iter().map(ToString::to_string)
    }
}
