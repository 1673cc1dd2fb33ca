//! Battle log entries.
//!
//! Entries are stored structured and rendered through `Display`, so drivers
//! can either print the lines or inspect the data.

use serde::{Deserialize, Serialize};

use super::state::{TurnReport, Winner};
use crate::core::{Side, SideMap};
use crate::rules::HandOutcome;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEntry {
    BattleStarted { leaders: SideMap<String> },
    Turn(TurnReport),
    CardsExhausted,
    TurnLimit { max_turns: u32 },
    Finished(Winner),
}

fn advantage_suffix(report: &TurnReport, target: Side) -> &'static str {
    let advantaged = report
        .hits
        .iter()
        .any(|hit| hit.target == target && hit.element_advantage);
    if advantaged {
        " (element advantage!)"
    } else {
        ""
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEntry::BattleStarted { leaders } => write!(
                f,
                "Battle start! {} vs {}",
                leaders[Side::Player],
                leaders[Side::Cpu]
            ),
            LogEntry::Turn(report) => {
                let player = report.hands[Side::Player];
                let cpu = report.hands[Side::Cpu];
                match report.outcome {
                    HandOutcome::Draw => write!(
                        f,
                        "Turn {}: Draw! Both threw {}. Player takes {}, CPU takes {}",
                        report.turn,
                        player,
                        report.damage_to(Side::Player),
                        report.damage_to(Side::Cpu)
                    ),
                    HandOutcome::Win => write!(
                        f,
                        "Turn {}: Player wins! {} beats {} for {} damage{}",
                        report.turn,
                        player,
                        cpu,
                        report.damage_to(Side::Cpu),
                        advantage_suffix(report, Side::Cpu)
                    ),
                    HandOutcome::Lose => write!(
                        f,
                        "Turn {}: CPU wins! {} beats {} for {} damage{}",
                        report.turn,
                        cpu,
                        player,
                        report.damage_to(Side::Player),
                        advantage_suffix(report, Side::Player)
                    ),
                }
            }
            LogEntry::CardsExhausted => write!(f, "No cards left!"),
            LogEntry::TurnLimit { max_turns } => write!(f, "Turn limit of {max_turns} reached!"),
            LogEntry::Finished(Winner::Player) => write!(f, "Victory!"),
            LogEntry::Finished(Winner::Cpu) => write!(f, "Defeat..."),
            LogEntry::Finished(Winner::Draw) => write!(f, "Draw!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::Hit;
    use crate::cards::Card;
    use crate::rules::Hand;

    fn report(outcome: HandOutcome, hands: (Hand, Hand), hits: &[Hit]) -> TurnReport {
        TurnReport {
            turn: 2,
            cards: SideMap::with_value(Card::new("C1", "One", 1, 1)),
            hands: SideMap::from_pair(hands.0, hands.1),
            outcome,
            hits: hits.iter().copied().collect(),
            hp_after: SideMap::with_value(500),
        }
    }

    #[test]
    fn test_turn_lines() {
        let win = report(
            HandOutcome::Win,
            (Hand::Paper, Hand::Rock),
            &[Hit { target: Side::Cpu, amount: 412, element_advantage: true }],
        );
        assert_eq!(
            LogEntry::Turn(win).to_string(),
            "Turn 2: Player wins! PAPER beats ROCK for 412 damage (element advantage!)"
        );

        let lose = report(
            HandOutcome::Lose,
            (Hand::Scissors, Hand::Rock),
            &[Hit { target: Side::Player, amount: 300, element_advantage: false }],
        );
        assert_eq!(
            LogEntry::Turn(lose).to_string(),
            "Turn 2: CPU wins! ROCK beats SCISSORS for 300 damage"
        );

        let draw = report(
            HandOutcome::Draw,
            (Hand::Rock, Hand::Rock),
            &[
                Hit { target: Side::Player, amount: 21, element_advantage: false },
                Hit { target: Side::Cpu, amount: 19, element_advantage: false },
            ],
        );
        assert_eq!(
            LogEntry::Turn(draw).to_string(),
            "Turn 2: Draw! Both threw ROCK. Player takes 21, CPU takes 19"
        );
    }

    #[test]
    fn test_other_lines() {
        let start = LogEntry::BattleStarted {
            leaders: SideMap::from_pair("Rux".to_string(), "Aya".to_string()),
        };
        assert_eq!(start.to_string(), "Battle start! Rux vs Aya");
        assert_eq!(LogEntry::CardsExhausted.to_string(), "No cards left!");
        assert_eq!(LogEntry::TurnLimit { max_turns: 5 }.to_string(), "Turn limit of 5 reached!");
        assert_eq!(LogEntry::Finished(Winner::Cpu).to_string(), "Defeat...");
    }
}
