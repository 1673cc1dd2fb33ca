//! Battle flow integration tests.
//!
//! Full matches driven through the public API: draws, knockouts, card
//! exhaustion, replay and setup from a stored deck.

use janken_battle::battle::{start_battle, Battle, EndReason, Phase, Winner};
use janken_battle::cards::{Card, CardCatalog, CardId, DeckRecord, DeckStore, InMemoryDeckStore, Leader, Loadout};
use janken_battle::core::{BattleAction, BattleConfig, FixedRandom, GameRng, RandomSource, Side};
use janken_battle::rules::{DamageClass, FlatDamage, Hand, HandOutcome, SoftCapDamage};
use janken_battle::{prepare_battle, DamageModel};

/// Real rolls, but the CPU always takes its first card and throws rock.
struct RockCpu(GameRng);

impl RandomSource for RockCpu {
    fn next_unit(&mut self) -> f64 {
        self.0.next_unit()
    }

    fn next_index(&mut self, _len: usize) -> usize {
        0
    }
}

fn deck(prefix: &str, atk: u32, def: u32) -> Vec<Card> {
    (0..10)
        .map(|i| Card::new(format!("{prefix}{i:02}"), format!("{prefix} unit {i}"), atk, def))
        .collect()
}

/// Play the first card in hand with `hand` until the battle ends.
fn play_out<R: RandomSource, M: DamageModel>(battle: &mut Battle<R, M>, hand: Hand) -> u32 {
    let mut turns = 0;
    while !battle.is_over() {
        let card = battle.state().hands[Side::Player][0].id.clone();
        battle.play_turn(&card, hand).unwrap();
        turns += 1;
        if !battle.is_over() {
            battle.next_turn().unwrap();
        }
    }
    turns
}

// =============================================================================
// Draws
// =============================================================================

#[test]
fn test_symmetric_draws_stay_balanced() {
    let model = SoftCapDamage::default();
    let stats = Card::new("X", "X", 200, 150).stats();
    let (low, high) = model.range(&stats, &stats, DamageClass::Minor);

    let player = Loadout::new(Leader::new("LP", "Rux", 1000), deck("P", 200, 150));
    let cpu = Loadout::new(Leader::new("LC", "Aya", 1000), deck("C", 200, 150));
    let mut battle = Battle::new(BattleConfig::default(), player, cpu, model, RockCpu(GameRng::new(11))).unwrap();

    let mut turns = 0;
    while !battle.is_over() {
        let card = battle.state().hands[Side::Player][0].id.clone();
        let report = battle.play_turn(&card, Hand::Rock).unwrap();
        turns += 1;

        assert_eq!(report.outcome, HandOutcome::Draw);
        assert_eq!(report.hits.len(), 2);
        for hit in &report.hits {
            assert!(hit.amount >= low && hit.amount <= high, "{} outside {low}..={high}", hit.amount);
        }
        if !battle.is_over() {
            battle.next_turn().unwrap();
        }
    }

    let state = battle.state();
    assert_eq!(turns, 10);
    assert_eq!(state.end_reason, Some(EndReason::CardsExhausted));
    assert!(state.hp[Side::Player] > 0 && state.hp[Side::Cpu] > 0);
    let spread = state.hp[Side::Player].abs_diff(state.hp[Side::Cpu]);
    assert!(spread <= turns * (high - low));
}

#[test]
fn test_draw_damage_uses_pre_turn_hp() {
    // both sides would die to the other's hit; neither strikes second
    let player = Loadout::new(Leader::new("LP", "Rux", 30), deck("P", 400, 0));
    let cpu = Loadout::new(Leader::new("LC", "Aya", 30), deck("C", 400, 0));
    let mut battle =
        Battle::new(BattleConfig::default(), player, cpu, SoftCapDamage::default(), FixedRandom::default()).unwrap();

    let card = battle.state().hands[Side::Player][0].id.clone();
    let report = battle.play_turn(&card, Hand::Rock).unwrap();

    assert_eq!(report.damage_to(Side::Player), report.damage_to(Side::Cpu));
    assert_eq!(battle.winner(), Some(Winner::Draw));
    assert_eq!(battle.state().end_reason, Some(EndReason::Knockout));
}

// =============================================================================
// Knockouts
// =============================================================================

#[test]
fn test_major_hit_in_range() {
    let model = SoftCapDamage::default();
    let player = Loadout::new(Leader::new("LP", "Rux", 1000), deck("P", 500, 100));
    let cpu = Loadout::new(Leader::new("LC", "Aya", 1000), deck("C", 500, 100));
    let (low, high) = model.range(&player.deck[0].stats(), &cpu.deck[0].stats(), DamageClass::Major);
    assert!(high - low > 1);

    for seed in 0..50 {
        let mut battle = Battle::new(
            BattleConfig::default(),
            player.clone(),
            cpu.clone(),
            model,
            RockCpu(GameRng::new(seed)),
        )
        .unwrap();
        let card = battle.state().hands[Side::Player][0].id.clone();
        let report = battle.play_turn(&card, Hand::Paper).unwrap();

        assert_eq!(report.outcome, HandOutcome::Win);
        let dealt = report.damage_to(Side::Cpu);
        assert!(low < dealt && dealt < high, "{dealt} outside {low}..{high}");
        assert_eq!(report.damage_to(Side::Player), 0);
    }
}

#[test]
fn test_knockout_ends_battle_immediately() {
    let mut battle = start_battle(
        Leader::new("LP", "Rux", 1000),
        deck("P", 500, 100),
        Leader::new("LC", "Aya", 100),
        deck("C", 500, 100),
        3,
        FixedRandom::default(),
    )
    .unwrap();

    let card = battle.state().hands[Side::Player][0].id.clone();
    battle.play_turn(&card, Hand::Paper).unwrap();
    let state = battle.state();

    assert_eq!(state.hp[Side::Cpu], 0);
    assert_eq!(state.phase, Phase::End);
    assert_eq!(state.turn, 1);
    assert_eq!(state.winner, Some(Winner::Player));
    assert_eq!(state.end_reason, Some(EndReason::Knockout));
    assert_eq!(state.log_lines().last().as_deref(), Some("Victory!"));
}

#[test]
fn test_losing_throw_damages_player() {
    let mut battle = start_battle(
        Leader::new("LP", "Rux", 50),
        deck("P", 500, 100),
        Leader::new("LC", "Aya", 1000),
        deck("C", 500, 100),
        3,
        FixedRandom::default(),
    )
    .unwrap();

    let card = battle.state().hands[Side::Player][0].id.clone();
    let report = battle.play_turn(&card, Hand::Scissors).unwrap();

    assert_eq!(report.outcome, HandOutcome::Lose);
    assert_eq!(battle.state().hp[Side::Player], 0);
    assert_eq!(battle.winner(), Some(Winner::Cpu));
    assert_eq!(battle.state().log_lines().last().as_deref(), Some("Defeat..."));
}

// =============================================================================
// Exhaustion
// =============================================================================

fn harmless(player_hp: u32, cpu_hp: u32) -> Battle<GameRng, FlatDamage> {
    let model = FlatDamage {
        major_bonus: 0,
        minor_bonus: 0,
    };
    let player = Loadout::new(Leader::new("LP", "Rux", player_hp), deck("P", 0, 0));
    let cpu = Loadout::new(Leader::new("LC", "Aya", cpu_hp), deck("C", 0, 0));
    Battle::new(BattleConfig::default(), player, cpu, model, GameRng::new(3)).unwrap()
}

#[test]
fn test_exhaustion_tie_is_draw() {
    let mut battle = harmless(1000, 1000);
    let turns = play_out(&mut battle, Hand::Rock);
    let state = battle.state();

    assert_eq!(turns, 10);
    assert_eq!(state.turn, 10);
    assert_eq!(state.end_reason, Some(EndReason::CardsExhausted));
    assert_eq!(state.winner, Some(Winner::Draw));
    for side in Side::BOTH {
        assert_eq!(state.cards_left(side), 0);
    }

    let lines: Vec<String> = state.log_lines().collect();
    assert_eq!(lines[0], "Battle start! Rux vs Aya");
    assert_eq!(&lines[lines.len() - 2..], ["No cards left!", "Draw!"]);
}

#[test]
fn test_exhaustion_higher_hp_wins() {
    let mut battle = harmless(1000, 900);
    play_out(&mut battle, Hand::Paper);
    assert_eq!(battle.winner(), Some(Winner::Player));

    let mut battle = harmless(800, 900);
    play_out(&mut battle, Hand::Paper);
    assert_eq!(battle.winner(), Some(Winner::Cpu));
}

#[test]
fn test_cards_left_shrinks_by_one_per_turn() {
    let mut battle = harmless(1000, 1000);
    let mut expected = 10;

    while !battle.is_over() {
        for side in Side::BOTH {
            assert_eq!(battle.state().cards_left(side), expected);
        }
        let card = battle.state().hands[Side::Player][0].id.clone();
        battle.play_turn(&card, Hand::Rock).unwrap();
        expected -= 1;
        if !battle.is_over() {
            battle.next_turn().unwrap();
        }
    }
    assert_eq!(expected, 0);
}

// =============================================================================
// Replay
// =============================================================================

fn seeded(seed: u64) -> Battle {
    start_battle(
        Leader::new("LP", "Rux", 1500),
        deck("P", 300, 200),
        Leader::new("LC", "Aya", 1500),
        deck("C", 250, 250),
        3,
        GameRng::new(seed),
    )
    .unwrap()
}

fn drive(battle: &mut Battle) {
    while !battle.is_over() {
        let turn = battle.state().turn as usize;
        let hand = &battle.state().hands[Side::Player];
        let card = hand[turn % hand.len()].id.clone();

        battle.apply(&BattleAction::SelectCard(card)).unwrap();
        battle.apply(&BattleAction::ConfirmCard).unwrap();
        battle.apply(&BattleAction::SelectHand(Hand::ALL[turn % 3])).unwrap();
        assert!(battle.apply(&BattleAction::ConfirmHand).unwrap().is_some());
        if !battle.is_over() {
            battle.apply(&BattleAction::NextTurn).unwrap();
        }
    }
}

#[test]
fn test_same_seed_same_battle() {
    let mut first = seeded(2024);
    let mut second = seeded(2024);
    drive(&mut first);
    drive(&mut second);

    assert_eq!(first.state(), second.state());
    assert_eq!(first.history(), second.history());
}

#[test]
fn test_replay_rebuilds_state() {
    let mut original = seeded(77);
    drive(&mut original);

    let replayed = Battle::replay(
        BattleConfig::default(),
        Loadout::new(Leader::new("LP", "Rux", 1500), deck("P", 300, 200)),
        Loadout::new(Leader::new("LC", "Aya", 1500), deck("C", 250, 250)),
        SoftCapDamage::default(),
        GameRng::new(77),
        original.history(),
    )
    .unwrap();

    assert_eq!(replayed.state(), original.state());
    assert!(replayed.is_over());
}

// =============================================================================
// Setup
// =============================================================================

const CATALOG: &str = r#"{
    "cards": [
        {"id": "C001", "name": "Flame Knight", "atk": 320, "def": 180, "hp": 950, "element": "FIRE"},
        {"id": "C002", "name": "Gale Archer", "atk": 280, "def": 140, "hp": 900, "element": "WIND"},
        {"id": "C003", "name": "Tide Monk", "atk": 200, "def": 260, "hp": 1000, "element": "WATER"},
        {"id": "C004", "name": "Ember Fox", "atk": 240, "def": 120, "hp": 880, "element": "FIRE"},
        {"id": "C005", "name": "Storm Hawk", "atk": 300, "def": 100, "hp": 860, "element": "WIND"},
        {"id": "C006", "name": "Reef Golem", "atk": 150, "def": 340, "hp": 1100, "element": "WATER"},
        {"id": "C007", "name": "Ash Wolf", "atk": 260, "def": 160, "hp": 900},
        {"id": "C008", "name": "Mist Dancer", "atk": 220, "def": 200, "hp": 920, "element": "WATER"},
        {"id": "C009", "name": "Cinder Imp", "atk": 180, "def": 90, "hp": 700, "element": "FIRE"},
        {"id": "C010", "name": "Zephyr Sage", "atk": 210, "def": 230, "hp": 980, "element": "WIND", "kind": "SPECIAL"}
    ],
    "leaders": [
        {"id": "L001", "name": "Rux", "hp": 1200}
    ]
}"#;

#[test]
fn test_prepare_from_catalog_json() {
    let catalog = CardCatalog::from_json(CATALOG).unwrap();
    let mut store = InMemoryDeckStore::new(10);
    let ids: Vec<CardId> = catalog.cards().map(|card| card.id.clone()).collect();
    store.put("alice", DeckRecord::new("L001", ids)).unwrap();

    let mut battle = prepare_battle(&store, &catalog, "alice", BattleConfig::default(), GameRng::new(9)).unwrap();

    assert_eq!(battle.state().leaders[Side::Player].name, "Rux");
    assert_eq!(battle.state().hp[Side::Player], 1200);
    assert!(battle.state().hp[Side::Cpu] >= 700);

    play_out(&mut battle, Hand::Paper);
    assert!(battle.state().end_reason.is_some());
}

#[test]
fn test_config_from_json_drives_battle() {
    let config = BattleConfig::from_json(r#"{"initial_hand_size": 5, "max_turns": 3}"#).unwrap();
    let player = Loadout::new(Leader::new("LP", "Rux", 5000), deck("P", 100, 100));
    let cpu = Loadout::new(Leader::new("LC", "Aya", 5000), deck("C", 100, 100));
    let mut battle = Battle::new(config, player, cpu, SoftCapDamage::default(), GameRng::new(1)).unwrap();

    assert_eq!(battle.state().hands[Side::Player].len(), 5);
    let turns = play_out(&mut battle, Hand::Rock);
    assert_eq!(turns, 3);
    assert_eq!(battle.state().end_reason, Some(EndReason::TurnLimit));
}
