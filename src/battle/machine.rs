//! The battle state machine.
//!
//! ```text
//! SelectCard --confirm_card--> SelectHand --confirm_hand--> Judge --next_turn--> SelectCard
//!                                                             |                     |
//!                                                             +------> End <--------+
//! ```
//!
//! Every transition validates phase and inputs before touching state, so a
//! rejected call leaves the battle unchanged. Termination is checked after
//! judgement and again after each advance, in priority order:
//!
//! 1. both sides at 0 HP: draw
//! 2. one side at 0 HP: the other side wins
//! 3. a side has no card in hand and none to draw: higher HP wins, tie is a draw
//! 4. turn limit passed: higher HP wins, tie is a draw

use std::cmp::Ordering;

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::log::LogEntry;
use super::state::{BattleState, EndReason, Hit, Phase, Selection, TurnReport, Winner};
use crate::cards::{Card, CardId, Leader, Loadout};
use crate::core::{
    ActionRecord, BattleAction, BattleConfig, BattleError, GameRng, RandomSource, Result, Side, SideMap,
};
use crate::rules::{has_advantage, judge_hands, CombatStats, DamageClass, DamageModel, Hand, HandOutcome, SoftCapDamage};
use crate::zones;

/// A running match: configuration, injected randomness and damage model,
/// plus the state they drive.
///
/// ## Example
///
/// ```
/// use janken_battle::battle::{start_battle, Phase};
/// use janken_battle::cards::{Card, Leader};
/// use janken_battle::core::GameRng;
/// use janken_battle::rules::Hand;
///
/// let deck: Vec<Card> = (0..10).map(|i| Card::new(format!("C{i}"), "Soldier", 100, 80)).collect();
/// let mut battle = start_battle(
///     Leader::new("L1", "Rux", 1000),
///     deck.clone(),
///     Leader::new("L2", "Aya", 1000),
///     deck,
///     3,
///     GameRng::new(7),
/// )
/// .unwrap();
///
/// let card = battle.state().hands.get(janken_battle::core::Side::Player)[0].id.clone();
/// let report = battle.play_turn(&card, Hand::Rock).unwrap();
///
/// assert_eq!(report.turn, 1);
/// assert!(matches!(battle.state().phase, Phase::Judge | Phase::End));
/// ```
#[derive(Clone, Debug)]
pub struct Battle<R = GameRng, M = SoftCapDamage> {
    config: BattleConfig,
    rng: R,
    model: M,
    state: BattleState,
    history: Vec<ActionRecord>,
}

/// Start a battle with the standard ruleset and reference damage model.
pub fn start_battle<R: RandomSource>(
    player_leader: Leader,
    player_deck: Vec<Card>,
    cpu_leader: Leader,
    cpu_deck: Vec<Card>,
    initial_hand_size: usize,
    rng: R,
) -> Result<Battle<R>> {
    let config = BattleConfig::default().with_initial_hand_size(initial_hand_size);
    Battle::new(
        config,
        Loadout::new(player_leader, player_deck),
        Loadout::new(cpu_leader, cpu_deck),
        SoftCapDamage::default(),
        rng,
    )
}

impl<R: RandomSource, M: DamageModel> Battle<R, M> {
    /// Validate both loadouts, shuffle the decks and deal opening hands.
    pub fn new(config: BattleConfig, player: Loadout, cpu: Loadout, model: M, mut rng: R) -> Result<Self> {
        config.validate()?;
        let loadouts = SideMap::from_pair(player, cpu);

        for (side, loadout) in loadouts.iter() {
            if loadout.deck.len() != config.deck_size {
                return Err(BattleError::WrongCardCount {
                    side,
                    expected: config.deck_size,
                    actual: loadout.deck.len(),
                });
            }
            if loadout.leader.hp == 0 {
                return Err(BattleError::LeaderWithoutHp {
                    side,
                    leader: loadout.leader.id.clone(),
                });
            }
        }

        let mut hands: SideMap<Vector<Card>> = SideMap::default();
        let mut decks: SideMap<Vector<Card>> = SideMap::default();
        for side in Side::BOTH {
            let shuffled = zones::shuffle(&loadouts[side].deck, &mut rng);
            let opening = zones::draw(&shuffled, config.initial_hand_size);
            hands[side] = Vector::from(opening.drawn);
            decks[side] = Vector::from(opening.remaining);
        }

        let state = BattleState::new(loadouts.map(|_, loadout| loadout.leader.clone()), hands, decks);
        info!(
            player_leader = %state.leaders[Side::Player].id,
            cpu_leader = %state.leaders[Side::Cpu].id,
            player_hp = state.hp[Side::Player],
            cpu_hp = state.hp[Side::Cpu],
            hand_size = config.initial_hand_size,
            "battle started"
        );

        Ok(Self {
            config,
            rng,
            model,
            state,
            history: Vec::new(),
        })
    }

    /// Rebuild a battle by re-applying a recorded history.
    ///
    /// With the same loadouts and an identically seeded source the result
    /// matches the original battle exactly.
    pub fn replay(
        config: BattleConfig,
        player: Loadout,
        cpu: Loadout,
        model: M,
        rng: R,
        history: &[ActionRecord],
    ) -> Result<Self> {
        let mut battle = Self::new(config, player, cpu, model, rng)?;
        for record in history {
            battle.apply(&record.action)?;
        }
        Ok(battle)
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    #[must_use]
    pub fn winner(&self) -> Option<Winner> {
        self.state.winner
    }

    #[must_use]
    pub fn into_state(self) -> BattleState {
        self.state
    }

    // === Transitions ===

    /// Dispatch a driver action to its transition.
    ///
    /// Returns the turn report when the action judged a turn.
    pub fn apply(&mut self, action: &BattleAction) -> Result<Option<TurnReport>> {
        match action {
            BattleAction::SelectCard(id) => self.select_card(id).map(|()| None),
            BattleAction::ConfirmCard => self.confirm_card().map(|()| None),
            BattleAction::SelectHand(hand) => self.select_hand(*hand).map(|()| None),
            BattleAction::ConfirmHand => self.confirm_hand().map(Some),
            BattleAction::NextTurn => self.next_turn().map(|()| None),
        }
    }

    /// Pick (or re-pick) the player's card for this turn.
    pub fn select_card(&mut self, card_id: &CardId) -> Result<()> {
        self.expect_phase(Phase::SelectCard)?;

        let card = self.state.hands[Side::Player]
            .iter()
            .find(|card| &card.id == card_id)
            .cloned();
        let Some(card) = card else {
            return self.reject(BattleError::CardNotInHand(card_id.clone()));
        };

        debug!(turn = self.state.turn, card = %card.id, "card selected");
        self.state.selections[Side::Player].card = Some(card);
        self.record(BattleAction::SelectCard(card_id.clone()));
        Ok(())
    }

    /// Lock in the selected card and move to hand selection.
    pub fn confirm_card(&mut self) -> Result<()> {
        self.expect_phase(Phase::SelectCard)?;
        if self.state.selections[Side::Player].card.is_none() {
            return self.reject(BattleError::NoCardSelected);
        }

        self.state.phase = Phase::SelectHand;
        self.record(BattleAction::ConfirmCard);
        Ok(())
    }

    /// Pick (or re-pick) the player's hand for this turn.
    pub fn select_hand(&mut self, hand: Hand) -> Result<()> {
        self.expect_phase(Phase::SelectHand)?;

        debug!(turn = self.state.turn, %hand, "hand selected");
        self.state.selections[Side::Player].hand = Some(hand);
        self.record(BattleAction::SelectHand(hand));
        Ok(())
    }

    /// Lock in the player's hand, let the CPU choose, and judge the turn.
    pub fn confirm_hand(&mut self) -> Result<TurnReport> {
        self.expect_phase(Phase::SelectHand)?;

        let selection = &self.state.selections[Side::Player];
        let Some(player_card) = selection.card.clone() else {
            return self.reject(BattleError::NoCardSelected);
        };
        let Some(player_hand) = selection.hand else {
            return self.reject(BattleError::NoHandSelected);
        };
        if self.state.hands[Side::Cpu].is_empty() {
            return self.reject(BattleError::EmptyHand(Side::Cpu));
        }

        let turn = self.state.turn;

        // CPU chooses only now, so nothing is revealed before judgement
        let cpu_index = self.rng.next_index(self.state.hands[Side::Cpu].len());
        let cpu_card = self.state.hands[Side::Cpu][cpu_index].clone();
        let cpu_hand = Hand::random(&mut self.rng);

        let cards = SideMap::from_pair(player_card, cpu_card);
        let hands = SideMap::from_pair(player_hand, cpu_hand);
        let outcome = judge_hands(player_hand, cpu_hand);
        let stats = cards.map(|side, card| self.stats_for(side, card));
        let hp_before = self.state.hp.clone();

        let mut hits: SmallVec<[Hit; 2]> = SmallVec::new();
        match outcome {
            HandOutcome::Win => hits.push(self.strike(Side::Player, &stats, &hp_before, DamageClass::Major)),
            HandOutcome::Lose => hits.push(self.strike(Side::Cpu, &stats, &hp_before, DamageClass::Major)),
            HandOutcome::Draw => {
                hits.push(self.strike(Side::Cpu, &stats, &hp_before, DamageClass::Minor));
                hits.push(self.strike(Side::Player, &stats, &hp_before, DamageClass::Minor));
            }
        }

        for hit in &hits {
            let hp = &mut self.state.hp[hit.target];
            *hp = hp.saturating_sub(hit.amount);
        }

        // played cards leave the hand for good
        let player_hand_cards = &mut self.state.hands[Side::Player];
        if let Some(pos) = player_hand_cards.iter().position(|card| card.id == cards[Side::Player].id) {
            player_hand_cards.remove(pos);
        }
        self.state.hands[Side::Cpu].remove(cpu_index);

        self.state.selections[Side::Cpu] = Selection {
            card: Some(cards[Side::Cpu].clone()),
            hand: Some(cpu_hand),
        };

        let report = TurnReport {
            turn,
            cards,
            hands,
            outcome,
            hits,
            hp_after: self.state.hp.clone(),
        };
        debug!(
            turn,
            outcome = ?report.outcome,
            player_card = %report.cards[Side::Player].id,
            cpu_card = %report.cards[Side::Cpu].id,
            player_damage = report.damage_to(Side::Player),
            cpu_damage = report.damage_to(Side::Cpu),
            "turn judged"
        );

        self.state.log.push_back(LogEntry::Turn(report.clone()));
        self.state.last_turn = Some(report.clone());
        self.state.phase = Phase::Judge;
        self.record(BattleAction::ConfirmHand);

        if let Some((winner, reason)) = self.ending(turn + 1) {
            self.finish(winner, reason);
        }
        Ok(report)
    }

    /// Draw for each side, advance the turn counter and reopen card selection.
    pub fn next_turn(&mut self) -> Result<()> {
        self.expect_phase(Phase::Judge)?;
        self.record(BattleAction::NextTurn);

        for side in Side::BOTH {
            if let Some(card) = self.state.decks[side].pop_front() {
                self.state.hands[side].push_back(card);
            }
        }
        self.state.turn += 1;
        self.state.selections = SideMap::default();
        self.state.phase = Phase::SelectCard;
        debug!(
            turn = self.state.turn,
            player_cards = self.state.cards_left(Side::Player),
            cpu_cards = self.state.cards_left(Side::Cpu),
            "turn advanced"
        );

        if let Some((winner, reason)) = self.ending(self.state.turn) {
            self.finish(winner, reason);
        }
        Ok(())
    }

    /// Select, confirm, throw and judge in one call.
    pub fn play_turn(&mut self, card_id: &CardId, hand: Hand) -> Result<TurnReport> {
        self.select_card(card_id)?;
        self.confirm_card()?;
        self.select_hand(hand)?;
        self.confirm_hand()
    }

    // === Internals ===

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        match self.state.phase {
            actual if actual == expected => Ok(()),
            Phase::End => self.reject(BattleError::BattleOver),
            actual => self.reject(BattleError::WrongPhase { expected, actual }),
        }
    }

    fn reject<T>(&self, error: BattleError) -> Result<T> {
        warn!(turn = self.state.turn, phase = ?self.state.phase, %error, "transition rejected");
        Err(error)
    }

    fn record(&mut self, action: BattleAction) {
        let turn = self.state.turn;
        let sequence = self.history.iter().rev().take_while(|r| r.turn == turn).count() as u32;
        self.history.push(ActionRecord::new(action, turn, sequence));
    }

    fn stats_for(&self, side: Side, card: &Card) -> CombatStats {
        let stats = card.stats();
        if self.config.leader_adds_stats {
            stats.with_leader(&self.state.leaders[side])
        } else {
            stats
        }
    }

    /// One attack from `attacker` on the other side, using pre-turn HP.
    fn strike(
        &mut self,
        attacker: Side,
        stats: &SideMap<CombatStats>,
        hp: &SideMap<u32>,
        class: DamageClass,
    ) -> Hit {
        let defender = attacker.opponent();
        let amount = self.model.compute(
            &stats[attacker],
            &stats[defender],
            hp[attacker],
            hp[defender],
            class,
            &mut self.rng,
        );
        Hit {
            target: defender,
            amount,
            element_advantage: has_advantage(stats[attacker].element, stats[defender].element),
        }
    }

    /// The terminal result, if any, given the turn about to be played.
    fn ending(&self, upcoming_turn: u32) -> Option<(Winner, EndReason)> {
        let hp = &self.state.hp;
        match (hp[Side::Player] == 0, hp[Side::Cpu] == 0) {
            (true, true) => return Some((Winner::Draw, EndReason::Knockout)),
            (true, false) => return Some((Winner::Cpu, EndReason::Knockout)),
            (false, true) => return Some((Winner::Player, EndReason::Knockout)),
            (false, false) => {}
        }

        if Side::BOTH.into_iter().any(|side| self.state.is_exhausted(side)) {
            return Some((self.ahead_on_hp(), EndReason::CardsExhausted));
        }

        match self.config.max_turns {
            Some(max) if upcoming_turn > max => Some((self.ahead_on_hp(), EndReason::TurnLimit)),
            _ => None,
        }
    }

    fn ahead_on_hp(&self) -> Winner {
        match self.state.hp[Side::Player].cmp(&self.state.hp[Side::Cpu]) {
            Ordering::Greater => Winner::Player,
            Ordering::Less => Winner::Cpu,
            Ordering::Equal => Winner::Draw,
        }
    }

    fn finish(&mut self, winner: Winner, reason: EndReason) {
        match reason {
            EndReason::CardsExhausted => self.state.log.push_back(LogEntry::CardsExhausted),
            EndReason::TurnLimit => {
                if let Some(max_turns) = self.config.max_turns {
                    self.state.log.push_back(LogEntry::TurnLimit { max_turns });
                }
            }
            EndReason::Knockout => {}
        }
        self.state.log.push_back(LogEntry::Finished(winner));
        self.state.phase = Phase::End;
        self.state.winner = Some(winner);
        self.state.end_reason = Some(reason);

        info!(
            turn = self.state.turn,
            ?winner,
            ?reason,
            player_hp = self.state.hp[Side::Player],
            cpu_hp = self.state.hp[Side::Cpu],
            "battle finished"
        );
    }
}
