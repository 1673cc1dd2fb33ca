//! Damage models.
//!
//! The reference model (`SoftCapDamage`) is stat-driven with bounded
//! randomness:
//!
//! 1. Clip attacker atk and defender def to `stat_internal_cap`.
//! 2. `base + max(0, (atk - def) * stat_multiplier)` for the damage class.
//! 3. Multiply by a triangular roll centred on 1.0.
//! 4. Multiply by a clamped HP-ratio correction.
//! 5. Multiply by the class element bonus when the attacker has advantage.
//! 6. Compress anything above the class cap logarithmically.
//! 7. Floor to an integer.
//!
//! Every constant lives in `DamageConfig`. Other rulesets implement
//! `DamageModel` and plug into the battle unchanged.

use serde::{Deserialize, Serialize};

use super::element::{has_advantage, Element};
use crate::cards::Leader;
use crate::core::{BattleError, RandomSource, Result};

/// The stats one side brings to a single exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub atk: u32,
    pub def: u32,
    pub element: Option<Element>,
}

impl CombatStats {
    /// Add the leader's atk/def on top of these stats.
    #[must_use]
    pub fn with_leader(self, leader: &Leader) -> Self {
        Self {
            atk: self.atk.saturating_add(leader.atk),
            def: self.def.saturating_add(leader.def),
            element: self.element,
        }
    }
}

/// Which damage formula an exchange uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageClass {
    /// Hand-judge win: only the loser is hit.
    Major,
    /// Hand-judge draw: both sides are hit.
    Minor,
}

/// Triangular distribution over `[min, max]` peaking at `mode`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriangularConfig {
    pub min: f64,
    pub max: f64,
    pub mode: f64,
}

impl Default for TriangularConfig {
    fn default() -> Self {
        Self {
            min: 0.7,
            max: 1.3,
            mode: 1.0,
        }
    }
}

impl TriangularConfig {
    /// Map a uniform `u` in `[0, 1]` onto the distribution.
    #[must_use]
    pub fn inverse_cdf(&self, u: f64) -> f64 {
        let width = self.max - self.min;
        if width <= 0.0 {
            return self.min;
        }
        let split = (self.mode - self.min) / width;
        if u < split {
            self.min + (u * width * (self.mode - self.min)).sqrt()
        } else {
            self.max - ((1.0 - u) * width * (self.max - self.mode)).sqrt()
        }
    }

    /// Draw one value using a single uniform sample from `rng`.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inverse_cdf(rng.next_unit())
    }
}

/// Per-class constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassConfig {
    /// Flat damage before the stat term.
    pub base: f64,
    /// Scale applied to `atk - def`.
    pub stat_multiplier: f64,
    /// Soft cap threshold.
    pub cap: f64,
    /// Compression scale above the cap.
    pub softness: f64,
    /// Multiplier on elemental advantage.
    pub element_bonus: f64,
}

impl ClassConfig {
    #[must_use]
    pub fn major() -> Self {
        Self {
            base: 230.0,
            stat_multiplier: 0.8,
            cap: 520.0,
            softness: 80.0,
            element_bonus: 1.5,
        }
    }

    #[must_use]
    pub fn minor() -> Self {
        Self {
            base: 20.0,
            stat_multiplier: 0.1,
            cap: 60.0,
            softness: 15.0,
            element_bonus: 1.3,
        }
    }

    /// Damage before randomness, HP correction and element bonus.
    fn stat_damage(&self, atk: f64, def: f64) -> f64 {
        self.base + ((atk - def) * self.stat_multiplier).max(0.0)
    }
}

/// Clamped `(attacker_hp / defender_hp) ^ exponent`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HpCorrectionConfig {
    pub exponent: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for HpCorrectionConfig {
    fn default() -> Self {
        Self {
            exponent: 0.10,
            min: 0.80,
            max: 1.25,
        }
    }
}

/// Every constant of the reference damage model.
///
/// ## Example
///
/// ```
/// use janken_battle::rules::DamageConfig;
///
/// let config = DamageConfig::from_json(r#"{ "stat_internal_cap": 500 }"#).unwrap();
/// assert_eq!(config.stat_internal_cap, 500);
/// assert_eq!(config.major.cap, 520.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    pub major: ClassConfig,
    pub minor: ClassConfig,
    pub stat_internal_cap: u32,
    pub hp_correction: HpCorrectionConfig,
    pub random: TriangularConfig,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            major: ClassConfig::major(),
            minor: ClassConfig::minor(),
            stat_internal_cap: 700,
            hp_correction: HpCorrectionConfig::default(),
            random: TriangularConfig::default(),
        }
    }
}

impl DamageConfig {
    /// Parse and validate from JSON; missing fields use the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn class(&self, class: DamageClass) -> &ClassConfig {
        match class {
            DamageClass::Major => &self.major,
            DamageClass::Minor => &self.minor,
        }
    }

    /// Reject constants that could produce negative or non-finite damage.
    pub fn validate(&self) -> Result<()> {
        for (name, class) in [("major", &self.major), ("minor", &self.minor)] {
            let fields = [class.base, class.stat_multiplier, class.cap, class.element_bonus];
            if fields.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(BattleError::InvalidConfig(format!(
                    "{name} damage constants must be finite and non-negative"
                )));
            }
            if !(class.softness.is_finite() && class.softness > 0.0) {
                return Err(BattleError::InvalidConfig(format!("{name} softness must be positive")));
            }
        }

        let hp = &self.hp_correction;
        if !(0.0 <= hp.min && hp.min <= hp.max && hp.max.is_finite() && hp.exponent.is_finite()) {
            return Err(BattleError::InvalidConfig(
                "hp_correction needs 0 <= min <= max and a finite exponent".into(),
            ));
        }

        let r = &self.random;
        if !(0.0 <= r.min && r.min <= r.mode && r.mode <= r.max && r.max.is_finite()) {
            return Err(BattleError::InvalidConfig(
                "random needs 0 <= min <= mode <= max".into(),
            ));
        }
        Ok(())
    }
}

/// Compress `value` above `cap`: `cap + softness * ln(1 + excess / softness)`.
///
/// Continuous and monotonic; identity at or below the cap.
#[must_use]
pub fn soft_cap(value: f64, cap: f64, softness: f64) -> f64 {
    if value <= cap {
        return value;
    }
    if softness <= 0.0 {
        return cap;
    }
    let excess = value - cap;
    cap + softness * (excess / softness).ln_1p()
}

/// HP-ratio multiplier. A defender at 0 HP counts as 1.
#[must_use]
pub fn hp_correction(attacker_hp: u32, defender_hp: u32, config: &HpCorrectionConfig) -> f64 {
    let ratio = f64::from(attacker_hp) / f64::from(defender_hp.max(1));
    ratio.powf(config.exponent).clamp(config.min, config.max)
}

/// Strategy for turning one exchange into a damage number.
pub trait DamageModel {
    /// Damage dealt by `attacker` to `defender`. Never negative.
    fn compute<R: RandomSource + ?Sized>(
        &self,
        attacker: &CombatStats,
        defender: &CombatStats,
        attacker_hp: u32,
        defender_hp: u32,
        class: DamageClass,
        rng: &mut R,
    ) -> u32;
}

/// Reference model: triangular roll, HP correction, element bonus, soft cap.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SoftCapDamage {
    config: DamageConfig,
}

impl SoftCapDamage {
    /// Build from a validated config.
    pub fn new(config: DamageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &DamageConfig {
        &self.config
    }

    /// Smallest and largest damage this exchange can produce.
    ///
    /// The minimum ignores the element bonus (it only ever raises damage);
    /// the maximum includes it when the attacker has advantage.
    #[must_use]
    pub fn range(&self, attacker: &CombatStats, defender: &CombatStats, class: DamageClass) -> (u32, u32) {
        let class_config = self.config.class(class);
        let (atk, def) = self.clipped(attacker, defender);
        let stat_damage = class_config.stat_damage(atk, def);

        // same multiplication order as `compute`, so an extreme roll lands exactly on the bound
        let low = stat_damage * self.config.random.min * self.config.hp_correction.min;
        let low = soft_cap(low, class_config.cap, class_config.softness);

        let mut high = stat_damage * self.config.random.max * self.config.hp_correction.max;
        if has_advantage(attacker.element, defender.element) {
            high *= class_config.element_bonus;
        }
        let high = soft_cap(high, class_config.cap, class_config.softness);

        (low.floor() as u32, high.floor() as u32)
    }

    fn clipped(&self, attacker: &CombatStats, defender: &CombatStats) -> (f64, f64) {
        let cap = self.config.stat_internal_cap;
        (f64::from(attacker.atk.min(cap)), f64::from(defender.def.min(cap)))
    }
}

impl DamageModel for SoftCapDamage {
    fn compute<R: RandomSource + ?Sized>(
        &self,
        attacker: &CombatStats,
        defender: &CombatStats,
        attacker_hp: u32,
        defender_hp: u32,
        class: DamageClass,
        rng: &mut R,
    ) -> u32 {
        let class_config = self.config.class(class);
        let (atk, def) = self.clipped(attacker, defender);

        let mut damage = class_config.stat_damage(atk, def);
        damage *= self.config.random.sample(rng);
        damage *= hp_correction(attacker_hp, defender_hp, &self.config.hp_correction);
        if has_advantage(attacker.element, defender.element) {
            damage *= class_config.element_bonus;
        }
        damage = soft_cap(damage, class_config.cap, class_config.softness);

        // `as` saturates, and NaN maps to 0
        damage.max(0.0).floor() as u32
    }
}

/// Early ruleset: `max(0, atk - def)` plus a flat bonus per class.
///
/// Deterministic; ignores HP, elements and the random source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatDamage {
    pub major_bonus: u32,
    pub minor_bonus: u32,
}

impl Default for FlatDamage {
    fn default() -> Self {
        Self {
            major_bonus: 50,
            minor_bonus: 10,
        }
    }
}

impl DamageModel for FlatDamage {
    fn compute<R: RandomSource + ?Sized>(
        &self,
        attacker: &CombatStats,
        defender: &CombatStats,
        _attacker_hp: u32,
        _defender_hp: u32,
        class: DamageClass,
        _rng: &mut R,
    ) -> u32 {
        let bonus = match class {
            DamageClass::Major => self.major_bonus,
            DamageClass::Minor => self.minor_bonus,
        };
        attacker.atk.saturating_sub(defender.def).saturating_add(bonus)
    }
}
