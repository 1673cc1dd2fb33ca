//! Combat rules: hand judge, element advantage and damage models.
//!
//! Everything here is pure given its inputs and the injected random source.
//! The battle state machine calls into these but the rules never look at
//! battle state.

pub mod hand;
pub mod element;
pub mod damage;

pub use hand::{judge_hands, Hand, HandOutcome};
pub use element::{has_advantage, Element};
pub use damage::{
    hp_correction, soft_cap, ClassConfig, CombatStats, DamageClass, DamageConfig, DamageModel,
    FlatDamage, HpCorrectionConfig, SoftCapDamage, TriangularConfig,
};
