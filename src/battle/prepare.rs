//! Match setup from external collaborators.

use super::machine::Battle;
use crate::cards::{CardCatalog, DeckStore, Loadout};
use crate::core::{BattleConfig, BattleError, RandomSource, Result};
use crate::rules::SoftCapDamage;

/// Start a battle for `user_id` against a random CPU.
///
/// Fetches the stored deck, resolves it against the catalog and builds the
/// CPU from the whole catalog. Fails with `DeckNotFound` when the user has no
/// deck, and with `UnknownLeader`/`UnknownCard`/`WrongCardCount` when the
/// stored deck does not resolve to a full deck.
pub fn prepare_battle<S, R>(
    store: &S,
    catalog: &CardCatalog,
    user_id: &str,
    config: BattleConfig,
    mut rng: R,
) -> Result<Battle<R>>
where
    S: DeckStore + ?Sized,
    R: RandomSource,
{
    let record = store
        .get(user_id)
        .ok_or_else(|| BattleError::DeckNotFound(user_id.to_string()))?;
    let player = catalog.resolve(&record.leader_id, &record.card_ids)?;
    let cpu = Loadout::random_cpu(catalog, config.deck_size, &mut rng)?;

    Battle::new(config, player, cpu, SoftCapDamage::default(), rng)
}
