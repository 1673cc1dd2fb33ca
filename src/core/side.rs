//! Combatant identification and per-side data storage.
//!
//! ## Side
//!
//! A battle always has exactly two combatants: the human player and the CPU.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for HP, hands, decks and
//! selections so both combatants are always handled symmetrically.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two combatants in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human-controlled side.
    Player,
    /// The computer-controlled opponent.
    Cpu,
}

impl Side {
    /// Both sides, player first.
    pub const BOTH: [Side; 2] = [Side::Player, Side::Cpu];

    /// The other combatant.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Cpu,
            Side::Cpu => Side::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Cpu => write!(f, "CPU"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use janken_battle::core::{Side, SideMap};
///
/// let mut hp: SideMap<u32> = SideMap::new(|_| 1000);
/// hp[Side::Cpu] -= 250;
///
/// assert_eq!(hp[Side::Player], 1000);
/// assert_eq!(hp[Side::Cpu], 750);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    player: T,
    cpu: T,
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            player: factory(Side::Player),
            cpu: factory(Side::Cpu),
        }
    }

    /// Create a map from explicit values.
    pub fn from_pair(player: T, cpu: T) -> Self {
        Self { player, cpu }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            player: value.clone(),
            cpu: value,
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Player => &self.player,
            Side::Cpu => &self.cpu,
        }
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Player => &mut self.player,
            Side::Cpu => &mut self.cpu,
        }
    }

    /// Iterate over (Side, &T) pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().map(move |side| (side, self.get(side)))
    }

    /// Map both entries into a new `SideMap`.
    pub fn map<U>(&self, mut f: impl FnMut(Side, &T) -> U) -> SideMap<U> {
        SideMap {
            player: f(Side::Player, &self.player),
            cpu: f(Side::Cpu, &self.cpu),
        }
    }

    /// True if the predicate holds for both sides.
    pub fn all(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        pred(&self.player) && pred(&self.cpu)
    }

    /// True if the predicate holds for at least one side.
    pub fn any(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        pred(&self.player) || pred(&self.cpu)
    }
}

impl<T: Default> Default for SideMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
