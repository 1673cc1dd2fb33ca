//! Deck engine: shuffling and drawing.
//!
//! Both operations take the deck by reference and return new vectors; the
//! input is never modified.

use serde::{Deserialize, Serialize};

use crate::core::RandomSource;

/// Result of drawing from the top of a deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawn<T> {
    /// The first `n` cards (or all of them if fewer remain).
    pub drawn: Vec<T>,
    /// Everything after the drawn cards, in order.
    pub remaining: Vec<T>,
}

/// Return a uniformly permuted copy of `deck`.
///
/// Fisher-Yates from the back, one `next_index` call per position.
pub fn shuffle<T: Clone, R: RandomSource + ?Sized>(deck: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = deck.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.next_index(i + 1);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Split off the top `n` cards.
///
/// ```
/// use janken_battle::zones::draw;
///
/// let result = draw(&[1, 2, 3], 5);
/// assert_eq!(result.drawn, vec![1, 2, 3]);
/// assert!(result.remaining.is_empty());
/// ```
#[must_use]
pub fn draw<T: Clone>(deck: &[T], n: usize) -> Drawn<T> {
    let split = n.min(deck.len());
    let (drawn, remaining) = deck.split_at(split);
    Drawn {
        drawn: drawn.to_vec(),
        remaining: remaining.to_vec(),
    }
}
