//! Unbiased shuffling shared by the quiz and memory engines.

use rand::Rng;

/// Fisher–Yates: for `i` from the last index down to 1, swap `i` with a
/// uniformly chosen index in `0..=i`.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffles `items` and keeps at most `count` of them.
///
/// When fewer than `count` items are available all of them are returned, in
/// shuffled order.
pub fn sample<T, R>(mut items: Vec<T>, count: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    shuffle(&mut items, rng);
    items.truncate(count);
    items
}
