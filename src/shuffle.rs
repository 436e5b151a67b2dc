//! Uniform shuffling helpers kept as free functions over any slice.

use fastrand::Rng;

/// Fisher-Yates shuffle in place.
pub fn shuffle<T>(rng: &mut Rng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.usize(..=i);
        items.swap(i, j);
    }
}

/// Copying variant of [`shuffle`].
pub fn shuffled<T>(rng: &mut Rng, mut items: Vec<T>) -> Vec<T> {
    shuffle(rng, &mut items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_every_element() {
        let mut rng = Rng::with_seed(7);
        let mut out = shuffled(&mut rng, (0..32).collect::<Vec<u32>>());
        out.sort_unstable();
        assert_eq!(out, (0..32).collect::<Vec<u32>>());
    }

    #[test]
    fn same_seed_same_order() {
        let a = shuffled(&mut Rng::with_seed(42), (0..10).collect::<Vec<u8>>());
        let b = shuffled(&mut Rng::with_seed(42), (0..10).collect::<Vec<u8>>());
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_slices_are_untouched() {
        let mut rng = Rng::with_seed(1);
        let mut empty: [u8; 0] = [];
        shuffle(&mut rng, &mut empty);
        let mut one = [9];
        shuffle(&mut rng, &mut one);
        assert_eq!(one, [9]);
    }
}
