use crate::seeded::rand::unit_fraction;

/// Fisher-Yates permutation driven by per-position seed channels.
///
/// Position `i` draws from channel `seed + i`, so the permutation is a
/// pure function of (input order, seed).
pub fn shuffle_indices(indices: &[usize], seed: u64) -> Vec<usize> {
    let mut shuffled = indices.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = (unit_fraction(seed + i as u64) * (i as f64 + 1.0)).floor() as usize;
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_permutation() {
        let indices: Vec<usize> = (0..8).collect();
        assert_eq!(shuffle_indices(&indices, 42), vec![1, 2, 6, 0, 5, 4, 7, 3]);
    }

    #[test]
    fn test_is_permutation() {
        let indices: Vec<usize> = (0..97).collect();
        let mut shuffled = shuffle_indices(&indices, 123_456_789);
        shuffled.sort_unstable();
        assert_eq!(shuffled, indices);
    }

    #[test]
    fn test_deterministic() {
        let indices: Vec<usize> = (3..40).collect();
        assert_eq!(
            shuffle_indices(&indices, 991),
            shuffle_indices(&indices, 991)
        );
    }

    #[test]
    fn test_seed_sensitivity() {
        let indices: Vec<usize> = (0..32).collect();
        assert_ne!(shuffle_indices(&indices, 1), shuffle_indices(&indices, 2));
    }

    #[test]
    fn test_short_inputs_untouched() {
        assert_eq!(shuffle_indices(&[], 7), Vec::<usize>::new());
        assert_eq!(shuffle_indices(&[4], 7), vec![4]);
    }
}
