use std::collections::BTreeSet;

use tracing::info;

use crate::seeded::shuffle_indices;

/// At most this many patches per batch are steered toward a favorable
/// survival profile.
pub const GOOD_SURVIVAL_TARGET: usize = 5;

/// Picks the good-survival indices for a batch of `n_images` files.
///
/// Candidates come from the interior of the batch (the first and last
/// 20% are skipped) so favorable patches never cluster at the edges of
/// the viewing order. Batches too small for that window fall back to the
/// full range minus a few leading indices.
pub fn run_stage2(n_images: usize, folder_seed: u32) -> BTreeSet<usize> {
    let target = GOOD_SURVIVAL_TARGET.min(n_images);

    let skip_start = (n_images as f64 * 0.2).floor() as usize;
    let skip_end = (n_images as f64 * 0.8).floor() as usize;
    let interior: Vec<usize> = (skip_start..skip_end).collect();

    let pool: Vec<usize> = if interior.len() < target {
        let offset = GOOD_SURVIVAL_TARGET.min(n_images - target);
        (offset..n_images).collect()
    } else {
        interior
    };

    let shuffled = shuffle_indices(&pool, u64::from(folder_seed));
    let selected: BTreeSet<usize> = shuffled.into_iter().take(target).collect();
    info!(
        "selected {} of {} patches for a good-survival profile",
        selected.len(),
        n_images
    );
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_size_is_min_five_n() {
        for n in 1..40 {
            let selected = run_stage2(n, 777);
            assert_eq!(selected.len(), GOOD_SURVIVAL_TARGET.min(n), "n = {n}");
        }
    }

    #[test]
    fn test_singleton_batch_selects_index_zero() {
        assert_eq!(run_stage2(1, 103_865_511), BTreeSet::from([0]));
    }

    #[test]
    fn test_small_batches_fall_back_deterministically() {
        // For these sizes the candidate pool has exactly `target` entries,
        // so membership is independent of the seed.
        for seed in [0u32, 1, 999_999_999] {
            assert_eq!(run_stage2(6, seed), BTreeSet::from([1, 2, 3, 4, 5]));
            assert_eq!(run_stage2(7, seed), BTreeSet::from([2, 3, 4, 5, 6]));
            assert_eq!(run_stage2(8, seed), BTreeSet::from([1, 2, 3, 4, 5]));
        }
    }

    #[test]
    fn test_interior_bias_for_large_batches() {
        for n in [10usize, 15, 20, 50, 100] {
            let skip_start = (n as f64 * 0.2).floor() as usize;
            let skip_end = (n as f64 * 0.8).floor() as usize;
            for seed in [7u32, 1_168_574_406, u32::MAX] {
                for &idx in &run_stage2(n, seed) {
                    assert!(
                        (skip_start..skip_end).contains(&idx),
                        "n = {n}, seed = {seed}, idx = {idx}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_twenty_image_regression() {
        // Folder seed recorded from the batch patch_001.png..patch_020.png
        // in proposed mode.
        let selected = run_stage2(20, 1_168_574_406);
        assert_eq!(selected, BTreeSet::from([4, 6, 9, 10, 14]));
    }

    #[test]
    fn test_deterministic_per_seed() {
        assert_eq!(run_stage2(25, 31337), run_stage2(25, 31337));
        assert_ne!(run_stage2(25, 31337), run_stage2(25, 31338));
    }
}
