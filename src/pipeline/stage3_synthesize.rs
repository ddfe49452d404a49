use std::collections::BTreeSet;

use crate::display::DisplayProvider;
use crate::input::ImageFile;
use crate::model::AnalysisMode;
use crate::model::counts::{CellCounts, CellPercentages, survival_rate};
use crate::model::metrics::{ConfusionCounts, EvaluationMetrics, MetricsPoint, harmonic_mean};
use crate::model::ranges::{PROPOSED_UPLIFT, base_ranges};
use crate::model::result::ImageAnalysisResult;
use crate::pipeline::AnalysisError;
use crate::pipeline::stage1_seed::combined_seed;
use crate::seeded::{int_in_range, unit_fraction};

// Seed channel offsets from the combined seed. Every independent draw
// owns one channel; renumbering any of them changes all downstream
// output for existing batches.
const CH_COUNT_BASE: u64 = 1; // +1..+6, one per population
const CH_UPLIFT_BASE: u64 = 7; // +7..+12, proposed-mode additive offsets
const CH_PRECISION: u64 = 13;
const CH_RECALL: u64 = 14;
const CH_R_SQUARED: u64 = 15;
const CH_TRUE_POSITIVE: u64 = 16;
const CH_FALSE_POSITIVE: u64 = 17;
const CH_FALSE_NEGATIVE: u64 = 18;
const CH_TRUE_NEGATIVE: u64 = 19;
const CH_HISTORY_PRECISION: u64 = 20; // +20..+29
const CH_HISTORY_RECALL: u64 = 30; // +30..+39
const CH_HISTORY_F1: u64 = 40; // +40..+49
const CH_HISTORY_R_SQUARED: u64 = 50; // +50..+59

const HISTORY_POINTS: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct Stage3Inputs<'a> {
    pub file: &'a ImageFile,
    pub folder_seed: u32,
    pub image_index: usize,
    pub good_survival_indices: &'a BTreeSet<usize>,
    pub mode: AnalysisMode,
    pub display: &'a dyn DisplayProvider,
}

/// Synthesizes the full analysis record for one image: a display handle,
/// six biased population counts, derived composition and survival, and a
/// synthetic evaluation block.
pub fn run_stage3(inputs: &Stage3Inputs<'_>) -> Result<ImageAnalysisResult, AnalysisError> {
    let handle = inputs
        .display
        .acquire(&inputs.file.name, &inputs.file.bytes)?;

    let seed = combined_seed(inputs.folder_seed, &inputs.file.name, inputs.mode);
    let good_survival = inputs.good_survival_indices.contains(&inputs.image_index);

    let counts = draw_counts(seed, inputs.mode, good_survival);
    let percentages = CellPercentages::from_counts(&counts);
    let survival = survival_rate(&counts);
    let metrics = draw_metrics(seed);

    Ok(ImageAnalysisResult {
        file_name: inputs.file.name.clone(),
        counts,
        percentages,
        survival_rate: survival,
        handle,
        metrics,
    })
}

fn draw_counts(seed: u64, mode: AnalysisMode, good_survival: bool) -> CellCounts {
    let windows = base_ranges(mode, good_survival).windows();
    let mut drawn = [0u32; 6];
    for (k, w) in windows.iter().enumerate() {
        drawn[k] = int_in_range(seed + CH_COUNT_BASE + k as u64, w.lo, w.hi);
    }

    // Proposed-mode baseline patches ride the existing-method windows
    // plus a per-population uplift, so the two modes stay comparable for
    // the same file while proposed reads consistently higher.
    if !good_survival && mode == AnalysisMode::Proposed {
        for (k, w) in PROPOSED_UPLIFT.windows().iter().enumerate() {
            drawn[k] += int_in_range(seed + CH_UPLIFT_BASE + k as u64, w.lo, w.hi);
        }
    }

    CellCounts::new(drawn[0], drawn[1], drawn[2], drawn[3], drawn[4], drawn[5])
}

fn draw_metrics(seed: u64) -> EvaluationMetrics {
    let final_precision = 0.75 + unit_fraction(seed + CH_PRECISION) * 0.15;
    let final_recall = 0.70 + unit_fraction(seed + CH_RECALL) * 0.20;
    let final_f1_score = harmonic_mean(final_precision, final_recall);
    let final_r_squared = 0.65 + unit_fraction(seed + CH_R_SQUARED) * 0.25;

    let confusion = ConfusionCounts {
        true_positive: int_in_range(seed + CH_TRUE_POSITIVE, 70, 90),
        false_positive: int_in_range(seed + CH_FALSE_POSITIVE, 5, 20),
        false_negative: int_in_range(seed + CH_FALSE_NEGATIVE, 5, 20),
        true_negative: int_in_range(seed + CH_TRUE_NEGATIVE, 70, 90),
    };

    let mut history = Vec::with_capacity(HISTORY_POINTS);
    for i in 0..HISTORY_POINTS {
        let step = i as u64;
        let ramp = i as f64 / (HISTORY_POINTS - 1) as f64;
        history.push(MetricsPoint {
            iteration: i as u32 + 1,
            precision: 0.5
                + ramp * 0.3
                + unit_fraction(seed + CH_HISTORY_PRECISION + step) * 0.1,
            recall: 0.45
                + ramp * 0.35
                + unit_fraction(seed + CH_HISTORY_RECALL + step) * 0.1,
            f1_score: 0.48
                + ramp * 0.32
                + unit_fraction(seed + CH_HISTORY_F1 + step) * 0.1,
            r_squared: 0.4
                + ramp * 0.4
                + unit_fraction(seed + CH_HISTORY_R_SQUARED + step) * 0.1,
        });
    }

    EvaluationMetrics {
        confusion,
        history,
        final_precision,
        final_recall,
        final_f1_score,
        final_r_squared,
    }
}
