use std::collections::BTreeSet;

use tracing::debug;

use crate::display::DisplayProvider;
use crate::input::ImageFile;
use crate::model::AnalysisMode;
use crate::model::metrics::EvaluationMetrics;
use crate::model::result::{BatchResult, ImageAnalysisResult, PatchRecord};
use crate::pipeline::AnalysisError;
use crate::pipeline::stage3_synthesize::{Stage3Inputs, run_stage3};

#[derive(Debug, Clone, Copy)]
pub struct Stage4Inputs<'a> {
    pub files: &'a [ImageFile],
    pub mode: AnalysisMode,
    pub folder_seed: u32,
    pub good_survival_indices: &'a BTreeSet<usize>,
    pub display: &'a dyn DisplayProvider,
}

/// Maps the synthesizer over the whole batch and assembles the atomic
/// `BatchResult`. A failure on any image releases every handle acquired
/// so far; no partial result escapes this function.
pub fn run_stage4(inputs: &Stage4Inputs<'_>) -> Result<BatchResult, AnalysisError> {
    let mut images: Vec<ImageAnalysisResult> = Vec::with_capacity(inputs.files.len());
    for (index, file) in inputs.files.iter().enumerate() {
        let stage3 = Stage3Inputs {
            file,
            folder_seed: inputs.folder_seed,
            image_index: index,
            good_survival_indices: inputs.good_survival_indices,
            mode: inputs.mode,
            display: inputs.display,
        };
        match run_stage3(&stage3) {
            Ok(image) => {
                debug!(
                    "synthesized {} (survival {:.1})",
                    image.file_name, image.survival_rate
                );
                images.push(image);
            }
            Err(err) => {
                for image in &images {
                    inputs.display.release(&image.handle);
                }
                return Err(err);
            }
        }
    }

    // Patch records mirror the image percentages verbatim; recomputing
    // them here would let the two views drift under rounding.
    let patch_history: Vec<PatchRecord> = images
        .iter()
        .enumerate()
        .map(|(i, image)| PatchRecord {
            patch_id: i as u32 + 1,
            percentages: image.percentages,
            handle: image.handle,
            file_name: image.file_name.clone(),
        })
        .collect();

    let overall_metrics = overall_metrics(&images);

    Ok(BatchResult {
        images,
        current_image_index: 0,
        patch_history,
        overall_metrics,
    })
}

/// Final precision/recall/F1/R² are averaged across the batch. The
/// confusion matrix and training history are carried over from the first
/// image as-is; downstream reports label them accordingly.
fn overall_metrics(images: &[ImageAnalysisResult]) -> EvaluationMetrics {
    let n = images.len() as f64;
    let mean = |pick: fn(&EvaluationMetrics) -> f64| {
        images.iter().map(|img| pick(&img.metrics)).sum::<f64>() / n
    };

    EvaluationMetrics {
        confusion: images[0].metrics.confusion,
        history: images[0].metrics.history.clone(),
        final_precision: mean(|m| m.final_precision),
        final_recall: mean(|m| m.final_recall),
        final_f1_score: mean(|m| m.final_f1_score),
        final_r_squared: mean(|m| m.final_r_squared),
    }
}
