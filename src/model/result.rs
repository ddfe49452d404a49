use serde::Serialize;

use crate::display::DisplayHandle;
use crate::model::counts::{CellCounts, CellPercentages};
use crate::model::metrics::EvaluationMetrics;

/// Everything synthesized for a single input image.
#[derive(Debug, Clone, Serialize)]
pub struct ImageAnalysisResult {
    pub file_name: String,
    pub counts: CellCounts,
    pub percentages: CellPercentages,
    pub survival_rate: f64,
    #[serde(skip)]
    pub handle: DisplayHandle,
    pub metrics: EvaluationMetrics,
}

/// One entry of the per-image patch history.
///
/// Percentages are copied verbatim from the owning image result; a
/// consumer computing ratios from either record must see identical
/// numbers.
#[derive(Debug, Clone, Serialize)]
pub struct PatchRecord {
    pub patch_id: u32,
    pub percentages: CellPercentages,
    #[serde(skip)]
    pub handle: DisplayHandle,
    pub file_name: String,
}

/// Atomic output of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub images: Vec<ImageAnalysisResult>,
    pub current_image_index: usize,
    pub patch_history: Vec<PatchRecord>,
    pub overall_metrics: EvaluationMetrics,
}

impl BatchResult {
    /// Index-based navigation; out-of-range requests are ignored.
    pub fn select_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.current_image_index = index;
        }
    }

    pub fn current_image(&self) -> Option<&ImageAnalysisResult> {
        self.images.get(self.current_image_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::counts::survival_rate;
    use crate::model::metrics::ConfusionCounts;

    fn dummy_result(n: usize) -> BatchResult {
        let images = (0..n)
            .map(|i| {
                let counts = CellCounts::new(200, 100, 180, 120, 50, 150);
                ImageAnalysisResult {
                    file_name: format!("img_{i}.png"),
                    counts,
                    percentages: CellPercentages::from_counts(&counts),
                    survival_rate: survival_rate(&counts),
                    handle: DisplayHandle::new(i as u64),
                    metrics: EvaluationMetrics {
                        confusion: ConfusionCounts {
                            true_positive: 80,
                            false_positive: 10,
                            false_negative: 10,
                            true_negative: 80,
                        },
                        history: Vec::new(),
                        final_precision: 0.8,
                        final_recall: 0.8,
                        final_f1_score: 0.8,
                        final_r_squared: 0.7,
                    },
                }
            })
            .collect::<Vec<_>>();
        let patch_history = images
            .iter()
            .enumerate()
            .map(|(i, img)| PatchRecord {
                patch_id: i as u32 + 1,
                percentages: img.percentages,
                handle: img.handle,
                file_name: img.file_name.clone(),
            })
            .collect();
        let overall_metrics = images[0].metrics.clone();
        BatchResult {
            images,
            current_image_index: 0,
            patch_history,
            overall_metrics,
        }
    }

    #[test]
    fn test_select_image_in_range() {
        let mut result = dummy_result(3);
        result.select_image(2);
        assert_eq!(result.current_image_index, 2);
        assert_eq!(result.current_image().unwrap().file_name, "img_2.png");
    }

    #[test]
    fn test_select_image_out_of_range_is_noop() {
        let mut result = dummy_result(3);
        result.select_image(1);
        result.select_image(3);
        result.select_image(usize::MAX);
        assert_eq!(result.current_image_index, 1);
    }

    #[test]
    fn test_handles_skipped_in_serialization() {
        let result = dummy_result(1);
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("handle"));
        assert!(json.contains("patch_id"));
    }
}
