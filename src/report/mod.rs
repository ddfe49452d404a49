pub mod json;
pub mod text;
pub mod writer;

use serde::Serialize;

use crate::model::AnalysisMode;
use crate::model::counts::round2;
use crate::model::metrics::EvaluationMetrics;
use crate::model::result::BatchResult;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SurvivalStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Mean composition across the batch, one value per population.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompositionMeans {
    pub n1: f64,
    pub n2: f64,
    pub m1: f64,
    pub m2: f64,
    pub necrosis: f64,
    pub tumor_cells: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageSummary {
    pub file_name: String,
    pub survival_rate: f64,
    pub total_cells: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub tool_name: String,
    pub tool_version: String,
    pub mode: AnalysisMode,
    pub n_images: usize,
    pub survival: SurvivalStats,
    pub composition_mean: CompositionMeans,
    pub overall_metrics: EvaluationMetrics,
    pub images: Vec<ImageSummary>,
}

pub fn build_summary(result: &BatchResult, mode: AnalysisMode) -> BatchSummary {
    let survival_rates: Vec<f64> = result.images.iter().map(|img| img.survival_rate).collect();

    let composition_mean = CompositionMeans {
        n1: round2(mean(&pick(result, |p| p.n1))),
        n2: round2(mean(&pick(result, |p| p.n2))),
        m1: round2(mean(&pick(result, |p| p.m1))),
        m2: round2(mean(&pick(result, |p| p.m2))),
        necrosis: round2(mean(&pick(result, |p| p.necrosis))),
        tumor_cells: round2(mean(&pick(result, |p| p.tumor_cells))),
    };

    BatchSummary {
        tool_name: "histotme".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        mode,
        n_images: result.images.len(),
        survival: SurvivalStats {
            mean: round2(mean(&survival_rates)),
            min: min_of(&survival_rates),
            max: max_of(&survival_rates),
        },
        composition_mean,
        overall_metrics: result.overall_metrics.clone(),
        images: result
            .images
            .iter()
            .map(|img| ImageSummary {
                file_name: img.file_name.clone(),
                survival_rate: img.survival_rate,
                total_cells: img.counts.total,
            })
            .collect(),
    }
}

fn pick(
    result: &BatchResult,
    field: fn(&crate::model::counts::CellPercentages) -> f64,
) -> Vec<f64> {
    result.images.iter().map(|img| field(&img.percentages)).collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

pub fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_min_max() {
        let v = [53.9, 10.0, 95.0, 44.4];
        assert_eq!(min_of(&v), 10.0);
        assert_eq!(max_of(&v), 95.0);
    }
}
