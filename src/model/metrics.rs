use serde::Serialize;

/// Confusion-matrix cell counts for the simulated classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub true_positive: u32,
    pub false_positive: u32,
    pub false_negative: u32,
    pub true_negative: u32,
}

/// One point of the simulated training curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsPoint {
    pub iteration: u32,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub r_squared: f64,
}

/// Evaluation block attached to each image and to the batch as a whole.
///
/// `final_f1_score` is always the harmonic mean of `final_precision` and
/// `final_recall`, never an independent draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationMetrics {
    pub confusion: ConfusionCounts,
    pub history: Vec<MetricsPoint>,
    pub final_precision: f64,
    pub final_recall: f64,
    pub final_f1_score: f64,
    pub final_r_squared: f64,
}

pub fn harmonic_mean(precision: f64, recall: f64) -> f64 {
    2.0 * precision * recall / (precision + recall)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harmonic_mean() {
        assert!((harmonic_mean(0.8, 0.8) - 0.8).abs() < 1e-12);
        let f1 = harmonic_mean(0.9, 0.7);
        assert!((f1 - 2.0 * 0.9 * 0.7 / 1.6).abs() < 1e-12);
        assert!(f1 < 0.8, "harmonic mean sits below the arithmetic mean");
    }
}
