use serde::Serialize;

/// Raw synthesized cell-population counts for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellCounts {
    pub n1: u32,
    pub n2: u32,
    pub m1: u32,
    pub m2: u32,
    pub necrosis: u32,
    pub tumor_cells: u32,
    pub total: u32,
}

impl CellCounts {
    pub fn new(n1: u32, n2: u32, m1: u32, m2: u32, necrosis: u32, tumor_cells: u32) -> Self {
        Self {
            n1,
            n2,
            m1,
            m2,
            necrosis,
            tumor_cells,
            total: n1 + n2 + m1 + m2 + necrosis + tumor_cells,
        }
    }
}

/// Composition shares scaled to 0-100, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellPercentages {
    pub n1: f64,
    pub n2: f64,
    pub m1: f64,
    pub m2: f64,
    pub necrosis: f64,
    pub tumor_cells: f64,
}

impl CellPercentages {
    pub fn from_counts(counts: &CellCounts) -> Self {
        debug_assert!(counts.total > 0, "count range floors guarantee total > 0");
        let total = f64::from(counts.total);
        let share = |count: u32| round2(f64::from(count) / total * 100.0);
        Self {
            n1: share(counts.n1),
            n2: share(counts.n2),
            m1: share(counts.m1),
            m2: share(counts.m2),
            necrosis: share(counts.necrosis),
            tumor_cells: share(counts.tumor_cells),
        }
    }

    pub fn sum(&self) -> f64 {
        self.n1 + self.n2 + self.m1 + self.m2 + self.necrosis + self.tumor_cells
    }
}

pub const SURVIVAL_MIN: f64 = 10.0;
pub const SURVIVAL_MAX: f64 = 95.0;

/// Survival score from the anti-tumor share: (n1+m1) against everything
/// else, clamped to [10, 95] and rounded to one decimal.
pub fn survival_rate(counts: &CellCounts) -> f64 {
    let total = f64::from(counts.total);
    let good_ratio = f64::from(counts.n1 + counts.m1) / total;
    let bad_ratio =
        f64::from(counts.n2 + counts.m2 + counts.necrosis + counts.tumor_cells) / total;
    let rate = (good_ratio / (good_ratio + bad_ratio) * 100.0).clamp(SURVIVAL_MIN, SURVIVAL_MAX);
    round1(rate)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
