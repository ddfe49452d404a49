pub mod stage1_seed;
pub mod stage2_select;
pub mod stage3_synthesize;
pub mod stage4_aggregate;

use thiserror::Error;

use crate::display::DisplayError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("an analysis run is already in progress")]
    Busy,
    #[error("no input images were provided")]
    EmptyBatch,
    #[error("display handle acquisition failed: {0}")]
    Display(#[from] DisplayError),
}
