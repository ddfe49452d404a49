use std::rc::Rc;
use std::thread;
use std::time::Duration;

use tracing::info;

use crate::display::DisplayProvider;
use crate::input::ImageFile;
use crate::model::AnalysisMode;
use crate::model::result::BatchResult;
use crate::pipeline::AnalysisError;
use crate::pipeline::stage1_seed::run_stage1;
use crate::pipeline::stage2_select::run_stage2;
use crate::pipeline::stage4_aggregate::{Stage4Inputs, run_stage4};

pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Owns the lifecycle of one analysis result: the busy flag, the
/// simulated processing delay, and the display handles the current
/// result holds. The pipeline stages underneath are pure; this is the
/// only stateful layer.
#[derive(Debug)]
pub struct AnalysisSession {
    display: Rc<dyn DisplayProvider>,
    result: Option<BatchResult>,
    busy: bool,
    delay: Duration,
}

impl AnalysisSession {
    pub fn new(display: Rc<dyn DisplayProvider>) -> Self {
        Self::with_delay(display, DEFAULT_PROCESSING_DELAY)
    }

    pub fn with_delay(display: Rc<dyn DisplayProvider>, delay: Duration) -> Self {
        Self {
            display,
            result: None,
            busy: false,
            delay,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn result(&self) -> Option<&BatchResult> {
        self.result.as_ref()
    }

    /// Runs one full analysis over `files`. Rejects re-entry while busy
    /// and empty batches; any synthesis failure leaves the previous
    /// result (if any) untouched and installs nothing.
    pub fn run_analysis(
        &mut self,
        files: &[ImageFile],
        mode: AnalysisMode,
    ) -> Result<&BatchResult, AnalysisError> {
        if self.busy {
            return Err(AnalysisError::Busy);
        }
        if files.is_empty() {
            return Err(AnalysisError::EmptyBatch);
        }

        self.busy = true;
        let outcome = self.run_pipeline(files, mode);
        self.busy = false;

        match outcome {
            Ok(result) => {
                info!(
                    "analysis complete: {} images, mode {}",
                    result.images.len(),
                    mode
                );
                if let Some(previous) = self.result.take() {
                    self.discard(previous);
                }
                Ok(self.result.insert(result))
            }
            Err(err) => Err(err),
        }
    }

    /// Index-based navigation on the current result; no-op when idle or
    /// out of range.
    pub fn select_image(&mut self, index: usize) {
        if let Some(result) = self.result.as_mut() {
            result.select_image(index);
        }
    }

    /// Discards the current result and releases every display handle it
    /// owns.
    pub fn reset(&mut self) {
        if let Some(result) = self.result.take() {
            self.discard(result);
        }
    }

    fn run_pipeline(
        &self,
        files: &[ImageFile],
        mode: AnalysisMode,
    ) -> Result<BatchResult, AnalysisError> {
        // The one suspension point: simulated processing time.
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let stage1 = run_stage1(files, mode);
        let good_survival_indices = run_stage2(files.len(), stage1.folder_seed);
        run_stage4(&Stage4Inputs {
            files,
            mode,
            folder_seed: stage1.folder_seed,
            good_survival_indices: &good_survival_indices,
            display: self.display.as_ref(),
        })
    }

    fn discard(&self, result: BatchResult) {
        for image in &result.images {
            self.display.release(&image.handle);
        }
    }
}

impl Drop for AnalysisSession {
    fn drop(&mut self) {
        self.reset();
    }
}
