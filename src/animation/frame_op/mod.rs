mod frame_op_csv_writer;
mod frame_op_png_writer;
mod frame_op_progress_reporter;

pub use frame_op_csv_writer::CsvProfileWriterOp;
pub use frame_op_png_writer::PngFrameWriterOp;
pub use frame_op_progress_reporter::ProgressReporterOp;

use crate::animation::AnimationSummary;
use crate::error::DykeError;
use crate::thermal_field::{DykeEvaluator, FrameState};

/// A consumer of evaluated frames. The driver owns the frame loop.
pub trait FrameOp {
    /// The name of this operator (for identification and timing reports)
    fn name(&self) -> &str;

    /// Called once before the first frame
    fn init_animation(&mut self, _evaluator: &DykeEvaluator) -> Result<(), DykeError> {
        Ok(())
    }

    /// Called for every successfully evaluated frame, in increasing frame order
    fn update_frame(&mut self, _frame: &FrameState<'_>) -> Result<(), DykeError> {
        Ok(())
    }

    /// Called once after the last frame
    fn after_animation(&mut self, _summary: &AnimationSummary) -> Result<(), DykeError> {
        Ok(())
    }
}

pub struct FrameOpHandle {
    pub op: Box<dyn FrameOp>,
}

impl FrameOpHandle {
    /// Create a new FrameOpHandle with the given operation
    pub fn new(op: Box<dyn FrameOp>) -> Self {
        FrameOpHandle { op }
    }
}

/// True when `frame` falls on a `stride` boundary; a stride of 0 acts as 1.
pub(crate) fn on_stride(frame: u32, stride: u32) -> bool {
    frame % stride.max(1) == 0
}

#[cfg(test)]
mod tests {
    use super::on_stride;

    #[test]
    fn test_on_stride() {
        assert!(on_stride(0, 40));
        assert!(on_stride(80, 40));
        assert!(!on_stride(81, 40));
        assert!(on_stride(7, 1));
        assert!(on_stride(7, 0));
    }
}
