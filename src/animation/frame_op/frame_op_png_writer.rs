use crate::animation::frame_op::{FrameOp, FrameOpHandle, on_stride};
use crate::animation::AnimationSummary;
use crate::error::DykeError;
use crate::render::{PlotStyle, save_frame};
use crate::thermal_field::{DykeEvaluator, FrameState};
use std::fs;
use std::path::PathBuf;

/// PNG Frame Writer Operator
///
/// Renders every `stride`-th frame to `{dir}/{prefix}_{frame:05}.png`.
/// The numbered sequence can be stitched into a video with external tools.
pub struct PngFrameWriterOp {
    pub dir: PathBuf,
    pub prefix: String,
    pub stride: u32,
    pub style: PlotStyle,
    frames_written: usize,
}

impl PngFrameWriterOp {
    pub fn new(dir: impl Into<PathBuf>, prefix: &str, stride: u32, style: PlotStyle) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.to_string(),
            stride,
            style,
            frames_written: 0,
        }
    }

    pub fn handle(dir: impl Into<PathBuf>, prefix: &str, stride: u32, style: PlotStyle) -> FrameOpHandle {
        FrameOpHandle::new(Box::new(Self::new(dir, prefix, stride, style)))
    }

    pub fn frame_path(&self, frame: u32) -> PathBuf {
        self.dir.join(format!("{}_{:05}.png", self.prefix, frame))
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl FrameOp for PngFrameWriterOp {
    fn name(&self) -> &str {
        "PngFrameWriterOp"
    }

    fn init_animation(&mut self, _evaluator: &DykeEvaluator) -> Result<(), DykeError> {
        fs::create_dir_all(&self.dir)?;
        self.frames_written = 0;
        Ok(())
    }

    fn update_frame(&mut self, frame: &FrameState<'_>) -> Result<(), DykeError> {
        if on_stride(frame.frame, self.stride) {
            save_frame(frame, &self.style, self.frame_path(frame.frame))?;
            self.frames_written += 1;
        }
        Ok(())
    }

    fn after_animation(&mut self, _summary: &AnimationSummary) -> Result<(), DykeError> {
        println!(
            "🖼️  Wrote {} frames ({}x{} px) to {}",
            self.frames_written,
            self.style.width,
            self.style.height,
            self.dir.display()
        );
        Ok(())
    }
}
