use crate::animation::frame_op::{FrameOp, FrameOpHandle, on_stride};
use crate::animation::AnimationSummary;
use crate::error::DykeError;
use crate::thermal_field::{DykeEvaluator, FrameState};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};

/// CSV Profile Writer Operator
///
/// Writes the temperature profile of every `stride`-th frame to a CSV file,
/// one row per sample distance.
///
/// The CSV includes columns for:
/// - frame: animation frame index
/// - time_kyr: elapsed time in thousands of years
/// - dimensionless_time: κ·time / D²
/// - x: distance from the dyke centre in half-widths
/// - temperature_c: temperature at this frame
/// - reference_c: temperature of the initial profile
pub struct CsvProfileWriterOp {
    /// Path to the CSV file to write
    pub file_path: String,

    pub stride: u32,

    rows_written: usize,
}

impl CsvProfileWriterOp {
    /// Create a new CSV writer operator
    ///
    /// # Arguments
    /// * `file_path` - Path to the CSV file to write (will be created/overwritten)
    /// * `stride` - Write every n-th frame
    pub fn new(file_path: String, stride: u32) -> Self {
        Self {
            file_path,
            stride,
            rows_written: 0,
        }
    }

    pub fn handle(file_path: String, stride: u32) -> FrameOpHandle {
        FrameOpHandle::new(Box::new(Self::new(file_path, stride)))
    }

    /// Number of data rows written so far (header excluded)
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    fn write_header(&self) -> Result<(), std::io::Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.file_path)?;

        writeln!(file, "frame,time_kyr,dimensionless_time,x,temperature_c,reference_c")?;
        Ok(())
    }

    fn write_profile(&self, frame: &FrameState<'_>) -> Result<usize, std::io::Error> {
        let file = OpenOptions::new().append(true).open(&self.file_path)?;
        let mut out = BufWriter::new(file);

        let samples = frame.distances.iter().zip(&frame.temperatures).zip(frame.reference);
        let mut rows = 0;
        for ((x, temp), reference) in samples {
            writeln!(
                out,
                "{},{:.4},{:.6e},{:.4},{:.3},{:.3}",
                frame.frame,
                frame.time.kyr(),
                frame.time.dimensionless,
                x,
                temp,
                reference
            )?;
            rows += 1;
        }
        out.flush()?;
        Ok(rows)
    }
}

impl FrameOp for CsvProfileWriterOp {
    fn name(&self) -> &str {
        "CsvProfileWriterOp"
    }

    fn init_animation(&mut self, _evaluator: &DykeEvaluator) -> Result<(), DykeError> {
        self.rows_written = 0;
        self.write_header()?;
        Ok(())
    }

    fn update_frame(&mut self, frame: &FrameState<'_>) -> Result<(), DykeError> {
        if on_stride(frame.frame, self.stride) {
            self.rows_written += self.write_profile(frame)?;
        }
        Ok(())
    }

    fn after_animation(&mut self, _summary: &AnimationSummary) -> Result<(), DykeError> {
        println!("📄 Wrote {} profile rows to {}", self.rows_written, self.file_path);
        Ok(())
    }
}
