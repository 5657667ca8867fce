use crate::animation::frame_op::{FrameOp, FrameOpHandle, on_stride};
use crate::animation::AnimationSummary;
use crate::error::DykeError;
use crate::thermal_field::{DykeEvaluator, FrameState};
use colored::Colorize;

/// Progress Reporter Operator
///
/// Prints the elapsed time, the dyke-centre temperature and the curve
/// color every `report_interval` frames.
#[derive(Debug, Clone)]
pub struct ProgressReporterOp {
    pub report_interval: u32,
    frame_count: u32,
    reports: usize,
}

impl ProgressReporterOp {
    pub fn new(report_interval: u32) -> Self {
        Self {
            report_interval,
            frame_count: 0,
            reports: 0,
        }
    }

    pub fn handle(report_interval: u32) -> FrameOpHandle {
        FrameOpHandle::new(Box::new(Self::new(report_interval)))
    }

    pub fn reports(&self) -> usize {
        self.reports
    }

    fn progress_line(&self, frame: &FrameState<'_>) -> String {
        let [r, g, b] = frame.color.0;
        format!(
            "{} frame {:>5}/{} {} T(0)={:>7.1} °C color={:.3} {}",
            "▶".cyan(),
            frame.frame,
            self.frame_count,
            frame.time_label.bold(),
            frame.center_temp(),
            frame.color_fraction,
            "■".truecolor(r, g, b)
        )
    }
}

impl FrameOp for ProgressReporterOp {
    fn name(&self) -> &str {
        "ProgressReporterOp"
    }

    fn init_animation(&mut self, evaluator: &DykeEvaluator) -> Result<(), DykeError> {
        let props = evaluator.props();
        self.frame_count = evaluator.frame_count();
        self.reports = 0;
        println!(
            "{} dyke T0={:.0} °C Ti={:.0} °C D={:.0} m κ={:.2e} m²/s, {} frames over {:.2} kyr",
            "🌋".red(),
            props.ambient_temp_c,
            props.intrusion_temp_c,
            props.half_width_m,
            props.diffusivity_m2_s,
            self.frame_count,
            props.animation.duration_myr() * 1000.0
        );
        Ok(())
    }

    fn update_frame(&mut self, frame: &FrameState<'_>) -> Result<(), DykeError> {
        if on_stride(frame.frame, self.report_interval) {
            println!("{}", self.progress_line(frame));
            self.reports += 1;
        }
        Ok(())
    }

    fn after_animation(&mut self, summary: &AnimationSummary) -> Result<(), DykeError> {
        let skipped = if summary.skipped_frames.is_empty() {
            "none".green().to_string()
        } else {
            format!("{:?}", summary.skipped_frames).yellow().to_string()
        };
        println!(
            "{} {}: {} frames evaluated, skipped {}, final time {:.2} kyr in {:.2?}",
            "✅".green(),
            summary.name,
            summary.frames_evaluated,
            skipped,
            summary.last_time_myr * 1000.0,
            summary.elapsed
        );
        Ok(())
    }
}
