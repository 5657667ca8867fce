pub mod frame_op;

pub use frame_op::{CsvProfileWriterOp, FrameOp, FrameOpHandle, PngFrameWriterOp, ProgressReporterOp};

use crate::dyke_props::DykeProps;
use crate::error::DykeError;
use crate::thermal_field::DykeEvaluator;
use colored::Colorize;
use std::time::{Duration, Instant};

/// What the driver does when the evaluator rejects a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameErrorPolicy {
    /// Record the frame as skipped and keep going
    #[default]
    Skip,
    /// Stop the animation and return the error
    Abort,
}

#[derive(Debug, Clone)]
pub struct OpTiming {
    pub op_name: String,
    pub init_time: Duration,
    pub total_update_time: Duration,
    pub update_call_count: u32,
    pub after_time: Duration,
}

impl OpTiming {
    pub fn new(op_name: String) -> Self {
        Self {
            op_name,
            init_time: Duration::ZERO,
            total_update_time: Duration::ZERO,
            update_call_count: 0,
            after_time: Duration::ZERO,
        }
    }

    pub fn avg_update_time(&self) -> Duration {
        if self.update_call_count > 0 {
            self.total_update_time / self.update_call_count
        } else {
            Duration::ZERO
        }
    }

    pub fn total_time(&self) -> Duration {
        self.init_time + self.total_update_time + self.after_time
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSummary {
    pub name: String,
    pub frames_evaluated: u32,
    pub skipped_frames: Vec<u32>,
    /// Elapsed simulated time of the last evaluated frame, in Myr
    pub last_time_myr: f64,
    pub elapsed: Duration,
}

pub struct AnimationProps {
    pub name: &'static str,
    pub dyke: DykeProps,
    pub ops: Vec<FrameOpHandle>,
    pub error_policy: FrameErrorPolicy,
    pub debug: bool,
}

/// Frame driver: evaluates frames 0..frame_count in order and hands each
/// one to the registered operators.
pub struct Animation {
    pub name: String,
    pub evaluator: DykeEvaluator,
    pub ops: Vec<Box<dyn FrameOp>>,
    pub error_policy: FrameErrorPolicy,
    pub debug: bool,
    pub op_timings: Vec<OpTiming>,
}

impl Animation {
    pub fn new(props: AnimationProps) -> Result<Animation, DykeError> {
        let evaluator = DykeEvaluator::new(props.dyke)?;
        let ops: Vec<Box<dyn FrameOp>> = props.ops.into_iter().map(|handle| handle.op).collect();
        let op_timings = ops
            .iter()
            .map(|op| OpTiming::new(op.name().to_string()))
            .collect();

        Ok(Animation {
            name: props.name.to_string(),
            evaluator,
            ops,
            error_policy: props.error_policy,
            debug: props.debug,
            op_timings,
        })
    }

    pub fn run(&mut self) -> Result<AnimationSummary, DykeError> {
        let started = Instant::now();

        for (op, timing) in self.ops.iter_mut().zip(self.op_timings.iter_mut()) {
            let t = Instant::now();
            op.init_animation(&self.evaluator)?;
            timing.init_time += t.elapsed();
        }

        let mut summary = AnimationSummary {
            name: self.name.clone(),
            frames_evaluated: 0,
            skipped_frames: Vec::new(),
            last_time_myr: 0.0,
            elapsed: Duration::ZERO,
        };

        for frame in 0..self.evaluator.frame_count() {
            let state = match self.evaluator.evaluate(frame) {
                Ok(state) => state,
                Err(e) if e.is_frame_error() && self.error_policy == FrameErrorPolicy::Skip => {
                    if self.debug {
                        eprintln!("{} skipping frame {}: {}", "⚠️".yellow(), frame, e);
                    }
                    summary.skipped_frames.push(frame);
                    continue;
                }
                Err(e) => return Err(e),
            };

            for (op, timing) in self.ops.iter_mut().zip(self.op_timings.iter_mut()) {
                let t = Instant::now();
                op.update_frame(&state)?;
                timing.total_update_time += t.elapsed();
                timing.update_call_count += 1;
            }

            summary.frames_evaluated += 1;
            summary.last_time_myr = state.time.myr;
        }

        summary.elapsed = started.elapsed();

        for (op, timing) in self.ops.iter_mut().zip(self.op_timings.iter_mut()) {
            let t = Instant::now();
            op.after_animation(&summary)?;
            timing.after_time += t.elapsed();
        }

        if self.debug {
            self.print_timing_report();
        }

        Ok(summary)
    }

    pub fn print_timing_report(&self) {
        println!("{}", format!("⏱️  Operator timings for {}", self.name).bold());
        for timing in &self.op_timings {
            println!(
                "   {:<22} init {:>10.2?}  update {:>10.2?} ({} calls, avg {:.2?})  after {:>10.2?}  total {:.2?}",
                timing.op_name,
                timing.init_time,
                timing.total_update_time,
                timing.update_call_count,
                timing.avg_update_time(),
                timing.after_time,
                timing.total_time()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records the frames it sees into a shared log.
    struct RecorderOp {
        log: Rc<RefCell<Vec<u32>>>,
    }

    impl FrameOp for RecorderOp {
        fn name(&self) -> &str {
            "RecorderOp"
        }

        fn update_frame(&mut self, frame: &crate::thermal_field::FrameState<'_>) -> Result<(), DykeError> {
            self.log.borrow_mut().push(frame.frame);
            Ok(())
        }
    }

    fn small_props() -> DykeProps {
        let mut dyke = DykeProps::default();
        dyke.animation.frame_count = 12;
        dyke
    }

    #[test]
    fn test_skip_policy_skips_frame_zero() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut animation = Animation::new(AnimationProps {
            name: "skip",
            dyke: small_props(),
            ops: vec![FrameOpHandle::new(Box::new(RecorderOp { log: log.clone() }))],
            error_policy: FrameErrorPolicy::Skip,
            debug: false,
        })
        .unwrap();

        let summary = animation.run().unwrap();
        assert_eq!(summary.skipped_frames, vec![0]);
        assert_eq!(summary.frames_evaluated, 11);
        assert_eq!(*log.borrow(), (1..12).collect::<Vec<u32>>());
        assert_eq!(animation.op_timings[0].update_call_count, 11);
    }

    #[test]
    fn test_abort_policy_returns_error() {
        let mut animation = Animation::new(AnimationProps {
            name: "abort",
            dyke: small_props(),
            ops: vec![],
            error_policy: FrameErrorPolicy::Abort,
            debug: false,
        })
        .unwrap();

        let err = animation.run().unwrap_err();
        assert!(matches!(err, DykeError::InvalidFrameIndex { frame: 0, .. }));
    }

    #[test]
    fn test_invalid_props_rejected_up_front() {
        let mut dyke = small_props();
        dyke.half_width_m = -1.0;
        let result = Animation::new(AnimationProps {
            name: "bad",
            dyke,
            ops: vec![],
            error_policy: FrameErrorPolicy::Skip,
            debug: false,
        });
        assert!(matches!(result, Err(DykeError::InvalidProps(_))));
    }

    #[test]
    fn test_op_timing_average() {
        let mut timing = OpTiming::new("x".to_string());
        assert_eq!(timing.avg_update_time(), Duration::ZERO);
        timing.total_update_time = Duration::from_millis(30);
        timing.update_call_count = 3;
        timing.init_time = Duration::from_millis(5);
        assert_eq!(timing.avg_update_time(), Duration::from_millis(10));
        assert_eq!(timing.total_time(), Duration::from_millis(35));
    }
}
