//! Closed-form temperature field around a cooling dyke.
//!
//! A dyke of half-width D at temperature Ti is emplaced instantaneously in
//! country rock at T0. Conduction in the direction normal to the dyke walls
//! gives the error-function solution
//!
//!   T(x, t) = T0 + (ΔT/2)·[erf((1+x)/(2√t)) + erf((1−x)/(2√t))]
//!
//! with x the distance from the dyke centre in units of D and t = κ·time / D².
//! [`DykeEvaluator`] maps an animation frame index to that profile over a
//! fixed set of sample distances.

use crate::color::{ColorMap, clamp_fraction};
use crate::constants::KYR_PER_MYR;
use crate::dyke_props::DykeProps;
use crate::error::DykeError;
use crate::math_utils::linspace;
use image::Rgb;
use once_cell::unsync::OnceCell;

/// Elapsed time of one frame in the three units the model needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    pub myr: f64,
    pub seconds: f64,
    /// κ·seconds / D²
    pub dimensionless: f64,
}

impl FrameTime {
    pub fn kyr(&self) -> f64 {
        self.myr * KYR_PER_MYR
    }

    pub fn label(&self) -> String {
        format!("time={:.2} kyr", self.kyr())
    }
}

/// Everything needed to draw one animation frame.
///
/// `distances` and `reference` borrow from the evaluator: they are fixed for
/// its lifetime and shared by every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState<'a> {
    pub frame: u32,
    pub time: FrameTime,
    /// Dimensionless distances x from the dyke centre
    pub distances: &'a [f64],
    /// T(x, t) in °C, same order as `distances`
    pub temperatures: Vec<f64>,
    /// T(x, t≈0) in °C
    pub reference: &'a [f64],
    /// Elapsed time over the color normalization constant; exceeds 1 late in the run
    pub color_value: f64,
    /// `color_value` clamped to [0, 1]
    pub color_fraction: f64,
    pub color: Rgb<u8>,
    pub time_label: String,
    pub half_width_label: String,
}

impl FrameState<'_> {
    pub fn sample_count(&self) -> usize {
        self.distances.len()
    }

    /// Temperature at the sample closest to the dyke centre.
    pub fn center_temp(&self) -> f64 {
        self.temperatures.first().copied().unwrap_or(f64::NAN)
    }

    /// (x, T) pairs ready for plotting.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.distances.iter().copied().zip(self.temperatures.iter().copied())
    }

    pub fn reference_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.distances.iter().copied().zip(self.reference.iter().copied())
    }
}

/// Pure per-frame evaluator of the dyke temperature field.
#[derive(Debug)]
pub struct DykeEvaluator {
    props: DykeProps,
    color_map: ColorMap,
    distances: Vec<f64>,
    half_width_label: String,
    reference: OnceCell<Vec<f64>>,
}

impl DykeEvaluator {
    pub fn new(props: DykeProps) -> Result<DykeEvaluator, DykeError> {
        Self::with_color_map(props, ColorMap::RainbowReversed)
    }

    pub fn with_color_map(props: DykeProps, color_map: ColorMap) -> Result<DykeEvaluator, DykeError> {
        props.validate()?;

        // physical distances over [0, max·D], then scaled by D
        let d = props.half_width_m;
        let distances = linspace(0.0, d * props.animation.max_distance, props.animation.sample_count)
            .into_iter()
            .map(|meters| meters / d)
            .collect();
        let half_width_label = props.half_width_label();

        Ok(DykeEvaluator {
            props,
            color_map,
            distances,
            half_width_label,
            reference: OnceCell::new(),
        })
    }

    pub fn props(&self) -> &DykeProps {
        &self.props
    }

    pub fn color_map(&self) -> ColorMap {
        self.color_map
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn frame_count(&self) -> u32 {
        self.props.animation.frame_count
    }

    /// Elapsed time for `frame`; no range checks.
    pub fn frame_time(&self, frame: u32) -> FrameTime {
        let myr = self.props.animation.time_myr(frame);
        let seconds = myr * self.props.seconds_per_myr;
        FrameTime {
            myr,
            seconds,
            dimensionless: self.props.dimensionless_time(seconds),
        }
    }

    /// Profile at the reference time, computed on first use.
    pub fn reference_profile(&self) -> Result<&[f64], DykeError> {
        let reference = self.reference.get_or_try_init(|| {
            let temps = self.props.profile(&self.distances, self.props.animation.reference_time);
            self.check_finite(0, &temps)?;
            Ok::<_, DykeError>(temps)
        })?;
        Ok(reference)
    }

    /// Evaluate the temperature field for `frame`.
    ///
    /// Frame 0 maps to t = 0, where the solution is a discontinuous step
    /// and the contact evaluates to NaN, so it is rejected along with
    /// frames at or past the frame count.
    pub fn evaluate(&self, frame: u32) -> Result<FrameState<'_>, DykeError> {
        if frame >= self.frame_count() {
            return Err(DykeError::invalid_frame(
                frame,
                format!("animation has {} frames", self.frame_count()),
            ));
        }

        let time = self.frame_time(frame);
        if !(time.dimensionless.is_finite() && time.dimensionless > 0.0) {
            return Err(DykeError::invalid_frame(
                frame,
                format!("dimensionless time must be positive, got {}", time.dimensionless),
            ));
        }

        let temperatures = self.props.profile(&self.distances, time.dimensionless);
        self.check_finite(frame, &temperatures)?;
        let reference = self.reference_profile()?;

        let color_value = time.myr / self.props.animation.color_scale_max_myr;
        let color_fraction = clamp_fraction(color_value);

        Ok(FrameState {
            frame,
            time,
            distances: &self.distances,
            temperatures,
            reference,
            color_value,
            color_fraction,
            color: self.color_map.rgb(color_fraction),
            time_label: time.label(),
            half_width_label: self.half_width_label.clone(),
        })
    }

    fn check_finite(&self, frame: u32, temps: &[f64]) -> Result<(), DykeError> {
        match temps.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(DykeError::NumericDomain {
                frame,
                index,
                x: self.distances[index],
                value: temps[index],
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn evaluator() -> DykeEvaluator {
        DykeEvaluator::new(DykeProps::default()).unwrap()
    }

    #[test]
    fn test_distances_span_five_half_widths() {
        let ev = evaluator();
        let xs = ev.distances();
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.0);
        assert_abs_diff_eq!(xs[99], 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(xs[1], 5.0 / 99.0, epsilon = 1e-12);
    }

    #[test]
    fn test_first_frame_time() {
        let time = evaluator().frame_time(1);
        assert_relative_eq!(time.myr, 0.000005, max_relative = 1e-12);
        assert_relative_eq!(time.seconds, 1.58e8, max_relative = 1e-12);
        assert_relative_eq!(time.dimensionless, 7.9e-4, max_relative = 1e-12);
        assert_eq!(time.label(), "time=0.01 kyr");
    }

    #[test]
    fn test_frame_zero_rejected() {
        let err = evaluator().evaluate(0).unwrap_err();
        assert!(
            matches!(err, DykeError::InvalidFrameIndex { frame: 0, .. }),
            "{:?}",
            err
        );
    }

    #[test]
    fn test_frame_past_end_rejected() {
        let ev = evaluator();
        assert!(ev.evaluate(3999).is_ok());
        let err = ev.evaluate(4000).unwrap_err();
        assert!(matches!(err, DykeError::InvalidFrameIndex { frame: 4000, .. }));
    }

    #[test]
    fn test_lengths_match() {
        let ev = evaluator();
        for frame in [1, 10, 500, 3999] {
            let state = ev.evaluate(frame).unwrap();
            assert_eq!(state.temperatures.len(), state.distances.len());
            assert_eq!(state.reference.len(), state.distances.len());
            assert_eq!(state.points().count(), 100);
        }
    }

    #[test]
    fn test_reference_is_cached() {
        let ev = evaluator();
        let a = ev.evaluate(1).unwrap().reference.as_ptr();
        let b = ev.evaluate(2000).unwrap().reference.as_ptr();
        assert_eq!(a, b);
        assert_eq!(ev.reference_profile().unwrap().as_ptr(), a);
    }

    #[test]
    fn test_reference_is_step() {
        let ev = evaluator();
        let reference = ev.reference_profile().unwrap();
        for (x, temp) in ev.distances().iter().zip(reference) {
            if *x < 0.95 {
                assert_abs_diff_eq!(*temp, 1400.0, epsilon = 1e-6);
            } else if *x > 1.05 {
                assert_abs_diff_eq!(*temp, 100.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_color_value_and_saturation() {
        let ev = evaluator();
        let early = ev.evaluate(1).unwrap();
        assert_relative_eq!(early.color_value, 0.0005, max_relative = 1e-12);
        assert_eq!(early.color_fraction, early.color_value);

        let late = ev.evaluate(3000).unwrap();
        assert!(late.color_value > 1.0);
        assert_eq!(late.color_fraction, 1.0);
        assert_eq!(late.color, ColorMap::RainbowReversed.rgb(1.0));
    }

    #[test]
    fn test_labels() {
        let ev = evaluator();
        let state = ev.evaluate(1000).unwrap();
        assert_eq!(state.time_label, "time=5.00 kyr");
        assert_eq!(state.half_width_label, "half-width,D=500 m");
    }

    #[test]
    fn test_numeric_domain_reported() {
        let ev = evaluator();
        let temps = vec![100.0, f64::NAN, 200.0];
        match ev.check_finite(7, &temps) {
            Err(DykeError::NumericDomain { frame, index, x, value }) => {
                assert_eq!(frame, 7);
                assert_eq!(index, 1);
                assert_eq!(x, ev.distances()[1]);
                assert!(value.is_nan());
            }
            other => panic!("expected NumericDomain, got {:?}", other),
        }
    }

    #[test]
    fn test_underflowing_time_rejected() {
        let mut props = DykeProps::default();
        props.animation.time_step_myr = 1e-320;
        props.diffusivity_m2_s = 1e-300;
        let ev = DykeEvaluator::new(props).unwrap();
        assert!(matches!(
            ev.evaluate(1),
            Err(DykeError::InvalidFrameIndex { frame: 1, .. })
        ));
    }
}
