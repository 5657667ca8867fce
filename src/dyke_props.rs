// src/dyke_props.rs - Physical and animation parameters for the dyke model

use crate::constants::{
    AMBIENT_TEMP_C, COLOR_SCALE_MAX_MYR, DYKE_HALF_WIDTH_M, FRAME_COUNT, INTRUSION_TEMP_C,
    MAX_DISTANCE_D, REFERENCE_TIME, SAMPLE_COUNT, SECONDS_PER_MYR, THERMAL_DIFFUSIVITY_M2_S,
    TIME_STEP_MYR,
};
use crate::error::DykeError;
use crate::math_utils::erf;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Physical description of the intrusion and its host rock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DykeProps {
    /// Country rock temperature T0 in °C
    pub ambient_temp_c: f64,
    /// Magma temperature Ti at emplacement in °C
    pub intrusion_temp_c: f64,
    /// Half-width D of the dyke in meters
    pub half_width_m: f64,
    /// Thermal diffusivity κ in m²/s
    pub diffusivity_m2_s: f64,
    pub seconds_per_myr: f64,
    pub animation: AnimationProps,
}

/// Time, sampling and color parameterisation of the animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationProps {
    /// Simulated time advanced per frame, in Myr
    pub time_step_myr: f64,
    pub frame_count: u32,
    /// Elapsed time (Myr) that maps to the end of the color gradient
    pub color_scale_max_myr: f64,
    pub sample_count: usize,
    /// Furthest sample, in units of the half-width
    pub max_distance: f64,
    /// Dimensionless time of the reference ("t ≈ 0") profile
    pub reference_time: f64,
}

impl Default for DykeProps {
    fn default() -> Self {
        Self {
            ambient_temp_c: AMBIENT_TEMP_C,
            intrusion_temp_c: INTRUSION_TEMP_C,
            half_width_m: DYKE_HALF_WIDTH_M,
            diffusivity_m2_s: THERMAL_DIFFUSIVITY_M2_S,
            seconds_per_myr: SECONDS_PER_MYR,
            animation: AnimationProps::default(),
        }
    }
}

impl Default for AnimationProps {
    fn default() -> Self {
        Self {
            time_step_myr: TIME_STEP_MYR,
            frame_count: FRAME_COUNT,
            color_scale_max_myr: COLOR_SCALE_MAX_MYR,
            sample_count: SAMPLE_COUNT,
            max_distance: MAX_DISTANCE_D,
            reference_time: REFERENCE_TIME,
        }
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), DykeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DykeError::InvalidProps(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

fn require_finite(name: &str, value: f64) -> Result<(), DykeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DykeError::InvalidProps(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

impl DykeProps {
    /// Load props from a JSON file; missing fields fall back to the defaults.
    pub fn load_json<P: AsRef<Path>>(file_path: P) -> Result<Self, DykeError> {
        let json_str = fs::read_to_string(file_path.as_ref())?;
        Self::from_json_str(&json_str)
    }

    pub fn from_json_str(json_str: &str) -> Result<Self, DykeError> {
        let props: DykeProps = serde_json::from_str(json_str)?;
        props.validate()?;
        Ok(props)
    }

    pub fn to_json_string(&self) -> Result<String, DykeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject parameter sets that cannot yield a finite temperature field.
    pub fn validate(&self) -> Result<(), DykeError> {
        require_finite("ambient_temp_c", self.ambient_temp_c)?;
        require_finite("intrusion_temp_c", self.intrusion_temp_c)?;
        require_positive("half_width_m", self.half_width_m)?;
        require_positive("diffusivity_m2_s", self.diffusivity_m2_s)?;
        require_positive("seconds_per_myr", self.seconds_per_myr)?;
        self.animation.validate()
    }

    /// Ti − T0
    pub fn temp_contrast(&self) -> f64 {
        self.intrusion_temp_c - self.ambient_temp_c
    }

    /// Coolest and hottest temperatures the field can ever take.
    pub fn temp_bounds(&self) -> (f64, f64) {
        (
            self.ambient_temp_c.min(self.intrusion_temp_c),
            self.ambient_temp_c.max(self.intrusion_temp_c),
        )
    }

    /// Dimensionless time t = κ·time / D² for a physical time in seconds.
    pub fn dimensionless_time(&self, time_s: f64) -> f64 {
        (time_s * self.diffusivity_m2_s) / (self.half_width_m * self.half_width_m)
    }

    /// Closed-form temperature at dimensionless distance `x` and time `t`:
    ///
    /// T = T0 + (ΔT/2)·[erf((1+x)/(2√t)) + erf((1−x)/(2√t))]
    ///
    /// `t` must be positive; at t = 0 the contact x = ±1 evaluates to NaN.
    pub fn temperature_at(&self, x: f64, t: f64) -> f64 {
        let denom = 2.0 * t.sqrt();
        self.ambient_temp_c
            + (self.temp_contrast() / 2.0) * (erf((1.0 + x) / denom) + erf((1.0 - x) / denom))
    }

    pub fn profile(&self, xs: &[f64], t: f64) -> Vec<f64> {
        xs.iter().map(|&x| self.temperature_at(x, t)).collect()
    }

    pub fn half_width_label(&self) -> String {
        format!("half-width,D={:.0} m", self.half_width_m)
    }
}

impl AnimationProps {
    pub fn validate(&self) -> Result<(), DykeError> {
        require_positive("time_step_myr", self.time_step_myr)?;
        require_positive("color_scale_max_myr", self.color_scale_max_myr)?;
        require_positive("max_distance", self.max_distance)?;
        require_positive("reference_time", self.reference_time)?;
        if self.frame_count == 0 {
            return Err(DykeError::InvalidProps(
                "frame_count must be at least 1".to_string(),
            ));
        }
        if self.sample_count < 2 {
            return Err(DykeError::InvalidProps(format!(
                "sample_count must be at least 2, got {}",
                self.sample_count
            )));
        }
        Ok(())
    }

    pub fn time_myr(&self, frame: u32) -> f64 {
        self.time_step_myr * frame as f64
    }

    /// Total simulated time covered by the animation, in Myr.
    pub fn duration_myr(&self) -> f64 {
        self.time_myr(self.frame_count.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_default_values() {
        let props = DykeProps::default();
        assert_eq!(props.ambient_temp_c, 100.0);
        assert_eq!(props.intrusion_temp_c, 1400.0);
        assert_eq!(props.half_width_m, 500.0);
        assert_eq!(props.diffusivity_m2_s, 1.25e-6);
        assert_eq!(props.seconds_per_myr, 3.16e13);
        assert_eq!(props.animation.time_step_myr, 0.000005);
        assert_eq!(props.animation.frame_count, 4000);
        assert_eq!(props.animation.color_scale_max_myr, 0.01);
        assert_eq!(props.animation.sample_count, 100);
        assert_eq!(props.animation.max_distance, 5.0);
        assert_eq!(props.animation.reference_time, 1e-6);
        assert!(props.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{ "half_width_m": 250.0, "animation": { "frame_count": 10 } }"#;
        let props = DykeProps::from_json_str(json).unwrap();
        assert_eq!(props.half_width_m, 250.0);
        assert_eq!(props.ambient_temp_c, 100.0); // default
        assert_eq!(props.animation.frame_count, 10);
        assert_eq!(props.animation.sample_count, 100); // default
    }

    #[test]
    fn test_json_roundtrip_preserves_props() {
        let mut props = DykeProps::default();
        props.intrusion_temp_c = 1200.0;
        props.animation.color_scale_max_myr = 0.02;

        let json = props.to_json_string().unwrap();
        let parsed = DykeProps::from_json_str(&json).unwrap();
        assert_eq!(parsed, props);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = DykeProps::from_json_str("{ half_width_m: ").unwrap_err();
        assert!(matches!(err, DykeError::Json(_)), "{:?}", err);
    }

    #[test]
    fn test_invalid_props_rejected() {
        let cases: [(&str, fn(&mut DykeProps)); 10] = [
            ("half_width_m", |p: &mut DykeProps| p.half_width_m = 0.0),
            ("diffusivity_m2_s", |p: &mut DykeProps| p.diffusivity_m2_s = -1.0),
            ("seconds_per_myr", |p: &mut DykeProps| p.seconds_per_myr = f64::NAN),
            ("ambient_temp_c", |p: &mut DykeProps| p.ambient_temp_c = f64::INFINITY),
            ("time_step_myr", |p: &mut DykeProps| p.animation.time_step_myr = 0.0),
            ("reference_time", |p: &mut DykeProps| p.animation.reference_time = 0.0),
            ("color_scale_max_myr", |p: &mut DykeProps| p.animation.color_scale_max_myr = -0.01),
            ("max_distance", |p: &mut DykeProps| p.animation.max_distance = 0.0),
            ("sample_count", |p: &mut DykeProps| p.animation.sample_count = 1),
            ("frame_count", |p: &mut DykeProps| p.animation.frame_count = 0),
        ];

        for (field, mutate) in cases {
            let mut props = DykeProps::default();
            mutate(&mut props);
            match props.validate() {
                Err(DykeError::InvalidProps(msg)) => {
                    assert!(msg.contains(field), "message {:?} should name {}", msg, field)
                }
                other => panic!("{} should be rejected, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_dimensionless_time_first_frame() {
        let props = DykeProps::default();
        let time_s = props.animation.time_myr(1) * props.seconds_per_myr;
        assert_relative_eq!(time_s, 1.58e8, max_relative = 1e-12);
        assert_relative_eq!(props.dimensionless_time(time_s), 7.9e-4, max_relative = 1e-12);
    }

    #[test]
    fn test_temperature_at_center_matches_closed_form() {
        let props = DykeProps::default();
        let t = 0.25;
        // at x = 0 both erf terms equal erf(1/(2√t)) = erf(1)
        let expected = 100.0 + 1300.0 * 0.8427007929497149;
        assert_abs_diff_eq!(props.temperature_at(0.0, t), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_contact_is_midpoint_at_early_time() {
        let props = DykeProps::default();
        // erf(1/√t) → 1 and erf(0) = 0, so the contact sits halfway between T0 and Ti
        assert_abs_diff_eq!(props.temperature_at(1.0, 1e-6), 750.0, epsilon = 1e-9);
    }

    #[test]
    fn test_temp_bounds_follow_sign_of_contrast() {
        let mut props = DykeProps::default();
        assert_eq!(props.temp_bounds(), (100.0, 1400.0));
        props.ambient_temp_c = 1500.0;
        assert_eq!(props.temp_bounds(), (1400.0, 1500.0));
        assert!(props.temp_contrast() < 0.0);
    }

    #[test]
    fn test_duration_and_labels() {
        let props = DykeProps::default();
        assert_abs_diff_eq!(props.animation.duration_myr(), 0.019995, epsilon = 1e-12);
        assert_eq!(props.half_width_label(), "half-width,D=500 m");
    }
}
