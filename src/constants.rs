// Physical defaults for a basaltic dyke cooling in crustal country rock

pub const AMBIENT_TEMP_C: f64 = 100.0; // country rock temperature
pub const INTRUSION_TEMP_C: f64 = 1400.0; // magma temperature at emplacement
pub const DYKE_HALF_WIDTH_M: f64 = 500.0; // full width is 2D
pub const THERMAL_DIFFUSIVITY_M2_S: f64 = 1.25e-6;
pub const SECONDS_PER_MYR: f64 = 3.16e13;

// default animation settings:
pub const TIME_STEP_MYR: f64 = 0.000005; // 5 years per frame
pub const FRAME_COUNT: u32 = 4000;
pub const COLOR_SCALE_MAX_MYR: f64 = 0.01; // time mapped to the end of the gradient
pub const SAMPLE_COUNT: usize = 100;
pub const MAX_DISTANCE_D: f64 = 5.0; // samples span [0, 5D]

/// Dimensionless time used for the "t ≈ 0" reference profile.
/// Small enough that the profile is a sharp step at x = 1.
pub const REFERENCE_TIME: f64 = 1e-6;

pub const KYR_PER_MYR: f64 = 1000.0;
