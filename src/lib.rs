pub mod animation;
pub mod color;
pub mod constants;
pub mod dyke_props;
pub mod error;
pub mod math_utils;
pub mod render;
pub mod thermal_field;

pub use dyke_props::{AnimationProps, DykeProps};
pub use error::DykeError;
pub use thermal_field::{DykeEvaluator, FrameState, FrameTime};
