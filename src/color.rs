use image::Rgb;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Continuous gradients used to tint the evolving temperature curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMap {
    /// Purple -> blue -> cyan -> green -> yellow -> red.
    Rainbow,
    /// Red at 0, purple at 1: early frames glow hot, late frames cool off.
    RainbowReversed,
}

impl ColorMap {
    /// Normalized (r, g, b) in [0, 1] for `fraction`.
    ///
    /// `fraction` is clamped to [0, 1] first, so values past the color
    /// normalization constant hold the end color. NaN maps to the start.
    pub fn rgb_unit(&self, fraction: f64) -> (f64, f64, f64) {
        let f = clamp_fraction(fraction);
        let f = match self {
            ColorMap::Rainbow => f,
            ColorMap::RainbowReversed => 1.0 - f,
        };
        rainbow(f)
    }

    pub fn rgb(&self, fraction: f64) -> Rgb<u8> {
        let (r, g, b) = self.rgb_unit(fraction);
        Rgb([to_channel(r), to_channel(g), to_channel(b)])
    }
}

/// Clamp a color fraction into [0, 1]; NaN becomes 0.
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

fn rainbow(f: f64) -> (f64, f64, f64) {
    let r = (2.0 * f - 0.5).abs();
    let g = (PI * f).sin();
    let b = (PI * f / 2.0).cos();
    (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round() as u8
}
