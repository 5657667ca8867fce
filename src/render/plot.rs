use crate::math_utils::remap;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Figure layout and styling. Defaults reproduce a 7×5 inch figure at 100 dpi
/// with the temperature axis spanning 0–1400 °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_tick_step: f64,
    pub y_tick_step: f64,
    pub tick_len: u32,
    /// Curve thickness in pixels
    pub line_width: u32,
    /// Pixel size of one bitmap-font dot for stamps and axis labels
    pub text_scale: u32,
    pub tick_text_scale: u32,
    pub background: [u8; 3],
    pub foreground: [u8; 3],
    pub reference_color: [u8; 3],
    pub x_label: String,
    pub y_label: String,
    /// Data coordinates of the elapsed-time stamp
    pub time_stamp_at: (f64, f64),
    pub half_width_stamp_at: (f64, f64),
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 700,
            height: 500,
            margin_left: 90,
            margin_right: 20,
            margin_top: 20,
            margin_bottom: 70,
            x_range: (0.0, 5.0),
            y_range: (0.0, 1400.0),
            x_tick_step: 1.0,
            y_tick_step: 200.0,
            tick_len: 6,
            line_width: 3,
            text_scale: 3,
            tick_text_scale: 2,
            background: [255, 255, 255],
            foreground: [0, 0, 0],
            reference_color: [0, 0, 0],
            x_label: "Dimensionless Distance [D]".to_string(),
            y_label: "Temperature [C]".to_string(),
            time_stamp_at: (2.0, 1200.0),
            half_width_stamp_at: (2.0, 1000.0),
        }
    }
}

impl PlotStyle {
    pub fn plot_area(&self) -> PlotArea {
        let left = self.margin_left as f64;
        let top = self.margin_top as f64;
        let right = self.width.saturating_sub(self.margin_right) as f64;
        let bottom = self.height.saturating_sub(self.margin_bottom) as f64;
        PlotArea {
            min_px: DVec2::new(left, top),
            max_px: DVec2::new(right.max(left + 1.0), bottom.max(top + 1.0)),
            x_range: self.x_range,
            y_range: self.y_range,
        }
    }
}

/// Data-to-pixel transform for the axes box. Pixel y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub min_px: DVec2,
    pub max_px: DVec2,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl PlotArea {
    pub fn to_pixel(&self, data: DVec2) -> DVec2 {
        DVec2::new(
            remap(data.x, self.x_range.0, self.x_range.1, self.min_px.x, self.max_px.x),
            remap(data.y, self.y_range.0, self.y_range.1, self.max_px.y, self.min_px.y),
        )
    }

    /// Pull a data point onto the axes box so curves never leave the plot.
    pub fn clip(&self, data: DVec2) -> DVec2 {
        let (x0, x1) = ordered(self.x_range);
        let (y0, y1) = ordered(self.y_range);
        DVec2::new(data.x.clamp(x0, x1), data.y.clamp(y0, y1))
    }

    pub fn size(&self) -> DVec2 {
        self.max_px - self.min_px
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Tick positions from `min` to `max` inclusive, stepping by `step`.
pub fn ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || max < min {
        return Vec::new();
    }
    let count = ((max - min) / step + 1e-9).floor() as usize;
    (0..=count).map(|i| min + step * i as f64).collect()
}
