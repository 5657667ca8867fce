pub mod font;
pub mod plot;

pub use plot::{PlotArea, PlotStyle, ticks};

use crate::error::DykeError;
use crate::thermal_field::FrameState;
use font::{FONT_HEIGHT, draw_text, draw_text_vertical, text_width};
use glam::DVec2;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::path::Path;

/// Rasterise one evaluated frame: axes, reference curve, current curve, stamps.
pub fn render_frame(state: &FrameState<'_>, style: &PlotStyle) -> RgbImage {
    let mut image = RgbImage::from_pixel(style.width, style.height, Rgb(style.background));
    let area = style.plot_area();

    draw_axes(&mut image, &area, style);
    draw_curve(&mut image, &area, state.reference_points(), Rgb(style.reference_color), style.line_width);
    draw_curve(&mut image, &area, state.points(), state.color, style.line_width);

    let fg = Rgb(style.foreground);
    for (text, at) in [
        (&state.time_label, style.time_stamp_at),
        (&state.half_width_label, style.half_width_stamp_at),
    ] {
        let px = area.to_pixel(DVec2::new(at.0, at.1));
        draw_text(&mut image, px.x as i32, px.y as i32, text, style.text_scale, fg);
    }

    image
}

/// Render `state` and write it as an image; the format follows the extension.
pub fn save_frame<P: AsRef<Path>>(state: &FrameState<'_>, style: &PlotStyle, path: P) -> Result<(), DykeError> {
    render_frame(state, style).save(path)?;
    Ok(())
}

fn draw_axes(image: &mut RgbImage, area: &PlotArea, style: &PlotStyle) {
    let fg = Rgb(style.foreground);
    let size = area.size();
    let left = area.min_px.x as i32;
    let top = area.min_px.y as i32;
    let bottom = area.max_px.y as i32;
    draw_hollow_rect_mut(
        image,
        Rect::at(left, top).of_size(size.x as u32 + 1, size.y as u32 + 1),
        fg,
    );

    let tick_len = style.tick_len as f32;
    let tick_scale = style.tick_text_scale;
    let glyph_h = (FONT_HEIGHT * tick_scale) as i32;

    let (x0, x1) = style.x_range;
    for x in ticks(x0.min(x1), x0.max(x1), style.x_tick_step) {
        let px = area.to_pixel(DVec2::new(x, 0.0)).x as f32;
        draw_line_segment_mut(image, (px, bottom as f32), (px, bottom as f32 + tick_len), fg);
        let label = format!("{:.0}", x);
        let w = text_width(&label, tick_scale) as i32;
        draw_text(image, px as i32 - w / 2, bottom + style.tick_len as i32 + 4, &label, tick_scale, fg);
    }

    let (y0, y1) = style.y_range;
    for y in ticks(y0.min(y1), y0.max(y1), style.y_tick_step) {
        let py = area.to_pixel(DVec2::new(0.0, y)).y as f32;
        draw_line_segment_mut(image, (left as f32 - tick_len, py), (left as f32, py), fg);
        let label = format!("{:.0}", y);
        let w = text_width(&label, tick_scale) as i32;
        draw_text(
            image,
            left - style.tick_len as i32 - 4 - w,
            py as i32 - glyph_h / 2,
            &label,
            tick_scale,
            fg,
        );
    }

    let scale = style.tick_text_scale;
    let x_label_w = text_width(&style.x_label, scale) as i32;
    let center_x = (area.min_px.x + size.x / 2.0) as i32;
    draw_text(
        image,
        center_x - x_label_w / 2,
        bottom + style.tick_len as i32 + 4 + glyph_h + 12,
        &style.x_label,
        scale,
        fg,
    );

    let y_label_h = text_width(&style.y_label, scale) as i32;
    let center_y = (area.min_px.y + size.y / 2.0) as i32;
    draw_text_vertical(image, 8, center_y + y_label_h / 2, &style.y_label, scale, fg);
}

fn draw_curve(
    image: &mut RgbImage,
    area: &PlotArea,
    points: impl Iterator<Item = (f64, f64)>,
    color: Rgb<u8>,
    line_width: u32,
) {
    let pixels: Vec<DVec2> = points
        .map(|(x, y)| area.to_pixel(area.clip(DVec2::new(x, y))))
        .collect();
    let half = (line_width.max(1) as i32 - 1) / 2;

    for pair in pixels.windows(2) {
        let (a, b) = (pair[0].as_vec2(), pair[1].as_vec2());
        for offset in -half..=half {
            let o = offset as f32;
            draw_line_segment_mut(image, (a.x, a.y + o), (b.x, b.y + o), color);
            draw_line_segment_mut(image, (a.x + o, a.y), (b.x + o, b.y), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dyke_props::DykeProps;
    use crate::thermal_field::DykeEvaluator;

    fn any_near(image: &RgbImage, center: DVec2, radius: i32, color: Rgb<u8>) -> bool {
        let (cx, cy) = (center.x as i32, center.y as i32);
        (-radius..=radius).any(|dx| {
            (-radius..=radius).any(|dy| {
                let (x, y) = (cx + dx, cy + dy);
                x >= 0
                    && y >= 0
                    && (x as u32) < image.width()
                    && (y as u32) < image.height()
                    && *image.get_pixel(x as u32, y as u32) == color
            })
        })
    }

    #[test]
    fn test_frame_has_configured_size() {
        let ev = DykeEvaluator::new(DykeProps::default()).unwrap();
        let state = ev.evaluate(1).unwrap();
        let image = render_frame(&state, &PlotStyle::default());
        assert_eq!(image.dimensions(), (700, 500));
    }

    #[test]
    fn test_curves_are_drawn_in_their_colors() {
        let ev = DykeEvaluator::new(DykeProps::default()).unwrap();
        let state = ev.evaluate(3999).unwrap();
        let style = PlotStyle::default();
        let area = style.plot_area();
        let image = render_frame(&state, &style);

        // reference profile is flat at T0 far from the dyke
        let reference_px = area.to_pixel(DVec2::new(3.5, 100.0));
        assert!(any_near(&image, reference_px, 2, Rgb([0, 0, 0])));

        // late frame: the heated halo lifts the curve well above T0
        let sample = 70;
        let current_px = area.to_pixel(DVec2::new(state.distances[sample], state.temperatures[sample]));
        assert!(state.temperatures[sample] > 200.0);
        assert!(any_near(&image, current_px, 2, state.color));
        assert!(!any_near(&image, reference_px, 2, state.color));
    }

    #[test]
    fn test_background_outside_axes() {
        let ev = DykeEvaluator::new(DykeProps::default()).unwrap();
        let state = ev.evaluate(10).unwrap();
        let style = PlotStyle::default();
        let image = render_frame(&state, &style);
        assert_eq!(*image.get_pixel(699, 0), Rgb(style.background));
    }
}
