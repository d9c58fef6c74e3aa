//! Conversions from layout marks to plotters colors, shape styles and text styles.

use crate::layout::{Anchor, Baseline, TextMark};
use crate::models::Rgb8;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform, TextStyle};

#[inline]
pub fn rgb_color(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Backend pixel coordinate; the SVG backend works on whole pixels.
#[inline]
pub fn px(v: f64) -> i32 {
    v.round() as i32
}

/// Filled style for bars and dots.
pub fn fill_style(c: Rgb8) -> ShapeStyle {
    rgb_color(c).filled()
}

/// Stroke style for lines. Plotters strokes whole pixels, so widths are rounded
/// (2.5 draws as 3) and never drop below one pixel. Geometry JSON keeps the exact width.
pub fn line_style(c: Rgb8, width: f64) -> ShapeStyle {
    rgb_color(c).stroke_width(width.round().max(1.0) as u32)
}

/// Split a straight line into `(on, off)` dashes, starting with a dash.
/// Returns the whole line when the pattern cannot advance.
pub fn dash_segments(
    from: (f64, f64),
    to: (f64, f64),
    (on, off): (f64, f64),
) -> Vec<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = dx.hypot(dy);
    if !(on > 0.0) || !(off >= 0.0) || !(len > 0.0) || !len.is_finite() {
        return vec![(from, to)];
    }
    let at = |d: f64| (from.0 + dx * d / len, from.1 + dy * d / len);
    let mut out = Vec::new();
    let mut start = 0.0;
    while start < len {
        let end = (start + on).min(len);
        out.push((at(start), at(end)));
        start = end + off;
    }
    out
}

fn h_pos(anchor: Anchor) -> HPos {
    match anchor {
        Anchor::Start => HPos::Left,
        Anchor::Middle => HPos::Center,
        Anchor::End => HPos::Right,
    }
}

fn v_pos(baseline: Baseline) -> VPos {
    match baseline {
        Baseline::Hanging => VPos::Top,
        Baseline::Middle => VPos::Center,
        Baseline::Alphabetic => VPos::Bottom,
    }
}

/// Sans-serif text style honoring size, weight, alignment and rotation.
pub fn text_style(t: &TextMark) -> TextStyle<'static> {
    let weight = if t.bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    let mut font = FontDesc::new(FontFamily::SansSerif, t.size as f64, weight);
    if t.vertical {
        font = font.transform(FontTransform::Rotate270);
    }
    font.color(&rgb_color(t.fill))
        .pos(Pos::new(h_pos(t.anchor), v_pos(t.baseline)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_to_backend_pixels() {
        assert_eq!(px(10.4), 10);
        assert_eq!(px(10.5), 11);
        assert_eq!(px(-0.6), -1);
    }

    #[test]
    fn dashes_cover_the_line() {
        let d = dash_segments((0.0, 5.0), (9.0, 5.0), (2.0, 2.0));
        assert_eq!(d.len(), 3);
        assert_eq!(d[0], ((0.0, 5.0), (2.0, 5.0)));
        assert_eq!(d[2], ((8.0, 5.0), (9.0, 5.0)));

        let solid = dash_segments((0.0, 0.0), (0.0, 10.0), (0.0, 2.0));
        assert_eq!(solid, vec![((0.0, 0.0), (0.0, 10.0))]);
    }

    #[test]
    fn colors_keep_channels() {
        let c = rgb_color(Rgb8::new(0xD5, 0x5E, 0x00));
        assert_eq!((c.0, c.1, c.2), (0xD5, 0x5E, 0x00));
    }
}
