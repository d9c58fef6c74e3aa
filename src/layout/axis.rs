//! Axis and grid geometry: a domain line, short tick marks and tick labels.

use super::config::NumberFormat;
use super::format::format_value;
use super::text::truncate_to_width;
use super::types::{Anchor, Baseline, Mark, TextMark};
use crate::models::Rgb8;
use crate::scale::{BandScale, LinearScale};

pub const TICK_SIZE: f64 = 6.0;
pub const TICK_PADDING: f64 = 3.0;
pub const TICK_FONT_PX: u32 = 10;

const INK: Rgb8 = Rgb8::new(0, 0, 0);
const GRID: Rgb8 = Rgb8::new(0xE9, 0xE9, 0xE9);
/// Grid lines are dashed: 2 px on, 2 px off.
pub const GRID_DASH: (f64, f64) = (2.0, 2.0);

/// Which side of the plot area an axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Bottom,
    Left,
}

/// Tick position (pixels along the axis) and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub offset: f64,
    pub label: String,
}

/// Round-valued ticks of a linear scale, labelled with `fmt`.
pub fn linear_ticks(
    scale: &LinearScale,
    count: usize,
    fmt: &NumberFormat,
    locale: &str,
) -> Vec<Tick> {
    let step = scale.tick_step(count);
    scale
        .ticks(count)
        .into_iter()
        .map(|v| Tick {
            offset: scale.apply(v),
            label: format_value(fmt, v, step, locale),
        })
        .collect()
}

/// One tick per band, at the band center, labelled with the key.
pub fn band_ticks(scale: &BandScale) -> Vec<Tick> {
    scale
        .keys()
        .iter()
        .filter_map(|k| {
            scale.center(k).ok().map(|offset| Tick {
                offset,
                label: k.clone(),
            })
        })
        .collect()
}

/// Axis line spanning `range` at position `at` (a y for `Bottom`, an x for `Left`),
/// plus tick marks and labels. Left labels longer than `max_label_px` are truncated.
pub fn axis_marks(
    edge: Edge,
    at: f64,
    range: (f64, f64),
    ticks: &[Tick],
    max_label_px: Option<u32>,
) -> Vec<Mark> {
    let mut out = Vec::with_capacity(1 + ticks.len() * 2);
    let (x1, y1, x2, y2) = match edge {
        Edge::Bottom => (range.0, at, range.1, at),
        Edge::Left => (at, range.0, at, range.1),
    };
    out.push(Mark::Line {
        x1,
        y1,
        x2,
        y2,
        stroke: INK,
        stroke_width: 1.0,
        dash: None,
    });

    for tick in ticks {
        let label = match max_label_px {
            Some(px) => truncate_to_width(&tick.label, TICK_FONT_PX, px),
            None => tick.label.clone(),
        };
        match edge {
            Edge::Bottom => {
                out.push(Mark::Line {
                    x1: tick.offset,
                    y1: at,
                    x2: tick.offset,
                    y2: at + TICK_SIZE,
                    stroke: INK,
                    stroke_width: 1.0,
                    dash: None,
                });
                out.push(Mark::Text(
                    TextMark::new(tick.offset, at + TICK_SIZE + TICK_PADDING, label, TICK_FONT_PX)
                        .anchor(Anchor::Middle)
                        .baseline(Baseline::Hanging)
                        .fill(INK),
                ));
            }
            Edge::Left => {
                out.push(Mark::Line {
                    x1: at - TICK_SIZE,
                    y1: tick.offset,
                    x2: at,
                    y2: tick.offset,
                    stroke: INK,
                    stroke_width: 1.0,
                    dash: None,
                });
                out.push(Mark::Text(
                    TextMark::new(at - TICK_SIZE - TICK_PADDING, tick.offset, label, TICK_FONT_PX)
                        .anchor(Anchor::End)
                        .baseline(Baseline::Middle)
                        .fill(INK),
                ));
            }
        }
    }
    out
}

/// Light lines across the plot area at every tick. `span` is the extent
/// perpendicular to the axis (y range for `Bottom`, x range for `Left`).
pub fn grid_marks(edge: Edge, ticks: &[Tick], span: (f64, f64)) -> Vec<Mark> {
    ticks
        .iter()
        .map(|t| {
            let (x1, y1, x2, y2) = match edge {
                Edge::Bottom => (t.offset, span.0, t.offset, span.1),
                Edge::Left => (span.0, t.offset, span.1, t.offset),
            };
            Mark::Line {
                x1,
                y1,
                x2,
                y2,
                stroke: GRID,
                stroke_width: 1.0,
                dash: Some(GRID_DASH),
            }
        })
        .collect()
}
