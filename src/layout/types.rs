//! Renderer-neutral geometry produced by the chart builders.

use crate::models::Rgb8;
use serde::{Deserialize, Serialize};

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// Anchor is the top of the glyphs.
    Hanging,
    Middle,
    /// Anchor is the alphabetic baseline.
    Alphabetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMark {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: Anchor,
    pub baseline: Baseline,
    pub size: u32,
    #[serde(default)]
    pub bold: bool,
    /// Rotated a quarter turn counter-clockwise (vertical axis titles).
    #[serde(default)]
    pub vertical: bool,
    pub fill: Rgb8,
}

impl TextMark {
    /// Plain, horizontal, regular-weight dark text.
    pub fn new(x: f64, y: f64, text: impl Into<String>, size: u32) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            anchor: Anchor::Start,
            baseline: Baseline::Alphabetic,
            size,
            bold: false,
            vertical: false,
            fill: Rgb8::new(0x33, 0x33, 0x33),
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }

    pub fn fill(mut self, fill: Rgb8) -> Self {
        self.fill = fill;
        self
    }
}

/// One drawable primitive, in absolute pixel coordinates (y grows downward).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mark", rename_all = "snake_case")]
pub enum Mark {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Rgb8,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Rgb8,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Rgb8,
        stroke_width: f64,
        /// `(on, off)` dash lengths in pixels; solid when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dash: Option<(f64, f64)>,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Rgb8,
        stroke_width: f64,
    },
    Text(TextMark),
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb8>,
    pub marks: Vec<Mark>,
}

impl Geometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            marks: Vec::new(),
        }
    }

    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    pub fn rects(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(|m| matches!(m, Mark::Rect { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(|m| matches!(m, Mark::Circle { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Text(t) => Some(t),
            _ => None,
        })
    }
}
