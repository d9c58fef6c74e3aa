//! Chart configuration shared by every chart kind.

use crate::error::{ChartError, Result};
use crate::models::Rgb8;
use serde::{Deserialize, Serialize};

/// Okabe–Ito orange.
pub const ORANGE: Rgb8 = Rgb8::new(0xD5, 0x5E, 0x00);
/// Okabe–Ito blue.
pub const BLUE: Rgb8 = Rgb8::new(0x00, 0x72, 0xB2);

/// Colorblind-safe series palette (Okabe–Ito), orange and blue first.
pub const DEFAULT_PALETTE: [Rgb8; 7] = [
    ORANGE,
    BLUE,
    Rgb8::new(0x00, 0x9E, 0x73), // bluish green
    Rgb8::new(0xE6, 0x9F, 0x00), // orange-yellow
    Rgb8::new(0x56, 0xB4, 0xE9), // sky blue
    Rgb8::new(0xCC, 0x79, 0xA7), // reddish purple
    Rgb8::new(0xF0, 0xE4, 0x42), // yellow
];

/// Outer margins in pixels, between the SVG edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(40.0, 30.0, 50.0, 60.0)
    }
}

/// Direction bars grow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Categories along x, bars grow upward.
    Vertical,
    /// Categories along y, bars grow rightward.
    Horizontal,
}

/// What the title and subtitle are centered on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleAlign {
    /// Middle of the plot area.
    #[default]
    Plot,
    /// Middle of the whole canvas, margins included.
    Canvas,
}

/// How numbers are printed on ticks and value labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Fixed decimals; `None` derives the precision from the tick step.
    pub decimals: Option<usize>,
    /// Appended verbatim, e.g. `"%"`.
    pub suffix: String,
    /// Thousands separators (per `ChartConfig::locale`).
    pub grouping: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimals: None,
            suffix: String::new(),
            grouping: true,
        }
    }
}

impl NumberFormat {
    pub fn fixed(decimals: usize) -> Self {
        Self {
            decimals: Some(decimals),
            ..Self::default()
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn without_grouping(mut self) -> Self {
        self.grouping = false;
        self
    }
}

/// Recognized options of the chart-geometry builder. Every field has a default
/// so a request only spells out what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Total width of the output, margins included.
    pub width: u32,
    /// Total height of the output, margins included.
    pub height: u32,
    pub margins: Margins,
    /// `None` picks the kind's natural orientation.
    pub orientation: Option<Orientation>,
    pub x_domain: Option<[f64; 2]>,
    pub y_domain: Option<[f64; 2]>,
    /// Added below and above a derived (not explicit) line-chart y extent.
    pub domain_pad: f64,
    /// Band padding of category scales.
    pub padding: f64,
    /// Band padding of the subgroup scale inside each group (grouped bars).
    pub inner_padding: f64,
    /// Approximate number of ticks on linear axes.
    pub ticks: usize,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub title_align: TitleAlign,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub x_format: NumberFormat,
    pub y_format: NumberFormat,
    /// Print each bar's / point's value next to it.
    pub value_labels: Option<NumberFormat>,
    /// Label category ticks with each bar's `label` instead of its key, when it has one.
    pub describe_categories: bool,
    pub colors: Vec<Rgb8>,
    pub background: Option<Rgb8>,
    /// Vertical gap between facets.
    pub facet_gap: f64,
    /// Light grid lines at every tick.
    pub grid: bool,
    /// Locale tag for thousands separators: `en`, `de`, `fr`, …
    pub locale: String,
    pub point_radius: f64,
    pub line_width: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            margins: Margins::default(),
            orientation: None,
            x_domain: None,
            y_domain: None,
            domain_pad: 0.0,
            padding: 0.2,
            inner_padding: 0.05,
            ticks: 10,
            title: None,
            subtitle: None,
            title_align: TitleAlign::Plot,
            x_label: None,
            y_label: None,
            x_format: NumberFormat::default(),
            y_format: NumberFormat::default(),
            value_labels: None,
            describe_categories: false,
            colors: DEFAULT_PALETTE.to_vec(),
            background: None,
            facet_gap: 40.0,
            grid: false,
            locale: "en".into(),
            point_radius: 4.0,
            line_width: 2.0,
        }
    }
}

/// Inner drawing rectangle, in absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

impl ChartConfig {
    /// Size minus margins. Fails when nothing is left to draw in.
    pub fn plot_area(&self) -> Result<PlotArea> {
        let m = &self.margins;
        let width = self.width as f64 - m.left - m.right;
        let height = self.height as f64 - m.top - m.bottom;
        if !(width > 0.0 && height > 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "margins leave no plot area in a {}x{} chart",
                self.width, self.height
            )));
        }
        Ok(PlotArea {
            left: m.left,
            top: m.top,
            width,
            height,
        })
    }

    /// Checks the options that do not depend on the data.
    pub fn validate(&self) -> Result<PlotArea> {
        if !(0.0..1.0).contains(&self.padding) {
            return Err(ChartError::InvalidPadding(self.padding));
        }
        if !(0.0..1.0).contains(&self.inner_padding) {
            return Err(ChartError::InvalidPadding(self.inner_padding));
        }
        if self.colors.is_empty() {
            return Err(ChartError::InvalidConfig("color palette is empty".into()));
        }
        if self.ticks == 0 {
            return Err(ChartError::InvalidConfig("tick count must be positive".into()));
        }
        self.plot_area()
    }

    /// Palette color for the `i`-th series, cycling.
    pub fn color(&self, i: usize) -> Rgb8 {
        self.colors
            .get(i % self.colors.len().max(1))
            .copied()
            .unwrap_or(ORANGE)
    }

    pub fn orientation_or(&self, natural: Orientation) -> Orientation {
        self.orientation.unwrap_or(natural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_area_subtracts_margins() {
        let cfg = ChartConfig {
            width: 480,
            height: 400,
            margins: Margins::new(40.0, 30.0, 50.0, 60.0),
            ..ChartConfig::default()
        };
        let a = cfg.plot_area().unwrap();
        assert_eq!((a.width, a.height), (390.0, 310.0));
        assert_eq!((a.left, a.top), (60.0, 40.0));
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let cfg = ChartConfig {
            width: 80,
            ..ChartConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ChartError::InvalidConfig(_))));
    }

    #[test]
    fn paddings_must_be_fractions() {
        let outer = ChartConfig {
            padding: 1.0,
            ..ChartConfig::default()
        };
        assert!(matches!(outer.validate(), Err(ChartError::InvalidPadding(p)) if p == 1.0));
        let inner = ChartConfig {
            inner_padding: -0.1,
            ..ChartConfig::default()
        };
        assert!(matches!(inner.validate(), Err(ChartError::InvalidPadding(_))));
    }

    #[test]
    fn zero_ticks_and_empty_palette_are_rejected() {
        let no_ticks = ChartConfig {
            ticks: 0,
            ..ChartConfig::default()
        };
        assert!(matches!(no_ticks.validate(), Err(ChartError::InvalidConfig(_))));
        let no_colors = ChartConfig {
            colors: Vec::new(),
            ..ChartConfig::default()
        };
        assert!(matches!(no_colors.validate(), Err(ChartError::InvalidConfig(_))));
        assert!(ChartConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ChartConfig =
            serde_json::from_str(r##"{"height": 250, "colors": ["#0072B2"]}"##).unwrap();
        assert_eq!(cfg.height, 250);
        assert_eq!(cfg.width, 600);
        assert_eq!(cfg.color(3), BLUE);
        assert_eq!(cfg.padding, 0.2);
        assert_eq!(cfg.title_align, TitleAlign::Plot);
        assert!(!cfg.describe_categories);
    }
}
