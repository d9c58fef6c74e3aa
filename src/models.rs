use crate::layout::ChartConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One observation in the plane. Input to regression and to scatter/line charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One bar: a category key with a value. `label` is an optional long description;
/// the axis shows the key unless `ChartConfig::describe_categories` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub category: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CategoryValue {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            value,
            label: None,
        }
    }
}

/// One group of a grouped bar chart; `values[i]` belongs to `GroupedBars::subgroups[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    pub group: String,
    pub values: Vec<f64>,
}

/// Data of a grouped bar chart (e.g. one group per year, one bar per measure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedBars {
    pub subgroups: Vec<String>,
    pub rows: Vec<GroupRow>,
}

/// A named line of a multi-series line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb8>,
    pub points: Vec<Point>,
}

/// One panel of a faceted bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb8>,
    pub bars: Vec<CategoryValue>,
}

/// Chart kind plus its dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    GroupedBar(GroupedBars),
    Line {
        series: Vec<Series>,
    },
    Bar {
        bars: Vec<CategoryValue>,
    },
    Faceted {
        facets: Vec<Facet>,
    },
    Scatter {
        points: Vec<Point>,
        /// Annotate the panel with `r`, `t` and `df`.
        #[serde(default)]
        show_stats: bool,
    },
}

impl ChartData {
    /// The `kind` tag as it appears in request files.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ChartData::GroupedBar(_) => "grouped_bar",
            ChartData::Line { .. } => "line",
            ChartData::Bar { .. } => "bar",
            ChartData::Faceted { .. } => "faceted",
            ChartData::Scatter { .. } => "scatter",
        }
    }
}

/// A complete, self-describing chart: configuration plus data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    #[serde(default)]
    pub config: ChartConfig,
    #[serde(flatten)]
    pub data: ChartData,
}

/// 8-bit RGB color, (de)serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb8 {
    type Err = String;

    /// Accepts `#rrggbb`, `rrggbb` and the short `#rgb` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(format!("invalid color {s:?}, expected #rrggbb"));
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(format!("invalid color {s:?}, expected #rrggbb")),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| format!("invalid color {s:?}, expected #rrggbb"))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = Rgb8;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a hex color string like \"#D55E00\"")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                s.parse::<Rgb8>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}
