//! Chart-geometry builder: turns a [`ChartRequest`] into renderer-neutral [`Geometry`].
//!
//! - One configuration type ([`ChartConfig`]) for every chart kind
//! - Kinds: grouped bars, bars (vertical or horizontal), faceted bars, lines, scatter + regression
//! - Axes, tick labels, titles and value labels are positioned here, so renderers only draw

pub mod axis;
pub mod charts;
pub mod config;
pub mod format;
pub mod text;
pub mod types;

pub use config::{
    ChartConfig, DEFAULT_PALETTE, Margins, NumberFormat, Orientation, PlotArea, TitleAlign,
};
pub use types::{Anchor, Baseline, Geometry, Mark, TextMark};

use crate::error::Result;
use crate::models::{ChartData, ChartRequest};

/// Lay out a complete chart request.
pub fn build(request: &ChartRequest) -> Result<Geometry> {
    let cfg = &request.config;
    let geometry = match &request.data {
        ChartData::GroupedBar(data) => charts::grouped_bar(cfg, data),
        ChartData::Line { series } => charts::line(cfg, series),
        ChartData::Bar { bars } => charts::bar(cfg, bars),
        ChartData::Faceted { facets } => charts::faceted(cfg, facets),
        ChartData::Scatter { points, show_stats } => charts::scatter(cfg, points, *show_stats),
    }?;
    log::debug!(
        "built {} chart with {} marks",
        request.data.kind_name(),
        geometry.marks.len()
    );
    Ok(geometry)
}
