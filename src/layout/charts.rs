//! Per-kind chart builders: data + config in, positioned marks out.

use super::axis::{Edge, axis_marks, band_ticks, grid_marks, linear_ticks};
use super::config::{ChartConfig, Orientation, PlotArea, TitleAlign};
use super::format::format_value;
use super::types::{Anchor, Baseline, Geometry, Mark, TextMark};
use crate::error::{ChartError, Result};
use crate::models::{CategoryValue, Facet, GroupedBars, Point, Rgb8, Series};
use crate::scale::{BandScale, LinearScale, OrdinalScale, Scale};
use crate::stats::{self, Correlation};

const INK: Rgb8 = Rgb8::new(0, 0, 0);
/// Gap between a bar or point and its value label.
const BAR_LABEL_GAP: f64 = 5.0;
const POINT_LABEL_GAP: f64 = 12.0;
/// Half-width of a derived domain whose data holds a single value.
const FLAT_DOMAIN_PAD: f64 = 0.5;
/// Distance of the rotated y-axis title from the left edge.
const Y_TITLE_INSET: f64 = 20.0;

/// Canvas, plot area and accumulated marks for one chart.
struct Frame<'a> {
    cfg: &'a ChartConfig,
    area: PlotArea,
    geometry: Geometry,
}

impl<'a> Frame<'a> {
    fn new(cfg: &'a ChartConfig) -> Result<Self> {
        let area = cfg.validate()?;
        let mut geometry = Geometry::new(cfg.width, cfg.height);
        geometry.background = cfg.background;
        Ok(Self { cfg, area, geometry })
    }

    fn extend(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.geometry.marks.extend(marks);
    }

    fn text(&mut self, text: TextMark) {
        self.geometry.push(Mark::Text(text));
    }

    /// Widest label the left margin can hold next to the tick marks.
    fn left_label_px(&self) -> u32 {
        (self.cfg.margins.left - 12.0).max(0.0) as u32
    }

    fn value_axis(&mut self, orientation: Orientation, scale: &LinearScale) {
        let a = self.area;
        match orientation {
            Orientation::Vertical => {
                let ticks = linear_ticks(scale, self.cfg.ticks, &self.cfg.y_format, &self.cfg.locale);
                if self.cfg.grid {
                    self.extend(grid_marks(Edge::Left, &ticks, (a.left, a.right())));
                }
                self.extend(axis_marks(Edge::Left, a.left, (a.top, a.bottom()), &ticks, None));
            }
            Orientation::Horizontal => {
                let ticks = linear_ticks(scale, self.cfg.ticks, &self.cfg.x_format, &self.cfg.locale);
                if self.cfg.grid {
                    self.extend(grid_marks(Edge::Bottom, &ticks, (a.top, a.bottom())));
                }
                self.extend(axis_marks(Edge::Bottom, a.bottom(), (a.left, a.right()), &ticks, None));
            }
        }
    }

    /// Band axis; with `describe_categories`, ticks of `bars` that carry a
    /// description show it in place of the key.
    fn category_axis(&mut self, orientation: Orientation, scale: &BandScale, bars: &[CategoryValue]) {
        let mut ticks = band_ticks(scale);
        if self.cfg.describe_categories {
            for tick in &mut ticks {
                let label = bars
                    .iter()
                    .find(|b| b.category == tick.label)
                    .and_then(|b| b.label.as_ref());
                if let Some(label) = label {
                    tick.label = label.clone();
                }
            }
        }
        let range = scale.range();
        match orientation {
            Orientation::Vertical => {
                self.extend(axis_marks(Edge::Bottom, self.area.bottom(), range, &ticks, None));
            }
            Orientation::Horizontal => {
                let max_px = Some(self.left_label_px());
                self.extend(axis_marks(Edge::Left, self.area.left, range, &ticks, max_px));
            }
        }
    }

    /// Title, subtitle and axis titles, placed around the plot area.
    fn decorate(&mut self) {
        let cfg = self.cfg;
        let a = self.area;
        let title_x = match cfg.title_align {
            TitleAlign::Plot => a.center_x(),
            TitleAlign::Canvas => f64::from(cfg.width) / 2.0,
        };
        match (&cfg.title, &cfg.subtitle) {
            (Some(title), Some(subtitle)) => {
                self.text(
                    TextMark::new(title_x, a.top - 45.0, title, 16)
                        .anchor(Anchor::Middle)
                        .bold(),
                );
                self.text(
                    TextMark::new(title_x, a.top - 25.0, subtitle, 12).anchor(Anchor::Middle),
                );
            }
            (Some(title), None) => {
                self.text(
                    TextMark::new(title_x, a.top - 15.0, title, 14)
                        .anchor(Anchor::Middle)
                        .bold(),
                );
            }
            (None, Some(subtitle)) => {
                self.text(
                    TextMark::new(title_x, a.top - 15.0, subtitle, 12).anchor(Anchor::Middle),
                );
            }
            (None, None) => {}
        }
        if let Some(label) = &cfg.x_label {
            self.text(
                TextMark::new(a.center_x(), a.bottom() + cfg.margins.bottom - 10.0, label, 12)
                    .anchor(Anchor::Middle),
            );
        }
        if let Some(label) = &cfg.y_label {
            self.text(
                TextMark::new(a.left - cfg.margins.left + Y_TITLE_INSET, a.center_y(), label, 12)
                    .anchor(Anchor::Middle)
                    .baseline(Baseline::Middle)
                    .vertical(),
            );
        }
    }

    fn finish(mut self) -> Geometry {
        self.decorate();
        log::debug!(
            "laid out {} marks in a {}x{} chart",
            self.geometry.marks.len(),
            self.geometry.width,
            self.geometry.height
        );
        self.geometry
    }
}

/// Value domain for bars: explicit, or from zero to the data extreme(s).
fn bar_domain(explicit: Option<[f64; 2]>, values: impl IntoIterator<Item = f64>) -> Result<(f64, f64)> {
    if let Some([lo, hi]) = explicit {
        return Ok((lo, hi));
    }
    let (lo, hi) = stats::extent(values)
        .ok_or_else(|| ChartError::InvalidConfig("no finite bar values".into()))?;
    let (lo, hi) = (lo.min(0.0), hi.max(0.0));
    if lo == hi {
        // Every bar is zero.
        return Ok((0.0, 1.0));
    }
    Ok((lo, hi))
}

/// Rectangle from the zero baseline to `v` inside the band at `band_pos`.
fn bar_rect(
    orientation: Orientation,
    value: &LinearScale,
    band_pos: f64,
    band_width: f64,
    v: f64,
    fill: Rgb8,
) -> Mark {
    let zero = value.apply(0.0);
    let end = value.apply(v);
    match orientation {
        Orientation::Vertical => Mark::Rect {
            x: band_pos,
            y: zero.min(end),
            width: band_width,
            height: (zero - end).abs(),
            fill,
        },
        Orientation::Horizontal => Mark::Rect {
            x: zero.min(end),
            y: band_pos,
            width: (end - zero).abs(),
            height: band_width,
            fill,
        },
    }
}

/// Value label just past the end of a bar.
fn bar_label(
    orientation: Orientation,
    value: &LinearScale,
    band_pos: f64,
    band_width: f64,
    v: f64,
    text: String,
) -> TextMark {
    let end = value.apply(v);
    let mid = band_pos + band_width / 2.0;
    match orientation {
        Orientation::Vertical if v >= 0.0 => TextMark::new(mid, end - BAR_LABEL_GAP, text, 10)
            .anchor(Anchor::Middle)
            .baseline(Baseline::Alphabetic),
        Orientation::Vertical => TextMark::new(mid, end + BAR_LABEL_GAP, text, 10)
            .anchor(Anchor::Middle)
            .baseline(Baseline::Hanging),
        Orientation::Horizontal if v >= 0.0 => TextMark::new(end + BAR_LABEL_GAP, mid, text, 12)
            .anchor(Anchor::Start)
            .baseline(Baseline::Middle),
        Orientation::Horizontal => TextMark::new(end - BAR_LABEL_GAP, mid, text, 12)
            .anchor(Anchor::End)
            .baseline(Baseline::Middle),
    }
}

fn value_range(orientation: Orientation, area: &PlotArea) -> (f64, f64) {
    match orientation {
        Orientation::Vertical => (area.bottom(), area.top),
        Orientation::Horizontal => (area.left, area.right()),
    }
}

fn category_range(orientation: Orientation, area: &PlotArea) -> (f64, f64) {
    match orientation {
        Orientation::Vertical => (area.left, area.right()),
        Orientation::Horizontal => (area.top, area.bottom()),
    }
}

fn explicit_value_domain(cfg: &ChartConfig, orientation: Orientation) -> Option<[f64; 2]> {
    match orientation {
        Orientation::Vertical => cfg.y_domain,
        Orientation::Horizontal => cfg.x_domain,
    }
}

/// Groups along the category axis, one bar per subgroup inside each group.
pub fn grouped_bar(cfg: &ChartConfig, data: &GroupedBars) -> Result<Geometry> {
    let mut frame = Frame::new(cfg)?;
    if data.rows.is_empty() || data.subgroups.is_empty() {
        return Err(ChartError::InvalidConfig(
            "grouped bar chart needs at least one group and one subgroup".into(),
        ));
    }
    if let Some(row) = data.rows.iter().find(|r| r.values.len() != data.subgroups.len()) {
        return Err(ChartError::InvalidConfig(format!(
            "group {:?} has {} values for {} subgroups",
            row.group,
            row.values.len(),
            data.subgroups.len()
        )));
    }

    let orientation = cfg.orientation_or(Orientation::Vertical);
    let area = frame.area;
    let domain = bar_domain(
        explicit_value_domain(cfg, orientation),
        data.rows.iter().flat_map(|r| r.values.iter().copied()),
    )?;
    let value = LinearScale::new(domain, value_range(orientation, &area))?;
    let outer = BandScale::new(
        data.rows.iter().map(|r| r.group.as_str()),
        category_range(orientation, &area),
        cfg.padding,
    )?;
    let inner = BandScale::new(
        data.subgroups.iter().map(String::as_str),
        (0.0, outer.bandwidth()),
        cfg.inner_padding,
    )?;
    let colors = OrdinalScale::new(data.subgroups.iter().map(String::as_str), cfg.colors.clone())?;

    let mut labels = Vec::new();
    for row in &data.rows {
        let group_pos = outer.band_start(&row.group)?;
        for (key, v) in data.subgroups.iter().zip(&row.values) {
            let pos = group_pos + inner.band_start(key)?;
            let fill = *colors.get(key)?;
            frame.geometry.push(bar_rect(orientation, &value, pos, inner.bandwidth(), *v, fill));
            if let Some(fmt) = &cfg.value_labels {
                let text = format_value(fmt, *v, None, &cfg.locale);
                labels.push(Mark::Text(bar_label(orientation, &value, pos, inner.bandwidth(), *v, text)));
            }
        }
    }
    frame.extend(labels);
    frame.category_axis(orientation, &outer, &[]);
    frame.value_axis(orientation, &value);
    Ok(frame.finish())
}

/// One bar per category.
pub fn bar(cfg: &ChartConfig, bars: &[CategoryValue]) -> Result<Geometry> {
    let mut frame = Frame::new(cfg)?;
    if bars.is_empty() {
        return Err(ChartError::InvalidConfig("bar chart needs at least one bar".into()));
    }
    let orientation = cfg.orientation_or(Orientation::Horizontal);
    let area = frame.area;
    let domain = bar_domain(explicit_value_domain(cfg, orientation), bars.iter().map(|b| b.value))?;
    let value = LinearScale::new(domain, value_range(orientation, &area))?;
    let band = BandScale::new(
        bars.iter().map(|b| b.category.as_str()),
        category_range(orientation, &area),
        cfg.padding,
    )?;

    draw_bars(&mut frame, orientation, &value, &band, bars, cfg.color(0))?;
    frame.category_axis(orientation, &band, bars);
    frame.value_axis(orientation, &value);
    Ok(frame.finish())
}

fn draw_bars(
    frame: &mut Frame<'_>,
    orientation: Orientation,
    value: &LinearScale,
    band: &BandScale,
    bars: &[CategoryValue],
    fill: Rgb8,
) -> Result<()> {
    let cfg = frame.cfg;
    let mut labels = Vec::new();
    for b in bars {
        let pos = band.band_start(&b.category)?;
        frame
            .geometry
            .push(bar_rect(orientation, value, pos, band.bandwidth(), b.value, fill));
        if let Some(fmt) = &cfg.value_labels {
            let text = format_value(fmt, b.value, None, &cfg.locale);
            labels.push(Mark::Text(bar_label(orientation, value, pos, band.bandwidth(), b.value, text)));
        }
    }
    frame.extend(labels);
    Ok(())
}

/// Horizontal small multiples stacked vertically, sharing one value axis.
pub fn faceted(cfg: &ChartConfig, facets: &[Facet]) -> Result<Geometry> {
    let mut frame = Frame::new(cfg)?;
    if facets.is_empty() {
        return Err(ChartError::InvalidConfig("faceted chart needs at least one facet".into()));
    }
    if cfg.orientation == Some(Orientation::Vertical) {
        return Err(ChartError::InvalidConfig(
            "faceted charts stack panels vertically and only support horizontal bars".into(),
        ));
    }
    let area = frame.area;
    let k = facets.len() as f64;
    let facet_h = (area.height - cfg.facet_gap * (k - 1.0)) / k;
    if !(facet_h > 0.0) {
        return Err(ChartError::InvalidConfig(format!(
            "facet gap {} leaves no room for {} facets",
            cfg.facet_gap,
            facets.len()
        )));
    }

    let domain = bar_domain(
        cfg.x_domain,
        facets.iter().flat_map(|f| f.bars.iter().map(|b| b.value)),
    )?;
    let value = LinearScale::new(domain, (area.left, area.right()))?;

    for (i, facet) in facets.iter().enumerate() {
        let start = area.top + i as f64 * (facet_h + cfg.facet_gap);
        let band = BandScale::new(
            facet.bars.iter().map(|b| b.category.as_str()),
            (start, start + facet_h),
            cfg.padding,
        )?;
        let fill = facet.color.unwrap_or_else(|| cfg.color(i));
        draw_bars(&mut frame, Orientation::Horizontal, &value, &band, &facet.bars, fill)?;
        frame.category_axis(Orientation::Horizontal, &band, &facet.bars);
        frame.text(
            TextMark::new(area.center_x(), start - 10.0, &facet.title, 13)
                .anchor(Anchor::Middle)
                .bold(),
        );
    }
    frame.value_axis(Orientation::Horizontal, &value);
    Ok(frame.finish())
}

fn linear_domain(explicit: Option<[f64; 2]>, values: impl IntoIterator<Item = f64>, pad: f64) -> Result<(f64, f64)> {
    if let Some([lo, hi]) = explicit {
        return Ok((lo, hi));
    }
    let (lo, hi) = stats::extent(values)
        .ok_or_else(|| ChartError::InvalidConfig("no finite values to scale".into()))?;
    let (lo, hi) = (lo - pad, hi + pad);
    if lo == hi {
        // A single distinct value sits mid-axis.
        return Ok((lo - FLAT_DOMAIN_PAD, hi + FLAT_DOMAIN_PAD));
    }
    Ok((lo, hi))
}

fn point_axes(frame: &mut Frame<'_>, x: &LinearScale, y: &LinearScale) {
    let cfg = frame.cfg;
    let a = frame.area;
    let x_ticks = linear_ticks(x, cfg.ticks, &cfg.x_format, &cfg.locale);
    let y_ticks = linear_ticks(y, cfg.ticks, &cfg.y_format, &cfg.locale);
    if cfg.grid {
        frame.extend(grid_marks(Edge::Bottom, &x_ticks, (a.top, a.bottom())));
        frame.extend(grid_marks(Edge::Left, &y_ticks, (a.left, a.right())));
    }
    frame.extend(axis_marks(Edge::Bottom, a.bottom(), (a.left, a.right()), &x_ticks, None));
    frame.extend(axis_marks(Edge::Left, a.left, (a.top, a.bottom()), &y_ticks, None));
}

/// One polyline per series, a dot per point, optional value labels above points.
pub fn line(cfg: &ChartConfig, series: &[Series]) -> Result<Geometry> {
    let mut frame = Frame::new(cfg)?;
    let all = || series.iter().flat_map(|s| s.points.iter());
    if all().next().is_none() {
        return Err(ChartError::InvalidConfig("line chart needs at least one point".into()));
    }
    let area = frame.area;
    let x = LinearScale::new(
        linear_domain(cfg.x_domain, all().map(|p| p.x), 0.0)?,
        (area.left, area.right()),
    )?;
    let y = LinearScale::new(
        linear_domain(cfg.y_domain, all().map(|p| p.y), cfg.domain_pad)?,
        (area.bottom(), area.top),
    )?;
    point_axes(&mut frame, &x, &y);

    let mut dots = Vec::new();
    let mut labels = Vec::new();
    for (i, s) in series.iter().enumerate() {
        let color = s.color.unwrap_or_else(|| cfg.color(i));
        let mut sorted = s.points.clone();
        sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
        frame.geometry.push(Mark::Polyline {
            points: sorted.iter().map(|p| (x.apply(p.x), y.apply(p.y))).collect(),
            stroke: color,
            stroke_width: cfg.line_width,
        });
        for p in &sorted {
            let (px, py) = (x.apply(p.x), y.apply(p.y));
            dots.push(Mark::Circle {
                cx: px,
                cy: py,
                r: cfg.point_radius,
                fill: color,
            });
            if let Some(fmt) = &cfg.value_labels {
                labels.push(Mark::Text(
                    TextMark::new(px, py - POINT_LABEL_GAP, format_value(fmt, p.y, None, &cfg.locale), 11)
                        .anchor(Anchor::Middle),
                ));
            }
        }
    }
    frame.extend(dots);
    frame.extend(labels);
    Ok(frame.finish())
}

/// `r = 0.33, t = 1.308, df = 14`; `t` is left out when undefined.
pub fn correlation_label(c: &Correlation) -> String {
    match c.t {
        Some(t) => format!("r = {:.2}, t = {:.3}, df = {}", c.r, t, c.df),
        None => format!("r = {:.2}, df = {}", c.r, c.df),
    }
}

/// Dots, the least-squares line across the full x domain, and optional r/t/df annotation.
pub fn scatter(cfg: &ChartConfig, points: &[Point], show_stats: bool) -> Result<Geometry> {
    let mut frame = Frame::new(cfg)?;
    let fit = stats::linear_regression(points)?;
    let area = frame.area;
    let x = LinearScale::new(
        linear_domain(cfg.x_domain, points.iter().map(|p| p.x), 0.0)?,
        (area.left, area.right()),
    )?;
    let y = LinearScale::new(
        linear_domain(cfg.y_domain, points.iter().map(|p| p.y), cfg.domain_pad)?,
        (area.bottom(), area.top),
    )?;
    point_axes(&mut frame, &x, &y);

    frame.extend(points.iter().map(|p| Mark::Circle {
        cx: x.apply(p.x),
        cy: y.apply(p.y),
        r: cfg.point_radius,
        fill: INK,
    }));

    let (x1, x2) = x.domain();
    frame.geometry.push(Mark::Line {
        x1: x.apply(x1),
        y1: y.apply(fit.predict(x1)),
        x2: x.apply(x2),
        y2: y.apply(fit.predict(x2)),
        stroke: cfg.color(1),
        stroke_width: cfg.line_width,
        dash: None,
    });
    log::debug!("regression slope={} intercept={}", fit.slope, fit.intercept);

    if show_stats {
        let c = stats::correlation(points)?;
        frame.text(
            TextMark::new(area.right() - 10.0, area.top + 10.0, correlation_label(&c), 12)
                .anchor(Anchor::End)
                .baseline(Baseline::Middle),
        );
    }
    Ok(frame.finish())
}
