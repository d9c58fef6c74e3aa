//! Rendering: draw laid-out [`Geometry`] with plotters' **SVG** backend.
//!
//! Renderers do no layout of their own. Everything is positioned by
//! [`crate::layout`]; this module only maps marks to plotters elements, so another
//! backend can be swapped in by implementing [`Renderer`].

pub mod util;

use crate::layout::{Geometry, Mark};
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;

use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};

use util::{dash_segments, fill_style, line_style, px, rgb_color, text_style};

/// A drawing surface that consumes chart geometry.
pub trait Renderer {
    fn render(&mut self, geometry: &Geometry) -> Result<()>;
}

/// Writes each rendered chart to an `.svg` file.
#[derive(Debug, Clone)]
pub struct SvgFileRenderer {
    path: PathBuf,
}

impl SvgFileRenderer {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Renderer for SvgFileRenderer {
    fn render(&mut self, geometry: &Geometry) -> Result<()> {
        render_svg(geometry, &self.path)
    }
}

/// Keeps the last rendered SVG document in memory.
#[derive(Debug, Clone, Default)]
pub struct SvgStringRenderer {
    pub document: String,
}

impl Renderer for SvgStringRenderer {
    fn render(&mut self, geometry: &Geometry) -> Result<()> {
        self.document = render_svg_string(geometry)?;
        Ok(())
    }
}

/// Render `geometry` into an SVG file at `out_path`.
pub fn render_svg<P: AsRef<Path>>(geometry: &Geometry, out_path: P) -> Result<()> {
    let out_path = out_path.as_ref();
    if geometry.width == 0 || geometry.height == 0 {
        return Err(anyhow!("cannot render an empty {}x{} canvas", geometry.width, geometry.height));
    }
    let root = SVGBackend::new(out_path, (geometry.width, geometry.height)).into_drawing_area();
    draw_geometry(&root, geometry)?;
    log::info!("wrote {} marks to {}", geometry.marks.len(), out_path.display());
    Ok(())
}

/// Render `geometry` into an in-memory SVG document.
pub fn render_svg_string(geometry: &Geometry) -> Result<String> {
    if geometry.width == 0 || geometry.height == 0 {
        return Err(anyhow!("cannot render an empty {}x{} canvas", geometry.width, geometry.height));
    }
    let mut buf = String::new();
    {
        let root =
            SVGBackend::with_string(&mut buf, (geometry.width, geometry.height)).into_drawing_area();
        draw_geometry(&root, geometry)?;
    }
    Ok(buf)
}

/// Helper that draws to any Plotters backend.
fn draw_geometry<DB>(root: &DrawingArea<DB, Shift>, geometry: &Geometry) -> Result<()>
where
    DB: DrawingBackend,
{
    let background = geometry.background.map(rgb_color).unwrap_or(WHITE);
    root.fill(&background).map_err(|e| anyhow!("{:?}", e))?;

    for mark in &geometry.marks {
        draw_mark(root, mark)?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn draw_mark<DB>(root: &DrawingArea<DB, Shift>, mark: &Mark) -> Result<()>
where
    DB: DrawingBackend,
{
    match mark {
        Mark::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => root.draw(&Rectangle::new(
            [(px(*x), px(*y)), (px(x + width), px(y + height))],
            fill_style(*fill),
        )),
        Mark::Circle { cx, cy, r, fill } => root.draw(&Circle::new(
            (px(*cx), px(*cy)),
            px(*r).max(1),
            fill_style(*fill),
        )),
        Mark::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
            dash: Some(pattern),
        } => {
            let style = line_style(*stroke, *stroke_width);
            for (a, b) in dash_segments((*x1, *y1), (*x2, *y2), *pattern) {
                root.draw(&PathElement::new(
                    vec![(px(a.0), px(a.1)), (px(b.0), px(b.1))],
                    style,
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
            }
            Ok(())
        }
        Mark::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
            dash: None,
        } => root.draw(&PathElement::new(
            vec![(px(*x1), px(*y1)), (px(*x2), px(*y2))],
            line_style(*stroke, *stroke_width),
        )),
        Mark::Polyline {
            points,
            stroke,
            stroke_width,
        } => root.draw(&PathElement::new(
            points.iter().map(|(x, y)| (px(*x), px(*y))).collect::<Vec<_>>(),
            line_style(*stroke, *stroke_width),
        )),
        Mark::Text(t) => root.draw(&Text::new(
            t.text.clone(),
            (px(t.x), px(t.y)),
            text_style(t),
        )),
    }
    .map_err(|e| anyhow!("{:?}", e))
}
