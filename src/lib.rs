//! tradeviz
//!
//! A small Rust library for laying out and rendering static data-visualization
//! charts. Pairs with the `tradeviz` CLI.
//!
//! ### Features
//! - Ordinary-least-squares regression and correlation statistics (`r`, `t`, `df`)
//! - Linear, band and ordinal scales with "nice" tick generation
//! - One configurable geometry builder for grouped bars, bars, faceted bars, lines
//!   and scatter plots with a regression line
//! - A swappable renderer; the bundled one writes SVG through plotters
//!
//! ### Example
//! ```no_run
//! use tradeviz::{ChartRequest, Point, layout, viz};
//!
//! let request: ChartRequest = tradeviz::storage::load_request("demos/scatter_china.json")?;
//! let geometry = layout::build(&request)?;
//! viz::render_svg(&geometry, "scatter.svg")?;
//!
//! let fit = tradeviz::linear_regression(&[Point::new(1.0, 2.0), Point::new(2.0, 4.0)])?;
//! println!("slope={} intercept={}", fit.slope, fit.intercept);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod layout;
pub mod models;
pub mod scale;
pub mod stats;
pub mod storage;
pub mod viz;

pub use error::{ChartError, Result};
pub use layout::{ChartConfig, Geometry, Mark};
pub use models::{CategoryValue, ChartData, ChartRequest, Facet, GroupedBars, Point, Rgb8, Series};
pub use scale::{BandScale, LinearScale, OrdinalScale, Scale};
pub use stats::{Correlation, Regression, correlation, linear_regression};
