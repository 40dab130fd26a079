//! 1-D curve rendering: line(s) plus the column histogram.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::colors::{CURVE_BLUE, HIST_BLACK};
use super::{draw_err, pad_range, Render, DEFAULT_SIZE};
use crate::dependence::{CurveValues, DependenceCurve};
use crate::error::ExplainError;

const HIST_BINS: usize = 50;

/// Visual options for a [`CurvePlot`].
///
/// Line width and opacity default per mode when unset: width 2 / opacity 1.0
/// for the aggregate curve, width 1 / opacity 0.5 for ICE bundles.
#[derive(Debug, Clone)]
pub struct CurveStyle {
    /// Stroke width in pixels; `None` picks the mode default.
    pub line_width: Option<u32>,
    /// Line opacity in `[0, 1]`; `None` picks the mode default.
    pub opacity: Option<f64>,
    /// Overlay a histogram of the swept column's raw distribution.
    pub hist: bool,
    /// Override for the y-axis label.
    pub y_label: Option<String>,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self {
            line_width: None,
            opacity: None,
            hist: true,
            y_label: None,
        }
    }
}

impl CurveStyle {
    /// Set the stroke width.
    pub fn with_line_width(mut self, width: u32) -> Self {
        self.line_width = Some(width);
        self
    }

    /// Set the line opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Toggle the histogram overlay.
    pub fn with_hist(mut self, hist: bool) -> Self {
        self.hist = hist;
        self
    }

    /// Override the y-axis label.
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }
}

/// A renderable 1-D partial dependence chart.
///
/// Primary axis: the response curve (or one polyline per background row in
/// ICE mode). Secondary y-axis, scaled to the table's row count: a
/// [`HIST_BINS`]-bin histogram of the swept column over the resolved x-range,
/// drawn as filled black bars with its tick labels suppressed.
pub struct CurvePlot {
    curve: DependenceCurve,
    style: CurveStyle,
}

impl CurvePlot {
    /// Wrap a sweep result with default styling.
    pub fn new(curve: DependenceCurve) -> Self {
        Self {
            curve,
            style: CurveStyle::default(),
        }
    }

    /// Replace the styling.
    pub fn with_style(mut self, style: CurveStyle) -> Self {
        self.style = style;
        self
    }

    /// The underlying sweep result.
    pub fn curve(&self) -> &DependenceCurve {
        &self.curve
    }

    /// Render to a file at [`DEFAULT_SIZE`]; backend chosen by extension
    /// (`.svg` or `.png`).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExplainError> {
        super::save_to(self, path.as_ref(), DEFAULT_SIZE)
    }

    /// Render into an in-memory SVG document of the given pixel size.
    pub fn to_svg_string(&self, size: (u32, u32)) -> Result<String, ExplainError> {
        super::render_svg_string(self, size)
    }

    fn y_label(&self) -> String {
        match &self.style.y_label {
            Some(label) => label.clone(),
            None if self.curve.is_ice() => format!("f(x) | {}", self.curve.name),
            None => format!("E[f(x) | {}]", self.curve.name),
        }
    }
}

impl Render for CurvePlot {
    fn render<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), ExplainError> {
        area.fill(&WHITE).map_err(draw_err)?;

        let curve = &self.curve;
        let (blo, bhi) = curve.bounds;
        // bounds can collapse when the column is constant
        let (xlo, xhi) = if blo < bhi {
            (blo, bhi)
        } else {
            pad_range(blo, bhi)
        };
        let (vlo, vhi) = value_extent(&curve.values);
        let (ylo, yhi) = pad_range(vlo, vhi);

        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(xlo..xhi, ylo..yhi)
            .map_err(draw_err)?
            .set_secondary_coord(xlo..xhi, 0f32..curve.n_rows.max(1) as f32);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(curve.name.clone())
            .y_desc(self.y_label())
            .axis_desc_style(("sans-serif", 13))
            .label_style(("sans-serif", 11))
            .draw()
            .map_err(draw_err)?;

        if self.style.hist {
            let bars = histogram_bars(curve, xlo, xhi);
            chart
                .draw_secondary_series(bars.into_iter().map(|(x0, x1, count)| {
                    Rectangle::new([(x0, 0.0), (x1, count)], HIST_BLACK.filled())
                }))
                .map_err(draw_err)?;
        }

        let ice = curve.is_ice();
        let width = self.style.line_width.unwrap_or(if ice { 1 } else { 2 });
        let opacity = self.style.opacity.unwrap_or(if ice { 0.5 } else { 1.0 });
        let stroke = CURVE_BLUE.mix(opacity).stroke_width(width);

        match &curve.values {
            CurveValues::Mean(vals) => {
                chart
                    .draw_series(LineSeries::new(
                        curve.xs.iter().zip(vals.iter()).map(|(&x, &y)| (x, y)),
                        stroke,
                    ))
                    .map_err(draw_err)?;
            }
            CurveValues::Individual(vals) => {
                for r in 0..vals.ncols() {
                    chart
                        .draw_series(LineSeries::new(
                            curve
                                .xs
                                .iter()
                                .zip(vals.column(r).iter())
                                .map(|(&x, &y)| (x, y)),
                            stroke,
                        ))
                        .map_err(draw_err)?;
                }
            }
        }

        Ok(())
    }
}

/// Min/max over every finite response value; `(0, 1)` when none exist.
fn value_extent(values: &CurveValues) -> (f32, f32) {
    let iter: Box<dyn Iterator<Item = f32> + '_> = match values {
        CurveValues::Mean(v) => Box::new(v.iter().copied()),
        CurveValues::Individual(v) => Box::new(v.iter().copied()),
    };
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for v in iter.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi {
        (0.0, 1.0)
    } else {
        (lo, hi)
    }
}

/// Bin the raw column values into `(x0, x1, count)` bars over `[lo, hi]`.
fn histogram_bars(curve: &DependenceCurve, lo: f32, hi: f32) -> Vec<(f32, f32, f32)> {
    let width = (hi - lo) / HIST_BINS as f32;
    if !(width > 0.0) {
        return Vec::new();
    }
    let mut counts = vec![0u32; HIST_BINS];
    for &v in curve.column.iter() {
        if v.is_nan() || v < lo || v > hi {
            continue;
        }
        let bin = (((v - lo) / width) as usize).min(HIST_BINS - 1);
        counts[bin] += 1;
    }
    counts
        .iter()
        .enumerate()
        .filter(|(_, &c)| c > 0)
        .map(|(b, &c)| {
            let x0 = lo + b as f32 * width;
            (x0, x0 + width, c as f32)
        })
        .collect()
}
