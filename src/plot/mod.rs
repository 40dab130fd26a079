//! Chart rendering against plotters backends.
//!
//! [`CurvePlot`] renders a 1-D sweep as a line chart (one polyline per row in
//! ICE mode) with an optional secondary-axis histogram of the swept column.
//! [`SurfacePlot`] renders a 2-D sweep as a 3-D response surface.
//!
//! Both plots implement [`Render`], which draws onto any caller-supplied
//! drawing area for composition. The `save` and `to_svg_string` methods cover
//! the common standalone cases: a file on disk (backend chosen by extension)
//! or an in-memory SVG document.

pub mod colors;

mod curve;
mod surface;

pub use curve::{CurvePlot, CurveStyle};
pub use surface::{SurfacePlot, SurfaceStyle};

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::error::ExplainError;

/// Default pixel size for standalone renders.
pub const DEFAULT_SIZE: (u32, u32) = (800, 600);

/// Anything that can draw itself onto a plotters drawing area.
pub trait Render {
    /// Draw the chart onto `area`. The area is not presented; the caller
    /// owns the backend lifecycle.
    fn render<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>)
        -> Result<(), ExplainError>;
}

pub(crate) fn draw_err<E>(e: DrawingAreaErrorKind<E>) -> ExplainError
where
    E: std::error::Error + Send + Sync,
{
    ExplainError::Draw(e.to_string())
}

/// Render a plot to `path`, choosing the backend by file extension.
pub(crate) fn save_to<R: Render>(
    plot: &R,
    path: &Path,
    size: (u32, u32),
) -> Result<(), ExplainError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "svg" => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            plot.render(&root)?;
            root.present().map_err(draw_err)?;
        }
        "png" => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            plot.render(&root)?;
            root.present().map_err(draw_err)?;
        }
        _ => return Err(ExplainError::UnsupportedFormat { extension }),
    }
    Ok(())
}

/// Render a plot into an in-memory SVG document.
pub(crate) fn render_svg_string<R: Render>(
    plot: &R,
    size: (u32, u32),
) -> Result<String, ExplainError> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();
        plot.render(&root)?;
        root.present().map_err(draw_err)?;
    }
    Ok(buf)
}

/// Expand a range by 5% per side; degenerate ranges get a unit of margin.
pub(crate) fn pad_range(lo: f32, hi: f32) -> (f32, f32) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - span * 0.05, hi + span * 0.05)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}
