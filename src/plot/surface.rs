//! 2-D response surface rendering.

use std::path::Path;

use ndarray::Array1;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::colors::surface_gradient;
use super::{draw_err, pad_range, Render, DEFAULT_SIZE};
use crate::dependence::DependenceSurface;
use crate::error::ExplainError;

/// Visual options for a [`SurfacePlot`].
#[derive(Debug, Clone)]
pub struct SurfaceStyle {
    /// Opacity of the surface cells.
    pub opacity: f64,
    /// Camera pitch in radians.
    pub pitch: f64,
    /// Camera yaw in radians.
    pub yaw: f64,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            opacity: 0.85,
            pitch: 0.25,
            yaw: 0.45,
        }
    }
}

impl SurfaceStyle {
    /// Set the surface opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set the camera angles.
    pub fn with_view(mut self, pitch: f64, yaw: f64) -> Self {
        self.pitch = pitch;
        self.yaw = yaw;
        self
    }
}

/// A renderable 3-D partial dependence surface.
///
/// Cells are colored by a blue-to-red gradient over the response range. The
/// chart caption carries the response label `E[f(x) | name0, name1]`.
pub struct SurfacePlot {
    surface: DependenceSurface,
    style: SurfaceStyle,
}

impl SurfacePlot {
    /// Wrap a sweep result with default styling.
    pub fn new(surface: DependenceSurface) -> Self {
        Self {
            surface,
            style: SurfaceStyle::default(),
        }
    }

    /// Replace the styling.
    pub fn with_style(mut self, style: SurfaceStyle) -> Self {
        self.style = style;
        self
    }

    /// The underlying sweep result.
    pub fn surface(&self) -> &DependenceSurface {
        &self.surface
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
}

impl Render for SurfacePlot {
    fn render<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<(), ExplainError> {
        area.fill(&WHITE).map_err(draw_err)?;

        let s = &self.surface;
        let (x0lo, x0hi) = axis_range(s.bounds0);
        let (x1lo, x1hi) = axis_range(s.bounds1);

        let (vmin, vmax) = grid_extent(s);
        let (vlo, vhi) = pad_range(vmin, vmax);

        let caption = format!("E[f(x) | {}, {}]", s.names.0, s.names.1);
        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .caption(caption, ("sans-serif", 13))
            .build_cartesian_3d(x0lo..x0hi, vlo..vhi, x1lo..x1hi)
            .map_err(draw_err)?;

        let (pitch, yaw) = (self.style.pitch, self.style.yaw);
        chart.with_projection(|mut pb| {
            pb.pitch = pitch;
            pb.yaw = yaw;
            pb.scale = 0.9;
            pb.into_matrix()
        });

        chart
            .configure_axes()
            .light_grid_style(BLACK.mix(0.15))
            .max_light_lines(3)
            .draw()
            .map_err(draw_err)?;

        let opacity = self.style.opacity;
        chart
            .draw_series(
                SurfaceSeries::xoz(s.xs0.iter().copied(), s.xs1.iter().copied(), |x, z| {
                    s.values[[nearest(&s.xs0, x), nearest(&s.xs1, z)]]
                })
                .style_func(&|&v| surface_gradient(v, vmin, vmax).mix(opacity).filled()),
            )
            .map_err(draw_err)?;

        Ok(())
    }
}

fn axis_range((lo, hi): (f32, f32)) -> (f32, f32) {
    if lo < hi {
        (lo, hi)
    } else {
        pad_range(lo, hi)
    }
}

/// Min/max over every finite grid value; `(0, 1)` when none exist.
fn grid_extent(surface: &DependenceSurface) -> (f32, f32) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for &v in surface.values.iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi {
        (0.0, 1.0)
    } else {
        (lo, hi)
    }
}

/// Index of the grid point nearest to `x` along an evenly spaced axis.
fn nearest(xs: &Array1<f32>, x: f32) -> usize {
    if xs.len() < 2 {
        return 0;
    }
    let step = xs[1] - xs[0];
    if step == 0.0 {
        return 0;
    }
    let idx = ((x - xs[0]) / step).round();
    (idx.max(0.0) as usize).min(xs.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn test_surface() -> DependenceSurface {
        DependenceSurface {
            features: (0, 1),
            names: ("a".to_string(), "b".to_string()),
            xs0: array![0.0, 1.0, 2.0],
            xs1: array![10.0, 20.0, 30.0],
            values: array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]],
            bounds0: (0.0, 2.0),
            bounds1: (10.0, 30.0),
        }
    }

    #[test]
    fn nearest_snaps_to_grid() {
        let xs = array![0.0, 1.0, 2.0, 3.0];
        assert_eq!(nearest(&xs, 0.0), 0);
        assert_eq!(nearest(&xs, 1.4), 1);
        assert_eq!(nearest(&xs, 2.6), 3);
        assert_eq!(nearest(&xs, 99.0), 3);
        assert_eq!(nearest(&xs, -99.0), 0);
    }

    #[test]
    fn nearest_single_point_axis() {
        assert_eq!(nearest(&array![5.0], 123.0), 0);
    }

    #[test]
    fn grid_extent_finds_range() {
        assert_eq!(grid_extent(&test_surface()), (1.0, 9.0));
    }

    #[test]
    fn grid_extent_skips_nan() {
        let mut s = test_surface();
        s.values[[0, 0]] = f32::NAN;
        assert_eq!(grid_extent(&s), (2.0, 9.0));
    }
}
