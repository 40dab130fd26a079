//! pdplot: partial dependence plots for black-box models.
//!
//! Given an opaque prediction function and a feature matrix, this crate sweeps
//! one or two feature columns over a resolved value range, re-evaluates the
//! model at every sweep point, and renders the response as a curve or surface.
//!
//! # Key Types
//!
//! - [`Table`] - Sample-major feature matrix with optional column names
//! - [`PredictFn`] - The black-box model boundary (implemented by closures)
//! - [`CurveConfig`] / [`SurfaceConfig`] - Sweep configuration
//! - [`CurvePlot`] / [`SurfacePlot`] - Rendering against a plotters backend
//!
//! # Example
//!
//! ```
//! use ndarray::{Array1, ArrayView2};
//! use pdplot::{partial_dependence, CurveConfig, CurvePlot, Table};
//!
//! // 5 samples, 2 features
//! let table = Table::from_rows(
//!     vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0, 5.0, 50.0],
//!     5,
//!     2,
//! )
//! .unwrap();
//!
//! // The model is any Fn(ArrayView2<f32>) -> Array1<f32>
//! let model = |x: ArrayView2<'_, f32>| -> Array1<f32> {
//!     x.rows().into_iter().map(|r| r.sum()).collect()
//! };
//!
//! let curve = partial_dependence(&model, &table, 0, &CurveConfig::default()).unwrap();
//! let svg = CurvePlot::new(curve).to_svg_string((640, 480)).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod data;
pub mod dependence;
pub mod model;
pub mod plot;
pub mod utils;

mod error;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use error::ExplainError;

pub use data::{FeatureRef, Table};
pub use model::PredictFn;

pub use dependence::{
    partial_dependence, partial_dependence_2d, Bound, CurveConfig, CurveValues, DependenceCurve,
    DependenceSurface, SurfaceConfig,
};

pub use plot::{CurvePlot, CurveStyle, Render, SurfacePlot, SurfaceStyle};
