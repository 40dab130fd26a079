//! Partial dependence sweeps.
//!
//! A sweep perturbs one or two feature columns of a working copy of the
//! table, re-evaluates the model at every sample point, and collects the
//! response. Two 1-D modes exist:
//!
//! - **aggregate**: mean prediction per sweep point, one curve;
//! - **ICE** (individual conditional expectation): per-row predictions,
//!   one curve per background row.
//!
//! The 2-D sweep averages predictions over a grid of sample-point pairs,
//! producing a response surface.
//!
//! The model's cost dominates: the sweep makes `n_points` (1-D) or
//! `n_points^2` (2-D) synchronous model calls.

mod bounds;

pub use bounds::{resolve_bounds, Bound};

use ndarray::{Array1, Array2, Axis};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::debug;

use crate::data::{FeatureRef, Table};
use crate::error::ExplainError;
use crate::model::PredictFn;
use crate::utils::linspace;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a 1-D sweep.
///
/// Defaults mirror the common explanation setup: 100 sweep points, bounds at
/// the 0th/100th percentile of the column (padded outward by the resolver),
/// at most 100 background rows, aggregate mode.
///
/// # Example
///
/// ```
/// use pdplot::{Bound, CurveConfig};
///
/// let config = CurveConfig::default()
///     .with_n_points(50)
///     .with_bounds(Bound::Value(0.0), Bound::Percentile(95.0))
///     .with_ice(true);
/// assert_eq!(config.n_points, 50);
/// ```
#[derive(Debug, Clone)]
pub struct CurveConfig {
    /// Number of evenly spaced sweep points.
    pub n_points: usize,
    /// Lower bound specification for the sweep axis.
    pub lower: Bound,
    /// Upper bound specification for the sweep axis.
    pub upper: Bound,
    /// Cap on background rows; `None` uses every row of the table.
    pub n_samples: Option<usize>,
    /// Seed for the row subsampling RNG.
    pub seed: u64,
    /// Keep per-row predictions instead of averaging.
    pub ice: bool,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            n_points: 100,
            lower: Bound::Percentile(0.0),
            upper: Bound::Percentile(100.0),
            n_samples: Some(100),
            seed: 42,
            ice: false,
        }
    }
}

impl CurveConfig {
    /// Set the number of sweep points.
    pub fn with_n_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    /// Set both bound specifications.
    pub fn with_bounds(mut self, lower: Bound, upper: Bound) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Cap (or uncap) the number of background rows.
    pub fn with_n_samples(mut self, n_samples: Option<usize>) -> Self {
        self.n_samples = n_samples;
        self
    }

    /// Set the subsampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Toggle individual-conditional-expectation mode.
    pub fn with_ice(mut self, ice: bool) -> Self {
        self.ice = ice;
        self
    }
}

/// Configuration for a 2-D sweep.
///
/// Bounds are specified per axis; defaults sweep the 0th/100th percentile of
/// each column over a 20x20 grid.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Grid resolution per axis.
    pub n_points: usize,
    /// Bound specifications for the first feature's axis.
    pub x_lower: Bound,
    /// Upper bound for the first feature's axis.
    pub x_upper: Bound,
    /// Lower bound for the second feature's axis.
    pub y_lower: Bound,
    /// Upper bound for the second feature's axis.
    pub y_upper: Bound,
    /// Cap on background rows; `None` uses every row of the table.
    pub n_samples: Option<usize>,
    /// Seed for the row subsampling RNG.
    pub seed: u64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            n_points: 20,
            x_lower: Bound::Percentile(0.0),
            x_upper: Bound::Percentile(100.0),
            y_lower: Bound::Percentile(0.0),
            y_upper: Bound::Percentile(100.0),
            n_samples: Some(100),
            seed: 42,
        }
    }
}

impl SurfaceConfig {
    /// Set the per-axis grid resolution.
    pub fn with_n_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    /// Set bound specifications for the first feature's axis.
    pub fn with_x_bounds(mut self, lower: Bound, upper: Bound) -> Self {
        self.x_lower = lower;
        self.x_upper = upper;
        self
    }

    /// Set bound specifications for the second feature's axis.
    pub fn with_y_bounds(mut self, lower: Bound, upper: Bound) -> Self {
        self.y_lower = lower;
        self.y_upper = upper;
        self
    }

    /// Cap (or uncap) the number of background rows.
    pub fn with_n_samples(mut self, n_samples: Option<usize>) -> Self {
        self.n_samples = n_samples;
        self
    }

    /// Set the subsampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

// =============================================================================
// Results
// =============================================================================

/// Sweep responses for a 1-D sweep: one averaged curve, or one curve per row.
#[derive(Debug, Clone)]
pub enum CurveValues {
    /// Mean prediction per sweep point, length `n_points`.
    Mean(Array1<f32>),
    /// Per-row predictions, shape `[n_points, n_rows]`.
    Individual(Array2<f32>),
}

/// The result of a 1-D sweep, ready for rendering.
#[derive(Debug, Clone)]
pub struct DependenceCurve {
    /// Resolved column index of the swept feature.
    pub feature: usize,
    /// Display name of the swept feature.
    pub name: String,
    /// Sweep sample points, length `n_points`.
    pub xs: Array1<f32>,
    /// Model responses at each sweep point.
    pub values: CurveValues,
    /// Raw values of the swept column over the full table (histogram input).
    pub column: Array1<f32>,
    /// Resolved `(lower, upper)` axis bounds.
    pub bounds: (f32, f32),
    /// Row count of the full table (histogram axis scale).
    pub n_rows: usize,
}

impl DependenceCurve {
    /// Number of sweep points.
    pub fn n_points(&self) -> usize {
        self.xs.len()
    }

    /// Whether per-row (ICE) responses were kept.
    pub fn is_ice(&self) -> bool {
        matches!(self.values, CurveValues::Individual(_))
    }
}

/// The result of a 2-D sweep: a response surface over a sample-point grid.
#[derive(Debug, Clone)]
pub struct DependenceSurface {
    /// Resolved column indices of the two swept features.
    pub features: (usize, usize),
    /// Display names of the two swept features.
    pub names: (String, String),
    /// Sample points along the first feature's axis.
    pub xs0: Array1<f32>,
    /// Sample points along the second feature's axis.
    pub xs1: Array1<f32>,
    /// Mean prediction per grid cell, shape `[n_points, n_points]`,
    /// indexed `[first_axis, second_axis]`.
    pub values: Array2<f32>,
    /// Resolved bounds for the first feature's axis.
    pub bounds0: (f32, f32),
    /// Resolved bounds for the second feature's axis.
    pub bounds1: (f32, f32),
}

impl DependenceSurface {
    /// Grid resolution per axis.
    pub fn n_points(&self) -> usize {
        self.xs0.len()
    }
}

// =============================================================================
// Sweeps
// =============================================================================

/// Sweep one feature and collect the model response.
///
/// Resolves `feature` by index or name, resolves axis bounds over its column,
/// then overwrites the column across all background rows of a working copy
/// for each of `n_points` evenly spaced sample points, calling the model once
/// per point. See [`CurveConfig`] for the aggregate/ICE switch.
pub fn partial_dependence<'f, M>(
    model: &M,
    table: &Table,
    feature: impl Into<FeatureRef<'f>>,
    config: &CurveConfig,
) -> Result<DependenceCurve, ExplainError>
where
    M: PredictFn + ?Sized,
{
    if config.n_points == 0 {
        return Err(ExplainError::InvalidPointCount);
    }
    let index = table.resolve(feature.into())?;
    let name = table.feature_name(index);

    let column: Vec<f32> = table.column(index).to_vec();
    let (lo, hi) = resolve_bounds(config.lower, config.upper, &column).ok_or_else(|| {
        ExplainError::EmptyColumn {
            feature: name.clone(),
        }
    })?;
    let xs = Array1::from(linspace(lo, hi, config.n_points));

    let mut work = background_rows(table, config.n_samples, config.seed);
    let n_background = work.nrows();
    debug!(
        feature = %name,
        n_points = config.n_points,
        n_background,
        lo,
        hi,
        ice = config.ice,
        "sweeping feature"
    );

    let values = if config.ice {
        let mut vals = Array2::zeros((config.n_points, n_background));
        for (i, &x) in xs.iter().enumerate() {
            work.column_mut(index).fill(x);
            vals.row_mut(i).assign(&model.predict(work.view()));
        }
        CurveValues::Individual(vals)
    } else {
        let mut vals = Array1::zeros(config.n_points);
        for (i, &x) in xs.iter().enumerate() {
            work.column_mut(index).fill(x);
            vals[i] = model.predict(work.view()).mean().unwrap_or(f32::NAN);
        }
        CurveValues::Mean(vals)
    };

    Ok(DependenceCurve {
        feature: index,
        name,
        xs,
        values,
        column: Array1::from(column),
        bounds: (lo, hi),
        n_rows: table.n_samples(),
    })
}

/// Sweep two features jointly and collect the averaged response surface.
///
/// Bounds resolve independently per axis. For each cell of the
/// `n_points x n_points` grid, both columns are overwritten across all
/// background rows and the mean prediction is recorded.
pub fn partial_dependence_2d<'a, 'b, M>(
    model: &M,
    table: &Table,
    features: (impl Into<FeatureRef<'a>>, impl Into<FeatureRef<'b>>),
    config: &SurfaceConfig,
) -> Result<DependenceSurface, ExplainError>
where
    M: PredictFn + ?Sized,
{
    if config.n_points == 0 {
        return Err(ExplainError::InvalidPointCount);
    }
    let i0 = table.resolve(features.0.into())?;
    let i1 = table.resolve(features.1.into())?;
    let name0 = table.feature_name(i0);
    let name1 = table.feature_name(i1);

    let col0: Vec<f32> = table.column(i0).to_vec();
    let col1: Vec<f32> = table.column(i1).to_vec();
    let bounds0 = resolve_bounds(config.x_lower, config.x_upper, &col0).ok_or_else(|| {
        ExplainError::EmptyColumn {
            feature: name0.clone(),
        }
    })?;
    let bounds1 = resolve_bounds(config.y_lower, config.y_upper, &col1).ok_or_else(|| {
        ExplainError::EmptyColumn {
            feature: name1.clone(),
        }
    })?;

    let xs0 = Array1::from(linspace(bounds0.0, bounds0.1, config.n_points));
    let xs1 = Array1::from(linspace(bounds1.0, bounds1.1, config.n_points));

    let mut work = background_rows(table, config.n_samples, config.seed);
    debug!(
        features = %format!("{name0}, {name1}"),
        n_points = config.n_points,
        n_background = work.nrows(),
        "sweeping feature pair"
    );

    let mut values = Array2::zeros((config.n_points, config.n_points));
    for (i, &x0) in xs0.iter().enumerate() {
        work.column_mut(i0).fill(x0);
        for (j, &x1) in xs1.iter().enumerate() {
            work.column_mut(i1).fill(x1);
            values[[i, j]] = model.predict(work.view()).mean().unwrap_or(f32::NAN);
        }
    }

    Ok(DependenceSurface {
        features: (i0, i1),
        names: (name0, name1),
        xs0,
        xs1,
        values,
        bounds0,
        bounds1,
    })
}

/// Working copy of the table rows the sweep perturbs.
///
/// When `n_samples` caps below the row count, draws that many distinct rows
/// with a seeded RNG; row order is preserved so repeated sweeps with the same
/// seed see the same background.
fn background_rows(table: &Table, n_samples: Option<usize>, seed: u64) -> Array2<f32> {
    let n = table.n_samples();
    match n_samples {
        Some(cap) if cap < n => {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let mut idx = rand::seq::index::sample(&mut rng, n, cap).into_vec();
            idx.sort_unstable();
            table.view().select(Axis(0), &idx)
        }
        _ => table.view().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, ArrayView2};

    fn sum_model() -> impl PredictFn {
        |x: ArrayView2<'_, f32>| -> Array1<f32> { x.rows().into_iter().map(|r| r.sum()).collect() }
    }

    fn small_table() -> Table {
        // 4 samples, 2 features
        Table::new(array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]].view())
    }

    #[test]
    fn aggregate_sweep_has_n_points_values() {
        let config = CurveConfig::default().with_n_points(7);
        let curve = partial_dependence(&sum_model(), &small_table(), 0, &config).unwrap();
        assert_eq!(curve.n_points(), 7);
        assert!(!curve.is_ice());
        match curve.values {
            CurveValues::Mean(vals) => assert_eq!(vals.len(), 7),
            CurveValues::Individual(_) => panic!("expected aggregate values"),
        }
    }

    #[test]
    fn ice_sweep_is_points_by_rows() {
        let config = CurveConfig::default().with_n_points(5).with_ice(true);
        let curve = partial_dependence(&sum_model(), &small_table(), 0, &config).unwrap();
        assert!(curve.is_ice());
        match curve.values {
            CurveValues::Individual(vals) => assert_eq!(vals.dim(), (5, 4)),
            CurveValues::Mean(_) => panic!("expected per-row values"),
        }
    }

    #[test]
    fn aggregate_curve_of_linear_model_is_linear() {
        // f(x) = x0 + x1, so E[f | x0 = v] = v + mean(x1) = v + 25
        let config = CurveConfig::default().with_n_points(11);
        let curve = partial_dependence(&sum_model(), &small_table(), 0, &config).unwrap();
        let vals = match &curve.values {
            CurveValues::Mean(v) => v,
            CurveValues::Individual(_) => unreachable!(),
        };
        for (x, v) in curve.xs.iter().zip(vals.iter()) {
            assert_abs_diff_eq!(*v, x + 25.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn sweep_does_not_mutate_the_table() {
        let table = small_table();
        let before = table.view().to_owned();
        let _ = partial_dependence(&sum_model(), &table, 0, &CurveConfig::default()).unwrap();
        assert_eq!(table.view(), before.view());
    }

    #[test]
    fn sweep_by_name() {
        let table = Table::new(array![[1.0, 10.0], [5.0, 20.0]].view())
            .with_names(["x", "y"])
            .unwrap();
        let curve = partial_dependence(&sum_model(), &table, "y", &CurveConfig::default()).unwrap();
        assert_eq!(curve.feature, 1);
        assert_eq!(curve.name, "y");
    }

    #[test]
    fn zero_points_is_an_error() {
        let config = CurveConfig::default().with_n_points(0);
        let err = partial_dependence(&sum_model(), &small_table(), 0, &config).unwrap_err();
        assert!(matches!(err, ExplainError::InvalidPointCount));
    }

    #[test]
    fn all_nan_column_is_an_error() {
        let table = Table::new(array![[f32::NAN, 1.0], [f32::NAN, 2.0]].view());
        let err =
            partial_dependence(&sum_model(), &table, 0, &CurveConfig::default()).unwrap_err();
        assert!(matches!(err, ExplainError::EmptyColumn { .. }));
    }

    #[test]
    fn single_point_sweep_sits_at_lower_bound() {
        let config = CurveConfig::default()
            .with_n_points(1)
            .with_bounds(Bound::Value(2.5), Bound::Value(3.5));
        let curve = partial_dependence(&sum_model(), &small_table(), 0, &config).unwrap();
        assert_eq!(curve.xs.to_vec(), vec![2.5]);
    }

    #[test]
    fn surface_grid_shape_and_means() {
        let config = SurfaceConfig::default().with_n_points(4);
        let surface =
            partial_dependence_2d(&sum_model(), &small_table(), (0, 1), &config).unwrap();
        assert_eq!(surface.values.dim(), (4, 4));
        // f(x) = x0 + x1 with both columns pinned: mean is exactly x0 + x1
        for (i, &x0) in surface.xs0.iter().enumerate() {
            for (j, &x1) in surface.xs1.iter().enumerate() {
                assert_abs_diff_eq!(surface.values[[i, j]], x0 + x1, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn subsampling_caps_background_rows() {
        let n = 250;
        let data: Vec<f32> = (0..n * 2).map(|v| v as f32).collect();
        let table = Table::from_rows(data, n, 2).unwrap();

        let config = CurveConfig::default()
            .with_n_points(3)
            .with_n_samples(Some(50))
            .with_ice(true);
        let curve = partial_dependence(&sum_model(), &table, 0, &config).unwrap();
        match curve.values {
            CurveValues::Individual(vals) => assert_eq!(vals.dim(), (3, 50)),
            CurveValues::Mean(_) => panic!("expected per-row values"),
        }
        // histogram input still covers the full table
        assert_eq!(curve.column.len(), n);
        assert_eq!(curve.n_rows, n);
    }

    #[test]
    fn subsampling_is_deterministic_per_seed() {
        let n = 200;
        let data: Vec<f32> = (0..n * 2).map(|v| (v as f32).sin()).collect();
        let table = Table::from_rows(data, n, 2).unwrap();
        let config = CurveConfig::default()
            .with_n_points(5)
            .with_n_samples(Some(20));

        let a = partial_dependence(&sum_model(), &table, 0, &config).unwrap();
        let b = partial_dependence(&sum_model(), &table, 0, &config).unwrap();
        match (a.values, b.values) {
            (CurveValues::Mean(va), CurveValues::Mean(vb)) => assert_eq!(va, vb),
            _ => panic!("expected aggregate values"),
        }
    }
}
