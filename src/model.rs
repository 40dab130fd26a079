//! The black-box model boundary.

use ndarray::{Array1, ArrayView2};

/// An opaque prediction function: feature matrix in, one prediction per row out.
///
/// The sweep treats the model as a black box; no internal structure is
/// assumed and no error channel exists. Any closure with the matching
/// signature implements this trait:
///
/// ```
/// use ndarray::{array, Array1, ArrayView2};
/// use pdplot::PredictFn;
///
/// let model = |x: ArrayView2<'_, f32>| -> Array1<f32> {
///     x.rows().into_iter().map(|r| r.sum()).collect()
/// };
/// let preds = model.predict(array![[1.0, 2.0], [3.0, 4.0]].view());
/// assert_eq!(preds.to_vec(), vec![3.0, 7.0]);
/// ```
pub trait PredictFn {
    /// Evaluate the model on a sample-major matrix `[n_samples, n_features]`,
    /// returning one prediction per sample.
    fn predict(&self, features: ArrayView2<'_, f32>) -> Array1<f32>;
}

impl<F> PredictFn for F
where
    F: Fn(ArrayView2<'_, f32>) -> Array1<f32>,
{
    fn predict(&self, features: ArrayView2<'_, f32>) -> Array1<f32> {
        self(features)
    }
}
