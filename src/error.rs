//! Error type for sweep construction and rendering.

/// Error type for partial dependence computation and plotting.
#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    /// A feature was addressed by a name that is not in the table.
    #[error("unknown feature name: {name:?}")]
    UnknownFeature { name: String },

    /// A feature index is outside the table's column range.
    #[error("feature index {index} out of bounds: table has {n_features} features")]
    FeatureOutOfBounds { index: usize, n_features: usize },

    /// The swept column has no finite values to resolve bounds against.
    #[error("feature {feature:?} has no non-NaN values")]
    EmptyColumn { feature: String },

    /// The name list does not match the column count.
    #[error("feature name count mismatch: {names} names for {features} features")]
    NameCountMismatch { names: usize, features: usize },

    /// A flat buffer does not match the requested table shape.
    #[error("buffer length {len} does not match shape {n_samples}x{n_features}")]
    InvalidShape {
        n_samples: usize,
        n_features: usize,
        len: usize,
    },

    /// A sweep was requested with zero sample points.
    #[error("sweep requires at least one sample point")]
    InvalidPointCount,

    /// A bound specification string could not be parsed.
    #[error("invalid bound specification: {0:?}")]
    InvalidBound(String),

    /// The plotting backend failed while drawing.
    #[error("drawing failed: {0}")]
    Draw(String),

    /// A save path has an extension no backend is registered for.
    #[error("unsupported output format: {extension:?} (expected svg or png)")]
    UnsupportedFormat { extension: String },
}
