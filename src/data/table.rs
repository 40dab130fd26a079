//! Sample-major feature table.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::ExplainError;

/// A feature matrix with rows as samples and columns as features.
///
/// # Storage Layout
///
/// Data is stored sample-major: `[n_samples, n_features]`. Sweeps mutate a
/// working copy column by column; the table itself is never modified.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use pdplot::Table;
///
/// // 3 samples, 2 features
/// let table = Table::new(array![[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]].view())
///     .with_names(["age", "income"])
///     .unwrap();
///
/// assert_eq!(table.n_samples(), 3);
/// assert_eq!(table.n_features(), 2);
/// assert_eq!(table.feature_name(1), "income");
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    /// Feature data: `[n_samples, n_features]` (sample-major).
    data: Array2<f32>,
    /// Column names, when the caller supplied them.
    names: Option<Vec<String>>,
}

impl Table {
    /// Create a table from a sample-major view. The data is copied.
    pub fn new(data: ArrayView2<'_, f32>) -> Self {
        Self {
            data: data.to_owned(),
            names: None,
        }
    }

    /// Create a table from a flat row-major buffer.
    ///
    /// Data layout: `[s0_f0, s0_f1, ..., s1_f0, s1_f1, ...]`.
    pub fn from_rows(
        data: Vec<f32>,
        n_samples: usize,
        n_features: usize,
    ) -> Result<Self, ExplainError> {
        let len = data.len();
        let data = Array2::from_shape_vec((n_samples, n_features), data).map_err(|_| {
            ExplainError::InvalidShape {
                n_samples,
                n_features,
                len,
            }
        })?;
        Ok(Self { data, names: None })
    }

    /// Attach column names. The list length must match the column count.
    pub fn with_names<I, S>(mut self, names: I) -> Result<Self, ExplainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.n_features() {
            return Err(ExplainError::NameCountMismatch {
                names: names.len(),
                features: self.n_features(),
            });
        }
        self.names = Some(names);
        Ok(self)
    }

    /// Number of samples (rows).
    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Number of features (columns).
    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    /// Read-only view of the full matrix.
    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    /// All values of one feature column.
    pub fn column(&self, index: usize) -> ArrayView1<'_, f32> {
        self.data.column(index)
    }

    /// Owned copy of one feature column.
    pub fn column_owned(&self, index: usize) -> Array1<f32> {
        self.data.column(index).to_owned()
    }

    /// Display name for a feature: the caller-supplied name, or `Feature {i}`.
    pub fn feature_name(&self, index: usize) -> String {
        match &self.names {
            Some(names) => names[index].clone(),
            None => format!("Feature {index}"),
        }
    }

    /// Resolve a feature reference to a column index.
    pub fn resolve(&self, feature: FeatureRef<'_>) -> Result<usize, ExplainError> {
        match feature {
            FeatureRef::Index(index) => {
                if index < self.n_features() {
                    Ok(index)
                } else {
                    Err(ExplainError::FeatureOutOfBounds {
                        index,
                        n_features: self.n_features(),
                    })
                }
            }
            FeatureRef::Name(name) => self
                .names
                .as_ref()
                .and_then(|names| names.iter().position(|n| n == name))
                .ok_or_else(|| ExplainError::UnknownFeature {
                    name: name.to_string(),
                }),
        }
    }
}

/// A feature addressed by column index or by name.
///
/// Both `usize` and `&str` convert into this, so call sites can pass either:
///
/// ```
/// use pdplot::FeatureRef;
///
/// let by_index: FeatureRef = 2.into();
/// let by_name: FeatureRef = "income".into();
/// assert!(matches!(by_index, FeatureRef::Index(2)));
/// assert!(matches!(by_name, FeatureRef::Name("income")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureRef<'a> {
    /// Column index into the table.
    Index(usize),
    /// Column name; requires the table to carry names.
    Name(&'a str),
}

impl From<usize> for FeatureRef<'static> {
    fn from(index: usize) -> Self {
        FeatureRef::Index(index)
    }
}

impl<'a> From<&'a str> for FeatureRef<'a> {
    fn from(name: &'a str) -> Self {
        FeatureRef::Name(name)
    }
}
