//! Feature table container and feature addressing.
//!
//! The core type is [`Table`], a sample-major feature matrix
//! `[n_samples, n_features]` with optional column names. Features are
//! addressed through [`FeatureRef`], either by column index or by name.
//!
//! # Missing Values
//!
//! Missing values are represented as `f32::NAN`. Bounds resolution and the
//! histogram overlay skip NaN entries; the model sees them unchanged.

mod table;

pub use table::{FeatureRef, Table};
