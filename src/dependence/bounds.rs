//! Axis bound specification and resolution.

use std::str::FromStr;

use crate::error::ExplainError;
use crate::utils::{nan_max, nan_min, nan_percentile};

/// One end of a sweep range.
///
/// A bound is either left unset, pinned to a literal value, or derived from
/// the empirical percentile of the swept column. The string form accepts a
/// bare number or a `percentile(P)` directive:
///
/// ```
/// use pdplot::Bound;
///
/// assert_eq!("3.5".parse::<Bound>().unwrap(), Bound::Value(3.5));
/// assert_eq!(
///     "percentile(99)".parse::<Bound>().unwrap(),
///     Bound::Percentile(99.0)
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Bound {
    /// Unset: fall back to the data extreme, padded outward.
    #[default]
    Auto,
    /// A literal axis value.
    Value(f32),
    /// The empirical percentile (0-100) of the swept column.
    Percentile(f32),
}

impl Bound {
    /// Resolve against a column, before any padding. `Auto` stays unresolved.
    ///
    /// Callers check for an all-NaN column first, so the percentile here
    /// always has values to work with.
    fn raw(self, values: &[f32]) -> Option<f32> {
        match self {
            Bound::Auto => None,
            Bound::Value(v) => Some(v),
            Bound::Percentile(p) => nan_percentile(values, p),
        }
    }
}

impl From<f32> for Bound {
    fn from(v: f32) -> Self {
        Bound::Value(v)
    }
}

impl FromStr for Bound {
    type Err = ExplainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(inner) = trimmed
            .strip_prefix("percentile(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let p: f32 = inner
                .trim()
                .parse()
                .map_err(|_| ExplainError::InvalidBound(s.to_string()))?;
            return Ok(Bound::Percentile(p));
        }
        trimmed
            .parse::<f32>()
            .map(Bound::Value)
            .map_err(|_| ExplainError::InvalidBound(s.to_string()))
    }
}

/// Resolve a `(lower, upper)` bound pair against a feature column.
///
/// Percentile bounds resolve via the NaN-aware empirical percentile. A bound
/// that is unset, or that lands exactly on the column's extreme, is padded
/// outward by one-twentieth of the resolved range so the plotted axis keeps
/// visual margin around the data. Literal bounds away from the extremes pass
/// through unchanged.
///
/// The lower bound is padded first, against the resolved upper bound (or the
/// column maximum when the upper bound is unset); the upper bound is then
/// padded against the final lower bound.
///
/// Returns `None` when the column holds no finite values.
pub fn resolve_bounds(lower: Bound, upper: Bound, values: &[f32]) -> Option<(f32, f32)> {
    let vmin = nan_min(values)?;
    let vmax = nan_max(values)?;

    let raw_lo = lower.raw(values);
    let raw_hi = upper.raw(values);

    let hi_basis = raw_hi.unwrap_or(vmax);
    let lo = match raw_lo {
        Some(v) if v != vmin => v,
        _ => vmin - (hi_basis - vmin) / 20.0,
    };
    let hi = match raw_hi {
        Some(v) if v != vmax => v,
        _ => vmax + (vmax - lo) / 20.0,
    };

    Some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const XS: [f32; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

    #[test]
    fn literal_bounds_pass_through() {
        let (lo, hi) = resolve_bounds(Bound::Value(1.5), Bound::Value(4.5), &XS).unwrap();
        assert_abs_diff_eq!(lo, 1.5);
        assert_abs_diff_eq!(hi, 4.5);
    }

    #[test]
    fn percentile_endpoints_hit_extremes_then_pad() {
        // percentile(0)/percentile(100) resolve to the raw extremes (1, 5),
        // which then trigger outward padding on both sides.
        let (lo, hi) =
            resolve_bounds(Bound::Percentile(0.0), Bound::Percentile(100.0), &XS).unwrap();
        assert_abs_diff_eq!(lo, 1.0 - (5.0 - 1.0) / 20.0);
        assert_abs_diff_eq!(hi, 5.0 + (5.0 - lo) / 20.0);
        assert!(lo < 1.0);
        assert!(hi > 5.0);
    }

    #[test]
    fn unset_lower_pads_below_minimum() {
        let (lo, hi) = resolve_bounds(Bound::Auto, Bound::Value(5.0), &XS).unwrap();
        assert!(lo < 1.0);
        assert_abs_diff_eq!(lo, 1.0 - (5.0 - 1.0) / 20.0);
        // upper equals the data maximum, so it pads too
        assert!(hi > 5.0);
    }

    #[test]
    fn unset_upper_pads_above_maximum() {
        let (lo, hi) = resolve_bounds(Bound::Value(2.0), Bound::Auto, &XS).unwrap();
        assert_abs_diff_eq!(lo, 2.0);
        assert_abs_diff_eq!(hi, 5.0 + (5.0 - 2.0) / 20.0);
    }

    #[test]
    fn both_unset_resolve_to_padded_extremes() {
        let (lo, hi) = resolve_bounds(Bound::Auto, Bound::Auto, &XS).unwrap();
        assert!(lo < 1.0);
        assert!(hi > 5.0);
    }

    #[test]
    fn literal_at_extreme_is_padded() {
        let (lo, _) = resolve_bounds(Bound::Value(1.0), Bound::Value(4.0), &XS).unwrap();
        assert!(lo < 1.0);
    }

    #[test]
    fn nan_values_are_ignored() {
        let xs = [f32::NAN, 1.0, 2.0, 3.0, 4.0, 5.0, f32::NAN];
        let (lo, hi) =
            resolve_bounds(Bound::Percentile(0.0), Bound::Percentile(100.0), &xs).unwrap();
        assert!(lo < 1.0 && lo > 0.0);
        assert!(hi > 5.0 && hi < 6.0);
    }

    #[test]
    fn all_nan_column_is_none() {
        assert!(resolve_bounds(Bound::Auto, Bound::Auto, &[f32::NAN, f32::NAN]).is_none());
        assert!(resolve_bounds(Bound::Auto, Bound::Auto, &[]).is_none());
    }

    #[test]
    fn parse_directives() {
        assert_eq!("percentile(0)".parse::<Bound>().unwrap(), Bound::Percentile(0.0));
        assert_eq!(
            "percentile(99.5)".parse::<Bound>().unwrap(),
            Bound::Percentile(99.5)
        );
        assert_eq!("-2.5".parse::<Bound>().unwrap(), Bound::Value(-2.5));
        assert!("percentile(".parse::<Bound>().is_err());
        assert!("median(50)".parse::<Bound>().is_err());
        assert!("percentile(abc)".parse::<Bound>().is_err());
    }
}
