//! NaN-aware column statistics and spacing helpers.
//!
//! Missing values are represented as `f32::NAN` and skipped by every
//! statistic here, matching the convention of the data module.

/// Compute the empirical percentile of a slice, ignoring NaN values.
///
/// Uses linear interpolation between order statistics: for `n` finite values
/// the percentile `p` sits at rank `p / 100 * (n - 1)`, and fractional ranks
/// interpolate between the two neighboring values.
///
/// Returns `None` when the slice contains no finite values. `p` is clamped
/// to `[0, 100]`.
pub fn nan_percentile(values: &[f32], p: f32) -> Option<f32> {
    let mut sorted: Vec<f32> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    if n == 1 {
        return Some(sorted[0]);
    }

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f32;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Minimum of a slice, ignoring NaN values. `None` when no finite value exists.
pub fn nan_min(values: &[f32]) -> Option<f32> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f32| a.min(v))))
}

/// Maximum of a slice, ignoring NaN values. `None` when no finite value exists.
pub fn nan_max(values: &[f32]) -> Option<f32> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f32| a.max(v))))
}

/// Build `n` evenly spaced values over `[lo, hi]`, endpoints inclusive.
///
/// `n == 1` yields just `lo`. `n == 0` yields an empty vector; callers
/// validate point counts before sweeping.
pub fn linspace(lo: f32, hi: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f32;
            (0..n).map(|i| lo + step * i as f32).collect()
        }
    }
}
