//! Pairwise-difference statistics for scalar samples.
//!
//! The mean absolute pairwise difference (Gini mean difference) over `n`
//! values averages `|a - b|` across all `n·(n-1)/2` unordered pairs. Sorting
//! first turns the quadratic pair loop into a single weighted sum:
//!
//! ```text
//! Σ_{i<j} |x_j - x_i| = Σ_j x_(j) · (2j - (n - 1))     (x sorted ascending, j 0-based)
//! ```
//!
//! Because the sum always runs over sorted input, the result is bit-for-bit
//! independent of the order the values were supplied in.

/// Mean of `|a - b|` over all unordered pairs of `values`.
///
/// Returns `None` when fewer than two values are supplied; there is no pair
/// to average over.
///
/// # Examples
///
/// ```
/// use greenswan_stats::pairwise::mean_absolute_pairwise_difference;
///
/// let mean = mean_absolute_pairwise_difference([1.0, 3.0, 6.0]).unwrap();
/// assert!((mean - 10.0 / 3.0).abs() < 1e-12);
///
/// assert_eq!(mean_absolute_pairwise_difference([4.2]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_absolute_pairwise_difference<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted = values.into_iter().collect::<Vec<_>>();
    let n = sorted.len();
    if n < 2 {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let last = (n - 1) as f64;
    let total = sorted
        .iter()
        .enumerate()
        .map(|(j, x)| x * (2.0 * j as f64 - last))
        .sum::<f64>();
    let pairs = (n * (n - 1) / 2) as f64;
    Some(total / pairs)
}
