//! Means and percentages over data with missing values.
//!
//! Missing observations are represented as `None` and are excluded from the
//! denominator. An average over zero defined observations is `None`, never `0`.

/// Arithmetic mean of the values.
///
/// Returns `None` for an empty input.
///
/// # Examples
///
/// ```
/// use bestiary_stats::average::mean;
///
/// assert_eq!(mean([1.0, 2.0, 6.0]), Some(3.0));
/// assert_eq!(mean(std::iter::empty()), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Arithmetic mean over the defined values only.
///
/// `None` entries do not contribute to either the sum or the count.
#[must_use]
pub fn mean_defined<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    mean(values.into_iter().flatten())
}

/// `100 * part / total`, or `None` when `total` is zero.
///
/// # Examples
///
/// ```
/// use bestiary_stats::average::percentage;
///
/// assert_eq!(percentage(1, 4), Some(25.0));
/// assert_eq!(percentage(0, 0), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn percentage(part: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| 100.0 * part as f64 / total as f64)
}

/// Percentage of items satisfying `pred`.
#[must_use]
pub fn percentage_of<'a, T, I, F>(items: I, pred: F) -> Option<f64>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> bool,
{
    let (hits, total) = items
        .into_iter()
        .fold((0, 0), |(hits, total), item| {
            (hits + usize::from(pred(item)), total + 1)
        });
    percentage(hits, total)
}
