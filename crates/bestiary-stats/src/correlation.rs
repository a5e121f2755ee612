//! Pearson correlation and ordinary least squares over paired observations.
//!
//! Both functions consume the same `(x, y)` pairs so that a trend line and
//! its correlation label always describe the same points. Callers are
//! expected to drop pairs with a missing coordinate before calling.
//!
//! # Degenerate input
//!
//! With fewer than two points, or when either axis has no variance, the
//! statistics are undefined:
//!
//! - [`pearson`] returns `None`
//! - [`linear_regression`] returns [`Regression::INVALID`]
//!
//! ```
//! use bestiary_stats::correlation::{linear_regression, pearson};
//!
//! // constant y
//! let flat = [(0.0, 3.0), (1.0, 3.0), (2.0, 3.0)];
//! assert_eq!(pearson(flat), None);
//!
//! // constant x
//! let vertical = [(1.0, 0.0), (1.0, 5.0)];
//! assert!(!linear_regression(vertical).valid);
//! ```

/// Running sums needed by both Pearson correlation and OLS.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PairedSums {
    pub n: usize,
    pub sum_x: f64,
    pub sum_y: f64,
    pub sum_xy: f64,
    pub sum_xx: f64,
    pub sum_yy: f64,
}

impl PairedSums {
    /// Accumulates sums over the given pairs.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        pairs.into_iter().fold(Self::default(), |mut acc, (x, y)| {
            acc.n += 1;
            acc.sum_x += x;
            acc.sum_y += y;
            acc.sum_xy += x * y;
            acc.sum_xx += x * x;
            acc.sum_yy += y * y;
            acc
        })
    }

    #[expect(clippy::cast_precision_loss)]
    fn n_f64(&self) -> f64 {
        self.n as f64
    }

    /// `nΣxy − ΣxΣy`
    fn covariance_term(&self) -> f64 {
        self.n_f64() * self.sum_xy - self.sum_x * self.sum_y
    }

    /// `nΣx² − (Σx)²`, clamped to zero when it is within rounding noise.
    fn x_variance_term(&self) -> f64 {
        variance_term(self.n_f64(), self.sum_x, self.sum_xx)
    }

    /// `nΣy² − (Σy)²`, clamped to zero when it is within rounding noise.
    fn y_variance_term(&self) -> f64 {
        variance_term(self.n_f64(), self.sum_y, self.sum_yy)
    }
}

fn variance_term(n: f64, sum: f64, sum_sq: f64) -> f64 {
    let term = n * sum_sq - sum * sum;
    // Cancellation error scales with the magnitude of the operands.
    let noise = 4.0 * f64::EPSILON * (n * sum_sq).abs();
    if term <= noise { 0.0 } else { term }
}

/// Pearson product-moment correlation coefficient.
///
/// `r = (nΣxy − ΣxΣy) / sqrt((nΣx² − (Σx)²)(nΣy² − (Σy)²))`
///
/// Returns `None` when there are fewer than two pairs or when the argument of
/// the square root is not positive (zero variance on either axis).
///
/// # Examples
///
/// ```
/// use bestiary_stats::correlation::pearson;
///
/// let r = pearson([(1.0, 3.0), (2.0, 2.0), (3.0, 1.0)]).unwrap();
/// assert!((r + 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn pearson<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let sums = PairedSums::from_pairs(pairs);
    if sums.n < 2 {
        return None;
    }
    let radicand = sums.x_variance_term() * sums.y_variance_term();
    if radicand <= 0.0 {
        return None;
    }
    let r = sums.covariance_term() / radicand.sqrt();
    Some(r.clamp(-1.0, 1.0))
}

/// Result of an ordinary least squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    /// `false` when the fit is undefined; `slope` and `intercept` are then `0`.
    pub valid: bool,
}

impl Regression {
    pub const INVALID: Self = Self {
        slope: 0.0,
        intercept: 0.0,
        valid: false,
    };

    /// Evaluates the fitted line at `x`, or `None` for an invalid fit.
    #[must_use]
    pub fn predict(&self, x: f64) -> Option<f64> {
        self.valid.then(|| self.slope * x + self.intercept)
    }
}

/// Ordinary least squares linear regression.
///
/// - `slope = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)`
/// - `intercept = ȳ − slope·x̄`
///
/// Returns [`Regression::INVALID`] when there are fewer than two pairs or all
/// `x` values are equal.
#[must_use]
pub fn linear_regression<I>(pairs: I) -> Regression
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let sums = PairedSums::from_pairs(pairs);
    if sums.n < 2 {
        return Regression::INVALID;
    }
    let denominator = sums.x_variance_term();
    if denominator <= 0.0 {
        return Regression::INVALID;
    }
    let n = sums.n_f64();
    let slope = sums.covariance_term() / denominator;
    let intercept = sums.sum_y / n - slope * (sums.sum_x / n);
    Regression {
        slope,
        intercept,
        valid: true,
    }
}
