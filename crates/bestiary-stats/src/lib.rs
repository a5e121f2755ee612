//! Numeric kernels for the bestiary dashboard.
//!
//! This crate has no knowledge of monsters. It provides the small set of
//! statistical tools the aggregators are built from:
//!
//! - **Averages over partially-defined data**: means that skip missing values
//!   instead of counting them as zero
//! - **Descriptive statistics**: min, max, mean, median, and spread of a dataset
//! - **Correlation and regression**: Pearson product-moment correlation and
//!   ordinary least squares over paired observations
//!
//! # Modules
//!
//! - [`average`]: Means and percentages that tolerate missing values
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`correlation`]: Pearson correlation and linear regression
//!
//! # Examples
//!
//! ## Averaging a column with gaps
//!
//! ```
//! use bestiary_stats::average::mean_defined;
//!
//! let hit_points = [Some(10.0), None, Some(20.0)];
//! assert_eq!(mean_defined(hit_points), Some(15.0));
//! assert_eq!(mean_defined([None, None]), None);
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use bestiary_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Fitting a trend line
//!
//! ```
//! use bestiary_stats::correlation::{linear_regression, pearson};
//!
//! let points = [(0.0, 0.0), (1.0, 2.0), (2.0, 4.0)];
//! assert!((pearson(points).unwrap() - 1.0).abs() < 1e-12);
//!
//! let fit = linear_regression(points);
//! assert!(fit.valid);
//! assert!((fit.slope - 2.0).abs() < 1e-12);
//! ```

pub mod average;
pub mod correlation;
pub mod descriptive;
