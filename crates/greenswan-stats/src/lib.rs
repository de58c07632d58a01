//! Numeric building blocks for the Green Swan analytics engine.
//!
//! Nothing here knows about countries or coalitions; every function works on
//! plain `f64` data so it can be tested in isolation.
//!
//! - **Matrix** ([`matrix`]): dense row-major storage with column centering
//! - **Projection** ([`pca`]): deterministic two-component PCA
//! - **Partitioning** ([`kmeans`]): seeded k-means++ / Lloyd clustering
//! - **Pairwise differences** ([`pairwise`]): mean absolute difference over all pairs
//! - **Descriptive statistics** ([`descriptive`]): mean, median, spread
//!
//! # Examples
//!
//! ## Projecting and clustering a matrix
//!
//! ```
//! use greenswan_stats::{kmeans::KMeans, matrix::Matrix, pca};
//!
//! let data = Matrix::from_rows(&[
//!     [0.0, 0.1, 0.2],
//!     [0.1, 0.0, 0.1],
//!     [4.0, 4.2, 3.9],
//!     [4.1, 3.8, 4.0],
//! ])
//! .unwrap();
//!
//! let projection = pca::project_2d(&data);
//! let fit = KMeans::new(2, 42).fit(&data).unwrap();
//!
//! assert_eq!(projection.coordinates.len(), 4);
//! assert_eq!(fit.labels[0], fit.labels[1]);
//! ```
//!
//! ## Pairwise differences
//!
//! ```
//! use greenswan_stats::pairwise::mean_absolute_pairwise_difference;
//!
//! assert_eq!(mean_absolute_pairwise_difference([1.0, 3.0, 6.0]), Some(10.0 / 3.0));
//! ```

pub mod descriptive;
pub mod kmeans;
pub mod matrix;
pub mod pairwise;
pub mod pca;
