//! K-means partitioning (Lloyd's algorithm) with seeded k-means++ initialization.
//!
//! # Algorithm
//!
//! 1. **Seeding**: choose `k` initial centroids among the rows with k-means++,
//!    drawing from a [`Pcg64`] seeded with the caller's seed
//! 2. **Assignment**: attach every row to its nearest centroid (Euclidean
//!    distance; ties go to the lowest centroid index)
//! 3. **Update**: move every centroid to the mean of its rows; a centroid that
//!    lost all its rows stays where it was
//! 4. Repeat 2-3 until no row changes cluster or the iteration cap is reached
//!
//! # Determinism
//!
//! The only source of randomness is the seeded generator, so the same matrix,
//! `k` and seed always yield the same labels. Label *numbering* depends on the
//! seed; callers must not compare labels across seeds.
//!
//! # Examples
//!
//! ```
//! use greenswan_stats::{kmeans::KMeans, matrix::Matrix};
//!
//! let data = Matrix::from_rows(&[[0.0, 0.0], [0.1, 0.0], [5.0, 5.0], [5.1, 5.0]]).unwrap();
//! let fit = KMeans::new(2, 42).fit(&data).unwrap();
//!
//! assert_eq!(fit.labels[0], fit.labels[1]);
//! assert_eq!(fit.labels[2], fit.labels[3]);
//! assert_ne!(fit.labels[0], fit.labels[2]);
//! assert!(fit.converged);
//! ```

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

use crate::matrix::{Matrix, squared_euclidean};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum KMeansError {
    #[display("cluster count {k} must be between 2 and the number of rows ({rows})")]
    InvalidClusterCount { k: usize, rows: usize },
}

/// K-means configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeans {
    /// Number of clusters
    pub k: usize,
    /// Seed for the k-means++ initialization
    pub seed: u64,
    /// Upper bound on assignment/update rounds
    pub max_iterations: usize,
}

/// Outcome of a k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    /// Cluster label in `0..k` for every row, in input order
    pub labels: Vec<usize>,
    /// Final centroids, one row per cluster
    pub centroids: Matrix,
    /// Sum of squared distances from each row to its assigned centroid
    pub inertia: f64,
    /// Number of assignment rounds performed
    pub iterations: usize,
    /// Whether the run stopped because no assignment changed; `false` when
    /// the iteration cap was hit
    pub converged: bool,
}

impl KMeans {
    pub const DEFAULT_MAX_ITERATIONS: usize = 300;

    #[must_use]
    pub fn new(k: usize, seed: u64) -> Self {
        Self {
            k,
            seed,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Partitions the rows of `data` into `k` clusters.
    ///
    /// Fails with [`KMeansError::InvalidClusterCount`] unless
    /// `2 <= k <= data.nrows()`.
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(&self, data: &Matrix) -> Result<KMeansFit, KMeansError> {
        let n = data.nrows();
        let k = self.k;
        if k < 2 || k > n {
            return Err(KMeansError::InvalidClusterCount { k, rows: n });
        }

        let mut centroids = self.initial_centroids(data);
        let mut labels = vec![usize::MAX; n];
        let mut iterations = 0;
        let mut converged = false;

        for _ in 0..self.max_iterations.max(1) {
            iterations += 1;

            if !assign(&mut labels, data, &centroids) {
                converged = true;
                break;
            }

            let mut sums = Matrix::zeros(k, data.ncols());
            let mut counts = vec![0_usize; k];
            for (&label, row) in labels.iter().zip(data.rows()) {
                counts[label] += 1;
                for (j, value) in row.iter().enumerate() {
                    sums[(label, j)] += value;
                }
            }
            for (c, &count) in counts.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                for j in 0..data.ncols() {
                    centroids[(c, j)] = sums[(c, j)] / count as f64;
                }
            }
        }

        // the cap hit right after an update: relabel against the moved centroids
        if !converged {
            assign(&mut labels, data, &centroids);
        }

        let inertia = labels
            .iter()
            .zip(data.rows())
            .map(|(&label, row)| squared_euclidean(row, centroids.row(label)))
            .sum::<f64>();

        tracing::debug!(k, iterations, converged, inertia, "k-means finished");

        Ok(KMeansFit {
            labels,
            centroids,
            inertia,
            iterations,
            converged,
        })
    }

    /// k-means++ seeding: each further centroid is drawn with probability
    /// proportional to its squared distance from the nearest chosen one.
    fn initial_centroids(&self, data: &Matrix) -> Matrix {
        let n = data.nrows();
        let mut rng = Pcg64::seed_from_u64(self.seed);

        let first = rng.random_range(0..n);
        let mut chosen = vec![first];
        let mut nearest = data
            .rows()
            .map(|row| squared_euclidean(row, data.row(first)))
            .collect::<Vec<_>>();

        while chosen.len() < self.k {
            let total = nearest.iter().sum::<f64>();
            let next = if total > 0.0 {
                let target = rng.random::<f64>() * total;
                let mut cumulative = 0.0;
                nearest
                    .iter()
                    .enumerate()
                    .filter(|(_, weight)| **weight > 0.0)
                    .find(|(_, weight)| {
                        cumulative += **weight;
                        cumulative > target
                    })
                    .or_else(|| nearest.iter().enumerate().rfind(|(_, weight)| **weight > 0.0))
                    .map_or(0, |(i, _)| i)
            } else {
                // every row coincides with a chosen centroid
                (0..n).find(|i| !chosen.contains(i)).unwrap_or(0)
            };
            chosen.push(next);
            for (distance, row) in nearest.iter_mut().zip(data.rows()) {
                *distance = distance.min(squared_euclidean(row, data.row(next)));
            }
        }

        let mut centroids = Matrix::zeros(self.k, data.ncols());
        for (c, &i) in chosen.iter().enumerate() {
            for (j, &value) in data.row(i).iter().enumerate() {
                centroids[(c, j)] = value;
            }
        }
        centroids
    }
}

impl KMeansFit {
    /// Returns the label of the centroid nearest to `point`.
    #[must_use]
    pub fn predict(&self, point: &[f64]) -> usize {
        nearest_centroid(point, &self.centroids)
    }
}

/// Moves every row to its nearest centroid; returns whether any label changed.
fn assign(labels: &mut [usize], data: &Matrix, centroids: &Matrix) -> bool {
    let mut changed = false;
    for (label, row) in labels.iter_mut().zip(data.rows()) {
        let nearest = nearest_centroid(row, centroids);
        if *label != nearest {
            *label = nearest;
            changed = true;
        }
    }
    changed
}

/// Index of the centroid closest to `point`; the lowest index wins ties.
fn nearest_centroid(point: &[f64], centroids: &Matrix) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (c, centroid) in centroids.rows().enumerate() {
        let distance = squared_euclidean(point, centroid);
        if distance < best_distance {
            best = c;
            best_distance = distance;
        }
    }
    best
}
