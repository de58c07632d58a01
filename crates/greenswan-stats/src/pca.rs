//! Two-component principal component analysis.
//!
//! # Algorithm
//!
//! 1. Center every column on its mean (no scaling)
//! 2. Build the sample covariance matrix (`n - 1` denominator)
//! 3. Diagonalize it with [`nalgebra::SymmetricEigen`]
//! 4. Order eigenpairs by descending eigenvalue (stable, so ties keep solver order)
//! 5. Fix each component's sign so that its first non-zero loading is positive
//! 6. Project the centered rows onto the two leading components
//!
//! Every step is plain deterministic arithmetic, so the same input matrix
//! always produces bit-identical coordinates.
//!
//! # Degenerate input
//!
//! When the centered data spans fewer than two dimensions (constant columns,
//! perfectly collinear features, a single row) the trailing component carries
//! no variance. Its coordinates are reported as exactly `0.0` rather than
//! rounding noise, and no error is raised.

use nalgebra::{DMatrix, SymmetricEigen};

use crate::matrix::Matrix;

/// Relative threshold below which an eigenvalue counts as zero variance.
const DEGENERATE_TOLERANCE: f64 = 1e-12;

/// Loadings smaller than this are skipped by the sign rule.
const SIGN_EPSILON: f64 = 1e-12;

/// Result of projecting a matrix onto its two leading principal components.
#[derive(Debug, Clone, PartialEq)]
pub struct PcaProjection {
    /// `[pc1, pc2]` for every input row, in input order
    pub coordinates: Vec<[f64; 2]>,
    /// Unit loading vectors (one entry per input column) for PC1 and PC2
    pub components: [Vec<f64>; 2],
    /// Variance captured by each component
    pub explained_variance: [f64; 2],
    /// Share of the total variance captured by each component (zero when the
    /// input has no variance at all)
    pub explained_variance_ratio: [f64; 2],
}

/// Projects the rows of `data` onto its two leading principal components.
///
/// # Examples
///
/// ```
/// use greenswan_stats::{matrix::Matrix, pca};
///
/// // Points on the line y = 2x: all variance lies on one axis.
/// let data = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]]).unwrap();
/// let projection = pca::project_2d(&data);
///
/// assert_eq!(projection.coordinates.len(), 3);
/// assert!(projection.coordinates[0][0] < 0.0);
/// assert!(projection.coordinates.iter().all(|[_, pc2]| *pc2 == 0.0));
/// assert!((projection.explained_variance_ratio[0] - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn project_2d(data: &Matrix) -> PcaProjection {
    let d = data.ncols();
    let centered = data.centered();

    let (eigenvalues, eigenvectors) = if d == 0 {
        (vec![], DMatrix::zeros(0, 0))
    } else {
        let eigen = SymmetricEigen::new(covariance(&centered));
        (eigen.eigenvalues.iter().copied().collect::<Vec<_>>(), eigen.eigenvectors)
    };
    let total_variance = eigenvalues.iter().map(|v| v.max(0.0)).sum::<f64>();

    let mut order = (0..d).collect::<Vec<_>>();
    order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

    let mut components: [Vec<f64>; 2] = [vec![0.0; d], vec![0.0; d]];
    let mut explained_variance = [0.0; 2];
    let mut active = [false; 2];
    for (slot, &index) in order.iter().take(2).enumerate() {
        let mut vector = eigenvectors.column(index).iter().copied().collect::<Vec<_>>();
        normalize_sign(&mut vector);
        let variance = eigenvalues[index].max(0.0);
        components[slot] = vector;
        explained_variance[slot] = variance;
        active[slot] = total_variance > 0.0 && variance > DEGENERATE_TOLERANCE * total_variance;
    }

    let explained_variance_ratio = if total_variance > 0.0 {
        explained_variance.map(|v| v / total_variance)
    } else {
        [0.0; 2]
    };

    let coordinates = centered
        .rows()
        .map(|row| {
            let mut coords = [0.0; 2];
            for ((coord, component), active) in coords.iter_mut().zip(&components).zip(active) {
                if active {
                    *coord = dot(row, component);
                }
            }
            coords
        })
        .collect();

    PcaProjection {
        coordinates,
        components,
        explained_variance,
        explained_variance_ratio,
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Flips `vector` so that its first non-negligible entry is positive.
fn normalize_sign(vector: &mut [f64]) {
    let negative = vector
        .iter()
        .find(|v| v.abs() > SIGN_EPSILON)
        .is_some_and(|v| *v < 0.0);
    if negative {
        for v in vector.iter_mut() {
            *v = -*v;
        }
    }
}

/// Sample covariance (`n - 1` denominator, `1` for a single row) of
/// already-centered data.
#[expect(clippy::cast_precision_loss)]
fn covariance(centered: &Matrix) -> DMatrix<f64> {
    let x = DMatrix::from_row_slice(centered.nrows(), centered.ncols(), centered.as_slice());
    let denominator = centered.nrows().saturating_sub(1).max(1) as f64;
    (x.transpose() * &x) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_covariance() {
        let data = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0], [3.0, 9.0]]).unwrap();
        let cov = covariance(&data.centered());
        assert_close(cov[(0, 0)], 1.0);
        assert_close(cov[(0, 1)], 3.5);
        assert_close(cov[(1, 0)], 3.5);
        assert_close(cov[(1, 1)], 13.0);
    }

    #[test]
    fn test_leading_direction() {
        // Spread along (1, 1), small noise along (1, -1).
        let data = Matrix::from_rows(&[
            [-2.0, -2.0],
            [-1.0, -1.2],
            [0.0, 0.1],
            [1.0, 1.1],
            [2.0, 2.0],
        ])
        .unwrap();
        let projection = project_2d(&data);
        let [pc1, _] = &projection.components;
        assert!(pc1[0] > 0.0);
        assert!((pc1[0] - std::f64::consts::FRAC_1_SQRT_2).abs() < 0.05);
        assert!((pc1[1] - std::f64::consts::FRAC_1_SQRT_2).abs() < 0.05);
        assert!(projection.explained_variance_ratio[0] > 0.99);
    }

    #[test]
    fn test_always_two_coordinates() {
        let data = Matrix::from_rows(&[
            [1.0, 0.0, 3.0, 2.0, 5.0],
            [0.5, 1.0, 2.0, 2.5, 4.0],
            [3.0, 2.0, 0.0, 1.0, 1.0],
            [2.0, 2.5, 1.0, 0.0, 3.0],
        ])
        .unwrap();
        let projection = project_2d(&data);
        assert_eq!(projection.coordinates.len(), 4);
        assert_eq!(projection.components[0].len(), 5);
        assert_eq!(projection.components[1].len(), 5);
        assert!(projection.explained_variance[0] >= projection.explained_variance[1]);
    }

    #[test]
    fn test_deterministic() {
        let data = Matrix::from_rows(&[
            [0.2, 1.4, 3.3],
            [1.1, 0.7, 2.9],
            [2.5, 2.2, 0.4],
            [0.9, 3.1, 1.8],
            [1.7, 0.3, 2.2],
        ])
        .unwrap();
        assert_eq!(project_2d(&data), project_2d(&data));
    }

    #[test]
    fn test_sign_rule() {
        let data = Matrix::from_rows(&[
            [4.0, 1.0, 0.5],
            [2.0, 3.0, 1.5],
            [0.0, 0.5, 2.0],
            [1.0, 2.5, 0.0],
        ])
        .unwrap();
        let projection = project_2d(&data);
        for component in &projection.components {
            let first = component.iter().find(|v| v.abs() > SIGN_EPSILON).unwrap();
            assert!(*first > 0.0);
        }
    }

    #[test]
    fn test_components_are_orthonormal() {
        let data = Matrix::from_rows(&[
            [4.0, 1.0, 0.5],
            [2.0, 3.0, 1.5],
            [0.0, 0.5, 2.0],
            [1.0, 2.5, 0.0],
        ])
        .unwrap();
        let [pc1, pc2] = project_2d(&data).components;
        assert_close(dot(&pc1, &pc1), 1.0);
        assert_close(dot(&pc2, &pc2), 1.0);
        assert_close(dot(&pc1, &pc2), 0.0);
    }

    #[test]
    fn test_projection_preserves_variance() {
        // Two orthogonal directions: projection is a rotation of the input.
        let data = Matrix::from_rows(&[[2.0, 0.0], [-2.0, 0.0], [0.0, 1.0], [0.0, -1.0]]).unwrap();
        let projection = project_2d(&data);
        assert_close(projection.explained_variance[0], 8.0 / 3.0);
        assert_close(projection.explained_variance[1], 2.0 / 3.0);
        assert_close(projection.explained_variance_ratio[0], 0.8);
        assert_close(projection.coordinates[0][0], 2.0);
        assert_close(projection.coordinates[2][1].abs(), 1.0);
    }

    #[test]
    fn test_constant_columns_degenerate() {
        let data = Matrix::from_rows(&[[1.0, 5.0], [1.0, 5.0], [1.0, 5.0]]).unwrap();
        let projection = project_2d(&data);
        assert!(projection.coordinates.iter().all(|c| *c == [0.0, 0.0]));
        assert_eq!(projection.explained_variance_ratio, [0.0, 0.0]);
    }

    #[test]
    fn test_single_row() {
        let data = Matrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        let projection = project_2d(&data);
        assert_eq!(projection.coordinates, vec![[0.0, 0.0]]);
    }

    #[test]
    fn test_single_column_pads_second_component() {
        let data = Matrix::from_rows(&[[1.0], [2.0], [3.0]]).unwrap();
        let projection = project_2d(&data);
        assert_close(projection.coordinates[0][0], -1.0);
        assert!(projection.coordinates.iter().all(|c| c[1] == 0.0));
        assert_eq!(projection.components[1], vec![0.0]);
    }
}
