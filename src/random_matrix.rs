//! Generation of random test matrices for the real scalar types

use crate::basis::orthonormalize;
use crate::types::RealScalar;
use ndarray::{Array, Array2, Axis};
use num::traits::cast::cast;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

pub trait RandomMatrix
where
    Self: RealScalar,
{
    /// Generate a random Gaussian matrix.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `rng`: The random number generator to use.
    fn random_gaussian<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Self> {
        let mut mat = Array2::<Self>::zeros(dimension);
        mat.map_inplace(|item| {
            let sample: f64 = StandardNormal.sample(rng);
            *item = cast::<f64, Self>(sample).unwrap_or_else(Self::zero);
        });
        mat
    }

    /// Generate a random matrix with orthonormal columns.
    ///
    /// A Gaussian (m, n) matrix with m >= n is orthonormalized column by
    /// column with Gram-Schmidt. Gaussian columns are linearly independent
    /// with probability one, so the result has n columns.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `rng`: The random number generator to use.
    fn random_orthogonal_matrix<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Self> {
        assert!(
            dimension.0 >= dimension.1,
            "Matrix must have at least as many rows as columns."
        );

        let mat = Self::random_gaussian(dimension, rng);
        let (q, _) = orthonormalize(dimension.0, mat.axis_iter(Axis(1)));
        q
    }

    /// Generate a random approximate low-rank matrix.
    ///
    /// This function generates a random approximate low-rank matrix
    /// with singular values logarithmically distributed between
    /// `sigma_max` and `sigma_min`.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `sigma_max`: Maximum singular value.
    /// * `sigma_min`: Minimum singular value.
    /// * `rng`: The random number generator to use.
    fn random_approximate_low_rank_matrix<R: Rng>(
        dimension: (usize, usize),
        sigma_max: f64,
        sigma_min: f64,
        rng: &mut R,
    ) -> Array2<Self> {
        assert!(
            sigma_min < sigma_max,
            "`sigma_min` must be smaller than `sigma_max`"
        );
        assert!(sigma_min > 0.0, "`sigma_min` must be positive.");

        let min_dim = std::cmp::min(dimension.0, dimension.1);

        let u = Self::random_orthogonal_matrix((dimension.0, min_dim), rng);
        let v = Self::random_orthogonal_matrix((dimension.1, min_dim), rng);
        let singvals = Array::geomspace(sigma_max, sigma_min, min_dim)
            .unwrap_or_else(|| Array::zeros(min_dim))
            .mapv(|item| cast::<f64, Self>(item).unwrap_or_else(Self::zero));
        let sigma = Array2::from_diag(&singvals);
        u.dot(&sigma.dot(&v.t()))
    }
}

impl RandomMatrix for f64 {}

impl RandomMatrix for f32 {}
