//! Error measures used to validate approximations.

use crate::column_store::ColumnStore;
use crate::types::RealScalar;
use ndarray::{ArrayView1, ArrayView2, Axis};
use ndarray_linalg::Norm;

pub trait RelDiff {
    type A: RealScalar;

    /// Return the relative Frobenius norm difference of `first` and `second`.
    fn rel_diff_fro(first: ArrayView2<Self::A>, second: ArrayView2<Self::A>) -> Self::A;

    /// Return the relative l2 vector norm difference of `first` and `second`.
    fn rel_diff_l2(first: ArrayView1<Self::A>, second: ArrayView1<Self::A>) -> Self::A;
}

macro_rules! rel_diff_impl {
    ($scalar:ty) => {
        impl RelDiff for $scalar {
            type A = $scalar;
            fn rel_diff_fro(first: ArrayView2<Self::A>, second: ArrayView2<Self::A>) -> Self::A {
                let diff = first.to_owned() - &second;
                diff.norm_l2() / second.norm_l2()
            }

            fn rel_diff_l2(first: ArrayView1<Self::A>, second: ArrayView1<Self::A>) -> Self::A {
                let diff = first.to_owned() - &second;
                diff.norm_l2() / second.norm_l2()
            }
        }
    };
}

rel_diff_impl!(f32);
rel_diff_impl!(f64);

/// Squared Frobenius error $\|A - QQ^TA\|_F^2$ of projecting every column of
/// `store` onto the orthonormal columns of `basis`, computed column by column.
pub fn projection_error<C: ColumnStore>(store: &C, basis: ArrayView2<C::A>) -> C::A {
    (0..store.ncols())
        .map(|col_index| {
            let col = store.column(col_index);
            let mut remainder = col.to_owned();
            for q in basis.axis_iter(Axis(1)) {
                remainder.scaled_add(-q.dot(&col), &q);
            }
            remainder.dot(&remainder)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2, Array2};

    #[test]
    fn test_projection_error() {
        let mat = arr2(&[[1.0, 0.0, 2.0], [0.0, 3.0, 0.0], [0.0, 0.0, 1.0]]);
        let basis = arr2(&[[1.0], [0.0], [0.0]]);

        assert_relative_eq!(projection_error(&mat, basis.view()), 10.0);
        assert_relative_eq!(
            projection_error(&mat, Array2::<f64>::zeros((3, 0)).view()),
            mat.frobenius_mass()
        );
        assert_relative_eq!(projection_error(&mat, Array2::<f64>::eye(3).view()), 0.0);
    }

    #[test]
    fn test_rel_diff() {
        let first = arr1(&[3.0_f32, 4.0]);
        let second = arr1(&[0.0_f32, 4.0]);

        assert_relative_eq!(f32::rel_diff_l2(first.view(), second.view()), 0.75);

        let mat = arr2(&[[1.0, 2.0], [2.0, 4.0]]);
        assert_relative_eq!(f64::rel_diff_fro(mat.view(), mat.view()), 0.0);
    }
}
