//! Read-only access to the columns of the matrix being approximated.

use crate::types::{CosineTreeError, RealScalar, Result};
use ndarray::{Array1, ArrayBase, ArrayView1, Axis, Data, Ix2};
use num::Float;

/// Column Store Trait
///
/// The cosine tree only ever reads columns by index. Nodes alias the store
/// through index lists and never copy or mutate it.
pub trait ColumnStore {
    type A: RealScalar;

    // Return the number of rows (the dimension of every column).
    fn nrows(&self) -> usize;

    // Return the number of columns.
    fn ncols(&self) -> usize;

    // Return a view of the column with the given index.
    fn column(&self, index: usize) -> ArrayView1<Self::A>;

    /// Squared Frobenius norm of the whole store.
    fn frobenius_mass(&self) -> Self::A {
        (0..self.ncols())
            .map(|index| {
                let col = self.column(index);
                col.dot(&col)
            })
            .sum()
    }

    /// Compute $A^Tv$, the inner product of every column with `vec`.
    fn column_dots(&self, vec: ArrayView1<Self::A>) -> Array1<Self::A> {
        Array1::from_iter((0..self.ncols()).map(|index| self.column(index).dot(&vec)))
    }

    /// Check that the store is non-empty, contains only finite values and
    /// that its squared Frobenius norm is representable.
    fn check_valid(&self) -> Result<()> {
        if self.nrows() == 0 || self.ncols() == 0 {
            return Err(CosineTreeError::EmptyMatrix);
        }

        for col_index in 0..self.ncols() {
            if let Some(row) = self
                .column(col_index)
                .iter()
                .position(|item| !item.is_finite())
            {
                return Err(CosineTreeError::NonFiniteEntry {
                    row,
                    col: col_index,
                });
            }
        }

        if !self.frobenius_mass().is_finite() {
            return Err(CosineTreeError::MassOverflow);
        }

        Ok(())
    }
}

impl<A, S> ColumnStore for ArrayBase<S, Ix2>
where
    A: RealScalar,
    S: Data<Elem = A>,
{
    type A = A;

    fn nrows(&self) -> usize {
        self.len_of(Axis(0))
    }

    fn ncols(&self) -> usize {
        self.len_of(Axis(1))
    }

    fn column(&self, index: usize) -> ArrayView1<A> {
        self.index_axis(Axis(1), index)
    }

    fn column_dots(&self, vec: ArrayView1<A>) -> Array1<A> {
        self.t().dot(&vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_array_column_access() {
        let mat = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);

        assert_eq!(ColumnStore::nrows(&mat), 2);
        assert_eq!(ColumnStore::ncols(&mat), 3);
        assert_eq!(ColumnStore::column(&mat, 1), arr1(&[2.0, 5.0]));
        assert_relative_eq!(mat.frobenius_mass(), 91.0);
    }

    #[test]
    fn test_column_dots_match_transpose_product() {
        let mat = arr2(&[[1.0_f32, 0.0, 2.0], [0.0, 1.0, -1.0]]);
        let vec = arr1(&[3.0_f32, 4.0]);

        let dots = mat.column_dots(vec.view());

        assert_eq!(dots, arr1(&[3.0, 4.0, 2.0]));
    }

    #[test]
    fn test_check_valid_rejects_bad_input() {
        let empty = ndarray::Array2::<f64>::zeros((3, 0));
        assert_eq!(empty.check_valid(), Err(CosineTreeError::EmptyMatrix));

        let mut mat = ndarray::Array2::<f64>::ones((2, 2));
        mat[[1, 0]] = f64::NAN;
        assert_eq!(
            mat.check_valid(),
            Err(CosineTreeError::NonFiniteEntry { row: 1, col: 0 })
        );

        assert_eq!(ndarray::Array2::<f64>::ones((2, 2)).check_valid(), Ok(()));
    }

    #[test]
    fn test_check_valid_rejects_overflowing_mass() {
        // Every entry is finite but the squared norms are not.
        let mat = arr2(&[[1E20_f32, 0.0, 1E20], [0.0, 1E20, 1E20]]);

        assert!(!mat.frobenius_mass().is_finite());
        assert_eq!(mat.check_valid(), Err(CosineTreeError::MassOverflow));

        let scaled = mat.mapv(|item| item * 1E-20);
        assert_eq!(scaled.check_valid(), Ok(()));
    }
}
