//! The result of a cosine tree run.

use crate::basis::Leaf;
use crate::column_store::ColumnStore;
use crate::tree::CosineTree;
use ndarray::{Array2, ArrayView2, Axis};

pub struct CosineTreeApproximation<'a, C: ColumnStore> {
    pub(crate) tree: CosineTree<'a, C>,
    pub(crate) leaves: Vec<Leaf<C::A>>,
    pub(crate) basis: Array2<C::A>,
    pub(crate) leaf_of_column: Vec<usize>,
    pub(crate) residual: C::A,
    pub(crate) total_mass: C::A,
    pub(crate) tolerance_met: bool,
    pub(crate) splits: usize,
    pub(crate) residual_history: Vec<(usize, C::A)>,
}

impl<'a, C: ColumnStore> CosineTreeApproximation<'a, C> {
    /// Orthonormal basis, one column per basis vector.
    pub fn basis(&self) -> ArrayView2<C::A> {
        self.basis.view()
    }

    /// Number of basis vectors.
    pub fn rank(&self) -> usize {
        self.basis.len_of(Axis(1))
    }

    /// The accepted leaves in acceptance order.
    pub fn leaves(&self) -> &[Leaf<C::A>] {
        &self.leaves
    }

    /// For every store column the index into [`Self::leaves`] of its leaf.
    pub fn leaf_of_column(&self) -> &[usize] {
        &self.leaf_of_column
    }

    /// Coefficients of the columns in the basis, $Q^TA$.
    pub fn coefficients(&self) -> Array2<C::A> {
        let store = self.tree.store();
        let mut coeffs = Array2::<C::A>::zeros((self.rank(), store.ncols()));

        for (mut row, q) in coeffs.axis_iter_mut(Axis(0)).zip(self.basis.axis_iter(Axis(1))) {
            row.assign(&store.column_dots(q));
        }

        coeffs
    }

    /// The approximation $QQ^TA$ as a dense matrix.
    pub fn to_mat(&self) -> Array2<C::A> {
        self.basis.dot(&self.coefficients())
    }

    /// Squared Frobenius error of the approximation.
    pub fn residual(&self) -> C::A {
        self.residual
    }

    /// Squared Frobenius norm of the store.
    pub fn total_mass(&self) -> C::A {
        self.total_mass
    }

    /// Residual relative to the total mass.
    pub fn relative_residual(&self) -> C::A {
        if self.total_mass > num::zero() {
            self.residual / self.total_mass
        } else {
            num::zero()
        }
    }

    /// Whether the requested tolerance was reached. This is `false` if the
    /// rank budget ran out or no node could be split any further first.
    pub fn tolerance_met(&self) -> bool {
        self.tolerance_met
    }

    /// Number of node splits performed.
    pub fn splits(&self) -> usize {
        self.splits
    }

    /// Pairs of (rank of the frontier span, relative residual), recorded for
    /// the root and after every split.
    pub fn residual_history(&self) -> &[(usize, C::A)] {
        &self.residual_history
    }

    pub fn tree(&self) -> &CosineTree<'a, C> {
        &self.tree
    }
}
