//! Collection of leaf means and their orthonormalization.

use crate::tree::NodeId;
use crate::types::RealScalar;
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// A node accepted into the final partition.
#[derive(Debug, Clone)]
pub struct Leaf<A: RealScalar> {
    /// The tree node this leaf was taken from.
    pub node: NodeId,
    /// Store indices of the columns assigned to this leaf.
    pub columns: Vec<usize>,
    /// The mean of the columns, i.e. the basis candidate of the leaf.
    pub mean: Array1<A>,
    /// Residual of the columns against the leaf mean alone.
    pub residual_error: A,
    /// Column of the basis contributed by this leaf. `None` until the
    /// accumulator is finished, and afterwards if the mean was zero or
    /// numerically in the span of earlier leaf means.
    pub basis_index: Option<usize>,
}

/// Orthonormalize `vec` against the orthonormal vectors in `basis`.
///
/// Uses two passes of modified Gram-Schmidt. Returns `None` if what remains
/// of `vec` is below $\sqrt{\epsilon}\|vec\|$, i.e. `vec` is numerically in the
/// span of `basis`, or if `vec` itself is zero.
pub fn orthogonalize_against<A: RealScalar>(
    basis: &[Array1<A>],
    vec: ArrayView1<A>,
) -> Option<Array1<A>> {
    let norm = vec.dot(&vec).sqrt();

    if norm <= A::zero_threshold() {
        return None;
    }

    let mut remainder = vec.to_owned();

    for _ in 0..2 {
        for q in basis {
            let proj = q.dot(&remainder);
            remainder.scaled_add(-proj, q);
        }
    }

    let remainder_norm = remainder.dot(&remainder).sqrt();

    if remainder_norm <= A::epsilon().sqrt() * norm {
        return None;
    }

    remainder.mapv_inplace(|item| item / remainder_norm);
    Some(remainder)
}

/// Orthonormalize a sequence of vectors of length `dim`.
///
/// Returns a `dim x k` matrix with orthonormal columns, together with the
/// positions of the input vectors that contributed a column. Vectors that are
/// linearly dependent on their predecessors are skipped.
pub fn orthonormalize<'a, A, I>(dim: usize, vectors: I) -> (Array2<A>, Vec<usize>)
where
    A: RealScalar,
    I: IntoIterator<Item = ArrayView1<'a, A>>,
{
    let mut basis: Vec<Array1<A>> = Vec::new();
    let mut kept = Vec::new();

    for (index, vec) in vectors.into_iter().enumerate() {
        if let Some(q) = orthogonalize_against(&basis, vec) {
            basis.push(q);
            kept.push(index);
        }
    }

    (stack_columns(dim, &basis), kept)
}

pub(crate) fn stack_columns<A: RealScalar>(dim: usize, columns: &[Array1<A>]) -> Array2<A> {
    let mut mat = Array2::<A>::zeros((dim, columns.len()));

    for (mut target, col) in mat.axis_iter_mut(Axis(1)).zip(columns.iter()) {
        target.assign(col);
    }

    mat
}

/// Collects accepted leaves in acceptance order.
pub struct BasisAccumulator<A: RealScalar> {
    dim: usize,
    ncols: usize,
    leaves: Vec<Leaf<A>>,
}

impl<A: RealScalar> BasisAccumulator<A> {
    /// Create an accumulator for a store with `dim` rows and `ncols` columns.
    pub fn new(dim: usize, ncols: usize) -> Self {
        BasisAccumulator {
            dim,
            ncols,
            leaves: Vec::new(),
        }
    }

    pub fn push(&mut self, leaf: Leaf<A>) {
        self.leaves.push(leaf);
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn leaves(&self) -> &[Leaf<A>] {
        &self.leaves
    }

    /// Orthonormalize the leaf means and assign every column to its leaf.
    ///
    /// Returns the leaves with their basis column set, the basis and, for
    /// every store column, the index of the leaf owning it.
    pub fn finish(mut self) -> (Vec<Leaf<A>>, Array2<A>, Vec<usize>) {
        let means = self.leaves.iter().map(|leaf| leaf.mean.view());
        let (basis, kept) = orthonormalize(self.dim, means);

        for leaf in self.leaves.iter_mut() {
            leaf.basis_index = None;
        }
        for (basis_index, &leaf_index) in kept.iter().enumerate() {
            self.leaves[leaf_index].basis_index = Some(basis_index);
        }

        let mut leaf_of_column = vec![usize::MAX; self.ncols];
        for (leaf_index, leaf) in self.leaves.iter().enumerate() {
            for &col in leaf.columns.iter() {
                leaf_of_column[col] = leaf_index;
            }
        }

        (self.leaves, basis, leaf_of_column)
    }
}
