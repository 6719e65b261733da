//! A node of the cosine tree.
//!
//! A node holds a subset of the columns of the store together with the
//! statistics needed to sample split centers and to rank nodes by how badly
//! their mean direction approximates them:
//!
//! * the $\ell_2$ norm of every owned column,
//! * the prefix sums of the squared norms, whose last entry is the Frobenius
//!   mass of the node,
//! * the mean of the owned columns, the basis candidate of this node,
//! * the residual $\sum_i \|c_i\|^2 - (c_i^T\hat{m})^2$ of projecting the owned
//!   columns onto the normalized mean $\hat{m}$.
//!
//! All statistics are computed once at construction. A node is never modified
//! afterwards apart from linking its children.

use crate::column_store::ColumnStore;
use crate::tree::NodeId;
use crate::types::RealScalar;
use ndarray::{Array1, ArrayView1};
use num::traits::cast::cast;

pub struct CosineNode<A: RealScalar> {
    /// Position of this node in the tree arena.
    pub(crate) id: NodeId,
    /// Indices of the store columns owned by this node.
    pub(crate) columns: Vec<usize>,
    /// L2 norms of the owned columns.
    pub(crate) norms: Vec<A>,
    /// Cumulative sum of the squared norms, used for center sampling.
    pub(crate) cum_norm_squares: Vec<A>,
    /// Mean vector, added to the basis if this node becomes a leaf.
    pub(crate) mean: Array1<A>,
    /// Frobenius error of projecting the node onto its own mean direction.
    pub(crate) residual_error: A,
    pub(crate) is_left: bool,
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<A: RealScalar> CosineNode<A> {
    /// Create the root node, aliasing every column of the store.
    pub(crate) fn root<C: ColumnStore<A = A>>(store: &C, id: NodeId) -> Self {
        Self::with_columns(store, id, (0..store.ncols()).collect(), None, false, 0)
    }

    /// Create a child of `parent` owning `columns`.
    pub(crate) fn child<C: ColumnStore<A = A>>(
        store: &C,
        id: NodeId,
        parent: &CosineNode<A>,
        columns: Vec<usize>,
        is_left: bool,
    ) -> Self {
        Self::with_columns(
            store,
            id,
            columns,
            Some(parent.id),
            is_left,
            parent.depth + 1,
        )
    }

    fn with_columns<C: ColumnStore<A = A>>(
        store: &C,
        id: NodeId,
        columns: Vec<usize>,
        parent: Option<NodeId>,
        is_left: bool,
        depth: usize,
    ) -> Self {
        let mut node = CosineNode {
            id,
            columns,
            norms: Vec::new(),
            cum_norm_squares: Vec::new(),
            mean: Array1::zeros(store.nrows()),
            residual_error: A::zero(),
            is_left,
            depth,
            parent,
            left: None,
            right: None,
        };
        node.cal_stats(store);
        node
    }

    /// Compute norms, cumulative norm squares, the mean vector and the residual.
    fn cal_stats<C: ColumnStore<A = A>>(&mut self, store: &C) {
        let mut sum = A::zero();

        self.norms = Vec::with_capacity(self.columns.len());
        self.cum_norm_squares = Vec::with_capacity(self.columns.len());

        for &col_index in self.columns.iter() {
            let col = store.column(col_index);
            let norm_square = col.dot(&col);

            sum = sum + norm_square;
            self.norms.push(norm_square.sqrt());
            self.cum_norm_squares.push(sum);
            self.mean.scaled_add(A::one(), &col);
        }

        if !self.columns.is_empty() {
            let count: A = cast(self.columns.len()).unwrap_or_else(A::one);
            self.mean.mapv_inplace(|item| item / count);
        }

        self.residual_error = self.cal_residual(store);
    }

    fn cal_residual<C: ColumnStore<A = A>>(&self, store: &C) -> A {
        let mass = self.sum_l2();
        let mean_norm = self.mean.dot(&self.mean).sqrt();

        if mean_norm <= A::zero_threshold() {
            return mass;
        }

        let projected: A = self
            .columns
            .iter()
            .map(|&col_index| {
                let proj = store.column(col_index).dot(&self.mean) / mean_norm;
                proj * proj
            })
            .sum();

        (mass - projected).max(A::zero())
    }

    /// The position of this node in its tree.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Number of columns in this node.
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// The store indices of the owned columns.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Map a local column position to the column index in the store.
    pub fn orig_index(&self, local_index: usize) -> usize {
        self.columns[local_index]
    }

    /// View of the column at a local position.
    pub fn column<'a, C: ColumnStore<A = A>>(
        &self,
        store: &'a C,
        local_index: usize,
    ) -> ArrayView1<'a, A> {
        store.column(self.columns[local_index])
    }

    pub fn norms(&self) -> &[A] {
        &self.norms
    }

    pub fn cum_norm_squares(&self) -> &[A] {
        &self.cum_norm_squares
    }

    /// Sum of the squared L2 norms of the columns, i.e. the Frobenius mass.
    pub fn sum_l2(&self) -> A {
        self.cum_norm_squares.last().copied().unwrap_or_else(A::zero)
    }

    pub fn mean(&self) -> ArrayView1<A> {
        self.mean.view()
    }

    /// Priority of this node in the driver's queue.
    pub fn residual_error(&self) -> A {
        self.residual_error
    }

    pub fn is_left(&self) -> bool {
        self.is_left
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn has_left(&self) -> bool {
        self.left.is_some()
    }

    pub fn has_right(&self) -> bool {
        self.right.is_some()
    }

    /// A node is a leaf until it has been split.
    pub fn is_leaf(&self) -> bool {
        !self.has_left() && !self.has_right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2, Array2};

    macro_rules! node_statistics_tests {

        ($($name:ident: $scalar:ty, $tol:expr,)*) => {

            $(

        #[test]
        fn $name() {
            let mat: Array2<$scalar> = arr2(&[[3.0, 0.0, 1.0, 2.0], [4.0, 1.0, 0.0, 2.0]]);

            let root = CosineNode::root(&mat, NodeId(0));

            assert_eq!(root.ncols(), 4);
            assert!(root.is_leaf());
            assert!(root.parent().is_none());

            let expected_norms = [5.0, 1.0, 1.0, (8.0 as $scalar).sqrt()];
            for (&actual, &expected) in root.norms().iter().zip(expected_norms.iter()) {
                assert_relative_eq!(actual, expected, epsilon = $tol);
            }

            // Prefix sums are non-decreasing and end at the Frobenius mass.
            let cum = root.cum_norm_squares();
            assert!(cum.windows(2).all(|pair| pair[0] <= pair[1]));
            assert_relative_eq!(root.sum_l2(), 35.0, epsilon = $tol);
            assert_relative_eq!(cum[1], 26.0, epsilon = $tol);

            assert_relative_eq!(root.mean()[0], 1.5, epsilon = $tol);
            assert_relative_eq!(root.mean()[1], 1.75, epsilon = $tol);

            assert!(root.residual_error() >= 0.0);
            assert!(root.residual_error() <= root.sum_l2());
        }

            )*

        }
    }

    node_statistics_tests! {
        test_node_statistics_f32: f32, 1E-5,
        test_node_statistics_f64: f64, 1E-12,
    }

    #[test]
    fn test_child_maps_to_original_indices() {
        let mat = arr2(&[[1.0, 0.0, 2.0, 0.0], [0.0, 1.0, 0.0, 3.0]]);
        let root = CosineNode::root(&mat, NodeId(0));
        let child = CosineNode::child(&mat, NodeId(1), &root, vec![1, 3], false);

        assert_eq!(child.parent(), Some(NodeId(0)));
        assert!(!child.is_left());
        assert_eq!(child.depth(), 1);
        assert_eq!(child.orig_index(1), 3);
        assert_eq!(child.column(&mat, 1), arr1(&[0.0, 3.0]));
        assert_relative_eq!(child.sum_l2(), 10.0);

        // Both columns point along e_2, so the mean captures everything.
        assert_relative_eq!(child.residual_error(), 0.0, epsilon = 1E-12);
    }

    #[test]
    fn test_identical_columns_have_zero_residual() {
        let mat = arr2(&[[1.0, 1.0, 1.0, 1.0], [0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0]]);
        let root = CosineNode::root(&mat, NodeId(0));

        assert_eq!(root.mean(), arr1(&[1.0, 0.0, 0.0]));
        assert_relative_eq!(root.residual_error(), 0.0);
    }

    #[test]
    fn test_zero_mean_keeps_full_mass_as_residual() {
        let mat = arr2(&[[1.0, -1.0], [0.0, 0.0]]);
        let root = CosineNode::root(&mat, NodeId(0));

        assert_relative_eq!(root.sum_l2(), 2.0);
        assert_relative_eq!(root.residual_error(), 2.0);
    }

    #[test]
    fn test_orthogonal_directions_residual() {
        let mut mat = Array2::<f64>::zeros((2, 100));
        for index in 0..50 {
            mat[[0, index]] = 1.0;
            mat[[1, 50 + index]] = 1.0;
        }

        let root = CosineNode::root(&mat, NodeId(0));

        // Each unit column keeps half its mass along (1, 1) / sqrt(2).
        assert_relative_eq!(root.residual_error(), 50.0, epsilon = 1E-10);
    }
}
