//! Tracking of the matrix mass captured by the span of the frontier means.
//!
//! When a node is split its mean is the average of its columns, hence a
//! convex combination of the two child means. Replacing a node by its children
//! therefore never shrinks the span of the frontier means: the span can only
//! grow by adding child means. The tracker keeps an orthonormal basis of that
//! span and the captured mass $\sum_j \|A^Tq_j\|^2$, so the global residual
//! $\|A\|_F^2 - \sum_j \|A^Tq_j\|^2$ is non-increasing over the run.

use crate::basis::orthogonalize_against;
use crate::column_store::ColumnStore;
use crate::types::RealScalar;
use ndarray::{Array1, ArrayView1};

pub struct SubspaceTracker<A: RealScalar> {
    basis: Vec<Array1<A>>,
    total_mass: A,
    captured_mass: A,
}

impl<A: RealScalar> SubspaceTracker<A> {
    pub fn new<C: ColumnStore<A = A>>(store: &C) -> Self {
        SubspaceTracker {
            basis: Vec::new(),
            total_mass: store.frobenius_mass(),
            captured_mass: A::zero(),
        }
    }

    /// Extend the tracked span by `vec`.
    ///
    /// Returns `true` if `vec` enlarged the span.
    pub fn add<C: ColumnStore<A = A>>(&mut self, store: &C, vec: ArrayView1<A>) -> bool {
        match orthogonalize_against(&self.basis, vec) {
            Some(q) => {
                let dots = store.column_dots(q.view());
                self.captured_mass = self.captured_mass + dots.dot(&dots);
                self.basis.push(q);
                true
            }
            None => false,
        }
    }

    /// Dimension of the tracked span.
    pub fn rank(&self) -> usize {
        self.basis.len()
    }

    pub fn total_mass(&self) -> A {
        self.total_mass
    }

    pub fn captured_mass(&self) -> A {
        self.captured_mass
    }

    /// Squared Frobenius error of projecting the store onto the tracked span.
    pub fn residual(&self) -> A {
        (self.total_mass - self.captured_mass).max(A::zero())
    }

    /// Residual relative to the total mass, zero for a zero matrix.
    pub fn relative_residual(&self) -> A {
        if self.total_mass > A::zero() {
            self.residual() / self.total_mass
        } else {
            A::zero()
        }
    }
}
