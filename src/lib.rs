//! Adaptive low rank approximation with cosine trees.
//!
//! A cosine tree recursively bipartitions the columns of a matrix by their
//! angle to a center column sampled with probability proportional to its
//! squared norm. The tree is grown best-first: the node whose mean direction
//! represents its columns worst is split next, until the columns projected
//! onto the span of the leaf means approximate the matrix to a relative
//! squared Frobenius tolerance or the rank budget is used up.
//!
//! ```
//! use cosine_tree::prelude::*;
//! use ndarray::Array2;
//!
//! let mut mat = Array2::<f64>::zeros((2, 10));
//! for index in 0..5 {
//!     mat[[0, index]] = 1.0;
//!     mat[[1, 5 + index]] = 1.0;
//! }
//!
//! let config = CosineTreeConfig::new(2, 1E-2).with_seed(0);
//! let result = cosine_tree_approximation(&mat, config).unwrap();
//!
//! assert!(result.tolerance_met());
//! assert_eq!(result.rank(), 2);
//! ```

pub mod approximation;
pub mod basis;
pub mod column_store;
pub mod config;
pub mod driver;
pub mod helpers;
pub mod node;
pub mod partition;
pub mod prelude;
pub mod random_matrix;
pub mod sampling;
pub mod subspace;
pub mod tree;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use approximation::CosineTreeApproximation;
pub use basis::{BasisAccumulator, Leaf};
pub use column_store::ColumnStore;
pub use config::CosineTreeConfig;
pub use driver::{cosine_tree_approximation, CosineTreeDriver};
pub use helpers::{projection_error, RelDiff};
pub use node::CosineNode;
pub use random_matrix::RandomMatrix;
pub use tree::{CosineTree, NodeId};
pub use types::{CosineTreeError, RealScalar, Result};
