//! Collect all traits and other exports here.

pub use crate::approximation::CosineTreeApproximation;
pub use crate::column_store::ColumnStore;
pub use crate::config::CosineTreeConfig;
pub use crate::driver::{cosine_tree_approximation, CosineTreeDriver};
pub use crate::helpers::*;
pub use crate::random_matrix::RandomMatrix;
pub use crate::tree::{CosineTree, NodeId};
pub use crate::types::{CosineTreeError, RealScalar, Result};
