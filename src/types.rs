//! Error type, result alias and the scalar trait shared by all modules.

use ndarray::{LinalgScalar, ScalarOperand};
use num::{Float, FromPrimitive};
use rand::distributions::uniform::SampleUniform;
use std::fmt::{Debug, Display};
use std::iter::Sum;
use thiserror::Error;

use crate::tree::NodeId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CosineTreeError {
    #[error("Matrix has no rows or no columns")]
    EmptyMatrix,
    #[error("Target rank must be positive, got {0}")]
    InvalidRank(usize),
    #[error("Error tolerance must lie in (0, 1], got {0}")]
    InvalidTolerance(f64),
    #[error("Matrix entry ({row}, {col}) is not finite")]
    NonFiniteEntry { row: usize, col: usize },
    #[error("Squared Frobenius norm of the matrix overflows")]
    MassOverflow,
    #[error("Node {0} has already been split")]
    NodeAlreadySplit(NodeId),
    #[error("Node {0} does not exist in this tree")]
    InvalidNode(NodeId),
}

pub type Result<T> = std::result::Result<T, CosineTreeError>;

/// Real floating point types the cosine tree can operate on.
pub trait RealScalar:
    Float
    + FromPrimitive
    + LinalgScalar
    + ScalarOperand
    + SampleUniform
    + Sum
    + Debug
    + Display
    + Send
    + Sync
{
    /// Norms at or below this value are treated as zero.
    fn zero_threshold() -> Self;
}

macro_rules! real_scalar_impl {
    ($scalar:ty, $threshold:expr) => {
        impl RealScalar for $scalar {
            fn zero_threshold() -> Self {
                $threshold
            }
        }
    };
}

real_scalar_impl!(f32, 1E-20);
real_scalar_impl!(f64, 1E-100);
