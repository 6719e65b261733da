//! Length-squared sampling of split centers.

use crate::node::CosineNode;
use crate::types::RealScalar;
use log::trace;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

// Choose a split center for a node.
// Draws r uniformly from [0, sum_l2) and returns the smallest local index i
// with cum_norm_squares[i] > r, so that column i is chosen with probability
// norms[i]^2 / sum_l2. Returns `None` if the node carries no mass.
// # Arguments
// * `node`: The node to sample from.
// * `rng`: The random number generator.
pub fn choose_center<A: RealScalar, R: Rng>(node: &CosineNode<A>, rng: &mut R) -> Option<usize> {
    let total = node.sum_l2();

    if !(total > A::zero()) || !total.is_finite() {
        return None;
    }

    let r = Uniform::<A>::new(A::zero(), total).sample(rng);
    let local_index = node.cum_norm_squares().partition_point(|&item| item <= r);

    trace!(
        "Node {}: sampled r = {} of {}, center column {:?}",
        node.id(),
        r,
        total,
        node.columns().get(local_index)
    );

    if local_index < node.ncols() {
        Some(local_index)
    } else {
        None
    }
}
