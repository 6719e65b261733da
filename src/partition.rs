//! Cosine scoring and bipartitioning of a node's columns.

use crate::column_store::ColumnStore;
use crate::node::CosineNode;
use crate::types::RealScalar;
use itertools::{Itertools, MinMaxResult};
use ndarray::ArrayView1;
use num::{Float, Zero};

/// Cosine of every column in `node` with respect to `center`.
///
/// Columns with a norm at or below [`RealScalar::zero_threshold`] score zero,
/// and so does every column if the center itself has zero norm.
pub fn cal_cosines<C: ColumnStore>(
    store: &C,
    node: &CosineNode<C::A>,
    center: ArrayView1<C::A>,
) -> Vec<C::A> {
    let center_norm = center.dot(&center).sqrt();

    if center_norm <= C::A::zero_threshold() {
        return vec![C::A::zero(); node.ncols()];
    }

    node.columns()
        .iter()
        .zip(node.norms().iter())
        .map(|(&col_index, &norm)| {
            if norm <= C::A::zero_threshold() {
                C::A::zero()
            } else {
                store.column(col_index).dot(&center) / (norm * center_norm)
            }
        })
        .collect()
}

/// Split local column positions in two by their cosine scores.
///
/// A column goes to the left group if its score is at least as close to the
/// largest score as to the smallest one. Both groups keep the original order.
/// Returns `None` if all scores agree to within $\sqrt{\epsilon}$, as the split
/// would then only follow rounding errors.
pub fn bipartition<A: RealScalar>(cosines: &[A]) -> Option<(Vec<usize>, Vec<usize>)> {
    let (cmin, cmax) = match cosines.iter().copied().minmax_by(cmp_scores) {
        MinMaxResult::MinMax(cmin, cmax) => (cmin, cmax),
        MinMaxResult::OneElement(_) | MinMaxResult::NoElements => return None,
    };

    if !(cmax - cmin > A::epsilon().sqrt()) {
        return None;
    }

    let (left, right): (Vec<usize>, Vec<usize>) = (0..cosines.len())
        .partition(|&index| cmax - cosines[index] <= cosines[index] - cmin);

    if left.is_empty() || right.is_empty() {
        None
    } else {
        Some((left, right))
    }
}

fn cmp_scores<A: RealScalar>(first: &A, second: &A) -> std::cmp::Ordering {
    first
        .partial_cmp(second)
        .unwrap_or(std::cmp::Ordering::Equal)
}
