//! The cosine tree: an arena of nodes over the columns of a store.
//!
//! Nodes are addressed by [`NodeId`]. The tree owns every node, and parent and
//! child links are ids into the same arena. A node is split at most once: the
//! split samples a center column with probability proportional to its squared
//! norm, scores all columns of the node by their cosine with the center and
//! hands the columns closer to the largest score to the left child and the
//! rest to the right child.

use crate::column_store::ColumnStore;
use crate::node::CosineNode;
use crate::partition::{bipartition, cal_cosines};
use crate::sampling::choose_center;
use crate::types::{CosineTreeError, Result};
use log::debug;
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct CosineTree<'a, C: ColumnStore> {
    store: &'a C,
    nodes: Vec<CosineNode<C::A>>,
}

impl<'a, C: ColumnStore> CosineTree<'a, C> {
    /// Create a tree holding only the root node over all columns of `store`.
    pub fn new(store: &'a C) -> Self {
        let root = CosineNode::root(store, NodeId(0));
        CosineTree {
            store,
            nodes: vec![root],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn store(&self) -> &'a C {
        self.store
    }

    /// Number of nodes created so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&CosineNode<C::A>> {
        self.nodes.get(id.0).ok_or(CosineTreeError::InvalidNode(id))
    }

    /// Iterate over all nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &CosineNode<C::A>> {
        self.nodes.iter()
    }

    /// Ids of all nodes that have not been split.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| node.is_leaf())
            .map(|node| node.id())
            .collect()
    }

    /// Split a node into a left and a right child.
    ///
    /// Returns `Ok(None)` if the node cannot be split in a meaningful way:
    /// it has fewer than two columns, no mass, or all its columns have the
    /// same cosine with the sampled center. The node then stays a leaf.
    ///
    /// # Errors
    /// [`CosineTreeError::NodeAlreadySplit`] if `id` already has children and
    /// [`CosineTreeError::InvalidNode`] if `id` is not part of this tree.
    pub fn split<R: Rng>(&mut self, id: NodeId, rng: &mut R) -> Result<Option<(NodeId, NodeId)>> {
        let node = self.node(id)?;

        if !node.is_leaf() {
            return Err(CosineTreeError::NodeAlreadySplit(id));
        }

        if node.ncols() < 2 {
            return Ok(None);
        }

        let center_index = match choose_center(node, rng) {
            Some(index) => index,
            None => {
                debug!("Node {} has no mass to sample a center from", id);
                return Ok(None);
            }
        };

        let center = node.column(self.store, center_index);
        let cosines = cal_cosines(self.store, node, center);

        let (left_local, right_local) = match bipartition(&cosines) {
            Some(parts) => parts,
            None => {
                debug!(
                    "Node {} with {} columns has degenerate cosines, keeping it as a leaf",
                    id,
                    node.ncols()
                );
                return Ok(None);
            }
        };

        let left_columns: Vec<usize> = left_local.iter().map(|&i| node.orig_index(i)).collect();
        let right_columns: Vec<usize> = right_local.iter().map(|&i| node.orig_index(i)).collect();

        let left_id = NodeId(self.nodes.len());
        let right_id = NodeId(self.nodes.len() + 1);

        let left = CosineNode::child(self.store, left_id, node, left_columns, true);
        let right = CosineNode::child(self.store, right_id, node, right_columns, false);

        debug!(
            "Split node {} (center column {}) into {} with {} and {} with {} columns",
            id,
            node.orig_index(center_index),
            left_id,
            left.ncols(),
            right_id,
            right.ncols()
        );

        self.nodes.push(left);
        self.nodes.push(right);

        let parent = &mut self.nodes[id.0];
        parent.left = Some(left_id);
        parent.right = Some(right_id);

        Ok(Some((left_id, right_id)))
    }
}
