//! Best-first construction of the cosine tree.
//!
//! The driver keeps a max-priority queue of frontier nodes ordered by their
//! residual error. In every step it either stops, because the residual of the
//! whole matrix against the span of the frontier means is within tolerance,
//! or pops the worst approximated node and splits it. Nodes that cannot or
//! may not be split are accepted as leaves and contribute their mean to the
//! basis.

use crate::approximation::CosineTreeApproximation;
use crate::basis::{BasisAccumulator, Leaf};
use crate::column_store::ColumnStore;
use crate::config::CosineTreeConfig;
use crate::subspace::SubspaceTracker;
use crate::tree::{CosineTree, NodeId};
use crate::types::{CosineTreeError, RealScalar, Result};
use log::{debug, info, warn};
use num::traits::cast::cast;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Queue entry ordered by residual error, ties going to the older node.
struct QueueEntry<A: RealScalar> {
    residual_error: A,
    id: NodeId,
}

impl<A: RealScalar> PartialEq for QueueEntry<A> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<A: RealScalar> Eq for QueueEntry<A> {}

impl<A: RealScalar> PartialOrd for QueueEntry<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: RealScalar> Ord for QueueEntry<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.residual_error
            .partial_cmp(&other.residual_error)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.id.cmp(&self.id))
    }
}

pub struct CosineTreeDriver<'a, C: ColumnStore> {
    tree: CosineTree<'a, C>,
    config: CosineTreeConfig,
    queue: BinaryHeap<QueueEntry<C::A>>,
    accumulator: BasisAccumulator<C::A>,
    tracker: SubspaceTracker<C::A>,
    target_residual: C::A,
    splits: usize,
    residual_history: Vec<(usize, C::A)>,
}

impl<'a, C: ColumnStore> CosineTreeDriver<'a, C> {
    /// Validate the input and set up the root of the tree.
    ///
    /// # Errors
    /// Fails for an empty store, a store with non-finite entries, a zero target
    /// rank or a tolerance outside (0, 1]. No tree is built in that case.
    pub fn new(store: &'a C, config: CosineTreeConfig) -> Result<Self> {
        config.validate()?;
        store.check_valid()?;

        let tree = CosineTree::new(store);
        let mut tracker = SubspaceTracker::new(store);
        let tolerance: C::A = cast(config.error_tolerance)
            .ok_or(CosineTreeError::InvalidTolerance(config.error_tolerance))?;
        let target_residual = tolerance * tracker.total_mass();

        let root = tree.node(tree.root())?;
        tracker.add(store, root.mean());

        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry {
            residual_error: root.residual_error(),
            id: root.id(),
        });

        let residual_history = vec![(tracker.rank(), tracker.relative_residual())];

        Ok(CosineTreeDriver {
            accumulator: BasisAccumulator::new(store.nrows(), store.ncols()),
            tree,
            config,
            queue,
            tracker,
            target_residual,
            splits: 0,
            residual_history,
        })
    }

    /// Run with the random source described by the configuration.
    pub fn run(self) -> Result<CosineTreeApproximation<'a, C>> {
        let mut rng = self.config.make_rng();
        self.run_with_rng(&mut rng)
    }

    /// Run with a caller supplied random source.
    pub fn run_with_rng<R: Rng>(mut self, rng: &mut R) -> Result<CosineTreeApproximation<'a, C>> {
        let store = self.tree.store();

        info!(
            "Cosine tree on {} x {} matrix: target rank {}, tolerance {}",
            store.nrows(),
            store.ncols(),
            self.config.target_rank,
            self.config.error_tolerance
        );

        while let Some(entry) = self.queue.pop() {
            if self.tolerance_met() {
                self.accept(entry.id)?;
                continue;
            }

            let ncols = self.tree.node(entry.id)?.ncols();
            if ncols <= 1 {
                self.accept(entry.id)?;
                continue;
            }

            if self.accumulator.len() + self.queue.len() + 2 > self.config.target_rank {
                debug!("Rank budget reached, accepting node {}", entry.id);
                self.accept(entry.id)?;
                continue;
            }

            match self.tree.split(entry.id, rng)? {
                Some((left, right)) => self.enqueue_children(left, right)?,
                None => self.accept(entry.id)?,
            }
        }

        let tolerance_met = self.tolerance_met();
        let residual = self.tracker.residual();
        let total_mass = self.tracker.total_mass();

        if tolerance_met {
            info!(
                "Cosine tree finished after {} splits: {} leaves, relative residual {}",
                self.splits,
                self.accumulator.len(),
                self.tracker.relative_residual()
            );
        } else {
            warn!(
                "Cosine tree stopped after {} splits with {} leaves before reaching \
                 tolerance {}: relative residual {}",
                self.splits,
                self.accumulator.len(),
                self.config.error_tolerance,
                self.tracker.relative_residual()
            );
        }

        let (leaves, basis, leaf_of_column) = self.accumulator.finish();

        Ok(CosineTreeApproximation {
            tree: self.tree,
            leaves,
            basis,
            leaf_of_column,
            residual,
            total_mass,
            tolerance_met,
            splits: self.splits,
            residual_history: self.residual_history,
        })
    }

    fn tolerance_met(&self) -> bool {
        self.tracker.residual() <= self.target_residual
    }

    fn enqueue_children(&mut self, left: NodeId, right: NodeId) -> Result<()> {
        let store = self.tree.store();
        self.splits += 1;

        for &id in [left, right].iter() {
            let node = self.tree.node(id)?;
            self.tracker.add(store, node.mean());
            self.queue.push(QueueEntry {
                residual_error: node.residual_error(),
                id,
            });
        }

        self.residual_history
            .push((self.tracker.rank(), self.tracker.relative_residual()));

        Ok(())
    }

    fn accept(&mut self, id: NodeId) -> Result<()> {
        let node = self.tree.node(id)?;

        debug!(
            "Accepting node {} with {} columns and residual {} as leaf {}",
            id,
            node.ncols(),
            node.residual_error(),
            self.accumulator.len()
        );

        self.accumulator.push(Leaf {
            node: id,
            columns: node.columns().to_vec(),
            mean: node.mean().to_owned(),
            residual_error: node.residual_error(),
            basis_index: None,
        });

        Ok(())
    }
}

/// Compute a cosine tree approximation of `store` in one call.
pub fn cosine_tree_approximation<C: ColumnStore>(
    store: &C,
    config: CosineTreeConfig,
) -> Result<CosineTreeApproximation<'_, C>> {
    CosineTreeDriver::new(store, config)?.run()
}
