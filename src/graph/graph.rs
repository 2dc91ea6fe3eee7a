// src/graph/graph.rs

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::errors::{PyorityError, Result};
use crate::graph::matrix::{Closure, SparseBoolMatrix};
use crate::graph::node::{NodeRef, Pyority};

/// Derived data recomputed by [`Graph::prepare`].
#[derive(Debug, Default)]
struct Derived {
    closure: Closure,
    full_pyorities: Vec<f64>,
    order: Vec<usize>,
}

/// A graph of nodes, representing their dependency relation.
///
/// Nodes get a stable index at registration. A *direct* dependency is one
/// stated with [`add_node_dependency`](Graph::add_node_dependency); a *full*
/// dependency is any chain of direct ones (the transitive closure).
///
/// Iterating the graph yields every node ordered by descending *full
/// pyority*: a node's own weight plus the weights of every node that
/// (directly or not) depends on it. Ties go to the node with more
/// dependents, then to the node registered first. For acyclic graphs this
/// puts every node before everything that depends on it.
///
/// Cycles are not rejected; the order is still total and deterministic.
#[derive(Debug)]
pub struct Graph<T> {
    idx_to_node: Vec<NodeRef<T>>,
    node_to_idx: HashMap<NodeRef<T>, usize>,
    /// `[p, d] = true` means `d` directly depends on `p`.
    direct_dependencies: SparseBoolMatrix,
    individual_pyorities: Vec<f64>,
    derived: Derived,
    stale: bool,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self {
            idx_to_node: Vec::new(),
            node_to_idx: HashMap::new(),
            direct_dependencies: SparseBoolMatrix::default(),
            individual_pyorities: Vec::new(),
            derived: Derived::default(),
            stale: true,
        }
    }
}

impl<T: Pyority> Graph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new node and returns its index.
    ///
    /// The node's own pyority is read once, here. Fails if the node is
    /// already registered or reports a negative pyority.
    pub fn add_node(&mut self, node: NodeRef<T>) -> Result<usize> {
        if let Some(&idx) = self.node_to_idx.get(&node) {
            return Err(PyorityError::DuplicateNode(idx));
        }
        let pyority = node.pyority()?;

        self.stale = true;
        let idx = self.idx_to_node.len();
        self.idx_to_node.push(node.clone());
        self.node_to_idx.insert(node, idx);
        self.individual_pyorities.push(pyority);
        debug_assert_eq!(self.node_to_idx.len(), self.idx_to_node.len());

        self.direct_dependencies.grow_to_fit(self.len());
        trace!(idx, pyority, "registered node");
        Ok(idx)
    }

    /// Imposes that `this` node `depends_on_that` node.
    ///
    /// Stating the same dependency twice is a no-op.
    pub fn add_node_dependency(
        &mut self,
        this: &NodeRef<T>,
        depends_on_that: &NodeRef<T>,
    ) -> Result<()> {
        if this == depends_on_that {
            return Err(PyorityError::SelfDependency);
        }
        let this_idx = self.index_of(this)?;
        let depends_idx = self.index_of(depends_on_that)?;

        self.stale = true;
        self.direct_dependencies.set(depends_idx, this_idx);
        trace!(dependent = this_idx, prerequisite = depends_idx, "registered dependency");
        Ok(())
    }

    /// Recompute closure, full pyorities and order if anything changed.
    pub fn prepare(&mut self) {
        if !self.stale {
            return;
        }
        let n = self.len();
        let closure = Closure::compute(&self.direct_dependencies, n);
        let full_pyorities = closure.row_sums(&self.individual_pyorities);

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            full_pyorities[b]
                .total_cmp(&full_pyorities[a])
                .then_with(|| closure.row(b).len().cmp(&closure.row(a).len()))
                .then(a.cmp(&b))
        });

        debug!(
            nodes = n,
            capacity = self.capacity(),
            squarings = closure.squarings(),
            closure_nnz = closure.nnz(),
            "recomputed dependency closure"
        );

        self.derived = Derived {
            closure,
            full_pyorities,
            order,
        };
        self.stale = false;
    }

    /// Iterates through all nodes in a way consistent with their
    /// dependencies, greater full pyority first.
    pub fn iter(&mut self) -> impl Iterator<Item = &NodeRef<T>> + '_ {
        self.prepare();
        let this: &Self = self;
        this.derived.order.iter().map(move |&i| &this.idx_to_node[i])
    }

    /// The nodes `node` depends on, directly or not (never `node` itself).
    pub fn nodes_i_fully_depend_on(&mut self, node: &NodeRef<T>) -> Result<Vec<NodeRef<T>>> {
        let idx = self.index_of(node)?;
        self.prepare();
        Ok(self.collect_except(self.derived.closure.col(idx), idx))
    }

    /// The nodes that depend on `node`, directly or not (never `node` itself).
    pub fn nodes_fully_depending_on_me(&mut self, node: &NodeRef<T>) -> Result<Vec<NodeRef<T>>> {
        let idx = self.index_of(node)?;
        self.prepare();
        Ok(self.collect_except(self.derived.closure.row(idx), idx))
    }

    /// Own pyority plus the pyority of everything depending on `node`.
    pub fn full_pyority_of(&mut self, node: &NodeRef<T>) -> Result<f64> {
        let idx = self.index_of(node)?;
        self.prepare();
        Ok(self.derived.full_pyorities[idx])
    }
}

impl<T> Graph<T> {
    /// Number of nodes in this graph.
    pub fn len(&self) -> usize {
        self.idx_to_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idx_to_node.is_empty()
    }

    /// Allocated dimension of the adjacency storage.
    pub fn capacity(&self) -> usize {
        self.direct_dependencies.capacity()
    }

    /// Whether derived data needs recomputing before the next ordered query.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn contains(&self, node: &NodeRef<T>) -> bool {
        self.node_to_idx.contains_key(node)
    }

    pub fn index_of(&self, node: &NodeRef<T>) -> Result<usize> {
        self.node_to_idx
            .get(node)
            .copied()
            .ok_or(PyorityError::NodeNotFound)
    }

    pub fn node_at(&self, idx: usize) -> Option<&NodeRef<T>> {
        self.idx_to_node.get(idx)
    }

    /// Nodes in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRef<T>> {
        self.idx_to_node.iter()
    }

    /// The pyority cached for `node` when it was registered.
    pub fn pyority_of(&self, node: &NodeRef<T>) -> Result<f64> {
        Ok(self.individual_pyorities[self.index_of(node)?])
    }

    /// The set of nodes `node` **directly** depends on.
    pub fn nodes_i_depend_on(&self, node: &NodeRef<T>) -> Result<Vec<NodeRef<T>>> {
        let idx = self.index_of(node)?;
        Ok(self
            .direct_dependencies
            .col(idx, self.len())
            .map(|i| self.idx_to_node[i].clone())
            .collect())
    }

    /// The set of nodes that **directly** depend on `node`.
    pub fn nodes_depending_on_me(&self, node: &NodeRef<T>) -> Result<Vec<NodeRef<T>>> {
        let idx = self.index_of(node)?;
        Ok(self
            .direct_dependencies
            .row(idx)
            .map(|i| self.idx_to_node[i].clone())
            .collect())
    }

    /// Whether a direct edge `this -> depends_on_that` was registered.
    pub fn depends_directly(&self, this: &NodeRef<T>, depends_on_that: &NodeRef<T>) -> Result<bool> {
        let this_idx = self.index_of(this)?;
        let depends_idx = self.index_of(depends_on_that)?;
        Ok(self.direct_dependencies.get(depends_idx, this_idx))
    }

    fn collect_except(&self, indices: &[usize], skip: usize) -> Vec<NodeRef<T>> {
        indices
            .iter()
            .filter(|&&i| i != skip)
            .map(|&i| self.idx_to_node[i].clone())
            .collect()
    }
}

impl<'a, T: Pyority> IntoIterator for &'a mut Graph<T> {
    type Item = &'a NodeRef<T>;
    type IntoIter = std::vec::IntoIter<&'a NodeRef<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.prepare();
        let this: &'a Graph<T> = self;
        this.derived
            .order
            .iter()
            .map(|&i| &this.idx_to_node[i])
            .collect::<Vec<_>>()
            .into_iter()
    }
}
