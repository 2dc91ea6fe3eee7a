// src/graph/node.rs

//! Nodes to represent what can have a dependency relation.
//!
//! The start of a task might depend on the completion of some other task, so
//! each task is represented by a pair of nodes: a [`NodeKind::Start`] and a
//! [`NodeKind::End`]. Plain nodes can also be registered directly with a
//! [`Graph`](crate::graph::Graph).
//!
//! A node is identified by its allocation, never by its data: two nodes
//! wrapping equal data are two different nodes. [`NodeRef`] is the shared
//! handle that hashes and compares by pointer.

use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use crate::errors::{PyorityError, Result};

/// Optional per-payload weight.
///
/// Payloads that do not override [`pyority`](Pyority::pyority) weigh zero.
pub trait Pyority {
    fn pyority(&self) -> f64 {
        0.0
    }
}

impl Pyority for () {}
impl Pyority for &str {}
impl Pyority for String {}

impl Pyority for f64 {
    fn pyority(&self) -> f64 {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Plain,
    Start,
    End,
}

impl NodeKind {
    fn label(self) -> &'static str {
        match self {
            NodeKind::Plain => "plain",
            NodeKind::Start => "start",
            NodeKind::End => "end",
        }
    }
}

/// A graph node wrapping shared task data.
pub struct Node<T> {
    data: Rc<T>,
    kind: NodeKind,
    /// The other half of a start/end pair. Set at most once.
    partner: OnceCell<Weak<Node<T>>>,
}

impl<T> Node<T> {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_start(&self) -> bool {
        self.kind == NodeKind::Start
    }

    pub fn is_end(&self) -> bool {
        self.kind == NodeKind::End
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Shared handle to the wrapped data.
    pub fn shared_data(&self) -> &Rc<T> {
        &self.data
    }

    fn partner(&self, wanted: NodeKind) -> Result<NodeRef<T>> {
        let weak = self
            .partner
            .get()
            .ok_or(PyorityError::NotAssociated(wanted.label()))?;
        weak.upgrade()
            .map(NodeRef)
            .ok_or(PyorityError::Released(wanted.label()))
    }
}

impl<T: Pyority> Node<T> {
    /// This node's own weight.
    ///
    /// End nodes always weigh zero: the task's weight is carried by its
    /// start. Fails if the payload reports a negative (or NaN) weight.
    pub fn pyority(&self) -> Result<f64> {
        if self.kind == NodeKind::End {
            return Ok(0.0);
        }
        let val = self.data.pyority();
        if !(val >= 0.0) {
            return Err(PyorityError::NegativePyority(val));
        }
        Ok(val)
    }
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Plain => write!(f, "{}", self.data),
            NodeKind::Start => write!(f, "Start: {}", self.data),
            NodeKind::End => write!(f, "End  : {}", self.data),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("data", &self.data)
            .field("paired", &self.partner.get().is_some())
            .finish()
    }
}

/// Shared handle to a [`Node`], compared and hashed by identity.
pub struct NodeRef<T>(Rc<Node<T>>);

impl<T> NodeRef<T> {
    /// A plain node (neither start nor end of a task).
    pub fn new(data: T) -> Self {
        Self::with_kind(Rc::new(data), NodeKind::Plain)
    }

    /// A task start node. Must be paired with an end via [`link_pair`].
    pub fn start(data: Rc<T>) -> Self {
        Self::with_kind(data, NodeKind::Start)
    }

    /// A task end node. Must be paired with a start via [`link_pair`].
    pub fn end(data: Rc<T>) -> Self {
        Self::with_kind(data, NodeKind::End)
    }

    fn with_kind(data: Rc<T>, kind: NodeKind) -> Self {
        NodeRef(Rc::new(Node {
            data,
            kind,
            partner: OnceCell::new(),
        }))
    }

    /// The end node associated to this start node.
    pub fn end_node(&self) -> Result<NodeRef<T>> {
        self.0.partner(NodeKind::End)
    }

    /// The start node associated to this end node.
    pub fn start_node(&self) -> Result<NodeRef<T>> {
        self.0.partner(NodeKind::Start)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn set_partner(&self, partner: &NodeRef<T>) -> Result<()> {
        self.0
            .partner
            .set(Rc::downgrade(&partner.0))
            .map_err(|_| PyorityError::AlreadyAssociated(partner.kind().label()))
    }
}

/// Make `start` and `end` point at each other.
///
/// Each side can be associated only once. The links are weak: whoever holds
/// the pair keeps both nodes alive.
pub fn link_pair<T>(start: &NodeRef<T>, end: &NodeRef<T>) -> Result<()> {
    if !start.is_start() || !end.is_end() {
        return Err(PyorityError::MismatchedPair);
    }
    if start.partner.get().is_some() {
        return Err(PyorityError::AlreadyAssociated(NodeKind::End.label()));
    }
    if end.partner.get().is_some() {
        return Err(PyorityError::AlreadyAssociated(NodeKind::Start.label()));
    }
    start.set_partner(end)?;
    end.set_partner(start)
}

impl<T> std::ops::Deref for NodeRef<T> {
    type Target = Node<T>;

    fn deref(&self) -> &Node<T> {
        &self.0
    }
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        NodeRef(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for NodeRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for NodeRef<T> {}

impl<T> Hash for NodeRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

impl<T: fmt::Display> fmt::Display for NodeRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
