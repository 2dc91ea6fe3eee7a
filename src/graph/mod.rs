// src/graph/mod.rs

//! Dependency graph engine.
//!
//! - [`node`] defines the nodes (plain, task start, task end) and the
//!   [`Pyority`] weight capability.
//! - [`matrix`] holds the growable boolean adjacency and its transitive
//!   closure.
//! - [`graph`] registers nodes and dependencies and derives the ordering.

#[allow(clippy::module_inception)]
pub mod graph;
pub mod matrix;
pub mod node;

pub use graph::Graph;
pub use matrix::{Closure, SparseBoolMatrix};
pub use node::{link_pair, Node, NodeKind, NodeRef, Pyority};
