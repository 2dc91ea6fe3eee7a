// src/scheduler/mod.rs

//! Tasks on top of the dependency graph.
//!
//! - [`pair`] holds the start/end node pair of a task and its subtasks.
//! - [`scheduler`] creates task pairs and wires subtask and inter-task
//!   dependencies into a [`Graph`](crate::graph::Graph).
//! - [`plan`] builds a scheduler from a validated plan file.

pub mod pair;
pub mod plan;
#[allow(clippy::module_inception)]
pub mod scheduler;

pub use pair::TaskPair;
pub use plan::{find_pair, PlanPairs, PlanTask};
pub use scheduler::Scheduler;
