#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fmt;

use pyority::config::{PlanFile, RawPlanFile, TaskConfig};
use pyority::graph::{Graph, NodeRef, Pyority};

/// Minimal weighted payload for graph and scheduler tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub name: &'static str,
    pub weight: f64,
}

impl Job {
    pub fn new(name: &'static str, weight: f64) -> Self {
        Self { name, weight }
    }

    /// A job without a meaningful weight.
    pub fn named(name: &'static str) -> Self {
        Self::new(name, 0.0)
    }
}

impl Pyority for Job {
    fn pyority(&self) -> f64 {
        self.weight
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Render nodes with their `Display` form, e.g. `["Start: A", "End  : A"]`.
pub fn labels<'a, T: fmt::Display + 'a>(
    nodes: impl IntoIterator<Item = &'a NodeRef<T>>,
) -> Vec<String> {
    nodes.into_iter().map(|n| n.to_string()).collect()
}

/// Labels of an owned node list, sorted, for set-like comparisons.
pub fn sorted_labels<T: fmt::Display>(nodes: Vec<NodeRef<T>>) -> Vec<String> {
    let mut out = labels(&nodes);
    out.sort();
    out
}

/// Registers `n` plain nodes with the given weights and returns them.
pub fn plain_nodes(graph: &mut Graph<f64>, weights: &[f64]) -> Vec<NodeRef<f64>> {
    weights
        .iter()
        .map(|&w| {
            let node = NodeRef::new(w);
            graph
                .add_node(node.clone())
                .expect("test weights are non-negative");
            node
        })
        .collect()
}

/// Builder for `PlanFile` to simplify test setup.
pub struct PlanBuilder {
    plan: RawPlanFile,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self {
            plan: RawPlanFile {
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.plan.task.insert(name.to_string(), task);
        self
    }

    pub fn raw(self) -> RawPlanFile {
        self.plan
    }

    pub fn build(self) -> PlanFile {
        PlanFile::try_from(self.plan).expect("Failed to build valid plan from builder")
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(pyority: f64) -> Self {
        Self {
            task: TaskConfig {
                pyority,
                subtasks: vec![],
                after: vec![],
            },
        }
    }

    pub fn subtask(mut self, name: &str) -> Self {
        self.task.subtasks.push(name.to_string());
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
