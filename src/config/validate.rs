// src/config/validate.rs

use std::collections::BTreeMap;

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::config::model::{PlanFile, RawPlanFile, TaskConfig};
use crate::errors::{PyorityError, Result};

impl TryFrom<RawPlanFile> for PlanFile {
    type Error = PyorityError;

    fn try_from(raw: RawPlanFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_tasks(&raw)?;
        validate_pyorities(&raw)?;
        validate_references(&raw)?;
        let parent = collect_parents(&raw)?;
        validate_subtask_hierarchy(&raw)?;
        warn_on_cyclic_after(&raw);
        Ok(PlanFile::new_unchecked(raw.task, parent))
    }
}

fn ensure_has_tasks(cfg: &RawPlanFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(PyorityError::ConfigError(
            "plan must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_pyorities(cfg: &RawPlanFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if !task.pyority.is_finite() || task.pyority < 0.0 {
            return Err(PyorityError::ConfigError(format!(
                "task '{}' has invalid pyority {} (must be a finite number >= 0)",
                name, task.pyority
            )));
        }
    }
    Ok(())
}

fn validate_references(cfg: &RawPlanFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        for (field, refs) in [("subtasks", &task.subtasks), ("after", &task.after)] {
            for other in refs {
                if !cfg.task.contains_key(other) {
                    return Err(PyorityError::ConfigError(format!(
                        "task '{}' has unknown task '{}' in `{}`",
                        name, other, field
                    )));
                }
                if other == name {
                    return Err(PyorityError::ConfigError(format!(
                        "task '{}' cannot list itself in `{}`",
                        name, field
                    )));
                }
            }
        }
    }
    Ok(())
}

fn collect_parents(cfg: &RawPlanFile) -> Result<BTreeMap<String, String>> {
    let mut parent: BTreeMap<String, String> = BTreeMap::new();
    for (name, task) in cfg.task.iter() {
        for sub in task.subtasks.iter() {
            if let Some(previous) = parent.insert(sub.clone(), name.clone()) {
                return Err(PyorityError::ConfigError(format!(
                    "task '{}' is listed as a subtask of both '{}' and '{}'",
                    sub, previous, name
                )));
            }
        }
    }
    Ok(parent)
}

fn validate_subtask_hierarchy(cfg: &RawPlanFile) -> Result<()> {
    // Edge direction: parent -> subtask.
    let graph = relation_graph(&cfg.task, |task| &task.subtasks);

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(PyorityError::ConfigError(format!(
            "task '{}' is nested inside its own subtasks",
            cycle.node_id()
        ))),
    }
}

/// Cyclic `after` chains are accepted, but the resulting order is
/// unlikely to be what the author meant.
fn warn_on_cyclic_after(cfg: &RawPlanFile) {
    // Edge direction: task -> dep.
    let graph = relation_graph(&cfg.task, |task| &task.after);
    if is_cyclic_directed(&graph) {
        warn!("plan has a cycle in `after` dependencies; ordering may not be meaningful");
    }
}

fn relation_graph<'a>(
    tasks: &'a BTreeMap<String, TaskConfig>,
    related: impl Fn(&'a TaskConfig) -> &'a Vec<String>,
) -> DiGraphMap<&'a str, ()> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for name in tasks.keys() {
        graph.add_node(name.as_str());
    }
    for (name, task) in tasks.iter() {
        for other in related(task) {
            graph.add_edge(name.as_str(), other.as_str(), ());
        }
    }
    graph
}
