// src/scheduler/plan.rs

//! Building a [`Scheduler`] from a validated [`PlanFile`].

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};

use crate::config::PlanFile;
use crate::errors::{PyorityError, Result};
use crate::graph::Pyority;
use crate::scheduler::pair::TaskPair;
use crate::scheduler::scheduler::Scheduler;

/// Task payload produced from a `[task.<name>]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTask {
    pub name: String,
    pub pyority: f64,
}

impl Pyority for PlanTask {
    fn pyority(&self) -> f64 {
        self.pyority
    }
}

impl fmt::Display for PlanTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Top-level task pairs by name. Subtask pairs live inside their parent.
pub type PlanPairs = BTreeMap<String, TaskPair<PlanTask>>;

impl Scheduler<PlanTask> {
    /// Registers every task of `plan`, nests subtasks under their parent
    /// and wires every `after` dependency.
    pub fn from_plan(plan: &PlanFile) -> Result<(Self, PlanPairs)> {
        let mut scheduler = Scheduler::new();
        let mut pairs = PlanPairs::new();

        for name in plan.top_level_tasks() {
            let pair = scheduler.add_plan_task(plan, name)?;
            pairs.insert(name.to_string(), pair);
        }

        for (name, task) in plan.tasks() {
            for dep in task.after.iter() {
                let this = find_pair(plan, &pairs, name)?;
                let that = find_pair(plan, &pairs, dep)?;
                scheduler.add_task_dependency(this, that)?;
                debug!(task = %name, after = %dep, "wired task dependency");
            }
        }

        info!(
            tasks = plan.tasks().len(),
            nodes = scheduler.graph().len(),
            "built scheduler from plan"
        );
        Ok((scheduler, pairs))
    }

    fn add_plan_task(&mut self, plan: &PlanFile, name: &str) -> Result<TaskPair<PlanTask>> {
        let cfg = plan
            .task(name)
            .ok_or_else(|| PyorityError::TaskNotFound(name.to_string()))?;
        let mut pair = self.add_task(PlanTask {
            name: name.to_string(),
            pyority: cfg.pyority,
        })?;
        for sub in cfg.subtasks.iter() {
            let child = self.add_plan_task(plan, sub)?;
            self.attach_subtask(&mut pair, child)?;
        }
        Ok(pair)
    }
}

/// Locate the pair for `name` by walking down from its top-level ancestor.
pub fn find_pair<'a>(
    plan: &PlanFile,
    pairs: &'a PlanPairs,
    name: &str,
) -> Result<&'a TaskPair<PlanTask>> {
    let mut path = vec![name];
    while let Some(parent) = plan.parent_of(path[path.len() - 1]) {
        path.push(parent);
    }

    let not_found = || PyorityError::TaskNotFound(name.to_string());
    let root = path.pop().ok_or_else(not_found)?;
    let mut pair = pairs.get(root).ok_or_else(not_found)?;
    while let Some(next) = path.pop() {
        pair = pair
            .subtasks()
            .iter()
            .find(|p| p.data().name == next)
            .ok_or_else(not_found)?;
    }
    Ok(pair)
}
