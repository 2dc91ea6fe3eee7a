// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Plan file as read from TOML, before validation.
///
/// ```toml
/// [task.release]
/// pyority = 5.0
/// subtasks = ["build", "docs"]
/// after = ["design"]
///
/// [task.build]
/// [task.docs]
/// [task.design]
/// pyority = 1.5
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlanFile {
    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskConfig {
    /// The task's own weight. Must be finite and non-negative.
    #[serde(default)]
    pub pyority: f64,

    /// Names of the direct subtasks, in order.
    ///
    /// Each subtask starts after this task starts, and this task ends after
    /// every subtask ends. A task can be the subtask of at most one parent.
    #[serde(default)]
    pub subtasks: Vec<String>,

    /// This task starts only after every task listed here has ended.
    #[serde(default)]
    pub after: Vec<String>,
}

/// A validated plan. Build one with `PlanFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct PlanFile {
    task: BTreeMap<String, TaskConfig>,
    /// Subtask name -> parent name.
    parent: BTreeMap<String, String>,
}

impl PlanFile {
    pub(crate) fn new_unchecked(
        task: BTreeMap<String, TaskConfig>,
        parent: BTreeMap<String, String>,
    ) -> Self {
        Self { task, parent }
    }

    pub fn tasks(&self) -> &BTreeMap<String, TaskConfig> {
        &self.task
    }

    pub fn task(&self, name: &str) -> Option<&TaskConfig> {
        self.task.get(name)
    }

    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.parent.get(name).map(String::as_str)
    }

    /// Tasks that are nobody's subtask, in name order.
    pub fn top_level_tasks(&self) -> impl Iterator<Item = &str> {
        self.task
            .keys()
            .filter(|name| !self.parent.contains_key(*name))
            .map(String::as_str)
    }
}
