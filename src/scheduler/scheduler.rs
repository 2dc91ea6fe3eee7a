// src/scheduler/scheduler.rs

use tracing::{debug, warn};

use crate::errors::{PyorityError, Result};
use crate::graph::{Graph, NodeRef, Pyority};
use crate::scheduler::pair::TaskPair;

/// Higher level interface to [`Graph`] that handles tasks.
///
/// Each task becomes a start and an end node, and the end always depends on
/// the start. Subtasks start after their parent starts and the parent ends
/// after all of its subtasks end. The scheduler only ever registers nodes
/// and dependencies; the graph owns the ordering.
#[derive(Debug)]
pub struct Scheduler<T> {
    graph: Graph<T>,
}

impl<T: Pyority> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            graph: Graph::new(),
        }
    }
}

impl<T: Pyority> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &Graph<T> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph<T> {
        &mut self.graph
    }

    pub fn into_graph(self) -> Graph<T> {
        self.graph
    }

    /// Adds a task without subtasks.
    ///
    /// To finish a task one needs to begin, so its end depends on its start.
    pub fn add_task(&mut self, task: T) -> Result<TaskPair<T>> {
        let pair = TaskPair::for_task(task)?;
        self.register_pair(&pair)?;
        Ok(pair)
    }

    /// Shortcut for [`add_task`](Self::add_task) followed by
    /// [`add_subtasks`](Self::add_subtasks).
    pub fn add_task_with_subtasks(
        &mut self,
        task: T,
        subtasks: impl IntoIterator<Item = T>,
    ) -> Result<TaskPair<T>> {
        let mut pair = self.add_task(task)?;
        self.add_subtasks(&mut pair, subtasks)?;
        Ok(pair)
    }

    /// Adds each of `subtasks` as a new task nested under `parent`, in order.
    pub fn add_subtasks(
        &mut self,
        parent: &mut TaskPair<T>,
        subtasks: impl IntoIterator<Item = T>,
    ) -> Result<()> {
        for task in subtasks {
            let pair = self.add_task(task)?;
            self.attach_subtask(parent, pair)?;
        }
        Ok(())
    }

    /// Nests an already registered pair under `parent`.
    ///
    /// The subtask's start depends on the parent's start and the parent's
    /// end depends on the subtask's end.
    pub fn attach_subtask(&mut self, parent: &mut TaskPair<T>, child: TaskPair<T>) -> Result<()> {
        self.ensure_registered(parent)?;
        self.ensure_registered(&child)?;
        self.graph.add_node_dependency(child.start(), parent.start())?;
        self.graph.add_node_dependency(parent.end(), child.end())?;
        parent.register_subtask(child);
        debug!(subtasks = parent.len(), "attached subtask");
        Ok(())
    }

    /// The start of `this` depends on the end of `depends_on_that`.
    pub fn add_task_dependency(
        &mut self,
        this: &TaskPair<T>,
        depends_on_that: &TaskPair<T>,
    ) -> Result<()> {
        self.ensure_registered(this)?;
        self.ensure_registered(depends_on_that)?;
        self.graph
            .add_node_dependency(this.start(), depends_on_that.end())
    }

    /// Prepared iteration over every node, see [`Graph::iter`].
    pub fn iter(&mut self) -> impl Iterator<Item = &NodeRef<T>> + '_ {
        self.graph.iter()
    }

    fn register_pair(&mut self, pair: &TaskPair<T>) -> Result<()> {
        self.graph.add_node(pair.start().clone())?;
        self.graph.add_node(pair.end().clone())?;
        self.graph.add_node_dependency(pair.end(), pair.start())
    }

    fn ensure_registered(&self, pair: &TaskPair<T>) -> Result<()> {
        if !pair.is_linked() {
            warn!("task pair start/end are not linked to each other");
            return Err(PyorityError::MismatchedPair);
        }
        if !self.graph.contains(pair.start()) || !self.graph.contains(pair.end()) {
            return Err(PyorityError::NodeNotFound);
        }
        Ok(())
    }
}
