// src/scheduler/pair.rs

//! The start/end node pair representing one task.

use std::ops::Index;
use std::rc::Rc;

use crate::errors::{PyorityError, Result};
use crate::graph::node::{link_pair, NodeRef};

/// A task as managed by [`Scheduler`](crate::scheduler::Scheduler): its
/// start and end nodes plus the pairs of its direct subtasks.
///
/// This is bookkeeping only. Registering a subtask here does not add any
/// dependency to the graph; use
/// [`Scheduler::add_subtasks`](crate::scheduler::Scheduler::add_subtasks)
/// for that.
#[derive(Debug)]
pub struct TaskPair<T> {
    start: NodeRef<T>,
    end: NodeRef<T>,
    subtasks: Vec<TaskPair<T>>,
}

impl<T: PartialEq> TaskPair<T> {
    /// Takes a start and an end node wrapping the same task and makes them
    /// point to each other.
    ///
    /// The nodes may hold separate copies of the task as long as they
    /// compare equal.
    pub fn new(start: NodeRef<T>, end: NodeRef<T>) -> Result<Self> {
        if !Rc::ptr_eq(start.shared_data(), end.shared_data()) && start.data() != end.data() {
            return Err(PyorityError::MismatchedPair);
        }
        Self::link(start, end)
    }
}

impl<T> TaskPair<T> {
    /// Fresh, linked start and end nodes for `task`.
    pub fn for_task(task: T) -> Result<Self> {
        let data = Rc::new(task);
        Self::link(NodeRef::start(Rc::clone(&data)), NodeRef::end(data))
    }

    fn link(start: NodeRef<T>, end: NodeRef<T>) -> Result<Self> {
        link_pair(&start, &end)?;
        Ok(Self {
            start,
            end,
            subtasks: Vec::new(),
        })
    }

    pub fn data(&self) -> &T {
        self.start.data()
    }

    pub fn start(&self) -> &NodeRef<T> {
        &self.start
    }

    pub fn end(&self) -> &NodeRef<T> {
        &self.end
    }

    pub fn subtasks(&self) -> &[TaskPair<T>] {
        &self.subtasks
    }

    pub fn subtask(&self, k: usize) -> Option<&TaskPair<T>> {
        self.subtasks.get(k)
    }

    pub fn subtask_mut(&mut self, k: usize) -> Option<&mut TaskPair<T>> {
        self.subtasks.get_mut(k)
    }

    /// Number of direct subtasks.
    pub fn len(&self) -> usize {
        self.subtasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subtasks.is_empty()
    }

    /// Records `pair` as the next subtask. Does not touch the graph.
    pub fn register_subtask(&mut self, pair: TaskPair<T>) {
        self.subtasks.push(pair);
    }

    pub fn register_subtasks(&mut self, pairs: impl IntoIterator<Item = TaskPair<T>>) {
        self.subtasks.extend(pairs);
    }

    /// Whether the start and end still point at each other.
    pub(crate) fn is_linked(&self) -> bool {
        matches!(self.start.end_node(), Ok(end) if end == self.end)
            && matches!(self.end.start_node(), Ok(start) if start == self.start)
    }
}

impl<T> Index<usize> for TaskPair<T> {
    type Output = TaskPair<T>;

    fn index(&self, k: usize) -> &TaskPair<T> {
        &self.subtasks[k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pair_links_both_ways() {
        let pair = TaskPair::for_task("write docs").unwrap();
        assert!(pair.is_linked());
        assert_eq!(pair.start().end_node().unwrap(), *pair.end());
        assert_eq!(*pair.data(), "write docs");
    }

    #[test]
    fn nodes_wrapping_different_tasks_are_rejected() {
        let start = NodeRef::start(Rc::new("a"));
        let end = NodeRef::end(Rc::new("b"));
        assert!(matches!(
            TaskPair::new(start, end),
            Err(PyorityError::MismatchedPair)
        ));
    }

    #[test]
    fn separate_copies_of_equal_tasks_form_a_pair() {
        let start = NodeRef::start(Rc::new("deploy".to_string()));
        let end = NodeRef::end(Rc::new("deploy".to_string()));
        let pair = TaskPair::new(start, end).unwrap();
        assert!(pair.is_linked());
        assert_eq!(pair.data(), "deploy");
        assert_eq!(pair.end().start_node().unwrap(), *pair.start());
    }

    #[test]
    fn shared_task_data_forms_a_pair() {
        let data = Rc::new("build");
        let pair = TaskPair::new(NodeRef::start(Rc::clone(&data)), NodeRef::end(data)).unwrap();
        assert!(pair.is_linked());
    }

    #[test]
    fn subtasks_are_indexable_in_insertion_order() {
        let mut pair = TaskPair::for_task("parent").unwrap();
        pair.register_subtask(TaskPair::for_task("first").unwrap());
        pair.register_subtasks([
            TaskPair::for_task("second").unwrap(),
            TaskPair::for_task("third").unwrap(),
        ]);

        assert_eq!(pair.len(), 3);
        assert_eq!(*pair[1].data(), "second");
        assert_eq!(*pair.subtask(2).unwrap().data(), "third");
        assert!(pair.subtask(3).is_none());
    }
}
