use std::error::Error;

use pyority::graph::Pyority;
use pyority::scheduler::{Scheduler, TaskPair};
use pyority::{ErrorKind, PyorityError};
use pyority_test_utils::builders::{labels, sorted_labels, Job};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn single_task_registers_start_then_end() -> TestResult {
    let mut scheduler = Scheduler::new();
    let t = scheduler.add_task(Job::new("T", 5.0))?;

    assert_eq!(scheduler.graph().len(), 2);
    assert_eq!(labels(scheduler.iter()), vec!["Start: T", "End  : T"]);

    let graph = scheduler.graph_mut();
    assert!(graph.nodes_i_fully_depend_on(t.start())?.is_empty());
    assert_eq!(graph.nodes_i_fully_depend_on(t.end())?, vec![t.start().clone()]);
    assert_eq!(graph.full_pyority_of(t.start())?, 5.0);
    assert_eq!(graph.full_pyority_of(t.end())?, 0.0);
    Ok(())
}

#[test]
fn subtasks_nest_inside_parent_interval() -> TestResult {
    let mut scheduler = Scheduler::new();
    let p = scheduler.add_task_with_subtasks(
        Job::named("P"),
        [Job::named("S1"), Job::named("S2")],
    )?;

    assert_eq!(p.len(), 2);
    assert_eq!(p[0].data().name, "S1");
    assert_eq!(p[1].data().name, "S2");

    let graph = scheduler.graph_mut();
    assert_eq!(
        sorted_labels(graph.nodes_i_fully_depend_on(p.end())?),
        vec!["End  : S1", "End  : S2", "Start: P", "Start: S1", "Start: S2"]
    );
    assert_eq!(
        labels(&graph.nodes_i_fully_depend_on(p[0].start())?),
        vec!["Start: P"]
    );
    assert_eq!(
        sorted_labels(graph.nodes_i_depend_on(p.end())?),
        vec!["End  : S1", "End  : S2", "Start: P"]
    );

    // All weights are zero: the node with the most dependents goes first.
    assert_eq!(
        labels(scheduler.iter()),
        vec![
            "Start: P",
            "Start: S1",
            "Start: S2",
            "End  : S1",
            "End  : S2",
            "End  : P",
        ]
    );
    Ok(())
}

#[test]
fn weighted_subtasks_reorder_siblings_only() -> TestResult {
    let mut scheduler = Scheduler::new();
    scheduler.add_task_with_subtasks(
        Job::new("P", 1.0),
        [Job::new("S1", 2.0), Job::new("S2", 3.0)],
    )?;

    assert_eq!(
        labels(scheduler.iter()),
        vec![
            "Start: P",
            "Start: S2",
            "Start: S1",
            "End  : S1",
            "End  : S2",
            "End  : P",
        ]
    );
    Ok(())
}

#[test]
fn nested_subtasks_can_be_added_through_the_pair() -> TestResult {
    let mut scheduler = Scheduler::new();
    let mut root = scheduler.add_task_with_subtasks(Job::named("root"), [Job::named("mid")])?;
    let mid = root.subtask_mut(0).ok_or("missing subtask")?;
    scheduler.add_subtasks(mid, [Job::named("leaf")])?;

    let leaf_start = root[0][0].start().clone();
    let full = scheduler.graph_mut().nodes_i_fully_depend_on(&leaf_start)?;
    assert_eq!(sorted_labels(full), vec!["Start: mid", "Start: root"]);

    let full = scheduler.graph_mut().nodes_i_fully_depend_on(root.end())?;
    assert_eq!(full.len(), 5);
    Ok(())
}

#[test]
fn task_dependency_waits_for_prerequisite_end() -> TestResult {
    let mut scheduler = Scheduler::new();
    let a = scheduler.add_task(Job::new("A", 1.0))?;
    let b = scheduler.add_task(Job::new("B", 1.0))?;
    let c = scheduler.add_task(Job::new("C", 1.0))?;
    scheduler.add_task_dependency(&b, &a)?;
    scheduler.add_task_dependency(&c, &b)?;

    assert_eq!(
        labels(scheduler.iter()),
        vec!["Start: A", "End  : A", "Start: B", "End  : B", "Start: C", "End  : C"]
    );

    let graph = scheduler.graph_mut();
    assert_eq!(graph.full_pyority_of(a.start())?, 3.0);
    assert_eq!(graph.full_pyority_of(c.end())?, 0.0);
    for pair in [&a, &b, &c] {
        let full = graph.nodes_i_fully_depend_on(pair.start())?;
        assert!(!full.contains(pair.end()));
    }
    assert_eq!(
        sorted_labels(graph.nodes_i_fully_depend_on(c.start())?),
        vec!["End  : A", "End  : B", "Start: A", "Start: B"]
    );
    Ok(())
}

#[test]
fn heavier_independent_task_goes_first() -> TestResult {
    let mut scheduler = Scheduler::new();
    scheduler.add_task(Job::new("B", 1.0))?;
    scheduler.add_task(Job::new("A", 10.0))?;

    assert_eq!(
        labels(scheduler.iter()),
        vec!["Start: A", "Start: B", "End  : B", "End  : A"]
    );
    Ok(())
}

#[test]
fn start_and_end_point_at_each_other() -> TestResult {
    let mut scheduler = Scheduler::new();
    let t = scheduler.add_task(Job::named("T"))?;
    assert_eq!(t.start().end_node()?, *t.end());
    assert_eq!(t.end().start_node()?, *t.start());
    assert!(t.start().is_start());
    assert!(t.end().is_end());
    Ok(())
}

#[test]
fn dependency_on_foreign_pair_is_not_found() -> TestResult {
    let mut scheduler = Scheduler::new();
    let mine = scheduler.add_task(Job::named("mine"))?;

    let mut other = Scheduler::new();
    let foreign = other.add_task(Job::named("foreign"))?;

    let err = scheduler.add_task_dependency(&mine, &foreign).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let unregistered = TaskPair::for_task(Job::named("loose"))?;
    let err = scheduler.add_task_dependency(&unregistered, &mine).unwrap_err();
    assert!(matches!(err, PyorityError::NodeNotFound));
    Ok(())
}

#[test]
fn negative_task_pyority_is_a_precondition_failure() {
    #[derive(Debug)]
    struct Broken;
    impl Pyority for Broken {
        fn pyority(&self) -> f64 {
            -1.0
        }
    }

    let mut scheduler = Scheduler::new();
    let err = scheduler.add_task(Broken).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(scheduler.graph().is_empty());
}
