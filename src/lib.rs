// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod scheduler;

use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{load_and_validate, PlanFile};
use crate::scheduler::Scheduler;

pub use crate::errors::{ErrorKind, PyorityError};
pub use crate::graph::{Graph, NodeKind, NodeRef, Pyority};
pub use crate::scheduler::{PlanTask, TaskPair};

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the plan, builds the scheduler and prints every
/// node in order together with its full pyority.
pub fn run(args: CliArgs) -> Result<()> {
    let plan = load_and_validate(&args.plan)
        .with_context(|| format!("loading plan from {:?}", args.plan))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.dry_run {
        print_dry_run(&plan, &mut out)?;
        return Ok(());
    }

    let (scheduler, _pairs) = Scheduler::from_plan(&plan)?;
    print_order(scheduler, &mut out)
}

/// Write the ordered nodes, one per line: `<full pyority>\t<node>`.
pub fn print_order(scheduler: Scheduler<PlanTask>, out: &mut impl Write) -> Result<()> {
    let mut graph = scheduler.into_graph();
    let order: Vec<NodeRef<PlanTask>> = graph.iter().cloned().collect();
    for node in order.iter() {
        let full = graph.full_pyority_of(node)?;
        writeln!(out, "{full:>8.2}\t{node}")?;
    }
    Ok(())
}

/// Simple dry-run output: tasks, pyority, subtasks and dependencies.
fn print_dry_run(plan: &PlanFile, out: &mut impl Write) -> Result<()> {
    writeln!(out, "pyority dry-run")?;
    writeln!(out, "tasks ({}):", plan.tasks().len())?;
    for (name, task) in plan.tasks() {
        writeln!(out, "  - {name}")?;
        writeln!(out, "      pyority: {}", task.pyority)?;
        if let Some(parent) = plan.parent_of(name) {
            writeln!(out, "      subtask of: {parent}")?;
        }
        if !task.subtasks.is_empty() {
            writeln!(out, "      subtasks: {:?}", task.subtasks)?;
        }
        if !task.after.is_empty() {
            writeln!(out, "      after: {:?}", task.after)?;
        }
    }

    debug!("dry-run complete (no ordering computed)");
    Ok(())
}
