// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{PlanFile, RawPlanFile};
use crate::errors::Result;

/// Load a plan file from a given path and return the raw `RawPlanFile`.
///
/// This only performs TOML deserialization; it does **not** check task
/// references. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPlanFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let plan: RawPlanFile = toml::from_str(&contents)?;
    Ok(plan)
}

/// Parse and validate a plan from TOML text.
pub fn parse_plan(contents: &str) -> Result<PlanFile> {
    let raw: RawPlanFile = toml::from_str(contents)?;
    PlanFile::try_from(raw)
}

/// Load a plan file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde`).
/// - Checks for unknown `subtasks` / `after` references, negative
///   pyorities and nested subtask loops.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PlanFile> {
    let raw = load_from_path(&path)?;
    PlanFile::try_from(raw)
}

/// `Pyority.toml` in the current working directory.
pub fn default_plan_path() -> PathBuf {
    PathBuf::from("Pyority.toml")
}
