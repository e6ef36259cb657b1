//! Report command
//!
//! Print everything petsc4py reports as JSON. The output can be saved and
//! replayed later with `--binding-report`.

use super::Context;
use crate::GlobalArgs;
use anyhow::{Context as _, Result};
use petsc_plan::BindingReport;

pub(crate) fn run(global: &GlobalArgs) -> Result<()> {
    let ctx = Context::load(global)?;

    let report = BindingReport::capture(ctx.binding.as_ref())?;
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{json}");

    Ok(())
}
