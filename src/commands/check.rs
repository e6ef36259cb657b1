//! Check command
//!
//! Verify the installed PETSc meets the minimum version

use super::Context;
use crate::GlobalArgs;
use anyhow::Result;
use petsc_plan::{MINIMUM_PETSC_VERSION, version};

/// Probe petsc4py and enforce the version gate
pub(crate) fn run(global: &GlobalArgs) -> Result<()> {
    let ctx = Context::load(global)?;

    let installed = version::probe(ctx.binding.as_ref())?;
    println!("Petsc version: {installed}");

    MINIMUM_PETSC_VERSION.check(installed)?;
    println!("PETSc {installed} meets the minimum of {MINIMUM_PETSC_VERSION}");

    Ok(())
}
