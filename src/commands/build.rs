//! Build command
//!
//! Resolve the plan, write it to disk and run the extension build command
//! with PETSc's compiler:
//! ```bash
//! petsc-plan build -- pip install --no-build-isolation .
//! ```

use super::Context;
use crate::GlobalArgs;
use anyhow::Result;
use petsc_plan::Pipeline;
use petsc_plan::pipeline::DEFAULT_PLAN_PATH;
use std::path::PathBuf;

pub(crate) fn run(
    global: &GlobalArgs,
    plan_path: Option<PathBuf>,
    verbose: bool,
    command: &[String],
) -> Result<()> {
    let ctx = Context::load(global)?;
    let resolution = ctx.resolve()?;

    let plan_path = plan_path
        .or_else(|| ctx.config.plan_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PLAN_PATH));
    let pipeline = Pipeline::new(plan_path, verbose);

    println!(
        "Building {} extensions against PETSc {} with CC={}",
        resolution.plan.len(),
        resolution.version,
        resolution.toolchain.compiler
    );

    let duration = pipeline.run(&resolution.plan, command)?;

    println!(
        "Build finished in {:.1}s (plan: {})",
        duration.as_secs_f64(),
        pipeline.plan_path().display()
    );

    Ok(())
}
