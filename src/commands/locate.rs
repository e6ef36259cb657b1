//! Locate command
//!
//! Show which PETSc installation would be used, and how it was found

use super::{Context, report_warnings};
use crate::GlobalArgs;
use anyhow::Result;
use petsc_plan::{Layout, toolchain};

pub(crate) fn run(global: &GlobalArgs) -> Result<()> {
    let ctx = Context::load(global)?;

    let (version, location) = petsc_plan::locate(ctx.binding.as_ref(), &ctx.env)?;
    report_warnings(&location);

    let layout = match location.layout() {
        Layout::ArchQualified => "arch-qualified",
        Layout::Flat => "flat",
    };

    println!("PETSc        {version}");
    println!("PETSC_DIR    {}", location.root_dir.display());
    println!(
        "PETSC_ARCH   {}",
        location.arch_tag.as_deref().unwrap_or("(none)")
    );
    println!("Layout       {layout}");
    println!("Found via    {}", location.strategy);
    println!(
        "Variables    {}",
        toolchain::variables_path(&location).display()
    );

    Ok(())
}
