//! Plan command
//!
//! Produce the extension build plan as JSON (for the build pipeline) or as
//! a readable summary

use super::Context;
use crate::{GlobalArgs, OutputFormat};
use anyhow::{Context as _, Result};
use petsc_plan::BuildPlan;
use std::fmt::Write;
use std::fs;
use std::path::Path;

pub(crate) fn run(global: &GlobalArgs, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let ctx = Context::load(global)?;
    let resolution = ctx.resolve()?;

    let rendered = match format {
        OutputFormat::Json => {
            let mut json = resolution
                .plan
                .to_json()
                .context("Failed to serialize build plan")?;
            json.push('\n');
            json
        }
        OutputFormat::Text => render(&resolution.plan),
    };

    if let Some(path) = output {
        fs::write(path, rendered)
            .with_context(|| format!("Failed to write plan to {}", path.display()))?;
        println!(
            "Wrote plan for {} extensions to {}",
            resolution.plan.len(),
            path.display()
        );
    } else {
        print!("{rendered}");
    }

    Ok(())
}

/// Human-readable plan summary
pub(crate) fn render(plan: &BuildPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "CC={}", plan.config().compiler);
    let _ = writeln!(out);

    for entry in &plan.entries {
        let ext = &entry.extension;
        let _ = writeln!(out, "{} ({})", ext.module_name, ext.language);
        for source in &ext.sources {
            let _ = writeln!(out, "  {}", source.display());
        }
        let _ = writeln!(out, "  flags: {}", ext.extra_compile_args.join(" "));
    }

    out
}
