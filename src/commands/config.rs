//! Config command
//!
//! Show the compiler and directories every extension is built with

use super::Context;
use crate::{GlobalArgs, OutputFormat};
use anyhow::{Context as _, Result};
use petsc_plan::BuildConfiguration;
use std::fmt::Write;
use std::path::PathBuf;

pub(crate) fn run(global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let ctx = Context::load(global)?;
    let resolution = ctx.resolve()?;
    let config = resolution.plan.config();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(config.as_ref())
                .context("Failed to serialize build configuration")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render(config)),
    }

    Ok(())
}

fn push_dirs(out: &mut String, title: &str, dirs: &[PathBuf]) {
    let _ = writeln!(out, "{title}");
    for dir in dirs {
        let _ = writeln!(out, "  {}", dir.display());
    }
}

/// Human-readable form of a build configuration
pub(crate) fn render(config: &BuildConfiguration) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Compiler     {}", config.compiler);
    let libraries: Vec<&str> = config.libraries.iter().map(String::as_str).collect();
    let _ = writeln!(out, "Libraries    {}", libraries.join(" "));
    push_dirs(&mut out, "Include dirs", &config.include_dirs);
    push_dirs(&mut out, "Library dirs", &config.library_dirs);
    push_dirs(&mut out, "Runtime library dirs", &config.runtime_library_dirs);
    out
}
