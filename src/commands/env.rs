//! Env Command
//!
//! Displays the environment that drives PETSc discovery, for debugging
//! installations that resolve to the wrong place.

use petsc_plan::binding::DEFAULT_PYTHON;
use petsc_plan::env_vars;
use std::env;
use std::process::Command;

/// Display environment information
pub(crate) fn run() {
    println!("## Environment");
    println!();

    println!("petsc-plan {}", env!("CARGO_PKG_VERSION"));

    let python = env_vars::python().unwrap_or_else(|| DEFAULT_PYTHON.to_string());
    match Command::new(&python).arg("--version").output() {
        Ok(output) if output.status.success() => {
            // Python 2 printed its version on stderr
            let version = if output.stdout.is_empty() {
                String::from_utf8_lossy(&output.stderr).trim().to_string()
            } else {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            };
            println!("Python     {version} ({python})");
        }
        _ => println!("Python     not found ({python})"),
    }
    println!();

    println!("## Platform");
    println!();
    println!("OS         {}", env::consts::OS);
    println!("Arch       {}", env::consts::ARCH);
    println!();

    println!("## Environment Variables");
    println!();

    for var in env_vars::REPORTED_VARS {
        if let Ok(value) = env::var(var) {
            println!("{var:<20} {value}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_run() {
        // Just verify it doesn't crash
        run();
    }
}
