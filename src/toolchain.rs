//! Compiler extraction from PETSc's `petscvariables`
//!
//! PETSc records the exact toolchain it was configured with in
//! `<arch dir>/lib/petsc/conf/petscvariables`, one `KEY = VALUE` per line.
//! Extensions must be compiled with the same `CC` (usually an MPI wrapper
//! such as `mpicc`), so that line is all we read. The file format belongs to
//! PETSc; only the `CC` key is interpreted here.

use crate::error::ResolveError;
use crate::location::InstallationLocation;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

const COMPILER_PREFIX: &str = "CC =";

/// Toolchain facts taken from the installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainInfo {
    /// C compiler command, possibly with arguments (never empty)
    pub compiler: String,
}

/// Path of the toolchain description file for `location`
pub fn variables_path(location: &InstallationLocation) -> PathBuf {
    location
        .arch_dir()
        .join("lib")
        .join("petsc")
        .join("conf")
        .join("petscvariables")
}

/// Return the value of the first `CC =` line, if any.
///
/// Lines are trimmed before matching; the value is everything after the
/// first `=`, trimmed. Scanning stops at the first match.
pub fn scan_compiler<R: BufRead>(reader: R) -> std::io::Result<Option<String>> {
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.starts_with(COMPILER_PREFIX)
            && let Some((_, value)) = line.split_once('=')
        {
            return Ok(Some(value.trim().to_string()));
        }
    }
    Ok(None)
}

/// Read the compiler PETSc was built with.
///
/// # Errors
///
/// Returns `ResolveError::Toolchain` if the file is missing or unreadable,
/// has no `CC =` line, or that line has an empty value.
pub fn extract(location: &InstallationLocation) -> Result<ToolchainInfo, ResolveError> {
    let path = variables_path(location);
    crate::debug!("Reading toolchain from {}", path.display());

    let fail = |reason: String| ResolveError::Toolchain {
        path: path.clone(),
        reason,
    };

    let file = File::open(&path).map_err(|e| fail(format!("cannot open file: {e}")))?;
    let compiler = scan_compiler(BufReader::new(file))
        .map_err(|e| fail(format!("cannot read file: {e}")))?
        .ok_or_else(|| fail(format!("no `{COMPILER_PREFIX}` line")))?;

    if compiler.is_empty() {
        return Err(fail(format!("`{COMPILER_PREFIX}` line has no value")));
    }

    crate::debug!("PETSc compiler: {compiler}");
    Ok(ToolchainInfo { compiler })
}
