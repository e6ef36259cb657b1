//! Build configuration assembly
//!
//! Merges the resolved installation, the toolchain and the binding include
//! directories into the one configuration every extension is compiled with.

use crate::location::{InstallationLocation, Layout};
use crate::toolchain::ToolchainInfo;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Link name of the PETSc library
pub const PETSC_LIBRARY: &str = "petsc";

/// Compiler and directory settings shared by every extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfiguration {
    pub include_dirs: Vec<PathBuf>,
    pub library_dirs: Vec<PathBuf>,
    pub runtime_library_dirs: Vec<PathBuf>,
    pub libraries: BTreeSet<String>,
    pub compiler: String,
}

impl BuildConfiguration {
    /// Environment the extension build must run with.
    ///
    /// Applied to the build command only; the current process environment
    /// is left untouched.
    pub fn compiler_env(&self) -> Vec<(&'static str, &str)> {
        vec![(crate::env_vars::CC, self.compiler.as_str())]
    }
}

/// Combine resolver outputs into a `BuildConfiguration`.
///
/// Library-specific include directories come first, then the petsc4py
/// include directory, then the NumPy include directory.
pub fn assemble(
    location: &InstallationLocation,
    toolchain: &ToolchainInfo,
    binding_include: &Path,
    array_include: &Path,
) -> BuildConfiguration {
    let root = &location.root_dir;
    let arch_dir = location.arch_dir();

    let mut include_dirs = match location.layout() {
        Layout::ArchQualified => vec![arch_dir.join("include"), root.join("include")],
        Layout::Flat => vec![root.join("include")],
    };
    include_dirs.push(binding_include.to_path_buf());
    include_dirs.push(array_include.to_path_buf());

    let library_dirs = vec![arch_dir.join("lib")];

    BuildConfiguration {
        include_dirs,
        runtime_library_dirs: library_dirs.clone(),
        library_dirs,
        libraries: BTreeSet::from([PETSC_LIBRARY.to_string()]),
        compiler: toolchain.compiler.clone(),
    }
}
