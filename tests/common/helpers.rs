//! Shared test helpers and utilities

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Command for the petsc-plan binary with config files ignored and every
/// discovery variable cleared
pub(crate) fn petsc_plan_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_petsc-plan"));
    cmd.arg("--norc");
    for var in ["PETSC_DIR", "PETSC_ARCH", "CONDA_PREFIX", "PETSC_PLAN_DEBUG"] {
        cmd.env_remove(var);
    }
    cmd
}

/// A PETSc installation plus a recorded binding report pointing at it
#[allow(dead_code)]
pub(crate) struct Fixture {
    pub(crate) temp: TempDir,
    pub(crate) root: PathBuf,
    pub(crate) report: PathBuf,
}

#[allow(dead_code)]
impl Fixture {
    /// Flat install with `CC = <compiler>` in petscvariables
    pub(crate) fn flat(compiler: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("petsc");
        create_install(&root, &root, compiler);
        let report = write_report(temp.path(), &root, "", [3, 18, 4]);
        Self { temp, root, report }
    }

    /// Install under `<root>/<arch>` with the binding reporting `arch`
    pub(crate) fn with_arch(arch: &str, compiler: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path().join("petsc");
        fs::create_dir_all(root.join("include")).expect("Failed to create include dir");
        create_install(&root, &root.join(arch), compiler);
        let report = write_report(temp.path(), &root, arch, [3, 18, 4]);
        Self { temp, root, report }
    }

    /// Replace the binding report, keeping the installation
    pub(crate) fn rewrite_report(&self, root: &Path, arch: &str, version: [u32; 3]) {
        write_report(self.temp.path(), root, arch, version);
    }

    pub(crate) fn report_arg(&self) -> String {
        self.report.to_string_lossy().to_string()
    }
}

#[allow(dead_code)]
fn create_install(root: &Path, base: &Path, compiler: &str) {
    fs::create_dir_all(root).expect("Failed to create PETSc root");
    fs::create_dir_all(base.join("include")).expect("Failed to create include dir");
    let conf = base.join("lib/petsc/conf");
    fs::create_dir_all(&conf).expect("Failed to create conf dir");
    fs::write(
        conf.join("petscvariables"),
        format!("PETSC_ARCH =\nCC = {compiler}\nCXX = mpicxx\n"),
    )
    .expect("Failed to write petscvariables");
}

#[allow(dead_code)]
fn write_report(dir: &Path, root: &Path, arch: &str, version: [u32; 3]) -> PathBuf {
    let report = serde_json::json!({
        "version": { "major": version[0], "minor": version[1], "patch": version[2] },
        "config": {
            "root_dir": root,
            "arch_tag": arch,
            "include_dir": "/site-packages/petsc4py/include",
        },
        "array_include_dir": "/site-packages/numpy/core/include",
    });
    let path = dir.join("binding-report.json");
    fs::write(&path, report.to_string()).expect("Failed to write binding report");
    path
}
