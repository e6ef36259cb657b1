//! petsc4py binding layer queries
//!
//! The binding layer is the only authority on which PETSc the Python side
//! will load at runtime, so it is asked for the version, the install
//! configuration and the include directories. Two sources are supported:
//! a live Python interpreter with petsc4py importable, and a recorded
//! report (JSON) captured earlier with `petsc-plan report`.

use crate::error::ResolveError;
use crate::version::LibraryVersion;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const VERSION_SCRIPT: &str = "\
import json
from petsc4py import PETSc
print(json.dumps(list(PETSc.Sys().getVersion())))
";

const CONFIG_SCRIPT: &str = "\
import json, petsc4py
conf = petsc4py.get_config()
print(json.dumps({
    'root_dir': conf.get('PETSC_DIR') or '',
    'arch_tag': conf.get('PETSC_ARCH') or '',
    'include_dir': petsc4py.get_include(),
}))
";

const ARRAY_INCLUDE_SCRIPT: &str = "\
import json, numpy
print(json.dumps(numpy.get_include()))
";

/// Interpreter used when nothing else is configured
pub const DEFAULT_PYTHON: &str = "python3";

/// Install configuration reported by `petsc4py.get_config()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// `PETSC_DIR` the binding was built against
    pub root_dir: PathBuf,
    /// `PETSC_ARCH` the binding was built against (may be empty)
    #[serde(default)]
    pub arch_tag: String,
    /// `petsc4py.get_include()`
    pub include_dir: PathBuf,
}

/// Programmatic view of the installed binding layer
pub trait Binding {
    /// Installed PETSc version triple.
    fn version(&self) -> Result<LibraryVersion, ResolveError>;

    /// Root directory, architecture tag and binding include directory.
    fn config(&self) -> Result<BindingConfig, ResolveError>;

    /// Include directory of the numerical array library (NumPy).
    fn array_include_dir(&self) -> Result<PathBuf, ResolveError>;
}

/// Live binding: runs small snippets in a Python interpreter
#[derive(Debug, Clone)]
pub struct Petsc4py {
    python: PathBuf,
}

impl Petsc4py {
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// Pick the interpreter: explicit choice, then `PYTHON`, then `python3`.
    pub fn discover(explicit: Option<&str>) -> Self {
        let python = explicit
            .map(str::to_string)
            .or_else(crate::env_vars::python)
            .unwrap_or_else(|| DEFAULT_PYTHON.to_string());
        crate::debug!("Using Python interpreter: {python}");
        Self::new(python)
    }

    pub fn python(&self) -> &Path {
        &self.python
    }

    fn run_json<T: DeserializeOwned>(&self, what: &str, script: &str) -> Result<T, ResolveError> {
        let output = Command::new(&self.python)
            .args(["-c", script])
            .output()
            .map_err(|e| {
                ResolveError::probe(format!(
                    "failed to run {}: {e}",
                    self.python.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("no error output")
                .trim()
                .to_string();
            return Err(ResolveError::probe(format!(
                "{} could not report {what}: {reason}",
                self.python.display()
            )));
        }

        // MPI initialization may print banners first; the answer is the last line
        let stdout = String::from_utf8_lossy(&output.stdout);
        let answer = stdout
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or_default();

        serde_json::from_str(answer).map_err(|e| {
            ResolveError::probe(format!(
                "unexpected {what} output from {}: {e}",
                self.python.display()
            ))
        })
    }
}

impl Binding for Petsc4py {
    fn version(&self) -> Result<LibraryVersion, ResolveError> {
        let triple: [u32; 3] = self.run_json("the PETSc version", VERSION_SCRIPT)?;
        Ok(LibraryVersion::from(triple))
    }

    fn config(&self) -> Result<BindingConfig, ResolveError> {
        self.run_json("its configuration", CONFIG_SCRIPT)
    }

    fn array_include_dir(&self) -> Result<PathBuf, ResolveError> {
        self.run_json("the NumPy include directory", ARRAY_INCLUDE_SCRIPT)
    }
}

/// Everything the binding layer reports, in one serializable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingReport {
    pub version: LibraryVersion,
    pub config: BindingConfig,
    pub array_include_dir: PathBuf,
}

impl BindingReport {
    /// Query every value from `binding`.
    pub fn capture(binding: &dyn Binding) -> Result<Self, ResolveError> {
        Ok(Self {
            version: binding.version()?,
            config: binding.config()?,
            array_include_dir: binding.array_include_dir()?,
        })
    }
}

/// Recorded binding: replays a report captured on another machine or earlier
#[derive(Debug, Clone)]
pub struct ReportFile {
    report: BindingReport,
}

impl ReportFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ResolveError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ResolveError::probe(format!(
                "failed to read binding report {}: {e}",
                path.display()
            ))
        })?;
        let report = serde_json::from_str(&contents).map_err(|e| {
            ResolveError::probe(format!(
                "invalid binding report {}: {e}",
                path.display()
            ))
        })?;
        crate::debug!("Loaded binding report from {}", path.display());
        Ok(Self { report })
    }

}

impl From<BindingReport> for ReportFile {
    fn from(report: BindingReport) -> Self {
        Self { report }
    }
}

impl Binding for ReportFile {
    fn version(&self) -> Result<LibraryVersion, ResolveError> {
        Ok(self.report.version)
    }

    fn config(&self) -> Result<BindingConfig, ResolveError> {
        Ok(self.report.config.clone())
    }

    fn array_include_dir(&self) -> Result<PathBuf, ResolveError> {
        Ok(self.report.array_include_dir.clone())
    }
}
