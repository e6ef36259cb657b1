//! PETSc installation discovery
//!
//! Tries a fixed, ordered list of strategies and takes the first one that
//! yields an existing root directory:
//!
//! 1. the `PETSC_DIR` petsc4py was built against, if it still exists
//! 2. the conda environment layout (`$CONDA_PREFIX`), unless `PETSC_DIR` is set
//! 3. the explicit `PETSC_DIR` / `PETSC_ARCH` environment variables
//!
//! Nothing is merged across strategies. The petsc4py report is re-checked on
//! disk because pip-built wheels can point at a temporary build directory that
//! no longer exists.

use crate::binding::Binding;
use crate::error::ResolveError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Location of the "latest python" petsc symlink inside a conda environment
const CONDA_PETSC_SUBDIR: [&str; 4] = ["lib", "python3.1", "site-packages", "petsc"];

/// A single way of finding the installation root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Root reported by `petsc4py.get_config()`
    BindingReported,
    /// Conda environment convention under `$CONDA_PREFIX`
    PackageManager,
    /// `PETSC_DIR` environment variable
    ExplicitEnv,
}

impl Strategy {
    /// Search order
    pub const ORDER: [Self; 3] = [Self::BindingReported, Self::PackageManager, Self::ExplicitEnv];

    /// Evaluate this strategy on its own.
    pub fn attempt(self, binding: &dyn Binding, env: &SearchEnv) -> StrategyOutcome {
        match self {
            Self::BindingReported => binding_reported(binding),
            Self::PackageManager => package_manager(env),
            Self::ExplicitEnv => explicit_env(env),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BindingReported => "petsc4py.get_config()",
            Self::PackageManager => "conda environment",
            Self::ExplicitEnv => "PETSC_DIR",
        };
        f.write_str(name)
    }
}

/// Root directory and architecture tag proposed by one strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub root_dir: PathBuf,
    pub arch_tag: Option<String>,
    pub strategy: Strategy,
}

impl Candidate {
    fn new(root_dir: PathBuf, arch_tag: Option<String>, strategy: Strategy) -> Self {
        Self {
            root_dir,
            arch_tag,
            strategy,
        }
    }
}

/// Result of evaluating one strategy
#[derive(Debug)]
pub enum StrategyOutcome {
    /// The strategy produced an existing root directory
    Found(Candidate),
    /// The strategy does not apply here; the reason is reported if nothing is found
    NotApplicable(String),
    /// The strategy could not be evaluated at all
    Failed(ResolveError),
}

/// Why a strategy was passed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub strategy: Strategy,
    pub reason: String,
}

impl Attempt {
    pub fn new(strategy: Strategy, reason: impl Into<String>) -> Self {
        Self {
            strategy,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.strategy, self.reason)
    }
}

/// Environment inputs to the search, captured once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchEnv {
    pub petsc_dir: Option<PathBuf>,
    pub petsc_arch: Option<String>,
    pub conda_prefix: Option<PathBuf>,
}

impl SearchEnv {
    /// Read `PETSC_DIR`, `PETSC_ARCH` and `CONDA_PREFIX` from the process.
    pub fn from_process() -> Self {
        Self {
            petsc_dir: crate::env_vars::petsc_dir(),
            petsc_arch: crate::env_vars::petsc_arch(),
            conda_prefix: crate::env_vars::conda_prefix(),
        }
    }
}

/// Directory shape of an installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// `root/arch/{include,lib}` plus the shared `root/include`
    ArchQualified,
    /// `root/{include,lib}`
    Flat,
}

/// The accepted installation
///
/// `arch_tag` is only ever `Some` when `root_dir/arch_tag` is a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallationLocation {
    pub root_dir: PathBuf,
    pub arch_tag: Option<String>,
    pub strategy: Strategy,
    /// Non-fatal problems the caller should show to the user
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl InstallationLocation {
    /// Classify the layout of a candidate on disk.
    ///
    /// An empty architecture tag means the flat layout. A tag without a
    /// matching directory degrades to the flat layout with a warning.
    pub fn from_candidate(candidate: Candidate) -> Self {
        let Candidate {
            root_dir,
            arch_tag,
            strategy,
        } = candidate;
        let mut warnings = Vec::new();

        let arch_tag = match arch_tag.filter(|tag| !tag.trim().is_empty()) {
            Some(tag) if root_dir.join(&tag).is_dir() => Some(tag),
            Some(tag) => {
                warnings.push(format!(
                    "PETSC_ARCH '{tag}' has no directory under {}; using the flat layout",
                    root_dir.display()
                ));
                None
            }
            None => None,
        };

        Self {
            root_dir,
            arch_tag,
            strategy,
            warnings,
        }
    }

    pub const fn layout(&self) -> Layout {
        if self.arch_tag.is_some() {
            Layout::ArchQualified
        } else {
            Layout::Flat
        }
    }

    /// `root/arch` for architecture-qualified installs, `root` otherwise
    pub fn arch_dir(&self) -> PathBuf {
        self.arch_tag
            .as_ref()
            .map_or_else(|| self.root_dir.clone(), |tag| self.root_dir.join(tag))
    }
}

/// Find the installation, trying each strategy in order.
///
/// # Errors
///
/// Returns `ResolveError::NotFound` listing every strategy and why it was
/// passed over, or the error of a strategy that could not be evaluated.
pub fn resolve(
    binding: &dyn Binding,
    env: &SearchEnv,
) -> Result<InstallationLocation, ResolveError> {
    let mut attempts = Vec::new();

    for strategy in Strategy::ORDER {
        match strategy.attempt(binding, env) {
            StrategyOutcome::Found(candidate) => {
                crate::debug!(
                    "{strategy} found PETSC_DIR={} PETSC_ARCH={}",
                    candidate.root_dir.display(),
                    candidate.arch_tag.as_deref().unwrap_or("")
                );
                return Ok(InstallationLocation::from_candidate(candidate));
            }
            StrategyOutcome::NotApplicable(reason) => {
                crate::debug!("{strategy} skipped: {reason}");
                attempts.push(Attempt::new(strategy, reason));
            }
            StrategyOutcome::Failed(err) => return Err(err),
        }
    }

    Err(ResolveError::NotFound { attempts })
}

fn missing(root: &Path) -> String {
    format!("{} does not exist", root.display())
}

fn binding_reported(binding: &dyn Binding) -> StrategyOutcome {
    let config = match binding.config() {
        Ok(config) => config,
        Err(err) => return StrategyOutcome::Failed(err),
    };

    if config.root_dir.as_os_str().is_empty() {
        return StrategyOutcome::NotApplicable("petsc4py reports no PETSC_DIR".to_string());
    }
    if !config.root_dir.is_dir() {
        return StrategyOutcome::NotApplicable(missing(&config.root_dir));
    }

    StrategyOutcome::Found(Candidate::new(
        config.root_dir,
        Some(config.arch_tag),
        Strategy::BindingReported,
    ))
}

fn package_manager(env: &SearchEnv) -> StrategyOutcome {
    let Some(prefix) = env.conda_prefix.as_ref() else {
        return StrategyOutcome::NotApplicable("CONDA_PREFIX is not set".to_string());
    };
    if env.petsc_dir.is_some() {
        return StrategyOutcome::NotApplicable("PETSC_DIR is set and takes over".to_string());
    }

    let root = CONDA_PETSC_SUBDIR
        .iter()
        .fold(prefix.clone(), |path, part| path.join(part));
    if !root.is_dir() {
        return StrategyOutcome::NotApplicable(missing(&root));
    }

    StrategyOutcome::Found(Candidate::new(
        root,
        env.petsc_arch.clone(),
        Strategy::PackageManager,
    ))
}

fn explicit_env(env: &SearchEnv) -> StrategyOutcome {
    let Some(root) = env.petsc_dir.as_ref() else {
        return StrategyOutcome::NotApplicable("PETSC_DIR is not set".to_string());
    };

    if !root.is_dir() {
        return StrategyOutcome::NotApplicable(missing(root));
    }

    StrategyOutcome::Found(Candidate::new(
        root.clone(),
        env.petsc_arch.clone(),
        Strategy::ExplicitEnv,
    ))
}
