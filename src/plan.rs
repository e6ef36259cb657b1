//! Build plan construction
//!
//! Stamps the shared `BuildConfiguration` onto every catalog entry. The plan
//! is the only thing handed to the extension build; it is built once and
//! never modified.

use crate::build_config::BuildConfiguration;
use crate::catalog::ExtensionDescriptor;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Optimization flags applied to every extension
pub const DEFAULT_OPTIMIZATION_FLAGS: [&str; 2] = ["-O3", "-g"];

/// Project-local header directories, relative to the source checkout
pub const DEFAULT_PROJECT_INCLUDE_DIRS: [&str; 3] = [".", "./underworld3", "./underworld3/petsc"];

/// Knobs that shape the plan but not the PETSc configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    pub optimization_flags: Vec<String>,
    pub project_include_dirs: Vec<PathBuf>,
    pub cython_build_dir: PathBuf,
    pub annotate: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            optimization_flags: DEFAULT_OPTIMIZATION_FLAGS
                .iter()
                .map(ToString::to_string)
                .collect(),
            project_include_dirs: DEFAULT_PROJECT_INCLUDE_DIRS
                .iter()
                .map(PathBuf::from)
                .collect(),
            cython_build_dir: PathBuf::from("build"),
            annotate: true,
        }
    }
}

/// Settings for the Cython translation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CythonOptions {
    pub language_level: String,
    pub build_dir: PathBuf,
    pub annotate: bool,
    /// Where `.pxd` files are looked up (the petsc4py include directory)
    pub include_path: Vec<PathBuf>,
}

/// One extension paired with the shared configuration
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    /// Descriptor with its final compile flags
    pub extension: ExtensionDescriptor,
    pub config: Arc<BuildConfiguration>,
}

/// Everything the extension build pipeline needs
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub entries: Vec<PlanEntry>,
    pub project_include_dirs: Vec<PathBuf>,
    pub cython: CythonOptions,
    #[serde(skip)]
    config: Arc<BuildConfiguration>,
}

impl BuildPlan {
    /// The configuration every entry shares
    pub const fn config(&self) -> &Arc<BuildConfiguration> {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as pretty JSON for the build pipeline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Pair every descriptor in `catalog` with `config`.
///
/// Each extension gets the optimization flags, then its language-standard
/// flag (C++ only), then its own flags.
pub fn build(
    config: BuildConfiguration,
    catalog: &[ExtensionDescriptor],
    options: &PlanOptions,
    binding_include: &Path,
) -> BuildPlan {
    let config = Arc::new(config);

    let entries = catalog
        .iter()
        .map(|descriptor| {
            let mut flags = options.optimization_flags.clone();
            if let Some(flag) = descriptor.language.standard_flag() {
                flags.push(flag.to_string());
            }
            flags.extend(descriptor.extra_compile_args.iter().cloned());

            PlanEntry {
                extension: ExtensionDescriptor {
                    extra_compile_args: flags,
                    ..descriptor.clone()
                },
                config: Arc::clone(&config),
            }
        })
        .collect();

    crate::debug!(
        "Planned {} extensions with CC={}",
        catalog.len(),
        config.compiler
    );

    BuildPlan {
        entries,
        project_include_dirs: options.project_include_dirs.clone(),
        cython: CythonOptions {
            language_level: "3".to_string(),
            build_dir: options.cython_build_dir.clone(),
            annotate: options.annotate,
            include_path: vec![binding_include.to_path_buf()],
        },
        config,
    }
}
