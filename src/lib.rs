//! petsc-plan internal library code
//!
//! Locates an existing PETSc installation through petsc4py and the
//! environment, checks its version, reads its compiler, and produces the
//! build plan for the native extensions that link against it.

pub mod binding;
pub mod build_config;
pub mod catalog;
pub mod config;
pub mod debug;
pub mod env_vars;
pub mod error;
pub mod location;
pub mod pipeline;
pub mod plan;
pub mod toolchain;
pub mod version;

#[cfg(test)]
mod test_utils;

// Re-export common types for convenience
pub use binding::{Binding, BindingConfig, BindingReport, Petsc4py, ReportFile};
pub use build_config::{BuildConfiguration, assemble};
pub use catalog::{ExtensionDescriptor, Language};
pub use config::Config;
pub use debug::{init_debug, is_debug_enabled};
pub use error::ResolveError;
pub use location::{InstallationLocation, Layout, SearchEnv, Strategy, StrategyOutcome};
pub use pipeline::{Pipeline, PipelineError};
pub use plan::{BuildPlan, PlanEntry, PlanOptions};
pub use toolchain::ToolchainInfo;
pub use version::{LibraryVersion, MINIMUM_PETSC_VERSION, MinimumVersion};

/// Outcome of a full resolution run
#[derive(Debug, Clone)]
pub struct Resolution {
    pub version: LibraryVersion,
    pub location: InstallationLocation,
    pub toolchain: ToolchainInfo,
    pub plan: BuildPlan,
}

/// Check the PETSc version through the binding layer.
///
/// First step of every run; nothing touches the filesystem before it passes.
pub fn check_version(binding: &dyn Binding) -> Result<LibraryVersion, ResolveError> {
    let version = version::probe(binding)?;
    MINIMUM_PETSC_VERSION.check(version)?;
    Ok(version)
}

/// Version gate followed by installation discovery.
pub fn locate(
    binding: &dyn Binding,
    env: &SearchEnv,
) -> Result<(LibraryVersion, InstallationLocation), ResolveError> {
    let version = check_version(binding)?;
    let location = location::resolve(binding, env)?;
    Ok((version, location))
}

/// Run every step in order and build the plan for `catalog`.
///
/// Steps: version gate, installation discovery, toolchain extraction,
/// configuration assembly, plan construction. The first failure aborts the
/// run; no partial plan is returned.
pub fn resolve(
    binding: &dyn Binding,
    env: &SearchEnv,
    catalog: &[ExtensionDescriptor],
    options: &PlanOptions,
) -> Result<Resolution, ResolveError> {
    let (version, location) = locate(binding, env)?;
    let toolchain = toolchain::extract(&location)?;

    let binding_include = binding.config()?.include_dir;
    let array_include = binding.array_include_dir()?;
    let config = build_config::assemble(&location, &toolchain, &binding_include, &array_include);

    let plan = plan::build(config, catalog, options, &binding_include);

    Ok(Resolution {
        version,
        location,
        toolchain,
        plan,
    })
}
