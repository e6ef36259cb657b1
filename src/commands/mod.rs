//! Command implementations
//!
//! Each command loads the shared `Context` (config file, binding layer,
//! search environment) and runs its part of the resolution.

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod completion;
pub(crate) mod config;
pub(crate) mod env;
pub(crate) mod locate;
pub(crate) mod plan;
pub(crate) mod report;

use crate::GlobalArgs;
use anyhow::Result;
use petsc_plan::{
    Binding, Config, InstallationLocation, Petsc4py, ReportFile, Resolution, SearchEnv, catalog,
};

/// Inputs shared by every resolving command
pub(crate) struct Context {
    pub(crate) config: Config,
    pub(crate) binding: Box<dyn Binding>,
    pub(crate) env: SearchEnv,
}

impl Context {
    /// Load config, pick the binding source and capture the environment.
    ///
    /// A binding report (flag, then config file) wins over a live
    /// interpreter; the interpreter comes from the flag, then the config
    /// file, then `PYTHON`.
    pub(crate) fn load(global: &GlobalArgs) -> Result<Self> {
        let config = Config::load_with_options(global.config_file.as_deref(), global.norc)?;

        let report = global
            .binding_report
            .clone()
            .or_else(|| config.binding_report.clone());
        let binding: Box<dyn Binding> = if let Some(path) = report {
            Box::new(ReportFile::load(path)?)
        } else {
            let python = global.python.as_deref().or(config.python.as_deref());
            Box::new(Petsc4py::discover(python))
        };

        Ok(Self {
            config,
            binding,
            env: SearchEnv::from_process(),
        })
    }

    /// Full resolution against the underworld3 catalog.
    pub(crate) fn resolve(&self) -> Result<Resolution> {
        let resolution = petsc_plan::resolve(
            self.binding.as_ref(),
            &self.env,
            &catalog::underworld3(),
            &self.config.plan_options(),
        )?;
        report_warnings(&resolution.location);
        Ok(resolution)
    }
}

/// Print non-fatal resolution problems to stderr
pub(crate) fn report_warnings(location: &InstallationLocation) {
    for warning in &location.warnings {
        petsc_plan::debug::warn(warning);
    }
}
