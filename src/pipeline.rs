//! Extension build pipeline handoff
//!
//! Runs the external build command (e.g. `pip install .`) with the plan
//! written to disk. The PETSc compiler is passed as `CC` to that child
//! process only:
//! ```bash
//! CC=mpicc PETSC_PLAN=build/petsc-plan.json pip install .
//! ```

use crate::plan::BuildPlan;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Default location of the serialized plan
pub const DEFAULT_PLAN_PATH: &str = "build/petsc-plan.json";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No build command given")]
    EmptyCommand,

    #[error("Failed to serialize build plan: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write build plan to {}: {source}", .path.display())]
    WritePlan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed with exit code: {}", .code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    Failed { program: String, code: Option<i32> },
}

/// Build command runner
#[derive(Debug, Clone)]
pub struct Pipeline {
    plan_path: PathBuf,
    verbose: bool,
}

impl Pipeline {
    pub fn new(plan_path: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            plan_path: plan_path.into(),
            verbose,
        }
    }

    pub fn plan_path(&self) -> &Path {
        &self.plan_path
    }

    /// Write `plan` to disk.
    pub fn write_plan(&self, plan: &BuildPlan) -> Result<(), PipelineError> {
        let json = plan.to_json()?;
        if let Some(parent) = self.plan_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| PipelineError::WritePlan {
                path: self.plan_path.clone(),
                source,
            })?;
        }
        fs::write(&self.plan_path, json).map_err(|source| PipelineError::WritePlan {
            path: self.plan_path.clone(),
            source,
        })
    }

    /// Write the plan and run `command` against it.
    ///
    /// The child inherits stdout and stderr. Returns how long it ran.
    pub fn run(&self, plan: &BuildPlan, command: &[String]) -> Result<Duration, PipelineError> {
        let (program, args) = command.split_first().ok_or(PipelineError::EmptyCommand)?;

        self.write_plan(plan)?;

        let start_time = Instant::now();
        let mut cmd = Command::new(program);
        cmd.args(args);
        for (key, value) in plan.config().compiler_env() {
            cmd.env(key, value);
        }
        cmd.env(crate::env_vars::PETSC_PLAN, &self.plan_path);

        if self.verbose {
            println!("Running: {}", command.join(" "));
            println!("  CC={}", plan.config().compiler);
            println!("  PETSC_PLAN={}", self.plan_path.display());
        }

        let status = cmd.status().map_err(|source| PipelineError::Spawn {
            program: program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(PipelineError::Failed {
                program: program.clone(),
                code: status.code(),
            });
        }

        Ok(start_time.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_config::BuildConfiguration;
    use crate::catalog;
    use crate::plan::{self, PlanOptions};
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn sample_plan() -> BuildPlan {
        let config = BuildConfiguration {
            include_dirs: vec![PathBuf::from("/opt/petsc/include")],
            library_dirs: vec![PathBuf::from("/opt/petsc/lib")],
            runtime_library_dirs: vec![PathBuf::from("/opt/petsc/lib")],
            libraries: BTreeSet::from(["petsc".to_string()]),
            compiler: "mpicc".to_string(),
        };
        plan::build(
            config,
            &catalog::underworld3(),
            &PlanOptions::default(),
            Path::new("/petsc4py/include"),
        )
    }

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[test]
    fn empty_command_is_rejected() {
        let temp = TempDir::new().unwrap();
        let pipeline = Pipeline::new(temp.path().join("plan.json"), false);

        let result = pipeline.run(&sample_plan(), &[]);

        assert!(matches!(result, Err(PipelineError::EmptyCommand)));
    }

    #[test]
    fn write_plan_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("build").join("petsc-plan.json");
        let pipeline = Pipeline::new(&path, false);

        pipeline.write_plan(&sample_plan()).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("underworld3.kdtree"));
    }

    #[cfg(unix)]
    #[test]
    fn command_sees_compiler_and_plan() {
        let temp = TempDir::new().unwrap();
        let pipeline = Pipeline::new(temp.path().join("plan.json"), false);

        let result = pipeline.run(
            &sample_plan(),
            &sh(r#"test "$CC" = mpicc && test -f "$PETSC_PLAN""#),
        );

        assert!(result.is_ok(), "{result:?}");
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_reports_exit_code() {
        let temp = TempDir::new().unwrap();
        let pipeline = Pipeline::new(temp.path().join("plan.json"), false);

        let result = pipeline.run(&sample_plan(), &sh("exit 3"));

        assert!(matches!(
            result,
            Err(PipelineError::Failed { code: Some(3), .. })
        ));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let pipeline = Pipeline::new(temp.path().join("plan.json"), false);

        let result = pipeline.run(
            &sample_plan(),
            &["/definitely/not/a/build-tool".to_string()],
        );

        assert!(matches!(result, Err(PipelineError::Spawn { .. })));
    }
}
