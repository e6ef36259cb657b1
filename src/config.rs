//! Configuration file management
//!
//! Reads petsc-plan's TOML configuration from project and user locations.
//! Every key is optional; command-line flags take precedence.

use crate::plan::PlanOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Project-local config file name
pub const LOCAL_CONFIG_FILE: &str = ".petsc-plan.toml";

/// Application configuration loaded from TOML files
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Python interpreter used to query petsc4py
    #[serde(default)]
    pub python: Option<String>,

    /// Recorded binding report to use instead of a live interpreter
    #[serde(default)]
    pub binding_report: Option<PathBuf>,

    /// Optimization flags for every extension (default: `-O3 -g`)
    #[serde(default)]
    pub optimization_flags: Option<Vec<String>>,

    /// Project header directories added to the plan
    #[serde(default)]
    pub project_include_dirs: Option<Vec<PathBuf>>,

    /// Cython build directory (default: `build`)
    #[serde(default)]
    pub cython_build_dir: Option<PathBuf>,

    /// Emit Cython HTML annotations (default: true)
    #[serde(default)]
    pub annotate: Option<bool>,

    /// Where `petsc-plan build` writes the plan
    #[serde(default)]
    pub plan_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from TOML files.
    /// Priority: custom path, then ./.petsc-plan.toml, then
    /// ~/.config/petsc-plan/config.toml
    ///
    /// # Arguments
    /// * `custom_path` - Optional custom path to config file (overrides defaults)
    /// * `skip_rc` - If true, skip loading config files (return default config)
    ///
    /// An explicit `custom_path` must exist and parse. A default location
    /// that exists but fails to parse is an error too; only absent files
    /// fall through.
    pub fn load_with_options(custom_path: Option<&Path>, skip_rc: bool) -> Result<Self> {
        if skip_rc {
            return Ok(Self::default());
        }

        if let Some(path) = custom_path {
            return Self::load_from(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load_from(&local);
        }

        if let Some(config_dir) = Self::user_config_dir() {
            let config_path = config_dir.join("config.toml");
            if config_path.is_file() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Self::default())
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        crate::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn user_config_dir() -> Option<PathBuf> {
        if let Some(xdg_config) = crate::env_vars::xdg_config_home() {
            return Some(PathBuf::from(xdg_config).join("petsc-plan"));
        }

        dirs::home_dir().map(|home| home.join(".config").join("petsc-plan"))
    }

    /// Plan options with config values layered over the defaults
    pub fn plan_options(&self) -> PlanOptions {
        let defaults = PlanOptions::default();
        PlanOptions {
            optimization_flags: self
                .optimization_flags
                .clone()
                .unwrap_or(defaults.optimization_flags),
            project_include_dirs: self
                .project_include_dirs
                .clone()
                .unwrap_or(defaults.project_include_dirs),
            cython_build_dir: self
                .cython_build_dir
                .clone()
                .unwrap_or(defaults.cython_build_dir),
            annotate: self.annotate.unwrap_or(defaults.annotate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (temp, path)
    }

    #[test]
    fn skip_rc_returns_default() {
        let (_temp, path) = write_config("python = \"/usr/bin/python3.11\"\n");

        let config = Config::load_with_options(Some(&path), true).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn custom_path_is_loaded() {
        let (_temp, path) = write_config(
            r#"
python = "/opt/conda/bin/python"
optimization_flags = ["-O0", "-g"]
annotate = false
"#,
        );

        let config = Config::load_with_options(Some(&path), false).unwrap();

        assert_eq!(config.python.as_deref(), Some("/opt/conda/bin/python"));
        let options = config.plan_options();
        assert_eq!(options.optimization_flags, vec!["-O0", "-g"]);
        assert!(!options.annotate);
        assert_eq!(options.cython_build_dir, PathBuf::from("build"));
    }

    #[test]
    fn missing_custom_path_is_error() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_with_options(Some(&temp.path().join("none.toml")), false);

        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_temp, path) = write_config("pyhton = \"python3\"\n");

        let err = Config::load_with_options(Some(&path), false).unwrap_err();

        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn empty_config_keeps_plan_defaults() {
        assert_eq!(Config::default().plan_options(), PlanOptions::default());
    }
}
