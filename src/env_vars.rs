//! PETSc and build environment variable handling.
//!
//! The names read here are a compatibility contract with existing PETSc
//! installations and conda environments; do not rename them.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Explicit installation root override.
pub const PETSC_DIR: &str = "PETSC_DIR";
/// Explicit architecture tag override.
pub const PETSC_ARCH: &str = "PETSC_ARCH";
/// Active conda environment prefix.
pub const CONDA_PREFIX: &str = "CONDA_PREFIX";
/// Compiler-selection variable handed to the extension build.
pub const CC: &str = "CC";
/// Path of the serialized plan, exported to the build command.
pub const PETSC_PLAN: &str = "PETSC_PLAN";

// Unset and empty are the same thing for every variable here
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn var(name: &str) -> Option<String> {
    non_empty(env::var(name).ok())
}

// Paths may hold bytes that are not valid UTF-8
fn non_empty_os(value: Option<OsString>) -> Option<OsString> {
    value.filter(|v| v.to_str().is_none_or(|s| !s.trim().is_empty()))
}

fn var_path(name: &str) -> Option<PathBuf> {
    non_empty_os(env::var_os(name)).map(PathBuf::from)
}

// Accepts "1", "true", "yes" (case-insensitive)
fn parse_bool(value: &str) -> bool {
    let s = value.trim().to_lowercase();
    s == "1" || s == "true" || s == "yes"
}

/// Get the PETSc installation root override (`PETSC_DIR`).
pub fn petsc_dir() -> Option<PathBuf> {
    var_path(PETSC_DIR)
}

/// Get the PETSc architecture tag override (`PETSC_ARCH`).
///
/// Invalid UTF-8 is converted lossily; no directory matches the result, so
/// discovery warns about it.
pub fn petsc_arch() -> Option<String> {
    non_empty(env::var_os(PETSC_ARCH).map(|v| v.to_string_lossy().into_owned()))
}

/// Get the active conda environment prefix (`CONDA_PREFIX`).
pub fn conda_prefix() -> Option<PathBuf> {
    var_path(CONDA_PREFIX)
}

/// Get the Python interpreter used to query petsc4py (`PYTHON`).
pub fn python() -> Option<String> {
    var("PYTHON")
}

/// Check if debug logging was requested through `PETSC_PLAN_DEBUG`.
pub fn plan_debug() -> bool {
    env::var("PETSC_PLAN_DEBUG").ok().is_some_and(|s| parse_bool(&s))
}

/// Get `XDG_CONFIG_HOME` for locating the user config file.
pub fn xdg_config_home() -> Option<String> {
    var("XDG_CONFIG_HOME")
}

/// Variables shown by `petsc-plan env`, in display order.
pub const REPORTED_VARS: &[&str] = &[
    PETSC_DIR,
    PETSC_ARCH,
    CONDA_PREFIX,
    "PYTHON",
    CC,
    "PETSC_PLAN_DEBUG",
    "XDG_CONFIG_HOME",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_unset() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn non_empty_values_are_kept_verbatim() {
        assert_eq!(
            non_empty(Some("/opt/petsc".to_string())),
            Some("/opt/petsc".to_string())
        );
        assert_eq!(
            non_empty(Some("arch-linux-c-opt".to_string())),
            Some("arch-linux-c-opt".to_string())
        );
    }

    #[test]
    fn empty_os_values_are_unset() {
        assert_eq!(non_empty_os(Some(OsString::new())), None);
        assert_eq!(non_empty_os(Some(OsString::from("  "))), None);
        assert_eq!(
            non_empty_os(Some(OsString::from("/opt/petsc"))),
            Some(OsString::from("/opt/petsc"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_os_values_are_kept() {
        use std::os::unix::ffi::OsStringExt;

        let value = OsString::from_vec(b"/opt/petsc-\xff".to_vec());

        assert_eq!(non_empty_os(Some(value.clone())), Some(value));
    }

    #[test]
    fn bool_parsing_true_variants() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("YES"));
        assert!(parse_bool(" True "));
    }

    #[test]
    fn bool_parsing_false_variants() {
        assert!(!parse_bool("0"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn reported_vars_include_search_inputs() {
        for name in [PETSC_DIR, PETSC_ARCH, CONDA_PREFIX] {
            assert!(REPORTED_VARS.contains(&name));
        }
    }
}
