//! Extension catalog
//!
//! The native extension modules that are compiled against PETSc. The set is
//! fixed at build time; nothing is discovered from the source tree.

use serde::Serialize;
use std::path::PathBuf;

/// Source language of an extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    #[serde(rename = "c")]
    C,
    #[serde(rename = "c++")]
    Cpp,
}

impl Language {
    /// Language-standard flag the extension needs on top of the shared flags
    #[inline]
    pub const fn standard_flag(self) -> Option<&'static str> {
        match self {
            Self::C => None,
            Self::Cpp => Some("-std=c++11"),
        }
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "c++",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extension module to compile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionDescriptor {
    /// Dotted module name (e.g., `underworld3.kdtree`)
    pub module_name: String,
    /// Cython and C sources, in compile order
    pub sources: Vec<PathBuf>,
    pub language: Language,
    /// Flags specific to this extension
    pub extra_compile_args: Vec<String>,
}

impl ExtensionDescriptor {
    pub fn new(module_name: &str, sources: &[&str], language: Language) -> Self {
        Self {
            module_name: module_name.to_string(),
            sources: sources.iter().map(PathBuf::from).collect(),
            language,
            extra_compile_args: Vec::new(),
        }
    }
}

/// The underworld3 extension modules
pub fn underworld3() -> Vec<ExtensionDescriptor> {
    vec![
        ExtensionDescriptor::new(
            "underworld3.cython.petsc_discretisation",
            &["src/underworld3/cython/petsc_discretisation.pyx"],
            Language::C,
        ),
        ExtensionDescriptor::new(
            "underworld3.cython.petsc_maths",
            &["src/underworld3/cython/petsc_maths.pyx"],
            Language::C,
        ),
        ExtensionDescriptor::new(
            "underworld3.kdtree",
            &["src/underworld3/kdtree.pyx"],
            Language::Cpp,
        ),
        ExtensionDescriptor::new(
            "underworld3.cython.petsc_types",
            &["src/underworld3/cython/petsc_types.pyx"],
            Language::C,
        ),
        ExtensionDescriptor::new(
            "underworld3.cython.generic_solvers",
            &["src/underworld3/cython/petsc_generic_snes_solvers.pyx"],
            Language::C,
        ),
        ExtensionDescriptor::new(
            "underworld3.function._function",
            &[
                "src/underworld3/function/_function.pyx",
                "src/underworld3/function/petsc_tools.c",
            ],
            Language::C,
        ),
        ExtensionDescriptor::new(
            "underworld3.function.analytic",
            &[
                "src/underworld3/function/analytic.pyx",
                "src/underworld3/function/AnalyticSolNL.c",
            ],
            Language::C,
        ),
    ]
}
