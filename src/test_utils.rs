//! Shared test utilities for petsc-plan tests
//!
//! Fake binding layers and throwaway PETSc installation trees.

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::binding::{Binding, BindingConfig};
    use crate::error::ResolveError;
    use crate::version::LibraryVersion;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    pub(crate) const BINDING_INCLUDE: &str = "/site-packages/petsc4py/include";
    pub(crate) const ARRAY_INCLUDE: &str = "/site-packages/numpy/core/include";

    /// In-memory binding layer
    #[derive(Debug, Clone)]
    pub(crate) struct FakeBinding {
        version: LibraryVersion,
        config: BindingConfig,
        unavailable: Option<String>,
    }

    impl FakeBinding {
        /// petsc4py for PETSc 3.18.4 reporting `root` with no architecture tag
        pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
            Self {
                version: LibraryVersion::new(3, 18, 4),
                config: BindingConfig {
                    root_dir: root.into(),
                    arch_tag: String::new(),
                    include_dir: PathBuf::from(BINDING_INCLUDE),
                },
                unavailable: None,
            }
        }

        /// A binding whose every query fails (petsc4py not importable)
        pub(crate) fn unavailable(message: &str) -> Self {
            Self {
                unavailable: Some(message.to_string()),
                ..Self::new("")
            }
        }

        pub(crate) fn with_version(mut self, major: u32, minor: u32, patch: u32) -> Self {
            self.version = LibraryVersion::new(major, minor, patch);
            self
        }

        pub(crate) fn with_arch(mut self, arch: &str) -> Self {
            self.config.arch_tag = arch.to_string();
            self
        }

        fn check(&self) -> Result<(), ResolveError> {
            self.unavailable
                .as_ref()
                .map_or(Ok(()), |message| Err(ResolveError::probe(message.clone())))
        }
    }

    impl Binding for FakeBinding {
        fn version(&self) -> Result<LibraryVersion, ResolveError> {
            self.check()?;
            Ok(self.version)
        }

        fn config(&self) -> Result<BindingConfig, ResolveError> {
            self.check()?;
            Ok(self.config.clone())
        }

        fn array_include_dir(&self) -> Result<PathBuf, ResolveError> {
            self.check()?;
            Ok(PathBuf::from(ARRAY_INCLUDE))
        }
    }

    /// A PETSc installation tree in a temporary directory
    #[derive(Debug)]
    pub(crate) struct PetscInstall {
        temp: TempDir,
        arch: Option<String>,
    }

    impl PetscInstall {
        /// `root/{include,lib}`
        pub(crate) fn flat() -> Self {
            let install = Self {
                temp: TempDir::new().expect("Failed to create temp dir"),
                arch: None,
            };
            install.create_dirs(install.root());
            install
        }

        /// `root/include` plus `root/<arch>/{include,lib}`
        pub(crate) fn with_arch(arch: &str) -> Self {
            let install = Self {
                temp: TempDir::new().expect("Failed to create temp dir"),
                arch: Some(arch.to_string()),
            };
            fs::create_dir_all(install.root().join("include"))
                .expect("Failed to create include dir");
            install.create_dirs(&install.root().join(arch));
            install
        }

        fn create_dirs(&self, base: &Path) {
            for dir in ["include", "lib/petsc/conf"] {
                fs::create_dir_all(base.join(dir)).expect("Failed to create install dir");
            }
        }

        pub(crate) fn root(&self) -> &Path {
            self.temp.path()
        }

        /// Write `petscvariables` under the installation's arch directory.
        pub(crate) fn with_variables(self, contents: &str) -> Self {
            let base = self
                .arch
                .as_ref()
                .map_or_else(|| self.root().to_path_buf(), |arch| self.root().join(arch));
            fs::write(base.join("lib/petsc/conf/petscvariables"), contents)
                .expect("Failed to write petscvariables");
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::binding::Binding;

    #[test]
    fn flat_install_has_plain_layout() {
        let install = PetscInstall::flat().with_variables("CC = mpicc\n");

        assert!(install.root().join("include").is_dir());
        assert!(install.root().join("lib/petsc/conf/petscvariables").is_file());
    }

    #[test]
    fn arch_install_has_qualified_layout() {
        let install = PetscInstall::with_arch("arch1").with_variables("CC = mpicc\n");

        assert!(install.root().join("include").is_dir());
        assert!(install.root().join("arch1/include").is_dir());
        assert!(
            install
                .root()
                .join("arch1/lib/petsc/conf/petscvariables")
                .is_file()
        );
    }

    #[test]
    fn unavailable_binding_fails_every_query() {
        let binding = FakeBinding::unavailable("No module named 'petsc4py'");

        assert!(binding.version().is_err());
        assert!(binding.config().is_err());
        assert!(binding.array_include_dir().is_err());
    }
}
