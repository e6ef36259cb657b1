//! PETSc version probing and the minimum-version gate
//!
//! The gate runs once, before any filesystem discovery.

use crate::binding::Binding;
use crate::error::ResolveError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Oldest PETSc release the extensions compile against
pub const MINIMUM_PETSC_VERSION: MinimumVersion = MinimumVersion {
    major: 3,
    minor: 18,
};

/// Installed PETSc version as reported by petsc4py
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LibraryVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl LibraryVersion {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl From<[u32; 3]> for LibraryVersion {
    fn from([major, minor, patch]: [u32; 3]) -> Self {
        Self::new(major, minor, patch)
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Minimum version requirement
///
/// The major version must match exactly; the minor version is a lower bound.
/// PETSc breaks its C API between major releases, so 4.x is rejected too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumVersion {
    pub major: u32,
    pub minor: u32,
}

impl MinimumVersion {
    #[must_use]
    pub const fn is_satisfied_by(&self, version: LibraryVersion) -> bool {
        version.major == self.major && version.minor >= self.minor
    }

    /// Enforce the requirement
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Version` carrying both versions when `version`
    /// does not satisfy this requirement.
    pub fn check(&self, version: LibraryVersion) -> Result<(), ResolveError> {
        if self.is_satisfied_by(version) {
            Ok(())
        } else {
            Err(ResolveError::Version {
                required: *self,
                actual: version,
            })
        }
    }
}

impl fmt::Display for MinimumVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.0", self.major, self.minor)
    }
}

/// Ask the binding layer for the installed PETSc version.
pub fn probe(binding: &dyn Binding) -> Result<LibraryVersion, ResolveError> {
    let version = binding.version()?;
    crate::debug!("petsc4py reports PETSc {version}");
    Ok(version)
}
