//! Resolution errors
//!
//! Every variant is a missing external prerequisite. None are retried; the
//! driver aborts before any plan is produced.

use crate::location::Attempt;
use crate::version::{LibraryVersion, MinimumVersion};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving the PETSc build configuration
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The binding layer could not be queried (petsc4py missing or broken)
    #[error("Unable to query petsc4py: {message}")]
    Probe { message: String },

    #[error("Minimum compatible version of petsc is {required}, detected version {actual}")]
    Version {
        required: MinimumVersion,
        actual: LibraryVersion,
    },

    #[error("No PETSc installation found (tried: {})", describe_attempts(.attempts))]
    NotFound { attempts: Vec<Attempt> },

    #[error("Unable to determine the PETSc compiler from {}: {reason}", .path.display())]
    Toolchain { path: PathBuf, reason: String },
}

impl ResolveError {
    pub(crate) fn probe(message: impl Into<String>) -> Self {
        Self::Probe {
            message: message.into(),
        }
    }
}

fn describe_attempts(attempts: &[Attempt]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
