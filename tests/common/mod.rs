//! Common test utilities and helpers
//!
//! This module provides shared functionality used across integration tests:
//! - Binary invocation with a clean PETSc environment (via `petsc_plan_command`)
//! - Installation and binding report fixtures (via `helpers`)

pub(crate) mod helpers;

pub(crate) use helpers::petsc_plan_command;
