//! Debug logging
//!
//! Resolution steps log through `debug!` so `--debug` (or
//! `PETSC_PLAN_DEBUG=1`) shows which strategy matched, which files were
//! read and which compiler was picked. Disabled logging costs one atomic load.

use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Initialize debug mode from the command-line flag or `PETSC_PLAN_DEBUG`
pub fn init_debug(flag: bool) {
    let _ = DEBUG_ENABLED.set(flag || crate::env_vars::plan_debug());
}

/// Check if debug mode is enabled
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.get().copied().unwrap_or(false)
}

/// Print a user-facing warning
pub fn warn(message: &str) {
    eprintln!("Warning: {message}");
}

/// Macro for convenient debug logging
///
/// Usage: `debug!("message with {}", variable)`
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::debug::is_debug_enabled() {
            eprintln!("[DEBUG] {}", format_args!($($arg)*));
        }
    };
}
