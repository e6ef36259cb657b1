//! petsc-plan command-line interface
//!
//! Locates PETSc for the underworld3 native extensions and hands the build
//! plan to the extension build.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process;

/// Display an error with optional backtrace information
fn display_error(err: &anyhow::Error, backtrace_enabled: bool) {
    eprintln!("error: {err}");

    // Show error chain
    let mut source = err.source();
    while let Some(err) = source {
        eprintln!("caused by: {err}");
        source = err.source();
    }

    if backtrace_enabled {
        let backtrace = err.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            eprintln!("\nBacktrace:");
            eprintln!("{backtrace}");
        }
    }
}

#[derive(Parser)]
#[command(name = "petsc-plan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Locate PETSc and plan the native extension build", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct GlobalArgs {
    /// Python interpreter with petsc4py installed (default: $PYTHON, then python3)
    #[arg(long, global = true)]
    pub(crate) python: Option<String>,

    /// Use a recorded binding report instead of querying petsc4py
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) binding_report: Option<PathBuf>,

    /// Path to a config file (default: ./.petsc-plan.toml, then ~/.config/petsc-plan/config.toml)
    #[arg(long = "config", global = true, value_name = "FILE")]
    pub(crate) config_file: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, global = true)]
    pub(crate) norc: bool,

    /// Print resolution details to stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Show a backtrace on errors
    #[arg(long, global = true)]
    pub(crate) backtrace: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the installed PETSc meets the minimum version
    Check,

    /// Print everything petsc4py reports, as JSON (input for --binding-report)
    Report,

    /// Show which PETSc installation would be used
    Locate,

    /// Show the compiler and directories extensions are built with
    Config {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Produce the extension build plan
    Plan {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write the plan to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Resolve the plan and run the extension build command with it
    Build {
        /// Where to write the plan for the build command
        #[arg(long)]
        plan_path: Option<PathBuf>,

        /// Show the command and its environment before running it
        #[arg(long)]
        verbose: bool,

        /// Build command and its arguments (e.g. `-- pip install .`)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Display the environment variables that affect resolution
    Env,

    /// Generate shell completion scripts
    Completion {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let global = cli.global;
    petsc_plan::init_debug(global.debug);

    let result = match cli.command {
        Commands::Check => commands::check::run(&global),
        Commands::Report => commands::report::run(&global),
        Commands::Locate => commands::locate::run(&global),
        Commands::Config { format } => commands::config::run(&global, format),
        Commands::Plan { format, output } => {
            commands::plan::run(&global, format, output.as_deref())
        }
        Commands::Build {
            plan_path,
            verbose,
            command,
        } => commands::build::run(&global, plan_path, verbose, &command),
        Commands::Env => {
            commands::env::run();
            Ok(())
        }
        Commands::Completion { shell } => commands::completion::run(shell),
    };

    if let Err(e) = result {
        display_error(&e, global.backtrace);
        process::exit(1);
    }
}

mod commands;
