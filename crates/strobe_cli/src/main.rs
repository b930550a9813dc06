//! Strobe CLI — the command-line interface for the Strobe verification
//! harness.
//!
//! Provides `strobe run` for executing declared tests against the external
//! toolchain and `strobe check` for validating declarations without
//! invoking it.

#![warn(missing_docs)]

mod check;
mod run;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Strobe — a verification harness for HDL designs.
#[derive(Parser, Debug)]
#[command(name = "strobe", version, about = "Strobe HDL verification harness")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run declared tests against the external toolchain.
    Run(RunArgs),
    /// Validate test declarations without running them.
    Check(CheckArgs),
}

/// Arguments for the `strobe run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Test declaration files to run.
    #[arg(required = true)]
    pub decls: Vec<String>,

    /// The DUT compiler executable.
    #[arg(long, default_value = "elasticc")]
    pub compiler: String,

    /// The GHDL executable.
    #[arg(long, default_value = "ghdl")]
    pub ghdl: String,

    /// Retain each test's working directory for debugging.
    #[arg(long)]
    pub keep: bool,

    /// Root directory for working directories (default: next to each DUT
    /// source).
    #[arg(long)]
    pub workdir: Option<String>,
}

/// Arguments for the `strobe check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Test declaration files to validate.
    #[arg(required = true)]
    pub decls: Vec<String>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => atty_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Rough terminal detection — checks if stdout is a terminal.
fn atty_is_terminal() -> bool {
    // Use a simple heuristic: check the TERM env var.
    // In a real build we'd use the `is-terminal` crate, but this is
    // sufficient for now.
    std::env::var("TERM").is_ok()
}
