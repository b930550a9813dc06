//! Narrow interfaces over the external toolchain executables.
//!
//! The orchestrator only ever needs two capabilities: compiling the DUT
//! source into an HDL artifact, and analyzing/elaborating/running HDL
//! units. Each method blocks until the child process exits and observes
//! nothing but the exit status.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::InvokeError;

/// Compiles a DUT source file into an HDL artifact in the working directory.
pub trait Compiler {
    /// Runs the compiler with `source` as input and `output` as the
    /// artifact name, with the working directory as the process cwd.
    fn compile(&self, workdir: &Path, source: &Path, output: &str) -> Result<(), InvokeError>;
}

/// Analyzes, elaborates, and runs HDL units in the working directory.
pub trait Simulator {
    /// Analyzes one HDL source file. `synopsys` selects the non-standard
    /// IEEE library variant the synthesized testbench requires.
    fn analyze(&self, workdir: &Path, file: &str, synopsys: bool) -> Result<(), InvokeError>;

    /// Elaborates a previously analyzed top-level unit.
    fn elaborate(&self, workdir: &Path, unit: &str) -> Result<(), InvokeError>;

    /// Runs an elaborated unit to completion.
    fn run(&self, workdir: &Path, unit: &str) -> Result<(), InvokeError>;
}

/// The external DUT compiler, invoked as `<program> -o <output> <source>`.
#[derive(Debug, Clone)]
pub struct DutCompiler {
    program: PathBuf,
}

impl DutCompiler {
    /// Creates a compiler wrapper around the given executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Compiler for DutCompiler {
    fn compile(&self, workdir: &Path, source: &Path, output: &str) -> Result<(), InvokeError> {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(workdir).arg("-o").arg(output).arg(source);
        run_status(cmd, &self.program)
    }
}

/// The GHDL analyzer/elaborator/simulator.
///
/// Stage flags follow GHDL's command surface: `-a` to analyze, `-e` to
/// elaborate, `-r` to run. The testbench-facing stages pass
/// `--ieee=synopsys` (the wrapper uses `std_logic_textio`), and the run
/// stage suppresses the IEEE assertions every design trips at time zero.
#[derive(Debug, Clone)]
pub struct Ghdl {
    program: PathBuf,
}

impl Ghdl {
    /// Creates a GHDL wrapper around the given executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Ghdl {
    fn default() -> Self {
        Self::new("ghdl")
    }
}

impl Simulator for Ghdl {
    fn analyze(&self, workdir: &Path, file: &str, synopsys: bool) -> Result<(), InvokeError> {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(workdir).arg("-a");
        if synopsys {
            cmd.arg("--ieee=synopsys");
        }
        cmd.arg(file);
        run_status(cmd, &self.program)
    }

    fn elaborate(&self, workdir: &Path, unit: &str) -> Result<(), InvokeError> {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(workdir)
            .arg("-e")
            .arg("--ieee=synopsys")
            .arg(unit);
        run_status(cmd, &self.program)
    }

    fn run(&self, workdir: &Path, unit: &str) -> Result<(), InvokeError> {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(workdir)
            .arg("-r")
            .arg("--ieee=synopsys")
            .arg(unit)
            .arg("--ieee-asserts=disable-at-0");
        run_status(cmd, &self.program)
    }
}

/// Runs a command to completion, mapping a failed spawn or a non-zero exit
/// into [`InvokeError`]. Output streams are inherited, never captured.
fn run_status(mut cmd: Command, program: &Path) -> Result<(), InvokeError> {
    let status = cmd.status().map_err(|source| InvokeError::Spawn {
        program: program.display().to_string(),
        source,
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(InvokeError::NonZeroExit {
            program: program.display().to_string(),
            status,
        })
    }
}
