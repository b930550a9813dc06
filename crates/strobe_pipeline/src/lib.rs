//! External toolchain orchestration.
//!
//! Runs the strictly linear pipeline
//! `compile → analyze DUT → analyze testbench → elaborate → simulate`
//! inside a scoped working directory, invoking one external process per
//! stage and halting at the first non-zero exit. Only exit codes are
//! observed; stdout/stderr pass through to the caller's terminal.
//!
//! The toolchain sits behind the narrow [`Compiler`] and [`Simulator`]
//! capabilities so the orchestration logic is testable with fakes that
//! never spawn a process.

#![warn(missing_docs)]

mod error;
mod run;
mod toolchain;
mod workdir;

pub use error::{InvokeError, PipelineError};
pub use run::{run_pipeline, source_arg_for};
pub use toolchain::{Compiler, DutCompiler, Ghdl, Simulator};
pub use workdir::WorkDir;
