//! Pipeline error types.

use std::process::ExitStatus;

use strobe_common::Stage;

/// Failure of a single external toolchain invocation.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// The child process could not be started at all.
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        /// The program that was invoked.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited with a non-zero status.
    #[error("'{program}' exited with {status}")]
    NonZeroExit {
        /// The program that was invoked.
        program: String,
        /// The observed exit status.
        status: ExitStatus,
    },
}

/// A pipeline failure, tagged with the stage that produced it.
///
/// Every failure is terminal for the test run: no later stage executes and
/// nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The DUT compiler failed.
    #[error("DUT compilation failed: {0}")]
    Compile(InvokeError),

    /// Analysis of the compiled DUT artifact failed.
    #[error("DUT analysis failed: {0}")]
    AnalyzeDut(InvokeError),

    /// Analysis of the synthesized testbench failed.
    #[error("testbench analysis failed: {0}")]
    AnalyzeTestbench(InvokeError),

    /// Elaboration of the testbench entity failed.
    #[error("elaboration failed: {0}")]
    Elaborate(InvokeError),

    /// The simulation run failed.
    #[error("simulation failed: {0}")]
    Simulate(InvokeError),
}

impl PipelineError {
    /// The stage this failure halted the pipeline at.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Compile(_) => Stage::Compile,
            PipelineError::AnalyzeDut(_) => Stage::AnalyzeDut,
            PipelineError::AnalyzeTestbench(_) => Stage::AnalyzeTestbench,
            PipelineError::Elaborate(_) => Stage::Elaborate,
            PipelineError::Simulate(_) => Stage::Simulate,
        }
    }
}
