//! Pipeline stages and the per-test verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One discrete step of the verification pipeline.
///
/// `Generate` covers testbench synthesis and vector encoding before any
/// external process runs; `Verify` covers decoding and comparing the
/// simulation output. The five stages in between each invoke exactly one
/// external process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Testbench synthesis and input-vector encoding.
    Generate,
    /// Compiling the DUT source into an HDL artifact.
    Compile,
    /// Analyzing the compiled DUT artifact.
    AnalyzeDut,
    /// Analyzing the synthesized testbench.
    AnalyzeTestbench,
    /// Elaborating the testbench top-level entity.
    Elaborate,
    /// Running the elaborated simulation.
    Simulate,
    /// Decoding and comparing the simulation output.
    Verify,
}

impl Stage {
    /// The kebab-case stage name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Generate => "generate",
            Stage::Compile => "compile",
            Stage::AnalyzeDut => "analyze-dut",
            Stage::AnalyzeTestbench => "analyze-testbench",
            Stage::Elaborate => "elaborate",
            Stage::Simulate => "simulate",
            Stage::Verify => "verify",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The terminal outcome of one test case.
///
/// A failure names the stage that halted the pipeline and carries a
/// human-readable cause. No stage after the failing one has executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Every row and field matched or was a don't-care sentinel.
    Pass,
    /// The pipeline halted at `stage`.
    Fail {
        /// The stage that produced the failure.
        stage: Stage,
        /// Human-readable description of the failure.
        cause: String,
    },
}

impl Verdict {
    /// Creates a failing verdict for the given stage.
    pub fn fail(stage: Stage, cause: impl Into<String>) -> Self {
        Verdict::Fail {
            stage,
            cause: cause.into(),
        }
    }

    /// Returns true for [`Verdict::Pass`].
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    /// The process exit status for this verdict: 0 on pass, 1 on failure.
    pub fn exit_code(&self) -> i32 {
        if self.is_pass() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => f.write_str("pass"),
            Verdict::Fail { stage, cause } => write!(f, "fail at {stage}: {cause}"),
        }
    }
}
