//! Test-case execution: the single entry point that drives a declared test
//! through encoding, testbench synthesis, the external toolchain pipeline,
//! and output verification.
//!
//! Data flow per test case:
//!
//! ```text
//! declaration → encode inputs → synthesize testbench
//!             → compile / analyze / elaborate / simulate
//!             → decode + compare → Verdict
//! ```
//!
//! Execution is fully sequential within one test case and every failure is
//! terminal: the first failing step produces the verdict and nothing after
//! it runs. Independent test cases share no state and may run in parallel
//! as long as their working directories are disjoint.

#![warn(missing_docs)]

use std::fs;
use std::path::PathBuf;

use strobe_common::artifact::{INPUT_FILE, OUTPUT_FILE, TESTBENCH_FILE};
use strobe_common::{Stage, TestCase, Verdict};
use strobe_pipeline::{run_pipeline, source_arg_for, WorkDir};

pub use strobe_pipeline::{Compiler, DutCompiler, Ghdl, Simulator};

/// Options controlling one harness run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// The DUT compiler executable used by [`run_test`].
    pub compiler: PathBuf,
    /// The GHDL executable used by [`run_test`].
    pub simulator: PathBuf,
    /// Root directory for per-test working directories. Defaults to the
    /// directory containing the DUT source.
    pub workdir_root: Option<PathBuf>,
    /// Retain the working directory and its artifacts for debugging.
    pub keep_artifacts: bool,
    /// Suppress status output (failures are still reported).
    pub quiet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from("elasticc"),
            simulator: PathBuf::from("ghdl"),
            workdir_root: None,
            keep_artifacts: false,
            quiet: false,
        }
    }
}

/// Runs one test case against the given toolchain and returns its verdict.
///
/// The working directory is created fresh (stale artifacts from a previous
/// run are discarded), exclusively owned by this run, and removed on exit
/// unless `options.keep_artifacts` is set.
pub fn run_case(
    case: &TestCase,
    compiler: &dyn Compiler,
    simulator: &dyn Simulator,
    options: &RunOptions,
) -> Verdict {
    match execute(case, compiler, simulator, options) {
        Ok(()) => Verdict::Pass,
        Err(verdict) => verdict,
    }
}

/// The fallible body of [`run_case`]; each step maps its error into a
/// stage-tagged failing verdict.
fn execute(
    case: &TestCase,
    compiler: &dyn Compiler,
    simulator: &dyn Simulator,
    options: &RunOptions,
) -> Result<(), Verdict> {
    let root = workdir_root(case, options);
    let mut workdir = WorkDir::create(&root, &format!("strobe_run_{}", case.uut_name()))
        .map_err(|e| {
            Verdict::fail(
                Stage::Generate,
                format!("failed to create working directory: {e}"),
            )
        })?;
    if options.keep_artifacts {
        workdir.keep();
    }

    let table = strobe_codec::encode_table(case.vectors(), case.signature().inputs())
        .map_err(|e| Verdict::fail(Stage::Generate, e.to_string()))?;
    fs::write(workdir.path().join(INPUT_FILE), table).map_err(|e| {
        Verdict::fail(Stage::Generate, format!("failed to write {INPUT_FILE}: {e}"))
    })?;

    strobe_tb::write_testbench(
        &workdir.path().join(TESTBENCH_FILE),
        case.uut_name(),
        case.signature(),
        case.clocked(),
    )
    .map_err(|e| Verdict::fail(Stage::Generate, e.to_string()))?;

    let source = source_arg_for(workdir.path(), case.source());
    run_pipeline(compiler, simulator, workdir.path(), &source)
        .map_err(|e| Verdict::fail(e.stage(), e.to_string()))?;

    strobe_verify::verify(
        &workdir.path().join(OUTPUT_FILE),
        case.signature().outputs(),
        case.expected(),
    )
    .map_err(|e| Verdict::fail(Stage::Verify, e.to_string()))?;

    Ok(())
}

/// Resolves the root under which this case's working directory is created.
fn workdir_root(case: &TestCase, options: &RunOptions) -> PathBuf {
    if let Some(ref root) = options.workdir_root {
        return root.clone();
    }
    match case.source().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Runs one test case with the real toolchain and returns a process exit
/// status: 0 if every row passed, 1 on any failure (including toolchain
/// failures).
pub fn run_test(case: &TestCase, options: &RunOptions) -> i32 {
    if !options.quiet {
        eprintln!(" -- Testing module {} --", case.uut_name());
    }
    let compiler = DutCompiler::new(&options.compiler);
    let simulator = Ghdl::new(&options.simulator);
    let verdict = run_case(case, &compiler, &simulator, options);
    match &verdict {
        Verdict::Pass => {
            if !options.quiet {
                eprintln!(" -- All tests for module {} passed --", case.uut_name());
            }
        }
        Verdict::Fail { stage, cause } => {
            eprintln!(
                "Test failure for module {} at {stage}: {cause}",
                case.uut_name()
            );
        }
    }
    verdict.exit_code()
}
