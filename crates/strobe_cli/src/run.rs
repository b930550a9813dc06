//! `strobe run` — execute declared tests against the external toolchain.
//!
//! Loads each declaration, runs it through the harness, prints per-test
//! status lines and a summary, and returns exit code 0 only if every test
//! passed.

use std::path::{Path, PathBuf};

use strobe_common::Verdict;
use strobe_harness::{run_case, DutCompiler, Ghdl, RunOptions};

use crate::{GlobalArgs, RunArgs};

/// Result of running a single declared test.
struct TestResult {
    /// The UUT name (or declaration path if loading failed).
    name: String,
    /// The verdict, or the load error that prevented a run.
    outcome: Result<Verdict, String>,
}

impl TestResult {
    fn passed(&self) -> bool {
        matches!(self.outcome, Ok(Verdict::Pass))
    }
}

/// Runs the `strobe run` command.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    if !global.quiet {
        eprintln!("   Running {} test(s)", args.decls.len());
    }

    let mut results = Vec::new();
    for decl_path in &args.decls {
        let result = run_one(decl_path, args, global);
        if !global.quiet {
            print_test_result(&result);
        }
        results.push(result);
    }

    let passed = results.iter().filter(|r| r.passed()).count();
    let failed = results.len() - passed;

    if !global.quiet {
        eprintln!();
        eprintln!(
            "   Result: {passed} passed, {failed} failed out of {} test(s)",
            results.len()
        );
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

/// Loads one declaration and runs it, mapping load errors into the result.
fn run_one(decl_path: &str, args: &RunArgs, global: &GlobalArgs) -> TestResult {
    let path = Path::new(decl_path);
    let decl = match strobe_config::load_decl(path) {
        Ok(decl) => decl,
        Err(e) => {
            return TestResult {
                name: decl_path.to_string(),
                outcome: Err(e.to_string()),
            }
        }
    };

    let decl_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let case = match decl.into_test_case(decl_dir) {
        Ok(case) => case,
        Err(e) => {
            return TestResult {
                name: decl_path.to_string(),
                outcome: Err(e.to_string()),
            }
        }
    };

    if global.verbose {
        eprintln!(
            "   Using compiler '{}' and simulator '{}' for {}",
            args.compiler,
            args.ghdl,
            case.uut_name()
        );
    }

    let options = RunOptions {
        compiler: PathBuf::from(&args.compiler),
        simulator: PathBuf::from(&args.ghdl),
        workdir_root: args.workdir.as_ref().map(PathBuf::from),
        keep_artifacts: args.keep,
        quiet: global.quiet,
    };
    let compiler = DutCompiler::new(&options.compiler);
    let simulator = Ghdl::new(&options.simulator);

    TestResult {
        name: case.uut_name().to_string(),
        outcome: Ok(run_case(&case, &compiler, &simulator, &options)),
    }
}

/// Prints the status line for one test.
fn print_test_result(result: &TestResult) {
    match &result.outcome {
        Ok(Verdict::Pass) => eprintln!("   PASS  {}", result.name),
        Ok(Verdict::Fail { stage, cause }) => {
            eprintln!("   FAIL  {} ({stage}: {cause})", result.name)
        }
        Err(e) => eprintln!("   FAIL  {}: {e}", result.name),
    }
}
