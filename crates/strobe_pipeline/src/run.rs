//! The linear compile → analyze → elaborate → simulate state machine.

use std::path::{Path, PathBuf};

use strobe_common::artifact::{DUT_ARTIFACT, TESTBENCH_ENTITY, TESTBENCH_FILE};

use crate::error::PipelineError;
use crate::toolchain::{Compiler, Simulator};

/// Runs the five external toolchain stages in order inside `workdir`,
/// halting at the first failure.
///
/// `source` is the compile argument for the DUT source (see
/// [`source_arg_for`]). The testbench and encoded input file are expected
/// to already exist in `workdir` under their conventional names.
pub fn run_pipeline(
    compiler: &dyn Compiler,
    simulator: &dyn Simulator,
    workdir: &Path,
    source: &Path,
) -> Result<(), PipelineError> {
    compiler
        .compile(workdir, source, DUT_ARTIFACT)
        .map_err(PipelineError::Compile)?;
    simulator
        .analyze(workdir, DUT_ARTIFACT, false)
        .map_err(PipelineError::AnalyzeDut)?;
    simulator
        .analyze(workdir, TESTBENCH_FILE, true)
        .map_err(PipelineError::AnalyzeTestbench)?;
    simulator
        .elaborate(workdir, TESTBENCH_ENTITY)
        .map_err(PipelineError::Elaborate)?;
    simulator
        .run(workdir, TESTBENCH_ENTITY)
        .map_err(PipelineError::Simulate)?;
    Ok(())
}

/// Computes the DUT-source argument handed to the compiler, whose cwd is
/// `workdir`.
///
/// When the working directory sits next to the source file the
/// conventional relative form `../<file>` is used; otherwise the source is
/// resolved to an absolute path so the compiler finds it regardless of its
/// cwd.
pub fn source_arg_for(workdir: &Path, source: &Path) -> PathBuf {
    if let (Some(workdir_parent), Some(source_parent), Some(name)) =
        (workdir.parent(), source.parent(), source.file_name())
    {
        if workdir_parent == source_parent {
            return Path::new("..").join(name);
        }
    }
    source
        .canonicalize()
        .unwrap_or_else(|_| source.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvokeError;
    use std::cell::RefCell;

    /// Records stage invocations; fails every stage named in `fail_on`.
    #[derive(Default)]
    struct FakeToolchain {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl FakeToolchain {
        fn failing_at(stage: &'static str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on: Some(stage),
            }
        }

        fn record(&self, call: &str) -> Result<(), InvokeError> {
            self.calls.borrow_mut().push(call.to_string());
            if self.fail_on == Some(call) {
                Err(InvokeError::Spawn {
                    program: "fake".to_string(),
                    source: std::io::Error::other("injected failure"),
                })
            } else {
                Ok(())
            }
        }
    }

    impl Compiler for FakeToolchain {
        fn compile(&self, _: &Path, _: &Path, _: &str) -> Result<(), InvokeError> {
            self.record("compile")
        }
    }

    impl Simulator for FakeToolchain {
        fn analyze(&self, _: &Path, file: &str, synopsys: bool) -> Result<(), InvokeError> {
            assert_eq!(synopsys, file == TESTBENCH_FILE);
            self.record(if file == DUT_ARTIFACT {
                "analyze-dut"
            } else {
                "analyze-testbench"
            })
        }

        fn elaborate(&self, _: &Path, unit: &str) -> Result<(), InvokeError> {
            assert_eq!(unit, TESTBENCH_ENTITY);
            self.record("elaborate")
        }

        fn run(&self, _: &Path, unit: &str) -> Result<(), InvokeError> {
            assert_eq!(unit, TESTBENCH_ENTITY);
            self.record("simulate")
        }
    }

    #[test]
    fn all_stages_run_in_order() {
        let fake = FakeToolchain::default();
        run_pipeline(&fake, &fake, Path::new("wd"), Path::new("../dut.ecc")).unwrap();
        assert_eq!(
            *fake.calls.borrow(),
            vec![
                "compile",
                "analyze-dut",
                "analyze-testbench",
                "elaborate",
                "simulate"
            ]
        );
    }

    #[test]
    fn compile_failure_stops_pipeline() {
        let fake = FakeToolchain::failing_at("compile");
        let err = run_pipeline(&fake, &fake, Path::new("wd"), Path::new("../dut.ecc")).unwrap_err();
        assert!(matches!(err, PipelineError::Compile(_)));
        assert_eq!(*fake.calls.borrow(), vec!["compile"]);
    }

    #[test]
    fn elaborate_failure_skips_simulate() {
        let fake = FakeToolchain::failing_at("elaborate");
        let err = run_pipeline(&fake, &fake, Path::new("wd"), Path::new("../dut.ecc")).unwrap_err();
        assert!(matches!(err, PipelineError::Elaborate(_)));
        assert_eq!(
            *fake.calls.borrow(),
            vec!["compile", "analyze-dut", "analyze-testbench", "elaborate"]
        );
    }

    #[test]
    fn testbench_analysis_failure_tagged() {
        let fake = FakeToolchain::failing_at("analyze-testbench");
        let err = run_pipeline(&fake, &fake, Path::new("wd"), Path::new("../dut.ecc")).unwrap_err();
        assert!(matches!(err, PipelineError::AnalyzeTestbench(_)));
    }

    #[test]
    fn source_arg_sibling_dir_is_relative() {
        let arg = source_arg_for(Path::new("proj/strobe_run_adder"), Path::new("proj/adder.ecc"));
        assert_eq!(arg, Path::new("../adder.ecc"));
    }

    #[test]
    fn source_arg_bare_names() {
        // A bare workdir name and a bare source name share the (empty)
        // parent, matching the layout where both sit in the cwd.
        let arg = source_arg_for(Path::new("strobe_run_adder"), Path::new("adder.ecc"));
        assert_eq!(arg, Path::new("../adder.ecc"));
    }

    #[test]
    fn source_arg_unrelated_dirs_is_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("adder.ecc");
        std::fs::write(&source, "").unwrap();
        let arg = source_arg_for(Path::new("/somewhere/else/run"), &source);
        assert!(arg.is_absolute());
        assert!(arg.ends_with("adder.ecc"));
    }
}
