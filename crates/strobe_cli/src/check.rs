//! `strobe check` — validate test declarations without running them.
//!
//! Loads each declaration and converts it into a test case, reporting any
//! parse or validation error. No external tool is invoked.

use std::path::Path;

use crate::{CheckArgs, GlobalArgs};

/// Runs the `strobe check` command. Returns exit code 0 if every
/// declaration is well-formed.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut failed = 0usize;

    for decl_path in &args.decls {
        match check_one(Path::new(decl_path)) {
            Ok(uut) => {
                if !global.quiet {
                    eprintln!("   OK    {decl_path} ({uut})");
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("   ERROR {decl_path}: {e}");
            }
        }
    }

    if !global.quiet {
        eprintln!();
        eprintln!(
            "   Result: {} valid, {failed} invalid out of {} declaration(s)",
            args.decls.len() - failed,
            args.decls.len()
        );
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

/// Validates one declaration file; returns the UUT name on success.
fn check_one(path: &Path) -> Result<String, strobe_config::ConfigError> {
    let decl = strobe_config::load_decl(path)?;
    let decl_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let case = decl.into_test_case(decl_dir)?;
    Ok(case.uut_name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global_quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
        }
    }

    #[test]
    fn valid_declaration_passes() {
        let dir = tempfile::tempdir().unwrap();
        let decl = dir.path().join("adder.toml");
        std::fs::write(
            &decl,
            r#"
[test]
source = "adder.ecc"
uut = "adder"
inputs  = [{ name = "a", width = 8 }, { name = "b", width = 8 }]
outputs = [{ name = "q", width = 8 }]
vectors = [[1, 1], [12, 15], [255, 1]]
expects = [[2], [27], [0]]
"#,
        )
        .unwrap();
        let args = CheckArgs {
            decls: vec![decl.to_str().unwrap().to_string()],
        };
        let code = run(&args, &global_quiet()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn mismatched_tables_fail() {
        let dir = tempfile::tempdir().unwrap();
        let decl = dir.path().join("bad.toml");
        std::fs::write(
            &decl,
            r#"
[test]
source = "x.ecc"
uut = "x1"
inputs  = [{ name = "a", width = 8 }]
outputs = [{ name = "q", width = 8 }]
vectors = [[1], [2]]
expects = [[1]]
"#,
        )
        .unwrap();
        let args = CheckArgs {
            decls: vec![decl.to_str().unwrap().to_string()],
        };
        let code = run(&args, &global_quiet()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn missing_file_fails() {
        let args = CheckArgs {
            decls: vec!["/nonexistent/decl.toml".to_string()],
        };
        let code = run(&args, &global_quiet()).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn mixed_results_exit_nonzero() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.toml");
        std::fs::write(
            &good,
            r#"
[test]
source = "x.ecc"
uut = "x1"
inputs  = [{ name = "a", width = 8 }]
outputs = [{ name = "q", width = 8 }]
"#,
        )
        .unwrap();
        let args = CheckArgs {
            decls: vec![
                good.to_str().unwrap().to_string(),
                "/nonexistent/decl.toml".to_string(),
            ],
        };
        let code = run(&args, &global_quiet()).unwrap();
        assert_eq!(code, 1);
    }
}
