//! Scoped per-run working directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A working directory exclusively owned by one pipeline run.
///
/// Created fresh for every run: a directory left behind by a previous run
/// is removed first, so stale artifacts can never leak into a new run. The
/// directory is removed again when the `WorkDir` is dropped unless
/// [`WorkDir::keep`] was called to retain the artifacts for debugging.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
    keep: bool,
}

impl WorkDir {
    /// Creates (or re-creates) `root/name`. A pre-existing directory is not
    /// an error; its contents are discarded.
    pub fn create(root: &Path, name: &str) -> io::Result<Self> {
        let path = root.join(name);
        if path.exists() {
            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(&path)?;
        Ok(Self { path, keep: false })
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Retains the directory and its artifacts past drop.
    pub fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if !self.keep {
            // Removal failure at teardown has nowhere to go; the next run
            // recreates the directory from scratch anyway.
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_drop_removes_dir() {
        let root = tempfile::tempdir().unwrap();
        let path;
        {
            let workdir = WorkDir::create(root.path(), "strobe_run_adder").unwrap();
            path = workdir.path().to_path_buf();
            assert!(path.is_dir());
        }
        assert!(!path.exists());
    }

    #[test]
    fn keep_retains_dir() {
        let root = tempfile::tempdir().unwrap();
        let path;
        {
            let mut workdir = WorkDir::create(root.path(), "strobe_run_adder").unwrap();
            workdir.keep();
            fs::write(workdir.path().join("output.txt"), "00000010 \n").unwrap();
            path = workdir.path().to_path_buf();
        }
        assert!(path.join("output.txt").is_file());
    }

    #[test]
    fn stale_artifacts_removed_on_create() {
        let root = tempfile::tempdir().unwrap();
        let stale = root.path().join("strobe_run_adder");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("output.txt"), "stale").unwrap();

        let workdir = WorkDir::create(root.path(), "strobe_run_adder").unwrap();
        assert!(workdir.path().is_dir());
        assert!(!workdir.path().join("output.txt").exists());
    }

    #[test]
    fn nested_root_created() {
        let root = tempfile::tempdir().unwrap();
        let deep = root.path().join("a").join("b");
        let workdir = WorkDir::create(&deep, "run").unwrap();
        assert!(workdir.path().is_dir());
    }
}
