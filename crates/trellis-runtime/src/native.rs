//! Native `BuildRuntime` implementation backed by `std::fs`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::traits::{BuildRuntime, RuntimeResult};

/// Full-access runtime using the local file system.
#[derive(Debug, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl BuildRuntime for NativeRuntime {
    fn file_read_string(&self, path: &Path) -> RuntimeResult<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn file_write_string(&self, path: &Path, contents: &str) -> RuntimeResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, contents)?;
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn dir_list(&self, path: &Path) -> RuntimeResult<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = NativeRuntime::new();
        let target = dir.path().join("nested/deeper/file.txt");

        runtime.file_write_string(&target, "hello").unwrap();

        assert!(runtime.is_file(&target));
        assert_eq!(runtime.file_read_string(&target).unwrap(), "hello");
    }

    #[test]
    fn test_dir_list_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = NativeRuntime::new();
        runtime
            .file_write_string(&dir.path().join("b.txt"), "")
            .unwrap();
        runtime
            .file_write_string(&dir.path().join("a.txt"), "")
            .unwrap();

        let entries = runtime.dir_list(dir.path()).unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let runtime = NativeRuntime::new();
        let result = runtime.file_read_string(Path::new("/nonexistent/trellis.txt"));
        assert!(matches!(result, Err(crate::RuntimeError::Io(_))));
    }
}
