//! The disposable on-disk project tree for one request.

use crate::error::WorkspaceError;
use kiln_common::safe_join;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fixed artifact filename the compiler is pointed at.
pub const ARTIFACT_FILE: &str = "output.wasm";

/// A uniquely named temporary directory owned by one in-flight request.
///
/// Dropping the workspace removes the whole tree, best effort, on every
/// exit path out of the pipeline including panics. That drop is the
/// cleanup guarantee; nothing else in the pipeline deletes files.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates a fresh workspace directory under the system temp root.
    pub fn create() -> Result<Workspace, WorkspaceError> {
        let dir = tempfile::Builder::new().prefix("kiln_").tempdir()?;
        Ok(Workspace { dir })
    }

    /// The workspace root directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Resolves a client-relative path inside the workspace, refusing
    /// anything that would land outside the root.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, WorkspaceError> {
        safe_join(self.root(), relative)
            .ok_or_else(|| WorkspaceError::UnsafePath(relative.to_string()))
    }

    /// Writes every `(path, contents)` pair under the root, creating
    /// parent directories as needed. Paths are containment-checked
    /// before anything touches the disk, so a request with one bad path
    /// writes nothing at all.
    pub fn materialize(&self, files: &BTreeMap<String, String>) -> Result<(), WorkspaceError> {
        let mut resolved = Vec::with_capacity(files.len());
        for (path, contents) in files {
            resolved.push((self.resolve(path)?, contents));
        }
        for (full, contents) in resolved {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&full, contents)?;
        }
        Ok(())
    }

    /// Absolute path the compiler must write the artifact to.
    pub fn artifact_path(&self) -> PathBuf {
        self.root().join(ARTIFACT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn make_files(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect()
    }

    #[test]
    fn materializes_nested_tree() {
        let ws = Workspace::create().unwrap();
        let files = make_files(&[
            ("main.cpp", "int main() { return 0; }"),
            ("include/util.h", "#pragma once"),
            ("src/deep/impl.cpp", "// impl"),
        ]);
        ws.materialize(&files).unwrap();

        let read = fs::read_to_string(ws.root().join("include/util.h")).unwrap();
        assert_eq!(read, "#pragma once");
        assert!(ws.root().join("src/deep/impl.cpp").is_file());
    }

    #[test]
    fn rejects_traversal_before_writing_anything() {
        let ws = Workspace::create().unwrap();
        let files = make_files(&[("main.c", "int main(){}"), ("../evil.c", "bad")]);
        let err = ws.materialize(&files).unwrap_err();
        assert!(matches!(err, WorkspaceError::UnsafePath(p) if p == "../evil.c"));
        // The good file must not have been written either.
        assert!(!ws.root().join("main.c").exists());
    }

    #[test]
    fn rejects_absolute_paths() {
        let ws = Workspace::create().unwrap();
        let err = ws.resolve("/etc/passwd").unwrap_err();
        assert!(matches!(err, WorkspaceError::UnsafePath(_)));
    }

    #[test]
    fn artifact_path_is_fixed_name_under_root() {
        let ws = Workspace::create().unwrap();
        assert_eq!(ws.artifact_path(), ws.root().join("output.wasm"));
    }

    #[test]
    fn root_carries_recognizable_prefix() {
        let ws = Workspace::create().unwrap();
        let name = ws.root().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("kiln_"), "unexpected dir name {name}");
    }

    #[test]
    fn removed_on_drop() {
        let root = {
            let ws = Workspace::create().unwrap();
            ws.materialize(&make_files(&[("main.c", "x")])).unwrap();
            ws.root().to_path_buf()
        };
        assert!(!root.exists());
    }

    #[test]
    fn removed_when_a_panic_unwinds_through() {
        let ws = Workspace::create().unwrap();
        let root = ws.root().to_path_buf();
        let result = catch_unwind(AssertUnwindSafe(move || {
            let _owned = ws;
            panic!("mid-pipeline fault");
        }));
        assert!(result.is_err());
        assert!(!root.exists());
    }
}
