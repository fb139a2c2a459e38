//! Path containment for untrusted relative paths.

use std::path::{Component, Path, PathBuf};

/// Joins an untrusted relative path onto a trusted root directory.
///
/// Walks the components of `relative` and appends only normal ones, so
/// the result is always strictly inside `root`. Returns `None` when the
/// path is absolute, carries a drive prefix, contains a `..` component,
/// or reduces to nothing (empty string or `.` chains). Resolution is
/// purely lexical; the filesystem is never consulted and symlinks are
/// not followed.
pub fn safe_join(root: &Path, relative: &str) -> Option<PathBuf> {
    let mut joined = root.to_path_buf();
    let mut depth = 0usize;

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => {
                joined.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if depth == 0 {
        return None;
    }
    Some(joined)
}
