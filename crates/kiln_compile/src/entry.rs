//! Entry-point resolution and dialect inference.

use crate::error::RequestError;
use std::collections::BTreeMap;

/// Which source-language flavor governs default flag selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    /// Plain C.
    C,
    /// C++ (adds exception/RTTI defaults and standard-library linkage).
    Cpp,
}

impl Dialect {
    /// Infers the dialect from a path. Only `.cpp` and `.cc` count as
    /// C++; everything else, including headers and odd extensions on an
    /// explicitly chosen entry, compiles as C.
    pub fn of_path(path: &str) -> Dialect {
        if path.ends_with(".cpp") || path.ends_with(".cc") {
            Dialect::Cpp
        } else {
            Dialect::C
        }
    }
}

/// The chosen entry path plus its inferred dialect.
///
/// Computed once per request and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// The workspace-relative path of the translation root.
    pub path: String,
    /// The dialect driving command construction.
    pub dialect: Dialect,
}

/// Picks the compilation entry point from the request's files.
///
/// An explicit entry wins when it names a file actually present in the
/// map (an empty string counts as absent). Otherwise the first path
/// ending in `.cpp` or `.cc` is taken, then the first ending in `.c`.
/// "First" is path-sorted order, which `BTreeMap` iteration gives us.
pub fn resolve_entry(
    files: &BTreeMap<String, String>,
    explicit: Option<&str>,
) -> Result<ResolvedEntry, RequestError> {
    if let Some(entry) = explicit.filter(|e| !e.is_empty()) {
        if files.contains_key(entry) {
            return Ok(ResolvedEntry {
                path: entry.to_string(),
                dialect: Dialect::of_path(entry),
            });
        }
    }

    if let Some(path) = files
        .keys()
        .find(|p| p.ends_with(".cpp") || p.ends_with(".cc"))
    {
        return Ok(ResolvedEntry {
            path: path.clone(),
            dialect: Dialect::Cpp,
        });
    }

    if let Some(path) = files.keys().find(|p| p.ends_with(".c")) {
        return Ok(ResolvedEntry {
            path: path.clone(),
            dialect: Dialect::C,
        });
    }

    Err(RequestError::NoEntryPoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_files(paths: &[&str]) -> BTreeMap<String, String> {
        paths
            .iter()
            .map(|p| (p.to_string(), String::new()))
            .collect()
    }

    // -- explicit entry tests --

    #[test]
    fn explicit_entry_wins_over_extensions() {
        let files = make_files(&["lib.cpp", "main.c"]);
        let entry = resolve_entry(&files, Some("main.c")).unwrap();
        assert_eq!(entry.path, "main.c");
        assert_eq!(entry.dialect, Dialect::C);
    }

    #[test]
    fn explicit_entry_with_odd_extension_compiles_as_c() {
        let files = make_files(&["prog.cxx"]);
        let entry = resolve_entry(&files, Some("prog.cxx")).unwrap();
        assert_eq!(entry.path, "prog.cxx");
        assert_eq!(entry.dialect, Dialect::C);
    }

    #[test]
    fn explicit_entry_not_in_files_falls_back_to_scan() {
        let files = make_files(&["main.cpp"]);
        let entry = resolve_entry(&files, Some("gone.cpp")).unwrap();
        assert_eq!(entry.path, "main.cpp");
    }

    #[test]
    fn empty_explicit_entry_falls_back_to_scan() {
        let files = make_files(&["main.c"]);
        let entry = resolve_entry(&files, Some("")).unwrap();
        assert_eq!(entry.path, "main.c");
    }

    // -- extension inference tests --

    #[test]
    fn cpp_preferred_over_c() {
        // b.cpp sorts after a.c, so this really exercises the two-pass
        // scan rather than plain sorted order.
        let files = make_files(&["a.c", "b.cpp"]);
        let entry = resolve_entry(&files, None).unwrap();
        assert_eq!(entry.path, "b.cpp");
        assert_eq!(entry.dialect, Dialect::Cpp);
    }

    #[test]
    fn cc_recognized_as_cpp() {
        let files = make_files(&["util.h", "widget.cc"]);
        let entry = resolve_entry(&files, None).unwrap();
        assert_eq!(entry.path, "widget.cc");
        assert_eq!(entry.dialect, Dialect::Cpp);
    }

    #[test]
    fn c_file_chosen_when_no_cpp() {
        let files = make_files(&["util.h", "main.c"]);
        let entry = resolve_entry(&files, None).unwrap();
        assert_eq!(entry.path, "main.c");
        assert_eq!(entry.dialect, Dialect::C);
    }

    #[test]
    fn first_in_sorted_order_wins() {
        let files = make_files(&["zeta.cpp", "alpha.cpp"]);
        let entry = resolve_entry(&files, None).unwrap();
        assert_eq!(entry.path, "alpha.cpp");
    }

    #[test]
    fn no_source_files_errors() {
        let files = make_files(&["notes.txt", "data.json"]);
        let err = resolve_entry(&files, None).unwrap_err();
        assert_eq!(err, RequestError::NoEntryPoint);
    }

    #[test]
    fn headers_alone_do_not_resolve() {
        let files = make_files(&["util.h", "types.hpp"]);
        let err = resolve_entry(&files, None).unwrap_err();
        assert_eq!(err, RequestError::NoEntryPoint);
    }

    #[test]
    fn resolved_entry_always_present_in_files() {
        let files = make_files(&["a.cc", "b.c", "c.txt"]);
        let entry = resolve_entry(&files, None).unwrap();
        assert!(files.contains_key(&entry.path));
    }

    // -- dialect tests --

    #[test]
    fn dialect_of_path_table() {
        assert_eq!(Dialect::of_path("a.cpp"), Dialect::Cpp);
        assert_eq!(Dialect::of_path("a.cc"), Dialect::Cpp);
        assert_eq!(Dialect::of_path("a.c"), Dialect::C);
        assert_eq!(Dialect::of_path("a.h"), Dialect::C);
        assert_eq!(Dialect::of_path("nested/dir/b.cpp"), Dialect::Cpp);
    }
}
