//! The verified toolchain record and its derived paths.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;

/// The verified wasi-sdk paths the compile pipeline runs against.
///
/// Produced once by [`probe`](crate::probe) (interactively through the
/// setup wizard, or directly from a known root) and persisted as TOML so
/// later server starts skip the wizard. Loaded at startup and read-only
/// for the life of the process; request handlers receive it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// The wasi-sdk installation root the other paths live under.
    pub root: PathBuf,
    /// The C compiler driver, `<root>/bin/clang` (or `clang.exe`).
    pub clang: PathBuf,
    /// The WASI sysroot, `<root>/share/wasi-sysroot`.
    pub sysroot: PathBuf,
}

impl ToolchainConfig {
    /// Returns the C++ driver path expected next to `clang`.
    ///
    /// Derived by appending `++` to the file stem with the extension
    /// preserved, so `clang` becomes `clang++` and `clang.exe` becomes
    /// `clang++.exe`. Existence is not checked here; the command builder
    /// falls back to `clang` when the derived driver is absent, which
    /// covers toolchains shipping a single multiplexed driver.
    pub fn clang_cxx(&self) -> PathBuf {
        let mut name = OsString::new();
        if let Some(stem) = self.clang.file_stem() {
            name.push(stem);
        }
        name.push("++");
        if let Some(ext) = self.clang.extension() {
            name.push(".");
            name.push(ext);
        }
        self.clang.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(clang: &str) -> ToolchainConfig {
        ToolchainConfig {
            root: PathBuf::from("/opt/wasi-sdk"),
            clang: PathBuf::from(clang),
            sysroot: PathBuf::from("/opt/wasi-sdk/share/wasi-sysroot"),
        }
    }

    #[test]
    fn cxx_derived_plain() {
        let config = make_config("/opt/wasi-sdk/bin/clang");
        assert_eq!(
            config.clang_cxx(),
            PathBuf::from("/opt/wasi-sdk/bin/clang++")
        );
    }

    #[test]
    fn cxx_derived_preserves_extension() {
        let config = make_config("/opt/wasi-sdk/bin/clang.exe");
        assert_eq!(
            config.clang_cxx(),
            PathBuf::from("/opt/wasi-sdk/bin/clang++.exe")
        );
    }

    #[test]
    fn cxx_derived_stays_in_bin_dir() {
        let config = make_config("/opt/wasi-sdk/bin/clang");
        assert_eq!(
            config.clang_cxx().parent(),
            Some(PathBuf::from("/opt/wasi-sdk/bin").as_path())
        );
    }
}
