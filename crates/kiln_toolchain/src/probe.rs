//! Locating and verifying a wasi-sdk installation.

use crate::config::ToolchainConfig;
use crate::error::ToolchainError;
use std::path::Path;

/// Verifies that `root` holds a usable wasi-sdk and records its paths.
///
/// A root is accepted when `<root>/bin/clang` (or `clang.exe`) exists and
/// `<root>/share/wasi-sysroot` is a directory. Returns the verified
/// [`ToolchainConfig`]; the error names the first path that was missing so
/// the setup wizard can tell the user exactly what it looked for.
pub fn probe(root: &Path) -> Result<ToolchainConfig, ToolchainError> {
    let mut clang = root.join("bin").join("clang");
    if !clang.exists() {
        let exe = root.join("bin").join("clang.exe");
        if exe.exists() {
            clang = exe;
        } else {
            return Err(ToolchainError::MissingCompiler(clang));
        }
    }

    let sysroot = root.join("share").join("wasi-sysroot");
    if !sysroot.is_dir() {
        return Err(ToolchainError::MissingSysroot(sysroot));
    }

    Ok(ToolchainConfig {
        root: root.to_path_buf(),
        clang,
        sysroot,
    })
}
