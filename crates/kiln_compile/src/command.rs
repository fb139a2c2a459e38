//! Deterministic construction of the compiler invocation.

use crate::entry::Dialect;
use crate::workspace::ARTIFACT_FILE;
use kiln_toolchain::ToolchainConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Target triple every build is pinned to.
pub const TARGET_TRIPLE: &str = "wasm32-wasi";

/// The exact compiler invocation for one request.
///
/// Built once from resolved inputs, never mutated afterwards, consumed
/// exactly once by the process runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    /// The driver to execute.
    pub program: PathBuf,
    /// Arguments in their exact final order.
    pub args: Vec<OsString>,
}

impl CompileCommand {
    /// Builds the invocation for `entry_path` (absolute, inside
    /// `workspace_root`).
    ///
    /// Token order: entry, target triple, sysroot, workspace include
    /// path, standard flag, optimization flag, C++ defaults and
    /// standard-library linkage when the dialect asks for them, the
    /// user's flags verbatim, and the output path last.
    ///
    /// For C++, exceptions and RTTI are disabled unless the user's flag
    /// tokens contain `-fexceptions`: the sysroot's libc++ is built
    /// without unwinding support, so code using exceptions would
    /// otherwise die at link time with no hint of why. An explicit
    /// `-fexceptions` suppresses both defaults.
    pub fn build(
        config: &ToolchainConfig,
        workspace_root: &Path,
        entry_path: &Path,
        dialect: Dialect,
        std_flag: &str,
        opt_flag: &str,
        extra_flags: &str,
    ) -> CompileCommand {
        // clang++ when the dialect wants it and the sdk ships it;
        // otherwise the plain driver handles both languages.
        let program = match dialect {
            Dialect::Cpp => {
                let cxx = config.clang_cxx();
                if cxx.exists() {
                    cxx
                } else {
                    config.clang.clone()
                }
            }
            Dialect::C => config.clang.clone(),
        };

        let mut args: Vec<OsString> = Vec::new();
        args.push(entry_path.as_os_str().to_os_string());
        args.push(OsString::from(format!("--target={TARGET_TRIPLE}")));

        let mut sysroot = OsString::from("--sysroot=");
        sysroot.push(config.sysroot.as_os_str());
        args.push(sysroot);

        // Same-directory includes resolve against the workspace root.
        let mut include = OsString::from("-I");
        include.push(workspace_root.as_os_str());
        args.push(include);

        args.push(OsString::from(std_flag));
        args.push(OsString::from(opt_flag));

        let user_flags: Vec<&str> = extra_flags.split_whitespace().collect();
        if dialect == Dialect::Cpp {
            if !user_flags.contains(&"-fexceptions") {
                args.push(OsString::from("-fno-exceptions"));
                args.push(OsString::from("-fno-rtti"));
            }
            args.push(OsString::from("-lc++"));
            args.push(OsString::from("-lc++abi"));
        }

        for flag in &user_flags {
            args.push(OsString::from(*flag));
        }

        args.push(OsString::from("-o"));
        args.push(workspace_root.join(ARTIFACT_FILE).into_os_string());

        CompileCommand { program, args }
    }
}
