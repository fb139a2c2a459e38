//! The `kiln setup` subcommand and the first-run wizard.

use std::io::{self, BufRead, Write};
use std::path::Path;

use kiln_toolchain::{probe, save, ToolchainConfig};

use crate::SetupArgs;

/// Probes the given SDK root, or walks the interactive wizard when none
/// was given, and persists the result.
pub fn run(args: &SetupArgs, config_path: &Path) -> Result<i32, Box<dyn std::error::Error>> {
    match &args.sdk_root {
        Some(root) => {
            let toolchain = probe(root)?;
            persist(&toolchain, config_path)?;
        }
        None => {
            wizard(config_path)?;
        }
    }
    Ok(0)
}

/// Prompts for a wasi-sdk root until one probes cleanly, then persists
/// it. All chatter goes to stderr so stdout stays clean. EOF on stdin
/// aborts with an error instead of looping forever.
pub fn wizard(config_path: &Path) -> Result<ToolchainConfig, Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("wasi-sdk root (e.g. /opt/wasi-sdk): ");
        io::stderr().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err("setup aborted: stdin closed before a toolchain was configured".into())
            }
        };
        let trimmed = line.trim().trim_matches('"').trim_matches('\'');
        if trimmed.is_empty() {
            continue;
        }
        match probe(Path::new(trimmed)) {
            Ok(toolchain) => {
                persist(&toolchain, config_path)?;
                return Ok(toolchain);
            }
            Err(err) => eprintln!("not a usable wasi-sdk: {err}"),
        }
    }
}

fn persist(
    toolchain: &ToolchainConfig,
    config_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    save(toolchain, config_path)?;
    eprintln!("toolchain saved to {}", config_path.display());
    eprintln!("  clang:   {}", toolchain.clang.display());
    eprintln!("  sysroot: {}", toolchain.sysroot.display());
    Ok(())
}
