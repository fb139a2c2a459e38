//! The `kiln serve` subcommand: bring the development server up.

use std::path::Path;

use kiln_server::{HttpServer, ServerConfig};
use kiln_toolchain::ToolchainConfig;
use log::warn;

use crate::{setup, ServeArgs};

/// Loads (or interactively configures) the toolchain, binds the server,
/// and blocks serving requests.
pub fn run(args: &ServeArgs, config_path: &Path) -> Result<i32, Box<dyn std::error::Error>> {
    let toolchain = match load_valid(config_path) {
        Some(toolchain) => toolchain,
        None => {
            eprintln!("no usable toolchain configured; starting first-time setup");
            setup::wizard(config_path)?
        }
    };

    if !args.site_root.join("index.html").is_file() {
        warn!(
            "no index.html under {}; the editor UI will return 404",
            args.site_root.display()
        );
    }

    let server = HttpServer::bind(
        toolchain,
        ServerConfig {
            port: args.port,
            site_root: args.site_root.clone(),
            repo_root: args.repo_root.clone(),
        },
    )?;
    eprintln!("kiln dev server: http://localhost:{}/", server.port());
    eprintln!("  site root: {}", args.site_root.display());
    eprintln!("  repo root: {}", args.repo_root.display());
    server.run();
    Ok(0)
}

/// Loads the saved toolchain if it still points at a usable SDK. Any
/// failure here falls back to the wizard rather than aborting, so a
/// moved SDK or hand-edited config never strands the user.
fn load_valid(config_path: &Path) -> Option<ToolchainConfig> {
    if !config_path.exists() {
        return None;
    }
    match kiln_toolchain::load(config_path) {
        Ok(toolchain) if toolchain.clang.is_file() && toolchain.sysroot.is_dir() => Some(toolchain),
        Ok(toolchain) => {
            warn!(
                "saved toolchain in {} no longer probes ({} missing or incomplete)",
                config_path.display(),
                toolchain.root.display()
            );
            None
        }
        Err(err) => {
            warn!("could not read {}: {err}", config_path.display());
            None
        }
    }
}
