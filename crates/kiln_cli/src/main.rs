//! Kiln CLI — the command-line interface for the kiln development server.
//!
//! Provides `kiln serve` for running the local editor and compile server,
//! and `kiln setup` for probing a wasi-sdk installation and writing the
//! toolchain configuration.

#![warn(missing_docs)]

mod serve;
mod setup;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use env_logger::Env;

/// Kiln — a local C/C++-to-WebAssembly development server.
#[derive(Parser, Debug)]
#[command(name = "kiln", version, about = "Kiln wasm dev server")]
pub struct Cli {
    /// Path to the toolchain configuration file.
    #[arg(long, global = true, default_value = "kiln.toml")]
    pub config: PathBuf,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the development server.
    Serve(ServeArgs),
    /// Probe a wasi-sdk installation and save the toolchain config.
    Setup(SetupArgs),
}

/// Arguments for the `kiln serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// TCP port to listen on.
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Directory the editor's static assets are served from.
    #[arg(long, default_value = ".")]
    pub site_root: PathBuf,

    /// Directory proxied git commands run in.
    #[arg(long, default_value = ".")]
    pub repo_root: PathBuf,
}

/// Arguments for the `kiln setup` subcommand.
#[derive(Parser, Debug)]
pub struct SetupArgs {
    /// wasi-sdk installation root. Prompted for interactively if omitted.
    pub sdk_root: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Serve(ref args) => serve::run(args, &cli.config),
        Command::Setup(ref args) => setup::run(args, &cli.config),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_serve_default() {
        let cli = Cli::parse_from(["kiln", "serve"]);
        assert_eq!(cli.config, PathBuf::from("kiln.toml"));
        match cli.command {
            Command::Serve(ref args) => {
                assert_eq!(args.port, 8080);
                assert_eq!(args.site_root, PathBuf::from("."));
                assert_eq!(args.repo_root, PathBuf::from("."));
            }
            _ => panic!("expected Serve command"),
        }
    }

    #[test]
    fn parse_serve_with_args() {
        let cli = Cli::parse_from([
            "kiln",
            "serve",
            "--port",
            "9000",
            "--site-root",
            "web",
            "--repo-root",
            "project",
        ]);
        match cli.command {
            Command::Serve(ref args) => {
                assert_eq!(args.port, 9000);
                assert_eq!(args.site_root, PathBuf::from("web"));
                assert_eq!(args.repo_root, PathBuf::from("project"));
            }
            _ => panic!("expected Serve command"),
        }
    }

    #[test]
    fn parse_serve_short_port() {
        let cli = Cli::parse_from(["kiln", "serve", "-p", "3000"]);
        match cli.command {
            Command::Serve(ref args) => assert_eq!(args.port, 3000),
            _ => panic!("expected Serve command"),
        }
    }

    #[test]
    fn parse_setup_default() {
        let cli = Cli::parse_from(["kiln", "setup"]);
        match cli.command {
            Command::Setup(ref args) => assert!(args.sdk_root.is_none()),
            _ => panic!("expected Setup command"),
        }
    }

    #[test]
    fn parse_setup_with_root() {
        let cli = Cli::parse_from(["kiln", "setup", "/opt/wasi-sdk"]);
        match cli.command {
            Command::Setup(ref args) => {
                assert_eq!(args.sdk_root, Some(PathBuf::from("/opt/wasi-sdk")));
            }
            _ => panic!("expected Setup command"),
        }
    }

    #[test]
    fn parse_global_config_path() {
        let cli = Cli::parse_from(["kiln", "--config", "/etc/kiln.toml", "serve"]);
        assert_eq!(cli.config, PathBuf::from("/etc/kiln.toml"));
    }

    #[test]
    fn parse_config_after_subcommand() {
        let cli = Cli::parse_from(["kiln", "serve", "--config", "alt.toml"]);
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
    }
}
