//! Reading and writing the persisted toolchain record.

use crate::config::ToolchainConfig;
use crate::error::ToolchainError;
use std::path::Path;

/// Default file name for the persisted record, relative to the server's
/// working directory.
pub const CONFIG_FILE: &str = "kiln.toml";

/// Reads and parses a persisted toolchain record from `path`.
pub fn load(path: &Path) -> Result<ToolchainConfig, ToolchainError> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

/// Parses a toolchain record from TOML text.
///
/// Useful for testing without filesystem dependencies.
pub fn load_from_str(content: &str) -> Result<ToolchainConfig, ToolchainError> {
    toml::from_str(content).map_err(|e| ToolchainError::Parse(e.to_string()))
}

/// Serializes `config` as TOML and writes it to `path`.
pub fn save(config: &ToolchainConfig, path: &Path) -> Result<(), ToolchainError> {
    let content =
        toml::to_string_pretty(config).map_err(|e| ToolchainError::Encode(e.to_string()))?;
    std::fs::write(path, content)?;
    Ok(())
}
