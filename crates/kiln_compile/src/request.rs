//! The compile request contract and its field defaults.

use crate::error::RequestError;
use serde::Deserialize;
use std::collections::BTreeMap;

fn default_std() -> String {
    "-std=c++17".to_string()
}

fn default_opt() -> String {
    "-O1".to_string()
}

fn default_flags() -> String {
    "-Wall".to_string()
}

/// One compile request, deserialized from the JSON body of `POST /compile`.
///
/// Absent option fields take the documented defaults. The files map is a
/// `BTreeMap` so "the first file ending in `.cpp`" is a deterministic,
/// path-sorted notion rather than whatever order the client's JSON
/// encoder happened to emit.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileRequest {
    /// Relative path to UTF-8 source text, possibly nested (`src/a.h`).
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    /// Language standard flag, passed through verbatim.
    #[serde(default = "default_std")]
    pub std: String,
    /// Optimization flag, passed through verbatim.
    #[serde(default = "default_opt")]
    pub opt: String,
    /// Extra flags, whitespace-separated, appended after the defaults.
    #[serde(default = "default_flags")]
    pub flags: String,
    /// Explicit entry-point path; falls back to extension inference.
    #[serde(default)]
    pub entry: Option<String>,
}

impl CompileRequest {
    /// Rejects requests the pipeline cannot meaningfully start on.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.files.is_empty() {
            return Err(RequestError::NoFiles);
        }
        Ok(())
    }
}
