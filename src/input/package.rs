//! Package manifest access
//!
//! The workspace's `package.json` is the single source of the declared
//! version. A missing file and a present file without a version are distinct
//! configuration errors (the caller surfaces both as fatal).

use crate::core::error::{ConfigError, ShipError, ShipResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct PackageManifest {
  #[serde(default)]
  version: Option<String>,
}

/// Read the declared version from `package.json` in the workspace
pub fn read_version(workspace: &Path) -> ShipResult<String> {
  let path = workspace.join("package.json");

  let raw = fs::read_to_string(&path).map_err(|_| ConfigError::PackageNotFound { path: path.clone() })?;

  let manifest: PackageManifest = serde_json::from_str(&raw).map_err(|e| ConfigError::PackageInvalid {
    path: path.clone(),
    reason: e.to_string(),
  })?;

  manifest
    .version
    .filter(|v| !v.is_empty())
    .ok_or_else(|| ShipError::Config(ConfigError::MissingVersion { path }))
}
