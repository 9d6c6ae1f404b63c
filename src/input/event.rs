//! Push event payload
//!
//! The triggering event arrives as a JSON document (the path comes from
//! GITHUB_EVENT_PATH). Only the fields the release decision needs are
//! deserialized; everything else in the payload is ignored.

use crate::core::error::{ConfigError, ShipResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One commit from the triggering push, in payload order
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
  pub id: String,
  pub message: String,
}

/// Repository owner identity, used as the default tag author
///
/// Org-owned repositories can omit the email in real payloads, so both
/// fields stay optional here; resolution happens in the orchestrator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoOwner {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
  #[serde(default)]
  pub owner: RepoOwner,
}

/// The triggering push event, read once per run
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
  #[serde(default)]
  pub repository: Repository,
  #[serde(default)]
  pub commits: Vec<Commit>,
}

impl PushEvent {
  /// Load and parse the event payload from disk
  pub fn load(path: &Path) -> ShipResult<Self> {
    let raw = fs::read_to_string(path).map_err(|_| ConfigError::EventNotFound {
      path: path.to_path_buf(),
    })?;

    let event = serde_json::from_str(&raw).map_err(|e| ConfigError::EventInvalid {
      path: path.to_path_buf(),
      reason: e.to_string(),
    })?;

    Ok(event)
  }
}
