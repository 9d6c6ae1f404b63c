//! Annotated tag creation with an idempotence probe
//!
//! Tag creation is check-then-act: probe `refs/tags/<name>` first, create and
//! push only when absent. Re-running with the same version is a safe no-op
//! (`AlreadyExists`), never a duplicate-tag error. Partial state from a
//! failed push (local tag without remote ref) is surfaced to the operator
//! rather than rolled back.

use crate::core::config::{ReleaseConfig, VERSION_PLACEHOLDER};
use crate::core::error::{ExecError, GitError, ShipError, ShipResult};
use crate::exec;
use std::path::Path;

/// Result of an idempotent tag attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
  /// Tag was created locally and pushed to origin
  Created(String),
  /// A tag with this name already exists; nothing was touched
  AlreadyExists(String),
}

/// Committer identity for the tag operation
#[derive(Debug, Clone)]
pub struct TagAuthor {
  pub name: String,
  pub email: String,
}

/// Replace every placeholder occurrence in `template` with `version`
pub fn render_template(template: &str, version: &str) -> String {
  template.replace(VERSION_PLACEHOLDER, version)
}

/// Check whether `refs/tags/<tag>` exists in the repository
///
/// `git rev-parse -q --verify` exits with status 1 when the ref is missing;
/// that status alone means "absent". Every other failure is unexpected and
/// propagates.
pub fn tag_exists(workspace: &Path, tag: &str) -> ShipResult<bool> {
  let ref_spec = format!("refs/tags/{}", tag);
  match exec::run(workspace, "git", &["rev-parse", "-q", "--verify", &ref_spec]) {
    Ok(()) => Ok(true),
    Err(ExecError::Exit { code: Some(1), .. }) => Ok(false),
    Err(ExecError::Exit { stderr, .. }) => Err(ShipError::Git(GitError::CommandFailed {
      command: format!("git rev-parse -q --verify {}", ref_spec),
      stderr,
    })),
    Err(launch) => Err(ShipError::Exec(launch)),
  }
}

/// Create and push an annotated tag for `version` unless it already exists
pub fn ensure_tag(
  workspace: &Path,
  config: &ReleaseConfig,
  author: &TagAuthor,
  version: &str,
) -> ShipResult<TagOutcome> {
  let tag_name = render_template(&config.tag_name, version);
  let tag_message = render_template(&config.tag_message, version);

  if tag_exists(workspace, &tag_name)? {
    return Ok(TagOutcome::AlreadyExists(tag_name));
  }

  git(workspace, &["config", "user.name", &author.name])?;
  git(workspace, &["config", "user.email", &author.email])?;
  git(workspace, &["tag", "-a", "-m", &tag_message, &tag_name])?;

  let ref_spec = format!("refs/tags/{}", tag_name);
  exec::run(workspace, "git", &["push", "origin", &ref_spec]).map_err(|err| match err {
    ExecError::Exit { stderr, .. } => ShipError::Git(GitError::PushFailed {
      tag: tag_name.clone(),
      reason: stderr,
    }),
    launch => ShipError::Exec(launch),
  })?;

  Ok(TagOutcome::Created(tag_name))
}

/// Run a git subcommand, converting non-zero exits into git errors
fn git(workspace: &Path, args: &[&str]) -> ShipResult<()> {
  exec::run(workspace, "git", args).map_err(|err| match err {
    ExecError::Exit { stderr, .. } => ShipError::Git(GitError::CommandFailed {
      command: format!("git {}", args.join(" ")),
      stderr,
    }),
    launch => ShipError::Exec(launch),
  })
}
